//! cogc-lex - Lexical analysis for the `cog` source language.
//!
//! Converts UTF-8 source text into a finite token sequence terminated
//! by [`token::TokenKind::Eof`]. String and back-quoted literal bodies
//! may contain arbitrary UTF-8; everything else (identifiers, numbers,
//! punctuation) is ASCII.

pub mod cursor;
mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};
