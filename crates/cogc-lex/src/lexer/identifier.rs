//! Identifier and keyword scanning.

use super::Lexer;
use crate::token::{keyword, Token, TokenKind};
use cogc_util::Position;

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl<'a> Lexer<'a> {
    pub(super) fn at_identifier_start(&self) -> bool {
        is_ident_start(self.cursor.current())
    }

    pub(super) fn scan_identifier(&mut self, position: Position) -> Token {
        let text = self.scan_identifier_text();
        match keyword(&text) {
            Some(kind) => Token::bare(kind, position),
            None => Token::new(TokenKind::Identifier, text, position),
        }
    }

    /// Scans a raw identifier spelling without keyword interpretation.
    /// Used after the `@` sigil, where `@if` must name the builtin
    /// `if`, not the `if` keyword.
    pub(super) fn scan_identifier_text(&mut self) -> String {
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        std::str::from_utf8(self.cursor.slice(start, self.cursor.position()))
            .expect("identifier bytes are always ASCII")
            .to_owned()
    }
}
