//! Lexer module, organized the way the rest of the front end is: a
//! small dispatcher (this file) plus one focused submodule per lexeme
//! family.
//! - `identifier` - identifiers and keyword lookup
//! - `number` - integer and float literals
//! - `string` - double-quoted and back-quoted string literals
//! - `operator` - punctuation, operators, and `@builtin`
//! - `comment` - whitespace and `//` comment skipping

mod comment;
mod identifier;
mod number;
mod operator;
mod string;

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use cogc_util::{Bag, Position};

const STAGE: &str = "lexer";

/// Converts `cog` source text into a token sequence terminated by
/// [`TokenKind::Eof`]. Unrecognised bytes are recorded as diagnostics
/// and skipped; the lexer keeps scanning so a single bad character
/// doesn't hide every other lexical error in the file.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    diagnostics: Bag,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source.as_bytes()),
            diagnostics: Bag::new(),
        }
    }

    fn error(&mut self, position: Position, message: impl Into<String>) {
        self.diagnostics.error(position, STAGE, message);
    }

    fn position(&self) -> Position {
        Position::new(self.cursor.line(), self.cursor.column())
    }

    /// Runs the lexer to completion, returning the token stream or the
    /// joined error report if anything failed to scan.
    pub fn tokenize(mut self) -> Result<Vec<Token>, String> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia();
            if self.cursor.is_at_end() {
                tokens.push(Token::bare(TokenKind::Eof, self.position()));
                break;
            }

            let position = self.position();
            let byte = self.cursor.current();

            let token = if self.at_identifier_start() {
                self.scan_identifier(position)
            } else if byte.is_ascii_digit() {
                self.scan_number(position)
            } else if byte == b'"' || byte == b'`' {
                self.scan_quoted(position)
            } else if let Some(token) = self.scan_operator(position) {
                token
            } else {
                self.error(position, format!("unknown token: {}", byte as char));
                self.cursor.advance();
                continue;
            };

            tokens.push(token);
        }

        match self.diagnostics.join() {
            Some(report) => Err(format!("tokenization error:\n{report}")),
            None => Ok(tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn two_character_operators_win_over_one() {
        assert_eq!(
            kinds(":= == != <= >= && ||"),
            vec![
                TokenKind::Declaration,
                TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::LtEqual,
                TokenKind::GtEqual,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn builtin_requires_no_whitespace() {
        let tokens = Lexer::new("@print(x)").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Builtin);
        assert_eq!(tokens[0].literal, "print");
    }

    #[test]
    fn builtin_name_can_shadow_a_keyword() {
        let tokens = Lexer::new("@if(true, 1, 2)").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Builtin);
        assert_eq!(tokens[0].literal, "if");
    }

    #[test]
    fn positions_are_monotonically_non_decreasing() {
        let tokens = Lexer::new("package main\nmain : proc() = {}").tokenize().unwrap();
        let mut last_line = 1;
        for t in &tokens {
            assert!(t.position.line >= last_line);
            last_line = t.position.line;
        }
    }

    #[test]
    fn unknown_bytes_accumulate_into_one_error() {
        let err = Lexer::new("a := 1 $ b := 2 #").tokenize().unwrap_err();
        assert!(err.contains('$'));
        assert!(err.contains('#'));
    }

    #[test]
    fn string_literal_strips_quotes() {
        let tokens = Lexer::new(r#""hello""#).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].literal, "hello");
    }

    #[test]
    fn back_quoted_string_strips_quotes() {
        let tokens = Lexer::new("`raw`").tokenize().unwrap();
        assert_eq!(tokens[0].literal, "raw");
    }

    #[test]
    fn float_requires_digit_after_dot() {
        let tokens = Lexer::new("1.5 1.").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::FloatLiteral);
        // `1.` with nothing following the dot is an int literal followed by Dot.
        assert_eq!(tokens[1].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[2].kind, TokenKind::Dot);
    }
}
