//! Double-quoted and back-quoted string literal scanning.
//!
//! Both forms are delivered to the parser with their quoting stripped
//! (the `ascii` vs. `utf8` distinction is made later, from the expected
//! type, not from which quote style was used).

use super::Lexer;
use crate::token::{Token, TokenKind};
use cogc_util::Position;

impl<'a> Lexer<'a> {
    pub(super) fn scan_quoted(&mut self, position: Position) -> Token {
        let quote = self.cursor.current();
        self.cursor.advance();

        let start = self.cursor.position();
        while !self.cursor.is_at_end() && self.cursor.current() != quote {
            if quote == b'"' && self.cursor.current() == b'\\' {
                self.cursor.advance();
                if !self.cursor.is_at_end() {
                    self.cursor.advance();
                }
                continue;
            }
            self.cursor.advance();
        }

        let text = String::from_utf8_lossy(self.cursor.slice(start, self.cursor.position()))
            .into_owned();

        if self.cursor.is_at_end() {
            self.error(position, "unterminated string literal");
        } else {
            self.cursor.advance(); // closing quote
        }

        Token::new(TokenKind::StringLiteral, text, position)
    }
}
