//! Integer and floating literal scanning.
//!
//! Width and narrowing are entirely the parser's job (see the
//! expected-type propagation rules); the lexer only has to decide
//! whether it saw a `.` and hand back the raw digit text.

use super::Lexer;
use crate::token::{Token, TokenKind};
use cogc_util::Position;

impl<'a> Lexer<'a> {
    pub(super) fn scan_number(&mut self, position: Position) -> Token {
        let start = self.cursor.position();
        while self.cursor.current().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut is_float = false;
        if self.cursor.current() == b'.' && self.cursor.peek(1).is_ascii_digit() {
            is_float = true;
            self.cursor.advance();
            while self.cursor.current().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        let text = std::str::from_utf8(self.cursor.slice(start, self.cursor.position()))
            .expect("digit bytes are always ASCII")
            .to_owned();

        let kind = if is_float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        };
        Token::new(kind, text, position)
    }
}
