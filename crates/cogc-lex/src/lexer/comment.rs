//! Whitespace and line-comment skipping.

use super::Lexer;

impl<'a> Lexer<'a> {
    /// Skips runs of whitespace and `//` line comments between tokens.
    pub(super) fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.cursor.advance();
                }
                b'/' if self.cursor.peek(1) == b'/' => {
                    while !self.cursor.is_at_end() && self.cursor.current() != b'\n' {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }
}
