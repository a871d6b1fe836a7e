//! cogc-par - the two-pass recursive-descent parser.
//!
//! Both passes share one [`cursor::TokenCursor`] and one
//! [`cogc_sem::SymbolTable`]: pass 1 ([`pass1`]) walks the tokens once
//! to pre-register every top-level name, then resets the cursor;
//! pass 2 drives the real grammar ([`stmt`], [`expr`], [`types`]) with
//! every forward reference already resolvable.

mod cursor;
mod equalise;
mod expr;
mod pass1;
mod stmt;
mod types;

use cogc_ast::{File, Ident};
use cogc_lex::{Lexer, Token, TokenKind};
use cogc_sem::SymbolTable;
use cogc_util::{Bag, CancelToken, Interner, Position, Symbol};
use cursor::TokenCursor;

const STAGE: &str = "parser";

pub struct Parser {
    cursor: TokenCursor,
    interner: Interner,
    diagnostics: Bag,
    symbols: SymbolTable<Ident>,
    cancel: CancelToken,
    package: Option<Symbol>,
    /// Stack of `is_function` flags, one per callable body currently being
    /// parsed. A `func(...)` has no `ctx`, so a `dyn` read inside one is
    /// rejected; a `proc(...)` (or top-level code outside any callable)
    /// allows it. A stack rather than a single flag because a procedure
    /// literal can be parsed as an argument expression while another
    /// callable's body is still open.
    callable_kinds: Vec<bool>,
}

impl Parser {
    fn new(tokens: Vec<Token>, cancel: CancelToken) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            interner: Interner::new(),
            diagnostics: Bag::new(),
            symbols: SymbolTable::new(),
            cancel,
            package: None,
            callable_kinds: Vec::new(),
        }
    }

    fn error(&mut self, position: Position, message: impl Into<String>) {
        self.diagnostics.error(position, STAGE, message);
    }

    pub(crate) fn enter_callable(&mut self, is_function: bool) {
        self.callable_kinds.push(is_function);
    }

    pub(crate) fn exit_callable(&mut self) {
        self.callable_kinds.pop();
    }

    /// True while parsing the body of a `func(...)` (not a `proc(...)`),
    /// the one place `dyn` identifiers may not be read — a function has
    /// no `ctx`, and every `dyn` read lowers to a context-value lookup.
    pub(crate) fn in_function_body(&self) -> bool {
        self.callable_kinds.last().copied().unwrap_or(false)
    }

    fn error_here(&mut self, message: impl Into<String>) {
        let position = self.cursor.position();
        self.error(position, message);
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Option<Token> {
        if self.cursor.at(kind) {
            Some(self.cursor.advance())
        } else {
            self.error_here(format!("{message}, found {}", self.cursor.kind()));
            None
        }
    }
}

/// Lexes and parses one source file, running pass 1 (global discovery)
/// followed by pass 2 (the full parse) over the same token stream.
/// Returns the parsed [`File`] alongside the [`Interner`] that resolves
/// its symbols, or the joined diagnostic report on failure.
pub fn parse(source: &str) -> Result<(File, Interner), String> {
    parse_cancellable(source, CancelToken::new())
}

/// As [`parse`], but checks `cancel` at every loop head so a caller can
/// abort a long parse from another point in the same cooperative
/// single-threaded run.
pub fn parse_cancellable(source: &str, cancel: CancelToken) -> Result<(File, Interner), String> {
    let tokens = Lexer::new(source).tokenize()?;
    let mut parser = Parser::new(tokens, cancel);

    parser.discover();
    let file = parser.parse_file();

    match parser.diagnostics.join() {
        Some(report) => Err(format!("parse error:\n{report}")),
        None => Ok((file, parser.interner)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_print_parses_without_diagnostics() {
        let (file, interner) = parse("package main\nmain : proc() = { @print(\"hello\") }").unwrap();
        assert_eq!(interner.resolve(file.package), "main");
        assert_eq!(file.statements.len(), 2);
    }

    #[test]
    fn duplicate_global_is_rejected_and_terminates() {
        let result = parse("package main\na := 1\na := 2\nmain : proc() = {}");
        assert!(result.is_err());
    }

    #[test]
    fn dyn_inside_a_procedure_body_is_rejected() {
        let result = parse("package main\nmain : proc() = { dyn inner : utf8 = \"nope\" }");
        assert!(result.is_err());
    }

    #[test]
    fn forward_reference_to_a_later_global_resolves() {
        let result = parse(
            "package main\nmain : proc() = { helper() }\nhelper : proc() = { @print(\"hi\") }",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn dynamic_variable_read_from_inside_a_function_is_rejected() {
        let result = parse(
            "package main\ndyn val : utf8 = \"default\"\nhelper : func() -> utf8 = { return val }\nmain : proc() = { @print(helper()) }",
        );
        assert!(result.is_err());
    }

    #[test]
    fn dynamic_variable_read_from_inside_a_procedure_is_allowed() {
        let result = parse(
            "package main\ndyn val : utf8 = \"default\"\nmain : proc() = { @print(val) }",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn enum_variant_selector_resolves_via_the_field_map() {
        let result = parse(
            "package main\nStatus ~ enum[utf8] { Open := \"open\", }\nmain : proc() = { v := Status.Open; @print(v) }",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn cancellation_yields_a_partial_result_without_hanging() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = parse_cancellable("package main\nmain : proc() = { @print(\"hi\") }", cancel);
        // Cancelled before any work ran: no diagnostics were ever raised,
        // so the empty partial file still reports as `Ok`.
        assert!(result.is_ok());
    }
}
