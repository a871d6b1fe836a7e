//! Pass 1: global discovery.
//!
//! A single linear sweep over the token vector that pre-registers every
//! top-level name — so pass 2 can resolve a forward reference to a
//! global no matter which order the two declarations appear in the
//! source — without fully elaborating value initialisers. Type and
//! enum declarations are the exception: their full type expression is
//! parsed eagerly here, both because later aliases need the `Ty` to
//! chase and because an enum's variants must be in the field map
//! before anything can write `Name.Variant`.

use crate::Parser;
use cogc_ast::{Ident, Qualifier, Ty};
use cogc_lex::TokenKind;
use cogc_sem::SymbolKind;
use cogc_util::Bag;

impl Parser {
    pub(crate) fn discover(&mut self) {
        while !self.cursor.is_eof() {
            if self.cancel.is_cancelled() {
                break;
            }
            let before = self.cursor.index();
            self.discover_top_level_form();
            if self.cursor.index() == before {
                self.cursor.advance();
            }
        }
        self.cursor.reset();
        self.diagnostics = Bag::new();
    }

    fn discover_top_level_form(&mut self) {
        match self.cursor.kind() {
            TokenKind::Package => {
                self.cursor.advance();
                self.cursor.eat(TokenKind::Identifier);
            }
            TokenKind::GoImport => self.discover_go_import(),
            TokenKind::Export | TokenKind::Var | TokenKind::Dyn => {
                self.cursor.advance();
            }
            TokenKind::Identifier => match self.cursor.peek_at(1).kind {
                TokenKind::Tilde => self.discover_type_decl(),
                TokenKind::Colon | TokenKind::Declaration => self.discover_value_decl(),
                _ => {
                    self.cursor.advance();
                }
            },
            _ => {
                self.cursor.advance();
            }
        }
    }

    fn discover_go_import(&mut self) {
        self.cursor.advance(); // `goimport`
        if !self.cursor.eat(TokenKind::LParen) {
            return;
        }
        while !self.cursor.at(TokenKind::RParen) && !self.cursor.is_eof() {
            if self.cursor.at(TokenKind::StringLiteral) {
                let tok = self.cursor.advance();
                let last_segment = tok.literal.rsplit('/').next().unwrap_or(&tok.literal).to_owned();
                let name = self.interner.intern(&last_segment);
                if self.symbols.resolve_go_import(name).is_none() {
                    let ident = Ident::new(name, tok.position, Ty::NONE, Qualifier::Immutable);
                    self.symbols.define_go_import(name, ident);
                }
            } else {
                self.cursor.advance();
            }
        }
        self.cursor.eat(TokenKind::RParen);
    }

    /// Pre-registers `name` as a `Scan`-tagged placeholder of type
    /// `none`, then skips past the initialiser without elaborating it.
    fn discover_value_decl(&mut self) {
        let name_tok = self.cursor.advance(); // identifier
        let name = self.interner.intern(&name_tok.literal);
        let ident = Ident::new(name, name_tok.position, Ty::NONE, Qualifier::Immutable);
        let _ = self.symbols.define_scan(name, ident, SymbolKind::Variable);
        self.cursor.advance(); // `:` or `:=`
        self.skip_initializer();
    }

    /// Eagerly parses the full type expression so later aliases and
    /// pass 2 itself can chase it regardless of declaration order.
    /// Struct fields and enum variants are registered here too, for
    /// the same reason `Status.Open` must resolve even if `main` is
    /// textually above `Status`.
    fn discover_type_decl(&mut self) {
        let name_tok = self.cursor.advance(); // identifier
        let position = name_tok.position;
        let name = self.interner.intern(&name_tok.literal);
        self.cursor.advance(); // `~`
        let Some(ty) = self.parse_type() else {
            return;
        };

        match &ty {
            Ty::Struct(fields) => {
                for field in fields {
                    let ident = Ident::new(field.name, position, field.ty.clone(), Qualifier::Immutable);
                    self.symbols.define_field(name, field.name, ident);
                }
            }
            Ty::Enum(value_ty, variants) => {
                for variant in variants {
                    let ident = Ident::new(variant.name, position, (**value_ty).clone(), Qualifier::Immutable);
                    self.symbols.define_enum_value(name, variant.name, ident);
                }
            }
            _ => {}
        }

        let ident = Ident::new(name, position, ty, Qualifier::Type);
        let _ = self.symbols.define_scan(name, ident, SymbolKind::Type);
    }

    /// Bracket-balanced advance past a value initialiser: keeps going
    /// until either EOF or a new top-level form starts at depth zero.
    /// There is no dedicated statement terminator token, so "the next
    /// form has started" is the only signal pass 1 has to stop on.
    fn skip_initializer(&mut self) {
        let mut depth: i32 = 0;
        loop {
            if self.cancel.is_cancelled() || self.cursor.is_eof() {
                return;
            }
            if depth == 0 && self.at_top_level_form_start() {
                return;
            }
            match self.cursor.kind() {
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => depth -= 1,
                _ => {}
            }
            self.cursor.advance();
        }
    }

    fn at_top_level_form_start(&self) -> bool {
        match self.cursor.kind() {
            TokenKind::Package | TokenKind::GoImport | TokenKind::Export | TokenKind::Var | TokenKind::Dyn => true,
            TokenKind::Identifier => matches!(
                self.cursor.peek_at(1).kind,
                TokenKind::Colon | TokenKind::Declaration | TokenKind::Tilde
            ),
            _ => false,
        }
    }
}
