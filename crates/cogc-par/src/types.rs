//! Type-expression grammar.
//!
//! A type expression never needs an `expected` type of its own — unlike
//! `{ ... }` composite literals, what a type expression parses to is
//! syntax-directed. What *does* need an expected type are the constant
//! expressions nested inside a type (an array's length, an enum
//! variant's value): those recurse back into [`crate::Parser::parse_expr`].

use crate::Parser;
use cogc_ast::{EnumVariant, Field, GenericConstraint, Param, ProcSig, Ty};
use cogc_lex::TokenKind;
use cogc_sem::SymbolKind;

impl Parser {
    /// Parses one type expression, reporting and returning `None` on
    /// failure so the caller can recover at the next top-level form.
    pub(crate) fn parse_type(&mut self) -> Option<Ty> {
        let mut ty = self.parse_type_atom()?;
        while self.cursor.eat(TokenKind::Question) {
            if matches!(ty, Ty::Option(_)) {
                self.error_here("option<option<T>> is not permitted: nesting is forbidden");
                return None;
            }
            ty = Ty::Option(Box::new(ty));
        }
        Some(ty)
    }

    fn parse_type_atom(&mut self) -> Option<Ty> {
        let position = self.cursor.position();
        match self.cursor.kind() {
            TokenKind::Ascii => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Ascii)) }
            TokenKind::Bool => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Bool)) }
            TokenKind::Utf8 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Utf8)) }
            TokenKind::Uint8 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Uint8)) }
            TokenKind::Uint16 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Uint16)) }
            TokenKind::Uint32 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Uint32)) }
            TokenKind::Uint64 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Uint64)) }
            TokenKind::Uint128 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Uint128)) }
            TokenKind::Int8 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Int8)) }
            TokenKind::Int16 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Int16)) }
            TokenKind::Int32 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Int32)) }
            TokenKind::Int64 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Int64)) }
            TokenKind::Int128 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Int128)) }
            TokenKind::Float16 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Float16)) }
            TokenKind::Float32 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Float32)) }
            TokenKind::Float64 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Float64)) }
            TokenKind::Complex32 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Complex32)) }
            TokenKind::Complex64 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Complex64)) }
            TokenKind::Complex128 => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Complex128)) }
            TokenKind::ContextKw => { self.cursor.advance(); Some(Ty::Basic(cogc_ast::Basic::Context)) }

            TokenKind::LBracket => self.parse_array_or_slice(),
            TokenKind::Map => self.parse_map_type(),
            TokenKind::Set => self.parse_set_type(),
            TokenKind::Struct => self.parse_struct_type(),
            TokenKind::Tuple => self.parse_tuple_type(),
            TokenKind::Union => self.parse_union_type(),
            TokenKind::Enum => self.parse_enum_type(),
            TokenKind::Procedure => self.parse_proc_sig(false),
            TokenKind::Function => self.parse_proc_sig(true),

            TokenKind::Identifier => {
                let name_text = self.cursor.advance().literal;
                let name = self.interner.intern(&name_text);
                match self.symbols.resolve(name) {
                    Some(entry) if entry.kind == SymbolKind::Type => {
                        Some(Ty::Alias(name, Box::new(entry.ident.ty.clone())))
                    }
                    Some(_) => {
                        self.error(position, format!("`{name_text}` does not name a type"));
                        None
                    }
                    None => {
                        // Forward reference to a type declared later in the
                        // file; pass 1 has already parsed its full type
                        // expression eagerly, so this can only happen for a
                        // genuinely undeclared name.
                        self.error(position, format!("undefined type `{name_text}`"));
                        None
                    }
                }
            }
            other => {
                self.error(position, format!("expected a type, found {other}"));
                None
            }
        }
    }

    fn parse_array_or_slice(&mut self) -> Option<Ty> {
        self.cursor.advance(); // `[`
        if self.cursor.eat(TokenKind::RBracket) {
            let elem = self.parse_type()?;
            return Some(Ty::Slice(Box::new(elem)));
        }
        let expected_len = Ty::Basic(cogc_ast::Basic::Int64);
        let len = self.parse_expr(&expected_len)?;
        self.expect(TokenKind::RBracket, "expected `]` after array length")?;
        let elem = self.parse_type()?;
        Some(Ty::Array(Box::new(elem), Box::new(len)))
    }

    fn parse_map_type(&mut self) -> Option<Ty> {
        self.cursor.advance(); // `map`
        self.expect(TokenKind::LBracket, "expected `[` after `map`")?;
        let key = self.parse_type()?;
        self.expect(TokenKind::RBracket, "expected `]` after map key type")?;
        let value = self.parse_type()?;
        Some(Ty::Map(Box::new(key), Box::new(value)))
    }

    fn parse_set_type(&mut self) -> Option<Ty> {
        self.cursor.advance(); // `set`
        self.expect(TokenKind::LBracket, "expected `[` after `set`")?;
        let elem = self.parse_type()?;
        self.expect(TokenKind::RBracket, "expected `]` after set element type")?;
        Some(Ty::Set(Box::new(elem)))
    }

    fn parse_struct_type(&mut self) -> Option<Ty> {
        self.cursor.advance(); // `struct`
        self.expect(TokenKind::LBrace, "expected `{` after `struct`")?;
        let mut fields = Vec::new();
        while !self.cursor.at(TokenKind::RBrace) && !self.cursor.is_eof() {
            let exported = self.cursor.eat(TokenKind::Export);
            let name_tok = self.expect(TokenKind::Identifier, "expected field name")?;
            let name = self.interner.intern(&name_tok.literal);
            self.expect(TokenKind::Colon, "expected `:` after field name")?;
            let ty = self.parse_type()?;
            fields.push(Field { name, ty, exported });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "expected `}` to close struct type")?;
        Some(Ty::Struct(fields))
    }

    fn parse_tuple_type(&mut self) -> Option<Ty> {
        self.cursor.advance(); // `tuple`
        self.expect(TokenKind::Lt, "expected `<` after `tuple`")?;
        let mut items = Vec::new();
        while !self.cursor.at(TokenKind::Gt) && !self.cursor.is_eof() {
            items.push(self.parse_type()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::Gt, "expected `>` to close tuple type")?;
        if items.len() < 2 || items.len() > 8 {
            self.error_here(format!(
                "tuple arity must be between 2 and 8, found {}",
                items.len()
            ));
            return None;
        }
        Some(Ty::Tuple(items))
    }

    fn parse_union_type(&mut self) -> Option<Ty> {
        self.cursor.advance(); // `union`
        self.expect(TokenKind::Lt, "expected `<` after `union`")?;
        let either = self.parse_type()?;
        self.expect(TokenKind::Comma, "union requires exactly two arms")?;
        let or = self.parse_type()?;
        if self.cursor.eat(TokenKind::Comma) {
            self.error_here("union accepts exactly two arms, found a third");
            return None;
        }
        self.expect(TokenKind::Gt, "expected `>` to close union type")?;
        Some(Ty::Union(Box::new(either), Box::new(or)))
    }

    fn parse_enum_type(&mut self) -> Option<Ty> {
        self.cursor.advance(); // `enum`
        self.expect(TokenKind::LBracket, "expected `[` after `enum`")?;
        let value_ty = self.parse_type()?;
        self.expect(TokenKind::RBracket, "expected `]` after enum value type")?;
        self.expect(TokenKind::LBrace, "expected `{` to open enum body")?;
        let mut variants = Vec::new();
        while !self.cursor.at(TokenKind::RBrace) && !self.cursor.is_eof() {
            let name_tok = self.expect(TokenKind::Identifier, "expected enum variant name")?;
            let name = self.interner.intern(&name_tok.literal);
            self.expect(TokenKind::Declaration, "expected `:=` after enum variant name")?;
            let value = self.parse_expr(&value_ty)?;
            variants.push(EnumVariant { name, value });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "expected `}` to close enum body")?;
        if variants.len() > 65535 {
            self.error_here("enum declares more than 65535 variants");
            return None;
        }
        Some(Ty::Enum(Box::new(value_ty), variants))
    }

    /// `proc(params) [-> T]` / `func(params) [-> T]`.
    pub(crate) fn parse_proc_sig(&mut self, is_function: bool) -> Option<Ty> {
        self.cursor.advance(); // `proc` / `func`
        self.expect(TokenKind::LParen, "expected `(` to open parameter list")?;
        let mut params = Vec::new();
        let mut seen_optional = false;
        let mut index = 0usize;
        while !self.cursor.at(TokenKind::RParen) && !self.cursor.is_eof() {
            let name_tok = self.expect(TokenKind::Identifier, "expected parameter name")?;
            let name = self.interner.intern(&name_tok.literal);

            if name_tok.literal == "ctx" {
                if is_function {
                    self.error(name_tok.position, "`ctx` may not appear in a function's parameters; only procedures may take a context");
                } else if index != 0 {
                    self.error(name_tok.position, "`ctx` may only appear as the first parameter");
                }
            }

            let optional = self.cursor.eat(TokenKind::Question);
            self.expect(TokenKind::Colon, "expected `:` after parameter name")?;
            let ty = self.parse_type()?;

            if name_tok.literal == "ctx" && !matches!(ty.underlying(), Ty::Basic(cogc_ast::Basic::Context)) {
                self.error(name_tok.position, "`ctx` must have type `context`");
            }

            if !optional && seen_optional {
                self.error(name_tok.position, "a required parameter may not follow an optional one");
            }
            seen_optional |= optional;

            let default = if optional && self.cursor.eat(TokenKind::Assign) {
                Some(self.parse_expr(&ty)?)
            } else {
                None
            };
            if default.is_some() && !optional {
                self.error(name_tok.position, "a default value is only permitted on an optional parameter");
            }

            params.push(Param { name, ty, optional, default });
            index += 1;
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "expected `)` to close parameter list")?;

        let return_ty = if self.cursor.eat(TokenKind::Minus) {
            self.expect(TokenKind::Gt, "expected `>` to complete `->`")?;
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        if is_function && return_ty.is_none() {
            self.error_here("a function must declare a return type");
        }

        Some(Ty::Procedure(ProcSig { params, return_ty, is_function }))
    }

    /// Reserved for a future generic type parameter; never produced from
    /// source syntax today (see `Ty::Generic`'s doc comment).
    #[allow(dead_code)]
    pub(crate) fn make_generic(&mut self, name_text: &str, members: Vec<cogc_ast::Basic>) -> Ty {
        let name = self.interner.intern(name_text);
        Ty::Generic(GenericConstraint { name, members })
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    #[test]
    fn required_parameter_after_optional_is_rejected() {
        let result = parse("package main\nf : proc(a?: utf8, b: utf8) = {}\nmain : proc() = {}");
        assert!(result.is_err());
    }

    #[test]
    fn ctx_outside_the_first_parameter_is_rejected() {
        let result = parse("package main\nf : proc(a: utf8, ctx: context) = {}\nmain : proc() = {}");
        assert!(result.is_err());
    }

    #[test]
    fn ctx_with_a_non_context_type_is_rejected() {
        let result = parse("package main\nf : proc(ctx: utf8) = {}\nmain : proc() = {}");
        assert!(result.is_err());
    }

    #[test]
    fn ctx_in_a_function_is_rejected() {
        let result = parse("package main\nf : func(ctx: context) -> utf8 = { return \"x\" }\nmain : proc() = {}");
        assert!(result.is_err());
    }

    #[test]
    fn an_enum_with_too_many_variants_is_rejected() {
        let mut variants = String::new();
        for i in 0..=65535u32 {
            variants.push_str(&format!("V{i} := {i},\n"));
        }
        let source = format!("package main\nBig ~ enum[int32] {{\n{variants}}}\nmain : proc() = {{}}");
        let result = parse(&source);
        assert!(result.is_err());
    }
}
