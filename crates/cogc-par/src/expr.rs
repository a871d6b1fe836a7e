//! Expression grammar.
//!
//! Precedence, lowest to highest:
//! `&&`/`||` -> `==`/`!=` -> `<,<=,>,>=` -> `+,-` -> `*,/` -> unary `!,-` -> primary.
//! This ladder is fixed by the language, not user-extensible, so a plain
//! recursive-descent chain (one function per level) reads more directly
//! than a binding-power table would.

use crate::equalise::equalise_infix;
use cogc_ast::{
    Basic, Expr, ExprKind, InfixOp, MapEntry, PrefixOp, StructFieldInit, Ty,
};
use cogc_lex::TokenKind;
use cogc_sem::SymbolKind;
use cogc_util::Position;

use crate::Parser;

impl Parser {
    pub(crate) fn parse_expr(&mut self, expected: &Ty) -> Option<Expr> {
        self.parse_logical_or(expected)
    }

    fn parse_logical_or(&mut self, expected: &Ty) -> Option<Expr> {
        let mut left = self.parse_logical_and(expected)?;
        while self.cursor.at(TokenKind::Or) {
            let position = self.cursor.advance().position;
            let right = self.parse_logical_and(expected)?;
            self.require_bool(&left, position);
            self.require_bool(&right, position);
            left = Expr::new(
                ExprKind::Infix { op: InfixOp::Or, left: Box::new(left), right: Box::new(right) },
                position,
                Ty::Basic(Basic::Bool),
            );
        }
        Some(left)
    }

    fn parse_logical_and(&mut self, expected: &Ty) -> Option<Expr> {
        let mut left = self.parse_equality(expected)?;
        while self.cursor.at(TokenKind::And) {
            let position = self.cursor.advance().position;
            let right = self.parse_equality(expected)?;
            self.require_bool(&left, position);
            self.require_bool(&right, position);
            left = Expr::new(
                ExprKind::Infix { op: InfixOp::And, left: Box::new(left), right: Box::new(right) },
                position,
                Ty::Basic(Basic::Bool),
            );
        }
        Some(left)
    }

    fn parse_equality(&mut self, expected: &Ty) -> Option<Expr> {
        let mut left = self.parse_comparison(expected)?;
        loop {
            let op = match self.cursor.kind() {
                TokenKind::Equal => InfixOp::Eq,
                TokenKind::NotEqual => InfixOp::NotEq,
                _ => break,
            };
            let position = self.cursor.advance().position;
            let expected_rhs = left.ty.clone();
            let mut right = self.parse_comparison(&expected_rhs)?;
            let mut left_owned = left;
            equalise_infix(&mut left_owned, &mut right);
            if left_owned.ty.as_basic() != right.ty.as_basic() {
                self.error(position, "equality requires operands of the same underlying kind");
            }
            left = Expr::new(
                ExprKind::Infix { op, left: Box::new(left_owned), right: Box::new(right) },
                position,
                Ty::Basic(Basic::Bool),
            );
        }
        Some(left)
    }

    fn parse_comparison(&mut self, expected: &Ty) -> Option<Expr> {
        let mut left = self.parse_term(expected)?;
        loop {
            let op = match self.cursor.kind() {
                TokenKind::Lt => InfixOp::Lt,
                TokenKind::LtEqual => InfixOp::LtEq,
                TokenKind::Gt => InfixOp::Gt,
                TokenKind::GtEqual => InfixOp::GtEq,
                _ => break,
            };
            let position = self.cursor.advance().position;
            let expected_rhs = left.ty.clone();
            let mut right = self.parse_term(&expected_rhs)?;
            let mut left_owned = left;
            equalise_infix(&mut left_owned, &mut right);
            self.require_numeric(&left_owned, position);
            self.require_numeric(&right, position);
            left = Expr::new(
                ExprKind::Infix { op, left: Box::new(left_owned), right: Box::new(right) },
                position,
                Ty::Basic(Basic::Bool),
            );
        }
        Some(left)
    }

    fn parse_term(&mut self, expected: &Ty) -> Option<Expr> {
        let mut left = self.parse_factor(expected)?;
        loop {
            let op = match self.cursor.kind() {
                TokenKind::Plus => InfixOp::Add,
                TokenKind::Minus => InfixOp::Sub,
                _ => break,
            };
            let position = self.cursor.advance().position;
            let expected_rhs = left.ty.clone();
            let mut right = self.parse_factor(&expected_rhs)?;
            let mut left_owned = left;
            equalise_infix(&mut left_owned, &mut right);
            let lb = left_owned.ty.as_basic();
            match op {
                InfixOp::Add => {
                    let ok = lb.map(|b| b.is_numeric() || b.is_string()).unwrap_or(false);
                    if !ok {
                        self.error(position, "`+` requires numeric or string operands");
                    }
                }
                _ => self.require_numeric(&left_owned, position),
            }
            let result_ty = left_owned.ty.clone();
            left = Expr::new(
                ExprKind::Infix { op, left: Box::new(left_owned), right: Box::new(right) },
                position,
                result_ty,
            );
        }
        Some(left)
    }

    fn parse_factor(&mut self, expected: &Ty) -> Option<Expr> {
        let mut left = self.parse_unary(expected)?;
        loop {
            let op = match self.cursor.kind() {
                TokenKind::Asterisk => InfixOp::Mul,
                TokenKind::Slash => InfixOp::Div,
                _ => break,
            };
            let position = self.cursor.advance().position;
            let expected_rhs = left.ty.clone();
            let mut right = self.parse_unary(&expected_rhs)?;
            let mut left_owned = left;
            equalise_infix(&mut left_owned, &mut right);
            self.require_numeric(&left_owned, position);
            self.require_numeric(&right, position);
            let result_ty = left_owned.ty.clone();
            left = Expr::new(
                ExprKind::Infix { op, left: Box::new(left_owned), right: Box::new(right) },
                position,
                result_ty,
            );
        }
        Some(left)
    }

    fn parse_unary(&mut self, expected: &Ty) -> Option<Expr> {
        let position = self.cursor.position();
        match self.cursor.kind() {
            TokenKind::Not => {
                self.cursor.advance();
                let operand = self.parse_unary(&Ty::Basic(Basic::Bool))?;
                self.require_bool(&operand, position);
                Some(Expr::new(
                    ExprKind::Prefix { op: PrefixOp::Not, operand: Box::new(operand) },
                    position,
                    Ty::Basic(Basic::Bool),
                ))
            }
            TokenKind::Minus => {
                self.cursor.advance();
                let operand = self.parse_unary(expected)?;
                self.require_numeric(&operand, position);
                let ty = operand.ty.clone();
                Some(Expr::new(
                    ExprKind::Prefix { op: PrefixOp::Neg, operand: Box::new(operand) },
                    position,
                    ty,
                ))
            }
            _ => self.parse_postfix(expected),
        }
    }

    fn parse_postfix(&mut self, expected: &Ty) -> Option<Expr> {
        let mut expr = self.parse_primary(expected)?;
        loop {
            match self.cursor.kind() {
                TokenKind::Dot => {
                    let position = self.cursor.advance().position;
                    let field_tok = self.expect(TokenKind::Identifier, "expected a field name after `.`")?;
                    let field = self.interner.intern(&field_tok.literal);
                    let field_ty = self.resolve_field_ty(&expr, field);
                    expr = Expr::new(
                        ExprKind::Selector { base: Box::new(expr), field },
                        position,
                        field_ty,
                    );
                }
                TokenKind::LBracket => {
                    let position = self.cursor.advance().position;
                    let index_ty = self.index_expected_ty(&expr);
                    let index = self.parse_expr(&index_ty)?;
                    self.expect(TokenKind::RBracket, "expected `]` after index expression")?;
                    let elem_ty = self.element_ty(&expr);
                    expr = Expr::new(
                        ExprKind::Index { base: Box::new(expr), index: Box::new(index) },
                        position,
                        elem_ty,
                    );
                }
                TokenKind::LParen => {
                    let position = self.cursor.advance().position;
                    let (param_types, return_ty) = self.callee_signature(&expr);
                    let mut args = Vec::new();
                    let mut i = 0;
                    while !self.cursor.at(TokenKind::RParen) && !self.cursor.is_eof() {
                        let arg_expected = param_types.get(i).cloned().unwrap_or(Ty::NONE);
                        args.push(self.parse_expr(&arg_expected)?);
                        i += 1;
                        if !self.cursor.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                    self.expect(TokenKind::RParen, "expected `)` after call arguments")?;
                    expr = Expr::new(
                        ExprKind::Call { callee: Box::new(expr), args },
                        position,
                        return_ty,
                    );
                }
                TokenKind::Question => {
                    let position = self.cursor.advance().position;
                    if !expr.ty.is_option() {
                        self.error(position, "`?` may only follow an expression of option type");
                    }
                    let inner_ty = match expr.ty.underlying() {
                        Ty::Option(inner) => (**inner).clone(),
                        _ => Ty::NONE,
                    };
                    expr = Expr::new(ExprKind::OptionUnwrap { operand: Box::new(expr) }, position, inner_ty);
                }
                _ => break,
            }
        }
        Some(expr)
    }

    fn parse_primary(&mut self, expected: &Ty) -> Option<Expr> {
        let position = self.cursor.position();
        match self.cursor.kind() {
            TokenKind::True => { self.cursor.advance(); Some(Expr::new(ExprKind::BoolLit(true), position, Ty::Basic(Basic::Bool))) }
            TokenKind::False => { self.cursor.advance(); Some(Expr::new(ExprKind::BoolLit(false), position, Ty::Basic(Basic::Bool))) }

            TokenKind::IntLiteral => {
                let text = self.cursor.advance().literal;
                let width = expected.as_basic().filter(|b| b.is_integer()).unwrap_or(Basic::Int64);
                let value: i128 = text.parse().unwrap_or(0);
                Some(Expr::new(ExprKind::IntLit { value, width }, position, Ty::Basic(width)))
            }
            TokenKind::FloatLiteral => {
                let text = self.cursor.advance().literal;
                let width = expected.as_basic().filter(|b| b.is_float()).unwrap_or(Basic::Float64);
                let value: f64 = text.parse().unwrap_or(0.0);
                Some(Expr::new(ExprKind::FloatLit { value, width }, position, Ty::Basic(width)))
            }
            TokenKind::StringLiteral => {
                let text = self.cursor.advance().literal;
                let kind = if matches!(expected.as_basic(), Some(Basic::Ascii)) { Basic::Ascii } else { Basic::Utf8 };
                Some(Expr::new(ExprKind::StringLit { value: text, kind }, position, Ty::Basic(kind)))
            }

            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr(expected)?;
                self.expect(TokenKind::RParen, "expected `)` to close grouped expression")?;
                let ty = inner.ty.clone();
                Some(Expr::new(ExprKind::Grouped(Box::new(inner)), position, ty))
            }

            TokenKind::LBrace => self.parse_composite_literal(expected),

            TokenKind::Builtin => self.parse_builtin(),

            TokenKind::Identifier => {
                let text = self.cursor.advance().literal;
                if text == "_" {
                    return Some(Expr::new(ExprKind::Identifier(self.interner.intern("_")), position, Ty::NONE));
                }
                let name = self.interner.intern(&text);
                match self.symbols.resolve(name) {
                    Some(entry) => {
                        let is_dynamic = entry.ident.qualifier == cogc_ast::Qualifier::Dynamic;
                        let ty = entry.ident.ty.clone();
                        if is_dynamic && self.in_function_body() {
                            self.error(position, format!("`{text}` is a dynamic variable and cannot be read from inside a `func`, which has no `ctx`"));
                        }
                        Some(Expr::new(ExprKind::Identifier(name), position, ty))
                    }
                    None => {
                        self.error(position, format!("undefined identifier `{text}`"));
                        Some(Expr::new(ExprKind::Identifier(name), position, Ty::NONE))
                    }
                }
            }

            other => {
                self.error(position, format!("expected an expression, found {other}"));
                None
            }
        }
    }

    /// `@name(...)`; the closed builtin set is `{if, print, go}` — `go`
    /// is spelled `@go.pkg.fn(...)` and handled separately below.
    fn parse_builtin(&mut self) -> Option<Expr> {
        let tok = self.cursor.advance();
        let position = tok.position;
        if tok.literal == "go" {
            return self.parse_go_call(position);
        }
        let name = self.interner.intern(&tok.literal);
        self.expect(TokenKind::LParen, "expected `(` after builtin name")?;
        let mut args = Vec::new();
        while !self.cursor.at(TokenKind::RParen) && !self.cursor.is_eof() {
            args.push(self.parse_expr(&Ty::NONE)?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "expected `)` after builtin arguments")?;

        let ty = match tok.literal.as_str() {
            "if" => {
                if args.len() < 2 {
                    self.error(position, "@if requires at least a condition and a consequence");
                    Ty::NONE
                } else {
                    let consequence_ty = args[1].ty.clone();
                    if let Some(alt) = args.get(2) {
                        if alt.ty.as_basic() != consequence_ty.as_basic() {
                            self.error(position, "@if branch types do not match");
                        }
                    }
                    consequence_ty
                }
            }
            "print" => Ty::NONE,
            _ => {
                self.error(position, format!("unknown builtin `@{}`", tok.literal));
                Ty::NONE
            }
        };
        Some(Expr::new(ExprKind::Builtin { name, args }, position, ty))
    }

    /// `@go.pkg.fn(...)` — the builtin token's own literal is `go`; the
    /// package and function names follow as two more dotted segments.
    fn parse_go_call(&mut self, position: Position) -> Option<Expr> {
        self.expect(TokenKind::Dot, "expected `.` after `@go`")?;
        let pkg_tok = self.expect(TokenKind::Identifier, "expected a package name after `@go.`")?;
        let pkg = self.interner.intern(&pkg_tok.literal);
        self.expect(TokenKind::Dot, "expected `.` between package and function name")?;
        let func_tok = self.expect(TokenKind::Identifier, "expected a function name")?;
        let func = self.interner.intern(&func_tok.literal);
        self.expect(TokenKind::LParen, "expected `(` after go-call function name")?;
        let mut args = Vec::new();
        while !self.cursor.at(TokenKind::RParen) && !self.cursor.is_eof() {
            args.push(self.parse_expr(&Ty::NONE)?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "expected `)` after go-call arguments")?;
        // Type inference across the TL boundary is unimplemented upstream;
        // every go-call's result type is the `none` sentinel.
        Some(Expr::new(ExprKind::GoCall { pkg, func, args }, position, Ty::NONE))
    }

    /// Dispatches `{ ... }` by the caller's expected type: struct, tuple,
    /// slice/array/set, map, or a procedure body. `expected` is the one
    /// parameter that fully determines the shape here (see module docs).
    fn parse_composite_literal(&mut self, expected: &Ty) -> Option<Expr> {
        let position = self.cursor.position();

        if let Ty::Alias(name, inner) = expected {
            let mut e = self.parse_composite_literal(inner)?;
            e.ty = Ty::Alias(*name, inner.clone());
            return Some(e);
        }
        if let Ty::Option(inner) = expected.underlying() {
            let mut e = self.parse_composite_literal(inner)?;
            e.ty = expected.clone();
            return Some(e);
        }
        if let Ty::Union(either, or) = expected.underlying() {
            let value = self.parse_composite_literal_union_arm(either, or)?;
            return Some(value);
        }

        match expected.underlying() {
            Ty::Struct(fields) => {
                self.cursor.advance();
                let fields = fields.clone();
                let mut inits = Vec::new();
                while !self.cursor.at(TokenKind::RBrace) && !self.cursor.is_eof() {
                    let name_tok = self.expect(TokenKind::Identifier, "expected a field name")?;
                    let name = self.interner.intern(&name_tok.literal);
                    self.expect(TokenKind::Assign, "expected `=` after field name")?;
                    let declared = fields.iter().find(|f| f.name == name).map(|f| f.ty.clone());
                    if declared.is_none() {
                        self.error(name_tok.position, "struct literal references a field the type does not declare");
                    }
                    let field_ty = declared.unwrap_or(Ty::NONE);
                    let value = self.parse_expr(&field_ty)?;
                    inits.push(StructFieldInit { name, value });
                    if !self.cursor.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RBrace, "expected `}` to close struct literal")?;
                Some(Expr::new(ExprKind::StructLit(inits), position, expected.clone()))
            }

            Ty::Tuple(types) => {
                self.cursor.advance();
                let types = types.clone();
                let mut items = Vec::new();
                let mut i = 0;
                while !self.cursor.at(TokenKind::RBrace) && !self.cursor.is_eof() {
                    let item_ty = types.get(i).cloned().unwrap_or(Ty::NONE);
                    items.push(self.parse_expr(&item_ty)?);
                    i += 1;
                    if !self.cursor.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RBrace, "expected `}` to close tuple literal")?;
                if items.len() != types.len() {
                    self.error_here("tuple literal arity does not match its type");
                }
                Some(Expr::new(ExprKind::TupleLit(items), position, expected.clone()))
            }

            Ty::Array(elem, _) | Ty::Slice(elem) => {
                self.cursor.advance();
                let elem = (**elem).clone();
                let mut items = Vec::new();
                while !self.cursor.at(TokenKind::RBrace) && !self.cursor.is_eof() {
                    items.push(self.parse_expr(&elem)?);
                    if !self.cursor.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RBrace, "expected `}` to close literal")?;
                let kind = if matches!(expected.underlying(), Ty::Array(..)) {
                    ExprKind::ArrayLit(items)
                } else {
                    ExprKind::SliceLit(items)
                };
                Some(Expr::new(kind, position, expected.clone()))
            }

            Ty::Set(elem) => {
                self.cursor.advance();
                let elem = (**elem).clone();
                let mut items = Vec::new();
                while !self.cursor.at(TokenKind::RBrace) && !self.cursor.is_eof() {
                    let item = self.parse_expr(&elem)?;
                    if items.iter().any(|i: &Expr| cogc_ast::print::print_expr(i, &self.interner) == cogc_ast::print::print_expr(&item, &self.interner)) {
                        self.error_here("duplicate set element in literal");
                    }
                    items.push(item);
                    if !self.cursor.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RBrace, "expected `}` to close set literal")?;
                Some(Expr::new(ExprKind::SetLit(items), position, expected.clone()))
            }

            Ty::Map(key, value) => {
                self.cursor.advance();
                let key_ty = (**key).clone();
                let value_ty = (**value).clone();
                let mut entries = Vec::new();
                while !self.cursor.at(TokenKind::RBrace) && !self.cursor.is_eof() {
                    let key_expr = self.parse_expr(&key_ty)?;
                    self.expect(TokenKind::Colon, "expected `:` between map key and value")?;
                    let value_expr = self.parse_expr(&value_ty)?;
                    if entries.iter().any(|e: &MapEntry| {
                        cogc_ast::print::print_expr(&e.key, &self.interner) == cogc_ast::print::print_expr(&key_expr, &self.interner)
                    }) {
                        self.error_here("duplicate map key in literal");
                    }
                    entries.push(MapEntry { key: key_expr, value: value_expr });
                    if !self.cursor.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RBrace, "expected `}` to close map literal")?;
                Some(Expr::new(ExprKind::MapLit(entries), position, expected.clone()))
            }

            Ty::Procedure(sig) => {
                let sig_ty = Ty::Procedure(sig.clone());
                let guard = self.symbols.enter_scope();
                for p in &sig.params {
                    let ident = cogc_ast::Ident::new(p.name, position, p.ty.clone(), cogc_ast::Qualifier::Immutable);
                    let _ = self.symbols.define(p.name, ident, SymbolKind::Variable);
                }
                self.enter_callable(sig.is_function);
                let body = self.parse_block();
                self.exit_callable();
                guard.exit(&mut self.symbols);
                let body = body?;
                Some(Expr::new(
                    ExprKind::ProcedureLit { sig: Box::new(sig_ty.clone()), body: Box::new(body) },
                    position,
                    sig_ty,
                ))
            }

            _ => {
                self.error_here("`{ ... }` requires an expected type to determine its shape");
                None
            }
        }
    }

    fn parse_composite_literal_union_arm(&mut self, either: &Ty, or: &Ty) -> Option<Expr> {
        let position = self.cursor.position();
        let value = self.parse_expr(&Ty::NONE)?;
        let is_or = match value.ty.as_basic() {
            Some(b) if Some(b) == either.as_basic() => false,
            Some(b) if Some(b) == or.as_basic() => true,
            _ => {
                self.error(position, "union literal does not match either arm's type");
                false
            }
        };
        let union_ty = Ty::Union(Box::new(either.clone()), Box::new(or.clone()));
        Some(Expr::new(ExprKind::UnionLit { is_or, value: Box::new(value) }, position, union_ty))
    }

    pub(crate) fn require_bool(&mut self, e: &Expr, position: Position) {
        if !matches!(e.ty.as_basic(), Some(Basic::Bool)) {
            self.error(position, "operator requires a `bool` operand");
        }
    }

    pub(crate) fn require_numeric(&mut self, e: &Expr, position: Position) {
        if !e.ty.as_basic().map(|b| b.is_numeric()).unwrap_or(false) {
            self.error(position, "operator requires a numeric operand");
        }
    }

    fn resolve_field_ty(&mut self, base: &Expr, field: cogc_util::Symbol) -> Ty {
        let owner = match &*base.kind {
            ExprKind::Identifier(name) => Some(*name),
            _ => None,
        };
        if let Some(owner) = owner {
            if let Some(entry) = self.symbols.resolve_field(owner, field) {
                return entry.ident.ty.clone();
            }
        }
        if let Ty::Struct(fields) = base.ty.underlying() {
            if let Some(f) = fields.iter().find(|f| f.name == field) {
                return f.ty.clone();
            }
        }
        Ty::NONE
    }

    fn index_expected_ty(&self, base: &Expr) -> Ty {
        match base.ty.underlying() {
            Ty::Map(key, _) => (**key).clone(),
            _ => Ty::Basic(Basic::Int64),
        }
    }

    fn element_ty(&self, base: &Expr) -> Ty {
        match base.ty.underlying() {
            Ty::Array(elem, _) | Ty::Slice(elem) => (**elem).clone(),
            Ty::Map(_, value) => (**value).clone(),
            _ => Ty::NONE,
        }
    }

    fn callee_signature(&self, callee: &Expr) -> (Vec<Ty>, Ty) {
        match callee.ty.underlying() {
            Ty::Procedure(sig) => {
                let params = sig.params.iter().map(|p| p.ty.clone()).collect();
                let ret = sig.return_ty.as_ref().map(|t| (**t).clone()).unwrap_or(Ty::NONE);
                (params, ret)
            }
            _ => (Vec::new(), Ty::NONE),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    #[test]
    fn if_branch_type_mismatch_is_rejected() {
        let result = parse(
            "package main\nmain : proc() = { @print(@if(true, \"str\", 10)) }",
        );
        assert!(result.is_err());
    }

    #[test]
    fn if_with_matching_branch_types_is_accepted() {
        let result = parse(
            "package main\nmain : proc() = { @print(@if(true, \"a\", \"b\")) }",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn duplicate_set_element_is_rejected() {
        let result = parse(
            "package main\nmain : proc() = { s : set[int32] = { 1, 1 } }",
        );
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_map_key_is_rejected() {
        let result = parse(
            "package main\nmain : proc() = { m : map[utf8]int32 = { \"a\" : 1, \"a\" : 2 } }",
        );
        assert!(result.is_err());
    }
}
