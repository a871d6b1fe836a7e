//! Statement grammar: the file entry point, top-level forms, and the
//! productions that live inside a block body.

use crate::Parser;
use cogc_ast::{Basic, Expr, ExprKind, Ident, Qualifier, Stmt, StmtKind, SwitchCase, Ty};
use cogc_lex::TokenKind;
use cogc_sem::SymbolKind;
use cogc_util::Symbol;

impl Parser {
    /// Entry point: a file is a leading `package` statement followed by
    /// top-level forms in source order. A missing `package` header is
    /// reported but parsing continues so later errors are still found.
    pub(crate) fn parse_file(&mut self) -> cogc_ast::File {
        let mut statements = Vec::new();

        if self.cursor.at(TokenKind::Package) {
            if let Some(stmt) = self.parse_package() {
                statements.push(stmt);
            }
        } else {
            let position = self.cursor.position();
            self.error(position, "a source file must begin with a `package` statement");
        }

        while !self.cursor.is_eof() {
            if self.cancel.is_cancelled() {
                break;
            }
            let before = self.cursor.index();
            if let Some(stmt) = self.parse_top_level_stmt() {
                statements.push(stmt);
            }
            if self.cursor.index() == before {
                self.cursor.advance();
            }
        }

        cogc_ast::File {
            package: self.package.unwrap_or_else(|| self.interner.intern("main")),
            statements,
        }
    }

    fn parse_package(&mut self) -> Option<Stmt> {
        let position = self.cursor.advance().position; // `package`
        let name_tok = self.expect(TokenKind::Identifier, "expected a package name after `package`")?;
        let name = self.interner.intern(&name_tok.literal);
        self.package = Some(name);
        Some(Stmt::new(StmtKind::Package(name), position))
    }

    fn parse_go_import_stmt(&mut self) -> Option<Stmt> {
        let position = self.cursor.advance().position; // `goimport`
        self.expect(TokenKind::LParen, "expected `(` after `goimport`")?;
        let mut paths = Vec::new();
        while self.cursor.at(TokenKind::StringLiteral) {
            let tok = self.cursor.advance();
            let last_segment = tok.literal.rsplit('/').next().unwrap_or(&tok.literal).to_owned();
            let name = self.interner.intern(&last_segment);
            if self.symbols.resolve_go_import(name).is_some() {
                self.error(tok.position, format!("duplicate go import `{}`", tok.literal));
            } else {
                let ident = Ident::new(name, tok.position, Ty::NONE, Qualifier::Immutable);
                self.symbols.define_go_import(name, ident);
            }
            paths.push(tok.literal);
        }
        self.expect(TokenKind::RParen, "expected `)` to close `goimport`")?;
        Some(Stmt::new(StmtKind::GoImport(paths), position))
    }

    /// `export`/`var`/`dyn` qualifiers are recognised only here — a block
    /// body never matches these tokens as qualifiers, which is what
    /// keeps them confined to package scope without a separate check.
    pub(crate) fn parse_top_level_stmt(&mut self) -> Option<Stmt> {
        if self.cancel.is_cancelled() {
            return None;
        }
        if self.cursor.at(TokenKind::Package) {
            self.error_here("`package` may only appear once, as the first statement");
            self.cursor.advance();
            return None;
        }
        if self.cursor.at(TokenKind::GoImport) {
            return self.parse_go_import_stmt();
        }

        let mut exported = false;
        let mut var = false;
        let mut dyn_ = false;
        loop {
            match self.cursor.kind() {
                TokenKind::Export => { exported = true; self.cursor.advance(); }
                TokenKind::Var => { var = true; self.cursor.advance(); }
                TokenKind::Dyn => { dyn_ = true; self.cursor.advance(); }
                _ => break,
            }
        }
        if dyn_ && var {
            self.error_here("a declaration may not be both `var` and `dyn`");
        }

        if self.cursor.at(TokenKind::Identifier) && self.cursor.peek_at(1).kind == TokenKind::Tilde {
            if exported || var || dyn_ {
                self.error_here("a type declaration may not carry `export`, `var`, or `dyn`");
            }
            return self.parse_type_decl_stmt();
        }

        if self.cursor.at(TokenKind::Identifier)
            && matches!(self.cursor.peek_at(1).kind, TokenKind::Colon | TokenKind::Declaration)
        {
            let qualifier = if dyn_ {
                Qualifier::Dynamic
            } else if var {
                Qualifier::Variable
            } else {
                Qualifier::Immutable
            };
            return self.parse_declaration_stmt(exported, qualifier, true);
        }

        let position = self.cursor.position();
        self.error(position, format!("expected a top-level declaration, found {}", self.cursor.kind()));
        self.cursor.advance();
        None
    }

    fn parse_type_decl_stmt(&mut self) -> Option<Stmt> {
        let name_tok = self.cursor.advance(); // identifier
        let position = name_tok.position;
        let name = self.interner.intern(&name_tok.literal);
        self.expect(TokenKind::Tilde, "expected `~` after a type name")?;
        let ty = self.parse_type()?;

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

        let ident = Ident { name, position, ty: ty.clone(), exported: false, qualifier: Qualifier::Type };
        self.symbols.define_global(name, ident, SymbolKind::Type);
        Some(Stmt::new(StmtKind::TypeDecl { name, ty }, position))
    }

    /// `x := e`, `x : T = e`, or `x : T` with no initialiser. A
    /// top-level binding whose type resolves to a procedure/function
    /// signature is re-packaged as [`StmtKind::ProcDecl`] rather than a
    /// plain declaration, since the transpiler lowers the two very
    /// differently.
    fn parse_declaration_stmt(&mut self, exported: bool, qualifier: Qualifier, top_level: bool) -> Option<Stmt> {
        let name_tok = self.expect(TokenKind::Identifier, "expected an identifier")?;
        let position = name_tok.position;
        if name_tok.literal == "ctx" {
            self.error(position, "`ctx` is reserved and may not be used as a declaration name");
        }
        let name = self.interner.intern(&name_tok.literal);

        let (declared_ty, value) = if self.cursor.eat(TokenKind::Declaration) {
            let value = self.parse_expr(&Ty::NONE)?;
            (None, Some(value))
        } else {
            self.expect(TokenKind::Colon, "expected `:` or `:=` after an identifier")?;
            let ty = self.parse_type()?;
            if self.cursor.eat(TokenKind::Assign) {
                let value = self.parse_expr(&ty)?;
                (Some(ty), Some(value))
            } else {
                (Some(ty), None)
            }
        };

        if qualifier == Qualifier::Dynamic && value.is_none() {
            self.error(position, "a `dyn` declaration requires an initialiser");
        }

        let inferred_ty = match (&declared_ty, &value) {
            (Some(t), Some(v)) => {
                if t.as_basic() != v.ty.as_basic() {
                    self.error(position, "declared type does not match the initialiser's type");
                }
                t.clone()
            }
            (Some(t), None) => t.clone(),
            (None, Some(v)) => v.ty.clone(),
            (None, None) => Ty::NONE,
        };

        if matches!(inferred_ty.underlying(), Ty::Procedure(_)) && !top_level {
            self.error(position, "procedure declarations are only permitted at package scope");
        }

        let proc_form = if top_level {
            match (inferred_ty.underlying(), &value) {
                (Ty::Procedure(sig), Some(v)) => match &*v.kind {
                    ExprKind::ProcedureLit { body, .. } => Some((sig.clone(), body.clone())),
                    _ => None,
                },
                _ => None,
            }
        } else {
            None
        };

        let ident = Ident { name, position, ty: inferred_ty, exported, qualifier };
        self.declare(name, ident.clone());

        if let Some((sig, body)) = proc_form {
            return Some(Stmt::new(StmtKind::ProcDecl { ident, sig, body }, position));
        }
        Some(Stmt::new(StmtKind::Declaration { ident, value }, position))
    }

    fn declare(&mut self, name: Symbol, ident: Ident) {
        let position = ident.position;
        if self.symbols.define(name, ident, SymbolKind::Variable).is_err() {
            self.error(position, "a symbol with this name is already declared in this scope");
        }
    }

    /// Opens a nested scope, parses statements until `}`, and restores
    /// the outer scope before returning — on every path, including the
    /// ones that bail out early on a missing brace.
    pub(crate) fn parse_block(&mut self) -> Option<Stmt> {
        let position = self.cursor.position();
        self.expect(TokenKind::LBrace, "expected `{` to open a block")?;
        let guard = self.symbols.enter_scope();
        let mut statements = Vec::new();
        while !self.cursor.at(TokenKind::RBrace) && !self.cursor.is_eof() {
            if self.cancel.is_cancelled() {
                break;
            }
            let before = self.cursor.index();
            if let Some(stmt) = self.parse_stmt() {
                statements.push(stmt);
            }
            if self.cursor.index() == before {
                self.cursor.advance();
            }
        }
        guard.exit(&mut self.symbols);
        self.expect(TokenKind::RBrace, "expected `}` to close a block")?;
        Some(Stmt::new(StmtKind::Block(statements), position))
    }

    fn parse_stmt(&mut self) -> Option<Stmt> {
        if self.cancel.is_cancelled() {
            return None;
        }
        if self.cursor.at(TokenKind::Identifier)
            && self.cursor.peek_at(1).kind == TokenKind::Colon
            && matches!(self.cursor.peek_at(2).kind, TokenKind::If | TokenKind::Switch)
        {
            return self.parse_label();
        }
        match self.cursor.kind() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::If => self.parse_if(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => self.parse_break(),
            TokenKind::Dyn => {
                self.error_here("`dyn` may only be declared at package scope");
                self.cursor.advance();
                None
            }
            TokenKind::Export => {
                self.error_here("`export` may only be used at package scope");
                self.cursor.advance();
                None
            }
            _ => self.parse_simple_stmt(),
        }
    }

    fn parse_label(&mut self) -> Option<Stmt> {
        let name_tok = self.cursor.advance(); // identifier
        let position = name_tok.position;
        let name = self.interner.intern(&name_tok.literal);
        self.cursor.advance(); // `:`
        let inner = match self.cursor.kind() {
            TokenKind::If => self.parse_if()?,
            TokenKind::Switch => self.parse_switch()?,
            _ => {
                self.error_here("expected `if` or `switch` after a label");
                return None;
            }
        };
        Some(Stmt::new(StmtKind::Label { name, stmt: Box::new(inner) }, position))
    }

    fn parse_if(&mut self) -> Option<Stmt> {
        let position = self.cursor.advance().position; // `if`
        let condition = self.parse_expr(&Ty::Basic(Basic::Bool))?;
        self.require_bool(&condition, position);
        let then_branch = self.parse_block()?;
        let else_branch = if self.cursor.eat(TokenKind::Else) {
            if self.cursor.at(TokenKind::If) {
                Some(Box::new(self.parse_if()?))
            } else {
                Some(Box::new(self.parse_block()?))
            }
        } else {
            None
        };
        Some(Stmt::new(
            StmtKind::If { condition, then_branch: Box::new(then_branch), else_branch },
            position,
        ))
    }

    /// Tag form (`switch x { ... }`) when a non-`{` token follows
    /// `switch`; boolean form (`switch { ... }`) otherwise.
    fn parse_switch(&mut self) -> Option<Stmt> {
        let position = self.cursor.advance().position; // `switch`
        let tag = if self.cursor.at(TokenKind::LBrace) {
            None
        } else {
            Some(self.parse_expr(&Ty::NONE)?)
        };
        self.expect(TokenKind::LBrace, "expected `{` to open a switch body")?;

        let mut cases = Vec::new();
        let mut default = None;
        while !self.cursor.at(TokenKind::RBrace) && !self.cursor.is_eof() {
            if self.cancel.is_cancelled() {
                break;
            }
            let before = self.cursor.index();
            if self.cursor.eat(TokenKind::Case) {
                let expected = tag.as_ref().map(|t| t.ty.clone()).unwrap_or(Ty::Basic(Basic::Bool));
                let mut values = Vec::new();
                loop {
                    match self.parse_expr(&expected) {
                        Some(value) => {
                            match &tag {
                                Some(t) => {
                                    if value.ty.as_basic() != t.ty.as_basic() {
                                        self.error(value.position, "case value does not match the switch tag's type");
                                    }
                                }
                                None => self.require_bool(&value, value.position),
                            }
                            values.push(value);
                        }
                        None => break,
                    }
                    if !self.cursor.eat(TokenKind::Comma) {
                        break;
                    }
                }
                if self.expect(TokenKind::Colon, "expected `:` after case values").is_some() {
                    let body = self.parse_case_body();
                    cases.push(SwitchCase { values, body: Box::new(body) });
                }
            } else if self.cursor.eat(TokenKind::Default) {
                if default.is_some() {
                    self.error_here("a switch may have at most one `default` case");
                }
                if self.expect(TokenKind::Colon, "expected `:` after `default`").is_some() {
                    default = Some(Box::new(self.parse_case_body()));
                }
            } else {
                self.error_here("expected `case` or `default` inside a switch body");
            }
            if self.cursor.index() == before {
                self.cursor.advance();
            }
        }
        self.expect(TokenKind::RBrace, "expected `}` to close a switch body")?;
        Some(Stmt::new(StmtKind::Switch { tag, cases, default }, position))
    }

    /// A case body runs to the next `case`/`default`/`}` — there is no
    /// `break`-to-terminate; falling off the end of one case never
    /// continues into the next.
    fn parse_case_body(&mut self) -> Stmt {
        let position = self.cursor.position();
        let mut statements = Vec::new();
        while !matches!(self.cursor.kind(), TokenKind::Case | TokenKind::Default | TokenKind::RBrace)
            && !self.cursor.is_eof()
        {
            if self.cancel.is_cancelled() {
                break;
            }
            let before = self.cursor.index();
            if let Some(stmt) = self.parse_stmt() {
                statements.push(stmt);
            }
            if self.cursor.index() == before {
                self.cursor.advance();
            }
        }
        Stmt::new(StmtKind::Block(statements), position)
    }

    fn parse_return(&mut self) -> Option<Stmt> {
        let position = self.cursor.advance().position; // `return`
        let mut values = Vec::new();
        if !matches!(self.cursor.kind(), TokenKind::RBrace | TokenKind::Case | TokenKind::Default) {
            loop {
                values.push(self.parse_expr(&Ty::NONE)?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        Some(Stmt::new(StmtKind::Return(values), position))
    }

    fn parse_break(&mut self) -> Option<Stmt> {
        let position = self.cursor.advance().position; // `break`
        let label = if self.cursor.at(TokenKind::Identifier) {
            Some(self.interner.intern(&self.cursor.advance().literal))
        } else {
            None
        };
        Some(Stmt::new(StmtKind::Break { label }, position))
    }

    /// `var x := e`, `var x : T = e`, a plain assignment, or a bare
    /// expression statement. `var` is the one qualifier still
    /// recognised below package scope, for a locally reassignable
    /// binding; `export`/`dyn` never are (see [`Parser::parse_stmt`]).
    fn parse_simple_stmt(&mut self) -> Option<Stmt> {
        let var = self.cursor.eat(TokenKind::Var);
        if self.cursor.at(TokenKind::Identifier)
            && matches!(self.cursor.peek_at(1).kind, TokenKind::Colon | TokenKind::Declaration)
        {
            let qualifier = if var { Qualifier::Variable } else { Qualifier::Immutable };
            return self.parse_declaration_stmt(false, qualifier, false);
        }
        if var {
            self.error_here("`var` must be followed by a declaration");
            return None;
        }

        let position = self.cursor.position();
        let target = self.parse_expr(&Ty::NONE)?;
        if self.cursor.eat(TokenKind::Assign) {
            self.validate_assignment_target(&target);
            let expected = target.ty.clone();
            let value = self.parse_expr(&expected)?;
            if target.ty.as_basic() != value.ty.as_basic() {
                self.error(position, "assignment value does not match the target's type");
            }
            return Some(Stmt::new(StmtKind::Assignment { target, value }, position));
        }
        Some(Stmt::new(StmtKind::ExprStmt(target), position))
    }

    fn validate_assignment_target(&mut self, target: &Expr) {
        let position = target.position;
        match &*target.kind {
            ExprKind::Identifier(name) => {
                if self.interner.resolve(*name) == "_" {
                    return;
                }
                match self.symbols.resolve(*name) {
                    Some(entry) if entry.kind == SymbolKind::Constant => {
                        self.error(position, "cannot assign to a constant");
                    }
                    Some(entry) if entry.kind == SymbolKind::Type => {
                        self.error(position, "cannot assign to a type name");
                    }
                    Some(entry) if entry.ident.qualifier == Qualifier::Immutable => {
                        self.error(position, "cannot assign to an immutable binding; declare it with `var` or `dyn`");
                    }
                    None => {
                        self.error(position, "cannot assign to an undeclared identifier");
                    }
                    _ => {}
                }
            }
            ExprKind::Selector { .. } | ExprKind::Index { .. } => {}
            _ => {
                self.error(position, "invalid assignment target");
            }
        }
    }
}
