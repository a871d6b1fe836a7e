//! Lowers a parsed `cog` file into the TL tree defined in [`crate::tl`].
//!
//! The walk runs twice. The first pass only exists to settle which
//! pre-declared top-level names actually get referenced — see
//! [`symtab::TlSymbols`] — and its output is thrown away. The second
//! pass builds the real tree, by which point every promotion has
//! already happened and printing is just a readback.

use crate::symtab::TlSymbols;
use crate::tl::{self, ConstSpec, Decl, ImportSpec, Stmt as TlStmt};
use cogc_ast::ty::EnumVariant;
use cogc_ast::{
    Basic, Expr, ExprKind, File, Ident, InfixOp, PrefixOp, Qualifier, Stmt, StmtKind, Ty,
};
use cogc_util::{Interner, Position, Symbol};
use rustc_hash::FxHashMap;

/// What a top-level `TypeDecl` lowers to, kept around so later
/// `@print` calls on a value of that type know to index through the
/// lookup array rather than print the ordinal directly.
#[derive(Clone)]
struct EnumInfo {
    array_name: String,
}

/// A `dyn` binding's two generated TL identifiers.
#[derive(Clone)]
struct DynNames {
    key: String,
    default: String,
}

struct Predeclared {
    /// Top-level `var`/`proc` bindings, by their promotion-tracked name.
    real_names: FxHashMap<Symbol, String>,
    /// Type and enum names, which are never subject to the "_" trick.
    type_names: FxHashMap<Symbol, String>,
    qualifiers: FxHashMap<Symbol, Qualifier>,
    dyn_names: FxHashMap<Symbol, DynNames>,
    enums: FxHashMap<Symbol, EnumInfo>,
    /// `EnumName.Variant` resolves to the variant's constant expression
    /// directly — the parser types that selector as the enum's
    /// underlying kind (see `pass1::discover_type_decl`), not as the
    /// ordinal the type declaration itself lowers to, so the selector
    /// must inline the constant rather than reference the ordinal.
    enum_variants: FxHashMap<(Symbol, Symbol), Expr>,
    has_dynamic: bool,
}

pub struct Lowerer<'a> {
    interner: &'a Interner,
    tlsyms: &'a mut TlSymbols,
    pre: &'a Predeclared,
    imports: FxHashMap<String, Option<String>>,
    positions: FxHashMap<u64, Position>,
    errors: Vec<String>,
    priming: bool,
}

pub struct Lowered {
    pub file: tl::File,
    pub positions: FxHashMap<u64, Position>,
    pub errors: Vec<String>,
}

/// `convertExport`: capitalised when exported; `_`-prefixed when the
/// source spelling was already capitalised but isn't exported (so it
/// never collides with the exported form); unchanged otherwise.
pub fn convert_export(name: &str, exported: bool) -> String {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return String::new(),
    };
    let rest: String = chars.collect();
    if exported {
        format!("{}{}", first.to_ascii_uppercase(), rest)
    } else if first.is_ascii_uppercase() {
        format!("_{first}{rest}")
    } else {
        format!("{first}{rest}")
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => format!("{}{}", c.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

pub fn lower(file: &File, interner: &Interner) -> Lowered {
    let mut tlsyms = TlSymbols::new();
    let pre = predeclare(file, interner, &mut tlsyms);

    {
        let mut primer = Lowerer {
            interner,
            tlsyms: &mut tlsyms,
            pre: &pre,
            imports: FxHashMap::default(),
            positions: FxHashMap::default(),
            errors: Vec::new(),
            priming: true,
        };
        primer.lower_top_level(file);
    }

    let mut real = Lowerer {
        interner,
        tlsyms: &mut tlsyms,
        pre: &pre,
        imports: FxHashMap::default(),
        positions: FxHashMap::default(),
        errors: Vec::new(),
        priming: false,
    };
    real.imports.insert("cog".to_string(), None);
    let mut decls = Vec::new();
    if pre.has_dynamic {
        real.import("context");
        decls.push(Decl::Var {
            tok: "var",
            name: "_ctx".to_string(),
            ty: Some("context.Context".to_string()),
            value: Some("context.Background()".to_string()),
        });
    }
    decls.extend(real.lower_top_level(file));

    let mut import_specs: Vec<ImportSpec> = real
        .imports
        .iter()
        .map(|(path, alias)| ImportSpec { alias: alias.clone(), path: path.clone() })
        .collect();
    import_specs.sort_by(|a, b| a.path.cmp(&b.path));

    let mut all_decls = vec![Decl::Import(import_specs)];
    all_decls.extend(decls);

    Lowered {
        file: tl::File { package: interner.resolve(file.package).to_string(), decls: all_decls },
        positions: real.positions,
        errors: real.errors,
    }
}

fn predeclare(file: &File, interner: &Interner, tlsyms: &mut TlSymbols) -> Predeclared {
    let mut real_names = FxHashMap::default();
    let mut type_names = FxHashMap::default();
    let mut qualifiers = FxHashMap::default();
    let mut dyn_names = FxHashMap::default();
    let mut enums = FxHashMap::default();
    let mut enum_variants = FxHashMap::default();

    for stmt in &file.statements {
        match &*stmt.kind {
            StmtKind::Declaration { ident, .. } => {
                qualifiers.insert(ident.name, ident.qualifier);
                let text = interner.resolve(ident.name);
                if ident.qualifier == Qualifier::Dynamic {
                    let base = convert_export(text, ident.exported);
                    dyn_names.insert(
                        ident.name,
                        DynNames { key: format!("{base}Key"), default: format!("{base}Default") },
                    );
                } else {
                    tlsyms.declare(ident.name);
                    real_names.insert(ident.name, convert_export(text, ident.exported));
                }
            }
            StmtKind::ProcDecl { ident, .. } => {
                qualifiers.insert(ident.name, ident.qualifier);
                tlsyms.declare(ident.name);
                real_names.insert(ident.name, convert_export(interner.resolve(ident.name), ident.exported));
            }
            StmtKind::TypeDecl { name, ty } => {
                // Type names have no `export` qualifier of their own in
                // this grammar — capitalisation alone decides visibility,
                // same as the source spelling, so no convertExport pass
                // is needed here.
                let text = interner.resolve(*name).to_string();
                if let Ty::Enum(_, variants) = ty {
                    let ordinal_ty = format!("{text}Enum");
                    type_names.insert(*name, ordinal_ty);
                    enums.insert(*name, EnumInfo { array_name: text.clone() });
                    for variant in variants {
                        enum_variants.insert((*name, variant.name), variant.value.clone());
                    }
                } else {
                    type_names.insert(*name, text);
                }
            }
            _ => {}
        }
    }

    let has_dynamic = !dyn_names.is_empty();
    Predeclared { real_names, type_names, qualifiers, dyn_names, enums, enum_variants, has_dynamic }
}

impl<'a> Lowerer<'a> {
    fn mark(&mut self, hash: u64, position: Position) {
        if !self.priming {
            self.positions.insert(hash, position);
        }
    }

    fn import(&mut self, path: &str) {
        self.imports.entry(path.to_string()).or_insert(None);
    }

    fn error(&mut self, position: Position, message: impl Into<String>) {
        if !self.priming {
            self.errors.push(format!("{position}: transpile: {}", message.into()));
        }
    }

    fn lower_top_level(&mut self, file: &File) -> Vec<Decl> {
        let mut decls = Vec::new();
        for stmt in &file.statements {
            self.lower_top_level_stmt(stmt, &mut decls);
        }
        decls
    }

    fn lower_top_level_stmt(&mut self, stmt: &Stmt, decls: &mut Vec<Decl>) {
        match &*stmt.kind {
            StmtKind::Package(_) => {}
            StmtKind::GoImport(paths) => {
                for path in paths {
                    self.import(path);
                }
            }
            StmtKind::Declaration { ident, value } => self.lower_top_level_declaration(ident, value.as_ref(), decls),
            StmtKind::ProcDecl { ident, sig, body } => decls.push(self.lower_proc_decl(ident, sig, body)),
            StmtKind::TypeDecl { name, ty } => self.lower_type_decl(*name, ty, decls),
            other => self.error(stmt.position, format!("statement cannot appear at package scope: {other:?}")),
        }
    }

    fn lower_top_level_declaration(&mut self, ident: &Ident, value: Option<&Expr>, decls: &mut Vec<Decl>) {
        if ident.qualifier == Qualifier::Dynamic {
            let names = self.pre.dyn_names.get(&ident.name).cloned();
            let Some(names) = names else { return };
            decls.push(Decl::Type { name: names.key.clone(), def: "struct{}".to_string() });
            let ty_text = self.convert_ty(&ident.ty);
            let value_text = value.map(|v| self.convert_expr(v));
            decls.push(Decl::Var {
                tok: "var",
                name: names.default,
                ty: Some(ty_text),
                value: value_text,
            });
            return;
        }

        // A plain `proc` value bound with `:=`/`:` at top level parses as a
        // `Declaration` whose value is a `ProcedureLit`, not a `ProcDecl` —
        // that split only happens for the literal `name : proc(...) = {...}`
        // shape. Route it through the same function lowering either way.
        if let Some(Expr { kind, .. }) = value {
            if let ExprKind::ProcedureLit { sig, body } = &**kind {
                if let Ty::Procedure(proc_sig) = &**sig {
                    decls.push(self.lower_proc_decl(ident, proc_sig, body));
                    return;
                }
            }
        }

        let value_text = value.map(|v| self.convert_expr(v));
        let ty_text = self.convert_ty(&ident.ty);
        let name = self.declared_name(ident.name);
        decls.push(Decl::Var { tok: "var", name, ty: Some(ty_text), value: value_text });
    }

    fn lower_type_decl(&mut self, name: Symbol, ty: &Ty, decls: &mut Vec<Decl>) {
        if let Ty::Enum(inner, variants) = ty {
            decls.extend(self.lower_enum_decl(name, inner, variants));
        } else {
            let def = self.convert_ty(ty);
            decls.push(Decl::Type { name: self.pre.type_names.get(&name).cloned().unwrap_or_default(), def });
        }
    }

    fn lower_enum_decl(&mut self, name: Symbol, inner: &Ty, variants: &[EnumVariant]) -> Vec<Decl> {
        let base = self.interner.resolve(name).to_string();
        let ordinal_ty = format!("{base}Enum");
        let underlying_ty = format!("{base}Type");
        let array_name = base.clone();
        let backing = if variants.len() > 255 { "uint16" } else { "uint8" };

        let mut out = vec![Decl::Type { name: ordinal_ty.clone(), def: backing.to_string() }];

        let mut const_specs = Vec::with_capacity(variants.len());
        for (i, variant) in variants.iter().enumerate() {
            let const_name = format!("{base}{}", title_case(self.interner.resolve(variant.name)));
            if i == 0 {
                const_specs.push(ConstSpec { name: const_name, ty: Some(ordinal_ty.clone()), value: Some("iota".to_string()) });
            } else {
                const_specs.push(ConstSpec { name: const_name, ty: None, value: None });
            }
        }
        out.push(Decl::ConstBlock(const_specs));

        let underlying_def = self.convert_ty(inner);
        out.push(Decl::Type { name: underlying_ty.clone(), def: underlying_def });

        let values: Vec<String> = variants.iter().map(|v| self.convert_expr(&v.value)).collect();
        out.push(Decl::Var {
            tok: "var",
            name: array_name,
            ty: Some(format!("[{}]{}", variants.len(), underlying_ty)),
            value: Some(format!("{{{}}}", values.join(", "))),
        });

        out
    }

    fn lower_proc_decl(&mut self, ident: &Ident, sig: &cogc_ast::ProcSig, body: &Stmt) -> Decl {
        let name = self.declared_name(ident.name);
        let is_main = self.interner.resolve(ident.name) == "main";
        let has_ctx_param = sig.params.first().map(|p| self.interner.resolve(p.name) == "ctx").unwrap_or(false);
        // `main` always bootstraps the signal-aware root context when the
        // file has any dynamic binding to serve, whether or not the cog
        // source itself asked for a leading `ctx` parameter — dynamic
        // reads elsewhere in the file go through the package-level `_ctx`
        // this sets up, not through a parameter threaded call by call.
        let needs_bootstrap = is_main && (has_ctx_param || self.pre.has_dynamic);

        let mut params = Vec::new();
        for (i, p) in sig.params.iter().enumerate() {
            if i == 0 && has_ctx_param && is_main {
                continue;
            }
            params.push((self.interner.resolve(p.name).to_string(), self.convert_ty(&p.ty)));
        }
        let result = sig.return_ty.as_ref().map(|t| self.convert_ty(t));

        let mut tl_body = Vec::new();
        if needs_bootstrap {
            self.import("context");
            self.import("os");
            self.import("os/signal");
            tl_body.push(TlStmt::Raw("var _stop context.CancelFunc".to_string()));
            tl_body.push(TlStmt::Assign {
                lhs: "_ctx, _stop".to_string(),
                tok: "=",
                rhs: "signal.NotifyContext(context.Background(), os.Interrupt, os.Kill)".to_string(),
            });
            tl_body.push(TlStmt::Defer("_stop()".to_string()));
            if has_ctx_param {
                tl_body.push(TlStmt::Assign { lhs: "ctx".to_string(), tok: ":=", rhs: "_ctx".to_string() });
            }
        }
        tl_body.extend(self.lower_body(body));

        Decl::Func { marker: Some(cogc_ast::stmt_hash(body, self.interner)), name, params, result, body: tl_body }
    }

    /// Flattens a `Block` into its statement list; wraps anything else
    /// (shouldn't occur for a procedure body, but keeps this total) as
    /// a one-element list.
    fn lower_body(&mut self, body: &Stmt) -> Vec<TlStmt> {
        match &*body.kind {
            StmtKind::Block(stmts) => stmts.iter().map(|s| self.lower_stmt(s)).collect(),
            _ => vec![self.lower_stmt(body)],
        }
    }

    fn lower_stmt(&mut self, stmt: &Stmt) -> TlStmt {
        let hash = cogc_ast::stmt_hash(stmt, self.interner);
        self.mark(hash, stmt.position);
        let inner = self.lower_stmt_kind(stmt);
        TlStmt::Marked(hash, Box::new(inner))
    }

    fn lower_stmt_kind(&mut self, stmt: &Stmt) -> TlStmt {
        match &*stmt.kind {
            StmtKind::Declaration { ident, value } => self.lower_local_declaration(ident, value.as_ref()),
            StmtKind::Assignment { target, value } => self.lower_assignment(target, value),
            StmtKind::Block(stmts) => TlStmt::Block(stmts.iter().map(|s| self.lower_stmt(s)).collect()),
            StmtKind::ExprStmt(e) => TlStmt::ExprStmt(self.convert_expr(e)),
            StmtKind::If { condition, then_branch, else_branch } => TlStmt::If {
                cond: self.convert_expr(condition),
                then: self.lower_body(then_branch),
                else_: else_branch.as_ref().map(|b| self.lower_body(b)),
            },
            StmtKind::Switch { tag, cases, default } => TlStmt::Switch {
                tag: tag.as_ref().map(|t| self.convert_expr(t)),
                cases: cases
                    .iter()
                    .map(|c| (c.values.iter().map(|v| self.convert_expr(v)).collect(), self.lower_body(&c.body)))
                    .collect(),
                default: default.as_ref().map(|d| self.lower_body(d)),
            },
            StmtKind::Return(values) => TlStmt::Return(values.iter().map(|v| self.convert_expr(v)).collect()),
            StmtKind::Break { label } => TlStmt::Break(label.map(|s| self.interner.resolve(s).to_string())),
            StmtKind::Label { name, stmt: inner } => {
                TlStmt::Label(self.interner.resolve(*name).to_string(), Box::new(self.lower_stmt(inner)))
            }
            StmtKind::ProcDecl { ident, sig, body } => {
                let sig_ty = Ty::Procedure(sig.clone());
                let rhs = self.render_func_lit(&sig_ty, body);
                TlStmt::Assign { lhs: self.interner.resolve(ident.name).to_string(), tok: ":=", rhs }
            }
            StmtKind::Package(_) | StmtKind::GoImport(_) | StmtKind::TypeDecl { .. } => {
                self.error(stmt.position, "statement is only valid at package scope");
                TlStmt::Raw(String::new())
            }
        }
    }

    fn lower_local_declaration(&mut self, ident: &Ident, value: Option<&Expr>) -> TlStmt {
        let name = self.interner.resolve(ident.name).to_string();
        match value {
            Some(v) => {
                if let ExprKind::ProcedureLit { sig, body } = &*v.kind {
                    let rhs = self.render_func_lit(sig, body);
                    return TlStmt::Assign { lhs: name, tok: ":=", rhs };
                }
                TlStmt::Assign { lhs: name, tok: ":=", rhs: self.convert_expr(v) }
            }
            None => TlStmt::Raw(format!("var {name} {}", self.convert_ty(&ident.ty))),
        }
    }

    fn render_func_lit(&mut self, sig: &Ty, body: &Stmt) -> String {
        let Ty::Procedure(proc_sig) = sig else {
            return "nil".to_string();
        };
        let params: Vec<(String, String)> = proc_sig
            .params
            .iter()
            .map(|p| (self.interner.resolve(p.name).to_string(), self.convert_ty(&p.ty)))
            .collect();
        let result = proc_sig.return_ty.as_ref().map(|t| self.convert_ty(t));
        let body_stmts = self.lower_body(body);
        tl::render_func_literal(&params, result.as_deref(), &body_stmts)
    }

    fn lower_assignment(&mut self, target: &Expr, value: &Expr) -> TlStmt {
        if let ExprKind::Identifier(sym) = &*target.kind {
            if self.pre.qualifiers.get(sym) == Some(&Qualifier::Dynamic) {
                if let Some(names) = self.pre.dyn_names.get(sym).cloned() {
                    self.import("context");
                    let rhs = self.convert_expr(value);
                    return TlStmt::Assign {
                        lhs: "_ctx".to_string(),
                        tok: "=",
                        rhs: format!("context.WithValue(_ctx, {}{{}}, {rhs})", names.key),
                    };
                }
            }
        }
        TlStmt::Assign { lhs: self.convert_expr(target), tok: "=", rhs: self.convert_expr(value) }
    }

    fn declared_name(&mut self, sym: Symbol) -> String {
        match self.pre.real_names.get(&sym) {
            Some(real) => self.tlsyms.use_name(sym, real),
            None => self.interner.resolve(sym).to_string(),
        }
    }

    fn convert_expr(&mut self, e: &Expr) -> String {
        match &*e.kind {
            ExprKind::Identifier(sym) => self.convert_identifier(*sym, &e.ty),
            ExprKind::Selector { base, field } => {
                if let ExprKind::Identifier(owner) = &*base.kind {
                    if let Some(value) = self.pre.enum_variants.get(&(*owner, *field)).cloned() {
                        return self.convert_expr(&value);
                    }
                }
                format!("{}.{}", self.convert_expr(base), self.interner.resolve(*field))
            }
            ExprKind::Index { base, index } => format!("{}[{}]", self.convert_expr(base), self.convert_expr(index)),
            ExprKind::Call { callee, args } => {
                let rendered_args: Vec<String> = args.iter().map(|a| self.convert_expr(a)).collect();
                format!("{}({})", self.convert_expr(callee), rendered_args.join(", "))
            }
            ExprKind::Prefix { op, operand } => {
                let sym = match op {
                    PrefixOp::Not => "!",
                    PrefixOp::Neg => "-",
                };
                format!("{sym}{}", self.convert_expr(operand))
            }
            ExprKind::Infix { op, left, right } => self.convert_infix(*op, left, right),
            ExprKind::OptionUnwrap { operand } => format!("{}.Value", self.convert_expr(operand)),
            ExprKind::Grouped(inner) => format!("({})", self.convert_expr(inner)),

            ExprKind::BoolLit(b) => b.to_string(),
            ExprKind::IntLit { value, .. } => value.to_string(),
            ExprKind::FloatLit { value, .. } => format!("{value}"),
            ExprKind::StringLit { value, kind } => {
                let quoted = format!("{value:?}");
                if *kind == Basic::Ascii {
                    self.import("cog");
                    format!("cog.ASCII({quoted})")
                } else {
                    quoted
                }
            }

            ExprKind::ArrayLit(items) | ExprKind::SliceLit(items) => {
                let ty = self.convert_ty(&e.ty);
                let rendered: Vec<String> = items.iter().map(|i| self.convert_expr(i)).collect();
                format!("{ty}{{{}}}", rendered.join(", "))
            }
            ExprKind::SetLit(items) => {
                self.import("cog");
                let ty = self.convert_ty(&e.ty);
                let rendered: Vec<String> = items.iter().map(|i| self.convert_expr(i)).collect();
                format!("{ty}{{{}}}", rendered.join(", "))
            }
            ExprKind::MapLit(entries) => {
                let ty = self.convert_ty(&e.ty);
                let rendered: Vec<String> = entries
                    .iter()
                    .map(|m| format!("{}: {}", self.convert_expr(&m.key), self.convert_expr(&m.value)))
                    .collect();
                format!("{ty}{{{}}}", rendered.join(", "))
            }
            ExprKind::StructLit(inits) => {
                let ty = self.convert_ty(&e.ty);
                let rendered: Vec<String> = inits
                    .iter()
                    .map(|i| format!("{}: {}", self.interner.resolve(i.name), self.convert_expr(&i.value)))
                    .collect();
                format!("{ty}{{{}}}", rendered.join(", "))
            }
            ExprKind::TupleLit(items) => {
                let ty = self.convert_ty(&e.ty);
                let rendered: Vec<String> = items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| format!("t{i}: {}", self.convert_expr(v)))
                    .collect();
                format!("{ty}{{{}}}", rendered.join(", "))
            }
            ExprKind::UnionLit { is_or, value } => {
                let ty = self.convert_ty(&e.ty);
                let rendered = self.convert_expr(value);
                let field = if *is_or { "Or" } else { "Either" };
                format!("{ty}{{{field}: &{rendered}, Tag: {is_or}}}")
            }
            ExprKind::ProcedureLit { sig, body } => self.render_func_lit(sig, body),

            ExprKind::Builtin { name, args } => self.convert_builtin(*name, args),
            ExprKind::GoCall { pkg, func, args } => {
                let pkg_name = self.interner.resolve(*pkg).to_string();
                self.import(&pkg_name);
                let rendered: Vec<String> = args.iter().map(|a| self.convert_expr(a)).collect();
                format!("{pkg_name}.{}({})", self.interner.resolve(*func), rendered.join(", "))
            }
        }
    }

    fn convert_identifier(&mut self, sym: Symbol, ty: &Ty) -> String {
        let text = self.interner.resolve(sym);
        if text == "_" {
            return "_".to_string();
        }
        if self.pre.qualifiers.get(&sym) == Some(&Qualifier::Dynamic) {
            if let Some(names) = self.pre.dyn_names.get(&sym).cloned() {
                self.import("context");
                let _ = ty;
                return format!("cog.DynGet(_ctx, {}{{}}, {})", names.key, names.default);
            }
        }
        self.declared_name(sym)
    }

    fn convert_infix(&mut self, op: InfixOp, left: &Expr, right: &Expr) -> String {
        let ascii_cmp = matches!(op, InfixOp::Eq | InfixOp::NotEq)
            && left.ty.as_basic() == Some(Basic::Ascii)
            && right.ty.as_basic() == Some(Basic::Ascii);
        if ascii_cmp {
            self.import("bytes");
            let l = self.convert_expr(left);
            let r = self.convert_expr(right);
            let call = format!("bytes.Equal({l}, {r})");
            return if op == InfixOp::NotEq { format!("!{call}") } else { call };
        }
        let sym = match op {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
            InfixOp::Lt => "<",
            InfixOp::LtEq => "<=",
            InfixOp::Gt => ">",
            InfixOp::GtEq => ">=",
            InfixOp::And => "&&",
            InfixOp::Or => "||",
        };
        format!("{} {sym} {}", self.convert_expr(left), self.convert_expr(right))
    }

    fn convert_builtin(&mut self, name: Symbol, args: &[Expr]) -> String {
        let builtin = self.interner.resolve(name);
        match builtin {
            "if" => {
                self.import("cog");
                let rendered: Vec<String> = args.iter().map(|a| self.convert_expr(a)).collect();
                format!("cog.If({})", rendered.join(", "))
            }
            "print" => {
                self.import("cog");
                let rendered: Vec<String> = args.iter().map(|a| self.convert_print_arg(a)).collect();
                format!("cog.Print({})", rendered.join(", "))
            }
            other => {
                format!("/* unknown builtin @{other} */")
            }
        }
    }

    /// `@print` on a value whose type is enum-derived indexes through
    /// the generated lookup array instead of printing the ordinal.
    fn convert_print_arg(&mut self, e: &Expr) -> String {
        if let Ty::Alias(name, _) = &e.ty {
            if let Some(info) = self.pre.enums.get(name).cloned() {
                let rendered = self.convert_expr(e);
                return format!("{}[{rendered}]", info.array_name);
            }
        }
        self.convert_expr(e)
    }

    fn convert_ty(&mut self, ty: &Ty) -> String {
        match ty {
            Ty::Basic(b) => self.convert_basic(*b),
            Ty::Alias(name, inner) => {
                if let Some(t) = self.pre.type_names.get(name) {
                    t.clone()
                } else {
                    let text = self.interner.resolve(*name);
                    if text.is_empty() {
                        self.convert_ty(inner)
                    } else {
                        text.to_string()
                    }
                }
            }
            Ty::Option(inner) => {
                let inner_ty = self.convert_ty(inner);
                format!("struct{{Value {inner_ty}; Set bool}}")
            }
            Ty::Array(elem, len) => {
                let len_text = self.convert_expr(len);
                format!("[{len_text}]{}", self.convert_ty(elem))
            }
            Ty::Slice(elem) => format!("[]{}", self.convert_ty(elem)),
            Ty::Map(key, value) => format!("map[{}]{}", self.convert_ty(key), self.convert_ty(value)),
            Ty::Set(elem) => {
                self.import("cog");
                format!("cog.Set[{}]", self.convert_ty(elem))
            }
            Ty::Struct(fields) => {
                let rendered: Vec<String> = fields
                    .iter()
                    .map(|f| format!("{} {}", convert_export(self.interner.resolve(f.name), f.exported), self.convert_ty(&f.ty)))
                    .collect();
                format!("struct{{{}}}", rendered.join("; "))
            }
            Ty::Tuple(items) => {
                let rendered: Vec<String> =
                    items.iter().enumerate().map(|(i, t)| format!("t{i} {}", self.convert_ty(t))).collect();
                format!("struct{{{}}}", rendered.join("; "))
            }
            Ty::Union(either, or) => {
                format!("struct{{Either *{}; Or *{}; Tag bool}}", self.convert_ty(either), self.convert_ty(or))
            }
            Ty::Enum(_, _) => "<enum used as expression type>".to_string(),
            Ty::Procedure(sig) => {
                let params: Vec<String> = sig.params.iter().map(|p| self.convert_ty(&p.ty)).collect();
                let ret = sig.return_ty.as_ref().map(|t| self.convert_ty(t)).unwrap_or_default();
                format!("func({}) {ret}", params.join(", "))
            }
            Ty::Generic(constraint) => self.interner.resolve(constraint.name).to_string(),
        }
    }

    fn convert_basic(&mut self, b: Basic) -> String {
        match b {
            Basic::Ascii => {
                self.import("cog");
                "cog.ASCII".to_string()
            }
            Basic::Bool => "bool".to_string(),
            Basic::Utf8 => "string".to_string(),
            Basic::Int8 => "int8".to_string(),
            Basic::Int16 => "int16".to_string(),
            Basic::Int32 => "int32".to_string(),
            Basic::Int64 => "int64".to_string(),
            Basic::Int128 => {
                self.import("cog");
                "cog.Int128".to_string()
            }
            Basic::Uint8 => "uint8".to_string(),
            Basic::Uint16 => "uint16".to_string(),
            Basic::Uint32 => "uint32".to_string(),
            Basic::Uint64 => "uint64".to_string(),
            Basic::Uint128 => {
                self.import("cog");
                "cog.Uint128".to_string()
            }
            Basic::Float16 => {
                self.import("cog");
                "cog.Float16".to_string()
            }
            Basic::Float32 => "float32".to_string(),
            Basic::Float64 => "float64".to_string(),
            Basic::Complex32 => {
                self.import("cog");
                "cog.Complex32".to_string()
            }
            Basic::Complex64 => "complex64".to_string(),
            Basic::Complex128 => "complex128".to_string(),
            Basic::None => "any".to_string(),
            Basic::Context => {
                self.import("context");
                "context.Context".to_string()
            }
        }
    }
}
