//! Printed forms.
//!
//! Every node's content hash is derived from `(position, printed
//! form)`, and the parse/unparse/reparse property needs *some* stable
//! textual rendering to reparse. This is a faithful-enough printer,
//! not a pretty-printer: it favors round-trip fidelity over layout.

use crate::expr::{ExprKind, InfixOp, PrefixOp};
use crate::stmt::StmtKind;
use crate::ty::{Basic, Ty};
use crate::{Expr, Stmt};
use cogc_util::Interner;

pub fn print_ty(ty: &Ty, interner: &Interner) -> String {
    match ty {
        Ty::Basic(b) => b.name().to_owned(),
        Ty::Alias(name, _) => interner.resolve(*name).to_owned(),
        Ty::Option(inner) => format!("{}?", print_ty(inner, interner)),
        Ty::Array(elem, len) => format!("[{}]{}", print_expr(len, interner), print_ty(elem, interner)),
        Ty::Slice(elem) => format!("[]{}", print_ty(elem, interner)),
        Ty::Map(k, v) => format!("map[{}]{}", print_ty(k, interner), print_ty(v, interner)),
        Ty::Set(elem) => format!("set[{}]", print_ty(elem, interner)),
        Ty::Struct(fields) => {
            let body: Vec<_> = fields
                .iter()
                .map(|f| format!("{}: {}", interner.resolve(f.name), print_ty(&f.ty, interner)))
                .collect();
            format!("struct {{ {} }}", body.join(", "))
        }
        Ty::Tuple(items) => {
            let body: Vec<_> = items.iter().map(|t| print_ty(t, interner)).collect();
            format!("tuple<{}>", body.join(", "))
        }
        Ty::Union(either, or) => format!(
            "union<{}, {}>",
            print_ty(either, interner),
            print_ty(or, interner)
        ),
        Ty::Enum(value_ty, variants) => {
            let body: Vec<_> = variants
                .iter()
                .map(|v| format!("{} := {}", interner.resolve(v.name), print_expr(&v.value, interner)))
                .collect();
            format!("enum[{}] {{ {} }}", print_ty(value_ty, interner), body.join(", "))
        }
        Ty::Procedure(sig) => {
            let kw = if sig.is_function { "func" } else { "proc" };
            let params: Vec<_> = sig
                .params
                .iter()
                .map(|p| {
                    let opt = if p.optional { "?" } else { "" };
                    format!("{}{}: {}", interner.resolve(p.name), opt, print_ty(&p.ty, interner))
                })
                .collect();
            let ret = sig
                .return_ty
                .as_ref()
                .map(|t| format!(" -> {}", print_ty(t, interner)))
                .unwrap_or_default();
            format!("{kw}({}){ret}", params.join(", "))
        }
        Ty::Generic(c) => interner.resolve(c.name).to_owned(),
    }
}

pub fn print_expr(e: &Expr, interner: &Interner) -> String {
    match &*e.kind {
        ExprKind::Identifier(sym) => interner.resolve(*sym).to_owned(),
        ExprKind::Selector { base, field } => {
            format!("{}.{}", print_expr(base, interner), interner.resolve(*field))
        }
        ExprKind::Index { base, index } => {
            format!("{}[{}]", print_expr(base, interner), print_expr(index, interner))
        }
        ExprKind::Call { callee, args } => format!(
            "{}({})",
            print_expr(callee, interner),
            join_exprs(args, interner)
        ),
        ExprKind::Prefix { op, operand } => {
            let sym = match op {
                PrefixOp::Not => "!",
                PrefixOp::Neg => "-",
            };
            format!("{sym}{}", print_expr(operand, interner))
        }
        ExprKind::Infix { op, left, right } => format!(
            "{} {} {}",
            print_expr(left, interner),
            infix_symbol(*op),
            print_expr(right, interner)
        ),
        ExprKind::OptionUnwrap { operand } => format!("{}?", print_expr(operand, interner)),
        ExprKind::Grouped(inner) => format!("({})", print_expr(inner, interner)),
        ExprKind::BoolLit(b) => b.to_string(),
        ExprKind::IntLit { value, .. } => value.to_string(),
        ExprKind::FloatLit { value, .. } => value.to_string(),
        ExprKind::StringLit { value, kind } => {
            if matches!(kind, Basic::Ascii) {
                format!("`{value}`")
            } else {
                format!("\"{value}\"")
            }
        }
        ExprKind::ArrayLit(items) | ExprKind::SliceLit(items) | ExprKind::SetLit(items) => {
            format!("{{ {} }}", join_exprs(items, interner))
        }
        ExprKind::MapLit(entries) => {
            let body: Vec<_> = entries
                .iter()
                .map(|entry| format!("{}: {}", print_expr(&entry.key, interner), print_expr(&entry.value, interner)))
                .collect();
            format!("{{ {} }}", body.join(", "))
        }
        ExprKind::StructLit(fields) => {
            let body: Vec<_> = fields
                .iter()
                .map(|f| format!("{} = {}", interner.resolve(f.name), print_expr(&f.value, interner)))
                .collect();
            format!("{{ {} }}", body.join(", "))
        }
        ExprKind::TupleLit(items) => format!("{{ {} }}", join_exprs(items, interner)),
        ExprKind::UnionLit { value, .. } => print_expr(value, interner),
        ExprKind::ProcedureLit { body, .. } => print_stmt(body, interner),
        ExprKind::Builtin { name, args } => format!("@{}({})", interner.resolve(*name), join_exprs(args, interner)),
        ExprKind::GoCall { pkg, func, args } => format!(
            "@go.{}.{}({})",
            interner.resolve(*pkg),
            interner.resolve(*func),
            join_exprs(args, interner)
        ),
    }
}

fn join_exprs(exprs: &[Expr], interner: &Interner) -> String {
    exprs
        .iter()
        .map(|e| print_expr(e, interner))
        .collect::<Vec<_>>()
        .join(", ")
}

fn infix_symbol(op: InfixOp) -> &'static str {
    match op {
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
    }
}

pub fn print_stmt(s: &Stmt, interner: &Interner) -> String {
    match &*s.kind {
        StmtKind::Package(name) => format!("package {}", interner.resolve(*name)),
        StmtKind::GoImport(paths) => format!("goimport ( {} )", paths.join(" ")),
        StmtKind::Declaration { ident, value } => match value {
            Some(v) => format!(
                "{} : {} = {}",
                interner.resolve(ident.name),
                print_ty(&ident.ty, interner),
                print_expr(v, interner)
            ),
            None => format!("{} : {}", interner.resolve(ident.name), print_ty(&ident.ty, interner)),
        },
        StmtKind::Assignment { target, value } => {
            format!("{} = {}", print_expr(target, interner), print_expr(value, interner))
        }
        StmtKind::Block(stmts) => {
            let body: Vec<_> = stmts.iter().map(|s| print_stmt(s, interner)).collect();
            format!("{{ {} }}", body.join("; "))
        }
        StmtKind::ExprStmt(e) => print_expr(e, interner),
        StmtKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            let mut out = format!("if {} {}", print_expr(condition, interner), print_stmt(then_branch, interner));
            if let Some(e) = else_branch {
                out.push_str(&format!(" else {}", print_stmt(e, interner)));
            }
            out
        }
        StmtKind::Switch { tag, cases, default } => {
            let tag_text = tag
                .as_ref()
                .map(|t| format!(" {}", print_expr(t, interner)))
                .unwrap_or_default();
            let mut body = String::new();
            for c in cases {
                let values: Vec<_> = c.values.iter().map(|v| print_expr(v, interner)).collect();
                body.push_str(&format!("case {}: {} ", values.join(", "), print_stmt(&c.body, interner)));
            }
            if let Some(d) = default {
                body.push_str(&format!("default: {}", print_stmt(d, interner)));
            }
            format!("switch{tag_text} {{ {body} }}")
        }
        StmtKind::TypeDecl { name, ty } => format!("{} ~ {}", interner.resolve(*name), print_ty(ty, interner)),
        StmtKind::Return(values) => format!("return {}", join_exprs(values, interner)),
        StmtKind::Break { label } => match label {
            Some(l) => format!("break {}", interner.resolve(*l)),
            None => "break".to_owned(),
        },
        StmtKind::Label { name, stmt } => format!("{}: {}", interner.resolve(*name), print_stmt(stmt, interner)),
        StmtKind::ProcDecl { ident, sig, body } => format!(
            "{} : {} = {}",
            interner.resolve(ident.name),
            print_ty(&Ty::Procedure(sig.clone()), interner),
            print_stmt(body, interner)
        ),
    }
}
