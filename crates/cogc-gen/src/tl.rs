//! A minimal TL (Go-like) AST and its printer.
//!
//! Both are treated as external collaborators by the specification this
//! crate implements — a real deployment would hand this off to a typed
//! AST builder and a dedicated printer package. This module stands in
//! for both: just enough structure to hold declaration order and
//! indentation, with expressions kept as pre-rendered text since the
//! expression grammar itself carries no statement-level concerns.

use std::fmt::Write as _;

/// A marker comment embedded by [`crate::lower`] at the head of a
/// statement; [`crate::line::rewrite`] replaces it with a `//line`
/// directive once the printer has turned the tree into text.
pub fn line_marker(hash: u64) -> String {
    format!("/*@line:{hash:x}*/")
}

#[derive(Clone, Debug)]
pub enum Decl {
    Import(Vec<ImportSpec>),
    Var { tok: &'static str, name: String, ty: Option<String>, value: Option<String> },
    Type { name: String, def: String },
    ConstBlock(Vec<ConstSpec>),
    Func { marker: Option<u64>, name: String, params: Vec<(String, String)>, result: Option<String>, body: Vec<Stmt> },
    Raw(String),
}

#[derive(Clone, Debug)]
pub struct ImportSpec {
    pub alias: Option<String>,
    pub path: String,
}

#[derive(Clone, Debug)]
pub struct ConstSpec {
    pub name: String,
    pub ty: Option<String>,
    pub value: Option<String>,
}

#[derive(Clone, Debug)]
pub enum Stmt {
    Raw(String),
    Marked(u64, Box<Stmt>),
    Block(Vec<Stmt>),
    Assign { lhs: String, tok: &'static str, rhs: String },
    ExprStmt(String),
    If { cond: String, then: Vec<Stmt>, else_: Option<Vec<Stmt>> },
    Return(Vec<String>),
    Break(Option<String>),
    Label(String, Box<Stmt>),
    Defer(String),
    Switch { tag: Option<String>, cases: Vec<(Vec<String>, Vec<Stmt>)>, default: Option<Vec<Stmt>> },
}

pub struct File {
    pub package: String,
    pub decls: Vec<Decl>,
}

/// Renders the tree to Go-like source text. This is the "black-box TL
/// printer" the specification names — everything upstream of this
/// function only ever touches the typed tree.
pub fn print(file: &File) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "package {}", file.package);
    out.push('\n');
    for decl in &file.decls {
        print_decl(&mut out, decl, 0);
        out.push('\n');
    }
    out
}

/// Renders a func literal (a closure value, not a top-level `Decl::Func`)
/// for use inline as an expression's pre-rendered text.
pub fn render_func_literal(params: &[(String, String)], result: Option<&str>, body: &[Stmt]) -> String {
    let mut out = String::new();
    let rendered: Vec<String> = params.iter().map(|(n, t)| format!("{n} {t}")).collect();
    let _ = write!(out, "func({})", rendered.join(", "));
    if let Some(result) = result {
        let _ = write!(out, " {result}");
    }
    out.push_str(" {\n");
    for stmt in body {
        print_stmt(&mut out, stmt, 1);
    }
    out.push('}');
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

fn print_decl(out: &mut String, decl: &Decl, depth: usize) {
    match decl {
        Decl::Import(specs) => {
            if specs.is_empty() {
                return;
            }
            out.push_str("import (\n");
            for spec in specs {
                out.push('\t');
                if let Some(alias) = &spec.alias {
                    let _ = write!(out, "{alias} ");
                }
                let _ = writeln!(out, "\"{}\"", spec.path);
            }
            out.push_str(")\n");
        }
        Decl::Var { tok, name, ty, value } => {
            indent(out, depth);
            let _ = write!(out, "{tok} {name}");
            if let Some(ty) = ty {
                let _ = write!(out, " {ty}");
            }
            if let Some(value) = value {
                let _ = write!(out, " = {value}");
            }
            out.push('\n');
        }
        Decl::Type { name, def } => {
            indent(out, depth);
            let _ = writeln!(out, "type {name} {def}");
        }
        Decl::ConstBlock(specs) => {
            out.push_str("const (\n");
            for spec in specs {
                out.push('\t');
                out.push_str(&spec.name);
                if let Some(ty) = &spec.ty {
                    let _ = write!(out, " {ty}");
                }
                if let Some(value) = &spec.value {
                    let _ = write!(out, " = {value}");
                }
                out.push('\n');
            }
            out.push_str(")\n");
        }
        Decl::Func { marker, name, params, result, body } => {
            if let Some(hash) = marker {
                out.push_str(&line_marker(*hash));
                out.push('\n');
            }
            let rendered_params: Vec<String> = params.iter().map(|(n, t)| format!("{n} {t}")).collect();
            let _ = write!(out, "func {name}({})", rendered_params.join(", "));
            if let Some(result) = result {
                let _ = write!(out, " {result}");
            }
            out.push_str(" {\n");
            for stmt in body {
                print_stmt(out, stmt, depth + 1);
            }
            out.push_str("}\n");
        }
        Decl::Raw(text) => {
            indent(out, depth);
            out.push_str(text);
            out.push('\n');
        }
    }
}

fn print_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    match stmt {
        Stmt::Marked(hash, inner) => {
            indent(out, depth);
            out.push_str(&line_marker(*hash));
            out.push('\n');
            print_stmt(out, inner, depth);
        }
        Stmt::Raw(text) => {
            indent(out, depth);
            out.push_str(text);
            out.push('\n');
        }
        Stmt::Block(stmts) => {
            indent(out, depth);
            out.push_str("{\n");
            for s in stmts {
                print_stmt(out, s, depth + 1);
            }
            indent(out, depth);
            out.push_str("}\n");
        }
        Stmt::Assign { lhs, tok, rhs } => {
            indent(out, depth);
            let _ = writeln!(out, "{lhs} {tok} {rhs}");
        }
        Stmt::ExprStmt(text) => {
            indent(out, depth);
            let _ = writeln!(out, "{text}");
        }
        Stmt::If { cond, then, else_ } => {
            indent(out, depth);
            let _ = writeln!(out, "if {cond} {{");
            for s in then {
                print_stmt(out, s, depth + 1);
            }
            match else_ {
                Some(stmts) => {
                    indent(out, depth);
                    out.push_str("} else {\n");
                    for s in stmts {
                        print_stmt(out, s, depth + 1);
                    }
                    indent(out, depth);
                    out.push_str("}\n");
                }
                None => {
                    indent(out, depth);
                    out.push_str("}\n");
                }
            }
        }
        Stmt::Return(values) => {
            indent(out, depth);
            if values.is_empty() {
                out.push_str("return\n");
            } else {
                let _ = writeln!(out, "return {}", values.join(", "));
            }
        }
        Stmt::Break(label) => {
            indent(out, depth);
            match label {
                Some(l) => {
                    let _ = writeln!(out, "break {l}");
                }
                None => out.push_str("break\n"),
            }
        }
        Stmt::Label(name, inner) => {
            indent(out, depth.saturating_sub(1));
            let _ = writeln!(out, "{name}:");
            print_stmt(out, inner, depth);
        }
        Stmt::Defer(call) => {
            indent(out, depth);
            let _ = writeln!(out, "defer {call}");
        }
        Stmt::Switch { tag, cases, default } => {
            indent(out, depth);
            match tag {
                Some(t) => {
                    let _ = writeln!(out, "switch {t} {{");
                }
                None => out.push_str("switch {\n"),
            }
            for (values, body) in cases {
                indent(out, depth);
                let _ = writeln!(out, "case {}:", values.join(", "));
                for s in body {
                    print_stmt(out, s, depth + 1);
                }
            }
            if let Some(body) = default {
                indent(out, depth);
                out.push_str("default:\n");
                for s in body {
                    print_stmt(out, s, depth + 1);
                }
            }
            indent(out, depth);
            out.push_str("}\n");
        }
    }
}
