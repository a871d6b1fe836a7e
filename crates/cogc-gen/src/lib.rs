//! cogc-gen - lowers a parsed `cog` file to TL (Go-like) source text.
//!
//! [`lower`] builds a typed TL tree ([`tl::File`]); [`tl::print`] turns
//! that into text; [`line::rewrite`] then swaps the printer's content-hash
//! markers for `//line` directives pointing back at the original source.

mod line;
mod lower;
mod symtab;
mod tl;

use cogc_ast::File;
use cogc_util::Interner;

pub use lower::convert_export;

/// Transpiles a parsed file into TL source text, or joins any lowering
/// diagnostics (one per line) into an error string.
pub fn transpile(file: &File, interner: &Interner, file_name: &str) -> Result<String, String> {
    let lowered = lower::lower(file, interner);
    if !lowered.errors.is_empty() {
        return Err(lowered.errors.join("\n"));
    }
    let printed = tl::print(&lowered.file);
    Ok(line::rewrite(&printed, file_name, &lowered.positions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower_source(source: &str) -> String {
        let (file, interner) = cogc_par::parse(source).expect("parse");
        transpile(&file, &interner, "main.cog").expect("transpile")
    }

    #[test]
    fn hello_print_emits_a_plain_string_print() {
        let out = lower_source(
            r#"
            package main

            main : proc() = {
                @print("hello")
            }
            "#,
        );
        assert!(out.contains("package main"));
        assert!(out.contains("cog.Print(\"hello\")"));
    }

    #[test]
    fn enum_variant_selector_inlines_the_underlying_value() {
        let out = lower_source(
            r#"
            package main

            Status ~ enum[utf8] {
                Open := "open",
                Closed := "closed",
            }

            main : proc() = {
                v := Status.Open
                @print(v)
            }
            "#,
        );
        assert!(out.contains("v := \"open\""));
        assert!(out.contains("cog.Print(v)"));
        assert!(!out.contains("StatusOpen]"));
    }

    #[test]
    fn dynamic_binding_reads_its_default_then_an_overwritten_value() {
        let out = lower_source(
            r#"
            package main

            dyn val : utf8 = "default"

            main : proc() = {
                @print(val)
                val = "override"
                @print(val)
            }
            "#,
        );
        assert!(out.contains("ValDefault"));
        assert!(out.contains("cog.DynGet(_ctx, ValKey{}, ValDefault)"));
        assert!(out.contains("context.WithValue(_ctx, ValKey{}, \"override\")"));
        assert!(out.contains("signal.NotifyContext"));
    }
}
