//! Rewrites the printer's line markers into `//line` directives.
//!
//! The transpiler stamps `/*@line:<hash>*/` ahead of every statement it
//! emits (see [`crate::tl::line_marker`]); this pass maps each hash back
//! to the source position it was derived from and replaces the marker
//! with a directive the TL toolchain understands. A hash with no known
//! position (shouldn't happen, but the map is keyed by content hash, not
//! by construction) is simply dropped rather than panicking.

use cogc_util::Position;
use rustc_hash::FxHashMap;

pub fn rewrite(printed: &str, file_name: &str, positions: &FxHashMap<u64, Position>) -> String {
    let mut out = String::with_capacity(printed.len());
    for line in printed.lines() {
        let trimmed = line.trim_start();
        if let Some(hash) = parse_marker(trimmed) {
            if let Some(position) = positions.get(&hash) {
                let prefix_len = line.len() - trimmed.len();
                out.push_str(&line[..prefix_len]);
                out.push_str("//line ");
                out.push_str(file_name);
                out.push(':');
                out.push_str(&position.line.to_string());
                out.push('\n');
            }
            // Unknown hash: drop the marker line entirely.
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn parse_marker(line: &str) -> Option<u64> {
    let rest = line.strip_prefix("/*@line:")?;
    let hex = rest.strip_suffix("*/")?;
    u64::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_marker_becomes_a_line_directive() {
        let mut positions = FxHashMap::default();
        positions.insert(0xabc, Position::new(7, 1));
        let printed = "\t/*@line:abc*/\n\tx := 1\n";
        let rewritten = rewrite(printed, "main.cog", &positions);
        assert!(rewritten.contains("//line main.cog:7"));
        assert!(rewritten.contains("x := 1"));
    }

    #[test]
    fn unknown_marker_is_dropped() {
        let positions = FxHashMap::default();
        let printed = "/*@line:dead*/\nx := 1\n";
        let rewritten = rewrite(printed, "main.cog", &positions);
        assert!(!rewritten.contains("@line"));
        assert!(rewritten.contains("x := 1"));
    }
}
