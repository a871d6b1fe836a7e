//! Driver for the cog CLI.
//!
//! Wires the lexer/parser (via [`cogc_par`]) and the transpiler (via
//! [`cogc_gen`]) behind the `--file`/`--debug`/`--write` surface: read
//! one `.cog` file, parse it, and either print the parsed statements and
//! the transpiled TL source to stdout, or write the TL source to a
//! companion file under `tmp/`.

use std::fs;
use std::path::PathBuf;

use clap::Parser as ClapParser;
use cogc_util::Position;
use thiserror::Error;

/// TL is rendered as Go-shaped source text, so the companion file this
/// driver writes under `--write` carries Go's extension.
const TL_EXTENSION: &str = "go";

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("missing file name")]
    MissingFile,
    #[error("invalid file extension, must be .cog")]
    InvalidExtension,
    #[error("reading {}: {source}", path.display())]
    Read { path: PathBuf, #[source] source: std::io::Error },
    #[error("creating tmp directory: {0}")]
    CreateDir(#[source] std::io::Error),
    #[error("writing {}: {source}", path.display())]
    Write { path: PathBuf, #[source] source: std::io::Error },
}

pub type Result<T> = std::result::Result<T, DriverError>;

/// Command-line surface for the `cogc` binary.
#[derive(ClapParser, Debug)]
#[command(name = "cogc")]
#[command(author = "Cog Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Transpiles a .cog source file to TL source", long_about = None)]
pub struct Cli {
    /// Path to the .cog file to compile.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Enable per-advance parser trace logging.
    #[arg(long)]
    pub debug: bool,

    /// Write the generated TL source to tmp/<basename>.go instead of stdout.
    #[arg(long)]
    pub write: bool,
}

/// Entry point shared by `main` and the integration tests: parses
/// arguments from the process environment and runs the compile.
pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    run(cli)
}

fn init_tracing(debug: bool) {
    let filter = if debug { "trace" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_target(false)
        .try_init();
}

/// Runs one compile. Lex/parse/transpile diagnostics are printed and
/// treated as a non-fatal outcome (matching the tool's behavior of
/// reporting a bad `.cog` file rather than crashing on it); only
/// argument and filesystem problems are returned as errors.
pub fn run(cli: Cli) -> Result<()> {
    let file_name = cli.file.ok_or(DriverError::MissingFile)?;

    if file_name.extension().and_then(|e| e.to_str()) != Some("cog") {
        return Err(DriverError::InvalidExtension);
    }

    let source = fs::read_to_string(&file_name)
        .map_err(|source| DriverError::Read { path: file_name.clone(), source })?;

    let display_name = file_name.to_string_lossy().into_owned();

    let (file, interner) = match cogc_par::parse(&source) {
        Ok(parsed) => parsed,
        Err(diagnostics) => {
            println!("{diagnostics}");
            return Ok(());
        }
    };

    if !cli.write {
        println!("parsed nodes:\n");
        println!("0 - {}: package {}", Position::start(), interner.resolve(file.package));
        for (i, stmt) in file.statements.iter().enumerate() {
            println!("{} - {}: {}", i + 1, stmt.position(), cogc_ast::print::print_stmt(stmt, &interner));
        }
    }

    let tl_source = match cogc_gen::transpile(&file, &interner, &display_name) {
        Ok(text) => text,
        Err(diagnostics) => {
            println!("{diagnostics}");
            return Ok(());
        }
    };

    if cli.write {
        fs::create_dir_all("tmp").map_err(DriverError::CreateDir)?;
        let stem = file_name.file_stem().unwrap_or_default().to_string_lossy();
        let out_path = PathBuf::from("tmp").join(format!("{stem}.{TL_EXTENSION}"));
        fs::write(&out_path, &tl_source).map_err(|source| DriverError::Write { path: out_path, source })?;
    } else {
        println!("\ntranspiled nodes:\n");
        println!("{tl_source}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_file() {
        let cli = Cli { file: None, debug: false, write: false };
        assert!(matches!(run(cli), Err(DriverError::MissingFile)));
    }

    #[test]
    fn rejects_non_cog_extension() {
        let cli = Cli { file: Some(PathBuf::from("main.txt")), debug: false, write: false };
        assert!(matches!(run(cli), Err(DriverError::InvalidExtension)));
    }

    #[test]
    fn reports_unreadable_file() {
        let cli = Cli { file: Some(PathBuf::from("does-not-exist.cog")), debug: false, write: false };
        assert!(matches!(run(cli), Err(DriverError::Read { .. })));
    }

    #[test]
    fn compiles_a_valid_file_to_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.cog");
        fs::write(&path, "package main\n\nmain : proc() = {\n\t@print(\"hello\")\n}\n").unwrap();

        let cli = Cli { file: Some(path), debug: false, write: false };
        assert!(run(cli).is_ok());
    }

    #[test]
    fn writes_the_tl_companion_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.cog");
        fs::write(&path, "package main\n\nmain : proc() = {\n\t@print(\"hello\")\n}\n").unwrap();

        let cwd = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let cli = Cli { file: Some(PathBuf::from("hello.cog")), debug: false, write: true };
        let result = run(cli);
        let written = fs::read_to_string("tmp/hello.go");
        std::env::set_current_dir(cwd).unwrap();

        assert!(result.is_ok());
        assert!(written.unwrap().contains("package main"));
    }
}
