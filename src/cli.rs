use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::case::Case;
use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "layout-guard")]
#[command(author, version, about = "Layout guard - enforce project structure rules")]
#[command(long_about = "Enforces folder structure, file composition and module import boundaries.\n\n\
    Exit codes:\n  \
    0 - All checks passed\n  \
    1 - Violations found\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); `RUST_LOG` overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default `tracing` filter directive for the verbosity flags.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate file paths against the folder structure rules
    Structure(StructureArgs),

    /// Check import specifiers of one source file against module boundaries
    Imports(ImportsArgs),

    /// Check the declarations of one source file against composition rules
    Composition(CompositionArgs),

    /// Convert names to a naming convention
    Case(CaseArgs),
}

#[derive(Parser, Debug)]
pub struct StructureArgs {
    /// Folder structure configuration (.json, .yaml, .yml or .toml)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Files or directories to validate [default: the structure root]
    pub paths: Vec<PathBuf>,

    /// Do not read or write the error cache
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Parser, Debug)]
pub struct ImportsArgs {
    /// Independent modules configuration
    #[arg(short, long)]
    pub config: PathBuf,

    /// Source file containing the imports
    #[arg(long)]
    pub file: PathBuf,

    /// Import specifiers as written in the source file
    #[arg(required = true)]
    pub imports: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct CompositionArgs {
    /// File composition configuration
    #[arg(short, long)]
    pub config: PathBuf,

    /// Source file the declarations belong to
    #[arg(long)]
    pub file: PathBuf,

    /// Parsed syntax of the source file (JSON)
    #[arg(long)]
    pub syntax: PathBuf,
}

#[derive(Parser, Debug)]
pub struct CaseArgs {
    /// Target convention: camelCase, PascalCase, snake_case, SNAKE_CASE or kebab-case
    pub convention: Case,

    /// Names to convert
    #[arg(required = true)]
    pub inputs: Vec<String>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
