//! Command-line argument definitions for the techgraph CLI.
//!
//! [`Args`] is parsed from the command line using [`clap`]. Arguments select
//! the input document and its format, the output path, an optional
//! configuration file and the logging verbosity.

use std::path::Path;

use clap::{Parser, ValueEnum};

use techgraph::InputFormat;

/// Input format selection on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Pick from the input file extension
    #[default]
    Auto,
    /// `{"nodes": [...], "links": [...]}` document
    Json,
    /// PlantUML node blocks and arrows
    Plantuml,
}

impl FormatArg {
    /// Resolve to a concrete format, consulting the path for `Auto`.
    pub fn resolve(self, path: impl AsRef<Path>) -> InputFormat {
        match self {
            Self::Auto => InputFormat::from_path(path),
            Self::Json => InputFormat::Json,
            Self::Plantuml => InputFormat::Plantuml,
        }
    }
}

/// Command-line arguments for the techgraph layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input technology graph
    #[arg(help = "Path to the input file (.plantuml or .json)")]
    pub input: String,

    /// Path to the output layout document
    #[arg(short, long, default_value = "layout.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Input format
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["techgraph", "tree.plantuml"]);

        assert_eq!(args.input, "tree.plantuml");
        assert_eq!(args.output, "layout.json");
        assert_eq!(args.format, FormatArg::Auto);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let args = Args::parse_from(["techgraph", "tree.txt", "--format", "json", "-o", "out.json"]);

        assert_eq!(args.format.resolve(&args.input), InputFormat::Json);
        assert_eq!(args.output, "out.json");
    }

    #[test]
    fn test_auto_uses_extension() {
        assert_eq!(FormatArg::Auto.resolve("tree.json"), InputFormat::Json);
        assert_eq!(FormatArg::Auto.resolve("tree.puml"), InputFormat::Plantuml);
    }
}
