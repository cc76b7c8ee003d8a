//! Command-line argument definitions for the Stratum CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand picks the conversion; the configuration file
//! and logging verbosity apply to every subcommand.

use clap::{Parser, Subcommand, ValueEnum};

use stratum::{OutputFormat, SourceFormat};

/// Command-line arguments for the Stratum conversion tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a diagram document into geometry or layout metadata
    Convert(ConvertArgs),
    /// Re-encode an OBJ mesh as a glTF scene
    Reencode(ReencodeArgs),
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Markdown, HTML or raw diagram file
    pub input: String,

    /// Output path; defaults to a name chosen by the output format
    #[arg(short, long)]
    pub output: Option<String>,

    /// What to write
    #[arg(long, value_enum, default_value_t = Target::Obj)]
    pub to: Target,

    /// How to locate the diagram in the input
    #[arg(long, value_enum, default_value_t = Source::Auto)]
    pub source: Source,

    /// Reject lines that are not part of the diagram grammar
    #[arg(long)]
    pub strict: bool,

    /// Unix timestamp recorded in layout metadata
    #[arg(long, value_name = "SECS")]
    pub timestamp: Option<u64>,
}

#[derive(clap::Args, Debug)]
pub struct ReencodeArgs {
    /// OBJ mesh file
    pub input: String,

    /// Output glTF path
    #[arg(short, long, default_value = "model.gltf")]
    pub output: String,
}

/// Output format selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Obj,
    Gltf,
    Layout,
}

impl From<Target> for OutputFormat {
    fn from(target: Target) -> Self {
        match target {
            Target::Obj => OutputFormat::Obj,
            Target::Gltf => OutputFormat::Gltf,
            Target::Layout => OutputFormat::Layout,
        }
    }
}

/// Input format selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Auto,
    Markdown,
    Html,
    Raw,
}

impl From<Source> for SourceFormat {
    fn from(source: Source) -> Self {
        match source {
            Source::Auto => SourceFormat::Auto,
            Source::Markdown => SourceFormat::Markdown,
            Source::Html => SourceFormat::Html,
            Source::Raw => SourceFormat::Raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_defaults() {
        let args = Args::try_parse_from(["stratum", "convert", "arch.md"]).unwrap();

        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
        match args.command {
            Command::Convert(convert) => {
                assert_eq!(convert.input, "arch.md");
                assert_eq!(convert.output, None);
                assert_eq!(convert.to, Target::Obj);
                assert_eq!(convert.source, Source::Auto);
                assert!(!convert.strict);
                assert_eq!(convert.timestamp, None);
            }
            Command::Reencode(_) => panic!("expected convert"),
        }
    }

    #[test]
    fn test_convert_all_flags() {
        let args = Args::try_parse_from([
            "stratum",
            "convert",
            "page.html",
            "-o",
            "out.json",
            "--to",
            "layout",
            "--source",
            "html",
            "--strict",
            "--timestamp",
            "1700000000",
            "--log-level",
            "debug",
            "-c",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(args.log_level, "debug");
        assert_eq!(args.config.as_deref(), Some("custom.toml"));
        let Command::Convert(convert) = args.command else {
            panic!("expected convert");
        };
        assert_eq!(convert.output.as_deref(), Some("out.json"));
        assert_eq!(OutputFormat::from(convert.to), OutputFormat::Layout);
        assert_eq!(SourceFormat::from(convert.source), SourceFormat::Html);
        assert!(convert.strict);
        assert_eq!(convert.timestamp, Some(1_700_000_000));
    }

    #[test]
    fn test_reencode_default_output() {
        let args = Args::try_parse_from(["stratum", "reencode", "mesh.obj"]).unwrap();
        let Command::Reencode(reencode) = args.command else {
            panic!("expected reencode");
        };
        assert_eq!(reencode.input, "mesh.obj");
        assert_eq!(reencode.output, "model.gltf");
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["stratum", "convert", "a.md", "--to", "svg"]).is_err());
    }
}
