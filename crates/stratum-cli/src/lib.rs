//! CLI logic for the Stratum conversion tool.
//!
//! This module contains the core CLI logic; `main` only sets up logging and
//! renders errors.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, ConvertArgs, ReencodeArgs, Source, Target};

use std::path::Path;

use log::info;

use stratum::{DiagramBuilder, OutputFormat, StratumError};

/// Run the Stratum CLI application
///
/// Loads the configuration and dispatches the selected subcommand.
///
/// # Errors
///
/// Returns `StratumError` for:
/// - Configuration loading errors
/// - Missing input files or diagram blocks
/// - Parsing errors
/// - Invalid or empty geometry
/// - File I/O errors
pub fn run(args: &Args) -> Result<(), StratumError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Convert(convert) => {
            let format = OutputFormat::from(convert.to);
            let output = convert
                .output
                .as_deref()
                .unwrap_or(format.default_file_name());

            info!(
                input_path = convert.input,
                output_path = output,
                format:? = format;
                "Converting diagram"
            );

            let strict = convert.strict || app_config.parser().strict();
            let mut builder = DiagramBuilder::new(app_config.with_strict(strict));
            if let Some(seconds) = convert.timestamp {
                builder = builder.with_generated_at(seconds);
            }

            builder.convert_file(
                Path::new(&convert.input),
                Path::new(output),
                convert.source.into(),
                format,
            )?;

            info!(output_file = output; "Conversion finished");
        }
        Command::Reencode(reencode) => {
            info!(
                input_path = reencode.input,
                output_path = reencode.output;
                "Re-encoding mesh"
            );

            DiagramBuilder::new(app_config)
                .reencode_mesh_file(Path::new(&reencode.input), Path::new(&reencode.output))?;

            info!(output_file = reencode.output; "Re-encoding finished");
        }
    }

    Ok(())
}
