#![deny(missing_docs)]

//! # Convert Command
//!
//! Reads one Go source file, converts its structs and writes the TypeScript
//! interfaces to stdout or to a file.

use crate::config;
use crate::error::{CliError, CliResult};
use std::fs;
use std::path::PathBuf;
use struct2type_core::Converter;

/// Arguments for the conversion.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the Go source file.
    pub input: PathBuf,

    /// Output file path (default: stdout).
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// YAML or JSON file with extra type mappings.
    #[clap(long, env = "STRUCT2TYPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Map a Go type to a TypeScript type.
    /// Format: `"GoType=TsType"`.
    /// Example: `"--type uuid.UUID=string"`
    #[clap(long = "type", value_parser = config::parse_key_val)]
    pub types: Vec<(String, String)>,

    /// Type emitted for channels, functions, interfaces and other unmappable shapes.
    #[clap(long)]
    pub fallback: Option<String>,
}

/// Converts the input and returns the generated text.
pub fn render(args: &ConvertArgs) -> CliResult<String> {
    if !args.input.exists() {
        return Err(CliError::General(format!(
            "Source file not found: {:?}",
            args.input
        )));
    }

    let mapping = config::resolve(
        args.config.as_deref(),
        &args.types,
        args.fallback.as_deref(),
    )?;
    let content = fs::read_to_string(&args.input)?;

    tracing::info!(input = %args.input.display(), "converting");
    let output = Converter::new(mapping).convert_source(&content)?;
    Ok(output)
}

/// Executes the conversion.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &ConvertArgs) -> CliResult<()> {
    let output = render(args)?;

    match &args.output {
        Some(out_path) => {
            if let Some(parent) = out_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            let mut text = output;
            if !text.is_empty() {
                text.push('\n');
            }
            fs::write(out_path, text)?;
            tracing::info!(output = %out_path.display(), "TypeScript types written");
        }
        None => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
    }

    Ok(())
}
