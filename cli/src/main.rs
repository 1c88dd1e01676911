#![deny(missing_docs)]

//! # struct2type CLI
//!
//! Converts the structs of a Go source file into TypeScript interfaces.
//!
//! ```text
//! struct2type models.go -o models.ts
//! ```

use clap::Parser;

mod config;
mod convert;
mod error;
mod logging;

#[derive(Parser, Debug)]
#[clap(
    name = "struct2type",
    author,
    version,
    about = "Convert Go structs to TypeScript types",
    long_about = "Converts Go structs to TypeScript interfaces.\n\
                  Supports basic Go types, arrays, maps, and structs with JSON tags."
)]
struct Cli {
    #[clap(flatten)]
    convert: convert::ConvertArgs,

    /// Increase log verbosity (-v, -vv, -vvv). `RUST_LOG` takes precedence.
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = convert::execute(&cli.convert) {
        tracing::debug!(error = ?e, "conversion aborted");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
