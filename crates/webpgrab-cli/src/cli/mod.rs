//! CLI for webpgrab.

mod commands;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use webpgrab_core::config;

use commands::run_grab;

/// Download the numbered images of a JavaScript-rendered page into a folder
/// named after its heading.
#[derive(Debug, Parser)]
#[command(name = "webpgrab", version)]
#[command(about = "Download digits-only images from a rendered web page", long_about = None)]
#[command(after_help = "Example: webpgrab https://example.com/gallery/42")]
pub struct Cli {
    /// Page URL to render and scan for images.
    pub url: String,

    /// Create the heading folder under DIR instead of the current directory.
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Image extension to collect for this run (overrides the config file), e.g. "webp".
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,
}

impl Cli {
    /// Parses `std::env::args`, exiting with status 1 and a usage message on
    /// bad input (help and version still exit 0).
    pub fn parse_or_exit() -> Self {
        match Cli::try_parse() {
            Ok(cli) => cli,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
                _ => {
                    let _ = err.print();
                    std::process::exit(1);
                }
            },
        }
    }

    pub fn run(self) -> Result<()> {
        let cfg = config::load_or_default();
        tracing::debug!("loaded config: {:?}", cfg);
        run_grab(&self, &cfg)
    }
}

#[cfg(test)]
mod tests;
