//! Defines the command-line interface for the application.

use clap::Parser;
use section_sync_lib::DEFAULT_BOUNDARY;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "section-sync",
    version,
    about = "Copy boundary-delimited sections from a model file into target files."
)]
pub struct Cli {
    /// The model file to read sections from, followed by the files to update.
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Boundary template; `{key}` is replaced by each section's key.
    #[arg(
        short,
        long,
        value_name = "PATTERN",
        env = "SECTION_SYNC_BOUNDARY",
        default_value = DEFAULT_BOUNDARY,
        allow_hyphen_values = true
    )]
    pub boundary: String,

    /// Report how many sections would change without writing any file.
    #[arg(short = 'n', long, conflicts_with = "diff")]
    pub dry_run: bool,

    /// Print a unified diff of each target instead of writing it.
    #[arg(long, conflicts_with = "dry_run")]
    pub diff: bool,
}
