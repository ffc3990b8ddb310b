use std::path::PathBuf;

use clap::Parser;
use sieve_engine::{BoundsCheck, FilterOptions, ParseOptions};
use sieve_runtime::{PROGRAM_NAME, lax_between_from_env};

use crate::printer::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = PROGRAM_NAME,
    version,
    about = "Select and sort the files of a directory with a FILTER/ORDER command file"
)]
pub struct Cli {
    /// Directory whose files are listed (not recursive)
    pub source_dir: PathBuf,

    /// Command file made of FILTER/ORDER sections
    pub command_file: PathBuf,

    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// Accept `between` filters whose lower bound exceeds the upper bound.
    /// Also enabled by SIEVE_BETWEEN_BOUNDS=lax.
    #[arg(long)]
    pub lax_between: bool,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source_dir: PathBuf,
    pub command_file: PathBuf,
    pub format: OutputFormat,
    pub parse: ParseOptions,
}

impl RunConfig {
    pub fn from_args(args: &Cli) -> Self {
        Self::from_parts(args, lax_between_from_env())
    }

    fn from_parts(args: &Cli, lax_env: bool) -> Self {
        let between = if args.lax_between || lax_env {
            BoundsCheck::Lax
        } else {
            BoundsCheck::Strict
        };

        let format = if args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        Self {
            source_dir: args.source_dir.clone(),
            command_file: args.command_file.clone(),
            format,
            parse: ParseOptions {
                filter: FilterOptions { between },
            },
        }
    }
}
