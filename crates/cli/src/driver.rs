use std::io::{self, BufRead};
use std::process::ExitCode;

use anyhow::{Context, bail};
use log::{debug, info};
use sieve_engine::{SectionError, SectionReader};
use sieve_fs::{FileRecord, snapshot_dir};

use crate::config::RunConfig;
use crate::printer::{SectionContext, SectionPrinter, make_printer};

pub const EXIT_OK: u8 = 0;
/// A section had a structural error.
pub const EXIT_FATAL: u8 = 1;
/// Bad paths or I/O failures outside the command language.
pub const EXIT_USAGE: u8 = 2;

#[derive(Debug)]
pub enum RunOutcome {
    /// The command stream ended cleanly after `sections` sections.
    Completed { sections: usize },
    /// The run stopped at a fatal error; earlier sections were printed.
    Aborted(SectionError),
}

pub fn run(config: &RunConfig) -> ExitCode {
    let mut printer = make_printer(config.format);
    ExitCode::from(report(config, printer.as_mut()))
}

/// Execute the run and report its end state through `printer`, returning
/// the process exit code. Every failure goes through the printer so the
/// output format holds for the whole run.
pub fn report(config: &RunConfig, printer: &mut dyn SectionPrinter) -> u8 {
    let code = match execute(config, printer) {
        Ok(RunOutcome::Completed { sections }) => {
            info!("processed {sections} sections");
            EXIT_OK
        }
        Ok(RunOutcome::Aborted(err)) => {
            if let Err(e) = printer.print_error(&err) {
                debug!("failed to print fatal error: {e}");
            }
            EXIT_FATAL
        }
        Err(e) => {
            if let Err(pe) = printer.print_failure(&format!("{e:#}")) {
                debug!("failed to print failure: {pe}");
            }
            EXIT_USAGE
        }
    };

    if let Err(e) = printer.finish() {
        debug!("failed to flush output: {e}");
    }
    code
}

pub fn execute(config: &RunConfig, printer: &mut dyn SectionPrinter) -> anyhow::Result<RunOutcome> {
    if !config.source_dir.is_dir() {
        bail!(
            "source directory {} does not exist",
            config.source_dir.display()
        );
    }

    let records = snapshot_dir(&config.source_dir)
        .with_context(|| format!("failed to list {}", config.source_dir.display()))?;

    let reader = SectionReader::open(&config.command_file, config.parse).with_context(|| {
        format!(
            "failed to open command file {}",
            config.command_file.display()
        )
    })?;

    let outcome = run_sections(&records, reader, printer).context("failed to write output")?;
    Ok(outcome)
}

/// Apply every section of `reader` to the snapshot and print the results.
///
/// A fatal error ends the loop before anything of the broken section is
/// printed.
pub fn run_sections<R: BufRead>(
    records: &[FileRecord],
    reader: SectionReader<R>,
    printer: &mut dyn SectionPrinter,
) -> io::Result<RunOutcome> {
    let mut sections = 0;

    for item in reader {
        let section = match item {
            Ok(section) => section,
            Err(err) => return Ok(RunOutcome::Aborted(err)),
        };

        sections += 1;
        let ctx = SectionContext { index: sections };

        for warning in &section.warnings {
            printer.print_warning(warning, &ctx)?;
        }

        let selected = section.apply(records);
        debug!(
            "section {sections}: {} of {} files selected",
            selected.len(),
            records.len()
        );
        for rec in selected {
            printer.print_row(rec, &ctx)?;
        }
    }

    Ok(RunOutcome::Completed { sections })
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
