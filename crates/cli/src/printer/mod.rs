use std::io::{self, Write};

use serde::Serialize;
use sieve_engine::{SectionError, Warning};
use sieve_fs::FileRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One file name per line, warnings inline.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Position of the section being printed.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext {
    /// 1-based section number.
    pub index: usize,
}

/// Trait for printing the result of a run.
///
/// A section prints its warnings first, then its rows. A fatal error is
/// printed once, after which nothing else is.
pub trait SectionPrinter {
    fn print_warning(&mut self, warning: &Warning, ctx: &SectionContext) -> io::Result<()>;

    fn print_row(&mut self, rec: &FileRecord, ctx: &SectionContext) -> io::Result<()>;

    fn print_error(&mut self, err: &SectionError) -> io::Result<()>;

    /// A failure before or outside the command stream, such as a missing
    /// source directory. It has no line number.
    fn print_failure(&mut self, message: &str) -> io::Result<()>;

    /// Flush buffered output.
    fn finish(&mut self) -> io::Result<()>;
}

/// Create a printer on stdout/stderr for the given format.
pub fn make_printer(format: OutputFormat) -> Box<dyn SectionPrinter> {
    match format {
        OutputFormat::Human => Box::new(HumanPrinter::stdout()),
        OutputFormat::Json => Box::new(JsonPrinter::stdout()),
    }
}

/// Plain text printer: base names on `out`, fatal errors on `err`.
pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl HumanPrinter<io::Stdout, io::Stderr> {
    pub fn stdout() -> Self {
        HumanPrinter::new(io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> SectionPrinter for HumanPrinter<W, E> {
    fn print_warning(&mut self, warning: &Warning, _ctx: &SectionContext) -> io::Result<()> {
        writeln!(self.out, "Warning in line {} - {}", warning.line, warning.error)
    }

    fn print_row(&mut self, rec: &FileRecord, _ctx: &SectionContext) -> io::Result<()> {
        writeln!(self.out, "{}", rec.name)
    }

    fn print_error(&mut self, err: &SectionError) -> io::Result<()> {
        writeln!(self.err, "ERROR: {err}")
    }

    fn print_failure(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "ERROR: {message}")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }
}

/// One NDJSON line.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonEvent<'a> {
    Warning {
        section: usize,
        line: usize,
        message: String,
    },
    File {
        section: usize,
        name: &'a str,
        path: &'a str,
        size: u64,
    },
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
        message: String,
    },
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl JsonPrinter<io::Stdout, io::Stderr> {
    pub fn stdout() -> Self {
        JsonPrinter::new(io::stdout(), io::stderr())
    }
}

fn write_event<T: Write>(w: &mut T, event: &JsonEvent<'_>) -> io::Result<()> {
    let line = serde_json::to_string(event).map_err(io::Error::other)?;
    writeln!(w, "{line}")
}

impl<W: Write, E: Write> SectionPrinter for JsonPrinter<W, E> {
    fn print_warning(&mut self, warning: &Warning, ctx: &SectionContext) -> io::Result<()> {
        let event = JsonEvent::Warning {
            section: ctx.index,
            line: warning.line,
            message: warning.error.to_string(),
        };
        write_event(&mut self.out, &event)
    }

    fn print_row(&mut self, rec: &FileRecord, ctx: &SectionContext) -> io::Result<()> {
        let event = JsonEvent::File {
            section: ctx.index,
            name: &rec.name,
            path: &rec.abs_path,
            size: rec.size,
        };
        write_event(&mut self.out, &event)
    }

    fn print_error(&mut self, err: &SectionError) -> io::Result<()> {
        let event = JsonEvent::Error {
            line: Some(err.line()),
            message: err.to_string(),
        };
        write_event(&mut self.err, &event)
    }

    fn print_failure(&mut self, message: &str) -> io::Result<()> {
        let event = JsonEvent::Error {
            line: None,
            message: message.to_owned(),
        };
        write_event(&mut self.err, &event)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
