use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    iter::FusedIterator,
    path::Path,
};

use log::debug;
use sieve_fs::FileRecord;

use crate::dsl::{Comparator, FilterOptions, Predicate, build_filter, build_order};
use crate::error::{SectionError, StructureError, Warning};

pub const FILTER_HEADER: &str = "FILTER";
pub const ORDER_HEADER: &str = "ORDER";

/// Where the reader is inside the command stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Between sections; the next line should be `FILTER`.
    Ready,
    AwaitingFilterName,
    AwaitingOrderHeader,
    AwaitingOrderName,
    /// Clean end of input.
    Exhausted,
    /// A structural error or read failure ended the stream.
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub filter: FilterOptions,
}

/// One parsed `FILTER`/`ORDER` pair.
///
/// A half whose directive was rejected holds the default (`all` or
/// ascending `abs`) and the rejection is listed in `warnings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub predicate: Predicate,
    pub comparator: Comparator,
    pub warnings: Vec<Warning>,
}

impl Section {
    /// Files matching the predicate, sorted by the comparator.
    pub fn apply<'a>(&self, records: &'a [FileRecord]) -> Vec<&'a FileRecord> {
        let mut selected: Vec<&FileRecord> = records
            .iter()
            .filter(|rec| self.predicate.test(rec))
            .collect();
        selected.sort_by(|a, b| self.comparator.compare(a, b));
        selected
    }
}

/// Line counter and position of one pass over a command stream.
#[derive(Debug, Clone, Copy)]
struct ParseState {
    /// Lines consumed so far (the last consumed line's 1-based number).
    line: usize,
    state: ReaderState,
}

/// Reads sections from a command stream one at a time.
pub struct SectionReader<R> {
    input: R,
    parse: ParseState,
    options: ParseOptions,
}

impl SectionReader<BufReader<File>> {
    pub fn open(path: &Path, options: ParseOptions) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::with_options(BufReader::new(file), options))
    }
}

impl<R: BufRead> SectionReader<R> {
    pub fn new(input: R) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: R, options: ParseOptions) -> Self {
        Self {
            input,
            parse: ParseState {
                line: 0,
                state: ReaderState::Ready,
            },
            options,
        }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.parse.line
    }

    pub fn state(&self) -> ReaderState {
        self.parse.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.parse.state,
            ReaderState::Exhausted | ReaderState::Fatal
        )
    }

    /// Read the next section.
    ///
    /// Returns `Ok(None)` at a clean end of input. After `Ok(None)` or an
    /// error, every further call returns `Ok(None)`.
    pub fn next_section(&mut self) -> Result<Option<Section>, SectionError> {
        if self.is_finished() {
            return Ok(None);
        }

        self.read_section().inspect_err(|e| {
            debug!("[section] fatal at line {}: {e}", e.line());
            self.parse.state = ReaderState::Fatal;
        })
    }

    fn read_section(&mut self) -> Result<Option<Section>, SectionError> {
        let Some(header) = self.read_line()? else {
            debug!("[section] end of input after {} lines", self.parse.line);
            self.parse.state = ReaderState::Exhausted;
            return Ok(None);
        };
        if header != FILTER_HEADER {
            return Err(self.structure(StructureError::MissingFilterHeader { found: header }));
        }
        self.parse.state = ReaderState::AwaitingFilterName;

        let Some(filter_line) = self.read_line()? else {
            return Err(self.structure(StructureError::MissingFilterDirective));
        };

        let mut warnings = Vec::new();
        let predicate = match build_filter(&filter_line, self.options.filter) {
            Ok(pred) => pred,
            Err(error) => {
                debug!("[section] line {}: filter falls back to all", self.parse.line);
                warnings.push(Warning {
                    line: self.parse.line,
                    error,
                });
                Predicate::all()
            }
        };
        self.parse.state = ReaderState::AwaitingOrderHeader;

        match self.read_line()? {
            Some(line) if line == ORDER_HEADER => {}
            found => {
                return Err(self.structure(StructureError::MissingOrderHeader { found }));
            }
        }
        self.parse.state = ReaderState::AwaitingOrderName;

        let Some(order_line) = self.read_line()? else {
            return Err(self.structure(StructureError::MissingOrderDirective));
        };

        let comparator = match build_order(&order_line) {
            Ok(cmp) => cmp,
            Err(error) => {
                debug!("[section] line {}: order falls back to abs", self.parse.line);
                warnings.push(Warning {
                    line: self.parse.line,
                    error,
                });
                Comparator::abs()
            }
        };
        self.parse.state = ReaderState::Ready;

        Ok(Some(Section {
            predicate,
            comparator,
            warnings,
        }))
    }

    /// Consume one line without its terminator. `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, SectionError> {
        let mut buf = String::new();
        let n = self
            .input
            .read_line(&mut buf)
            .map_err(|source| SectionError::Io {
                line: self.parse.line,
                source,
            })?;
        if n == 0 {
            return Ok(None);
        }

        self.parse.line += 1;
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }

    fn structure(&self, kind: StructureError) -> SectionError {
        SectionError::Structure {
            line: self.parse.line,
            kind,
        }
    }
}

impl<R: BufRead> Iterator for SectionReader<R> {
    type Item = Result<Section, SectionError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_section().transpose()
    }
}

impl<R: BufRead> FusedIterator for SectionReader<R> {}

#[cfg(test)]
#[path = "section_tests.rs"]
mod tests;
