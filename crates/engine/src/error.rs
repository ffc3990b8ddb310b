//! Error types for the command language.
//!
//! Two severities exist. [`DirectiveError`] covers a single bad directive
//! line; the section reader turns it into a [`Warning`] and substitutes a
//! default. [`SectionError`] covers a broken section layout or an
//! unreadable stream and ends the run.

use std::{fmt, io};

use thiserror::Error;

/// Why a directive's parameters were rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxReason {
    #[error("expected {expected} parameter(s), found {found}")]
    WrongParamCount { expected: usize, found: usize },
    #[error("size value {0:?} must be non-negative")]
    NegativeSize(String),
    #[error("{0:?} is not a valid size")]
    InvalidSize(String),
    #[error("lower bound {min} exceeds upper bound {max}")]
    InvertedBounds { min: u64, max: u64 },
    #[error("{0} may appear only once")]
    RepeatedModifier(&'static str),
    #[error("unexpected token {0:?}")]
    UnexpectedToken(String),
}

/// A recoverable problem with one directive line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("unknown filter name {0:?}")]
    UnknownFilterName(String),
    #[error("illegal {kind} filter: {reason}")]
    IllegalFilterSyntax {
        kind: &'static str,
        reason: SyntaxReason,
    },
    #[error("{kind} filter expects YES or NO, got {value:?}")]
    InvalidBooleanLiteral { kind: &'static str, value: String },
    #[error("unknown order name {0:?}")]
    UnknownOrderName(String),
    #[error("illegal {kind} order: {reason}")]
    IllegalOrderSyntax {
        kind: &'static str,
        reason: SyntaxReason,
    },
}

/// A directive error together with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub line: usize,
    pub error: DirectiveError,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// Layout violations of the command stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("FILTER subsection is missing (found {found:?})")]
    MissingFilterHeader { found: String },
    #[error("FILTER subsection has no filter directive")]
    MissingFilterDirective,
    #[error("ORDER subsection is missing (found {})", found_or_eof(.found))]
    MissingOrderHeader { found: Option<String> },
    #[error("ORDER subsection has no order directive")]
    MissingOrderDirective,
}

fn found_or_eof(found: &Option<String>) -> String {
    match found {
        Some(line) => format!("{line:?}"),
        None => "end of input".to_owned(),
    }
}

/// A fatal error: the run stops and the current section produces no output.
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("line {line}: {kind}")]
    Structure {
        line: usize,
        #[source]
        kind: StructureError,
    },
    #[error("line {line}: failed to read command stream: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
}

impl SectionError {
    /// Line number the failure is attributed to.
    pub fn line(&self) -> usize {
        match self {
            SectionError::Structure { line, .. } | SectionError::Io { line, .. } => *line,
        }
    }
}
