//! Error types for reading and writing circuit text.

use std::fmt;
use std::io;

use thiserror::Error;
use trigate_core::{BuildError, ValidityError};

/// Part of the file being read when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// `CIRCUITO` line with the three counts.
    Header,
    /// `PORTAS` block.
    Gates,
    /// `SAIDAS` block.
    Outputs,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Header => "header",
            Section::Gates => "gate list",
            Section::Outputs => "output list",
        })
    }
}

/// Errors that can occur while reading or writing circuit text.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Input ended before the description was complete.
    #[error("unexpected end of input in {0}")]
    UnexpectedEof(Section),

    /// A section keyword was missing or misspelled.
    #[error("expected {expected:?}, found {found:?}")]
    ExpectedKeyword {
        expected: &'static str,
        found: String,
    },

    /// A token that should be an integer was not.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    /// A header count was zero or negative.
    #[error("{what} count must be positive, got {value}")]
    InvalidCount { what: &'static str, value: i64 },

    /// A line did not start with the expected `<index>)` prefix.
    #[error("expected index {expected}), found {found:?}")]
    BadIndex { expected: usize, found: String },

    /// Unrecognised gate type tag.
    #[error("unknown gate kind {0:?}")]
    UnknownGateKind(String),

    /// The `:` after a gate's arity was missing.
    #[error("expected ':' after arity, found {0:?}")]
    MissingColon(String),

    /// A gate line was rejected (bad arity or zero source).
    #[error("gate {position}: {source}")]
    InvalidGate {
        position: usize,
        #[source]
        source: BuildError,
    },

    /// An output origin is zero or out of range.
    #[error("output {output} has invalid origin {id}")]
    InvalidOutputOrigin { output: usize, id: i32 },

    /// A declared size exceeds the configured limits.
    #[error("{what} {value} exceeds limit {limit}")]
    LimitExceeded {
        what: &'static str,
        value: usize,
        limit: usize,
    },

    /// Mutating the circuit under construction failed.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Refused to write a circuit that fails validation.
    #[error("cannot write invalid circuit: {0}")]
    InvalidCircuit(#[from] ValidityError),
}
