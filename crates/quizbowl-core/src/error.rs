//! Structured error types for bank parsing and session control.
//!
//! Defined in `quizbowl-core` so callers can match on failure kinds (retry a
//! bad selection, abort on a malformed bank) without string matching.

use thiserror::Error;

use crate::engine::SessionState;

/// Errors that abort loading a question bank.
///
/// Block numbers are 1-based question positions; line numbers are 1-based
/// positions in the whole source.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// The source had no lines at all, not even a count line.
    #[error("bank source is empty")]
    EmptySource,

    /// The first line was not a non-negative integer.
    #[error("line {line}: malformed question count: '{found}'")]
    MalformedCount { line: usize, found: String },

    /// A block header was not `<TYPE> <points>` with a known type and
    /// positive points.
    #[error("question {block} (line {line}): malformed header: '{found}'")]
    MalformedHeader {
        block: usize,
        line: usize,
        found: String,
    },

    /// A line inside a block did not have the shape the grammar requires.
    #[error("question {block} (line {line}): expected {expected}, found '{found}'")]
    MalformedBlock {
        block: usize,
        line: usize,
        expected: &'static str,
        found: String,
    },

    /// The source ended in the middle of a block.
    #[error("question {block}: unexpected end of input, expected {expected}")]
    UnexpectedEof {
        block: usize,
        expected: &'static str,
    },
}

/// Rejected question-count input. Recoverable: the caller may re-prompt.
#[derive(Debug, Clone, Error)]
pub enum SelectionError {
    /// The input did not parse as an integer.
    #[error("not a number: '{0}'")]
    NotANumber(String),

    /// The input was an integer outside `1..=available`.
    #[error("requested {requested} of {available} available questions")]
    OutOfRange { requested: i64, available: usize },
}

/// Errors from driving a session out of order.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// `start` was called before a selection was recorded.
    #[error("no question selection recorded")]
    NoSelection,

    /// An operation was invoked in the wrong lifecycle state.
    #[error("session is {actual}, expected {expected}")]
    WrongState {
        expected: SessionState,
        actual: SessionState,
    },
}
