//! # Error Types
//!
//! Centralized error definitions for the simple-testing crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.
//!
//! Mismatches and failing operations are *not* errors here: they are
//! recovered inside a batch and reported as case outcomes. Only conditions
//! that terminate the calling operation live in these enums.

use std::io;
use thiserror::Error;

/// Unified error type for evaluation calls.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Length mismatch: {cases} test cases but {expected} expected results")]
    LengthMismatch { cases: usize, expected: usize },

    #[error("Assertion failed for case {index}: expected {expected}, but got {actual}")]
    AssertionFailed {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Logger(LoggerError),
}

impl From<LoggerError> for EvalError {
    fn from(e: LoggerError) -> Self {
        EvalError::Logger(e)
    }
}

impl EvalError {
    /// True when the error came from a failed write rather than from the cases.
    pub fn is_io(&self) -> bool {
        matches!(self, EvalError::Logger(_))
    }
}

/// Sink write failures
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("I/O error writing log file {path}: {source}")]
    FileWrite {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error writing to console: {0}")]
    Console(#[source] io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to load configuration from {path}: {msg}")]
    Load { path: String, msg: String },
}
