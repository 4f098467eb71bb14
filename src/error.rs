//! Error types and the external error-reporting seam.

use std::fmt;

use crate::store::StoreError;

/// Error type for record operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    /// A populate-key or modifier validation failure. These are reported
    /// through the [`ErrorReporter`] as fatal before the error is returned.
    Validation { operation: &'static str, message: String },
    /// A named field does not exist on the record.
    FieldNotFound(String),
    /// A value does not match the field's declared kind.
    InvalidValueType {
        column: String,
        expected: &'static str,
        actual: String,
    },
    /// Statement assembly failed.
    QueryBuild(String),
    /// The store client reported a failure.
    Store(StoreError),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Validation { operation, message } => {
                write!(f, "Validation error in {operation}: {message}")
            }
            RecordError::FieldNotFound(name) => {
                write!(f, "Field not found: {name}")
            }
            RecordError::InvalidValueType {
                column,
                expected,
                actual,
            } => write!(
                f,
                "Invalid value type for column {column}: expected {expected}, got {actual}"
            ),
            RecordError::QueryBuild(message) => {
                write!(f, "Query build error: {message}")
            }
            RecordError::Store(error) => {
                write!(f, "Store error: {error}")
            }
        }
    }
}

impl std::error::Error for RecordError {}

impl From<StoreError> for RecordError {
    fn from(error: StoreError) -> Self {
        RecordError::Store(error)
    }
}

/// One validation report, handed to the external reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport<'a> {
    pub message: &'a str,
    /// The record type the failure originated from.
    pub type_name: &'a str,
    /// The operation that was being validated (`populate`, ...).
    pub operation: &'a str,
    /// Source location of the failing check, `file:line`.
    pub location: &'a str,
    /// Always `true` from this crate; fatal reports are expected to halt the
    /// surrounding request once the returned error propagates.
    pub fatal: bool,
}

/// External error-reporting collaborator.
///
/// The crate performs no recovery of its own: every fatal validation failure
/// is reported here once and then surfaced as [`RecordError::Validation`].
pub trait ErrorReporter {
    fn report(&self, report: ErrorReport<'_>);
}

/// Default reporter that forwards to the `log` crate.
#[derive(Debug, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, report: ErrorReport<'_>) {
        log::error!(
            "{} (type: {}, operation: {}, at: {}, fatal: {})",
            report.message,
            report.type_name,
            report.operation,
            report.location,
            report.fatal
        );
    }
}
