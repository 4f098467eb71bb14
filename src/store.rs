//! Store client seam: the external collaborator that executes statements.
//!
//! The crate assembles `(sql, values)` pairs with bound parameters and hands
//! them to a [`StoreClient`]. Connection lifecycle, transactions, and retries
//! all live behind this trait; the core performs blocking calls and surfaces
//! whatever the client raises.

use std::fmt;

use sea_query::{Value, Values};

use crate::error::ErrorReporter;
use crate::session::Session;

/// Error raised by a store client.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The client could not reach the store.
    Connection(String),
    /// The store rejected or failed the statement.
    Execution(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Connection(message) => write!(f, "Connection error: {message}"),
            StoreError::Execution(message) => write!(f, "Execution error: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// One fetched row: an ordered column-name to value mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(column, value)` pairs, preserving order.
    pub fn from_pairs<N, I>(pairs: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Value)>,
    {
        Self {
            columns: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.columns.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Trait for executing assembled statements against the store.
///
/// Implementations are expected to bind `params` positionally against the
/// placeholders in `sql`.
pub trait StoreClient {
    /// Execute an INSERT and return the store-generated identity key.
    fn insert(&self, sql: &str, params: &Values) -> Result<i64, StoreError>;

    /// Execute a SELECT and return zero or more rows, in store order.
    fn select(&self, sql: &str, params: &Values) -> Result<Vec<Row>, StoreError>;

    /// Execute a generic write statement; returns the affected row count.
    fn write(&self, sql: &str, params: &Values) -> Result<u64, StoreError>;
}

/// Explicit per-call context: the store client, the current session, and the
/// error reporter. Replaces any process-wide connection or user singleton.
pub struct StoreContext<'a> {
    pub client: &'a dyn StoreClient,
    pub session: &'a Session,
    pub reporter: &'a dyn ErrorReporter,
}

impl<'a> StoreContext<'a> {
    pub fn new(
        client: &'a dyn StoreClient,
        session: &'a Session,
        reporter: &'a dyn ErrorReporter,
    ) -> Self {
        Self {
            client,
            session,
            reporter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_lookup_is_by_name() {
        let row = Row::from_pairs(vec![
            ("id", Value::BigInt(Some(3))),
            ("name", Value::String(Some("bolt".to_string()))),
        ]);
        assert_eq!(row.get("id"), Some(&Value::BigInt(Some(3))));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn row_preserves_column_order() {
        let mut row = Row::new();
        row.push("b", Value::Int(Some(2)));
        row.push("a", Value::Int(Some(1)));
        let names: Vec<_> = row.iter().map(|(name, _)| name.to_string()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn store_error_display_is_prefixed() {
        assert_eq!(
            StoreError::Execution("nope".to_string()).to_string(),
            "Execution error: nope"
        );
    }
}
