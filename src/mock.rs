//! Test doubles for the external collaborators.
//!
//! `MockStore` records every submitted statement and replays scripted select
//! results; `CollectingReporter` captures validation reports. Both are used
//! by this crate's own tests and are exported for downstream test suites.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use sea_query::Values;

use crate::error::{ErrorReport, ErrorReporter};
use crate::store::{Row, StoreClient, StoreError};

/// Which store entry point a statement went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Insert,
    Select,
    Write,
}

/// One statement as submitted to the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedStatement {
    pub kind: StatementKind,
    pub sql: String,
    pub values: Values,
}

/// In-memory store client for tests.
///
/// Select results are consumed front to back, one scripted result per call;
/// a call with nothing scripted returns zero rows. Generated insert ids count
/// up from the configured start.
#[derive(Debug, Default)]
pub struct MockStore {
    statements: RefCell<Vec<RecordedStatement>>,
    select_results: RefCell<VecDeque<Vec<Row>>>,
    next_id: Cell<i64>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            statements: RefCell::new(Vec::new()),
            select_results: RefCell::new(VecDeque::new()),
            next_id: Cell::new(1),
        }
    }

    /// Script the rows the next select call returns.
    pub fn with_select_result(self, rows: Vec<Row>) -> Self {
        self.select_results.borrow_mut().push_back(rows);
        self
    }

    /// Set the id the next insert call generates.
    pub fn with_generated_id(self, id: i64) -> Self {
        self.next_id.set(id);
        self
    }

    pub fn push_select_result(&self, rows: Vec<Row>) {
        self.select_results.borrow_mut().push_back(rows);
    }

    /// Everything submitted so far, in order.
    pub fn statements(&self) -> Vec<RecordedStatement> {
        self.statements.borrow().clone()
    }

    pub fn last_sql(&self) -> Option<String> {
        self.statements
            .borrow()
            .last()
            .map(|statement| statement.sql.clone())
    }

    fn record(&self, kind: StatementKind, sql: &str, values: &Values) {
        self.statements.borrow_mut().push(RecordedStatement {
            kind,
            sql: sql.to_string(),
            values: values.clone(),
        });
    }
}

impl StoreClient for MockStore {
    fn insert(&self, sql: &str, params: &Values) -> Result<i64, StoreError> {
        self.record(StatementKind::Insert, sql, params);
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Ok(id)
    }

    fn select(&self, sql: &str, params: &Values) -> Result<Vec<Row>, StoreError> {
        self.record(StatementKind::Select, sql, params);
        Ok(self
            .select_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_default())
    }

    fn write(&self, sql: &str, params: &Values) -> Result<u64, StoreError> {
        self.record(StatementKind::Write, sql, params);
        Ok(1)
    }
}

/// An owned copy of one reported error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedReport {
    pub message: String,
    pub type_name: String,
    pub operation: String,
    pub location: String,
    pub fatal: bool,
}

/// Reporter that captures reports for assertion.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    reports: RefCell<Vec<CapturedReport>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<CapturedReport> {
        self.reports.borrow().clone()
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, report: ErrorReport<'_>) {
        self.reports.borrow_mut().push(CapturedReport {
            message: report.message.to_string(),
            type_name: report.type_name.to_string(),
            operation: report.operation.to_string(),
            location: report.location.to_string(),
            fatal: report.fatal,
        });
    }
}
