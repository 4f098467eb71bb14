//! Statement assembly for the three record operations.
//!
//! Each submodule builds one statement shape from a record's derived column
//! metadata and live field values, then submits it through the store client
//! in the supplied context:
//! - **insert**: column/value lists, identity and collection columns
//!   skipped, `created`/`user_id` overrides applied
//! - **select**: the keyed "populate" path with its validation state machine
//! - **update**: full-row SET list scoped by `id`
//!
//! All three bind values as parameters via `sea_query`; no value is ever
//! concatenated into statement text.

pub(crate) mod insert;
pub(crate) mod select;
pub(crate) mod update;

use sea_query::Iden;

/// Runtime-named SQL identifier (table or column name).
pub(crate) struct SqlIdent(pub String);

impl Iden for SqlIdent {
    fn unquoted(&self) -> &str {
        &self.0
    }
}

pub(crate) fn ident(name: &str) -> SqlIdent {
    SqlIdent(name.to_string())
}
