//! # recbase
//!
//! Minimal active-record base for SQL stores.
//!
//! A record type is described by a static [`RecordDescriptor`]; constructing
//! a [`Record`] derives its column metadata, defaults, and storage table name
//! once, and the record then drives three generic operations (insert, keyed
//! populate, and full-row update) against an external [`StoreClient`]
//! through an explicit [`StoreContext`].
//!
//! ```no_run
//! use recbase::{
//!     ColumnKind, FieldDeclaration, LogReporter, Record, RecordDescriptor, Session,
//!     StoreContext,
//! };
//!
//! static WIDGET_FIELDS: [FieldDeclaration; 5] = [
//!     FieldDeclaration::new("id", ColumnKind::Integer),
//!     FieldDeclaration::new("created", ColumnKind::DateTime),
//!     FieldDeclaration::new("modified", ColumnKind::DateTime),
//!     FieldDeclaration::new("deleted", ColumnKind::DateTime),
//!     FieldDeclaration::new("name", ColumnKind::Text),
//! ];
//!
//! static WIDGET: RecordDescriptor = RecordDescriptor {
//!     type_name: "Shop_Models_Widgets",
//!     fields: &WIDGET_FIELDS,
//!     populate_key: Some("id"),
//!     foreign_keys: &[],
//! };
//!
//! # fn main() -> Result<(), recbase::RecordError> {
//! # let client: &dyn recbase::StoreClient = unimplemented!();
//! let session = Session::new(42);
//! let reporter = LogReporter;
//! let ctx = StoreContext::new(client, &session, &reporter);
//!
//! let mut widget = Record::new(&WIDGET);
//! widget.set("name", "Bolt")?;
//! let id = widget.insert(&ctx)?;
//!
//! let mut fetched = Record::new(&WIDGET);
//! let mut probe = Record::new(&WIDGET);
//! probe.set("id", id)?;
//! probe.populate(&mut fetched, &[("limit", "1")], &ctx)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mock;
mod query;
pub mod record;
pub mod schema;
pub mod session;
pub mod store;
pub mod value;

#[cfg(test)]
mod tests_cfg;

pub use error::{ErrorReport, ErrorReporter, LogReporter, RecordError};
pub use record::Record;
pub use schema::{ColumnKind, ColumnMetadata, FieldDeclaration, RecordDescriptor, BASE_FIELDS};
pub use session::Session;
pub use store::{Row, StoreClient, StoreContext, StoreError};
pub use value::{DateTimeField, FieldValue};

// Statements and bound values are expressed in sea_query terms; re-export it
// so store clients do not need their own pin.
pub use sea_query;
