//! Canonical default values per declared kind.

use crate::schema::declaration::ColumnKind;
use crate::value::{DateTimeField, FieldValue};

/// Resolve the canonical default for a declared kind.
///
/// Recognized kinds map to their zero-ish value; date-time fields default to
/// the `Now` sentinel, which the store resolves at write time rather than a
/// locally computed timestamp. Nested kinds have no registered default and
/// return `None`: the field stays absent until a related record is embedded
/// explicitly (see [`crate::Record::embed`]).
pub fn default_for(kind: ColumnKind) -> Option<FieldValue> {
    match kind {
        ColumnKind::Text => Some(FieldValue::Text(String::new())),
        ColumnKind::Integer => Some(FieldValue::Integer(0)),
        ColumnKind::Float => Some(FieldValue::Float(0.0)),
        ColumnKind::Boolean => Some(FieldValue::Boolean(false)),
        ColumnKind::Object => Some(FieldValue::Object(None)),
        ColumnKind::Collection => Some(FieldValue::Collection(Vec::new())),
        ColumnKind::DateTime => Some(FieldValue::DateTime(DateTimeField::Now)),
        ColumnKind::Nested(_) => None,
    }
}
