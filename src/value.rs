//! Field value storage and store-value conversions.
//!
//! Every record field holds a [`FieldValue`]: a tagged union with one variant
//! per declared kind plus `Absent` for fields whose kind has no registered
//! default (or that were never set). Conversions to and from
//! `sea_query::Value` live here so the query builders and the populate path
//! share one coercion surface.

use chrono::{DateTime, NaiveDateTime};
use sea_query::{Expr, Value, ValueType};
use serde_json::Value as JsonValue;

use crate::error::RecordError;
use crate::record::Record;
use crate::schema::ColumnKind;

/// A date-time field value.
///
/// `Now` is a sentinel resolved by the store at write time (rendered as the
/// SQL `NOW()` expression); `At` is a concrete timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum DateTimeField {
    Now,
    At(NaiveDateTime),
}

impl DateTimeField {
    /// The Unix epoch as a concrete timestamp.
    pub fn epoch() -> Self {
        // from_timestamp(0, 0) is always in range.
        let epoch = DateTime::from_timestamp(0, 0)
            .map(|moment| moment.naive_utc())
            .unwrap_or_default();
        DateTimeField::At(epoch)
    }

    pub fn is_now(&self) -> bool {
        matches!(self, DateTimeField::Now)
    }
}

/// Runtime storage for one declared field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Object(Option<JsonValue>),
    Collection(Vec<JsonValue>),
    DateTime(DateTimeField),
    Nested(Box<Record>),
    Absent,
}

impl FieldValue {
    /// Whether this value is acceptable storage for the declared kind.
    ///
    /// `Absent` is acceptable everywhere; it models an unset field, not a
    /// typed value.
    pub fn matches(&self, kind: ColumnKind) -> bool {
        match (self, kind) {
            (FieldValue::Absent, _) => true,
            (FieldValue::Text(_), ColumnKind::Text) => true,
            (FieldValue::Integer(_), ColumnKind::Integer) => true,
            (FieldValue::Float(_), ColumnKind::Float) => true,
            (FieldValue::Boolean(_), ColumnKind::Boolean) => true,
            (FieldValue::Object(_), ColumnKind::Object) => true,
            (FieldValue::Collection(_), ColumnKind::Collection) => true,
            (FieldValue::DateTime(_), ColumnKind::DateTime) => true,
            (FieldValue::Nested(record), ColumnKind::Nested(descriptor)) => {
                std::ptr::eq(record.descriptor(), descriptor)
            }
            _ => false,
        }
    }

    /// Human-readable variant name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "string",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Object(_) => "object",
            FieldValue::Collection(_) => "array",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Nested(record) => record.descriptor().type_name,
            FieldValue::Absent => "absent",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Unset, empty text, a null object, or the `Now` sentinel: the values
    /// the populate-key validator treats as "not usable as a lookup key".
    /// The sentinel has no bindable value and would compare against nothing.
    pub(crate) fn is_unusable_key(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Object(object) => object.is_none(),
            FieldValue::DateTime(sentinel) => sentinel.is_now(),
            _ => false,
        }
    }

    /// Render this value as an expression for an insert or update value list.
    ///
    /// The `Now` sentinel becomes the SQL `NOW()` expression; a nested record
    /// is represented by its `id`; `Absent` binds a kind-appropriate NULL.
    /// Everything else binds the value itself.
    pub(crate) fn to_store_expr(&self, kind: ColumnKind) -> Expr {
        match self {
            FieldValue::Text(text) => Expr::val(text.clone()),
            FieldValue::Integer(value) => Expr::val(*value),
            FieldValue::Float(value) => Expr::val(*value),
            FieldValue::Boolean(value) => Expr::val(*value),
            FieldValue::Object(Some(object)) => Expr::val(object.clone()),
            FieldValue::Object(None) => Expr::val(Value::Json(None)),
            FieldValue::Collection(items) => Expr::val(JsonValue::Array(items.clone())),
            FieldValue::DateTime(DateTimeField::Now) => Expr::cust("NOW()"),
            FieldValue::DateTime(DateTimeField::At(moment)) => Expr::val(*moment),
            FieldValue::Nested(record) => Expr::val(record.id()),
            FieldValue::Absent => Expr::val(null_for(kind)),
        }
    }

    /// Coerce a value returned by the store onto a declared kind.
    ///
    /// Integer widths are widened, a textual timestamp is parsed, and a
    /// nested column's foreign id becomes a fresh nested record carrying that
    /// id. NULLs of any shape coerce to `Absent`.
    pub(crate) fn from_store_value(kind: ColumnKind, value: &Value) -> Result<Self, RecordError> {
        if is_null(value) {
            return Ok(FieldValue::Absent);
        }
        let mismatch = || RecordError::InvalidValueType {
            column: String::new(),
            expected: kind.name(),
            actual: format!("{value:?}"),
        };
        match kind {
            ColumnKind::Text => match value {
                Value::String(Some(text)) => Ok(FieldValue::Text(text.clone())),
                _ => Err(mismatch()),
            },
            ColumnKind::Integer => integer_of(value).map(FieldValue::Integer).ok_or_else(mismatch),
            ColumnKind::Float => match value {
                Value::Float(Some(v)) => Ok(FieldValue::Float(f64::from(*v))),
                Value::Double(Some(v)) => Ok(FieldValue::Float(*v)),
                _ => Err(mismatch()),
            },
            ColumnKind::Boolean => match value {
                Value::Bool(Some(v)) => Ok(FieldValue::Boolean(*v)),
                _ => Err(mismatch()),
            },
            ColumnKind::Object => <JsonValue as ValueType>::try_from(value.clone())
                .map(|object| FieldValue::Object(Some(object)))
                .map_err(|_| mismatch()),
            ColumnKind::Collection => match <JsonValue as ValueType>::try_from(value.clone()) {
                Ok(JsonValue::Array(items)) => Ok(FieldValue::Collection(items)),
                _ => Err(mismatch()),
            },
            ColumnKind::DateTime => {
                if let Ok(moment) = <NaiveDateTime as ValueType>::try_from(value.clone()) {
                    return Ok(FieldValue::DateTime(DateTimeField::At(moment)));
                }
                // Some stores hand timestamps back as text.
                if let Value::String(Some(text)) = value {
                    if let Ok(moment) =
                        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                    {
                        return Ok(FieldValue::DateTime(DateTimeField::At(moment)));
                    }
                }
                Err(mismatch())
            }
            ColumnKind::Nested(descriptor) => {
                let foreign_id = integer_of(value).ok_or_else(mismatch)?;
                let mut related = Record::new(descriptor);
                related.set("id", FieldValue::Integer(foreign_id))?;
                Ok(FieldValue::Nested(Box::new(related)))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(moment: NaiveDateTime) -> Self {
        FieldValue::DateTime(DateTimeField::At(moment))
    }
}

/// Kind-appropriate NULL for binding an absent field.
fn null_for(kind: ColumnKind) -> Value {
    match kind {
        ColumnKind::Text => Value::String(None),
        ColumnKind::Integer | ColumnKind::Nested(_) => Value::BigInt(None),
        ColumnKind::Float => Value::Double(None),
        ColumnKind::Boolean => Value::Bool(None),
        ColumnKind::Object | ColumnKind::Collection => Value::Json(None),
        ColumnKind::DateTime => Value::ChronoDateTime(None),
    }
}

fn is_null(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::String(None)
            | Value::Json(None)
            | Value::ChronoDateTime(None)
    )
}

/// Widen any integral store value to `i64`.
fn integer_of(value: &Value) -> Option<i64> {
    match value {
        Value::TinyInt(Some(v)) => Some(i64::from(*v)),
        Value::SmallInt(Some(v)) => Some(i64::from(*v)),
        Value::Int(Some(v)) => Some(i64::from(*v)),
        Value::BigInt(Some(v)) => Some(*v),
        Value::TinyUnsigned(Some(v)) => Some(i64::from(*v)),
        Value::SmallUnsigned(Some(v)) => Some(i64::from(*v)),
        Value::Unsigned(Some(v)) => Some(i64::from(*v)),
        // Fully qualified: ValueType is in scope and also defines try_from.
        Value::BigUnsigned(Some(v)) => <i64 as TryFrom<u64>>::try_from(*v).ok(),
        _ => None,
    }
}
