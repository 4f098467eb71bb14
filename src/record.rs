//! The active-record base entity.
//!
//! A `Record` is constructed from a static [`RecordDescriptor`]; construction
//! runs the derivation chain once (scan declarations, build column metadata,
//! assign defaults, resolve the table name) and the result is fixed for the
//! instance's lifetime. The three store operations (insert, populate, update)
//! read the derived metadata and the live field values, then delegate the
//! assembled statement to the [`crate::StoreClient`] in the supplied context.

use crate::error::RecordError;
use crate::query;
use crate::schema::{self, ColumnKind, ColumnMetadata, RecordDescriptor};
use crate::store::StoreContext;
use crate::value::FieldValue;

#[derive(Debug, Clone, PartialEq)]
struct Field {
    name: &'static str,
    kind: ColumnKind,
    value: FieldValue,
}

/// One record instance: derived schema plus live field values.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    descriptor: &'static RecordDescriptor,
    table_name: String,
    columns: ColumnMetadata,
    populate_key: Option<String>,
    fields: Vec<Field>,
}

impl Record {
    /// Construct a record, deriving its schema from the descriptor.
    ///
    /// Every declared field is created with its kind's canonical default;
    /// fields whose kind has no registered default (nested record types)
    /// start absent rather than holding a dummy value.
    pub fn new(descriptor: &'static RecordDescriptor) -> Self {
        let columns = ColumnMetadata::derive(descriptor.fields);
        let table_name = schema::table_name::resolve(descriptor.type_name);
        let fields = descriptor
            .fields
            .iter()
            .map(|declaration| Field {
                name: declaration.name,
                kind: declaration.kind,
                value: schema::default_for(declaration.kind).unwrap_or(FieldValue::Absent),
            })
            .collect();
        log::debug!(
            "record constructed: type={} table={}",
            descriptor.type_name,
            table_name
        );
        Self {
            descriptor,
            table_name,
            columns,
            populate_key: descriptor.populate_key.map(str::to_string),
            fields,
        }
    }

    pub fn descriptor(&self) -> &'static RecordDescriptor {
        self.descriptor
    }

    /// The derived storage table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The derived column metadata (declaration order, collections excluded).
    pub fn columns(&self) -> &ColumnMetadata {
        &self.columns
    }

    pub fn foreign_keys(&self) -> &'static [&'static str] {
        self.descriptor.foreign_keys
    }

    /// The field name used for keyed lookup, if any.
    pub fn populate_key(&self) -> Option<&str> {
        self.populate_key.as_deref()
    }

    /// Override the lookup field for this instance.
    pub fn set_populate_key(&mut self, name: impl Into<String>) {
        self.populate_key = Some(name.into());
    }

    /// Read a field's current value. `None` means no such field is declared;
    /// a declared-but-unset field reads as [`FieldValue::Absent`].
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Whether a declared field currently holds a value.
    pub fn is_set(&self, name: &str) -> bool {
        matches!(self.get(name), Some(value) if !value.is_absent())
    }

    /// Assign a field, enforcing the declared kind.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        let value = value.into();
        let field = self
            .fields
            .iter_mut()
            .find(|field| field.name == name)
            .ok_or_else(|| RecordError::FieldNotFound(name.to_string()))?;
        if !value.matches(field.kind) {
            return Err(RecordError::InvalidValueType {
                column: name.to_string(),
                expected: field.kind.name(),
                actual: value.kind_name().to_string(),
            });
        }
        field.value = value;
        Ok(())
    }

    /// Clear a field back to absent.
    pub fn unset(&mut self, name: &str) -> Result<(), RecordError> {
        let field = self
            .fields
            .iter_mut()
            .find(|field| field.name == name)
            .ok_or_else(|| RecordError::FieldNotFound(name.to_string()))?;
        field.value = FieldValue::Absent;
        Ok(())
    }

    /// Construct a fresh related record in a nested field and return it for
    /// mutation. The field must be declared with a nested kind.
    pub fn embed(&mut self, name: &str) -> Result<&mut Record, RecordError> {
        let field = self
            .fields
            .iter_mut()
            .find(|field| field.name == name)
            .ok_or_else(|| RecordError::FieldNotFound(name.to_string()))?;
        let ColumnKind::Nested(descriptor) = field.kind else {
            return Err(RecordError::InvalidValueType {
                column: name.to_string(),
                expected: "nested record",
                actual: field.kind.name().to_string(),
            });
        };
        field.value = FieldValue::Nested(Box::new(Record::new(descriptor)));
        match &mut field.value {
            FieldValue::Nested(record) => Ok(record),
            // Just assigned above.
            _ => unreachable!(),
        }
    }

    /// The identity field, `0` when unset.
    pub fn id(&self) -> i64 {
        match self.get("id") {
            Some(FieldValue::Integer(id)) => *id,
            _ => 0,
        }
    }

    pub(crate) fn set_id(&mut self, id: i64) {
        // Base descriptors always declare `id`; a descriptor without one
        // simply never stores a generated key.
        let _ = self.set("id", FieldValue::Integer(id));
    }

    /// Coerce a store-returned column value to the matching field's declared
    /// kind, without mutating the record. Columns the record does not declare
    /// coerce to `None` and are ignored by the caller.
    pub(crate) fn coerce_store_value(
        &self,
        name: &str,
        value: &sea_query::Value,
    ) -> Result<Option<FieldValue>, RecordError> {
        let Some(kind) = self.fields.iter().find(|field| field.name == name).map(|f| f.kind)
        else {
            log::debug!("populate: ignoring undeclared column {name}");
            return Ok(None);
        };
        FieldValue::from_store_value(kind, value)
            .map(Some)
            .map_err(|error| match error {
                RecordError::InvalidValueType { expected, actual, .. } => {
                    RecordError::InvalidValueType {
                        column: name.to_string(),
                        expected,
                        actual,
                    }
                }
                other => other,
            })
    }

    /// Render the record's live field values as JSON, keyed by field name.
    /// Absent fields are omitted; the `Now` sentinel renders as `"NOW()"`.
    pub fn to_json(&self) -> serde_json::Value {
        use crate::value::DateTimeField;
        let mut object = serde_json::Map::new();
        for field in &self.fields {
            let rendered = match &field.value {
                FieldValue::Text(text) => serde_json::Value::String(text.clone()),
                FieldValue::Integer(value) => serde_json::Value::from(*value),
                FieldValue::Float(value) => serde_json::Value::from(*value),
                FieldValue::Boolean(value) => serde_json::Value::Bool(*value),
                FieldValue::Object(Some(value)) => value.clone(),
                FieldValue::Object(None) => serde_json::Value::Null,
                FieldValue::Collection(items) => serde_json::Value::Array(items.clone()),
                FieldValue::DateTime(DateTimeField::Now) => {
                    serde_json::Value::String("NOW()".to_string())
                }
                FieldValue::DateTime(DateTimeField::At(moment)) => {
                    serde_json::Value::String(moment.to_string())
                }
                FieldValue::Nested(record) => record.to_json(),
                FieldValue::Absent => continue,
            };
            object.insert(field.name.to_string(), rendered);
        }
        serde_json::Value::Object(object)
    }

    /// Insert this record's current values as a new row.
    ///
    /// The generated identity key is written back into `id` and returned.
    /// This is a non-idempotent operation: invoking it again inserts a
    /// duplicate row.
    pub fn insert(&mut self, ctx: &StoreContext<'_>) -> Result<i64, RecordError> {
        query::insert::run(self, ctx)
    }

    /// Load one row by this record's populate key, applying it to `target`.
    ///
    /// Returns `Ok(false)` when no row matched (nothing is mutated) and
    /// `Ok(true)` when a row was applied. A returned `created` column is
    /// written onto this record rather than the target. Validation failures
    /// are reported through the context's error reporter as fatal and then
    /// surfaced as [`RecordError::Validation`].
    pub fn populate(
        &mut self,
        target: &mut Record,
        modifiers: &[(&str, &str)],
        ctx: &StoreContext<'_>,
    ) -> Result<bool, RecordError> {
        query::select::run(self, target, modifiers, ctx)
    }

    /// Push every column's current value outward as a full-row update,
    /// scoped by the current `id`. No local state changes.
    pub fn update(&self, ctx: &StoreContext<'_>) -> Result<(), RecordError> {
        query::update::run(self, ctx)
    }
}
