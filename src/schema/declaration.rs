//! Static field declarations and record descriptors.
//!
//! Each record type registers one `static RecordDescriptor` listing its
//! fields in declaration order. The descriptor replaces runtime reflection:
//! everything the construction chain and the query builders need is known
//! up front.

/// Primitive kind of a declared field.
///
/// `Collection` declares non-persisted, declaration-only storage: the field
/// exists on the record but is excluded from column metadata and from every
/// generated statement. `Nested` embeds a related record type by descriptor;
/// when a nested column reaches a statement it is represented by the nested
/// record's `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Float,
    Boolean,
    Object,
    Collection,
    DateTime,
    Nested(&'static RecordDescriptor),
}

impl ColumnKind {
    /// Human-readable kind name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnKind::Text => "string",
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Object => "object",
            ColumnKind::Collection => "array",
            ColumnKind::DateTime => "datetime",
            ColumnKind::Nested(descriptor) => descriptor.type_name,
        }
    }
}

/// A single declared field: column name plus primitive kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl FieldDeclaration {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// Static description of a record type.
///
/// `type_name` is the record type's full identifier (possibly
/// namespace-qualified with `_` separators); the storage table name is
/// derived from it at construction. `populate_key` names the field used for
/// keyed lookup and may be overridden per instance.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordDescriptor {
    pub type_name: &'static str,
    pub fields: &'static [FieldDeclaration],
    pub populate_key: Option<&'static str>,
    pub foreign_keys: &'static [&'static str],
}

/// The columns every record type declares first: the store-assigned identity
/// and the three lifecycle timestamps.
pub const BASE_FIELDS: [FieldDeclaration; 4] = [
    FieldDeclaration::new("id", ColumnKind::Integer),
    FieldDeclaration::new("created", ColumnKind::DateTime),
    FieldDeclaration::new("modified", ColumnKind::DateTime),
    FieldDeclaration::new("deleted", ColumnKind::DateTime),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_match_declared_types() {
        assert_eq!(ColumnKind::Text.name(), "string");
        assert_eq!(ColumnKind::Integer.name(), "integer");
        assert_eq!(ColumnKind::Float.name(), "float");
        assert_eq!(ColumnKind::Boolean.name(), "boolean");
        assert_eq!(ColumnKind::Object.name(), "object");
        assert_eq!(ColumnKind::Collection.name(), "array");
        assert_eq!(ColumnKind::DateTime.name(), "datetime");
    }

    #[test]
    fn nested_kind_reports_descriptor_type_name() {
        static RELATED: RecordDescriptor = RecordDescriptor {
            type_name: "App_Models_Accounts",
            fields: &BASE_FIELDS,
            populate_key: None,
            foreign_keys: &[],
        };
        assert_eq!(ColumnKind::Nested(&RELATED).name(), "App_Models_Accounts");
    }

    #[test]
    fn base_fields_lead_with_identity_then_timestamps() {
        assert_eq!(BASE_FIELDS[0].name, "id");
        assert_eq!(BASE_FIELDS[0].kind, ColumnKind::Integer);
        for field in &BASE_FIELDS[1..] {
            assert_eq!(field.kind, ColumnKind::DateTime);
        }
    }
}
