//! Shared test fixtures: record descriptors used across unit tests.

use crate::schema::{ColumnKind, FieldDeclaration, RecordDescriptor};

static ACCOUNT_FIELDS: [FieldDeclaration; 5] = [
    FieldDeclaration::new("id", ColumnKind::Integer),
    FieldDeclaration::new("created", ColumnKind::DateTime),
    FieldDeclaration::new("modified", ColumnKind::DateTime),
    FieldDeclaration::new("deleted", ColumnKind::DateTime),
    FieldDeclaration::new("email", ColumnKind::Text),
];

static ACCOUNT: RecordDescriptor = RecordDescriptor {
    type_name: "Botshop_Models_Accounts",
    fields: &ACCOUNT_FIELDS,
    populate_key: None,
    foreign_keys: &[],
};

static WIDGET_FIELDS: [FieldDeclaration; 11] = [
    FieldDeclaration::new("id", ColumnKind::Integer),
    FieldDeclaration::new("created", ColumnKind::DateTime),
    FieldDeclaration::new("modified", ColumnKind::DateTime),
    FieldDeclaration::new("deleted", ColumnKind::DateTime),
    FieldDeclaration::new("name", ColumnKind::Text),
    FieldDeclaration::new("price", ColumnKind::Float),
    FieldDeclaration::new("active", ColumnKind::Boolean),
    FieldDeclaration::new("user_id", ColumnKind::Integer),
    FieldDeclaration::new("meta", ColumnKind::Object),
    FieldDeclaration::new("tags", ColumnKind::Collection),
    FieldDeclaration::new("owner", ColumnKind::Nested(&ACCOUNT)),
];

static WIDGET: RecordDescriptor = RecordDescriptor {
    type_name: "Botshop_Models_Widgets",
    fields: &WIDGET_FIELDS,
    populate_key: Some("id"),
    foreign_keys: &["user_id"],
};

pub(crate) fn widget_descriptor() -> &'static RecordDescriptor {
    &WIDGET
}

pub(crate) fn account_descriptor() -> &'static RecordDescriptor {
    &ACCOUNT
}
