//! Derived column metadata.
//!
//! `ColumnMetadata` is the ordered `name -> kind` mapping built once per
//! record instance from its declarations. Collection-typed declarations are
//! skipped entirely; they never become columns. The mapping is immutable for
//! the instance's lifetime and drives default assignment and all three query
//! builders.

use crate::schema::declaration::{ColumnKind, FieldDeclaration};

/// Ordered column metadata for one record instance.
///
/// Insertion order equals declaration order, so generated column lists are
/// stable across insert, populate, and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    entries: Vec<(&'static str, ColumnKind)>,
}

impl ColumnMetadata {
    /// Derive metadata from a declaration table, skipping collections.
    pub(crate) fn derive(fields: &'static [FieldDeclaration]) -> Self {
        let entries = fields
            .iter()
            .filter(|field| field.kind != ColumnKind::Collection)
            .map(|field| (field.name, field.kind))
            .collect();
        Self { entries }
    }

    /// Look up the declared kind of a column.
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, kind)| *kind)
    }

    /// Whether a column with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.kind_of(name).is_some()
    }

    /// Iterate columns in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, ColumnKind)> + '_ {
        self.entries.iter().copied()
    }

    /// Column names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: [FieldDeclaration; 4] = [
        FieldDeclaration::new("id", ColumnKind::Integer),
        FieldDeclaration::new("name", ColumnKind::Text),
        FieldDeclaration::new("tags", ColumnKind::Collection),
        FieldDeclaration::new("price", ColumnKind::Float),
    ];

    #[test]
    fn derive_skips_collection_declarations() {
        let columns = ColumnMetadata::derive(&FIELDS);
        assert_eq!(columns.len(), 3);
        assert!(!columns.contains("tags"));
    }

    #[test]
    fn derive_preserves_declaration_order() {
        let columns = ColumnMetadata::derive(&FIELDS);
        let names: Vec<_> = columns.names().collect();
        assert_eq!(names, vec!["id", "name", "price"]);
    }

    #[test]
    fn kind_of_reports_declared_kind() {
        let columns = ColumnMetadata::derive(&FIELDS);
        assert_eq!(columns.kind_of("price"), Some(ColumnKind::Float));
        assert_eq!(columns.kind_of("missing"), None);
    }
}
