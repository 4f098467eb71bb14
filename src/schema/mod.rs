//! Schema derivation for record types.
//!
//! A record type is described by a static [`RecordDescriptor`]: an ordered
//! table of field declarations plus the type's identifier, populate key, and
//! foreign-key names. At construction time a [`crate::Record`] walks the
//! descriptor once to derive [`ColumnMetadata`], assign per-kind defaults,
//! and resolve its storage table name. Nothing here is re-derived later.

pub mod column;
pub mod declaration;
pub mod default;
pub mod table_name;

#[doc(inline)]
pub use column::ColumnMetadata;
#[doc(inline)]
pub use declaration::{ColumnKind, FieldDeclaration, RecordDescriptor, BASE_FIELDS};
#[doc(inline)]
pub use default::default_for;
