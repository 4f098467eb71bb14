//! Table name derivation.

/// Derive a storage table name from a record type identifier.
///
/// The identifier is lower-cased and only the segment after the last `_`
/// separator is kept, so a namespace-qualified name collapses to its simple
/// name: `Namespace_Segment_Widgets` resolves to `widgets`. An identifier
/// with no separator lower-cases whole. The result is cached on the record
/// for its lifetime.
pub(crate) fn resolve(type_name: &str) -> String {
    let lowered = type_name.to_ascii_lowercase();
    match lowered.rfind('_') {
        Some(index) => lowered[index + 1..].to_string(),
        None => lowered,
    }
}
