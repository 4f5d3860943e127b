//! Model name validation

/// Check that a model name contains only ASCII letters, digits, underscores,
/// or hyphens.
///
/// Note that the empty string passes (zero-or-more semantics). Existing
/// configs rely on this boundary, so it is kept as-is; tightening it would
/// need a config migration.
pub fn is_valid_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
