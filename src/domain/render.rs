//! The GLEE text rendering seam.

/// Render a validated entity into its GLEE configuration text.
///
/// Rendering is pure and cannot fail: every implementor was validated on
/// construction.
pub trait Render {
    fn render(&self) -> String;
}

/// Push a `key value` line with the key left-aligned to 12 columns.
pub(crate) fn push_field(lines: &mut Vec<String>, key: &str, value: impl std::fmt::Display) {
    lines.push(format!("{key:<12} {value}"));
}
