//! Markup helpers shared by the default block rules and built-in tags.

use std::fmt::Write;

use crate::value::{Attrs, Value};

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Heading anchor slug: lowercase ASCII alphanumerics joined by `-`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    slug
}

/// Check that `name` is safe to write as an attribute name.
pub(crate) fn is_attr_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b':' | b'.' | b'-'))
}

/// Append ` key="value"` pairs for an attribute map.
///
/// `true` flags are written bare, `false` flags are skipped, and keys that are
/// not valid attribute names are dropped.
pub fn write_attrs(out: &mut String, attrs: &Attrs) {
    for (key, value) in attrs {
        if !is_attr_name(key) {
            tracing::debug!(key = %key, "Skipping invalid attribute name");
            continue;
        }
        match value {
            Value::Bool(true) => {
                out.push(' ');
                out.push_str(key);
            }
            Value::Bool(false) => {}
            other => {
                let _ = write!(out, r#" {key}="{}""#, escape_html(&other.to_string()));
            }
        }
    }
}

/// Opening tag with attributes, e.g. `<div class="note">`.
#[must_use]
pub fn open_tag(name: &str, attrs: &Attrs) -> String {
    let mut out = format!("<{name}");
    write_attrs(&mut out, attrs);
    out.push('>');
    out
}
