//! `.class#id` attribute shorthand.

use crate::value::{Attrs, Value};

/// Tag name plus the attributes its shorthand fragments produce.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSpec {
    /// Leading name, empty for the anonymous form (`.note`, `#intro`).
    pub name: String,
    /// `id` and `class` derived from the fragments.
    pub attr: Attrs,
}

impl TagSpec {
    /// Split a spec like `tabs.#foo.bar` into its name and attributes.
    ///
    /// # Example
    ///
    /// ```
    /// use tagmark_renderer::directive::TagSpec;
    ///
    /// let spec = TagSpec::parse("tabs.#foo.bar");
    /// assert_eq!(spec.name, "tabs");
    /// assert_eq!(spec.attr["id"].as_str(), Some("foo"));
    /// assert_eq!(spec.attr["class"].as_str(), Some("bar"));
    /// ```
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        let split = spec.find(['.', '#']).unwrap_or(spec.len());
        let mut attr = Attrs::new();
        apply_shorthand(&spec[split..], &mut attr);
        Self {
            name: spec[..split].to_owned(),
            attr,
        }
    }
}

/// Parse the shorthand fragments of `spec` into `{id, class}`.
///
/// Any leading name is ignored. The last `#` fragment wins; `.` fragments are
/// space-joined in order of appearance. Without fragments the map is empty.
#[must_use]
pub fn parse_attr(spec: &str) -> Attrs {
    TagSpec::parse(spec).attr
}

/// Fold shorthand fragments into existing attributes.
///
/// Classes are appended to any class already present; an id replaces the
/// previous one.
pub(crate) fn apply_shorthand(fragments: &str, attr: &mut Attrs) {
    let mut remaining = fragments;

    while let Some(marker) = remaining.chars().next() {
        let body = &remaining[1..];
        let end = body.find(['.', '#']).unwrap_or(body.len());
        let value = &body[..end];

        if !value.is_empty() {
            match marker {
                '#' => {
                    attr.insert("id".to_owned(), Value::from(value));
                }
                '.' => append_class(attr, value),
                _ => {}
            }
        }

        remaining = &body[end..];
    }
}

/// Append `class` to the space-separated class list in `attr`.
pub(crate) fn append_class(attr: &mut Attrs, class: &str) {
    if class.is_empty() {
        return;
    }
    match attr.get_mut("class") {
        Some(Value::String(existing)) if !existing.is_empty() => {
            existing.push(' ');
            existing.push_str(class);
        }
        _ => {
            attr.insert("class".to_owned(), Value::from(class));
        }
    }
}
