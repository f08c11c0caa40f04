//! Handler input for one directive.

use crate::error::RenderError;
use crate::value::{Attrs, Data, POSITIONAL_KEY, Value};

/// One group of raw nested lines, independently renderable.
///
/// A directive body split by lone `---` lines yields one group per side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentGroup {
    /// Source line of the group's first line (1-indexed).
    pub line: usize,
    /// Lines stripped of the body indentation, in original order.
    pub lines: Vec<String>,
}

impl ContentGroup {
    #[must_use]
    pub fn new(line: usize, lines: Vec<String>) -> Self {
        Self { line, lines }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// Lines joined with newlines.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Everything a handler receives for one directive.
///
/// Built by the dispatcher from the parsed header plus the directive body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    /// Tag name as written (empty for anonymous tags).
    pub name: String,
    /// Rendering-level attributes.
    pub attr: Attrs,
    /// Type-coerced directive data.
    pub data: Data,
    /// Nested content groups in document order.
    pub content: Vec<ContentGroup>,
    /// Source line of the directive header (1-indexed).
    pub line: usize,
}

impl Tag {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Data value rendered as a string (numbers and booleans included).
    #[must_use]
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.data.get(key).map(ToString::to_string)
    }

    /// Whether a boolean flag is set.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.data.get(key), Some(Value::Bool(true)))
    }

    /// The bare quoted literal stored under `_`, if any.
    #[must_use]
    pub fn positional(&self) -> Option<&str> {
        self.data.get(POSITIONAL_KEY).and_then(Value::as_str)
    }

    /// First present key among `keys`, as a string.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingData`] naming the first key when none is set.
    pub fn require_any(&self, keys: &[&str]) -> Result<String, RenderError> {
        keys.iter()
            .find_map(|k| self.get_string(k))
            .ok_or_else(|| RenderError::MissingData {
                tag: self.name.clone(),
                key: keys.first().copied().unwrap_or_default().to_owned(),
                line: self.line,
            })
    }
}
