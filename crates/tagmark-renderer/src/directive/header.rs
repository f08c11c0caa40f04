//! Directive header parsing.
//!
//! Parses the text between the outer brackets of a directive line:
//! `[tip#foo.bar "Hey there" size="40" grayed hidden]`.

use super::mask::MaskedHeader;
use super::shorthand::{TagSpec, append_class, apply_shorthand};
use crate::html::is_attr_name;
use crate::value::{Attrs, Data, POSITIONAL_KEY, Value};

/// Keys that always render as HTML attributes rather than handler data.
const ATTR_KEYS: &[&str] = &["id", "class", "style", "hidden"];

/// Key prefixes that render as HTML attributes.
const ATTR_PREFIXES: &[&str] = &["data-", "aria-"];

/// Parsed form of one `[...]` header.
///
/// `attr` and `data` never share a key.
///
/// # Example
///
/// ```
/// use tagmark_renderer::Value;
/// use tagmark_renderer::directive::DirectiveHeader;
///
/// let header = DirectiveHeader::parse(r#"tip#foo.bar "Hey there" size="40" grayed hidden"#);
/// assert_eq!(header.name, "tip");
/// assert_eq!(header.positional(), Some("Hey there"));
/// assert_eq!(header.data["size"], Value::Number(40.0));
/// assert_eq!(header.data["grayed"], Value::Bool(true));
/// assert_eq!(header.attr["hidden"], Value::Bool(true));
/// assert_eq!(header.id(), Some("foo"));
/// assert_eq!(header.class(), Some("bar"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectiveHeader {
    /// Tag name; empty for anonymous tags, `!` for the media shortcut.
    pub name: String,
    /// Rendering-level attributes.
    pub attr: Attrs,
    /// Everything else, type-coerced.
    pub data: Data,
}

impl DirectiveHeader {
    /// Parse a header (brackets already stripped).
    ///
    /// Never fails: malformed pieces degrade to string data.
    #[must_use]
    pub fn parse(header: &str) -> Self {
        let masked = MaskedHeader::new(header.trim());
        let mut tokens = masked.skeleton().split_whitespace().peekable();
        let mut parsed = Self::default();
        // Explicit `class=` values go after every shorthand class.
        let mut explicit_classes = Vec::new();

        // The first token is the tag spec unless it is already a value token.
        if let Some(first) = tokens.peek()
            && !first.contains('=')
            && !first.contains(':')
        {
            let spec = TagSpec::parse(first);
            parsed.name = spec.name;
            parsed.attr = spec.attr;
            tokens.next();
        }

        for token in tokens {
            parsed.apply_token(token, &masked, &mut explicit_classes);
        }
        for class in &explicit_classes {
            append_class(&mut parsed.attr, class);
        }

        parsed
    }

    fn apply_token(
        &mut self,
        token: &str,
        masked: &MaskedHeader,
        explicit_classes: &mut Vec<String>,
    ) {
        if let Some(literal) = masked.lookup(token) {
            self.data
                .insert(POSITIONAL_KEY.to_owned(), Value::from(literal));
        } else if token.starts_with(['.', '#']) {
            apply_shorthand(token, &mut self.attr);
        } else if let Some((key, raw)) = token.split_once('=') {
            if key.is_empty() {
                tracing::debug!(token, "Ignoring header token without a key");
                return;
            }
            let restored = masked.restore(key);
            if restored != key {
                tracing::debug!(key = %restored, "Keeping quoted header key as data");
                let value = masked
                    .lookup(raw)
                    .map_or_else(|| Value::coerce(&masked.restore(raw)), Value::from);
                self.data.insert(restored, value);
                return;
            }
            let key = restored;
            match masked.lookup(raw) {
                Some(literal) => self.insert(key, literal, true, explicit_classes),
                None => self.insert(key, &masked.restore(raw), false, explicit_classes),
            }
        } else {
            let restored = masked.restore(token);
            if restored == token {
                self.insert_flag(restored);
            } else {
                tracing::debug!(key = %restored, "Keeping quoted header flag as data");
                self.data.insert(restored, Value::Bool(true));
            }
        }
    }

    fn insert(
        &mut self,
        key: String,
        raw: &str,
        quoted: bool,
        explicit_classes: &mut Vec<String>,
    ) {
        if is_attr_key(&key) {
            match key.as_str() {
                "class" => explicit_classes.push(raw.to_owned()),
                _ if !quoted && raw == "true" => {
                    self.attr.insert(key, Value::Bool(true));
                }
                _ => {
                    self.attr.insert(key, Value::from(raw));
                }
            }
        } else {
            self.data.insert(key, Value::coerce(raw));
        }
    }

    fn insert_flag(&mut self, key: String) {
        if key == "class" || key == "id" {
            tracing::debug!(key = %key, "Ignoring bare id/class flag");
        } else if is_attr_key(&key) {
            self.attr.insert(key, Value::Bool(true));
        } else {
            self.data.insert(key, Value::Bool(true));
        }
    }

    /// Whether the header has no tag name.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// The `id` attribute, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr.get("id").and_then(Value::as_str)
    }

    /// The space-joined `class` attribute, if any.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.attr.get("class").and_then(Value::as_str)
    }

    /// The bare quoted literal stored under `_`, if any.
    #[must_use]
    pub fn positional(&self) -> Option<&str> {
        self.data.get(POSITIONAL_KEY).and_then(Value::as_str)
    }
}

/// Check if a key is routed to `attr` instead of `data`.
///
/// Keys that are not valid attribute names (for example ones assembled from
/// quoted literals) always stay data.
fn is_attr_key(key: &str) -> bool {
    let attr_like =
        ATTR_KEYS.contains(&key) || ATTR_PREFIXES.iter().any(|p| key.starts_with(p));
    if attr_like && !is_attr_name(key) {
        tracing::debug!(key, "Routing malformed attribute key to data");
        return false;
    }
    attr_like
}
