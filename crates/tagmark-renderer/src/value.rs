//! Typed values carried by directive headers.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:\d+(?:\.\d+)?|\.\d+)$").unwrap());

/// Rendering-level attributes (`id`, `class`, boolean flags such as `hidden`).
///
/// Ordered so rendered attribute lists are deterministic.
pub type Attrs = BTreeMap<String, Value>;

/// Directive data: explicit `key=value` pairs, flags and the positional `_` value.
pub type Data = BTreeMap<String, Value>;

/// Key under which a bare quoted literal is stored in [`Data`].
pub const POSITIONAL_KEY: &str = "_";

/// A header value after type coercion.
///
/// Numeric-looking strings become [`Value::Number`], `true`/`false` and bare
/// flags become [`Value::Bool`], everything else stays a [`Value::String`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Bool(bool),
}

impl Value {
    /// Coerce a raw header value.
    ///
    /// Anything that fails to look like a number or boolean is kept verbatim.
    ///
    /// # Example
    ///
    /// ```
    /// use tagmark_renderer::Value;
    ///
    /// assert_eq!(Value::coerce("40"), Value::Number(40.0));
    /// assert_eq!(Value::coerce("true"), Value::Bool(true));
    /// assert_eq!(Value::coerce("1.2.3"), Value::String("1.2.3".to_owned()));
    /// ```
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if NUMBER_RE.is_match(raw)
            && let Ok(n) = raw.parse::<f64>()
        {
            return Self::Number(n);
        }
        Self::String(raw.to_owned())
    }

    /// String contents, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
