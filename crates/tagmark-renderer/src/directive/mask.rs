//! Quote masking for directive headers.
//!
//! Replaces every double-quoted literal with a `:N:` placeholder so the rest
//! of the header can be split on whitespace and `=` without tripping over
//! spaces or `=` inside quoted values.

/// A header with its quoted literals swapped out for placeholders.
///
/// Placeholders are numbered from `1` in order of appearance, per header.
///
/// # Example
///
/// ```
/// use tagmark_renderer::directive::MaskedHeader;
///
/// let masked = MaskedHeader::new(r#"tip "Hey there" size="40""#);
/// assert_eq!(masked.skeleton(), "tip :1: size=:2:");
/// assert_eq!(masked.lookup(":1:"), Some("Hey there"));
/// assert_eq!(masked.lookup(":2:"), Some("40"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedHeader {
    skeleton: String,
    literals: Vec<String>,
    unterminated: bool,
}

impl MaskedHeader {
    /// Mask all double-quoted literals in `input`.
    ///
    /// An unterminated quote extends to the end of the input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut skeleton = String::with_capacity(input.len());
        let mut literals = Vec::new();
        let mut unterminated = false;
        let mut remaining = input;

        while let Some(start) = remaining.find('"') {
            skeleton.push_str(&remaining[..start]);
            let after = &remaining[start + 1..];

            let (literal, rest) = match after.find('"') {
                Some(end) => (&after[..end], &after[end + 1..]),
                None => {
                    unterminated = true;
                    (after, "")
                }
            };

            literals.push(literal.to_owned());
            skeleton.push(':');
            skeleton.push_str(&literals.len().to_string());
            skeleton.push(':');
            remaining = rest;
        }
        skeleton.push_str(remaining);

        if unterminated {
            tracing::warn!(header = input, "Unterminated quote in directive header");
        }

        Self {
            skeleton,
            literals,
            unterminated,
        }
    }

    /// Header text with literals replaced by placeholders.
    #[must_use]
    pub fn skeleton(&self) -> &str {
        &self.skeleton
    }

    /// Number of masked literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Whether the last quote in the header was never closed.
    #[must_use]
    pub fn has_unterminated_quote(&self) -> bool {
        self.unterminated
    }

    /// Resolve a placeholder token back to its literal content.
    ///
    /// Returns `None` if `token` is not exactly one known placeholder.
    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<&str> {
        let index: usize = token.strip_prefix(':')?.strip_suffix(':')?.parse().ok()?;
        self.literals
            .get(index.checked_sub(1)?)
            .map(String::as_str)
    }

    /// Resolve `token` as a placeholder, or return it unchanged.
    #[must_use]
    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        self.lookup(token).unwrap_or(token)
    }

    /// Substitute every placeholder inside `token` with its literal text.
    ///
    /// Used for malformed tokens such as `:1::2:` where literals abut.
    #[must_use]
    pub fn restore(&self, token: &str) -> String {
        let mut out = token.to_owned();
        for (idx, literal) in self.literals.iter().enumerate().rev() {
            out = out.replace(&format!(":{}:", idx + 1), literal);
        }
        out
    }
}
