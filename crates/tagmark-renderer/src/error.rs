//! Render error types.

/// Error raised by a render call.
///
/// Structural problems in a header never produce an error; they are recovered
/// by coercion. Only unresolvable tags, exceeded nesting and handler contract
/// violations fail a render.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A directive names a tag absent from the registry.
    #[error("line {line}: unknown tag [{name}]")]
    UnknownTag {
        /// Tag name as written (may be empty for a bare `[...]` header).
        name: String,
        /// Source line of the directive (1-indexed).
        line: usize,
    },
    /// A handler required a data key the author omitted.
    #[error("line {line}: [{tag}] requires `{key}`")]
    MissingData {
        /// Tag name.
        tag: String,
        /// Missing data key.
        key: String,
        /// Source line of the directive (1-indexed).
        line: usize,
    },
    /// A handler referenced a named data set that was not supplied.
    #[error("line {line}: [{tag}] references unknown data set `{name}`")]
    MissingDataSet {
        /// Tag name.
        tag: String,
        /// Requested data set name.
        name: String,
        /// Source line of the directive (1-indexed).
        line: usize,
    },
    /// Nested content went deeper than the configured limit.
    #[error("line {line}: maximum nesting depth ({limit}) exceeded")]
    DepthExceeded {
        /// Configured maximum depth.
        limit: usize,
        /// Source line where the limit was hit (1-indexed).
        line: usize,
    },
    /// Error raised by a caller-supplied handler.
    #[error(transparent)]
    Handler(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl RenderError {
    /// Source line associated with the error, if known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnknownTag { line, .. }
            | Self::MissingData { line, .. }
            | Self::MissingDataSet { line, .. }
            | Self::DepthExceeded { line, .. } => Some(*line),
            Self::Handler(_) => None,
        }
    }
}
