//! Tag registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::TagHandler;
use crate::tags;

/// Name of the generic container used for anonymous `.class#id` directives.
pub const DEFAULT_CONTAINER: &str = "div";

/// Mapping from tag name to handler.
///
/// There is no global registry: callers build one and pass it through
/// [`RenderOptions`](crate::RenderOptions). Built-ins and caller extensions are
/// composed with [`merge`](Self::merge) or [`with`](Self::with).
#[derive(Clone, Default)]
pub struct Registry {
    handlers: HashMap<String, Arc<dyn TagHandler>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in tags.
    ///
    /// Contains `div`, `list`, `image`, `video`, `!` and `table`.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .with(DEFAULT_CONTAINER, tags::Container)
            .with("list", tags::List)
            .with("image", tags::Image)
            .with("video", tags::Video)
            .with("!", tags::Media)
            .with("table", tags::Table)
    }

    /// Register a handler, replacing any existing handler of the same name.
    #[must_use]
    pub fn with<H: TagHandler + 'static>(mut self, name: impl Into<String>, handler: H) -> Self {
        self.insert(name, handler);
        self
    }

    /// Register a handler in place.
    pub fn insert<H: TagHandler + 'static>(&mut self, name: impl Into<String>, handler: H) {
        self.handlers.insert(name.into(), Arc::new(handler));
    }

    /// Compose two registries; entries of `other` win on conflicts.
    #[must_use]
    pub fn merge(mut self, other: &Registry) -> Self {
        for (name, handler) in &other.handlers {
            self.handlers.insert(name.clone(), Arc::clone(handler));
        }
        self
    }

    /// Look up a handler by tag name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn TagHandler> {
        self.handlers.get(name).map(AsRef::as_ref)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Handler for anonymous directives.
    ///
    /// Uses a registered `div` override when present, the built-in container
    /// otherwise.
    #[must_use]
    pub fn default_container(&self) -> &dyn TagHandler {
        self.get(DEFAULT_CONTAINER).unwrap_or(&tags::Container)
    }

    /// Registered tag names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("tags", &self.names())
            .finish()
    }
}
