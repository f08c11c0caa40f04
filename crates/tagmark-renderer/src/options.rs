//! Render options.

use std::collections::HashMap;
use std::fmt;

use tagmark_config::Config;

use crate::directive::Registry;
use crate::prose::{MarkdownProse, ProseRenderer};

/// Default nesting limit for recursive re-entry.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Everything a render call reads besides the input lines.
///
/// Options are never mutated during a render, so one value can serve many
/// calls, including from several threads.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use tagmark_renderer::{Registry, RenderOptions};
///
/// let mut data = HashMap::new();
/// data.insert("team".to_owned(), serde_json::json!([["Name"], ["Ann"]]));
///
/// let options = RenderOptions::new()
///     .with_registry(Registry::builtin())
///     .with_data(data)
///     .with_heading_ids(true)
///     .with_asset_base("/static/");
/// assert_eq!(options.max_depth(), 32);
/// ```
pub struct RenderOptions {
    registry: Registry,
    data: HashMap<String, serde_json::Value>,
    prose: Box<dyn ProseRenderer>,
    max_depth: usize,
    heading_ids: bool,
    asset_base: Option<String>,
}

impl RenderOptions {
    /// Options with the built-in registry and the markdown prose renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Registry::builtin(),
            data: HashMap::new(),
            prose: Box::new(MarkdownProse::new()),
            max_depth: DEFAULT_MAX_DEPTH,
            heading_ids: false,
            asset_base: None,
        }
    }

    /// Build options from a loaded configuration.
    ///
    /// Uses the built-in registry; callers add their own tags with
    /// [`with_registry`](Self::with_registry).
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_prose(MarkdownProse::new().with_gfm(config.render.gfm))
            .with_max_depth(config.render.max_depth)
            .with_heading_ids(config.render.heading_ids)
            .with_data(config.data.clone())
            .with_optional_asset_base(config.assets.base_url.clone())
    }

    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the named data sets reachable by directives.
    #[must_use]
    pub fn with_data(mut self, data: HashMap<String, serde_json::Value>) -> Self {
        self.data = data;
        self
    }

    /// Replace the prose renderer.
    #[must_use]
    pub fn with_prose<P: ProseRenderer + 'static>(mut self, prose: P) -> Self {
        self.prose = Box::new(prose);
        self
    }

    /// Set the nesting limit. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Emit slug `id` attributes on headings.
    #[must_use]
    pub fn with_heading_ids(mut self, enabled: bool) -> Self {
        self.heading_ids = enabled;
        self
    }

    /// Prefix for relative media paths.
    #[must_use]
    pub fn with_asset_base(mut self, base: impl Into<String>) -> Self {
        self.asset_base = Some(base.into());
        self
    }

    fn with_optional_asset_base(mut self, base: Option<String>) -> Self {
        self.asset_base = base;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn data(&self) -> &HashMap<String, serde_json::Value> {
        &self.data
    }

    #[must_use]
    pub fn prose(&self) -> &dyn ProseRenderer {
        self.prose.as_ref()
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[must_use]
    pub fn heading_ids(&self) -> bool {
        self.heading_ids
    }

    #[must_use]
    pub fn asset_base(&self) -> Option<&str> {
        self.asset_base.as_deref()
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut data: Vec<&str> = self.data.keys().map(String::as_str).collect();
        data.sort_unstable();
        f.debug_struct("RenderOptions")
            .field("registry", &self.registry)
            .field("data", &data)
            .field("max_depth", &self.max_depth)
            .field("heading_ids", &self.heading_ids)
            .field("asset_base", &self.asset_base)
            .finish_non_exhaustive()
    }
}
