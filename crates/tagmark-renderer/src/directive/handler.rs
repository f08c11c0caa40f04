//! Tag handler trait.

use super::Tag;
use crate::error::RenderError;
use crate::render::RenderContext;

/// Handler that turns one directive into markup.
///
/// Handlers are pure with respect to the engine: they read the [`Tag`] and the
/// [`RenderContext`] and return a markup string, which is used verbatim. A
/// handler may re-enter the engine for its nested content through
/// [`RenderContext::render`], or ignore the content entirely.
///
/// Errors returned here propagate to the caller of the render unchanged.
///
/// Closures with the matching signature implement this trait.
///
/// # Example
///
/// ```
/// use tagmark_renderer::{Registry, RenderContext, RenderError, RenderOptions, render};
/// use tagmark_renderer::directive::Tag;
///
/// let registry = Registry::builtin().with(
///     "note",
///     |tag: &Tag, ctx: &RenderContext<'_>| -> Result<String, RenderError> {
///         let mut body = String::new();
///         for group in &tag.content {
///             body.push_str(&ctx.render(group)?);
///         }
///         Ok(format!("<aside>{body}</aside>"))
///     },
/// );
/// let options = RenderOptions::new().with_registry(registry);
///
/// let html = render(&["[note]", "  Hello"], &options).unwrap();
/// assert_eq!(html, "<aside><p>Hello</p>\n</aside>");
/// ```
pub trait TagHandler: Send + Sync {
    /// Render a directive.
    fn render(&self, tag: &Tag, ctx: &RenderContext<'_>) -> Result<String, RenderError>;
}

impl<F> TagHandler for F
where
    F: Fn(&Tag, &RenderContext<'_>) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, tag: &Tag, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        self(tag, ctx)
    }
}
