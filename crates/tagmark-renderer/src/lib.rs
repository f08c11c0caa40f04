//! Tag directive engine.
//!
//! Renders documents that mix prose with bracketed directives:
//!
//! ```text
//! # Release notes
//!
//! [.callout#new]
//!   Something **new** shipped.
//!   ---
//!   [! "/media/demo.mp4" autoplay muted]
//!
//! [list]
//!   * Faster parsing
//!   * Fewer surprises
//! ```
//!
//! A directive line opens a block whose body is every following line indented
//! deeper. The header names a tag (or only carries `.class#id` shorthand, in
//! which case the generic container renders it) followed by `key=value` pairs,
//! bare flags and one quoted positional value. Handlers are looked up in a
//! [`Registry`] and may render their body again through [`RenderContext`].
//!
//! Everything that is not a directive goes through the default block rules:
//! headings, bullets, code fences and prose paragraphs rendered by a
//! [`ProseRenderer`] (markdown by default).
//!
//! # Quick Start
//!
//! ```
//! use tagmark_renderer::{RenderOptions, render_str};
//!
//! let source = "[.card]\n  Hello *world*\n";
//! let html = render_str(source, &RenderOptions::new()).unwrap();
//! assert_eq!(html, r#"<div class="card"><p>Hello <em>world</em></p></div>"#);
//! ```
//!
//! # Custom Tags
//!
//! ```
//! use tagmark_renderer::{Registry, RenderContext, RenderError, RenderOptions, render};
//! use tagmark_renderer::directive::Tag;
//!
//! let badge = |tag: &Tag, _: &RenderContext<'_>| -> Result<String, RenderError> {
//!     let text = tag.require_any(&["_"])?;
//!     Ok(format!("<span class=\"badge\">{text}</span>"))
//! };
//! let options = RenderOptions::new().with_registry(Registry::builtin().with("badge", badge));
//!
//! let html = render(&[r#"[badge "beta"]"#], &options).unwrap();
//! assert_eq!(html, r#"<span class="badge">beta</span>"#);
//! ```

pub mod blocks;
pub mod directive;
mod error;
mod html;
mod options;
mod prose;
mod render;
pub mod tags;
mod value;

pub use directive::{Registry, TagHandler};
pub use error::RenderError;
pub use html::{escape_html, slugify};
pub use options::{DEFAULT_MAX_DEPTH, RenderOptions};
pub use prose::{MarkdownProse, ProseRenderer};
pub use render::{RenderContext, render, render_str};
pub use value::{Attrs, Data, POSITIONAL_KEY, Value};
