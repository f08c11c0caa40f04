//! Directive headers, handler input and the tag registry.
//!
//! A directive is a line of the form `[name.class#id key="value" flag "text"]`
//! optionally followed by a more-indented body.
//!
//! # Header Parsing
//!
//! Parsing runs in three steps:
//!
//! 1. **Masking** ([`MaskedHeader`]): every double-quoted literal is replaced by
//!    a `:N:` placeholder so the header splits safely on whitespace and `=`.
//! 2. **Shorthand** ([`TagSpec`], [`parse_attr`]): the leading token is split
//!    into a tag name and `.class` / `#id` fragments.
//! 3. **Routing** ([`DirectiveHeader`]): remaining tokens become `attr`
//!    (`id`, `class`, `style`, `hidden`, `data-*`, `aria-*`) or type-coerced
//!    `data`; a bare quoted literal is stored under `_`.
//!
//! # Dispatch
//!
//! Handlers implement [`TagHandler`] and are looked up in a [`Registry`]
//! passed explicitly with every render call. Each handler receives a [`Tag`]
//! holding the parsed header and the directive body as [`ContentGroup`]s.

mod handler;
mod header;
mod mask;
mod registry;
mod shorthand;
mod tag;

pub use handler::TagHandler;
pub use header::DirectiveHeader;
pub use mask::MaskedHeader;
pub use registry::{DEFAULT_CONTAINER, Registry};
pub use shorthand::{TagSpec, parse_attr};
pub use tag::{ContentGroup, Tag};
