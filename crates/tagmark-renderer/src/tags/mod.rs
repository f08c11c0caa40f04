//! Built-in tags.
//!
//! A small set that exercises the handler contract: a generic container, a
//! list, media tags and a data-driven table. [`Registry::builtin`] registers
//! all of them.
//!
//! [`Registry::builtin`]: crate::Registry::builtin

mod container;
mod list;
mod media;
mod table;

pub use container::Container;
pub use list::List;
pub use media::{Image, MEDIA_SHORTCUT, Media, VIDEO_EXTENSIONS, Video};
pub use table::Table;
