//! Block structuring.
//!
//! Turns raw lines into an ordered sequence of [`BlockNode`]s: directives,
//! headings, list items, code fences, prose paragraphs and rule-separated
//! groups. Structure is decided purely by relative indentation; nested lines
//! stay raw and are structured again when a handler renders them.

mod fence;
mod groups;
mod indent;
mod structure;

pub use groups::split_groups;
pub use structure::{BlockKind, BlockNode, parse_blocks};
