//! Base prose rendering.
//!
//! Paragraphs the engine does not interpret itself are handed to a
//! [`ProseRenderer`]. The default is [`MarkdownProse`], backed by
//! `pulldown-cmark`.

use pulldown_cmark::{Options, Parser, html};

/// Renders one prose paragraph to markup.
pub trait ProseRenderer: Send + Sync {
    /// Render a paragraph (lines joined with newlines) as block markup.
    fn render_block(&self, text: &str) -> String;

    /// Render text without the enclosing paragraph element.
    ///
    /// Used for headings and tight list items.
    fn render_inline(&self, text: &str) -> String {
        let block = self.render_block(text);
        let trimmed = block.trim_end();
        match trimmed
            .strip_prefix("<p>")
            .and_then(|s| s.strip_suffix("</p>"))
        {
            Some(inner) if !inner.contains("<p>") => inner.to_owned(),
            _ => block,
        }
    }
}

/// Markdown prose renderer.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownProse {
    gfm: bool,
}

impl MarkdownProse {
    /// Create a renderer with GitHub Flavored Markdown enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// When enabled, prose supports tables, strikethrough (`~~text~~`) and
    /// task lists.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

impl Default for MarkdownProse {
    fn default() -> Self {
        Self::new()
    }
}

impl ProseRenderer for MarkdownProse {
    fn render_block(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, self.parser_options());
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
