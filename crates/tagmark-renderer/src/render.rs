//! Dispatch and composition.
//!
//! Structures lines into blocks, renders built-in block kinds with the default
//! rules and hands directives to their registered handlers. Handlers re-enter
//! the pipeline through [`RenderContext`], which tracks nesting depth.

use std::fmt::Write;

use crate::blocks::{BlockKind, BlockNode, parse_blocks, split_groups};
use crate::directive::{ContentGroup, DirectiveHeader, Tag, TagHandler, TagSpec};
use crate::error::RenderError;
use crate::html::{escape_html, open_tag, slugify};
use crate::options::RenderOptions;
use crate::tags;

/// Render a document given as lines.
///
/// # Errors
///
/// Returns [`RenderError::UnknownTag`] for a directive that names no
/// registered tag, [`RenderError::DepthExceeded`] when nesting goes past
/// [`RenderOptions::max_depth`], and any error raised by a handler unchanged.
///
/// # Example
///
/// ```
/// use tagmark_renderer::{RenderOptions, render};
///
/// let html = render(&["[list]", "  * foo", "  * bar"], &RenderOptions::new()).unwrap();
/// assert_eq!(html, "<ul><li>foo</li><li>bar</li></ul>");
/// ```
pub fn render<S: AsRef<str>>(lines: &[S], options: &RenderOptions) -> Result<String, RenderError> {
    let lines: Vec<String> = lines.iter().map(|l| l.as_ref().to_owned()).collect();
    RenderContext::new(options).render_blocks(&lines, 1)
}

/// Render a document given as one string.
///
/// # Errors
///
/// See [`render`].
pub fn render_str(source: &str, options: &RenderOptions) -> Result<String, RenderError> {
    let lines: Vec<&str> = source.lines().collect();
    render(&lines, options)
}

/// Engine handle passed to tag handlers.
///
/// Borrows the caller's options for the duration of a render call and knows
/// how deep the current handler sits.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    options: &'a RenderOptions,
    depth: usize,
}

impl<'a> RenderContext<'a> {
    /// Context at document level.
    #[must_use]
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options, depth: 0 }
    }

    #[must_use]
    pub fn options(&self) -> &'a RenderOptions {
        self.options
    }

    /// Nesting depth; 0 at document level.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Render one content group one level deeper.
    ///
    /// # Errors
    ///
    /// Same as [`render`].
    pub fn render(&self, group: &ContentGroup) -> Result<String, RenderError> {
        self.render_lines(group.line, &group.lines)
    }

    /// Render raw lines one level deeper; `first_line` locates `lines[0]`.
    ///
    /// # Errors
    ///
    /// Same as [`render`].
    pub fn render_lines(&self, first_line: usize, lines: &[String]) -> Result<String, RenderError> {
        self.nested(first_line)?.render_blocks(lines, first_line)
    }

    /// Render a group, dropping the paragraph wrapper when it is a single
    /// paragraph.
    ///
    /// # Errors
    ///
    /// Same as [`render`].
    pub fn render_tight(&self, group: &ContentGroup) -> Result<String, RenderError> {
        let inner = self.nested(group.line)?;
        let nodes = parse_blocks(&group.lines, group.line);
        if let [node] = nodes.as_slice()
            && let BlockKind::Prose { lines } = &node.kind
        {
            return Ok(self.render_inline(&lines.join("\n")));
        }
        inner.render_nodes(&nodes)
    }

    /// Render inline prose without a paragraph wrapper.
    #[must_use]
    pub fn render_inline(&self, text: &str) -> String {
        self.options.prose().render_inline(text)
    }

    /// Named data set supplied through the options.
    #[must_use]
    pub fn data_set(&self, name: &str) -> Option<&'a serde_json::Value> {
        self.options.data().get(name)
    }

    /// Resolve a media path against the configured asset base.
    ///
    /// Absolute paths, URLs with a scheme and `data:` URIs are returned as is.
    #[must_use]
    pub fn asset_url(&self, path: &str) -> String {
        let Some(base) = self.options.asset_base() else {
            return path.to_owned();
        };
        if path.starts_with('/') || path.contains("://") || path.starts_with("data:") {
            return path.to_owned();
        }
        if base.ends_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    fn nested(&self, line: usize) -> Result<Self, RenderError> {
        let depth = self.depth + 1;
        let limit = self.options.max_depth();
        if depth > limit {
            return Err(RenderError::DepthExceeded { limit, line });
        }
        Ok(Self {
            options: self.options,
            depth,
        })
    }

    fn render_blocks(&self, lines: &[String], first_line: usize) -> Result<String, RenderError> {
        let nodes = parse_blocks(lines, first_line);
        self.render_nodes(&nodes)
    }

    fn render_nodes(&self, nodes: &[BlockNode]) -> Result<String, RenderError> {
        let mut out = String::new();
        let mut groups = 0;

        for run in nodes.chunk_by(|a, b| is_list_item(a) && is_list_item(b)) {
            if is_list_item(&run[0]) {
                out.push_str("<ul>\n");
                for item in run {
                    out.push_str(&self.render_node(item)?);
                }
                out.push_str("</ul>\n");
                continue;
            }

            let node = &run[0];
            if node.kind == BlockKind::RuleSeparatedGroup {
                if groups > 0 {
                    out.push_str("<hr>\n");
                }
                groups += 1;
            }
            out.push_str(&self.render_node(node)?);
        }

        Ok(out)
    }

    fn render_node(&self, node: &BlockNode) -> Result<String, RenderError> {
        match &node.kind {
            BlockKind::Directive { header } => self.dispatch(node, header),
            BlockKind::Heading { level, text } => Ok(self.render_heading(*level, text)),
            BlockKind::Prose { lines } => Ok(self.options.prose().render_block(&lines.join("\n"))),
            BlockKind::ListItem => {
                let body = ContentGroup::new(node.content_line(), node.raw_content.clone());
                Ok(format!("<li>{}</li>\n", self.render_tight(&body)?))
            }
            BlockKind::CodeFence { info } => Ok(render_code_fence(info, &node.raw_content)),
            BlockKind::RuleSeparatedGroup => self.render_nodes(&node.children),
        }
    }

    fn render_heading(&self, level: u8, text: &str) -> String {
        let inline = self.render_inline(text);
        let slug = slugify(text);
        if self.options.heading_ids() && !slug.is_empty() {
            format!("<h{level} id=\"{slug}\">{inline}</h{level}>\n")
        } else {
            format!("<h{level}>{inline}</h{level}>\n")
        }
    }

    fn dispatch(&self, node: &BlockNode, header: &str) -> Result<String, RenderError> {
        let header = DirectiveHeader::parse(header);
        let tag = Tag {
            name: header.name,
            attr: header.attr,
            data: header.data,
            content: split_groups(&node.raw_content, node.content_line()),
            line: node.line,
        };

        let handler = self.resolve(&tag)?;
        tracing::debug!(
            tag = %tag.name,
            line = tag.line,
            depth = self.depth,
            groups = tag.content.len(),
            "Dispatching directive"
        );
        handler.render(&tag, self)
    }

    fn resolve(&self, tag: &Tag) -> Result<&'a dyn TagHandler, RenderError> {
        let registry = self.options.registry();
        if let Some(handler) = registry.get(&tag.name) {
            return Ok(handler);
        }
        if tag.name.is_empty() && (tag.attr.contains_key("class") || tag.attr.contains_key("id"))
        {
            return Ok(registry.default_container());
        }
        if tag.name == tags::MEDIA_SHORTCUT {
            return Ok(&tags::Media);
        }

        tracing::warn!(tag = %tag.name, line = tag.line, "Unknown tag");
        Err(RenderError::UnknownTag {
            name: tag.name.clone(),
            line: tag.line,
        })
    }
}

fn is_list_item(node: &BlockNode) -> bool {
    node.kind == BlockKind::ListItem
}

/// Render a fenced block verbatim.
///
/// The annotation is read as a tag spec: `rust.wide#main` yields
/// `<pre class="wide" id="main"><code class="language-rust">`.
fn render_code_fence(info: &str, lines: &[String]) -> String {
    let spec = TagSpec::parse(info.split_whitespace().next().unwrap_or_default());
    let mut out = open_tag("pre", &spec.attr);

    if spec.name.is_empty() {
        out.push_str("<code>");
    } else {
        let _ = write!(out, r#"<code class="language-{}">"#, escape_html(&spec.name));
    }
    for line in lines {
        out.push_str(&escape_html(line));
        out.push('\n');
    }
    out.push_str("</code></pre>\n");
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::directive::Registry;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn html(src: &[&str]) -> String {
        render(src, &RenderOptions::new()).unwrap()
    }

    fn echo_groups(tag: &Tag, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let mut out = String::new();
        for group in &tag.content {
            let _ = write!(out, "[{}:{}]", group.line, ctx.render(group)?.trim_end());
        }
        Ok(out)
    }

    #[test]
    fn test_list_directive_keeps_item_order() {
        assert_eq!(
            html(&["[list]", "  * foo", "  * bar"]),
            "<ul><li>foo</li><li>bar</li></ul>"
        );
    }

    #[test]
    fn test_prose_and_heading() {
        assert_eq!(
            html(&["# Title", "Some *text*.", "", "More."]),
            "<h1>Title</h1>\n<p>Some <em>text</em>.</p>\n<p>More.</p>\n"
        );
    }

    #[test]
    fn test_heading_ids() {
        let options = RenderOptions::new().with_heading_ids(true);
        assert_eq!(
            render(&["## Getting Started"], &options).unwrap(),
            "<h2 id=\"getting-started\">Getting Started</h2>\n"
        );
    }

    #[test]
    fn test_directive_output_is_adjacent() {
        assert_eq!(
            html(&["[.a]", "  x", "[.b]", "  y"]),
            r#"<div class="a"><p>x</p></div><div class="b"><p>y</p></div>"#
        );
    }

    #[test]
    fn test_top_level_list_items() {
        assert_eq!(
            html(&["* one", "* two", "", "after"]),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n<p>after</p>\n"
        );
    }

    #[test]
    fn test_nested_list_item_body() {
        assert_eq!(
            html(&["* one", "  * inner"]),
            "<ul>\n<li><p>one</p>\n<ul>\n<li>inner</li>\n</ul>\n</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_code_fence_annotation() {
        assert_eq!(
            html(&["```js.wide#main", "if (a < b) {}", "```"]),
            "<pre class=\"wide\" id=\"main\"><code class=\"language-js\">if (a &lt; b) {}\n</code></pre>\n"
        );
        assert_eq!(
            html(&["~~~", "[not a tag]", "~~~"]),
            "<pre><code>[not a tag]\n</code></pre>\n"
        );
    }

    #[test]
    fn test_rule_splits_document() {
        assert_eq!(
            html(&["one", "---", "two"]),
            "<p>one</p>\n<hr>\n<p>two</p>\n"
        );
    }

    #[test]
    fn test_rule_splits_directive_body_into_two_groups() {
        let options =
            RenderOptions::new().with_registry(Registry::new().with("pair", echo_groups));
        let output = render(
            &["[pair]", "  a", "  b", "  c", "  ---", "  d"],
            &options,
        )
        .unwrap();
        assert_eq!(output, "[2:<p>a\nb\nc</p>][6:<p>d</p>]");
    }

    #[test]
    fn test_anonymous_directive_uses_container() {
        assert_eq!(
            html(&["[.card#intro]", "  Hello"]),
            r#"<div class="card" id="intro"><p>Hello</p></div>"#
        );
    }

    #[test]
    fn test_anonymous_container_override() {
        let registry = Registry::builtin().with(
            "div",
            |tag: &Tag, _: &RenderContext<'_>| -> Result<String, RenderError> {
                Ok(format!("<section>{}</section>", tag.attr["class"]))
            },
        );
        let options = RenderOptions::new().with_registry(registry);
        assert_eq!(
            render(&["[.hero]"], &options).unwrap(),
            "<section>hero</section>"
        );
    }

    #[test]
    fn test_unknown_tag_is_error() {
        let err = render(&["Intro", "", "[chart \"x\"]"], &RenderOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnknownTag { ref name, line: 3 } if name == "chart"
        ));
    }

    #[test]
    fn test_unknown_nested_tag_reports_source_line() {
        let err = render(&["[.outer]", "  text", "", "  [nope]"], &RenderOptions::new())
            .unwrap_err();
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_bare_positional_without_name_is_error() {
        let err = render(&[r#"["just text"]"#], &RenderOptions::new()).unwrap_err();
        assert!(matches!(err, RenderError::UnknownTag { ref name, .. } if name.is_empty()));
    }

    #[test]
    fn test_media_shortcut_without_registration() {
        let options = RenderOptions::new().with_registry(Registry::new());
        assert_eq!(
            render(&[r#"[! "/clip.webm"]"#], &options).unwrap(),
            r#"<video src="/clip.webm"></video>"#
        );
        assert_eq!(
            render(&[r#"[! "/photo.jpg"]"#], &options).unwrap(),
            r#"<img src="/photo.jpg" alt="">"#
        );
    }

    #[test]
    fn test_handler_error_propagates_unchanged() {
        #[derive(Debug, thiserror::Error)]
        #[error("chart backend unavailable")]
        struct Unavailable;

        let registry = Registry::new().with(
            "chart",
            |_: &Tag, _: &RenderContext<'_>| -> Result<String, RenderError> {
                Err(RenderError::Handler(Box::new(Unavailable)))
            },
        );
        let options = RenderOptions::new().with_registry(registry);
        let err = render(&["[chart]"], &options).unwrap_err();
        assert_eq!(err.to_string(), "chart backend unavailable");
    }

    #[test]
    fn test_missing_data_from_builtin() {
        let err = render(&["", "[image]"], &RenderOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingData { ref tag, line: 2, .. } if tag == "image"
        ));
    }

    #[test]
    fn test_depth_limit() {
        let mut lines = Vec::new();
        for level in 0..6 {
            lines.push(format!("{}[.l{level}]", "  ".repeat(level)));
        }
        lines.push(format!("{}deep", "  ".repeat(6)));

        let shallow = RenderOptions::new().with_max_depth(3);
        let err = render(&lines, &shallow).unwrap_err();
        assert!(matches!(err, RenderError::DepthExceeded { limit: 3, line: 5 }));

        let deep = RenderOptions::new().with_max_depth(16);
        assert!(render(&lines, &deep).unwrap().contains("<p>deep</p>"));
    }

    #[test]
    fn test_handler_sees_parsed_header() {
        let registry = Registry::new().with(
            "tip",
            |tag: &Tag, ctx: &RenderContext<'_>| -> Result<String, RenderError> {
                assert_eq!(tag.positional(), Some("Hey there"));
                assert_eq!(tag.get("size"), Some(&Value::Number(40.0)));
                assert!(tag.flag("grayed"));
                assert_eq!(tag.attr.get("hidden"), Some(&Value::Bool(true)));
                assert_eq!(tag.line, 1);
                assert_eq!(ctx.depth(), 0);
                Ok("ok".to_owned())
            },
        );
        let options = RenderOptions::new().with_registry(registry);
        let output = render(
            &[r#"[tip#foo.bar "Hey there" size="40" grayed hidden]"#],
            &options,
        )
        .unwrap();
        assert_eq!(output, "ok");
    }

    #[test]
    fn test_nested_depth_visible_to_handlers() {
        let registry = Registry::builtin().with(
            "depth",
            |_: &Tag, ctx: &RenderContext<'_>| -> Result<String, RenderError> {
                Ok(ctx.depth().to_string())
            },
        );
        let options = RenderOptions::new().with_registry(registry);
        assert_eq!(
            render(&["[.a]", "  [.b]", "    [depth]"], &options).unwrap(),
            r#"<div class="a"><div class="b">2</div></div>"#
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let src = ["# Notes", "", "Some **bold** prose.", "", "* a", "* b"];
        let options = RenderOptions::new();
        let first = render(&src, &options).unwrap();
        let second = render(&src, &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_str_matches_lines() {
        let options = RenderOptions::new();
        assert_eq!(
            render_str("[.a]\n  x\n", &options).unwrap(),
            render(&["[.a]", "  x"], &options).unwrap()
        );
    }

    #[test]
    fn test_asset_url() {
        let options = RenderOptions::new().with_asset_base("https://cdn.example.com/media");
        let ctx = RenderContext::new(&options);
        assert_eq!(ctx.asset_url("a.png"), "https://cdn.example.com/media/a.png");
        assert_eq!(ctx.asset_url("/a.png"), "/a.png");
        assert_eq!(ctx.asset_url("https://x.org/a.png"), "https://x.org/a.png");
        assert_eq!(ctx.asset_url("data:image/png;base64,AA"), "data:image/png;base64,AA");

        let bare = RenderOptions::new();
        assert_eq!(RenderContext::new(&bare).asset_url("a.png"), "a.png");
    }

    #[test]
    fn test_data_set_lookup() {
        let mut data = HashMap::new();
        data.insert("team".to_owned(), serde_json::json!({"rows": []}));
        let options = RenderOptions::new().with_data(data);
        let ctx = RenderContext::new(&options);
        assert!(ctx.data_set("team").is_some());
        assert!(ctx.data_set("missing").is_none());
    }
}
