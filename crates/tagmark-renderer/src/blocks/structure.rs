//! Indentation-sensitive block structuring.
//!
//! Walks an ordered sequence of lines once and groups them into
//! [`BlockNode`]s. Nested content is kept raw and re-enters
//! [`parse_blocks`] when it is rendered.

use std::sync::LazyLock;

use regex::Regex;

use super::fence::{FenceTracker, fence_info};
use super::groups::split_at_rules;
use super::indent::{base_indent, dedent, indent_of, strip_indent};
use crate::directive::MaskedHeader;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})(?:\s+(.*?))?\s*$").unwrap());

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*\s+(.*)$").unwrap());

/// Kind of a structural unit, with the data specific to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// `[...]` directive; holds the header text between the brackets.
    Directive { header: String },
    /// `#` .. `######` heading with its trailing inline text.
    Heading { level: u8, text: String },
    /// `*` bullet; its first line and continuation live in `raw_content`.
    ListItem,
    /// Fenced code; holds the annotation after the opening fence.
    CodeFence { info: String },
    /// One side of a `---` split; its blocks live in `children`.
    RuleSeparatedGroup,
    /// Prose paragraph lines, handed to the prose renderer as one unit.
    Prose { lines: Vec<String> },
}

/// One structural unit of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub kind: BlockKind,
    /// Source line of the node's opening line (1-indexed).
    pub line: usize,
    /// Nested lines stripped of their common indentation, in original order.
    pub raw_content: Vec<String>,
    /// Structured children; filled for rule-separated groups.
    pub children: Vec<BlockNode>,
}

impl BlockNode {
    fn new(kind: BlockKind, line: usize) -> Self {
        Self {
            kind,
            line,
            raw_content: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Source line of the first `raw_content` line.
    #[must_use]
    pub fn content_line(&self) -> usize {
        match self.kind {
            BlockKind::ListItem => self.line,
            _ => self.line + 1,
        }
    }
}

/// Structure lines into an ordered sequence of top-level blocks.
///
/// `first_line` is the source line of `lines[0]`, used for error locations.
/// When the lines contain base-level `---` rules, the result is one
/// [`BlockKind::RuleSeparatedGroup`] per side, each structured independently.
///
/// # Example
///
/// ```
/// use tagmark_renderer::blocks::{BlockKind, parse_blocks};
///
/// let lines: Vec<String> = ["# Title", "[.note]", "  Body", "Closing text"]
///     .map(String::from)
///     .to_vec();
/// let blocks = parse_blocks(&lines, 1);
///
/// assert_eq!(blocks.len(), 3);
/// assert!(matches!(blocks[0].kind, BlockKind::Heading { level: 1, .. }));
/// assert!(matches!(blocks[1].kind, BlockKind::Directive { .. }));
/// assert_eq!(blocks[1].raw_content, vec!["Body"]);
/// assert!(matches!(blocks[2].kind, BlockKind::Prose { .. }));
/// ```
#[must_use]
pub fn parse_blocks(lines: &[String], first_line: usize) -> Vec<BlockNode> {
    let (groups, found_rule) = split_at_rules(lines, first_line);
    if !found_rule {
        return Structurer::new(lines, first_line).run();
    }

    groups
        .into_iter()
        .map(|group| {
            let mut node = BlockNode::new(BlockKind::RuleSeparatedGroup, group.line);
            node.children = Structurer::new(&group.lines, group.line).run();
            node.raw_content = group.lines;
            node
        })
        .collect()
}

/// Parser state while walking the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between blocks.
    ScanningTopLevel,
    /// Inside a directive, taking more-indented lines.
    CollectingDirectiveBody,
    /// Inside a bullet, taking more-indented lines.
    CollectingListItem,
    /// Inside a fence, taking lines verbatim.
    CollectingCodeFence,
    /// Inside a paragraph, until a blank line or a block marker.
    CollectingProseParagraph,
}

/// Block currently being collected.
struct Open {
    node: BlockNode,
    /// Indentation of the opening line.
    indent: usize,
}

/// Line classification at the scanning position.
enum Marker<'a> {
    Directive(&'a str),
    Heading(u8, &'a str),
    Bullet(&'a str),
    Fence(&'a str),
    Text,
}

struct Structurer<'a> {
    lines: &'a [String],
    first_line: usize,
    base: usize,
    state: State,
    fence: FenceTracker,
    open: Option<Open>,
    nodes: Vec<BlockNode>,
}

impl<'a> Structurer<'a> {
    fn new(lines: &'a [String], first_line: usize) -> Self {
        Self {
            lines,
            first_line,
            base: base_indent(lines),
            state: State::ScanningTopLevel,
            fence: FenceTracker::new(),
            open: None,
            nodes: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<BlockNode> {
        let mut idx = 0;
        while idx < self.lines.len() {
            if self.step(idx) {
                idx += 1;
            }
        }
        self.close();
        self.nodes
    }

    /// Process one line. Returns `false` when the line must be reprocessed
    /// after the open block was closed.
    fn step(&mut self, idx: usize) -> bool {
        let lines = self.lines;
        let line = lines[idx].as_str();

        match self.state {
            State::CollectingCodeFence => {
                if self.fence.update(line) {
                    self.close();
                } else if let Some(open) = &mut self.open {
                    let text = strip_indent(line, open.indent).to_owned();
                    open.node.raw_content.push(text);
                }
                true
            }
            State::CollectingDirectiveBody | State::CollectingListItem => {
                let Some(open) = &mut self.open else {
                    self.state = State::ScanningTopLevel;
                    return false;
                };
                match indent_of(line) {
                    None => {
                        open.node.raw_content.push(String::new());
                        true
                    }
                    Some(indent) if indent > open.indent => {
                        open.node.raw_content.push(line.to_owned());
                        true
                    }
                    Some(_) => {
                        self.close();
                        false
                    }
                }
            }
            State::CollectingProseParagraph => {
                let Some(indent) = indent_of(line) else {
                    self.close();
                    return true;
                };
                let starts_block = indent <= self.base
                    && !matches!(classify(line.trim_start()), Marker::Text);
                if starts_block {
                    self.close();
                    return false;
                }
                if let Some(Open { node, .. }) = &mut self.open
                    && let BlockKind::Prose { lines } = &mut node.kind
                {
                    lines.push(strip_indent(line, self.base).to_owned());
                }
                true
            }
            State::ScanningTopLevel => {
                if let Some(indent) = indent_of(line) {
                    self.open_block(idx, line, indent);
                }
                true
            }
        }
    }

    fn open_block(&mut self, idx: usize, line: &str, indent: usize) {
        let line_num = self.first_line + idx;
        let trimmed = line.trim_start();

        let (kind, state) = match classify(trimmed) {
            Marker::Directive(header) => (
                BlockKind::Directive {
                    header: header.to_owned(),
                },
                State::CollectingDirectiveBody,
            ),
            Marker::Heading(level, text) => {
                let node = BlockNode::new(
                    BlockKind::Heading {
                        level,
                        text: text.to_owned(),
                    },
                    line_num,
                );
                self.nodes.push(node);
                return;
            }
            Marker::Bullet(text) => {
                let mut node = BlockNode::new(BlockKind::ListItem, line_num);
                node.raw_content.push(text.to_owned());
                self.open = Some(Open { node, indent });
                self.state = State::CollectingListItem;
                return;
            }
            Marker::Fence(info) => {
                self.fence.update(line);
                (
                    BlockKind::CodeFence {
                        info: info.to_owned(),
                    },
                    State::CollectingCodeFence,
                )
            }
            Marker::Text => (
                BlockKind::Prose {
                    lines: vec![strip_indent(line, self.base).to_owned()],
                },
                State::CollectingProseParagraph,
            ),
        };

        tracing::trace!(line = line_num, ?state, "Opening block");
        self.open = Some(Open {
            node: BlockNode::new(kind, line_num),
            indent,
        });
        self.state = state;
    }

    /// Finish the open block, if any, and return to scanning.
    fn close(&mut self) {
        self.state = State::ScanningTopLevel;
        let Some(Open { mut node, .. }) = self.open.take() else {
            return;
        };

        match node.kind {
            BlockKind::Directive { .. } => {
                trim_trailing_blank(&mut node.raw_content);
                node.raw_content = dedent(&node.raw_content);
            }
            BlockKind::ListItem => {
                trim_trailing_blank(&mut node.raw_content);
                let continuation = if node.raw_content.len() > 1 {
                    node.raw_content.split_off(1)
                } else {
                    Vec::new()
                };
                node.raw_content.extend(dedent(&continuation));
            }
            _ => {}
        }

        self.nodes.push(node);
    }
}

fn trim_trailing_blank(lines: &mut Vec<String>) {
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
}

/// Classify a line with leading whitespace already removed.
fn classify(trimmed: &str) -> Marker<'_> {
    if let Some(header) = directive_header(trimmed) {
        return Marker::Directive(header);
    }
    if let Some(caps) = HEADING_RE.captures(trimmed) {
        let level = u8::try_from(caps[1].len()).unwrap_or(6);
        let text = caps.get(2).map_or("", |m| m.as_str());
        return Marker::Heading(level, text);
    }
    if let Some(caps) = BULLET_RE.captures(trimmed) {
        return Marker::Bullet(caps.get(1).map_or("", |m| m.as_str()));
    }
    if let Some(info) = fence_info(trimmed) {
        return Marker::Fence(info);
    }
    Marker::Text
}

/// Extract the header of a `[...]` directive line.
///
/// The header must start with a name character, `.`, `#`, `!` or a quote, and
/// contain no brackets outside quoted literals, so markdown links such as
/// `[text][ref]` stay prose.
pub(crate) fn directive_header(trimmed: &str) -> Option<&str> {
    let inner = trimmed.trim_end().strip_prefix('[')?.strip_suffix(']')?;
    let first = inner.chars().next()?;
    if !(first.is_alphanumeric() || matches!(first, '.' | '#' | '!' | '_' | '"')) {
        return None;
    }
    let masked = MaskedHeader::new(inner);
    if masked.skeleton().contains(['[', ']']) {
        return None;
    }
    Some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| (*s).to_owned()).collect()
    }

    fn prose(src: &[&str]) -> BlockKind {
        BlockKind::Prose { lines: lines(src) }
    }

    #[test]
    fn test_directive_with_body() {
        let blocks = parse_blocks(&lines(&["[list]", "  * foo", "  * bar"]), 1);
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0].kind,
            BlockKind::Directive {
                header: "list".to_owned()
            }
        );
        assert_eq!(blocks[0].raw_content, lines(&["* foo", "* bar"]));
        assert_eq!(blocks[0].content_line(), 2);
    }

    #[test]
    fn test_directive_body_ends_at_same_indent() {
        let blocks = parse_blocks(&lines(&["[.a]", "  one", "", "  two", "after"]), 1);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].raw_content, lines(&["one", "", "two"]));
        assert_eq!(blocks[1].kind, prose(&["after"]));
        assert_eq!(blocks[1].line, 5);
    }

    #[test]
    fn test_directive_without_body() {
        let blocks = parse_blocks(&lines(&["[image \"/a.png\"]", "", "Text"]), 1);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].raw_content.is_empty());
    }

    #[test]
    fn test_nested_directive_body_kept_raw() {
        let src = lines(&["[.outer]", "  [.inner]", "    deep", "  shallow"]);
        let blocks = parse_blocks(&src, 1);
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0].raw_content,
            lines(&["[.inner]", "  deep", "shallow"])
        );
    }

    #[test]
    fn test_heading_closes_paragraph() {
        let blocks = parse_blocks(&lines(&["para one", "## Title", "para two"]), 1);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].kind, prose(&["para one"]));
        assert_eq!(
            blocks[1].kind,
            BlockKind::Heading {
                level: 2,
                text: "Title".to_owned()
            }
        );
        assert_eq!(blocks[2].kind, prose(&["para two"]));
    }

    #[test]
    fn test_hash_without_space_is_prose() {
        let blocks = parse_blocks(&lines(&["#hashtag here"]), 1);
        assert_eq!(blocks[0].kind, prose(&["#hashtag here"]));
    }

    #[test]
    fn test_blank_line_separates_paragraphs() {
        let blocks = parse_blocks(&lines(&["a", "b", "", "c"]), 1);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, prose(&["a", "b"]));
        assert_eq!(blocks[1].kind, prose(&["c"]));
        assert_eq!(blocks[1].line, 4);
    }

    #[test]
    fn test_list_items_are_siblings() {
        let blocks = parse_blocks(&lines(&["* foo", "  more", "* bar"]), 1);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::ListItem);
        assert_eq!(blocks[0].raw_content, lines(&["foo", "more"]));
        assert_eq!(blocks[1].raw_content, lines(&["bar"]));
        assert_eq!(blocks[1].line, 3);
    }

    #[test]
    fn test_nested_list_item_body() {
        let blocks = parse_blocks(&lines(&["* a", "  * b", "    c", "* d"]), 1);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].raw_content, lines(&["a", "* b", "  c"]));
    }

    #[test]
    fn test_bold_text_is_not_a_bullet() {
        let blocks = parse_blocks(&lines(&["**bold** start"]), 1);
        assert_eq!(blocks[0].kind, prose(&["**bold** start"]));
    }

    #[test]
    fn test_code_fence_verbatim() {
        let src = lines(&["```js.pretty", "[not a directive]", "", "* nor a bullet", "```", "x"]);
        let blocks = parse_blocks(&src, 1);
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0].kind,
            BlockKind::CodeFence {
                info: "js.pretty".to_owned()
            }
        );
        assert_eq!(
            blocks[0].raw_content,
            lines(&["[not a directive]", "", "* nor a bullet"])
        );
        assert_eq!(blocks[1].kind, prose(&["x"]));
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let blocks = parse_blocks(&lines(&["```", "a", "b"]), 1);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].raw_content, lines(&["a", "b"]));
    }

    #[test]
    fn test_fence_closes_prose() {
        let blocks = parse_blocks(&lines(&["text", "```", "code", "```"]), 1);
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[1].kind, BlockKind::CodeFence { .. }));
    }

    #[test]
    fn test_rule_splits_into_groups() {
        let src = lines(&["# A", "one", "---", "two", "three"]);
        let blocks = parse_blocks(&src, 1);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::RuleSeparatedGroup);
        assert_eq!(blocks[0].children.len(), 2);
        assert_eq!(blocks[1].line, 4);
        assert_eq!(blocks[1].children[0].kind, prose(&["two", "three"]));
        assert_eq!(blocks[1].children[0].line, 4);
    }

    #[test]
    fn test_markdown_link_line_is_prose() {
        let blocks = parse_blocks(&lines(&["[text][ref]"]), 1);
        assert_eq!(blocks[0].kind, prose(&["[text][ref]"]));
        let blocks = parse_blocks(&lines(&["[text](https://example.com)"]), 1);
        assert_eq!(blocks[0].kind, prose(&["[text](https://example.com)"]));
    }

    #[test]
    fn test_directive_header_with_bracket_in_quotes() {
        assert_eq!(
            directive_header(r#"[image alt="a [b]" "/x.png"]"#),
            Some(r#"image alt="a [b]" "/x.png""#)
        );
        assert_eq!(directive_header("[ ]"), None);
        assert_eq!(directive_header("[]"), None);
        assert_eq!(directive_header("[.note]"), Some(".note"));
        assert_eq!(directive_header("[!]"), Some("!"));
    }

    #[test]
    fn test_indented_input_uses_relative_indentation() {
        let src = lines(&["    [.card]", "      body", "    tail"]);
        let blocks = parse_blocks(&src, 1);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].raw_content, lines(&["body"]));
        assert_eq!(blocks[1].kind, prose(&["tail"]));
    }

    #[test]
    fn test_order_preserved() {
        let src = lines(&["intro", "", "[.a]", "## h", "* i", "```", "c", "```", "outro"]);
        let kinds: Vec<&str> = parse_blocks(&src, 1)
            .iter()
            .map(|b| match b.kind {
                BlockKind::Directive { .. } => "directive",
                BlockKind::Heading { .. } => "heading",
                BlockKind::ListItem => "item",
                BlockKind::CodeFence { .. } => "fence",
                BlockKind::RuleSeparatedGroup => "group",
                BlockKind::Prose { .. } => "prose",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["prose", "directive", "heading", "item", "fence", "prose"]
        );
    }
}
