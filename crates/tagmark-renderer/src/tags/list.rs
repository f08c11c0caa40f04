use crate::blocks::{BlockKind, parse_blocks};
use crate::directive::{ContentGroup, Tag, TagHandler};
use crate::error::RenderError;
use crate::html::open_tag;
use crate::render::RenderContext;

/// `<ul>` list.
///
/// With several `---` groups every group becomes one `<li>`. Otherwise each
/// `*` bullet of the body is an item; any other block between bullets becomes
/// an item of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct List;

impl TagHandler for List {
    fn render(&self, tag: &Tag, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let items = match tag.content.as_slice() {
            [group] => split_items(group),
            groups => groups.to_vec(),
        };

        let mut out = open_tag("ul", &tag.attr);
        for item in &items {
            out.push_str("<li>");
            out.push_str(ctx.render_tight(item)?.trim_end());
            out.push_str("</li>");
        }
        out.push_str("</ul>");
        Ok(out)
    }
}

/// Break one group into per-item groups.
fn split_items(group: &ContentGroup) -> Vec<ContentGroup> {
    let nodes = parse_blocks(&group.lines, group.line);
    let mut items = Vec::with_capacity(nodes.len());

    for (idx, node) in nodes.iter().enumerate() {
        if node.kind == BlockKind::ListItem {
            items.push(ContentGroup::new(node.line, node.raw_content.clone()));
            continue;
        }
        // Non-bullet blocks keep their source lines up to the next block.
        let start = node.line - group.line;
        let end = nodes
            .get(idx + 1)
            .map_or(group.lines.len(), |next| next.line - group.line);
        items.push(ContentGroup::new(node.line, group.lines[start..end].to_vec()));
    }

    items
}
