use crate::directive::{Tag, TagHandler};
use crate::error::RenderError;
use crate::html::open_tag;
use crate::render::RenderContext;

/// Generic `<div>` container, also used for anonymous `.class#id` directives.
///
/// A single content group is rendered straight into the div. Several groups
/// (split by `---`) are each wrapped in their own inner `<div>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Container;

impl TagHandler for Container {
    fn render(&self, tag: &Tag, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let mut out = open_tag("div", &tag.attr);

        match tag.content.as_slice() {
            [] => {}
            [group] => out.push_str(ctx.render(group)?.trim_end()),
            groups => {
                for group in groups {
                    out.push_str("<div>");
                    out.push_str(ctx.render(group)?.trim_end());
                    out.push_str("</div>");
                }
            }
        }

        out.push_str("</div>");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::{RenderOptions, render};
    use pretty_assertions::assert_eq;

    fn html(src: &[&str]) -> String {
        render(src, &RenderOptions::new()).unwrap()
    }

    #[test]
    fn test_empty_container() {
        assert_eq!(html(&["[div#top]"]), r#"<div id="top"></div>"#);
    }

    #[test]
    fn test_stacked_groups() {
        assert_eq!(
            html(&["[.stack]", "  ## Top", "  ---", "  Bottom"]),
            r#"<div class="stack"><div><h2>Top</h2></div><div><p>Bottom</p></div></div>"#
        );
    }

    #[test]
    fn test_explicit_attributes_compose_with_shorthand() {
        assert_eq!(
            html(&[r#"[div.a class="b" data-role="note" hidden]"#]),
            r#"<div class="a b" data-role="note" hidden></div>"#
        );
    }

    #[test]
    fn test_data_is_not_rendered_as_attributes() {
        assert_eq!(html(&[r#"[.card size=3 "caption"]"#]), r#"<div class="card"></div>"#);
    }

    #[test]
    fn test_quoted_key_text_never_reaches_markup() {
        assert_eq!(
            html(&[r#"[div data-"x onmouseover=alert(1) z"=1]"#]),
            "<div></div>"
        );
    }

    #[test]
    fn test_later_shorthand_class_precedes_explicit_class() {
        assert_eq!(
            html(&[r#"[div class="c" .d]"#]),
            r#"<div class="d c"></div>"#
        );
    }
}
