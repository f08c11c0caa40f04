use std::fmt::Write;

use serde_json::Value as Json;

use crate::directive::{Tag, TagHandler};
use crate::error::RenderError;
use crate::html::{escape_html, open_tag};
use crate::render::RenderContext;
use crate::value::Value;

/// `<table>` from a named data set or from `|`-separated body lines.
///
/// `rows="team"` looks up the data set `team`, which must be an array of rows
/// or an object with a `rows` array. Without `rows`, each non-blank body line
/// is one row. The first row is the header unless `head=false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Table;

impl TagHandler for Table {
    fn render(&self, tag: &Tag, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let rows = match tag.get_string("rows") {
            Some(name) => data_rows(tag, ctx, &name)?,
            None => body_rows(tag, ctx),
        };
        let head = tag.get("head") != Some(&Value::Bool(false));

        let mut out = open_tag("table", &tag.attr);
        let mut body = rows.iter();
        if head && let Some(first) = body.next() {
            out.push_str("<thead>");
            write_row(&mut out, "th", first);
            out.push_str("</thead>");
        }
        let mut body = body.peekable();
        if body.peek().is_some() {
            out.push_str("<tbody>");
            for row in body {
                write_row(&mut out, "td", row);
            }
            out.push_str("</tbody>");
        }
        out.push_str("</table>");
        Ok(out)
    }
}

/// Rows from a named data set; cells are escaped text.
fn data_rows(
    tag: &Tag,
    ctx: &RenderContext<'_>,
    name: &str,
) -> Result<Vec<Vec<String>>, RenderError> {
    let missing = || RenderError::MissingDataSet {
        tag: tag.name.clone(),
        name: name.to_owned(),
        line: tag.line,
    };

    let set = ctx.data_set(name).ok_or_else(missing)?;
    let rows = match set {
        Json::Array(rows) => rows,
        Json::Object(map) => map.get("rows").and_then(Json::as_array).ok_or_else(missing)?,
        _ => return Err(missing()),
    };

    Ok(rows
        .iter()
        .map(|row| match row {
            Json::Array(cells) => cells.iter().map(|c| escape_html(&cell_text(c))).collect(),
            other => vec![escape_html(&cell_text(other))],
        })
        .collect())
}

/// Rows from the first content group; cells are inline prose.
fn body_rows(tag: &Tag, ctx: &RenderContext<'_>) -> Vec<Vec<String>> {
    let Some(group) = tag.content.first() else {
        return Vec::new();
    };
    group
        .lines
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let line = line.strip_prefix('|').unwrap_or(line);
            let line = line.strip_suffix('|').unwrap_or(line);
            line.split('|')
                .map(|cell| ctx.render_inline(cell.trim()))
                .collect()
        })
        .collect()
}

fn cell_text(value: &Json) -> String {
    match value {
        Json::Null => String::new(),
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn write_row(out: &mut String, cell: &str, row: &[String]) {
    out.push_str("<tr>");
    for text in row {
        let _ = write!(out, "<{cell}>{text}</{cell}>");
    }
    out.push_str("</tr>");
}
