//! Image and video tags, plus the `!` shortcut that picks one by extension.

use std::fmt::Write;

use crate::directive::{Tag, TagHandler};
use crate::error::RenderError;
use crate::html::{escape_html, write_attrs};
use crate::render::RenderContext;
use crate::value::POSITIONAL_KEY;

/// Tag name of the media shortcut.
pub const MEDIA_SHORTCUT: &str = "!";

/// File extensions rendered as video by the `!` shortcut.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogv", "mov", "m4v"];

/// Boolean data flags copied onto `<video>`, in output order.
const VIDEO_FLAGS: &[&str] = &["autoplay", "loop", "muted", "controls", "playsinline"];

/// Optional data keys copied onto `<img>`.
const IMAGE_KEYS: &[&str] = &["title", "width", "height", "loading"];

/// `<img>` from `src` or the positional value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Image;

impl TagHandler for Image {
    fn render(&self, tag: &Tag, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let src = ctx.asset_url(&tag.require_any(&["src", POSITIONAL_KEY])?);
        let alt = tag.get_string("alt").unwrap_or_default();

        let mut out = format!(
            r#"<img src="{}" alt="{}""#,
            escape_html(&src),
            escape_html(&alt)
        );
        for key in IMAGE_KEYS {
            if let Some(value) = tag.get_string(key) {
                let _ = write!(out, r#" {key}="{}""#, escape_html(&value));
            }
        }
        write_attrs(&mut out, &tag.attr);
        out.push('>');
        Ok(out)
    }
}

/// `<video>` from `src` or the positional value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Video;

impl TagHandler for Video {
    fn render(&self, tag: &Tag, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let src = ctx.asset_url(&tag.require_any(&["src", POSITIONAL_KEY])?);

        let mut out = format!(r#"<video src="{}""#, escape_html(&src));
        if let Some(poster) = tag.get_string("poster") {
            let _ = write!(out, r#" poster="{}""#, escape_html(&ctx.asset_url(&poster)));
        }
        for flag in VIDEO_FLAGS.iter().filter(|f| tag.flag(f)) {
            out.push(' ');
            out.push_str(flag);
        }
        write_attrs(&mut out, &tag.attr);
        out.push_str("></video>");
        Ok(out)
    }
}

/// `!` shortcut: video for known video extensions, image otherwise.
///
/// Uses the registry's `video` / `image` handlers when registered so overrides
/// apply to the shortcut too.
#[derive(Debug, Clone, Copy, Default)]
pub struct Media;

impl TagHandler for Media {
    fn render(&self, tag: &Tag, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let src = tag.require_any(&["src", POSITIONAL_KEY])?;
        let registry = ctx.options().registry();

        if is_video(&src) {
            registry.get("video").unwrap_or(&Video).render(tag, ctx)
        } else {
            registry.get("image").unwrap_or(&Image).render(tag, ctx)
        }
    }
}

/// Check the path's extension against [`VIDEO_EXTENSIONS`].
///
/// Query strings and fragments are ignored.
fn is_video(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let file = path.rsplit('/').next().unwrap_or(path);
    file.rsplit_once('.').is_some_and(|(_, ext)| {
        VIDEO_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    })
}
