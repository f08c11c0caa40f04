//! Code fences: runs of three or more backticks or tildes.
//!
//! Lines between an opening and closing fence are verbatim content.

/// Marker of an open fence. A closing line needs the same character repeated
/// at least `len` times and nothing else.
#[derive(Debug, Clone, Copy)]
struct Marker {
    ch: char,
    len: usize,
}

/// Split an opening fence line into its marker and annotation.
fn open_fence(line: &str) -> Option<(Marker, &str)> {
    let line = line.trim_start();
    let ch = line.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = line.len() - line.trim_start_matches(ch).len();
    let info = &line[len..];
    if len < 3 || (ch == '`' && info.contains('`')) {
        return None;
    }
    Some((Marker { ch, len }, info.trim()))
}

/// Annotation after an opening fence (`js.pretty` in ```` ```js.pretty ````),
/// or `None` when the line opens no fence.
pub(crate) fn fence_info(line: &str) -> Option<&str> {
    open_fence(line).map(|(_, info)| info)
}

/// Fence state for a line-by-line scan.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Marker>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line. Returns `true` if it opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        match self.open {
            Some(Marker { ch, len }) => {
                let rest = line.trim_start().trim_start_matches(ch);
                let run = line.trim_start().len() - rest.len();
                let closes = run >= len && rest.trim().is_empty();
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                self.open = open_fence(line).map(|(marker, _)| marker);
                self.open.is_some()
            }
        }
    }
}
