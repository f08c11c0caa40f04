//! Relative indentation helpers.
//!
//! Indentation counts leading whitespace characters. Tabs and spaces are not
//! distinguished; only comparisons between lines matter.

/// Leading whitespace width of a line, or `None` for a blank line.
pub(crate) fn indent_of(line: &str) -> Option<usize> {
    let width = line.chars().take_while(|c| c.is_whitespace()).count();
    if line.chars().nth(width).is_none() {
        None
    } else {
        Some(width)
    }
}

/// Smallest indentation among non-blank lines (0 when all are blank).
pub(crate) fn base_indent<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .filter_map(|l| indent_of(l.as_ref()))
        .min()
        .unwrap_or(0)
}

/// Remove up to `width` leading whitespace characters.
pub(crate) fn strip_indent(line: &str, width: usize) -> &str {
    for (taken, (idx, c)) in line.char_indices().enumerate() {
        if taken == width || !c.is_whitespace() {
            return &line[idx..];
        }
    }
    ""
}

/// Strip the common indentation from all lines; blank lines become empty.
pub(crate) fn dedent(lines: &[String]) -> Vec<String> {
    let base = base_indent(lines);
    lines
        .iter()
        .map(|l| {
            if indent_of(l).is_some() {
                strip_indent(l, base).to_owned()
            } else {
                String::new()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_of() {
        assert_eq!(indent_of("foo"), Some(0));
        assert_eq!(indent_of("  foo"), Some(2));
        assert_eq!(indent_of("\tfoo"), Some(1));
        assert_eq!(indent_of(""), None);
        assert_eq!(indent_of("   "), None);
    }

    #[test]
    fn test_base_indent_ignores_blank_lines() {
        assert_eq!(base_indent(&["    a", "", "  b", "      c"]), 2);
        assert_eq!(base_indent::<&str>(&[]), 0);
        assert_eq!(base_indent(&["", "  "]), 0);
    }

    #[test]
    fn test_strip_indent() {
        assert_eq!(strip_indent("    foo", 2), "  foo");
        assert_eq!(strip_indent("  foo", 4), "foo");
        assert_eq!(strip_indent("foo", 2), "foo");
        assert_eq!(strip_indent("   ", 2), " ");
        assert_eq!(strip_indent("  ", 4), "");
    }

    #[test]
    fn test_dedent_keeps_relative_indentation() {
        let lines: Vec<String> = ["  * a", "    nested", "", "  * b"]
            .iter()
            .map(|s| (*s).to_owned())
            .collect();
        assert_eq!(dedent(&lines), vec!["* a", "  nested", "", "* b"]);
    }

    #[test]
    fn test_dedent_mixed_tabs_and_spaces() {
        let lines: Vec<String> = ["\tfoo", " \tbar"].iter().map(|s| (*s).to_owned()).collect();
        assert_eq!(dedent(&lines), vec!["foo", "\tbar"]);
    }
}
