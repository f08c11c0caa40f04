//! Rule-separated content groups.
//!
//! A line consisting solely of `---` at the collection's own indentation does
//! not open a block; it splits the enclosing collection into sibling groups.

use super::fence::FenceTracker;
use super::indent::{base_indent, indent_of};
use crate::directive::ContentGroup;

/// Rule marker that separates groups.
const RULE: &str = "---";

/// Split lines into groups at base-level `---` lines.
///
/// Rules inside code fences or nested deeper than the base indentation are
/// ordinary content. Leading and trailing blank lines are dropped from each
/// group and empty groups are skipped. `first_line` is the source line of
/// `lines[0]`.
///
/// # Example
///
/// ```
/// use tagmark_renderer::blocks::split_groups;
///
/// let lines: Vec<String> = ["Before", "---", "After"].map(String::from).to_vec();
/// let groups = split_groups(&lines, 10);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].lines, vec!["Before"]);
/// assert_eq!(groups[1].line, 12);
/// ```
#[must_use]
pub fn split_groups(lines: &[String], first_line: usize) -> Vec<ContentGroup> {
    split_at_rules(lines, first_line).0
}

/// Split lines at base-level rules, reporting whether any rule was found.
pub(crate) fn split_at_rules(lines: &[String], first_line: usize) -> (Vec<ContentGroup>, bool) {
    let base = base_indent(lines);
    let mut fence = FenceTracker::new();
    let mut groups = Vec::new();
    let mut found_rule = false;
    let mut start = 0;

    for (idx, line) in lines.iter().enumerate() {
        let was_in_fence = fence.in_fence();
        fence.update(line);
        if was_in_fence || fence.in_fence() {
            continue;
        }

        if line.trim() == RULE && indent_of(line) == Some(base) {
            found_rule = true;
            push_group(&mut groups, &lines[start..idx], first_line + start);
            start = idx + 1;
        }
    }
    push_group(&mut groups, &lines[start..], first_line + start);

    (groups, found_rule)
}

fn push_group(groups: &mut Vec<ContentGroup>, lines: &[String], first_line: usize) {
    let Some(begin) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return;
    };
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(lines.len(), |i| i + 1);

    groups.push(ContentGroup::new(
        first_line + begin,
        lines[begin..end].to_vec(),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_no_rule_single_group() {
        let (groups, found) = split_at_rules(&lines(&["a", "", "b"]), 1);
        assert!(!found);
        assert_eq!(groups, vec![ContentGroup::new(1, lines(&["a", "", "b"]))]);
    }

    #[test]
    fn test_rule_splits_in_order() {
        let groups = split_groups(&lines(&["one", "two", "three", "---", "four"]), 5);
        assert_eq!(
            groups,
            vec![
                ContentGroup::new(5, lines(&["one", "two", "three"])),
                ContentGroup::new(9, lines(&["four"])),
            ]
        );
    }

    #[test]
    fn test_blank_lines_trimmed_with_line_numbers() {
        let groups = split_groups(&lines(&["", "a", "", "---", "", "", "b", ""]), 1);
        assert_eq!(groups[0], ContentGroup::new(2, lines(&["a"])));
        assert_eq!(groups[1], ContentGroup::new(7, lines(&["b"])));
    }

    #[test]
    fn test_nested_rule_is_content() {
        let src = lines(&["[.card]", "  a", "  ---", "  b"]);
        let (groups, found) = split_at_rules(&src, 1);
        assert!(!found);
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_rule_inside_fence_is_content() {
        let src = lines(&["```", "---", "```", "after"]);
        let (groups, found) = split_at_rules(&src, 1);
        assert!(!found);
        assert_eq!(groups[0].lines.len(), 4);
    }

    #[test]
    fn test_empty_groups_skipped() {
        let (groups, found) = split_at_rules(&lines(&["---", "a", "---", "", "---"]), 1);
        assert!(found);
        assert_eq!(groups, vec![ContentGroup::new(2, lines(&["a"]))]);
    }

    #[test]
    fn test_empty_input() {
        let (groups, found) = split_at_rules(&[], 1);
        assert!(!found);
        assert!(groups.is_empty());
    }
}
