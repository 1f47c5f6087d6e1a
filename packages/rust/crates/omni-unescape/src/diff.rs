//! Diff preview for rewritten files.

use similar::TextDiff;

/// Lines of unchanged context around each hunk.
const CONTEXT_LINES: usize = 3;

/// Unified diff between the on-disk and rewritten content of `name`.
///
/// Headers read `a/<name>` and `b/<name>`. Identical inputs produce an
/// empty string.
#[must_use]
pub fn generate_unified_diff(name: &str, original: &str, modified: &str) -> String {
    TextDiff::from_lines(original, modified)
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(&format!("a/{name}"), &format!("b/{name}"))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_removal_diff() {
        let original = "name: Qian\nimage: \\\"Heaven\\\"\nlines: 6\n";
        let modified = "name: Qian\nimage: \"Heaven\"\nlines: 6\n";
        let diff = generate_unified_diff("hexagram_01.yaml", original, modified);

        assert!(diff.starts_with("--- a/hexagram_01.yaml\n+++ b/hexagram_01.yaml\n@@"));
        assert!(diff.contains("\n-image: \\\"Heaven\\\"\n"));
        assert!(diff.contains("\n+image: \"Heaven\"\n"));
        assert!(diff.contains("\n name: Qian\n"));
    }

    #[test]
    fn test_joined_lines() {
        let diff = generate_unified_diff("hexagram_02.yaml", "a\\\nb\n", "a\nb\n");
        assert!(diff.contains("\n-a\\\n"));
        assert!(diff.contains("\n+a\n"));
    }

    #[test]
    fn test_no_changes() {
        assert!(generate_unified_diff("hexagram_03.yaml", "same\n", "same\n").is_empty());
    }
}
