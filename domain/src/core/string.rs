//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Single-line preview of a longer text: whitespace runs (including
/// newlines) collapse to one space before truncation.
pub fn preview(s: &str, max_len: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&collapsed, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 'é' is 2 bytes; cutting inside it backs up to the previous boundary
        assert_eq!(truncate("ééééé", 20), "ééééé");
        assert_eq!(truncate("ééééé", 8), "éé...");
    }

    #[test]
    fn test_truncate_emoji() {
        // 4 bytes each: max_len=10 -> target=7 -> boundary at 4
        assert_eq!(truncate("👋🌍🎉", 10), "👋...");
        assert_eq!(truncate("👋🌍🎉", 11), "👋🌍...");
    }

    #[test]
    fn test_preview_collapses_whitespace() {
        assert_eq!(preview("Example\n\n  Domain   text", 100), "Example Domain text");
        assert_eq!(preview("Example\nDomain text", 10), "Example...");
    }
}
