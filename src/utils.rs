//! String helpers used for prompt building, snippets, and log output.
//!
//! All truncation here counts characters rather than bytes. The scraped
//! sources are not ASCII, and slicing a multi-byte sequence mid-character
//! would panic.

/// Take the first `max` characters of a string.
///
/// Returns the whole string when it is already short enough, so no
/// allocation-visible difference exists for the common case.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("hello", 3), "hel");
/// assert_eq!(truncate_chars("hi", 10), "hi");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the characters dropped.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        format!("{}…(+{} chars)", truncate_chars(s, max), total - max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_string() {
        assert_eq!(truncate_chars("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_chars_exact_boundary() {
        assert_eq!(truncate_chars("abcdef", 6), "abcdef");
        assert_eq!(truncate_chars("abcdef", 5), "abcde");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        // Vietnamese headline text, multi-byte throughout.
        let s = "Công nghệ trí tuệ nhân tạo";
        let cut = truncate_chars(s, 9);
        assert_eq!(cut, "Công nghệ");
        assert_eq!(cut.chars().count(), 9);
    }

    #[test]
    fn test_truncate_chars_empty() {
        assert_eq!(truncate_chars("", 10), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("short", 100), "short");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 chars)"));
    }
}
