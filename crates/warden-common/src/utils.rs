//! Small shared utilities

/// Truncate a string for use in an embed field, appending an ellipsis when
/// content was cut. Discord rejects fields longer than 1024 characters.
pub fn truncate_for_embed(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{truncated}...")
}

/// Render a minute count as a compact human-readable duration.
pub fn format_minutes(minutes: u32) -> String {
    if minutes < 60 {
        format!("{minutes} minutes")
    } else if minutes % 60 == 0 {
        format!("{} hours", minutes / 60)
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_for_embed("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "a".repeat(50);
        let result = truncate_for_embed(&long, 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte_boundary() {
        let text = "ção".repeat(20);
        let result = truncate_for_embed(&text, 10);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(5), "5 minutes");
        assert_eq!(format_minutes(120), "2 hours");
        assert_eq!(format_minutes(90), "1h 30m");
    }
}
