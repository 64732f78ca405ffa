//! Sender display-name validation.
//!
//! Display names end up inside templated prompts, where characters like
//! colons and newlines would corrupt the transcript format. Names are
//! reduced to their first word and checked against a strict identifier
//! shape; anything else falls back to a fixed placeholder.

/// Placeholder substituted for display names that fail validation.
pub const FALLBACK_NAME: &str = "user";

/// Reduce a transport-supplied display name to a prompt-safe identifier.
///
/// Takes the first whitespace-separated word of the name and accepts it only
/// if it matches `[A-Za-z0-9_-]{1,64}`; otherwise returns [`FALLBACK_NAME`].
pub fn sanitize_display_name(name: Option<&str>) -> String {
    name.and_then(|n| n.split_whitespace().next())
        .filter(|first| is_valid_display_name(first))
        .unwrap_or(FALLBACK_NAME)
        .to_string()
}

fn is_valid_display_name(name: &str) -> bool {
    (1..=64).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_word_of_a_plain_name() {
        assert_eq!(sanitize_display_name(Some("Ada Lovelace")), "Ada");
        assert_eq!(sanitize_display_name(Some("grace_h-99")), "grace_h-99");
    }

    #[test]
    fn rejects_prompt_breaking_characters() {
        assert_eq!(sanitize_display_name(Some("Ada: hi")), FALLBACK_NAME);
        assert_eq!(sanitize_display_name(Some("línea")), FALLBACK_NAME);
        assert_eq!(sanitize_display_name(Some("semi;colon")), FALLBACK_NAME);
    }

    #[test]
    fn rejects_empty_overlong_and_missing_names() {
        assert_eq!(sanitize_display_name(None), FALLBACK_NAME);
        assert_eq!(sanitize_display_name(Some("")), FALLBACK_NAME);
        assert_eq!(sanitize_display_name(Some("   ")), FALLBACK_NAME);
        let long = "x".repeat(65);
        assert_eq!(sanitize_display_name(Some(&long)), FALLBACK_NAME);
    }
}
