//! Conversation title prompt and response parsing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Response language used when the caller does not ask for one.
pub const DEFAULT_RESPONSE_LANGUAGE: &str = "English";

/// Captures a title optionally wrapped in one layer of single or double quotes.
static QUOTED_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^["']?([^"']+)["']?$"#).unwrap_or_else(|e| panic!("invalid title regex: {e}"))
});

/// System prompt sent ahead of the first message when asking for a title.
pub fn title_system_prompt(response_language: &str) -> String {
    format!(
        "You are a helpful assistant for Elastic Security. Assume the following message is the \
         start of a conversation between you and a user; give this conversation a title based \
         on the content below. DO NOT UNDER ANY CIRCUMSTANCES wrap this title in single or \
         double quotes. This title is shown in a list of conversations to the user, so title it \
         for the user, not for you. Please create the title in {response_language}."
    )
}

/// Strips a single layer of surrounding quotes from an LLM title.
///
/// Text that does not match (for example because it contains a quote in the
/// middle) is returned unchanged.
pub fn extract_title(raw: &str) -> String {
    QUOTED_TITLE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_double_quotes() {
        assert_eq!(extract_title("\"Hello, World!\""), "Hello, World!");
    }

    #[test]
    fn strips_single_quotes() {
        assert_eq!(extract_title("'Another Example'"), "Another Example");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(extract_title("JustTextWithoutQuotes"), "JustTextWithoutQuotes");
    }

    #[test]
    fn inner_quotes_fall_back_to_raw_text() {
        assert_eq!(extract_title("User's alert"), "User's alert");
    }

    #[test]
    fn prompt_names_the_language() {
        assert!(title_system_prompt("French").ends_with("Please create the title in French."));
    }
}
