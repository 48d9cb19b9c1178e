//! Sentence tokenization shared by training and puzzle building.

/// Characters removed from sentences before splitting into words:
/// period, comma, exclamation mark and the Persian question mark.
pub const PUNCTUATION: &[char] = &['.', ',', '!', '\u{061f}'];

/// Remove every punctuation character from `text`.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !PUNCTUATION.contains(c)).collect()
}

/// Strip punctuation and split on whitespace runs. Never yields empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    strip_punctuation(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// The tokens of `text` rejoined with single spaces.
pub fn normalize(text: &str) -> String {
    tokenize(text).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_basic() {
        assert_eq!(tokenize("Hello, world."), vec!["Hello", "world"]);
    }

    #[test]
    fn tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  The   sky\tis\nblue  "), vec!["The", "sky", "is", "blue"]);
    }

    #[test]
    fn tokenize_persian_question_mark() {
        assert_eq!(tokenize("هوا سرد است؟"), vec!["هوا", "سرد", "است"]);
    }

    #[test]
    fn detached_punctuation_is_dropped() {
        assert_eq!(tokenize("wow ! ok"), vec!["wow", "ok"]);
    }

    #[test]
    fn other_marks_are_kept() {
        assert_eq!(tokenize("everyone's duty?"), vec!["everyone's", "duty?"]);
    }

    #[test]
    fn punctuation_only_is_empty() {
        assert!(tokenize(" . , ! ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn normalize_matches_joined_tokens() {
        assert_eq!(normalize("I  eat, an apple."), "I eat an apple");
    }
}
