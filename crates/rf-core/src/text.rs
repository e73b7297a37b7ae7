//! Small text helpers shared across the validation layer.

/// Count whitespace-separated words in a string.
///
/// Used by the output validator to enforce minimum description length.
/// Punctuation attached to a word counts as part of that word.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_simple() {
        assert_eq!(word_count("one two three"), 3);
    }

    #[test]
    fn test_word_count_empty() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn test_word_count_collapses_whitespace() {
        assert_eq!(word_count("a  b\n\tc"), 3);
    }

    #[test]
    fn test_word_count_punctuation_attached() {
        assert_eq!(word_count("null, empty, or blank."), 4);
    }
}
