//! Text segmentation.
//!
//! Riddle answers are short phrases, usually Chinese, with no spaces between
//! words. The default [`JiebaSegmenter`] cuts Han text into dictionary
//! words, so `香皂` and `香蕉` share no token. [`UnicodeSegmenter`] follows
//! Unicode word boundaries (UAX #29) instead and yields one token per Han
//! ideograph. Punctuation and whitespace never produce tokens.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use jieba_rs::Jieba;
use unicode_segmentation::UnicodeSegmentation;

/// Splits raw text into word-like tokens.
pub trait Segmenter: Send + Sync {
    /// Segment `text` into an ordered sequence of non-empty tokens.
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Dictionary-based Chinese word segmenter with HMM fallback for unknown
/// words. Latin words and numbers pass through whole.
///
/// The dictionary is loaded once per process and shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct JiebaSegmenter;

fn dictionary() -> &'static Jieba {
    static JIEBA: OnceLock<Jieba> = OnceLock::new();
    JIEBA.get_or_init(Jieba::new)
}

impl Segmenter for JiebaSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        dictionary()
            .cut(text, true)
            .into_iter()
            .filter(|word| word.chars().any(char::is_alphanumeric))
            .map(str::to_string)
            .collect()
    }
}

/// Segmenter based on Unicode word boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSegmenter;

impl Segmenter for UnicodeSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Tokenize with the default segmenter.
pub fn tokenize(text: &str) -> Vec<String> {
    JiebaSegmenter.segment(text)
}

/// Unique tokens of `text`, in sorted order.
pub fn token_set(segmenter: &dyn Segmenter, text: &str) -> BTreeSet<String> {
    segmenter.segment(text).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn han_text_splits_into_words() {
        assert_eq!(tokenize("香蕉"), vec!["香蕉"]);
        assert_eq!(tokenize("香皂"), vec!["香皂"]);
    }

    #[test]
    fn unicode_segmenter_splits_per_ideograph() {
        assert_eq!(UnicodeSegmenter.segment("香蕉"), vec!["香", "蕉"]);
    }

    #[test]
    fn latin_words_stay_whole() {
        assert_eq!(tokenize("Hello world 42"), vec!["Hello", "world", "42"]);
    }

    #[test]
    fn punctuation_is_dropped() {
        assert_eq!(tokenize("因为，它！"), vec!["因为", "它"]);
        assert_eq!(UnicodeSegmenter.segment("因为，它！"), vec!["因", "为", "它"]);
        assert!(tokenize("？？！…").is_empty());
    }

    #[test]
    fn blank_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t\n ").is_empty());
    }

    #[test]
    fn segmentation_is_deterministic() {
        let text = "为什么 Cat 不会飞？";
        assert_eq!(tokenize(text), tokenize(text));
        assert!(tokenize(text).iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn token_set_collapses_duplicates() {
        let set = token_set(&UnicodeSegmenter, "哈哈哈 ha ha");
        assert_eq!(set.len(), 2);
        assert!(set.contains("哈"));
        assert!(set.contains("ha"));
    }
}
