//! Text processing and normalization

use crate::processing::lexicon::Lexicon;
use std::sync::Arc;

/// Deterministic English normalizer: lowercase, strip punctuation and
/// digits, drop stopwords, lemmatize.
#[derive(Debug, Clone)]
pub struct TextProcessor {
    lexicon: Arc<Lexicon>,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new(Arc::new(Lexicon::english()))
    }
}

impl TextProcessor {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Normalized form of `text`. Empty input gives an empty string.
    pub fn normalize(&self, text: &str) -> String {
        self.tokenize(text).join(" ")
    }

    /// Lemmatized, stopword-free tokens in document order
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = Self::clean_text(text);

        cleaned
            .split_whitespace()
            .filter(|token| !self.lexicon.is_stop_word(token))
            .map(|token| self.lexicon.lemmatize(token))
            // a lemma may land on a stopword; drop it so a second pass is a no-op
            .filter(|lemma| !lemma.is_empty() && !self.lexicon.is_stop_word(lemma))
            .collect()
    }

    /// Lowercase and blank out everything that is not a letter or whitespace.
    fn clean_text(text: &str) -> String {
        text.to_lowercase()
            .chars()
            .map(|c| {
                if c.is_alphabetic() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_noise() {
        let processor = TextProcessor::default();
        let normalized = processor.normalize("Built 3 REST APIs, deployed them to AWS!!!");

        assert_eq!(normalized, "built rest api deployed aws");
    }

    #[test]
    fn test_normalize_lemmatizes_plurals() {
        let processor = TextProcessor::default();
        assert_eq!(processor.normalize("Managed teams and projects"), "managed team project");
    }

    #[test]
    fn test_empty_input() {
        let processor = TextProcessor::default();
        assert_eq!(processor.normalize(""), "");
        assert_eq!(processor.normalize("   \n\t "), "");
        assert_eq!(processor.normalize("the and of 2024"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let processor = TextProcessor::default();
        let samples = [
            "Experienced Python developer with AWS and Docker skills",
            "Led cross-functional teams; shipped 12 releases in 2023 (Q1-Q4).",
            "Analyses of cities, classes, boxes & watches",
            "Ünïcödé résumé; naïve café",
            "mens",
            "Womens health clinic",
            "Childrens hospital",
            "Peoples Bank",
            "Tuned caches for REST APIs in niche markets",
        ];
        for sample in samples {
            let once = processor.normalize(sample);
            assert_eq!(processor.normalize(&once), once, "sample: {sample}");
        }
    }

    #[test]
    fn test_tokenize_keeps_document_order() {
        let processor = TextProcessor::default();
        assert_eq!(
            processor.tokenize("Rust programming languages"),
            vec!["rust", "programming", "language"]
        );
    }
}
