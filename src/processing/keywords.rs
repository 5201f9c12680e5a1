//! Salient-term extraction for a single document

use crate::processing::lexicon::Lexicon;
use crate::processing::text_processor::TextProcessor;
use crate::processing::tfidf::TfIdfVectorizer;
use std::sync::Arc;

pub const DEFAULT_KEYWORD_FEATURES: usize = 1000;

#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    processor: TextProcessor,
    vectorizer: TfIdfVectorizer,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(Arc::new(Lexicon::english()), DEFAULT_KEYWORD_FEATURES)
    }
}

impl KeywordExtractor {
    pub fn new(lexicon: Arc<Lexicon>, max_features: usize) -> Self {
        Self {
            processor: TextProcessor::new(lexicon.clone()),
            vectorizer: TfIdfVectorizer::new(lexicon).with_max_features(max_features),
        }
    }

    /// Top `top_n` unigrams/bigrams of `text` by TF-IDF weight.
    ///
    /// The document is its own corpus, so the weight reduces to normalized
    /// term frequency. Equal weights keep first-occurrence order.
    pub fn extract(&self, text: &str, top_n: usize) -> Vec<String> {
        let normalized = self.processor.normalize(text);
        if normalized.is_empty() || top_n == 0 {
            return Vec::new();
        }

        let matrix = self.vectorizer.fit_transform(&[normalized]);
        let Some(row) = matrix.rows.first() else {
            return Vec::new();
        };

        let mut weighted: Vec<(usize, f64)> = row.entries().to_vec();
        weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        weighted
            .into_iter()
            .take(top_n)
            .map(|(idx, _)| matrix.features[idx].clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_frequent_terms_first() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("Python developer. Python, Python and Docker. Docker.", 2);

        assert_eq!(keywords, vec!["python", "docker"]);
    }

    #[test]
    fn test_ties_keep_document_order() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("kubernetes terraform ansible", 3);

        assert_eq!(keywords, vec!["kubernetes", "terraform", "ansible"]);
    }

    #[test]
    fn test_bigrams_are_candidates() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("machine learning engineer", 10);

        assert!(keywords.contains(&"machine learning".to_string()));
        assert!(keywords.contains(&"learning engineer".to_string()));
    }

    #[test]
    fn test_respects_top_n() {
        let extractor = KeywordExtractor::default();
        let text = "rust tokio axum serde hyper tower tracing clap";

        assert_eq!(extractor.extract(text, 3).len(), 3);
        assert!(extractor.extract(text, 100).len() <= 100);
        assert!(extractor.extract(text, 0).is_empty());
    }

    #[test]
    fn test_empty_and_stopword_only_input() {
        let extractor = KeywordExtractor::default();

        assert!(extractor.extract("", 15).is_empty());
        assert!(extractor.extract("the and of which", 15).is_empty());
    }
}
