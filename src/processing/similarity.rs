//! Cosine similarity in a TF-IDF space fitted per call

use crate::processing::lexicon::Lexicon;
use crate::processing::text_processor::TextProcessor;
use crate::processing::tfidf::TfIdfVectorizer;
use std::sync::Arc;

pub const DEFAULT_SIMILARITY_FEATURES: usize = 5000;

#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    processor: TextProcessor,
    vectorizer: TfIdfVectorizer,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(Arc::new(Lexicon::english()), DEFAULT_SIMILARITY_FEATURES)
    }
}

impl SimilarityScorer {
    pub fn new(lexicon: Arc<Lexicon>, max_features: usize) -> Self {
        Self {
            processor: TextProcessor::new(lexicon.clone()),
            vectorizer: TfIdfVectorizer::new(lexicon).with_max_features(max_features),
        }
    }

    /// Similarity of two texts in [0, 1].
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        self.rank_by_similarity(a, &[b])
            .first()
            .map(|(_, score)| *score)
            .unwrap_or(0.0)
    }

    /// Score every candidate against `query`, best first. Equal scores keep
    /// candidate order.
    pub fn rank_by_similarity<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Vec<(usize, f64)> {
        let mut ranked = self.score_all(query, candidates);
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }

    /// Scores in candidate order.
    pub fn score_all<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Vec<(usize, f64)> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let mut corpus = Vec::with_capacity(candidates.len() + 1);
        corpus.push(self.processor.normalize(query));
        corpus.extend(candidates.iter().map(|c| self.processor.normalize(c.as_ref())));

        let matrix = self.vectorizer.fit_transform(&corpus);
        let Some((query_row, candidate_rows)) = matrix.rows.split_first() else {
            return Vec::new();
        };

        candidate_rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (idx, query_row.cosine(row)))
            .collect()
    }
}
