//! TF-IDF vectorization over unigrams and bigrams.
//!
//! Fitted per call on the full set of documents being compared. Uses
//! smoothed IDF (`ln((1 + n) / (1 + df)) + 1`) and L2-normalized rows, so
//! cosine similarity reduces to a dot product.

use crate::processing::lexicon::Lexicon;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Sparse row: (feature index, weight), sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Cosine similarity of two L2-normalized rows, in [0, 1].
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }

        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }

        if dot.is_finite() {
            dot.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Fitted feature space plus one row per input document.
#[derive(Debug, Clone, Default)]
pub struct TfIdfMatrix {
    /// Feature terms in vocabulary order.
    pub features: Vec<String>,
    pub rows: Vec<SparseVector>,
}

#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    lexicon: Arc<Lexicon>,
    max_features: Option<usize>,
}

impl TfIdfVectorizer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            max_features: None,
        }
    }

    /// Keep only the `max_features` terms most frequent across the corpus.
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Unigrams then bigrams of the stopword-filtered token stream.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.chars().count() >= 2)
            .filter(|t| !self.lexicon.is_tfidf_stop_word(t))
            .map(|t| t.to_string())
            .collect();

        let mut terms = tokens.clone();
        terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
        terms
    }

    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> TfIdfMatrix {
        let analyzed: Vec<Vec<String>> = documents.iter().map(|d| self.analyze(d.as_ref())).collect();

        // Vocabulary in first-occurrence order with corpus counts and document frequency
        let mut order: Vec<String> = Vec::new();
        let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for terms in &analyzed {
            let mut seen_in_doc: HashSet<&str> = HashSet::new();
            for term in terms {
                let count = corpus_counts.entry(term.as_str()).or_insert(0);
                if *count == 0 {
                    order.push(term.clone());
                }
                *count += 1;
                if seen_in_doc.insert(term.as_str()) {
                    *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        if let Some(limit) = self.max_features {
            if order.len() > limit {
                let mut ranked: Vec<(usize, &String)> = order.iter().enumerate().collect();
                // stable: ties keep first-occurrence order
                ranked.sort_by(|a, b| corpus_counts[b.1.as_str()].cmp(&corpus_counts[a.1.as_str()]));
                let mut keep: Vec<usize> = ranked.into_iter().take(limit).map(|(i, _)| i).collect();
                keep.sort_unstable();
                order = keep.into_iter().map(|i| order[i].clone()).collect();
            }
        }

        let vocabulary: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.as_str(), idx))
            .collect();

        let n = documents.len() as f64;
        let idf: Vec<f64> = order
            .iter()
            .map(|term| {
                let df = doc_freq.get(term.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = analyzed
            .iter()
            .map(|terms| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for term in terms {
                    if let Some(&idx) = vocabulary.get(term.as_str()) {
                        *counts.entry(idx).or_insert(0.0) += 1.0;
                    }
                }

                let mut entries: Vec<(usize, f64)> = counts
                    .into_iter()
                    .map(|(idx, tf)| (idx, tf * idf[idx]))
                    .collect();
                entries.sort_by_key(|(idx, _)| *idx);

                let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in entries.iter_mut() {
                        *w /= norm;
                    }
                }
                SparseVector { entries }
            })
            .collect();

        TfIdfMatrix {
            features: order,
            rows,
        }
    }
}
