//! Résumé to job matching: generative-model scoring with a deterministic
//! TF-IDF fallback, and job catalog ranking.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod matching;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use matching::{JobPosting, MatchEngine, MatchResult, MatchSource, RankedSuggestion};
