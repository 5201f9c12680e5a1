//! Résumé × job matching and job catalog ranking

pub mod catalog;
pub mod engine;

pub use catalog::{load_job_catalog, sample_catalog, JobPosting, RankedSuggestion};
pub use engine::{MatchEngine, MatchResult, MatchSource};
