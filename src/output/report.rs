//! Report structures wrapping engine results with run metadata

use crate::matching::catalog::RankedSuggestion;
use crate::matching::engine::MatchResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    /// Version of the matcher used
    pub matcher_version: String,
    pub resume_file: String,
    /// Job description file, or `None` when given inline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_source: Option<String>,
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(resume_file: impl Into<String>, job_source: Option<String>, elapsed: Duration) -> Self {
        Self {
            generated_at: Utc::now(),
            matcher_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: resume_file.into(),
            job_source,
            processing_time_ms: elapsed.as_millis() as u64,
        }
    }
}

/// Résumé × job description result
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub metadata: ReportMetadata,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Catalog ranking result
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionReport {
    pub metadata: ReportMetadata,
    pub catalog_size: usize,
    pub suggestions: Vec<RankedSuggestion>,
}

/// Qualitative band for a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::Good => "GOOD",
            ScoreBand::Fair => "FAIR",
            ScoreBand::Poor => "POOR",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Strong match for this role",
            ScoreBand::Good => "Good match with a few gaps",
            ScoreBand::Fair => "Partial match, tailoring recommended",
            ScoreBand::Poor => "Weak match for this role",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::engine::MatchSource;

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(40), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(10), ScoreBand::Poor);
    }

    #[test]
    fn test_match_report_json_is_flat() {
        let report = MatchReport {
            metadata: ReportMetadata::new("cv.pdf", None, Duration::from_millis(12)),
            result: MatchResult {
                score: 70,
                strengths: vec!["python".into()],
                weaknesses: vec!["Missing keyword: java".into()],
                suggestions: vec!["Add or highlight experience with java".into()],
                source: MatchSource::Fallback,
            },
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["score"], 70);
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["metadata"]["resume_file"], "cv.pdf");
        assert_eq!(json["metadata"]["processing_time_ms"], 12);
        assert!(json["metadata"].get("job_source").is_none());
    }
}
