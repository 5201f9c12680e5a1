//! Integration tests for the resume matcher

use resume_matcher::config::Config;
use resume_matcher::input::manager::InputManager;
use resume_matcher::llm::{LanguageModel, ModelError, ModelRequest};
use resume_matcher::matching::{load_job_catalog, JobPosting, MatchEngine, MatchSource};
use resume_matcher::processing::{KeywordExtractor, SimilarityScorer, SkillExtractor, TextProcessor};
use resume_matcher::processing::{Lexicon, SectionSegmenter, SectionType};
use resume_matcher::MatcherError;
use std::path::Path;
use std::sync::Arc;

struct CannedModel(&'static str);

impl LanguageModel for CannedModel {
    async fn generate(&self, _request: &ModelRequest) -> Result<String, ModelError> {
        Ok(self.0.to_string())
    }
}

fn statistical_engine() -> MatchEngine {
    MatchEngine::statistical(&Config::default()).unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Node.js"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let err = manager
        .extract_text(Path::new("tests/fixtures/unsupported.xyz"))
        .await
        .unwrap_err();

    assert!(matches!(err, MatcherError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/nonexistent.txt"))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_sections_and_skills_from_markdown_resume() {
    let text = InputManager::new()
        .load_resume(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();

    let sections = SectionSegmenter::new().segment(&text);
    assert!(sections.contains(SectionType::Experience));
    assert!(sections.contains(SectionType::Education));
    assert!(sections.get(SectionType::Skills).unwrap().contains("Kubernetes"));

    let skills = SkillExtractor::new(Arc::new(Lexicon::english()))
        .unwrap()
        .extract(&text);
    for skill in ["python", "react", "node.js", "aws", "docker", "kubernetes"] {
        assert!(skills.contains(skill), "missing {skill}");
    }
}

#[test]
fn test_normalize_is_idempotent_on_fixture() {
    let text = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();
    let processor = TextProcessor::default();

    let once = processor.normalize(&text);
    assert!(!once.is_empty());
    assert_eq!(processor.normalize(&once), once);
}

#[test]
fn test_self_similarity_and_keywords_on_fixture() {
    let text = std::fs::read_to_string("tests/fixtures/job_backend.txt").unwrap();

    let scorer = SimilarityScorer::default();
    assert!((scorer.similarity(&text, &text) - 1.0).abs() < 1e-9);
    assert_eq!(scorer.similarity("", &text), 0.0);

    let keywords = KeywordExtractor::default().extract(&text, 15);
    assert!(keywords.len() <= 15);
    assert!(keywords.contains(&"python".to_string()) || keywords.contains(&"engineer".to_string()));
}

#[tokio::test]
async fn test_fixture_resume_matches_backend_job() {
    let engine = statistical_engine();
    let resume = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();
    let job = std::fs::read_to_string("tests/fixtures/job_backend.txt").unwrap();

    let result = engine.match_resume(&resume, &job).await.unwrap();

    assert_eq!(result.source, MatchSource::Fallback);
    assert!((10..=100).contains(&result.score));
    assert!(result.strengths.contains(&"python".to_string()));
    assert!(!result.weaknesses.is_empty());
    assert!(!result.suggestions.is_empty());
}

#[tokio::test]
async fn test_overlapping_resume_beats_unrelated_resume() {
    let engine = statistical_engine();
    let job = "Looking for a Python engineer familiar with cloud (AWS) and containerization (Docker)";

    let strong = engine
        .match_resume("Experienced Python developer with AWS and Docker skills", job)
        .await
        .unwrap();
    let weak = engine
        .match_resume("Poet and novelist, skilled in creative writing", job)
        .await
        .unwrap();

    assert!(strong.score > weak.score);
    for skill in ["python", "aws", "docker"] {
        assert!(strong.strengths.contains(&skill.to_string()));
    }
}

#[tokio::test]
async fn test_poet_scores_low_against_backend_role() {
    let result = statistical_engine()
        .match_resume(
            "Poet and novelist, skilled in creative writing",
            "Seeking senior backend engineer, Java, Spring, Kubernetes",
        )
        .await
        .unwrap();

    assert!(result.score < 30);
    assert!(result
        .weaknesses
        .iter()
        .all(|w| w.starts_with("Missing keyword: ")));
    assert!(result.weaknesses.contains(&"Missing keyword: java".to_string()));
}

#[tokio::test]
async fn test_garbled_model_output_still_yields_full_result() {
    let engine = MatchEngine::with_model(
        Some(CannedModel("<<<%%% model overloaded %%%>>>")),
        &Config::default(),
    )
    .unwrap();

    let result = engine
        .match_resume(
            "Experienced Python developer with AWS and Docker skills",
            "Python engineer with AWS",
        )
        .await
        .unwrap();

    assert_eq!(result.source, MatchSource::Fallback);
    assert!((10..=100).contains(&result.score));
    assert!(!result.strengths.is_empty());
    assert!(!result.weaknesses.is_empty());
    assert!(!result.suggestions.is_empty());
}

#[tokio::test]
async fn test_model_score_is_clamped() {
    let engine = MatchEngine::with_model(
        Some(CannedModel(r#"{"score": 250, "strengths": [], "weaknesses": [], "suggestions": []}"#)),
        &Config::default(),
    )
    .unwrap();

    let result = engine
        .match_resume("Experienced Python developer", "Python engineer")
        .await
        .unwrap();

    assert_eq!(result.source, MatchSource::Model);
    assert_eq!(result.score, 100);
    assert_eq!(result.strengths.len(), 1);
}

#[test]
fn test_catalog_ranking_from_csv() {
    let postings = load_job_catalog(Path::new("tests/fixtures/jobs.csv")).unwrap();
    assert_eq!(postings.len(), 5);
    assert!(postings[4].description.is_none());

    let resume = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();
    let suggestions = statistical_engine().suggest_jobs(&resume, &postings).unwrap();

    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= 5);
    assert_eq!(suggestions[0].posting.title, "Python Backend Engineer");
    assert!(suggestions.iter().all(|s| s.posting.title != "Pastry Chef"));
    assert!(suggestions.iter().all(|s| s.match_score >= 20));
    assert!(suggestions
        .windows(2)
        .all(|pair| pair[0].match_score >= pair[1].match_score));
}

#[test]
fn test_title_echo_ranks_first() {
    let postings = vec![
        JobPosting::new("Marketing Coordinator", "Brandly").with_description("Plan social media campaigns"),
        JobPosting::new("Rust Systems Engineer", "Ferris Ltd"),
        JobPosting::new("Accountant", "Ledger LLP").with_description("Prepare tax filings"),
    ];

    let suggestions = statistical_engine()
        .suggest_jobs(
            "Rust systems engineer. Rust engineer for embedded systems and Rust compilers.",
            &postings,
        )
        .unwrap();

    assert_eq!(suggestions[0].posting.title, "Rust Systems Engineer");
}

#[test]
fn test_empty_catalog_and_short_resume() {
    let engine = statistical_engine();

    assert!(engine
        .suggest_jobs("Experienced Python developer", &[])
        .unwrap()
        .is_empty());

    let err = engine
        .suggest_jobs("short", &[JobPosting::new("SRE", "Uptime")])
        .unwrap_err();
    assert!(err.is_input_error());
}
