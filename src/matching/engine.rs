//! Résumé matching engine.
//!
//! `match_resume` asks the language model first and drops to the
//! deterministic TF-IDF pipeline on any model failure. `suggest_jobs` is
//! always statistical.

use crate::config::Config;
use crate::config::MatchingConfig;
use crate::error::{MatcherError, Result};
use crate::llm::client::{GeminiClient, LanguageModel, ModelError};
use crate::llm::prompts::{condense_resume, PromptParams, PromptTemplates};
use crate::llm::response::{ModelAssessment, ModelReply};
use crate::matching::catalog::{JobPosting, RankedSuggestion};
use crate::processing::document::{SectionSegmenter, SectionType};
use crate::processing::keywords::KeywordExtractor;
use crate::processing::lexicon::Lexicon;
use crate::processing::similarity::SimilarityScorer;
use crate::processing::skills::SkillExtractor;
use crate::processing::text_processor::TextProcessor;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const NO_STRENGTHS: &str = "No clear strengths identified";
pub const NO_WEAKNESSES: &str = "No specific weaknesses identified";
pub const NO_SUGGESTIONS: &str = "No specific suggestions identified";
pub const GENERIC_SUGGESTION: &str =
    "Use more specific examples of achievements related to the job requirements";

const MAX_FALLBACK_WEAKNESSES: usize = 5;
const MAX_FALLBACK_SUGGESTIONS: usize = 3;

/// Which pipeline produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub source: MatchSource,
}

pub struct MatchEngine<M = GeminiClient> {
    processor: TextProcessor,
    segmenter: SectionSegmenter,
    skills: SkillExtractor,
    keywords: KeywordExtractor,
    similarity: SimilarityScorer,
    prompts: PromptTemplates,
    model: Option<M>,
    model_timeout: Duration,
    settings: MatchingConfig,
}

impl MatchEngine<GeminiClient> {
    /// Engine backed by the configured Gemini model. A disabled model or a
    /// missing API key leaves the engine statistical-only.
    pub fn from_config(config: &Config) -> Result<Self> {
        let model = if config.model.enabled {
            match GeminiClient::from_config(&config.model) {
                Ok(client) => {
                    info!("Using model {} for résumé assessment", client.model());
                    Some(client)
                }
                Err(e) => {
                    warn!("{}. Résumé matching will use the statistical fallback.", e);
                    None
                }
            }
        } else {
            info!("Model assessment disabled, using the statistical pipeline");
            None
        };

        Self::with_model(model, config)
    }

    pub fn statistical(config: &Config) -> Result<Self> {
        Self::with_model(None, config)
    }
}

impl<M: LanguageModel> MatchEngine<M> {
    pub fn with_model(model: Option<M>, config: &Config) -> Result<Self> {
        let lexicon = Lexicon::with_custom_skills(config.matching.custom_skills.clone());
        Self::with_lexicon(model, config, Arc::new(lexicon))
    }

    pub fn with_lexicon(model: Option<M>, config: &Config, lexicon: Arc<Lexicon>) -> Result<Self> {
        config.validate()?;
        let settings = config.matching.clone();

        Ok(Self {
            processor: TextProcessor::new(lexicon.clone()),
            segmenter: SectionSegmenter::new(),
            skills: SkillExtractor::new(lexicon.clone())?,
            keywords: KeywordExtractor::new(lexicon.clone(), settings.keyword_max_features),
            similarity: SimilarityScorer::new(lexicon, settings.similarity_max_features),
            prompts: PromptTemplates::default(),
            model,
            model_timeout: Duration::from_secs(config.model.timeout_secs),
            settings,
        })
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Score a résumé against one job description.
    ///
    /// Fails only on unusable input; model trouble of any kind is absorbed
    /// by the statistical fallback.
    pub async fn match_resume(&self, resume_text: &str, job_description: &str) -> Result<MatchResult> {
        self.validate_resume(resume_text)?;
        if job_description.trim().is_empty() {
            return Err(MatcherError::InvalidInput(
                "Job description is empty".to_string(),
            ));
        }

        let Some(model) = self.model.as_ref() else {
            debug!("No model configured, matching statistically");
            return Ok(self.fallback_match(resume_text, job_description));
        };

        let raw = match self.ask_model(model, resume_text, job_description).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Model call failed, using statistical fallback: {}", e);
                return Ok(self.fallback_match(resume_text, job_description));
            }
        };

        match ModelReply::parse(&raw).into_assessment() {
            Some(assessment) => {
                info!("Résumé assessed by model");
                Ok(self.complete_assessment(assessment, resume_text, job_description))
            }
            None => {
                warn!(
                    "Model reply had no usable fields ({} chars), using statistical fallback",
                    raw.len()
                );
                Ok(self.fallback_match(resume_text, job_description))
            }
        }
    }

    async fn ask_model(
        &self,
        model: &M,
        resume_text: &str,
        job_description: &str,
    ) -> std::result::Result<String, ModelError> {
        let sections = self.segmenter.segment(resume_text);
        let skills = self.skills.extract(resume_text);
        let condensed = condense_resume(
            resume_text,
            &sections,
            self.settings.section_char_limit,
            self.settings.prompt_char_limit,
        );
        let request = self.prompts.render(&PromptParams {
            condensed_resume: &condensed,
            skills: &skills,
            job_description,
        });

        match tokio::time::timeout(self.model_timeout, model.generate(&request)).await {
            Ok(reply) => reply,
            Err(_) => Err(ModelError::Timeout(self.model_timeout.as_secs())),
        }
    }

    /// Patch fields the model left out.
    fn complete_assessment(
        &self,
        assessment: ModelAssessment,
        resume_text: &str,
        job_description: &str,
    ) -> MatchResult {
        let score = match assessment.score {
            Some(score) => score.min(100),
            None => {
                debug!("Model reply had no score, using the statistical score");
                self.fallback_match(resume_text, job_description).score
            }
        };

        MatchResult {
            score,
            strengths: or_placeholder(assessment.strengths, NO_STRENGTHS),
            weaknesses: or_placeholder(assessment.weaknesses, NO_WEAKNESSES),
            suggestions: or_placeholder(assessment.suggestions, NO_SUGGESTIONS),
            source: MatchSource::Model,
        }
    }

    /// Deterministic keyword-overlap and TF-IDF similarity assessment.
    pub fn fallback_match(&self, resume_text: &str, job_description: &str) -> MatchResult {
        let s = &self.settings;

        let normalized_resume = self.processor.normalize(resume_text);
        let similarity = self.similarity.similarity(resume_text, job_description);

        let skills = self.skills.extract(resume_text);
        let job_keywords = self.keywords.extract(job_description, s.job_keyword_count);

        let sections = self.segmenter.segment(resume_text);
        let experience = sections
            .get(SectionType::Experience)
            .map(|body| self.processor.normalize(body))
            .unwrap_or_else(|| normalized_resume.clone());

        let hits: usize = job_keywords
            .iter()
            .map(|keyword| {
                let in_skills = skills.iter().any(|skill| skill.contains(keyword.as_str()));
                let in_experience = contains_phrase(&experience, keyword);
                in_skills as usize + in_experience as usize
            })
            .sum();
        let overlap = if job_keywords.is_empty() {
            0.0
        } else {
            hits as f64 / (2 * job_keywords.len()) as f64
        };

        let raw_score = s.keyword_weight * overlap * 100.0 + s.similarity_weight * similarity * 100.0;
        let score = (raw_score.round() as i64).clamp(s.fallback_score_floor as i64, 100) as u8;

        debug!(
            "Fallback: similarity={:.3} overlap={:.3} ({} hits over {} keywords) score={}",
            similarity,
            overlap,
            hits,
            job_keywords.len(),
            score
        );

        let strengths: Vec<String> = skills
            .iter()
            .filter(|skill| job_keywords.iter().any(|k| skill.contains(k.as_str())))
            .cloned()
            .collect();

        let resume_keywords = self.keywords.extract(resume_text, s.resume_keyword_count);
        let missing: Vec<&String> = job_keywords
            .iter()
            .filter(|k| !resume_keywords.iter().any(|rk| rk.contains(k.as_str())))
            .collect();

        let weaknesses = missing
            .iter()
            .take(MAX_FALLBACK_WEAKNESSES)
            .map(|k| format!("Missing keyword: {}", k))
            .collect();

        let mut suggestions: Vec<String> = missing
            .iter()
            .take(MAX_FALLBACK_SUGGESTIONS)
            .map(|k| format!("Add or highlight experience with {}", k))
            .collect();
        suggestions.push(GENERIC_SUGGESTION.to_string());

        info!("Résumé assessed statistically (score {})", score);

        MatchResult {
            score,
            strengths: or_placeholder(strengths, NO_STRENGTHS),
            weaknesses: or_placeholder(weaknesses, NO_WEAKNESSES),
            suggestions,
            source: MatchSource::Fallback,
        }
    }

    /// Rank catalog postings against a résumé, best first.
    pub fn suggest_jobs(&self, resume_text: &str, postings: &[JobPosting]) -> Result<Vec<RankedSuggestion>> {
        self.validate_resume(resume_text)?;
        if postings.is_empty() {
            return Ok(Vec::new());
        }

        let s = &self.settings;
        let skills = self.skills.extract(resume_text).join(" ");
        let experience = self
            .segmenter
            .segment(resume_text)
            .get(SectionType::Experience)
            .map(|body| self.processor.normalize(body))
            .unwrap_or_default();

        // skills repeated to weight them above free text
        let combined = [
            self.processor.normalize(resume_text),
            skills.clone(),
            skills,
            experience,
        ]
        .join(" ");

        let posting_texts: Vec<String> = postings.iter().map(JobPosting::match_text).collect();
        let ranked = self.similarity.rank_by_similarity(&combined, &posting_texts);

        let suggestions: Vec<RankedSuggestion> = ranked
            .into_iter()
            .filter(|(_, similarity)| *similarity > s.min_relevance)
            .take(s.max_suggestions)
            .map(|(idx, similarity)| {
                let score = ((similarity * 100.0).round() as u8).max(s.min_suggestion_score);
                RankedSuggestion {
                    posting: postings[idx].clone(),
                    match_score: score.min(100),
                }
            })
            .collect();

        info!(
            "{} of {} postings passed the relevance threshold",
            suggestions.len(),
            postings.len()
        );
        Ok(suggestions)
    }

    fn validate_resume(&self, resume_text: &str) -> Result<()> {
        let length = resume_text.trim().chars().count();
        if length < self.settings.min_resume_chars {
            return Err(MatcherError::InvalidInput(format!(
                "Résumé text is too short ({} characters, need at least {})",
                length, self.settings.min_resume_chars
            )));
        }
        Ok(())
    }
}

fn or_placeholder(items: Vec<String>, placeholder: &str) -> Vec<String> {
    if items.is_empty() {
        vec![placeholder.to_string()]
    } else {
        items
    }
}

/// Whole-word phrase containment in space-joined normalized text.
fn contains_phrase(text: &str, phrase: &str) -> bool {
    !phrase.is_empty() && format!(" {} ", text).contains(&format!(" {} ", phrase))
}
