//! Configuration management for the resume matcher

use crate::error::{MatcherError, Result};
use crate::input::manager::MIN_RESUME_CHARS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound on postings returned by a catalog search.
pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub matching: MatchingConfig,
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
}

/// Generative model collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub keyword_weight: f64,
    pub similarity_weight: f64,
    pub fallback_score_floor: u8,
    pub job_keyword_count: usize,
    pub resume_keyword_count: usize,
    pub similarity_max_features: usize,
    pub keyword_max_features: usize,
    pub section_char_limit: usize,
    pub prompt_char_limit: usize,
    pub min_relevance: f64,
    pub max_suggestions: usize,
    pub min_suggestion_score: u8,
    pub min_resume_chars: usize,
    /// Extra skill phrases added to the built-in vocabulary
    pub custom_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key_env: "GENAI_API_KEY".to_string(),
            timeout_secs: 30,
            max_output_tokens: 1024,
            temperature: 0.2,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            keyword_weight: 0.4,
            similarity_weight: 0.6,
            fallback_score_floor: 10,
            job_keyword_count: 15,
            resume_keyword_count: 20,
            similarity_max_features: 5000,
            keyword_max_features: 1000,
            section_char_limit: 1000,
            prompt_char_limit: 4000,
            min_relevance: 0.1,
            max_suggestions: MAX_SUGGESTIONS,
            min_suggestion_score: 20,
            min_resume_chars: MIN_RESUME_CHARS,
            custom_skills: Vec::new(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("jobs.csv"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Config {
    /// Load `config_path`, writing defaults there on first use.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        let m = &self.matching;
        let weights = m.keyword_weight + m.similarity_weight;
        let weights_valid = m.keyword_weight.is_finite()
            && m.similarity_weight.is_finite()
            && m.keyword_weight >= 0.0
            && m.similarity_weight >= 0.0
            && (weights - 1.0).abs() <= 1e-6;
        if !weights_valid {
            return Err(MatcherError::Configuration(format!(
                "Fallback weights must be non-negative and sum to 1.0 (got {} + {})",
                m.keyword_weight, m.similarity_weight
            )));
        }
        if m.fallback_score_floor > 100 || m.min_suggestion_score > 100 {
            return Err(MatcherError::Configuration(
                "Score floors must be within 0-100".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&m.min_relevance) {
            return Err(MatcherError::Configuration(format!(
                "min_relevance must be in [0, 1), got {}",
                m.min_relevance
            )));
        }
        if !(1..=MAX_SUGGESTIONS).contains(&m.max_suggestions) {
            return Err(MatcherError::Configuration(format!(
                "max_suggestions must be between 1 and {}, got {}",
                MAX_SUGGESTIONS, m.max_suggestions
            )));
        }
        if m.min_resume_chars < MIN_RESUME_CHARS {
            return Err(MatcherError::Configuration(format!(
                "min_resume_chars must be at least {}, got {}",
                MIN_RESUME_CHARS, m.min_resume_chars
            )));
        }
        if self.model.timeout_secs == 0 {
            return Err(MatcherError::Configuration(
                "Model timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
