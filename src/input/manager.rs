//! Input manager for handling different file types

use crate::error::{MatcherError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Shortest résumé text, once trimmed, worth matching.
pub const MIN_RESUME_CHARS: usize = 10;

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    min_resume_chars: usize,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            min_resume_chars: MIN_RESUME_CHARS,
        }
    }

    pub fn with_min_resume_chars(mut self, min_chars: usize) -> Self {
        self.min_resume_chars = min_chars;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if let Some(cached_text) = self.cache.get(path) {
            debug!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(MatcherError::UnsupportedFormat(format!(
                    "{} (supported: .pdf, .docx, .txt, .md)",
                    path.display()
                )));
            }
        };

        self.cache.insert(path.to_path_buf(), text.clone());

        Ok(text)
    }

    /// Extract a résumé and reject files with no meaningful text.
    pub async fn load_resume(&mut self, path: &Path) -> Result<String> {
        let text = self.extract_text(path).await?;
        let length = text.trim().chars().count();
        if length < self.min_resume_chars {
            return Err(MatcherError::InvalidInput(format!(
                "Could not extract meaningful text from {} ({} characters)",
                path.display(),
                length
            )));
        }
        Ok(text)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
