//! Skill extraction against the curated skill vocabulary

use crate::error::{MatcherError, Result};
use crate::processing::lexicon::Lexicon;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Shorter matches are treated as noise ("r", "c#").
const MIN_SKILL_CHARS: usize = 3;

/// Deduplicated, lowercase skills. Iterates alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    pub fn join(&self, separator: &str) -> String {
        self.to_vec().join(separator)
    }
}

impl FromIterator<String> for SkillSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Exact phrase matcher over the skill vocabulary
pub struct SkillExtractor {
    exact_matcher: AhoCorasick,
    skills: Vec<String>,
    skill_tokens: Vec<Vec<String>>,
}

impl SkillExtractor {
    pub fn new(lexicon: Arc<Lexicon>) -> Result<Self> {
        let skills: Vec<String> = lexicon
            .skills()
            .iter()
            .filter(|s| s.chars().count() >= MIN_SKILL_CHARS)
            .cloned()
            .collect();

        // Standard semantics so overlapping hits ("react" inside "react native") all surface
        let exact_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&skills)
            .map_err(|e| MatcherError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        let skill_tokens = skills
            .iter()
            .map(|s| s.split_whitespace().map(|t| t.to_string()).collect())
            .collect();

        Ok(Self {
            exact_matcher,
            skills,
            skill_tokens,
        })
    }

    /// All vocabulary skills present in `text` as whole words or phrases.
    pub fn extract(&self, text: &str) -> SkillSet {
        let lowered = text.to_lowercase();
        let mut found = BTreeSet::new();

        for mat in self.exact_matcher.find_overlapping_iter(&lowered) {
            if is_word_boundary(&lowered, mat.start(), mat.end()) {
                found.insert(self.skills[mat.pattern().as_usize()].clone());
            }
        }

        // Token pass catches phrases split across line breaks or runs of spaces
        let words: Vec<&str> = lowered.unicode_words().collect();
        for (skill, tokens) in self.skills.iter().zip(&self.skill_tokens) {
            if found.contains(skill) || tokens.is_empty() {
                continue;
            }
            if words
                .windows(tokens.len())
                .any(|window| window.iter().zip(tokens).all(|(w, t)| *w == t.as_str()))
            {
                found.insert(skill.clone());
            }
        }

        SkillSet(found)
    }
}

/// True when the match is not glued to an adjacent letter or digit.
fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| c.is_alphanumeric()) && !after.is_some_and(|c| c.is_alphanumeric())
}
