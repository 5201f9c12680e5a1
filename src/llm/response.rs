//! Defensive parsing of model replies into an assessment.

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::LazyLock;

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid integer regex"));

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+[.)]\s*|[-*•]+\s*)+").expect("valid list marker regex")
});

/// The four-field record a model is asked for. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModelAssessment {
    #[serde(default, alias = "Score", deserialize_with = "lenient_score")]
    pub score: Option<u8>,
    #[serde(default, alias = "Strengths", deserialize_with = "lenient_list")]
    pub strengths: Vec<String>,
    #[serde(default, alias = "Weaknesses", deserialize_with = "lenient_list")]
    pub weaknesses: Vec<String>,
    #[serde(default, alias = "Suggestions", deserialize_with = "lenient_list")]
    pub suggestions: Vec<String>,
}

impl ModelAssessment {
    /// True when not a single field was recovered.
    pub fn is_empty(&self) -> bool {
        self.score.is_none()
            && self.strengths.is_empty()
            && self.weaknesses.is_empty()
            && self.suggestions.is_empty()
    }
}

/// Outcome of reading a reply: structured JSON or raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    Parsed(ModelAssessment),
    Unparseable(String),
}

impl ModelReply {
    /// JSON first (fences stripped, then any embedded object); otherwise
    /// the raw text is kept for the line scanner.
    pub fn parse(raw: &str) -> Self {
        let text = strip_json_fences(raw);

        if let Ok(assessment) = serde_json::from_str::<ModelAssessment>(text) {
            return ModelReply::Parsed(assessment);
        }

        if let Some(object) = embedded_object(text) {
            if let Ok(assessment) = serde_json::from_str::<ModelAssessment>(object) {
                return ModelReply::Parsed(assessment);
            }
        }

        ModelReply::Unparseable(raw.to_string())
    }

    /// Recovered assessment, or `None` when nothing usable was found.
    pub fn into_assessment(self) -> Option<ModelAssessment> {
        let assessment = match self {
            ModelReply::Parsed(assessment) => assessment,
            ModelReply::Unparseable(raw) => scan_labeled_lines(&raw)?,
        };
        if assessment.is_empty() {
            None
        } else {
            Some(assessment)
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

fn embedded_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Score,
    Strengths,
    Weaknesses,
    Suggestions,
}

/// Line scanner for prose replies such as
/// `Score: 72` / `Strengths:` / `- Rust` / `Weaknesses:` / `1. No Kubernetes`.
///
/// Returns `None` if no label line is present.
pub fn scan_labeled_lines(text: &str) -> Option<ModelAssessment> {
    let mut assessment = ModelAssessment::default();
    let mut current: Option<Field> = None;
    let mut saw_label = false;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let lowered = line.to_lowercase();

        let label = if !lowered.contains(':') {
            None
        } else if lowered.contains("score") {
            Some(Field::Score)
        } else if lowered.contains("strength") {
            Some(Field::Strengths)
        } else if lowered.contains("weakness") {
            Some(Field::Weaknesses)
        } else if lowered.contains("suggestion") {
            Some(Field::Suggestions)
        } else {
            None
        };

        if let Some(field) = label {
            saw_label = true;
            current = Some(field);
            let (_, rest) = line.split_once(':').unwrap_or((line, ""));
            match field {
                Field::Score => {
                    if assessment.score.is_none() {
                        assessment.score = FIRST_INTEGER
                            .find(rest)
                            .and_then(|m| m.as_str().parse::<u64>().ok())
                            .map(|n| n.min(100) as u8);
                    }
                }
                _ => push_item(&mut assessment, field, rest),
            }
            continue;
        }

        match current {
            Some(Field::Score) | None => {}
            Some(field) => push_item(&mut assessment, field, line),
        }
    }

    saw_label.then_some(assessment)
}

fn push_item(assessment: &mut ModelAssessment, field: Field, raw: &str) {
    let cleaned = LIST_MARKER.replace(raw.trim(), "");
    let cleaned = cleaned.trim().trim_matches('*').trim();
    if cleaned.is_empty() {
        return;
    }
    let list = match field {
        Field::Strengths => &mut assessment.strengths,
        Field::Weaknesses => &mut assessment.weaknesses,
        Field::Suggestions => &mut assessment.suggestions,
        Field::Score => return,
    };
    list.push(cleaned.to_string());
}

/// Accepts `85`, `85.4`, `"85"`, `"85/100"`; clamps to 0-100.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| score_from_value(&v)))
}

fn score_from_value(value: &Value) -> Option<u8> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f.round().clamp(0.0, 100.0) as u8),
        Value::String(s) => FIRST_INTEGER
            .find(s)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .map(|n| n.min(100) as u8),
        _ => None,
    }
}

/// Accepts a list of strings (other scalars are stringified) or a single
/// string.
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(Value::String(s)) => vec![s],
        _ => Vec::new(),
    };

    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), input);
    }

    #[test]
    fn test_parse_plain_json() {
        let reply = ModelReply::parse(
            r#"{"score": 82, "strengths": ["Rust"], "weaknesses": ["No Go"], "suggestions": ["Learn Go"]}"#,
        );

        let ModelReply::Parsed(assessment) = reply else {
            panic!("expected parsed reply");
        };
        assert_eq!(assessment.score, Some(82));
        assert_eq!(assessment.strengths, vec!["Rust"]);
        assert_eq!(assessment.suggestions, vec!["Learn Go"]);
    }

    #[test]
    fn test_parse_fenced_json_with_string_score() {
        let reply = ModelReply::parse("```json\n{\"score\": \"75/100\", \"strengths\": \"Python\"}\n```");

        let assessment = reply.into_assessment().unwrap();
        assert_eq!(assessment.score, Some(75));
        assert_eq!(assessment.strengths, vec!["Python"]);
        assert!(assessment.weaknesses.is_empty());
    }

    #[test]
    fn test_parse_object_embedded_in_prose() {
        let reply = ModelReply::parse("Here is my assessment:\n{\"score\": 64.6}\nHope this helps!");
        assert_eq!(
            reply,
            ModelReply::Parsed(ModelAssessment {
                score: Some(65),
                ..ModelAssessment::default()
            })
        );
    }

    #[test]
    fn test_score_is_clamped() {
        let assessment = ModelReply::parse(r#"{"score": 140}"#).into_assessment().unwrap();
        assert_eq!(assessment.score, Some(100));

        let assessment = ModelReply::parse(r#"{"score": -5}"#).into_assessment().unwrap();
        assert_eq!(assessment.score, Some(0));
    }

    #[test]
    fn test_prose_reply_goes_through_line_scanner() {
        let raw = "Score: 72/100\n\nStrengths:\n1. Strong Rust background\n- Cloud experience\n\nWeaknesses:\n* No Kubernetes\n\nSuggestions:\n• Add metrics to achievements\n";
        let reply = ModelReply::parse(raw);
        assert!(matches!(reply, ModelReply::Unparseable(_)));

        let assessment = reply.into_assessment().unwrap();
        assert_eq!(assessment.score, Some(72));
        assert_eq!(
            assessment.strengths,
            vec!["Strong Rust background", "Cloud experience"]
        );
        assert_eq!(assessment.weaknesses, vec!["No Kubernetes"]);
        assert_eq!(assessment.suggestions, vec!["Add metrics to achievements"]);
    }

    #[test]
    fn test_inline_items_after_label_are_kept() {
        let assessment = scan_labeled_lines("Strengths: Python and AWS\nWeaknesses: none listed").unwrap();

        assert_eq!(assessment.strengths, vec!["Python and AWS"]);
        assert_eq!(assessment.weaknesses, vec!["none listed"]);
        assert_eq!(assessment.score, None);
    }

    #[test]
    fn test_unlabeled_prose_is_a_failure() {
        let reply = ModelReply::parse("I cannot help with that request.");
        assert!(reply.into_assessment().is_none());
    }

    #[test]
    fn test_json_without_known_fields_is_a_failure() {
        let reply = ModelReply::parse(r#"{"verdict": "good"}"#);
        assert!(matches!(reply, ModelReply::Parsed(_)));
        assert!(reply.into_assessment().is_none());
    }
}
