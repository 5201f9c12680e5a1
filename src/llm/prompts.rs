//! Prompt construction for résumé × job assessment

use crate::llm::client::ModelRequest;
use crate::processing::document::{ResumeSections, SectionType};
use crate::processing::skills::SkillSet;
use log::debug;

/// Sections forwarded to the model, in prompt order.
pub const PROMPT_SECTIONS: [SectionType; 6] = [
    SectionType::Summary,
    SectionType::Experience,
    SectionType::Skills,
    SectionType::Education,
    SectionType::Projects,
    SectionType::Achievements,
];

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub system: String,
    pub assessment: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system: SYSTEM_TEMPLATE.to_string(),
            assessment: ASSESSMENT_TEMPLATE.to_string(),
        }
    }
}

/// Values substituted into the assessment template
#[derive(Debug, Clone)]
pub struct PromptParams<'a> {
    pub condensed_resume: &'a str,
    pub skills: &'a SkillSet,
    pub job_description: &'a str,
}

impl PromptTemplates {
    pub fn render(&self, params: &PromptParams<'_>) -> ModelRequest {
        let skills = if params.skills.is_empty() {
            "(none detected)".to_string()
        } else {
            params.skills.join(", ")
        };

        let prompt = fill_placeholders(
            &self.assessment,
            &[
                ("resume", params.condensed_resume),
                ("skills", &skills),
                ("job", params.job_description.trim()),
            ],
        );

        debug!(
            "Rendered assessment prompt: {} chars ({} résumé chars)",
            prompt.len(),
            params.condensed_resume.len()
        );

        ModelRequest {
            system: self.system.clone(),
            prompt,
        }
    }
}

/// Substitute `{name}` placeholders in a single left-to-right pass, so
/// braces inside substituted values are never expanded. Unknown braces are
/// copied through.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let filled = values.iter().find_map(|(name, value)| {
            tail.strip_prefix(*name)
                .and_then(|after| after.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match filled {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Key sections, each cut to `section_limit` chars, the whole capped at
/// `total_limit`. Résumés without recognizable sections are sent raw,
/// under the same cap.
pub fn condense_resume(
    resume_text: &str,
    sections: &ResumeSections,
    section_limit: usize,
    total_limit: usize,
) -> String {
    let blocks: Vec<String> = PROMPT_SECTIONS
        .iter()
        .filter_map(|section| {
            let body = sections.get(*section)?.trim();
            if body.is_empty() {
                return None;
            }
            Some(format!(
                "{}:\n{}",
                section.as_str().to_uppercase(),
                truncate_chars(body, section_limit)
            ))
        })
        .collect();

    let condensed = if blocks.is_empty() {
        resume_text.trim().to_string()
    } else {
        blocks.join("\n\n")
    };

    truncate_chars(&condensed, total_limit).to_string()
}

/// Prefix of at most `limit` chars, cut on a char boundary.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

const SYSTEM_TEMPLATE: &str = "You are an experienced technical recruiter. You assess how well a candidate's résumé fits a job description and answer only with a single JSON object.";

const ASSESSMENT_TEMPLATE: &str = r#"Assess how well the résumé below matches the job description.

<RESUME>
{resume}
</RESUME>

<EXTRACTED SKILLS>
{skills}
</EXTRACTED SKILLS>

<JOB DESCRIPTION>
{job}
</JOB DESCRIPTION>

Rate the match from 0 to 100 using this weighting:
- technical skills: 40%
- experience relevance: 30%
- education fit: 15%
- soft skills: 15%

Respond with JSON only, using exactly these keys:
{"score": <integer 0-100>, "strengths": [<string>, ...], "weaknesses": [<string>, ...], "suggestions": [<string>, ...]}

Reference the actual résumé content, not generic advice."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::SectionSegmenter;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("résumé", 2), "ré");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_condense_keeps_key_sections_only() {
        let text = "Summary\nRust engineer\n\nExperience\nAcme, 5 years\n\nReferences\nAvailable on request";
        let sections = SectionSegmenter::new().segment(text);

        let condensed = condense_resume(text, &sections, 1000, 4000);

        assert!(condensed.starts_with("SUMMARY:\nRust engineer"));
        assert!(condensed.contains("EXPERIENCE:\nAcme, 5 years"));
        assert!(!condensed.contains("Available on request"));
    }

    #[test]
    fn test_condense_applies_limits() {
        let long_body = "x".repeat(50);
        let text = format!("Experience\n{long_body}\n\nEducation\n{long_body}");
        let sections = SectionSegmenter::new().segment(&text);

        let condensed = condense_resume(&text, &sections, 10, 30);

        assert!(condensed.starts_with("EXPERIENCE:\nxxxxxxxxxx\n"));
        assert_eq!(condensed.chars().count(), 30);
    }

    #[test]
    fn test_condense_without_sections_uses_raw_text() {
        let text = "  Jane Doe, Rust and Go developer  ";
        let condensed = condense_resume(text, &ResumeSections::default(), 1000, 10);

        assert_eq!(condensed, "Jane Doe, ");
    }

    #[test]
    fn test_render_fills_placeholders() {
        let skills: SkillSet = vec!["python".to_string(), "aws".to_string()].into_iter().collect();
        let params = PromptParams {
            condensed_resume: "EXPERIENCE:\nBuilt things",
            skills: &skills,
            job_description: "  Backend engineer  ",
        };

        let request = PromptTemplates::default().render(&params);

        assert!(request.prompt.contains("Built things"));
        assert!(request.prompt.contains("aws, python"));
        assert!(request.prompt.contains("<JOB DESCRIPTION>\nBackend engineer\n"));
        assert!(request.prompt.contains("technical skills: 40%"));
        assert!(!request.prompt.contains("{resume}"));
        assert!(request.system.contains("JSON"));
    }

    #[test]
    fn test_render_leaves_braces_in_values_alone() {
        let skills: SkillSet = vec!["{job}".to_string()].into_iter().collect();
        let params = PromptParams {
            condensed_resume: "I wrote a parser that handles {job} and {skills} tokens",
            skills: &skills,
            job_description: "CONFIDENTIAL JOB TEXT",
        };

        let request = PromptTemplates::default().render(&params);

        assert!(request
            .prompt
            .contains("<RESUME>\nI wrote a parser that handles {job} and {skills} tokens\n</RESUME>"));
        assert!(request.prompt.contains("<EXTRACTED SKILLS>\n{job}\n"));
        assert_eq!(request.prompt.matches("CONFIDENTIAL JOB TEXT").count(), 1);
        assert!(request.prompt.contains(r#"{"score": <integer 0-100>"#));
    }
}
