//! Résumé section segmentation

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Controlled vocabulary of résumé section names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Summary,
    Experience,
    Skills,
    Education,
    Projects,
    Achievements,
    Certifications,
    Publications,
    Languages,
    Interests,
    Volunteering,
    References,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Summary => "summary",
            SectionType::Experience => "experience",
            SectionType::Skills => "skills",
            SectionType::Education => "education",
            SectionType::Projects => "projects",
            SectionType::Achievements => "achievements",
            SectionType::Certifications => "certifications",
            SectionType::Publications => "publications",
            SectionType::Languages => "languages",
            SectionType::Interests => "interests",
            SectionType::Volunteering => "volunteering",
            SectionType::References => "references",
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header phrases recognized at line starts, with the section they open.
const SECTION_HEADERS: &[(&str, SectionType)] = &[
    ("summary", SectionType::Summary),
    ("professional summary", SectionType::Summary),
    ("career summary", SectionType::Summary),
    ("profile", SectionType::Summary),
    ("professional profile", SectionType::Summary),
    ("objective", SectionType::Summary),
    ("career objective", SectionType::Summary),
    ("about me", SectionType::Summary),
    ("overview", SectionType::Summary),
    ("experience", SectionType::Experience),
    ("work experience", SectionType::Experience),
    ("professional experience", SectionType::Experience),
    ("employment", SectionType::Experience),
    ("employment history", SectionType::Experience),
    ("work history", SectionType::Experience),
    ("career history", SectionType::Experience),
    ("skills", SectionType::Skills),
    ("technical skills", SectionType::Skills),
    ("key skills", SectionType::Skills),
    ("core competencies", SectionType::Skills),
    ("competencies", SectionType::Skills),
    ("expertise", SectionType::Skills),
    ("education", SectionType::Education),
    ("academic background", SectionType::Education),
    ("qualifications", SectionType::Education),
    ("academic qualifications", SectionType::Education),
    ("projects", SectionType::Projects),
    ("personal projects", SectionType::Projects),
    ("key projects", SectionType::Projects),
    ("notable projects", SectionType::Projects),
    ("portfolio", SectionType::Projects),
    ("achievements", SectionType::Achievements),
    ("accomplishments", SectionType::Achievements),
    ("awards", SectionType::Achievements),
    ("honors", SectionType::Achievements),
    ("awards and achievements", SectionType::Achievements),
    ("certifications", SectionType::Certifications),
    ("certificates", SectionType::Certifications),
    ("licenses", SectionType::Certifications),
    ("licenses and certifications", SectionType::Certifications),
    ("certifications and licenses", SectionType::Certifications),
    ("publications", SectionType::Publications),
    ("languages", SectionType::Languages),
    ("interests", SectionType::Interests),
    ("hobbies", SectionType::Interests),
    ("volunteering", SectionType::Volunteering),
    ("volunteer experience", SectionType::Volunteering),
    ("references", SectionType::References),
];

/// Named résumé sections. Only sections found in the text are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeSections {
    sections: BTreeMap<SectionType, String>,
}

impl ResumeSections {
    pub fn get(&self, section: SectionType) -> Option<&str> {
        self.sections.get(&section).map(|s| s.as_str())
    }

    pub fn contains(&self, section: SectionType) -> bool {
        self.sections.contains_key(&section)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionType, &str)> {
        self.sections.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Splits résumé text into sections by detecting header lines.
#[derive(Debug, Clone)]
pub struct SectionSegmenter {
    header_regex: Regex,
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionSegmenter {
    pub fn new() -> Self {
        let mut phrases: Vec<&str> = SECTION_HEADERS.iter().map(|(phrase, _)| *phrase).collect();
        // longest first so "work experience" wins over shorter alternatives
        phrases.sort_by(|a, b| b.len().cmp(&a.len()));

        let alternation = phrases
            .iter()
            .map(|phrase| {
                phrase
                    .split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"[ \t]+")
            })
            .collect::<Vec<_>>()
            .join("|");

        let pattern = format!(
            r"(?im)^[ \t]*(?:[-*•●▪◦·>#]+[ \t]*)?({alternation})[ \t]*(?::|\r?$)"
        );
        let header_regex = Regex::new(&pattern).expect("Invalid section header regex");

        Self { header_regex }
    }

    /// Segment `text` into named sections. Repeated headers keep the last body.
    pub fn segment(&self, text: &str) -> ResumeSections {
        let headers: Vec<(SectionType, usize, usize)> = self
            .header_regex
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let phrase = caps.get(1)?.as_str().to_lowercase();
                let phrase = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
                let section = SECTION_HEADERS
                    .iter()
                    .find(|(p, _)| *p == phrase)
                    .map(|(_, section)| *section)?;
                Some((section, whole.start(), whole.end()))
            })
            .collect();

        let mut sections = BTreeMap::new();
        for (idx, (section, _, body_start)) in headers.iter().enumerate() {
            let body_end = headers
                .get(idx + 1)
                .map(|(_, next_start, _)| *next_start)
                .unwrap_or(text.len());
            let body = text[*body_start..body_end].trim().to_string();
            sections.insert(*section, body);
        }

        ResumeSections { sections }
    }
}
