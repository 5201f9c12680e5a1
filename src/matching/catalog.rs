//! Job catalog loading

use crate::error::Result;
use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// One row of the job dataset. Every column is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    #[serde(rename = "Job_Title", alias = "job_title", alias = "title")]
    pub title: String,
    #[serde(rename = "Company_Name", alias = "company_name", alias = "company")]
    pub company: String,
    #[serde(rename = "Location", alias = "location")]
    pub location: String,
    #[serde(rename = "Experience", alias = "experience")]
    pub experience: String,
    #[serde(rename = "CTC", alias = "ctc")]
    pub ctc: String,
    #[serde(rename = "Posted", alias = "posted")]
    pub posted: String,
    #[serde(rename = "Start_Date", alias = "start_date")]
    pub start_date: String,
    #[serde(
        rename = "Description",
        alias = "description",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

impl JobPosting {
    pub fn new(title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Text the posting is ranked on: title, company, then the description
    /// or, lacking one, the title again with the experience band.
    pub fn match_text(&self) -> String {
        let detail = match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => format!("{} {}", self.title, self.experience),
        };
        format!("{} {} {}", self.title, self.company, detail)
    }
}

/// A posting with its relevance to a résumé.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSuggestion {
    #[serde(flatten)]
    pub posting: JobPosting,
    pub match_score: u8,
}

/// Read postings from CSV data. Rows that cannot be read are skipped.
pub fn read_job_catalog<R: Read>(reader: R) -> Result<Vec<JobPosting>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut postings = Vec::new();
    for (row, result) in rdr.deserialize::<JobPosting>().enumerate() {
        match result {
            Ok(posting) => postings.push(posting),
            Err(e) => warn!("Skipping job catalog row {}: {}", row + 1, e),
        }
    }
    Ok(postings)
}

/// Load the catalog at `path`. A missing file yields the built-in sample.
pub fn load_job_catalog(path: &Path) -> Result<Vec<JobPosting>> {
    if !path.exists() {
        warn!(
            "Job catalog {} not found, using the built-in sample catalog",
            path.display()
        );
        return Ok(sample_catalog());
    }

    let file = std::fs::File::open(path)?;
    let postings = read_job_catalog(file)?;
    info!("Loaded {} job postings from {}", postings.len(), path.display());
    Ok(postings)
}

pub fn sample_catalog() -> Vec<JobPosting> {
    let rows = [
        ("Software Engineer", "Tech Corp", "San Francisco, CA", "Immediate", "$120,000", "3-5 years", "3 days ago"),
        ("Data Scientist", "Data Analytics Inc", "New York, NY", "May 2025", "$130,000", "2-4 years", "1 week ago"),
        ("Product Manager", "Product Solutions", "Seattle, WA", "June 2025", "$140,000", "4-6 years", "2 days ago"),
    ];

    rows.iter()
        .map(|(title, company, location, start, ctc, experience, posted)| JobPosting {
            title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            experience: experience.to_string(),
            ctc: ctc.to_string(),
            posted: posted.to_string(),
            start_date: start.to_string(),
            description: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_canonical_headers() {
        let data = "Job_Title,Company_Name,Location,Experience,CTC,Posted,Description\n\
                    Rust Engineer,Ferris Ltd,Remote,3-5 years,$150k,today,Build async services\n";
        let postings = read_job_catalog(data.as_bytes()).unwrap();

        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "Rust Engineer");
        assert_eq!(postings[0].description.as_deref(), Some("Build async services"));
    }

    #[test]
    fn test_reads_lowercase_headers_with_padding() {
        let data = " job_title , company_name ,ctc\nData Analyst , Numbers Co , 90k\n";
        let postings = read_job_catalog(data.as_bytes()).unwrap();

        assert_eq!(postings[0].title, "Data Analyst");
        assert_eq!(postings[0].company, "Numbers Co");
        assert_eq!(postings[0].ctc, "90k");
        assert!(postings[0].location.is_empty());
        assert!(postings[0].description.is_none());
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let data = "Job_Title,Company_Name,Location\nDesigner,Pixel\nWriter,Words Inc,Berlin\n";
        let postings = read_job_catalog(data.as_bytes()).unwrap();

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[1].location, "Berlin");
    }

    #[test]
    fn test_match_text_falls_back_to_title_and_experience() {
        let mut posting = JobPosting::new("Data Scientist", "Data Analytics Inc");
        posting.experience = "2-4 years".to_string();
        assert_eq!(
            posting.match_text(),
            "Data Scientist Data Analytics Inc Data Scientist 2-4 years"
        );

        let posting = posting.with_description("Model churn with Python");
        assert_eq!(
            posting.match_text(),
            "Data Scientist Data Analytics Inc Model churn with Python"
        );
    }

    #[test]
    fn test_missing_file_uses_sample() {
        let postings = load_job_catalog(Path::new("/definitely/not/here/jobs.csv")).unwrap();

        assert_eq!(postings.len(), 3);
        assert_eq!(postings[0].title, "Software Engineer");
    }

    #[test]
    fn test_load_from_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "Job_Title,Company_Name\nSRE,Uptime\n").unwrap();

        let postings = load_job_catalog(file.path()).unwrap();
        assert_eq!(postings, vec![JobPosting::new("SRE", "Uptime")]);
    }

    #[test]
    fn test_suggestion_serializes_flat() {
        let suggestion = RankedSuggestion {
            posting: JobPosting::new("SRE", "Uptime"),
            match_score: 42,
        };
        let json = serde_json::to_value(&suggestion).unwrap();

        assert_eq!(json["Job_Title"], "SRE");
        assert_eq!(json["match_score"], 42);
        assert!(json.get("Description").is_none());
    }
}
