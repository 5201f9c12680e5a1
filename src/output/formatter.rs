//! Output formatters for match and suggestion reports

use crate::config::OutputFormat;
use crate::error::{MatcherError, Result};
use crate::matching::catalog::RankedSuggestion;
use crate::matching::engine::MatchSource;
use crate::output::report::{MatchReport, ScoreBand, SuggestionReport};
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String>;
    fn format_suggestions(&self, report: &SuggestionReport) -> Result<String>;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let band = ScoreBand::from_score(score);
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::Yellow,
            ScoreBand::Fair => Color::BrightYellow,
            ScoreBand::Poor => Color::BrightRed,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_list(&self, output: &mut String, items: &[String], marker: &str, color: Color) {
        for item in items {
            output.push_str(&format!("  {} {}\n", self.colorize(marker, color), item));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME MATCH", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));
        output.push_str(&format!("Resume: {}\n", report.metadata.resume_file));

        output.push_str(&self.format_header("Score", 2));
        output.push_str(&format!(
            "Match Score: {}% {}\n",
            result.score,
            self.format_score_badge(result.score)
        ));
        output.push_str(&format!(
            "Verdict: {}\n",
            self.colorize(ScoreBand::from_score(result.score).verdict(), Color::Cyan)
        ));
        output.push_str(&format!("Assessed by: {}\n", source_label(result.source)));

        output.push_str(&self.format_header("Strengths", 3));
        self.format_list(&mut output, &result.strengths, "+", Color::Green);

        output.push_str(&self.format_header("Weaknesses", 3));
        self.format_list(&mut output, &result.weaknesses, "-", Color::Red);

        output.push_str(&self.format_header("Suggestions", 3));
        self.format_list(&mut output, &result.suggestions, "*", Color::Cyan);

        Ok(output)
    }

    fn format_suggestions(&self, report: &SuggestionReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("JOB SUGGESTIONS", 1));
        output.push_str(&format!(
            "Resume: {} | {} postings considered\n",
            report.metadata.resume_file, report.catalog_size
        ));

        if report.suggestions.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize("No postings were relevant enough to suggest.", Color::Yellow)
            ));
            return Ok(output);
        }

        for (rank, suggestion) in report.suggestions.iter().enumerate() {
            let posting = &suggestion.posting;
            output.push_str(&format!(
                "\n{}. {} at {} {}\n",
                rank + 1,
                self.colorize(&posting.title, Color::BrightWhite),
                posting.company,
                self.colorize(&format!("({}%)", suggestion.match_score), Color::Green)
            ));
            let details = posting_details(suggestion);
            if !details.is_empty() {
                output.push_str(&format!("   {}\n", details));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_suggestions(&self, report: &SuggestionReport) -> Result<String> {
        self.to_json(report)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn file_name(path: &str) -> String {
        Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string())
    }

    fn push_list(output: &mut String, title: &str, items: &[String]) {
        output.push_str(&format!("## {}\n\n", title));
        for item in items {
            output.push_str(&format!("- {}\n", item));
        }
        output.push('\n');
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            let job = report
                .metadata
                .job_source
                .as_deref()
                .map(Self::file_name)
                .unwrap_or_else(|| "inline text".to_string());
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                Self::file_name(&report.metadata.resume_file),
                job
            ));
        }

        let band = ScoreBand::from_score(result.score);
        output.push_str(&format!(
            "**Match Score:** {}% `{}`\n\n**Verdict:** {}\n\n**Assessed by:** {}\n\n",
            result.score,
            band.label(),
            band.verdict(),
            source_label(result.source)
        ));

        Self::push_list(&mut output, "Strengths", &result.strengths);
        Self::push_list(&mut output, "Weaknesses", &result.weaknesses);
        Self::push_list(&mut output, "Suggestions", &result.suggestions);

        Ok(output)
    }

    fn format_suggestions(&self, report: &SuggestionReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Job Suggestions\n\n");
        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Resume:** `{}` | **Postings considered:** {}\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                Self::file_name(&report.metadata.resume_file),
                report.catalog_size
            ));
        }

        if report.suggestions.is_empty() {
            output.push_str("_No postings were relevant enough to suggest._\n");
            return Ok(output);
        }

        output.push_str("| # | Title | Company | Location | Experience | CTC | Match |\n");
        output.push_str("|---|-------|---------|----------|------------|-----|-------|\n");
        for (rank, suggestion) in report.suggestions.iter().enumerate() {
            let p = &suggestion.posting;
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {}% |\n",
                rank + 1,
                escape_cell(&p.title),
                escape_cell(&p.company),
                escape_cell(&p.location),
                escape_cell(&p.experience),
                escape_cell(&p.ctc),
                suggestion.match_score
            ));
        }

        Ok(output)
    }
}

fn source_label(source: MatchSource) -> &'static str {
    match source {
        MatchSource::Model => "language model",
        MatchSource::Fallback => "statistical fallback",
    }
}

fn posting_details(suggestion: &RankedSuggestion) -> String {
    let p = &suggestion.posting;
    [
        p.location.as_str(),
        p.experience.as_str(),
        p.ctc.as_str(),
        p.posted.as_str(),
    ]
    .iter()
    .filter(|field| !field.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" | ")
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_match_report(&self, report: &MatchReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_match(report)
    }

    pub fn generate_suggestion_report(
        &self,
        report: &SuggestionReport,
        format: OutputFormat,
    ) -> Result<String> {
        self.formatter(format).format_suggestions(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content).map_err(|e| {
        MatcherError::OutputFormatting(format!("Failed to write {}: {}", file_path.display(), e))
    })
}
