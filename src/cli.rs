//! CLI interface for the resume matcher

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md", "markdown"];
pub const JOB_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(version, about = "Score resumes against job descriptions and suggest matching jobs")]
#[command(long_about = "Score how well a resume matches a job description using a generative model, \
with a deterministic TF-IDF fallback, and rank job postings from a CSV catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against one job description
    Match {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        #[command(flatten)]
        job: JobInput,

        /// Skip the language model and use the statistical matcher only
        #[arg(long)]
        no_llm: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Suggest the best matching postings from a job catalog
    Jobs {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Job catalog CSV (defaults to the configured catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct JobInput {
    /// Path to job description file (TXT, MD)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Job description text
    #[arg(long)]
    pub job_text: Option<String>,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Output format: console, json, markdown (defaults to the configured format)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to file
    #[arg(short, long)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_match_requires_exactly_one_job_source() {
        assert!(Cli::try_parse_from(["resume-matcher", "match", "-r", "cv.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "resume-matcher", "match", "-r", "cv.pdf", "-j", "job.txt", "--job-text", "Rust dev"
        ])
        .is_err());

        let cli = Cli::try_parse_from(["resume-matcher", "match", "-r", "cv.pdf", "--job-text", "Rust dev"]).unwrap();
        match cli.command {
            Commands::Match { job, no_llm, .. } => {
                assert_eq!(job.job_text.as_deref(), Some("Rust dev"));
                assert!(!no_llm);
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.DOCX"), RESUME_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.doc"), RESUME_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("job"), JOB_EXTENSIONS).is_err());
    }
}
