//! resume-matcher: score résumés against job descriptions and rank job postings

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction, JobInput, OutputArgs};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::input::InputManager;
use resume_matcher::matching::{load_job_catalog, MatchEngine};
use resume_matcher::output::{
    save_report_to_file, MatchReport, ReportGenerator, ReportMetadata, SuggestionReport,
};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // API keys may live in a local .env file
    let _ = dotenvy::dotenv();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", config_path.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            job,
            no_llm,
            output,
        } => {
            if no_llm {
                config.model.enabled = false;
            }
            run_match(&config, &resume, job, output).await
        }
        Commands::Jobs {
            resume,
            catalog,
            output,
        } => run_jobs(&config, &resume, catalog, output).await,
        Commands::Config { action } => run_config(action, &config, config_path),
    }
}

async fn run_match(config: &Config, resume: &Path, job: JobInput, output: OutputArgs) -> Result<()> {
    let started = Instant::now();
    let format = resolve_format(config, &output)?;

    cli::validate_file_extension(resume, cli::RESUME_EXTENSIONS)
        .map_err(anyhow::Error::msg)
        .context("Resume file")?;

    let mut input_manager = InputManager::new().with_min_resume_chars(config.matching.min_resume_chars);
    let resume_text = input_manager
        .load_resume(resume)
        .await
        .with_context(|| format!("Failed to read résumé {}", resume.display()))?;

    let (job_text, job_source) = match (job.job, job.job_text) {
        (Some(path), _) => {
            cli::validate_file_extension(&path, cli::JOB_EXTENSIONS)
                .map_err(anyhow::Error::msg)
                .context("Job description file")?;
            let text = input_manager
                .extract_text(&path)
                .await
                .with_context(|| format!("Failed to read job description {}", path.display()))?;
            (text, Some(path.display().to_string()))
        }
        (None, Some(text)) => (text, None),
        (None, None) => anyhow::bail!("Provide a job description with --job or --job-text"),
    };

    let engine = MatchEngine::from_config(config)?;
    info!(
        "Matching {} ({} chars) against job description ({} chars)",
        resume.display(),
        resume_text.len(),
        job_text.len()
    );

    let spinner = engine.has_model().then(|| spinner("Asking the model for an assessment..."));
    let result = engine.match_resume(&resume_text, &job_text).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let result = result?;

    let report = MatchReport {
        metadata: ReportMetadata::new(resume.display().to_string(), job_source, started.elapsed()),
        result,
    };
    let rendered = generator(config, output.save.is_some()).generate_match_report(&report, format)?;
    emit(&rendered, output.save.as_deref())
}

async fn run_jobs(
    config: &Config,
    resume: &Path,
    catalog: Option<PathBuf>,
    output: OutputArgs,
) -> Result<()> {
    let started = Instant::now();
    let format = resolve_format(config, &output)?;

    cli::validate_file_extension(resume, cli::RESUME_EXTENSIONS)
        .map_err(anyhow::Error::msg)
        .context("Resume file")?;

    let mut input_manager = InputManager::new().with_min_resume_chars(config.matching.min_resume_chars);
    let resume_text = input_manager
        .load_resume(resume)
        .await
        .with_context(|| format!("Failed to read résumé {}", resume.display()))?;

    let catalog_path = catalog.unwrap_or_else(|| config.catalog.path.clone());
    let postings = load_job_catalog(&catalog_path)
        .with_context(|| format!("Failed to load job catalog {}", catalog_path.display()))?;

    let engine = MatchEngine::statistical(config)?;
    let suggestions = engine.suggest_jobs(&resume_text, &postings)?;

    let report = SuggestionReport {
        metadata: ReportMetadata::new(resume.display().to_string(), None, started.elapsed()),
        catalog_size: postings.len(),
        suggestions,
    };
    let rendered = generator(config, output.save.is_some()).generate_suggestion_report(&report, format)?;
    emit(&rendered, output.save.as_deref())
}

fn run_config(action: Option<ConfigAction>, config: &Config, config_path: &Path) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            println!("# {}\n", config_path.display());
            print!("{}", config.to_toml()?);
        }
        Some(ConfigAction::Reset) => {
            Config::default().save_to(config_path)?;
            println!("Configuration reset to defaults: {}", config_path.display());
        }
        Some(ConfigAction::Path) => {
            println!("{}", config_path.display());
        }
    }
    Ok(())
}

fn resolve_format(config: &Config, output: &OutputArgs) -> Result<OutputFormat> {
    match &output.output {
        Some(format) => cli::parse_output_format(format).map_err(anyhow::Error::msg),
        None => Ok(config.output.format),
    }
}

/// Colors are dropped when writing to a file.
fn generator(config: &Config, saving: bool) -> ReportGenerator {
    ReportGenerator::with_options(
        config.output.color_output && !saving,
        config.output.pretty_json,
        true,
    )
}

fn emit(rendered: &str, save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            save_report_to_file(rendered, path)?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
