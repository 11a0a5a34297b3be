pub mod dashboard;
pub mod health;
pub mod jobs;
pub mod preferences;
pub mod resume;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::models::preferences::{ExperienceLevel, JobType};
use crate::models::resume::{DocumentKind, OutputFormat};
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "jobhunter", version, about = "Terminal client for the job-search assistant")]
pub struct Cli {
    /// Service root, e.g. http://localhost:8000 (overrides JOBHUNTER_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the service is reachable
    Health,
    /// Upload a PDF resume for parsing
    Upload { path: PathBuf },
    /// Show the current user's resume and saved preferences
    Me,
    /// Submit job preferences
    Preferences(preferences::PreferencesArgs),
    /// Scrape job boards without ranking
    Search {
        query: String,
        #[arg(long, default_value = "India")]
        location: String,
        #[arg(long, value_enum)]
        job_type: Option<JobType>,
        #[arg(long, value_enum)]
        experience_level: Option<ExperienceLevel>,
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Rank jobs against the uploaded resume and print one page
    Match {
        query: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Generate a tailored resume or cover letter for one job
    Generate {
        #[arg(value_enum)]
        kind: DocumentKind,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Pdf)]
        format: OutputFormat,
    },
    /// Interactive matching dashboard
    Dashboard,
}

pub async fn run(command: Command, state: AppState) -> Result<()> {
    match command {
        Command::Health => health::run(&state).await,
        Command::Upload { path } => resume::upload(&state, &path).await,
        Command::Me => resume::me(&state).await,
        Command::Preferences(args) => preferences::run(&state, args).await,
        Command::Search {
            query,
            location,
            job_type,
            experience_level,
            limit,
        } => {
            let filters = crate::models::job::SearchFilters {
                location,
                job_type: job_type.map(|t| t.as_str().to_string()),
                experience_level: experience_level.map(|l| l.as_str().to_string()),
                limit,
            };
            jobs::search(&state, &query, &filters).await
        }
        Command::Match {
            query,
            limit,
            page,
            page_size,
        } => jobs::match_page(&state, &query, limit, page, page_size).await,
        Command::Generate {
            kind,
            title,
            company,
            description,
            format,
        } => jobs::generate(&state, kind, &title, &company, &description, format).await,
        Command::Dashboard => dashboard::run(&state).await,
    }
}

/// Surfaces a failure to the user. The terminal stands in for a blocking alert dialog.
pub fn alert(message: &str) {
    eprintln!("⚠  {message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "jobhunter",
            "generate",
            "cover-letter",
            "--title",
            "SRE",
            "--company",
            "Acme",
        ])
        .unwrap();
        match cli.command {
            Command::Generate {
                kind,
                title,
                company,
                format,
                ..
            } => {
                assert_eq!(kind, DocumentKind::CoverLetter);
                assert_eq!(title, "SRE");
                assert_eq!(company, "Acme");
                assert_eq!(format, OutputFormat::Pdf);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_global_api_url() {
        let cli =
            Cli::try_parse_from(["jobhunter", "match", "rust", "--api-url", "http://svc:9000"])
                .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://svc:9000"));
    }

    #[test]
    fn test_cli_search_job_type_value() {
        let cli =
            Cli::try_parse_from(["jobhunter", "search", "rust", "--job-type", "on-site"]).unwrap();
        match cli.command {
            Command::Search { job_type, .. } => assert_eq!(job_type, Some(JobType::OnSite)),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
