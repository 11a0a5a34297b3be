use anyhow::{Context, Result};

use crate::commands::alert;
use crate::dashboard::bulk::{generate_one, JobOutcome};
use crate::dashboard::pagination::Paginator;
use crate::dashboard::sink::DocumentSink;
use crate::dashboard::DashboardState;
use crate::models::job::{Job, MatchBand, MatchResult, SearchFilters};
use crate::models::resume::{DocumentKind, OutputFormat};
use crate::state::AppState;

/// `jobhunter search <query>`
pub async fn search(state: &AppState, query: &str, filters: &SearchFilters) -> Result<()> {
    let jobs = state
        .client
        .search_jobs(query, filters)
        .await
        .context("Search failed")?;

    println!("{} jobs found", jobs.len());
    for job in &jobs {
        println!(
            "{:<10} {} | {} ({}) [{}]",
            job.id, job.title, job.company, job.location, job.source
        );
    }
    Ok(())
}

/// `jobhunter match <query>`
pub async fn match_page(
    state: &AppState,
    query: &str,
    limit: Option<u32>,
    page: usize,
    page_size: Option<usize>,
) -> Result<()> {
    let paginator = Paginator::new(page_size.unwrap_or(state.config.page_size))?;
    let mut dashboard = DashboardState::new(paginator);
    if !dashboard.begin_search(query) {
        anyhow::bail!("Enter a search query");
    }
    let results = state
        .client
        .match_jobs(query, limit.unwrap_or(state.config.match_limit))
        .await
        .context("Search failed")?;

    dashboard.finish_search(results);
    dashboard.goto_page(page);
    print_page(&dashboard);
    Ok(())
}

/// `jobhunter generate <kind> --title ...`
pub async fn generate(
    state: &AppState,
    kind: DocumentKind,
    title: &str,
    company: &str,
    description: &str,
    format: OutputFormat,
) -> Result<()> {
    if kind == DocumentKind::CoverLetter && company.trim().is_empty() {
        anyhow::bail!("--company is required for a cover letter");
    }
    let client = state.client.clone().with_output_format(format);
    let document = match kind {
        DocumentKind::Resume => client.generate_resume(title).await,
        DocumentKind::CoverLetter => {
            client
                .generate_cover_letter(title, company, description)
                .await
        }
    }
    .with_context(|| format!("Failed to generate {} for {title}", kind.label()))?;

    if let Some(content) = &document.content {
        println!("{content}\n");
    }
    let job = Job {
        title: title.to_string(),
        company: company.to_string(),
        description: description.to_string(),
        ..Job::default()
    };
    let mut sink = state.sink();
    sink.open(&job, &document).await?;
    Ok(())
}

/// Generates for a single dashboard job and reports the outcome.
pub async fn generate_for_job(
    state: &AppState,
    dashboard: &mut DashboardState,
    kind: DocumentKind,
    job: &Job,
) {
    let mut sink = state.sink();
    if generate_one(dashboard, kind, job, &state.client, &mut sink).await == JobOutcome::Skipped {
        alert(&format!("A {} for {} is already being generated", kind.label(), job.title));
    }
}

pub fn band_label(result: &MatchResult) -> &'static str {
    match result.band() {
        MatchBand::Strong => "strong",
        MatchBand::Moderate => "moderate",
        MatchBand::Weak => "weak",
    }
}

pub fn print_page(dashboard: &DashboardState) {
    if dashboard.results().is_empty() {
        println!("No jobs found. Try a different search.");
        return;
    }
    let active_id = dashboard.active().map(|r| r.job.id.as_str());
    for result in dashboard.current_page() {
        let job = &result.job;
        let checkbox = if dashboard.is_selected(&job.id) { "[x]" } else { "[ ]" };
        let marker = if Some(job.id.as_str()) == active_id { ">" } else { " " };
        println!(
            "{marker}{checkbox} {:<10} {:>5.1}% {:<8} {} | {} ({})",
            job.id,
            result.match_score,
            band_label(result),
            job.title,
            job.company,
            job.location
        );
    }
    println!(
        "page {}/{} | {} results | {} selected",
        dashboard.page(),
        dashboard.page_count(),
        dashboard.results().len(),
        dashboard.selection_len()
    );
}

pub fn print_detail(result: &MatchResult) {
    let job = &result.job;
    println!("{}", job.title);
    println!("{}", job.company);
    println!("Location: {}", job.location);
    println!("Type: {}", job.job_type_label());
    if let Some(salary) = job.salary.as_deref().filter(|s| !s.is_empty()) {
        println!("Salary: {salary}");
    }
    if let Some(date) = job.posted_on() {
        println!("Posted: {date}");
    }
    println!("Match: {:.1}% ({})", result.match_score, band_label(result));
    if !result.matched_skills.is_empty() {
        println!("Matched skills: {}", result.matched_skills.join(", "));
    }
    if !result.recommendation.is_empty() {
        println!("Recommendation: {}", result.recommendation);
    }
    println!("\n{}\n", job.description);
    if !job.url.is_empty() {
        println!("Original post: {}", job.url);
    }
}
