//! Per-job document generation, singly and across the selection.
//!
//! Bulk runs are strictly sequential: each call is awaited before the next is
//! issued, so documents open one at a time. A failure raises an alert and the
//! batch moves on.

use tracing::{info, warn};

use crate::api_client::DocumentGenerator;
use crate::dashboard::page::DashboardState;
use crate::dashboard::sink::DocumentSink;
use crate::models::job::Job;
use crate::models::resume::{DocumentKind, GeneratedDocument};

#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Opened(GeneratedDocument),
    Failed(String),
    /// A generation of the same kind for this job was already outstanding.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct BulkReport {
    pub kind: DocumentKind,
    pub outcomes: Vec<(String, JobOutcome)>,
}

impl BulkReport {
    pub fn attempted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| !matches!(o, JobOutcome::Skipped))
            .count()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, JobOutcome::Opened(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, JobOutcome::Failed(_)))
            .count()
    }
}

/// Generates one document for `job`, hands it to the sink, and raises an alert on failure.
pub async fn generate_one(
    state: &mut DashboardState,
    kind: DocumentKind,
    job: &Job,
    generator: &dyn DocumentGenerator,
    sink: &mut dyn DocumentSink,
) -> JobOutcome {
    if !state.mark_generating(kind, &job.id) {
        return JobOutcome::Skipped;
    }

    let result = match generator.generate(kind, job).await {
        Ok(document) => {
            let opened = sink.open(job, &document).await;
            opened.map(|()| document)
        }
        Err(e) => Err(e),
    };

    state.clear_generating(kind, &job.id);

    match result {
        Ok(document) => {
            info!("Generated {} for job {}", kind.label(), job.id);
            JobOutcome::Opened(document)
        }
        Err(e) => {
            warn!("Generating {} for job {} failed: {e}", kind.label(), job.id);
            state.raise_alert(format!("Failed to generate {} for {}", kind.label(), job.title));
            JobOutcome::Failed(e.to_string())
        }
    }
}

/// Runs `generate_one` over every selected job, in result order.
pub async fn generate_for_selected(
    state: &mut DashboardState,
    kind: DocumentKind,
    generator: &dyn DocumentGenerator,
    sink: &mut dyn DocumentSink,
) -> BulkReport {
    let jobs: Vec<Job> = state.selected().into_iter().map(|r| r.job.clone()).collect();
    info!("Generating {} {}(s) sequentially", jobs.len(), kind.label());

    let mut outcomes = Vec::with_capacity(jobs.len());
    for job in &jobs {
        let outcome = generate_one(state, kind, job, generator, sink).await;
        outcomes.push((job.id.clone(), outcome));
    }

    BulkReport { kind, outcomes }
}
