#![allow(dead_code)]

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::dashboard::pagination::Paginator;
use crate::dashboard::selection::SelectionSet;
use crate::errors::ClientError;
use crate::models::job::MatchResult;
use crate::models::resume::DocumentKind;

/// In-memory state of the matching dashboard.
#[derive(Debug)]
pub struct DashboardState {
    paginator: Paginator,
    query: String,
    loading: bool,
    results: Vec<MatchResult>,
    page: usize,
    selection: SelectionSet,
    active_job_id: Option<String>,
    generating: HashSet<(DocumentKind, String)>,
    alerts: Vec<String>,
}

impl DashboardState {
    pub fn new(paginator: Paginator) -> Self {
        Self {
            paginator,
            query: String::new(),
            loading: false,
            results: Vec::new(),
            page: 1,
            selection: SelectionSet::new(),
            active_job_id: None,
            generating: HashSet::new(),
            alerts: Vec::new(),
        }
    }

    // ── search ───────────────────────────────────────────────────────────────

    /// Starts a search. Returns `false` (and changes nothing) for a blank query
    /// or while another search is outstanding.
    pub fn begin_search(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() || self.loading {
            return false;
        }
        self.query = query.to_string();
        self.loading = true;
        self.results.clear();
        self.active_job_id = None;
        self.selection.clear();
        self.page = 1;
        true
    }

    pub fn finish_search(&mut self, results: Vec<MatchResult>) {
        debug!("Search for '{}' produced {} results", self.query, results.len());
        self.active_job_id = results.first().map(|r| r.job.id.clone());
        self.results = results;
        self.loading = false;
    }

    pub fn fail_search(&mut self, error: &ClientError) {
        warn!("Search for '{}' failed: {error}", self.query);
        self.loading = false;
        self.raise_alert("Search failed".to_string());
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn find(&self, job_id: &str) -> Option<&MatchResult> {
        self.results.iter().find(|r| r.job.id == job_id)
    }

    // ── pagination ───────────────────────────────────────────────────────────

    pub fn page(&self) -> usize {
        self.paginator.clamp_page(self.page, self.results.len())
    }

    pub fn page_count(&self) -> usize {
        self.paginator.page_count(self.results.len())
    }

    pub fn current_page(&self) -> &[MatchResult] {
        self.paginator.slice(&self.results, self.page)
    }

    /// Moves to `page`, clamped to the valid range. Returns the page now shown.
    pub fn goto_page(&mut self, page: usize) -> usize {
        self.page = self.paginator.clamp_page(page, self.results.len());
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.page = self.paginator.next(self.page, self.results.len());
        self.page
    }

    pub fn prev_page(&mut self) -> usize {
        self.page = self.paginator.prev(self.page, self.results.len());
        self.page
    }

    // ── active job ───────────────────────────────────────────────────────────

    pub fn set_active(&mut self, job_id: &str) -> bool {
        if self.find(job_id).is_none() {
            return false;
        }
        self.active_job_id = Some(job_id.to_string());
        true
    }

    pub fn active(&self) -> Option<&MatchResult> {
        self.active_job_id.as_deref().and_then(|id| self.find(id))
    }

    // ── selection ────────────────────────────────────────────────────────────

    /// Toggles a job in the selection set. `None` if the id is not in the results.
    pub fn toggle_selection(&mut self, job_id: &str) -> Option<bool> {
        self.find(job_id)?;
        Some(self.selection.toggle(job_id))
    }

    /// Selects every job on the page currently shown.
    pub fn select_page(&mut self) {
        let ids: Vec<&str> = self
            .paginator
            .slice(&self.results, self.page)
            .iter()
            .map(|r| r.job.id.as_str())
            .collect();
        self.selection.select_all(ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, job_id: &str) -> bool {
        self.selection.contains(job_id)
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn selected(&self) -> Vec<&MatchResult> {
        self.selection.selected_in(&self.results)
    }

    // ── in-flight generation flags ───────────────────────────────────────────

    /// Marks a generation as outstanding. Returns `false` if it already was,
    /// i.e. the control is disabled.
    pub fn mark_generating(&mut self, kind: DocumentKind, job_id: &str) -> bool {
        self.generating.insert((kind, job_id.to_string()))
    }

    pub fn clear_generating(&mut self, kind: DocumentKind, job_id: &str) {
        self.generating.remove(&(kind, job_id.to_string()));
    }

    pub fn is_generating(&self, kind: DocumentKind, job_id: &str) -> bool {
        self.generating.contains(&(kind, job_id.to_string()))
    }

    // ── alerts ───────────────────────────────────────────────────────────────

    pub fn raise_alert(&mut self, message: String) {
        self.alerts.push(message);
    }

    /// Drains pending alerts in the order they were raised.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}
