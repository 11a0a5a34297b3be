#![allow(dead_code)]

use std::collections::HashSet;

use crate::models::job::MatchResult;

/// Job ids checked for bulk action.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id` and returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.ids.extend(ids.into_iter().map(str::to_string));
    }

    /// Selected results, in result-list order. Ids absent from `results` are skipped.
    pub fn selected_in<'a>(&self, results: &'a [MatchResult]) -> Vec<&'a MatchResult> {
        results
            .iter()
            .filter(|r| self.ids.contains(&r.job.id))
            .collect()
    }
}
