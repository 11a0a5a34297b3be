use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A job posting as returned by the service. Immutable once received.
///
/// Scraped jobs usually arrive without an `id`; see `assign_missing_ids`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Job {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub posted_date: Option<String>,
}

impl Job {
    /// Job type shown in the detail view; the service leaves it blank for most sources.
    pub fn job_type_label(&self) -> &str {
        match self.job_type.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => "Full-time",
        }
    }

    /// Parses `posted_date` leniently. Sources emit ISO datetimes, bare dates,
    /// or RFC 2822 strings from RSS feeds; anything else yields `None`.
    pub fn posted_on(&self) -> Option<NaiveDate> {
        let raw = self.posted_date.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(dt.date());
            }
        }
        if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(d);
        }
        DateTime::parse_from_rfc2822(raw).ok().map(|dt| dt.date_naive())
    }
}

/// A job paired with its backend-computed match score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub job: Job,
    pub match_score: f64,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub matched_skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchBand {
    Strong,
    Moderate,
    Weak,
}

impl MatchResult {
    pub fn band(&self) -> MatchBand {
        if self.match_score > 80.0 {
            MatchBand::Strong
        } else if self.match_score > 50.0 {
            MatchBand::Moderate
        } else {
            MatchBand::Weak
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MatchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub jobs: Vec<MatchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// Optional filters for a raw job search.
#[derive(Debug, Clone)]
pub struct SearchFilters {
    pub location: String,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub limit: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            location: "India".to_string(),
            job_type: None,
            experience_level: None,
            limit: 50,
        }
    }
}

/// Gives every job with a blank id a stable, unique one: its posting URL, or
/// its 1-based position when the URL is empty. A clash gets `#<position>` appended.
pub fn assign_missing_ids<'a>(jobs: impl IntoIterator<Item = &'a mut Job>) {
    let jobs: Vec<&mut Job> = jobs.into_iter().collect();
    let mut seen: HashSet<String> = jobs
        .iter()
        .filter(|j| !j.id.trim().is_empty())
        .map(|j| j.id.clone())
        .collect();

    for (index, job) in jobs.into_iter().enumerate() {
        if !job.id.trim().is_empty() {
            continue;
        }
        let position = index + 1;
        let url = job.url.trim();
        let mut id = if url.is_empty() {
            position.to_string()
        } else {
            url.to_string()
        };
        if seen.contains(&id) {
            id = format!("{id}#{position}");
        }
        seen.insert(id.clone());
        job.id = id;
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
    }

    Ok(match Option::<Id>::deserialize(deserializer)? {
        Some(Id::Text(s)) => s,
        Some(Id::Int(n)) => n.to_string(),
        None => String::new(),
    })
}
