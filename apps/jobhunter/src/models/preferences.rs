#![allow(dead_code)]

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
pub enum JobType {
    #[serde(rename = "remote")]
    Remote,
    #[serde(rename = "hybrid")]
    Hybrid,
    #[serde(rename = "on-site")]
    #[value(name = "on-site")]
    OnSite,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Remote => "remote",
            JobType::Hybrid => "hybrid",
            JobType::OnSite => "on-site",
        }
    }
}

/// The preferences form. A plain value object: the service receives it as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JobPreferences {
    pub job_title: String,
    pub experience_level: ExperienceLevel,
    pub job_type: Vec<JobType>,
    pub locations: Vec<String>,
    pub min_salary: u64,
    pub max_salary: u64,
    pub industries: Vec<String>,
    pub required_skills: Vec<String>,
    pub nice_to_have_skills: Vec<String>,
}

impl Default for JobPreferences {
    fn default() -> Self {
        Self {
            job_title: String::new(),
            experience_level: ExperienceLevel::Mid,
            job_type: vec![JobType::Remote, JobType::Hybrid],
            locations: Vec::new(),
            min_salary: 0,
            max_salary: 0,
            industries: Vec::new(),
            required_skills: Vec::new(),
            nice_to_have_skills: Vec::new(),
        }
    }
}

impl JobPreferences {
    /// Appends a trimmed skill. Blank input is ignored. Returns whether it was added.
    pub fn add_skill(&mut self, input: &str) -> bool {
        push_trimmed(&mut self.required_skills, input)
    }

    pub fn add_location(&mut self, input: &str) -> bool {
        push_trimmed(&mut self.locations, input)
    }

    pub fn remove_skill(&mut self, index: usize) {
        if index < self.required_skills.len() {
            self.required_skills.remove(index);
        }
    }

    pub fn remove_location(&mut self, index: usize) {
        if index < self.locations.len() {
            self.locations.remove(index);
        }
    }

    /// Flips membership of `job_type`; a newly added type goes to the end.
    pub fn toggle_job_type(&mut self, job_type: JobType) {
        if let Some(pos) = self.job_type.iter().position(|t| *t == job_type) {
            self.job_type.remove(pos);
        } else {
            self.job_type.push(job_type);
        }
    }
}

fn push_trimmed(list: &mut Vec<String>, input: &str) -> bool {
    let value = input.trim();
    if value.is_empty() {
        return false;
    }
    list.push(value.to_string());
    true
}
