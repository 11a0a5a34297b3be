use anyhow::{Context, Result};
use clap::Args;

use crate::models::preferences::{ExperienceLevel, JobPreferences, JobType};
use crate::state::AppState;

#[derive(Debug, Args)]
pub struct PreferencesArgs {
    /// Target job title
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, value_enum, default_value_t = ExperienceLevel::Mid)]
    pub level: ExperienceLevel,
    /// Replaces the default job types (remote, hybrid) when given
    #[arg(long = "job-type", value_enum)]
    pub job_types: Vec<JobType>,
    #[arg(long = "location")]
    pub locations: Vec<String>,
    #[arg(long, default_value_t = 0)]
    pub min_salary: u64,
    #[arg(long, default_value_t = 0)]
    pub max_salary: u64,
    #[arg(long = "industry")]
    pub industries: Vec<String>,
    #[arg(long = "skill")]
    pub skills: Vec<String>,
    #[arg(long = "nice-to-have")]
    pub nice_to_have: Vec<String>,
}

impl PreferencesArgs {
    pub fn into_preferences(self) -> JobPreferences {
        let mut prefs = JobPreferences {
            job_title: self.title.trim().to_string(),
            experience_level: self.level,
            min_salary: self.min_salary,
            max_salary: self.max_salary,
            ..JobPreferences::default()
        };
        if !self.job_types.is_empty() {
            prefs.job_type.clear();
            for job_type in self.job_types {
                if !prefs.job_type.contains(&job_type) {
                    prefs.toggle_job_type(job_type);
                }
            }
        }
        for location in &self.locations {
            prefs.add_location(location);
        }
        for skill in &self.skills {
            prefs.add_skill(skill);
        }
        prefs.industries = trimmed(self.industries);
        prefs.nice_to_have_skills = trimmed(self.nice_to_have);
        prefs
    }
}

fn trimmed(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// `jobhunter preferences ...`
pub async fn run(state: &AppState, args: PreferencesArgs) -> Result<()> {
    let prefs = args.into_preferences();
    let status = state
        .client
        .set_preferences(&prefs)
        .await
        .context("Failed to save preferences")?;
    println!("{}", status.message);
    Ok(())
}
