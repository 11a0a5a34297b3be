use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::resume::ResumeData;
use crate::state::AppState;

/// `jobhunter upload <path>`
pub async fn upload(state: &AppState, path: &Path) -> Result<()> {
    let response = state
        .client
        .upload_resume(path)
        .await
        .context("Upload failed. Please try again.")?;

    info!("{}", response.message);
    if let Some(user_id) = &response.user_id {
        println!("User id: {user_id}");
    }
    if let Some(resume) = &response.resume {
        print_resume(resume);
    }
    Ok(())
}

/// `jobhunter me`
pub async fn me(state: &AppState) -> Result<()> {
    let profile = state.client.get_user().await?;
    println!("User id: {}", profile.id);
    match &profile.resume {
        Some(resume) => print_resume(resume),
        None => println!("No resume on file"),
    }
    match profile.preferences() {
        Some(prefs) => println!("Preferences:\n{}", serde_json::to_string_pretty(&prefs)?),
        None => println!("No preferences saved"),
    }
    Ok(())
}

pub fn print_resume(resume: &ResumeData) {
    println!("{} <{}> {}", resume.full_name, resume.email, resume.phone);
    if !resume.location.is_empty() {
        println!("Location: {}", resume.location);
    }
    println!("Experience: {} years", resume.years_of_experience);
    if let Some(summary) = resume.summary.as_deref().filter(|s| !s.is_empty()) {
        println!("Summary: {summary}");
    }
    if !resume.technical_skills.is_empty() {
        println!("Technical skills: {}", resume.technical_skills.join(", "));
    }
    if !resume.soft_skills.is_empty() {
        println!("Soft skills: {}", resume.soft_skills.join(", "));
    }
}
