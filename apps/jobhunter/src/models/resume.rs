use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::preferences::JobPreferences;

/// Resume fields extracted by the service after upload.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResumeData {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: Option<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub certifications: Vec<String>,
    pub years_of_experience: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub user_id: Option<Value>,
    pub resume: Option<ResumeData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: Value,
    #[serde(default)]
    pub resume: Option<ResumeData>,
    #[serde(default)]
    pub preferences: Value,
}

impl UserProfile {
    /// Stored preferences, if any were saved. The service stores `{}` until
    /// the preferences form has been submitted.
    pub fn preferences(&self) -> Option<JobPreferences> {
        match &self.preferences {
            Value::Object(map) if !map.is_empty() => {
                serde_json::from_value(self.preferences.clone()).ok()
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DocumentKind {
    Resume,
    #[value(name = "cover-letter")]
    CoverLetter,
}

impl DocumentKind {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "cover letter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Docx,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }
}

/// A generated resume or cover letter. `download_url` is relative to the service root.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GeneratedDocument {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub download_url: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_preferences_is_none() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id": 3, "resume": null, "preferences": {}}"#).unwrap();
        assert!(profile.preferences().is_none());
        assert!(profile.resume.is_none());
    }

    #[test]
    fn test_saved_preferences_decode() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id": 3, "preferences": {"job_title": "SRE", "experience_level": "senior"}}"#,
        )
        .unwrap();
        let prefs = profile.preferences().unwrap();
        assert_eq!(prefs.job_title, "SRE");
        assert_eq!(prefs.experience_level.as_str(), "senior");
    }

    #[test]
    fn test_partial_resume_decodes() {
        let resume: ResumeData =
            serde_json::from_str(r#"{"full_name": "Ada", "technical_skills": ["rust"]}"#).unwrap();
        assert_eq!(resume.full_name, "Ada");
        assert_eq!(resume.years_of_experience, 0);
    }
}
