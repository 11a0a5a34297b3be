//! HTTP client for the job-search service. Every remote call the binary makes
//! goes through `ApiClient`.
//!
//! No retries: a failed call is returned to the call site, which raises an alert.
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::ClientError;
use crate::models::job::{
    assign_missing_ids, Job, MatchResponse, MatchResult, SearchFilters, SearchResponse,
};
use crate::models::preferences::JobPreferences;
use crate::models::resume::{
    DocumentKind, GeneratedDocument, OutputFormat, StatusResponse, UploadResponse, UserProfile,
};

const SUCCESS: &str = "success";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    output_format: OutputFormat,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        // A trailing slash keeps any path prefix when service paths are joined.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalized)
            .map_err(|e| ClientError::Validation(format!("invalid API URL '{base_url}': {e}")))?;

        Ok(Self {
            client: builder.build()?,
            base,
            output_format: OutputFormat::default(),
        })
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Resolves a service path (`/api/...`) or a download URL against the base.
    /// Leading slashes are relative to the configured base, not the host root.
    pub fn resolve(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Validation(format!("invalid path '{path}': {e}")))
    }

    /// GET /health
    pub async fn health(&self) -> Result<Value, ClientError> {
        let response = self.client.get(self.resolve("/health")?).send().await?;
        decode(response).await
    }

    /// POST /api/resume/upload (multipart, field `file`)
    pub async fn upload_resume(&self, path: &Path) -> Result<UploadResponse, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume.pdf")
            .to_string();
        info!("Uploading resume {} ({} bytes)", file_name, bytes.len());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.resolve("/api/resume/upload")?)
            .multipart(form)
            .send()
            .await?;

        let upload: UploadResponse = decode(response).await?;
        require_success(&upload.status, &upload.message)?;
        Ok(upload)
    }

    /// POST /api/preferences/set (JSON body)
    pub async fn set_preferences(
        &self,
        preferences: &JobPreferences,
    ) -> Result<StatusResponse, ClientError> {
        let response = self
            .client
            .post(self.resolve("/api/preferences/set")?)
            .json(preferences)
            .send()
            .await?;

        let status: StatusResponse = decode(response).await?;
        require_success(&status.status, &status.message)?;
        Ok(status)
    }

    /// GET /api/user/me
    pub async fn get_user(&self) -> Result<UserProfile, ClientError> {
        let response = self.client.get(self.resolve("/api/user/me")?).send().await?;
        decode(response).await
    }

    /// POST /api/jobs/search — raw scrape across sources, unranked.
    pub async fn search_jobs(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<Job>, ClientError> {
        let mut params: Vec<(&str, String)> = vec![
            ("query", query.to_string()),
            ("location", filters.location.clone()),
            ("limit", filters.limit.to_string()),
        ];
        if let Some(job_type) = &filters.job_type {
            params.push(("job_type", job_type.clone()));
        }
        if let Some(level) = &filters.experience_level {
            params.push(("experience_level", level.clone()));
        }

        let response = self
            .client
            .post(self.resolve("/api/jobs/search")?)
            .query(&params)
            .send()
            .await?;

        let mut search: SearchResponse = decode(response).await?;
        if let Some(status) = &search.status {
            require_success(status, "job search failed")?;
        }
        assign_missing_ids(search.jobs.iter_mut());
        debug!("Search returned {} jobs (total={})", search.jobs.len(), search.total);
        Ok(search.jobs)
    }

    /// POST /api/jobs/match — jobs ranked against the uploaded resume.
    pub async fn match_jobs(&self, query: &str, limit: u32) -> Result<Vec<MatchResult>, ClientError> {
        let limit = limit.to_string();
        let response = self
            .client
            .post(self.resolve("/api/jobs/match")?)
            .query(&[("query", query), ("limit", limit.as_str())])
            .send()
            .await?;

        let mut matched: MatchResponse = decode(response).await?;
        // The service omits `status` when nothing was found.
        if let Some(status) = &matched.status {
            require_success(status, "job matching failed")?;
        }
        assign_missing_ids(matched.jobs.iter_mut().map(|r| &mut r.job));
        debug!("Match returned {} results (total={})", matched.jobs.len(), matched.total);
        Ok(matched.jobs)
    }

    /// POST /api/resume/generate
    pub async fn generate_resume(&self, job_title: &str) -> Result<GeneratedDocument, ClientError> {
        let response = self
            .client
            .post(self.resolve("/api/resume/generate")?)
            .query(&[
                ("job_title", job_title),
                ("output_format", self.output_format.as_str()),
            ])
            .send()
            .await?;

        let document: GeneratedDocument = decode(response).await?;
        require_success(&document.status, "resume generation failed")?;
        Ok(document)
    }

    /// POST /api/cover-letter/generate
    pub async fn generate_cover_letter(
        &self,
        job_title: &str,
        company_name: &str,
        job_description: &str,
    ) -> Result<GeneratedDocument, ClientError> {
        let response = self
            .client
            .post(self.resolve("/api/cover-letter/generate")?)
            .query(&[
                ("job_title", job_title),
                ("company_name", company_name),
                ("job_description", job_description),
            ])
            .send()
            .await?;

        let document: GeneratedDocument = decode(response).await?;
        require_success(&document.status, "cover letter generation failed")?;
        Ok(document)
    }

    /// GET a generated document and write it into `dir`, keeping the service's file name.
    pub async fn download(&self, download_url: &str, dir: &Path) -> Result<PathBuf, ClientError> {
        let url = self.resolve(download_url)?;
        let file_name = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ClientError::Validation(format!("no file name in '{download_url}'")))?
            .to_string();

        let response = self.client.get(url).send().await?;
        let response = ensure_success(response).await?;
        let bytes = response.bytes().await?;

        tokio::fs::create_dir_all(dir).await?;
        let target = dir.join(file_name);
        tokio::fs::write(&target, &bytes).await?;
        info!("Saved {} bytes to {}", bytes.len(), target.display());
        Ok(target)
    }
}

/// The generation seam used by bulk actions. `ApiClient` is the production
/// implementation; tests substitute their own.
#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    async fn generate(&self, kind: DocumentKind, job: &Job)
        -> Result<GeneratedDocument, ClientError>;
}

#[async_trait]
impl DocumentGenerator for ApiClient {
    async fn generate(
        &self,
        kind: DocumentKind,
        job: &Job,
    ) -> Result<GeneratedDocument, ClientError> {
        match kind {
            DocumentKind::Resume => self.generate_resume(&job.title).await,
            // The dashboard sends title and company only, like the detail-view button.
            DocumentKind::CoverLetter => {
                self.generate_cover_letter(&job.title, &job.company, "").await
            }
        }
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::from_response_body(status.as_u16(), body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = ensure_success(response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(ClientError::Parse)
}

fn require_success(status: &str, message: &str) -> Result<(), ClientError> {
    if status == SUCCESS {
        Ok(())
    } else {
        Err(ClientError::UnexpectedStatus(format!("{status}: {message}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(&server.url(), None).unwrap()
    }

    #[test]
    fn test_resolve_download_url_against_base() {
        let client = ApiClient::new("http://localhost:8000", None).unwrap();
        assert_eq!(
            client.resolve("/api/downloads/1_resume_Dev.pdf").unwrap().as_str(),
            "http://localhost:8000/api/downloads/1_resume_Dev.pdf"
        );
    }

    #[test]
    fn test_resolve_keeps_base_path_prefix() {
        let client = ApiClient::new("http://host/jobhunter", None).unwrap();
        assert_eq!(
            client.resolve("/api/jobs/match").unwrap().as_str(),
            "http://host/jobhunter/api/jobs/match"
        );
        let client = ApiClient::new("http://host/jobhunter/", None).unwrap();
        assert_eq!(
            client.resolve("/api/downloads/a.pdf").unwrap().as_str(),
            "http://host/jobhunter/api/downloads/a.pdf"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(matches!(
            ApiClient::new("not a url", None),
            Err(ClientError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_match_jobs_sends_query_and_decodes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/jobs/match")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "rust developer".into()),
                Matcher::UrlEncoded("limit".into(), "5".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status": "success", "total": 1, "jobs": [
                    {"job": {"id": "j1", "title": "Rust Dev", "company": "Acme"},
                     "match_score": 91, "recommendation": "Apply", "matched_skills": ["rust"]}
                ]}"#,
            )
            .create_async()
            .await;

        let results = client_for(&server)
            .match_jobs("rust developer", 5)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].job.id, "j1");
        assert_eq!(results[0].match_score, 91.0);
    }

    #[tokio::test]
    async fn test_match_jobs_assigns_ids_to_scraped_jobs() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/jobs/match")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"status": "success", "total": 3, "jobs": [
                    {"job": {"title": "Rust Dev", "company": "Acme", "url": "https://x/1",
                             "source": "remoteok", "salary": null},
                     "match_score": 72.5, "recommendation": "Good", "matched_skills": []},
                    {"job": {"title": "Go Dev", "company": "Beta", "url": ""},
                     "match_score": 60, "recommendation": "", "matched_skills": []},
                    {"job": {"title": "Rust Dev", "company": "Acme", "url": "https://x/1"},
                     "match_score": 55, "recommendation": "", "matched_skills": []}
                ]}"#,
            )
            .create_async()
            .await;

        let results = client_for(&server).match_jobs("dev", 10).await.unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.job.id.as_str()).collect();
        assert_eq!(ids, vec!["https://x/1", "2", "https://x/1#3"]);

        let mut selection = crate::dashboard::selection::SelectionSet::new();
        selection.toggle(&results[2].job.id);
        assert_eq!(selection.selected_in(&results).len(), 1);
    }

    #[tokio::test]
    async fn test_search_jobs_sends_defaults_and_omits_unset_filters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/jobs/search")
            .match_query(Matcher::Regex("^query=rust&location=India&limit=50$".into()))
            .with_status(200)
            .with_body(
                r#"{"status": "success", "total": 1, "jobs": [
                    {"title": "Rust Dev", "company": "Acme", "url": "https://x/9"}
                ]}"#,
            )
            .create_async()
            .await;

        let jobs = client_for(&server)
            .search_jobs("rust", &SearchFilters::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "https://x/9");
    }

    #[tokio::test]
    async fn test_search_jobs_sends_filters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/jobs/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "data engineer".into()),
                Matcher::UrlEncoded("location".into(), "Bangalore".into()),
                Matcher::UrlEncoded("job_type".into(), "on-site".into()),
                Matcher::UrlEncoded("experience_level".into(), "senior".into()),
                Matcher::UrlEncoded("limit".into(), "5".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"status": "success", "total": 0, "jobs": []}"#)
            .create_async()
            .await;

        let filters = SearchFilters {
            location: "Bangalore".to_string(),
            job_type: Some("on-site".to_string()),
            experience_level: Some("senior".to_string()),
            limit: 5,
        };
        let jobs = client_for(&server)
            .search_jobs("data engineer", &filters)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn test_search_jobs_rejects_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/jobs/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status": "error", "jobs": []}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .search_jobs("rust", &SearchFilters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedStatus(_)));
    }

    #[tokio::test]
    async fn test_get_user_without_session_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/user/me")
            .with_status(404)
            .with_body(r#"{"error": "No active session"}"#)
            .create_async()
            .await;

        let err = client_for(&server).get_user().await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "No active session");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_user_decodes_profile() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/user/me")
            .with_status(200)
            .with_body(
                r#"{"id": 1, "resume": {"full_name": "Ada", "technical_skills": ["rust"]},
                    "preferences": {}}"#,
            )
            .create_async()
            .await;

        let profile = client_for(&server).get_user().await.unwrap();
        assert_eq!(profile.resume.as_ref().unwrap().full_name, "Ada");
        assert!(profile.preferences().is_none());
    }

    #[tokio::test]
    async fn test_health_returns_status_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_status(200)
            .with_body(r#"{"status": "ok", "message": "AI Job Hunter is running"}"#)
            .create_async()
            .await;

        let body = client_for(&server).health().await.unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_match_jobs_without_status_is_empty_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/jobs/match")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"total": 0, "jobs": []}"#)
            .create_async()
            .await;

        let results = client_for(&server).match_jobs("cobol", 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_error_body_becomes_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/resume/generate")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error": "Please upload resume first"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .generate_resume("Data Engineer")
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Please upload resume first");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cover_letter_query_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/cover-letter/generate")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("job_title".into(), "ML Engineer".into()),
                Matcher::UrlEncoded("company_name".into(), "R&D Labs".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"status": "success", "content": "Dear...", "download_url": "/api/downloads/1_cover_letter_R&D_Labs.txt"}"#,
            )
            .create_async()
            .await;

        let doc = client_for(&server)
            .generate_cover_letter("ML Engineer", "R&D Labs", "")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(doc.content.as_deref(), Some("Dear..."));
    }

    #[tokio::test]
    async fn test_set_preferences_posts_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/preferences/set")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "job_title": "Platform Engineer",
                "job_type": ["remote", "hybrid"]
            })))
            .with_status(200)
            .with_body(r#"{"status": "success", "message": "Preferences saved"}"#)
            .create_async()
            .await;

        let prefs = JobPreferences {
            job_title: "Platform Engineer".to_string(),
            ..JobPreferences::default()
        };
        let status = client_for(&server).set_preferences(&prefs).await.unwrap();

        mock.assert_async().await;
        assert_eq!(status.message, "Preferences saved");
    }

    #[tokio::test]
    async fn test_upload_error_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/resume/upload")
            .with_status(400)
            .with_body(r#"{"status": "error", "message": "could not read PDF"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let err = client_for(&server).upload_resume(&path).await.unwrap_err();
        assert_eq!(err.to_string(), "API error (status 400): could not read PDF");
    }

    #[tokio::test]
    async fn test_download_writes_file() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/downloads/7_resume_Dev.pdf")
            .with_status(200)
            .with_body("pdf-bytes")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let saved = client_for(&server)
            .download("/api/downloads/7_resume_Dev.pdf", dir.path())
            .await
            .unwrap();

        assert_eq!(saved, dir.path().join("7_resume_Dev.pdf"));
        assert_eq!(std::fs::read_to_string(saved).unwrap(), "pdf-bytes");
    }
}
