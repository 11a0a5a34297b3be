//! Where generated documents go once the service returns a download URL.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::api_client::ApiClient;
use crate::errors::ClientError;
use crate::models::job::Job;
use crate::models::resume::GeneratedDocument;

#[async_trait]
pub trait DocumentSink: Send {
    async fn open(&mut self, job: &Job, document: &GeneratedDocument) -> Result<(), ClientError>;
}

/// Prints the absolute download URL and, with a download directory configured,
/// saves the file there.
pub struct TerminalSink {
    client: ApiClient,
    download_dir: Option<PathBuf>,
}

impl TerminalSink {
    pub fn new(client: ApiClient, download_dir: Option<PathBuf>) -> Self {
        Self {
            client,
            download_dir,
        }
    }
}

#[async_trait]
impl DocumentSink for TerminalSink {
    async fn open(&mut self, job: &Job, document: &GeneratedDocument) -> Result<(), ClientError> {
        let url = self.client.resolve(&document.download_url)?;
        if let Some(message) = &document.message {
            info!("{message}");
        }
        println!("{} @ {}: {url}", job.title, job.company);

        if let Some(dir) = &self.download_dir {
            let saved = self.client.download(&document.download_url, dir).await?;
            println!("  saved to {}", saved.display());
        }
        Ok(())
    }
}
