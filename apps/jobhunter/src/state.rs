use std::path::PathBuf;

use crate::api_client::ApiClient;
use crate::config::Config;
use crate::dashboard::sink::TerminalSink;

/// Shared state handed to every command.
#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub config: Config,
}

impl AppState {
    pub fn sink(&self) -> TerminalSink {
        TerminalSink::new(
            self.client.clone(),
            self.config.download_dir.as_ref().map(PathBuf::from),
        )
    }
}
