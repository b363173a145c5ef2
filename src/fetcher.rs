use crate::models::Snapshot;
use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

pub const EXPORT_PATH: &str = "/api/export";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP client error: {0}")]
    Client(reqwest::Error),
    #[error("Request failed: {0}")]
    Request(reqwest::Error),
    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),
    #[error("Malformed export: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can hand back a full export snapshot.
pub trait SnapshotSource {
    fn fetch(&self) -> Result<Snapshot, FetchError>;
}

/// Reads the export from the to-do service with one blocking GET.
pub struct SnapshotFetcher {
    client: Client,
    export_url: Url,
}

impl SnapshotFetcher {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, FetchError> {
        let export_url = export_url(api_base)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, export_url })
    }

    pub fn export_url(&self) -> &Url {
        &self.export_url
    }
}

impl SnapshotSource for SnapshotFetcher {
    fn fetch(&self) -> Result<Snapshot, FetchError> {
        tracing::debug!(url = %self.export_url, "fetching export");
        let response = self
            .client
            .get(self.export_url.clone())
            .send()
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().map_err(FetchError::Request)?;
        let snapshot = Snapshot::from_json(&body)?;
        tracing::debug!(
            todos = snapshot.todos.len(),
            categories = snapshot.categories.len(),
            "export received"
        );
        Ok(snapshot)
    }
}

fn export_url(api_base: &str) -> Result<Url, FetchError> {
    let raw = format!("{}{}", api_base.trim_end_matches('/'), EXPORT_PATH);
    Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))
}
