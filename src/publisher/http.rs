use super::{Memory, MemoryStore, PublishError};
use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;

/// Memory store reached over HTTP: one JSON POST per note.
pub struct HttpMemoryStore {
    client: Client,
    endpoint: Url,
}

impl HttpMemoryStore {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, PublishError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| PublishError::InvalidUrl(format!("{endpoint}: {e}")))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

impl MemoryStore for HttpMemoryStore {
    fn store_memory(&self, memory: &Memory) -> Result<(), PublishError> {
        tracing::debug!(endpoint = %self.endpoint, "storing memory");
        self.client
            .post(self.endpoint.clone())
            .json(memory)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)?;
        Ok(())
    }
}
