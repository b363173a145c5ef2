use crate::config::Config;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

pub mod file;
pub mod http;

pub use file::FileFallback;
pub use http::HttpMemoryStore;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Memory store request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// A memory note as accepted by the store's "store memory" operation.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Memory {
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

pub trait MemoryStore {
    fn store_memory(&self, memory: &Memory) -> Result<(), PublishError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Stored,
    SavedLocally(PathBuf),
}

/// Fixed labels attached to every stored note.
#[derive(Debug, Clone)]
pub struct MemoryTemplate {
    pub category: String,
    pub tags: Vec<String>,
    pub source: String,
    pub kind: String,
}

impl MemoryTemplate {
    pub fn from_config(config: &Config) -> Self {
        Self {
            category: config.memory_category.clone(),
            tags: config.memory_tags.clone(),
            source: config.memory_source.clone(),
            kind: config.memory_type.clone(),
        }
    }

    pub fn build(&self, content: &str) -> Memory {
        let mut metadata = BTreeMap::new();
        metadata.insert("source".to_string(), self.source.clone());
        metadata.insert("type".to_string(), self.kind.clone());
        metadata.insert("synced_at".to_string(), chrono::Utc::now().to_rfc3339());
        Memory {
            content: content.to_string(),
            category: self.category.clone(),
            tags: self.tags.clone(),
            metadata,
        }
    }
}

/// Sends the report to the memory store when one is configured, else writes the fallback file.
pub struct Publisher {
    store: Option<Box<dyn MemoryStore>>,
    fallback: FileFallback,
    template: MemoryTemplate,
}

impl Publisher {
    pub fn new(
        store: Option<Box<dyn MemoryStore>>,
        fallback: FileFallback,
        template: MemoryTemplate,
    ) -> Self {
        Self {
            store,
            fallback,
            template,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, PublishError> {
        let store: Option<Box<dyn MemoryStore>> = match config.memory_endpoint {
            Some(ref endpoint) => {
                Some(Box::new(HttpMemoryStore::new(endpoint, config.timeout())?))
            }
            None => None,
        };
        Ok(Self::new(
            store,
            FileFallback::new(config.fallback_path()),
            MemoryTemplate::from_config(config),
        ))
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub fn publish(&self, content: &str) -> Result<PublishOutcome, PublishError> {
        match self.store {
            Some(ref store) => {
                let memory = self.template.build(content);
                store.store_memory(&memory)?;
                tracing::info!(category = %memory.category, "memory stored");
                Ok(PublishOutcome::Stored)
            }
            None => {
                tracing::debug!("no memory store configured, using fallback file");
                let path = self.fallback.write(content)?;
                Ok(PublishOutcome::SavedLocally(path))
            }
        }
    }
}
