use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Could not determine home directory")]
    NoHomeDir,
}

const VALID_URL_SCHEMES: &[&str] = &["http", "https"];

fn validate_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidConfig(format!("{key} is not a valid URL: {e}")))?;
    if !VALID_URL_SCHEMES.contains(&url.scheme()) {
        return Err(ConfigError::InvalidConfig(format!(
            "{key} must use one of: {}",
            VALID_URL_SCHEMES.join(", ")
        )));
    }
    Ok(url)
}

fn validate_path(key: &str, path: &str) -> Result<(), ConfigError> {
    if path.contains('\0') {
        return Err(ConfigError::InvalidConfig(format!(
            "{key} contains invalid characters"
        )));
    }
    if path.trim().is_empty() {
        return Err(ConfigError::InvalidConfig(format!("{key} cannot be empty")));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default = "default_fallback_path")]
    pub fallback_path: String,
    #[serde(default)]
    pub memory_endpoint: Option<String>,
    #[serde(default = "default_memory_category")]
    pub memory_category: String,
    #[serde(default = "default_memory_tags")]
    pub memory_tags: Vec<String>,
    #[serde(default = "default_memory_source")]
    pub memory_source: String,
    #[serde(default = "default_memory_type")]
    pub memory_type: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            owner: None,
            fallback_path: default_fallback_path(),
            memory_endpoint: None,
            memory_category: default_memory_category(),
            memory_tags: default_memory_tags(),
            memory_source: default_memory_source(),
            memory_type: default_memory_type(),
        }
    }
}

impl Config {
    /// Loads the config file at `path`, or the default location when `None`.
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("api_base", &self.api_base)?;
        if let Some(ref endpoint) = self.memory_endpoint {
            validate_url("memory_endpoint", endpoint)?;
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "timeout_secs must be a positive integer".to_string(),
            ));
        }
        validate_path("fallback_path", &self.fallback_path)?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Fallback file location with `~` expanded.
    pub fn fallback_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.fallback_path).to_string())
    }

    pub fn report_title(&self) -> String {
        match self.owner.as_deref().map(str::trim) {
            Some(owner) if !owner.is_empty() => format!("{owner}的待办事项"),
            _ => "待办事项".to_string(),
        }
    }
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".config").join("todo-sync").join("config.json"))
}

fn default_api_base() -> String {
    "http://localhost:8890".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_fallback_path() -> String {
    "~/.openclaw/workspace/knowledge/todos_sync.md".to_string()
}

fn default_memory_category() -> String {
    "todos".to_string()
}

fn default_memory_tags() -> Vec<String> {
    vec!["待办".to_string(), "任务".to_string(), "todo".to_string()]
}

fn default_memory_source() -> String {
    "todolist_app".to_string()
}

fn default_memory_type() -> String {
    "todo_sync".to_string()
}
