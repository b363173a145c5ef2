use std::path::{Path, PathBuf};

/// Writes the report to a fixed file, replacing whatever was there.
#[derive(Debug, Clone)]
pub struct FileFallback {
    path: PathBuf,
}

impl FileFallback {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn write(&self, content: &str) -> Result<PathBuf, std::io::Error> {
        // Create parent directories if they don't exist
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, content)?;
        tracing::debug!(
            path = %self.path.display(),
            bytes = content.len(),
            "fallback file written"
        );
        Ok(self.path.clone())
    }
}
