// Panel option stores: a JSON file on disk, or process memory
use crate::application::panel_repository::PanelRepository;
use crate::domain::panel::PanelOptions;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PanelRepository for FileRepository {
    async fn load(&self) -> Result<Option<PanelOptions>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No panel options at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        let options = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse panel options in {}", self.path.display()))?;
        Ok(Some(options))
    }

    async fn save(&self, options: &PanelOptions) -> Result<()> {
        let json = serde_json::to_vec_pretty(options).context("Failed to serialize panel options")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        // Write then rename so a crash never leaves a half-written file behind.
        let temp = self.temp_path();
        tokio::fs::write(&temp, &json)
            .await
            .with_context(|| format!("Failed to write {}", temp.display()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        tracing::debug!("Saved panel options to {}", self.path.display());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryRepository {
    options: Mutex<Option<PanelOptions>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PanelRepository for MemoryRepository {
    async fn load(&self) -> Result<Option<PanelOptions>> {
        Ok(self.options.lock().await.clone())
    }

    async fn save(&self, options: &PanelOptions) -> Result<()> {
        *self.options.lock().await = Some(options.clone());
        Ok(())
    }
}
