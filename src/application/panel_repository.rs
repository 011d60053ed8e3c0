// Repository trait for persisted panel options
use crate::domain::panel::PanelOptions;
use async_trait::async_trait;

#[async_trait]
pub trait PanelRepository: Send + Sync {
    /// Load stored options, `None` if nothing was saved yet
    async fn load(&self) -> anyhow::Result<Option<PanelOptions>>;

    /// Replace the stored options
    async fn save(&self, options: &PanelOptions) -> anyhow::Result<()>;
}
