// Main entry point - Dependency injection and server setup
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use imageit_sensors::application::panel_repository::PanelRepository;
use imageit_sensors::application::panel_service::PanelService;
use imageit_sensors::infrastructure::config::load_app_config;
use imageit_sensors::infrastructure::file_repository::{FileRepository, MemoryRepository};
use imageit_sensors::presentation::app_state::AppState;
use imageit_sensors::presentation::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository: Arc<dyn PanelRepository> = match &config.storage.path {
        Some(path) => {
            tracing::info!("Persisting panel options to {}", path.display());
            Arc::new(FileRepository::new(path.clone()))
        }
        None => {
            tracing::warn!("No storage.path configured, panel options will not survive a restart");
            Arc::new(MemoryRepository::new())
        }
    };

    // Create services (application layer)
    let panel_service = PanelService::load(repository, config.display.clone()).await?;

    let state = Arc::new(AppState { panel_service });

    // Build router (presentation layer)
    let router = router(state);

    tracing::info!("Starting imageit-sensors service on {}", config.server.bind);
    axum::serve(tokio::net::TcpListener::bind(config.server.bind).await?, router).await?;

    Ok(())
}
