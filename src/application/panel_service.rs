// Panel service - Owns the live options snapshot and the measured image bounds
use crate::application::panel_repository::PanelRepository;
use crate::application::position_model::{apply_drag, text_size_px};
use crate::application::sensor_projector::{project, SensorView};
use crate::application::value_reducer::DisplayContext;
use crate::domain::frame::DataFrame;
use crate::domain::image::{ImageBounds, ImageLoaded, PixelDelta, PositionError};
use crate::domain::mapping::Mapping;
use crate::domain::panel::PanelOptions;
use crate::domain::sensor::Sensor;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("sensors are locked")]
    SensorsLocked,
    #[error("no sensor at index {0}")]
    SensorNotFound(usize),
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub image_url: String,
    pub image: ImageBounds,
    pub text_size_px: Option<f64>,
    pub lock_sensors: bool,
    pub sensors: Vec<SensorView>,
}

#[derive(Clone)]
pub struct PanelService {
    repository: Arc<dyn PanelRepository>,
    display: DisplayContext,
    options: Arc<RwLock<Arc<PanelOptions>>>,
    bounds: Arc<RwLock<ImageBounds>>,
    refresh_counter: Arc<AtomicU64>,
}

impl PanelService {
    pub async fn load(repository: Arc<dyn PanelRepository>, display: DisplayContext) -> anyhow::Result<Self> {
        let options = match repository.load().await? {
            Some(options) => {
                tracing::info!(
                    "Loaded panel options with {} sensors and {} mappings",
                    options.sensors.len(),
                    options.mappings.len()
                );
                options
            }
            None => {
                tracing::info!("No stored panel options, starting empty");
                PanelOptions::default()
            }
        };

        Ok(Self {
            repository,
            display,
            options: Arc::new(RwLock::new(Arc::new(options))),
            bounds: Arc::new(RwLock::new(ImageBounds::Unmeasured)),
            refresh_counter: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Current snapshot; later edits never change it
    pub async fn options(&self) -> Arc<PanelOptions> {
        self.options.read().await.clone()
    }

    pub async fn bounds(&self) -> ImageBounds {
        *self.bounds.read().await
    }

    /// Record the rendered size after the image loads or the panel resizes
    pub async fn image_loaded(&self, event: ImageLoaded) -> ImageBounds {
        let bounds = ImageBounds::from(event);
        if let Err(e) = bounds.dimensions() {
            tracing::warn!("Image reported unusable size: {}", e);
        }
        *self.bounds.write().await = bounds;
        bounds
    }

    pub async fn render(&self, series: &[DataFrame], vars: &HashMap<String, String>) -> PanelView {
        let options = self.options().await;
        let bounds = self.bounds().await;

        let sensors = project(&options, series, vars, &self.display, bounds);
        tracing::debug!(
            "Rendered {} sensors from {} series",
            sensors.len(),
            series.len()
        );

        PanelView {
            image_url: self.image_url(&options),
            image: bounds,
            text_size_px: text_size_px(options.sensors_text_size, bounds),
            lock_sensors: options.lock_sensors,
            sensors,
        }
    }

    fn image_url(&self, options: &PanelOptions) -> String {
        if !options.force_image_refresh || options.image_url.is_empty() {
            return options.image_url.clone();
        }

        let n = self.refresh_counter.fetch_add(1, Ordering::Relaxed);
        let token = format!("{}-{}", chrono::Utc::now().timestamp_millis(), n);
        let separator = if options.image_url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", options.image_url, separator, token)
    }

    pub async fn drag_sensor(&self, index: usize, delta: PixelDelta) -> Result<Arc<PanelOptions>, PanelError> {
        let bounds = self.bounds().await;

        self.commit(|options| {
            if options.lock_sensors {
                return Err(PanelError::SensorsLocked);
            }
            let sensor = options
                .sensors
                .get(index)
                .ok_or(PanelError::SensorNotFound(index))?;
            let moved = apply_drag(sensor, delta, bounds)?;

            tracing::info!(
                "Sensor {} moved to ({:.2}, {:.2})",
                index,
                moved.position.x(),
                moved.position.y()
            );
            options
                .with_sensor_replaced(index, moved)
                .ok_or(PanelError::SensorNotFound(index))
        })
        .await
    }

    pub async fn replace_options(&self, replacement: PanelOptions) -> Result<Arc<PanelOptions>, PanelError> {
        self.commit(|_| Ok(replacement)).await
    }

    pub async fn add_sensor(&self) -> Result<Arc<PanelOptions>, PanelError> {
        self.commit(|options| Ok(options.with_sensor_added(Sensor::default())))
            .await
    }

    pub async fn update_sensor(&self, index: usize, sensor: Sensor) -> Result<Arc<PanelOptions>, PanelError> {
        self.commit(|options| {
            options
                .with_sensor_replaced(index, sensor)
                .ok_or(PanelError::SensorNotFound(index))
        })
        .await
    }

    pub async fn remove_sensor(&self, index: usize) -> Result<Arc<PanelOptions>, PanelError> {
        self.commit(|options| {
            options
                .with_sensor_removed(index)
                .ok_or(PanelError::SensorNotFound(index))
        })
        .await
    }

    pub async fn replace_mappings(&self, mappings: Vec<Mapping>) -> Result<Arc<PanelOptions>, PanelError> {
        self.commit(|options| Ok(options.with_mappings(mappings))).await
    }

    /// Build the next options from the current ones, persist, then swap the snapshot.
    /// The write lock serialises edits; readers keep whatever snapshot they hold.
    async fn commit<F>(&self, edit: F) -> Result<Arc<PanelOptions>, PanelError>
    where
        F: FnOnce(&PanelOptions) -> Result<PanelOptions, PanelError>,
    {
        let mut current = self.options.write().await;
        let snapshot: &PanelOptions = &current;

        let next = match edit(snapshot) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!("Rejected panel edit: {}", e);
                return Err(e);
            }
        };

        if let Err(e) = self.repository.save(&next).await {
            tracing::error!("Failed to save panel options: {:#}", e);
            return Err(PanelError::Storage(e));
        }

        let next = Arc::new(next);
        *current = next.clone();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::frame::Field;
    use crate::domain::sensor::{Position, QuerySpec};
    use crate::infrastructure::file_repository::MemoryRepository;
    use async_trait::async_trait;

    async fn service_with(options: PanelOptions) -> (PanelService, Arc<MemoryRepository>) {
        let repository = Arc::new(MemoryRepository::new());
        repository.save(&options).await.unwrap();
        let service = PanelService::load(repository.clone(), DisplayContext::default())
            .await
            .unwrap();
        (service, repository)
    }

    fn two_sensors() -> PanelOptions {
        let a = Sensor {
            name: "a".to_string(),
            ..Sensor::default()
        };
        let b = Sensor {
            name: "b".to_string(),
            position: Position::new(95.0, 95.0),
            ..Sensor::default()
        };
        PanelOptions {
            image_url: "http://example.com/plan.png".to_string(),
            sensors: vec![a, b],
            ..PanelOptions::default()
        }
    }

    #[tokio::test]
    async fn test_load_defaults_when_empty() {
        let service = PanelService::load(Arc::new(MemoryRepository::new()), DisplayContext::default())
            .await
            .unwrap();
        assert_eq!(*service.options().await, PanelOptions::default());
        assert_eq!(service.bounds().await, ImageBounds::Unmeasured);
    }

    #[tokio::test]
    async fn test_drag_requires_measured_image() {
        let (service, _) = service_with(two_sensors()).await;

        let result = service.drag_sensor(1, PixelDelta::new(10.0, 10.0)).await;
        assert!(matches!(result, Err(PanelError::Position(PositionError::Unmeasured))));
    }

    #[tokio::test]
    async fn test_drag_replaces_snapshot_and_persists() {
        let (service, repository) = service_with(two_sensors()).await;
        service
            .image_loaded(ImageLoaded {
                width: 200.0,
                height: 100.0,
            })
            .await;

        let before = service.options().await;
        let after = service.drag_sensor(1, PixelDelta::new(20.0, 10.0)).await.unwrap();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before.sensors[1].position, Position::new(95.0, 95.0));
        assert_eq!(after.sensors[1].position, Position::new(100.0, 100.0));
        assert_eq!(after.sensors[0], before.sensors[0]);
        assert_eq!(repository.load().await.unwrap().as_ref(), Some(&*after));
    }

    #[tokio::test]
    async fn test_drag_rejected_when_locked() {
        let options = PanelOptions {
            lock_sensors: true,
            ..two_sensors()
        };
        let (service, _) = service_with(options).await;
        service
            .image_loaded(ImageLoaded {
                width: 200.0,
                height: 100.0,
            })
            .await;

        let result = service.drag_sensor(0, PixelDelta::new(1.0, 1.0)).await;
        assert!(matches!(result, Err(PanelError::SensorsLocked)));
    }

    #[tokio::test]
    async fn test_sensor_edits() {
        let (service, _) = service_with(two_sensors()).await;

        let options = service.add_sensor().await.unwrap();
        assert_eq!(options.sensors.len(), 3);
        assert_eq!(options.sensors[2], Sensor::default());

        let options = service.remove_sensor(0).await.unwrap();
        assert_eq!(options.sensors[0].name, "b");

        let renamed = Sensor {
            name: "renamed".to_string(),
            ..Sensor::default()
        };
        let options = service.update_sensor(1, renamed).await.unwrap();
        assert_eq!(options.sensors[1].name, "renamed");

        assert!(matches!(
            service.remove_sensor(7).await,
            Err(PanelError::SensorNotFound(7))
        ));
    }

    #[tokio::test]
    async fn test_render_resolves_values() {
        let mut options = two_sensors();
        options.sensors[0].query = QuerySpec::new("A", "");
        options.sensors_text_size = 10.0;
        let (service, _) = service_with(options).await;

        let series = vec![DataFrame::new(vec![Field::new("A", vec![1.0, 2.0, 3.0])])];

        let view = service.render(&series, &HashMap::new()).await;
        assert_eq!(view.image_url, "http://example.com/plan.png");
        assert_eq!(view.text_size_px, None);
        assert_eq!(view.sensors[0].value, Some(3.0));
        assert_eq!(view.sensors[0].value_text, "3.00");

        service
            .image_loaded(ImageLoaded {
                width: 500.0,
                height: 250.0,
            })
            .await;
        let view = service.render(&series, &HashMap::new()).await;
        assert_eq!(view.text_size_px, Some(10.0));
        assert!(view.sensors.iter().all(|sensor| sensor.offset_px.is_some()));
    }

    #[tokio::test]
    async fn test_forced_refresh_makes_unique_urls() {
        let options = PanelOptions {
            force_image_refresh: true,
            image_url: "http://example.com/cam.jpg?size=large".to_string(),
            ..PanelOptions::default()
        };
        let (service, _) = service_with(options).await;

        let first = service.render(&[], &HashMap::new()).await.image_url;
        let second = service.render(&[], &HashMap::new()).await.image_url;

        assert!(first.starts_with("http://example.com/cam.jpg?size=large&"));
        assert_ne!(first, second);
    }

    struct BrokenRepository;

    #[async_trait]
    impl PanelRepository for BrokenRepository {
        async fn load(&self) -> anyhow::Result<Option<PanelOptions>> {
            Ok(Some(PanelOptions::default()))
        }

        async fn save(&self, _options: &PanelOptions) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[tokio::test]
    async fn test_failed_save_keeps_snapshot() {
        let service = PanelService::load(Arc::new(BrokenRepository), DisplayContext::default())
            .await
            .unwrap();
        let before = service.options().await;

        assert!(matches!(service.add_sensor().await, Err(PanelError::Storage(_))));
        assert!(Arc::ptr_eq(&before, &service.options().await));
    }
}
