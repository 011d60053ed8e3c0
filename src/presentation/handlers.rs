// HTTP request handlers
use crate::application::panel_service::{PanelError, PanelView};
use crate::domain::frame::DataFrame;
use crate::domain::image::{ImageBounds, ImageLoaded, PixelDelta};
use crate::domain::mapping::Mapping;
use crate::domain::panel::PanelOptions;
use crate::domain::sensor::Sensor;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub series: Vec<DataFrame>,
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

impl IntoResponse for PanelError {
    fn into_response(self) -> Response {
        let status = match &self {
            PanelError::SensorsLocked => StatusCode::LOCKED,
            PanelError::SensorNotFound(_) => StatusCode::NOT_FOUND,
            PanelError::Position(_) => StatusCode::CONFLICT,
            PanelError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

type OptionsResult = Result<Json<PanelOptions>, PanelError>;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<PanelOptions> {
    Json((*state.panel_service.options().await).clone())
}

pub async fn put_options(
    State(state): State<Arc<AppState>>,
    Json(options): Json<PanelOptions>,
) -> OptionsResult {
    let options = state.panel_service.replace_options(options).await?;
    tracing::info!("Panel options replaced ({} sensors)", options.sensors.len());
    Ok(Json((*options).clone()))
}

/// Resolve every sensor against the posted telemetry snapshot
pub async fn render(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RenderRequest>,
) -> Json<PanelView> {
    Json(
        state
            .panel_service
            .render(&request.series, &request.variables)
            .await,
    )
}

pub async fn image_loaded(
    State(state): State<Arc<AppState>>,
    Json(event): Json<ImageLoaded>,
) -> Json<ImageBounds> {
    Json(state.panel_service.image_loaded(event).await)
}

pub async fn add_sensor(State(state): State<Arc<AppState>>) -> OptionsResult {
    let options = state.panel_service.add_sensor().await?;
    Ok(Json((*options).clone()))
}

pub async fn update_sensor(
    Path(index): Path<usize>,
    State(state): State<Arc<AppState>>,
    Json(sensor): Json<Sensor>,
) -> OptionsResult {
    let options = state.panel_service.update_sensor(index, sensor).await?;
    Ok(Json((*options).clone()))
}

pub async fn remove_sensor(
    Path(index): Path<usize>,
    State(state): State<Arc<AppState>>,
) -> OptionsResult {
    let options = state.panel_service.remove_sensor(index).await?;
    Ok(Json((*options).clone()))
}

pub async fn drag_sensor(
    Path(index): Path<usize>,
    State(state): State<Arc<AppState>>,
    Json(delta): Json<PixelDelta>,
) -> OptionsResult {
    let options = state.panel_service.drag_sensor(index, delta).await?;
    Ok(Json((*options).clone()))
}

pub async fn put_mappings(
    State(state): State<Arc<AppState>>,
    Json(mappings): Json<Vec<Mapping>>,
) -> OptionsResult {
    let options = state.panel_service.replace_mappings(mappings).await?;
    Ok(Json((*options).clone()))
}
