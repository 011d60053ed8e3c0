// Presentation layer - HTTP routes
pub mod app_state;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_sensor, drag_sensor, get_options, health_check, image_loaded, put_mappings, put_options,
    remove_sensor, render, update_sensor,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/panel", get(get_options).put(put_options))
        .route("/panel/render", post(render))
        .route("/panel/image", post(image_loaded))
        .route("/panel/mappings", put(put_mappings))
        .route("/panel/sensors", post(add_sensor))
        .route("/panel/sensors/:index", put(update_sensor).delete(remove_sensor))
        .route("/panel/sensors/:index/drag", post(drag_sensor))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
