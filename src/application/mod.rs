// Application layer - Value resolution, mapping evaluation and panel use cases
pub mod mapping_evaluator;
pub mod panel_repository;
pub mod panel_service;
pub mod position_model;
pub mod query_matcher;
pub mod sensor_projector;
pub mod value_reducer;
