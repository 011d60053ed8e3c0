// Sensor overlay engine: value resolution, mapping evaluation and positioning
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
