// Domain layer - Pure data models for the sensor overlay
pub mod frame;
pub mod image;
pub mod mapping;
pub mod panel;
pub mod sensor;
