// Background image measurement and drag gestures
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rendered size of the background image, unknown until it has loaded
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ImageBounds {
    #[default]
    Unmeasured,
    Measured { width: f64, height: f64 },
}

impl ImageBounds {
    pub fn measured(width: f64, height: f64) -> Self {
        ImageBounds::Measured { width, height }
    }

    /// Usable dimensions, if measured and strictly positive
    pub fn dimensions(&self) -> Result<(f64, f64), PositionError> {
        match *self {
            ImageBounds::Unmeasured => Err(PositionError::Unmeasured),
            ImageBounds::Measured { width, height }
                if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 =>
            {
                Ok((width, height))
            }
            ImageBounds::Measured { width, height } => {
                Err(PositionError::EmptyBounds { width, height })
            }
        }
    }
}

/// Emitted once the image has loaded or been resized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageLoaded {
    pub width: f64,
    pub height: f64,
}

impl From<ImageLoaded> for ImageBounds {
    fn from(event: ImageLoaded) -> Self {
        ImageBounds::measured(event.width, event.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelDelta {
    pub dx: f64,
    pub dy: f64,
}

impl PixelDelta {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    #[error("background image has not been measured yet")]
    Unmeasured,
    #[error("background image has unusable bounds {width}x{height}")]
    EmptyBounds { width: f64, height: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        assert_eq!(ImageBounds::Unmeasured.dimensions(), Err(PositionError::Unmeasured));
        assert_eq!(ImageBounds::measured(800.0, 600.0).dimensions(), Ok((800.0, 600.0)));
        assert!(matches!(
            ImageBounds::measured(0.0, 600.0).dimensions(),
            Err(PositionError::EmptyBounds { .. })
        ));
        assert!(matches!(
            ImageBounds::measured(800.0, f64::NAN).dimensions(),
            Err(PositionError::EmptyBounds { .. })
        ));
    }

    #[test]
    fn test_image_loaded_event() {
        let event: ImageLoaded = serde_json::from_str(r#"{"width": 640, "height": 480}"#).unwrap();
        assert_eq!(ImageBounds::from(event), ImageBounds::measured(640.0, 480.0));
    }
}
