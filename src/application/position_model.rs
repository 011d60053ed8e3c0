// Position model - Pixel drags to image-relative percentages and back
use crate::domain::image::{ImageBounds, PixelDelta, PositionError};
use crate::domain::sensor::{Position, Sensor};
use serde::Serialize;

/// Pixel placement of a sensor's top-left corner inside the rendered image
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelOffset {
    pub left: f64,
    pub top: f64,
}

/// Move a sensor by a pixel delta; the returned sensor is a new value
pub fn apply_drag(sensor: &Sensor, delta: PixelDelta, bounds: ImageBounds) -> Result<Sensor, PositionError> {
    let (width, height) = bounds.dimensions()?;

    let position = Position::new(
        sensor.position.x() + delta.dx / width * 100.0,
        sensor.position.y() + delta.dy / height * 100.0,
    );

    Ok(sensor.with_position(position))
}

/// Top-left pixel offset of a position inside the image
pub fn to_pixels(position: Position, bounds: ImageBounds) -> Option<PixelOffset> {
    let (width, height) = bounds.dimensions().ok()?;
    Some(PixelOffset {
        left: position.x() / 100.0 * width,
        top: position.y() / 100.0 * height,
    })
}

/// Sensor font size in px, scaled with the rendered image width
pub fn text_size_px(sensors_text_size: f64, bounds: ImageBounds) -> Option<f64> {
    let (width, _) = bounds.dimensions().ok()?;
    Some(sensors_text_size * width / 50.0 / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Sensor {
        Sensor::default().with_position(Position::new(x, y))
    }

    #[test]
    fn test_drag_converts_pixels_to_percent() {
        let moved = apply_drag(&at(10.0, 30.0), PixelDelta::new(200.0, -150.0), ImageBounds::measured(800.0, 600.0)).unwrap();
        assert_eq!(moved.position, Position::new(35.0, 5.0));
    }

    #[test]
    fn test_drag_clamps_each_axis() {
        let bounds = ImageBounds::measured(1000.0, 500.0);

        let moved = apply_drag(&at(95.0, 95.0), PixelDelta::new(100.0, 50.0), bounds).unwrap();
        assert_eq!(moved.position, Position::new(100.0, 100.0));

        let moved = apply_drag(&at(5.0, 50.0), PixelDelta::new(-500.0, 0.0), bounds).unwrap();
        assert_eq!(moved.position, Position::new(0.0, 50.0));
    }

    #[test]
    fn test_zero_drag_is_identity() {
        let sensor = at(33.3, 66.6);
        let moved = apply_drag(&sensor, PixelDelta::default(), ImageBounds::measured(320.0, 240.0)).unwrap();
        assert_eq!(moved, sensor);
    }

    #[test]
    fn test_drag_stays_in_range() {
        let bounds = ImageBounds::measured(640.0, 480.0);
        let deltas = [(-1e6, 1e6), (3.5, -7.25), (1e-9, 0.0), (700.0, 500.0)];

        for (dx, dy) in deltas {
            let moved = apply_drag(&at(50.0, 50.0), PixelDelta::new(dx, dy), bounds).unwrap();
            assert!((0.0..=100.0).contains(&moved.position.x()));
            assert!((0.0..=100.0).contains(&moved.position.y()));
        }
    }

    #[test]
    fn test_drag_rejects_unmeasured_image() {
        let sensor = at(10.0, 10.0);
        assert_eq!(
            apply_drag(&sensor, PixelDelta::new(1.0, 1.0), ImageBounds::Unmeasured),
            Err(PositionError::Unmeasured)
        );
        assert!(apply_drag(&sensor, PixelDelta::new(1.0, 1.0), ImageBounds::measured(0.0, 0.0)).is_err());
    }

    #[test]
    fn test_to_pixels_and_text_size() {
        let bounds = ImageBounds::measured(800.0, 400.0);
        assert_eq!(to_pixels(Position::new(25.0, 50.0), bounds), Some(PixelOffset { left: 200.0, top: 200.0 }));
        assert_eq!(to_pixels(Position::default(), ImageBounds::Unmeasured), None);

        assert_eq!(text_size_px(10.0, bounds), Some(16.0));
        assert_eq!(text_size_px(10.0, ImageBounds::Unmeasured), None);
    }
}
