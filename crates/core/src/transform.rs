//! Conversion between pixel positions inside the container and the
//! resolution-independent percentage positions stored on sensors.
//!
//! Both directions use the same operation order so repeated drag edits do
//! not drift. A zero-sized container yields non-finite results; the
//! container is expected to be laid out before a sensor is moved.

use imageit_types::Position;
use serde::{Deserialize, Serialize};

/// Pixel size of the rendered container (the background image)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True once the container has a usable layout size
    pub fn is_laid_out(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Absolute position in pixels from the container's top-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelPosition {
    pub x: f64,
    pub y: f64,
}

impl PixelPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub fn pixels_to_percent(px: f64, size: f64) -> f64 {
    (px * 100.0) / size
}

pub fn percent_to_pixels(percent: f64, size: f64) -> f64 {
    (percent * size) / 100.0
}

/// Stored percentage position to pixels inside `container`
pub fn to_pixels(position: &Position, container: Dimensions) -> PixelPosition {
    PixelPosition {
        x: percent_to_pixels(position.x, container.width),
        y: percent_to_pixels(position.y, container.height),
    }
}

/// Pixel position inside `container` to a storable percentage position
pub fn to_percent(position: PixelPosition, container: Dimensions) -> Position {
    Position {
        x: pixels_to_percent(position.x, container.width),
        y: pixels_to_percent(position.y, container.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_of_container() {
        let px = to_pixels(&Position::new(50.0, 50.0), Dimensions::new(400.0, 200.0));
        assert_eq!(px, PixelPosition::new(200.0, 100.0));
    }

    #[test]
    fn test_round_trip() {
        for size in [1.0, 3.0, 200.0, 333.0, 1920.0, 4097.0] {
            for percent in [0.0, 0.1, 12.5, 33.333, 50.0, 99.9, 100.0] {
                let back = pixels_to_percent(percent_to_pixels(percent, size), size);
                assert!((back - percent).abs() < 1e-9, "{} @ {}", percent, size);
            }
        }
    }

    #[test]
    fn test_repeated_edits_do_not_drift() {
        let container = Dimensions::new(733.0, 411.0);
        let start = Position::new(17.3, 64.1);

        let mut position = start;
        for _ in 0..1000 {
            position = to_percent(to_pixels(&position, container), container);
        }

        assert!((position.x - start.x).abs() < 1e-9);
        assert!((position.y - start.y).abs() < 1e-9);
    }

    #[test]
    fn test_zero_container_is_degenerate() {
        let container = Dimensions::default();
        assert!(!container.is_laid_out());
        assert!(!pixels_to_percent(10.0, container.width).is_finite());
    }
}
