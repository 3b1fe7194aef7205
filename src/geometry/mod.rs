//! Overlay Coordinate Mapper
//!
//! Converts rectangles from OCR image space into the space of the surface the
//! highlights are drawn on. Width and height scale independently, and the x axis
//! can be flipped for mirrored (front-facing) camera previews.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    /// Create a rectangle from its edges
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width (negative when the edges are flipped)
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height (negative when the edges are flipped)
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Copy with edges ordered so that `left <= right` and `top <= bottom`
    pub fn normalized(&self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }
}

/// Errors raised when mapping coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Source extents would cause a division by zero
    #[error("invalid frame geometry: source extents {source_width}x{source_height}")]
    InvalidGeometry {
        source_width: i64,
        source_height: i64,
    },
}

/// Source and destination extents for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameGeometry {
    /// Width of the frame handed to OCR, in pixels
    pub source_width: i64,
    /// Height of the frame handed to OCR, in pixels
    pub source_height: i64,
    /// Width of the rendering surface
    pub dest_width: f32,
    /// Height of the rendering surface
    pub dest_height: f32,
    /// Flip the x axis (front-facing camera)
    pub mirrored: bool,
}

impl FrameGeometry {
    pub fn new(
        source_width: i64,
        source_height: i64,
        dest_width: f32,
        dest_height: f32,
        mirrored: bool,
    ) -> Self {
        Self {
            source_width,
            source_height,
            dest_width,
            dest_height,
            mirrored,
        }
    }

    /// Source extents must both be positive
    pub fn validate(&self) -> Result<(), MappingError> {
        if self.source_width <= 0 || self.source_height <= 0 {
            return Err(MappingError::InvalidGeometry {
                source_width: self.source_width,
                source_height: self.source_height,
            });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Maps source-space coordinates into destination space for a validated geometry
#[derive(Debug, Clone, Copy)]
pub struct OverlayMapper {
    geometry: FrameGeometry,
    width_scale: f32,
    height_scale: f32,
}

impl OverlayMapper {
    /// Create a mapper, failing with `InvalidGeometry` on degenerate source extents
    pub fn new(geometry: FrameGeometry) -> Result<Self, MappingError> {
        geometry.validate()?;

        Ok(Self {
            geometry,
            width_scale: geometry.dest_width / geometry.source_width as f32,
            height_scale: geometry.dest_height / geometry.source_height as f32,
        })
    }

    pub fn geometry(&self) -> &FrameGeometry {
        &self.geometry
    }

    /// Destination x, flipped around the surface width when mirrored
    pub fn map_x(&self, x: f32) -> f32 {
        let scaled = x * self.width_scale;
        if self.geometry.mirrored {
            self.geometry.dest_width - scaled
        } else {
            scaled
        }
    }

    /// Destination y
    pub fn map_y(&self, y: f32) -> f32 {
        y * self.height_scale
    }

    /// Map each edge independently
    ///
    /// Edge order is not preserved when mirrored: the mapped `left` ends up to
    /// the right of the mapped `right`. Use [`BoundingBox::normalized`] when a
    /// canonical rectangle is needed.
    pub fn map_rect(&self, rect: &BoundingBox) -> BoundingBox {
        BoundingBox {
            left: self.map_x(rect.left),
            top: self.map_y(rect.top),
            right: self.map_x(rect.right),
            bottom: self.map_y(rect.bottom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn test_identity_mapping() {
        let mapper = OverlayMapper::new(FrameGeometry::new(640, 480, 640.0, 480.0, false)).unwrap();

        let boxes = [
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(12.5, 40.0, 200.0, 77.0),
            BoundingBox::new(600.0, 470.0, 640.0, 480.0),
        ];
        for rect in boxes {
            assert_eq!(mapper.map_rect(&rect), rect);
        }
    }

    #[test]
    fn test_independent_axis_scaling() {
        let mapper = OverlayMapper::new(FrameGeometry::new(100, 200, 300.0, 100.0, false)).unwrap();

        assert!(approx(mapper.map_x(10.0), 30.0));
        assert!(approx(mapper.map_y(10.0), 5.0));

        let rect = mapper.map_rect(&BoundingBox::new(10.0, 20.0, 50.0, 60.0));
        assert!(approx(rect.left, 30.0));
        assert!(approx(rect.top, 10.0));
        assert!(approx(rect.right, 150.0));
        assert!(approx(rect.bottom, 30.0));
    }

    #[test]
    fn test_mirroring_flips_extremes() {
        let mapper = OverlayMapper::new(FrameGeometry::new(500, 500, 1000.0, 800.0, true)).unwrap();

        assert!(approx(mapper.map_x(0.0), 1000.0));
        assert!(approx(mapper.map_x(500.0), 0.0));
        assert!(approx(mapper.map_x(125.0), 750.0));
        // y is never mirrored
        assert!(approx(mapper.map_y(250.0), 400.0));
    }

    #[test]
    fn test_mirrored_rect_edges_swap() {
        let mapper = OverlayMapper::new(FrameGeometry::new(100, 100, 100.0, 100.0, true)).unwrap();

        let rect = mapper.map_rect(&BoundingBox::new(10.0, 10.0, 30.0, 20.0));
        assert!(approx(rect.left, 90.0));
        assert!(approx(rect.right, 70.0));
        assert!(rect.width() < 0.0);

        let normalized = rect.normalized();
        assert!(approx(normalized.left, 70.0));
        assert!(approx(normalized.right, 90.0));
        assert!(approx(normalized.width(), 20.0));
    }

    #[test]
    fn test_zero_source_width_is_invalid() {
        let result = OverlayMapper::new(FrameGeometry::new(0, 480, 1000.0, 800.0, false));
        assert_eq!(
            result.unwrap_err(),
            MappingError::InvalidGeometry {
                source_width: 0,
                source_height: 480
            }
        );
    }

    #[test]
    fn test_negative_or_zero_height_is_invalid() {
        assert!(!FrameGeometry::new(640, 0, 1.0, 1.0, false).is_valid());
        assert!(!FrameGeometry::new(640, -20, 1.0, 1.0, false).is_valid());
        assert!(FrameGeometry::new(640, 480, 0.0, 0.0, false).is_valid());
    }

    #[test]
    fn test_error_message() {
        let err = FrameGeometry::new(0, 0, 1.0, 1.0, false).validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid frame geometry: source extents 0x0");
    }
}
