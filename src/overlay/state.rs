//! Shared overlay state between the frame pipeline and the renderer
//!
//! The camera/OCR side writes geometry and recognized text as frames arrive;
//! the render side reads them to compute highlights. Geometry and text sit
//! behind separate locks, and no lock is held while resolving.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use crate::geometry::FrameGeometry;
use crate::overlay::{HighlightRect, HighlightResolver};
use crate::recognition::{RecognizedDocument, TargetWordSet};

/// Latest camera frame extents, after calibration
#[derive(Debug, Clone, Copy)]
struct CameraInfo {
    width: i64,
    height: i64,
}

/// Rendering surface extents and orientation
#[derive(Debug, Clone, Copy)]
struct SurfaceInfo {
    width: f32,
    height: f32,
    mirrored: bool,
}

#[derive(Debug, Default)]
struct GeometryInputs {
    camera: Option<CameraInfo>,
    surface: Option<SurfaceInfo>,
    /// Signed deltas added to incoming camera extents
    calibration: (i32, i32),
}

/// Text to search and what to search for
#[derive(Debug, Default)]
struct TextInputs {
    document: Option<Arc<RecognizedDocument>>,
    targets: TargetWordSet,
}

/// Thread-safe holder for the per-frame overlay inputs
#[derive(Debug, Default)]
pub struct OverlayState {
    geometry: RwLock<GeometryInputs>,
    text: RwLock<TextInputs>,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state whose camera extents are adjusted by `(width, height)` deltas
    pub fn with_calibration(width_adjust: i32, height_adjust: i32) -> Self {
        let state = Self::default();
        state.geometry.write().calibration = (width_adjust, height_adjust);
        state
    }

    /// Record the size of the frame handed to OCR
    pub fn set_camera_info(&self, width: u32, height: u32) {
        let mut geometry = self.geometry.write();
        let (dw, dh) = geometry.calibration;
        geometry.camera = Some(CameraInfo {
            width: i64::from(width) + i64::from(dw),
            height: i64::from(height) + i64::from(dh),
        });
    }

    /// Record the rendering surface size and whether the preview is mirrored
    pub fn set_surface(&self, width: f32, height: f32, mirrored: bool) {
        self.geometry.write().surface = Some(SurfaceInfo {
            width,
            height,
            mirrored,
        });
    }

    /// Replace the recognized text and target words
    pub fn set_text(&self, document: RecognizedDocument, targets: TargetWordSet) {
        let mut text = self.text.write();
        text.document = Some(Arc::new(document));
        text.targets = targets;
    }

    /// Drop the current document; targets are kept
    pub fn clear(&self) {
        self.text.write().document = None;
        debug!("Overlay text cleared");
    }

    /// Current geometry, once both camera and surface sizes are known
    pub fn geometry(&self) -> Option<FrameGeometry> {
        let geometry = self.geometry.read();
        let camera = geometry.camera?;
        let surface = geometry.surface?;

        Some(FrameGeometry {
            source_width: camera.width,
            source_height: camera.height,
            dest_width: surface.width,
            dest_height: surface.height,
            mirrored: surface.mirrored,
        })
    }

    /// Whether a document is waiting to be highlighted
    pub fn has_text(&self) -> bool {
        self.text.read().document.is_some()
    }

    /// Resolve highlights for the current inputs
    ///
    /// Returns nothing until a document and a full geometry are available.
    pub fn highlights(&self, resolver: &HighlightResolver) -> Vec<HighlightRect> {
        let Some(geometry) = self.geometry() else {
            return Vec::new();
        };

        let (document, targets) = {
            let text = self.text.read();
            match &text.document {
                Some(document) => (Arc::clone(document), text.targets.clone()),
                None => return Vec::new(),
            }
        };

        resolver.resolve(&document, &targets, &geometry)
    }
}
