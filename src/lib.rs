//! Text Highlight Overlay
//!
//! Fuzzy-matches OCR output against a target phrase and maps the matching word
//! boxes from camera-frame coordinates onto the preview surface, so a renderer
//! can draw highlights over a live camera feed.

pub mod config;
pub mod geometry;
pub mod matching;
pub mod overlay;
pub mod recognition;
pub mod storage;

pub use geometry::{BoundingBox, FrameGeometry, MappingError, OverlayMapper};
pub use matching::{edit_distance, is_match, similarity, MATCH_THRESHOLD};
pub use overlay::{ElementRef, HighlightRect, HighlightResolver, OverlayState, ResolverConfig};
pub use recognition::{
    RecognizedBlock, RecognizedDocument, RecognizedElement, RecognizedLine, TargetWordSet,
};
