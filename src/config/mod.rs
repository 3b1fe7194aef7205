//! Application Configuration
//!
//! Target phrase, rendering surface and matching settings stored in TOML format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::overlay::{OverlayState, ResolverConfig};
use crate::recognition::TargetWordSet;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// What to look for
    pub target: TargetSettings,
    /// Where highlights are drawn
    pub surface: SurfaceSettings,
    /// How words are matched
    pub matching: MatchingSettings,
}

/// Phrase to highlight
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSettings {
    /// Phrase split into target words on hyphens and whitespace
    pub phrase: String,
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            phrase: "NATIONAL INDUSTRIES LIMITED".to_string(),
        }
    }
}

impl TargetSettings {
    /// Target words for the configured phrase
    pub fn words(&self) -> TargetWordSet {
        TargetWordSet::from_phrase(&self.phrase)
    }
}

/// Camera lens direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraFacing {
    /// Rear camera, preview not mirrored
    #[default]
    Back,
    /// Front camera, preview mirrored horizontally
    Front,
}

impl CameraFacing {
    pub fn is_mirrored(self) -> bool {
        self == CameraFacing::Front
    }
}

/// Rendering surface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Surface width in pixels
    pub width: f32,
    /// Surface height in pixels
    pub height: f32,
    /// Which camera feeds the preview
    pub camera_facing: CameraFacing,
    /// Added to the camera frame width before mapping
    pub source_width_adjust: i32,
    /// Added to the camera frame height before mapping
    pub source_height_adjust: i32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            width: 1080.0,
            height: 1920.0,
            camera_facing: CameraFacing::Back,
            source_width_adjust: 0,
            source_height_adjust: 0,
        }
    }
}

impl SurfaceSettings {
    /// Overlay state with this surface and calibration applied
    pub fn overlay_state(&self) -> OverlayState {
        let state = OverlayState::with_calibration(self.source_width_adjust, self.source_height_adjust);
        state.set_surface(self.width, self.height, self.camera_facing.is_mirrored());
        state
    }
}

/// Matching settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    /// Highlight each recognized element at most once per frame
    pub deduplicate: bool,
}

impl MatchingSettings {
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            deduplicate: self.deduplicate,
            ..Default::default()
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
