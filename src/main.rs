//! highlight-replay - Replays a recorded OCR frame through the highlight resolver
//!
//! Reads a JSON-serialized recognized document, resolves highlights for the
//! configured target phrase and prints the resulting overlay rectangles.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use text_highlight_overlay::config::{self, AppConfig, CameraFacing};
use text_highlight_overlay::{HighlightResolver, RecognizedDocument, TargetWordSet};

/// highlight-replay - Resolve OCR highlights for a recorded frame
#[derive(Parser, Debug)]
#[command(name = "highlight-replay")]
#[command(about = "Resolve fuzzy text highlights for a recorded OCR frame")]
struct Args {
    /// Recognized document as JSON
    #[arg(short, long)]
    document: PathBuf,

    /// Camera frame size handed to OCR, e.g. 1280x720
    #[arg(short, long, value_parser = parse_size)]
    source: (u32, u32),

    /// Rendering surface size, e.g. 1080x1920 (defaults to config)
    #[arg(long, value_parser = parse_size)]
    surface: Option<(u32, u32)>,

    /// Phrase to highlight (defaults to config)
    #[arg(short, long)]
    phrase: Option<String>,

    /// Treat the preview as front-facing (mirrored)
    #[arg(long)]
    front: bool,

    /// Emit each element at most once
    #[arg(long)]
    dedup: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print highlights as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_or_create_config(args.config.as_deref())?;
    if let Some(phrase) = args.phrase {
        config.target.phrase = phrase;
    }
    if let Some((width, height)) = args.surface {
        config.surface.width = width as f32;
        config.surface.height = height as f32;
    }
    if args.front {
        config.surface.camera_facing = CameraFacing::Front;
    }
    if args.dedup {
        config.matching.deduplicate = true;
    }

    let document = load_document(&args.document)?;
    let targets: TargetWordSet = config.target.words();
    info!(
        "Replaying {} elements against {} target words",
        document.element_count(),
        targets.len()
    );

    let state = config.surface.overlay_state();
    state.set_camera_info(args.source.0, args.source.1);
    state.set_text(document, targets);

    if let Some(geometry) = state.geometry() {
        if let Err(e) = geometry.validate() {
            warn!("{}; no highlights for this frame", e);
        }
    }

    let resolver = HighlightResolver::with_config(config.matching.resolver_config());
    let highlights = state.highlights(&resolver);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&highlights)?);
    } else {
        for highlight in &highlights {
            let r = highlight.normalized().rect;
            println!(
                "{:<16} {:<16} [{:.1}, {:.1}, {:.1}, {:.1}] score={:.3}",
                highlight.target, highlight.text, r.left, r.top, r.right, r.bottom, highlight.score
            );
        }
    }

    info!("{} highlights", highlights.len());

    Ok(())
}

/// Load configuration from an explicit path, the platform config dir, or defaults
fn load_or_create_config(path: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = path {
        let config = config::load_config(path)?;
        info!("Loaded configuration from {:?}", path);
        return Ok(config);
    }

    if let Ok(config_path) = text_highlight_overlay::storage::default_config_path() {
        if config_path.exists() {
            if let Ok(config) = config::load_config(&config_path) {
                info!("Loaded configuration from {:?}", config_path);
                return Ok(config);
            }
        }
    }

    info!("Using default configuration");
    Ok(AppConfig::default())
}

/// Read a recognized document from a JSON file
fn load_document(path: &Path) -> Result<RecognizedDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse document: {:?}", path))
}

/// Parse a `WIDTHxHEIGHT` size
fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (width, height) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("Expected WIDTHxHEIGHT, got {:?}", s))?;

    let width = width.trim().parse().context("Invalid width")?;
    let height = height.trim().parse().context("Invalid height")?;
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1280x720").unwrap(), (1280, 720));
        assert_eq!(parse_size("640X480").unwrap(), (640, 480));
    }

    #[test]
    fn test_parse_size_invalid() {
        assert!(parse_size("1280").is_err());
        assert!(parse_size("axb").is_err());
        assert!(parse_size("").is_err());
    }
}
