//! Highlight Resolver
//!
//! Walks recognized text, fuzzy-matches each word against the target words and
//! produces destination-space rectangles for the renderer to draw.
//! Drawing itself (colors, strokes) belongs to the caller.

pub mod state;

pub use state::OverlayState;

use serde::Serialize;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, trace};

use crate::geometry::{BoundingBox, FrameGeometry, OverlayMapper};
use crate::matching::{split_words, similarity, MATCH_THRESHOLD};
use crate::recognition::{RecognizedDocument, RecognizedLine, TargetWordSet};

/// Position of an element inside a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementRef {
    pub block: usize,
    pub line: usize,
    pub element: usize,
}

/// A rectangle to highlight on the rendering surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightRect {
    /// Mapped bounds; edges may be swapped when the geometry is mirrored
    pub rect: BoundingBox,
    /// Text of the matched element as recognized
    pub text: String,
    /// Target word that matched
    pub target: String,
    /// Similarity between the line word and the target
    pub score: f64,
    /// Where the element sits in the document
    pub element: ElementRef,
}

impl HighlightRect {
    /// Copy with `left <= right` and `top <= bottom`
    pub fn normalized(&self) -> Self {
        Self {
            rect: self.rect.normalized(),
            ..self.clone()
        }
    }
}

/// Resolver settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    /// Similarity must exceed this to count as a match
    pub threshold: f64,
    /// Emit each element at most once per pass
    pub deduplicate: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threshold: MATCH_THRESHOLD,
            deduplicate: false,
        }
    }
}

/// Turns a recognized document and target words into highlight rectangles
///
/// Holds no per-frame state; every call to [`resolve`](Self::resolve) is
/// independent.
#[derive(Debug, Clone, Default)]
pub struct HighlightResolver {
    config: ResolverConfig,
}

impl HighlightResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolver that drops repeat emissions of the same element
    pub fn deduplicating() -> Self {
        Self::with_config(ResolverConfig {
            deduplicate: true,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Find highlights for one frame
    ///
    /// Output order is target-word major, then block, line and word order.
    /// An invalid geometry yields no highlights.
    pub fn resolve(
        &self,
        document: &RecognizedDocument,
        targets: &TargetWordSet,
        geometry: &FrameGeometry,
    ) -> Vec<HighlightRect> {
        let mapper = match OverlayMapper::new(*geometry) {
            Ok(mapper) => mapper,
            Err(e) => {
                debug!("Skipping highlight pass: {}", e);
                return Vec::new();
            }
        };

        let start = Instant::now();
        let mut highlights = Vec::new();
        let mut seen: HashSet<ElementRef> = HashSet::new();

        for target in targets.iter() {
            for (block_idx, line_idx, line) in document.lines() {
                if line.text.trim().is_empty() {
                    continue;
                }

                for (word_idx, score) in self.matching_words(line, target) {
                    let Some(element) = line.elements.get(word_idx) else {
                        trace!(
                            "Word {} of line {:?} has no element ({} elements), skipping",
                            word_idx,
                            line.text,
                            line.elements.len()
                        );
                        continue;
                    };

                    let element_ref = ElementRef {
                        block: block_idx,
                        line: line_idx,
                        element: word_idx,
                    };
                    if self.config.deduplicate && !seen.insert(element_ref) {
                        continue;
                    }

                    debug!("Highlighting element: {} (target {}, score {:.3})", element.text, target, score);

                    highlights.push(HighlightRect {
                        rect: mapper.map_rect(&element.bounds),
                        text: element.text.clone(),
                        target: target.to_string(),
                        score,
                        element: element_ref,
                    });
                }
            }
        }

        debug!(
            "Highlight pass complete in {:?}: {} highlights for {} targets",
            start.elapsed(),
            highlights.len(),
            targets.len()
        );

        highlights
    }

    /// Indices and scores of the words in `line` that match `target`
    fn matching_words(&self, line: &RecognizedLine, target: &str) -> Vec<(usize, f64)> {
        let text = line.text.to_lowercase();

        split_words(&text)
            .into_iter()
            .enumerate()
            .filter(|(_, word)| !word.trim().is_empty())
            .filter_map(|(idx, word)| {
                let score = similarity(word, target);
                (score > self.config.threshold).then_some((idx, score))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::{RecognizedBlock, RecognizedElement};

    fn element(text: &str, left: f32) -> RecognizedElement {
        RecognizedElement::new(text, BoundingBox::new(left, 10.0, left + 50.0, 30.0))
    }

    fn single_line(text: &str, elements: Vec<RecognizedElement>) -> RecognizedDocument {
        RecognizedDocument::new(vec![RecognizedBlock {
            lines: vec![RecognizedLine::new(text, elements)],
        }])
    }

    fn company_document() -> RecognizedDocument {
        single_line(
            "national industries limited",
            vec![
                element("national", 0.0),
                element("industries", 100.0),
                element("limited", 200.0),
            ],
        )
    }

    fn identity_geometry() -> FrameGeometry {
        FrameGeometry::new(1000, 1000, 1000.0, 1000.0, false)
    }

    #[test]
    fn test_resolve_company_name() {
        let doc = company_document();
        let targets = TargetWordSet::from_phrase("NATIONAL INDUSTRIES LIMITED");
        let geometry = FrameGeometry::new(1000, 500, 500.0, 1000.0, false);

        let highlights = HighlightResolver::new().resolve(&doc, &targets, &geometry);

        assert_eq!(highlights.len(), 3);
        let texts: Vec<&str> = highlights.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["national", "industries", "limited"]);

        // x halves, y doubles
        assert_eq!(highlights[1].rect, BoundingBox::new(50.0, 20.0, 75.0, 60.0));
        assert_eq!(highlights[2].element, ElementRef { block: 0, line: 0, element: 2 });
        assert_eq!(highlights[0].target, "NATIONAL");
    }

    #[test]
    fn test_missing_element_is_skipped() {
        let doc = single_line(
            "national industries limited",
            vec![element("national", 0.0), element("industries", 100.0)],
        );
        let targets = TargetWordSet::from_phrase("national industries limited");

        let highlights = HighlightResolver::new().resolve(&doc, &targets, &identity_geometry());

        assert_eq!(highlights.len(), 2);
        assert!(highlights.iter().all(|h| h.text != "limited"));
    }

    #[test]
    fn test_invalid_geometry_yields_nothing() {
        let doc = company_document();
        let targets = TargetWordSet::from_phrase("national");
        let geometry = FrameGeometry::new(0, 1000, 1000.0, 1000.0, false);

        assert!(HighlightResolver::new().resolve(&doc, &targets, &geometry).is_empty());
    }

    #[test]
    fn test_empty_targets_yield_nothing() {
        let doc = company_document();
        let highlights = HighlightResolver::new().resolve(&doc, &TargetWordSet::default(), &identity_geometry());
        assert!(highlights.is_empty());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let doc = company_document();
        let targets = TargetWordSet::from_phrase("nationl limitd");
        let geometry = FrameGeometry::new(1000, 800, 360.0, 640.0, true);
        let resolver = HighlightResolver::new();

        let first = resolver.resolve(&doc, &targets, &geometry);
        let second = resolver.resolve(&doc, &targets, &geometry);

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_target_major_order() {
        let doc = RecognizedDocument::new(vec![
            RecognizedBlock {
                lines: vec![RecognizedLine::new("limited", vec![element("limited", 0.0)])],
            },
            RecognizedBlock {
                lines: vec![RecognizedLine::new("national", vec![element("national", 100.0)])],
            },
        ]);
        let targets = TargetWordSet::from_phrase("national limited");

        let highlights = HighlightResolver::new().resolve(&doc, &targets, &identity_geometry());

        let order: Vec<(&str, usize)> = highlights
            .iter()
            .map(|h| (h.target.as_str(), h.element.block))
            .collect();
        assert_eq!(order, vec![("national", 1), ("limited", 0)]);
    }

    #[test]
    fn test_duplicates_kept_by_default() {
        let doc = single_line("limited", vec![element("limited", 0.0)]);
        let targets = TargetWordSet::from_phrase("limited limited");

        let highlights = HighlightResolver::new().resolve(&doc, &targets, &identity_geometry());
        assert_eq!(highlights.len(), 2);
        assert_eq!(highlights[0].element, highlights[1].element);
    }

    #[test]
    fn test_deduplicate_keeps_first_match() {
        let doc = single_line("limited", vec![element("limited", 0.0)]);
        let targets = TargetWordSet::from_phrase("limted limited");

        let highlights = HighlightResolver::deduplicating().resolve(&doc, &targets, &identity_geometry());
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].target, "limted");
    }

    #[test]
    fn test_hyphenated_line_aligns_by_position() {
        let doc = single_line(
            "co-operative  bank",
            vec![element("co", 0.0), element("operative", 60.0), element("bank", 200.0)],
        );
        let targets = TargetWordSet::from_phrase("bank");

        let highlights = HighlightResolver::new().resolve(&doc, &targets, &identity_geometry());
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].text, "bank");
        assert_eq!(highlights[0].element.element, 2);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let doc = single_line("   ", vec![element("", 0.0)]);
        let targets = TargetWordSet::new(vec![String::new()]);

        assert!(HighlightResolver::new().resolve(&doc, &targets, &identity_geometry()).is_empty());
    }

    #[test]
    fn test_mirrored_output_and_normalized() {
        let doc = single_line("limited", vec![element("limited", 100.0)]);
        let targets = TargetWordSet::from_phrase("limited");
        let geometry = FrameGeometry::new(1000, 1000, 1000.0, 1000.0, true);

        let highlights = HighlightResolver::new().resolve(&doc, &targets, &geometry);
        assert_eq!(highlights[0].rect, BoundingBox::new(900.0, 10.0, 850.0, 30.0));
        assert_eq!(highlights[0].normalized().rect, BoundingBox::new(850.0, 10.0, 900.0, 30.0));
    }

    #[test]
    fn test_non_matching_words_ignored() {
        let doc = single_line(
            "the national bank",
            vec![element("the", 0.0), element("national", 60.0), element("bank", 200.0)],
        );
        let targets = TargetWordSet::from_phrase("industries");

        assert!(HighlightResolver::new().resolve(&doc, &targets, &identity_geometry()).is_empty());
    }
}
