//! Recognized text model
//!
//! The block → line → element hierarchy produced by an OCR engine for one frame,
//! and the target words searched for in it.

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;
use crate::matching::split_words;

/// Smallest recognized unit, usually a single word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedElement {
    /// Recognized text
    pub text: String,
    /// Bounding box in source image pixels
    pub bounds: BoundingBox,
}

/// One line of text and its elements
///
/// Elements are expected to line up with the words of `text` by position; OCR
/// engines do not always honour that.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecognizedLine {
    /// Full line text
    pub text: String,
    /// Elements in reading order
    #[serde(default)]
    pub elements: Vec<RecognizedElement>,
}

/// A group of lines
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecognizedBlock {
    #[serde(default)]
    pub lines: Vec<RecognizedLine>,
}

/// Everything recognized in one frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecognizedDocument {
    #[serde(default)]
    pub blocks: Vec<RecognizedBlock>,
}

impl RecognizedElement {
    pub fn new(text: impl Into<String>, bounds: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bounds,
        }
    }
}

impl RecognizedLine {
    pub fn new(text: impl Into<String>, elements: Vec<RecognizedElement>) -> Self {
        Self {
            text: text.into(),
            elements,
        }
    }
}

impl RecognizedDocument {
    pub fn new(blocks: Vec<RecognizedBlock>) -> Self {
        Self { blocks }
    }

    /// Iterate all lines with their block and line indices
    pub fn lines(&self) -> impl Iterator<Item = (usize, usize, &RecognizedLine)> {
        self.blocks.iter().enumerate().flat_map(|(block_idx, block)| {
            block
                .lines
                .iter()
                .enumerate()
                .map(move |(line_idx, line)| (block_idx, line_idx, line))
        })
    }

    /// Total number of elements across all lines
    pub fn element_count(&self) -> usize {
        self.lines().map(|(_, _, line)| line.elements.len()).sum()
    }
}

/// Ordered target words to look for
///
/// Duplicates are kept; an empty set is valid and matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetWordSet {
    words: Vec<String>,
}

impl TargetWordSet {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// Split a phrase into words with the same rule used for line text
    ///
    /// Empty pieces (leading separators, blank phrases) are dropped.
    pub fn from_phrase(phrase: &str) -> Self {
        let words = split_words(phrase)
            .into_iter()
            .filter(|w| !w.trim().is_empty())
            .map(str::to_string)
            .collect();
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl From<Vec<String>> for TargetWordSet {
    fn from(words: Vec<String>) -> Self {
        Self::new(words)
    }
}

impl From<&[&str]> for TargetWordSet {
    fn from(words: &[&str]) -> Self {
        Self::new(words.iter().map(|w| w.to_string()).collect())
    }
}
