//! Word splitting shared by line text and target phrases

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Runs of hyphens and whitespace separate words
    static ref WORD_SEPARATOR: Regex = Regex::new(r"[-\s]+").unwrap();
}

/// Split text into words on runs of hyphens and whitespace
///
/// Order is preserved and empty pieces are kept (a leading separator yields an
/// empty first word), so the position of each word matches the position of the
/// OCR element it came from. Callers skip empty words themselves.
pub fn split_words(text: &str) -> Vec<&str> {
    WORD_SEPARATOR.split(text).collect()
}
