//! Row and text level filters.
use std::collections::HashSet;
use std::sync::Arc;

use super::Filter;
use crate::corpus::Text;
use crate::rows::{Row, TextRow};

/// Simple length filter.
/// Returns `false` if the row text is less than [Length::min_size] unicode codepoints.
///
/// [Length::min_size] is 1 by default, which drops empty rows.
pub struct Length {
    min_size: usize,
}

impl Length {
    /// specify a minimum length
    pub fn with_min_size(min_size: usize) -> Self {
        Self { min_size }
    }

    /// Get the length's min size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }
}

impl Default for Length {
    fn default() -> Self {
        Length { min_size: 1 }
    }
}

impl Filter<TextRow> for Length {
    fn detect(&self, row: &TextRow) -> bool {
        row.text().chars().count() >= self.min_size
    }
}

/// Keeps rows with content.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonEmpty;

impl<R: Row> Filter<R> for NonEmpty {
    fn detect(&self, row: &R) -> bool {
        !row.is_empty()
    }
}

/// Keeps the texts whose id is listed.
#[derive(Debug, Default, Clone)]
pub struct TextIds(HashSet<String>);

impl TextIds {
    pub fn new<I: IntoIterator<Item = S>, S: Into<String>>(ids: I) -> Self {
        Self(ids.into_iter().map(Into::into).collect())
    }
}

impl Filter<Arc<dyn Text>> for TextIds {
    fn detect(&self, text: &Arc<dyn Text>) -> bool {
        self.0.contains(text.id())
    }
}
