//! Segment rewriting transforms.
use super::Transform;
use crate::error::{Error, HandlerFailure};
use crate::rows::TextRow;

/// Lowercases every token.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lowercase;

impl Transform for Lowercase {
    fn transform_own(&self, row: TextRow) -> Result<TextRow, HandlerFailure> {
        let segment = row.segment().iter().map(|t| t.to_lowercase()).collect();
        Ok(row.with_segment(segment))
    }
}

/// Fails on segments longer than `max_tokens`.
#[derive(Debug, Clone, Copy)]
pub struct MaxTokens {
    max_tokens: usize,
}

impl MaxTokens {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }
}

impl Transform for MaxTokens {
    fn transform_own(&self, row: TextRow) -> Result<TextRow, HandlerFailure> {
        if row.segment().len() > self.max_tokens {
            let msg = format!(
                "segment has {} tokens, more than {}",
                row.segment().len(),
                self.max_tokens
            );
            return Err(HandlerFailure::new(row, Error::Custom(msg)));
        }
        Ok(row)
    }
}
