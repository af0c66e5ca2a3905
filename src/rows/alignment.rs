//! Word alignments.
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::Serialize;

use super::{Invertible, Row};
use crate::error::Error;
use crate::refs::RowRef;

/// Correspondence between a source token and a target token.
///
/// Only the two indices take part in equality, ordering and hashing.
/// The scores are metadata.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AlignedWordPair {
    source_index: usize,
    target_index: usize,
    is_sure: bool,
    translation_score: Option<f64>,
    alignment_score: Option<f64>,
}

impl AlignedWordPair {
    pub fn new(source_index: usize, target_index: usize) -> Self {
        Self {
            source_index,
            target_index,
            is_sure: true,
            translation_score: None,
            alignment_score: None,
        }
    }

    pub fn with_sure(mut self, is_sure: bool) -> Self {
        self.is_sure = is_sure;
        self
    }

    pub fn with_scores(mut self, translation_score: f64, alignment_score: f64) -> Self {
        self.translation_score = Some(translation_score);
        self.alignment_score = Some(alignment_score);
        self
    }

    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn is_sure(&self) -> bool {
        self.is_sure
    }

    pub fn translation_score(&self) -> Option<f64> {
        self.translation_score
    }

    pub fn alignment_score(&self) -> Option<f64> {
        self.alignment_score
    }

    /// Parses a whitespace separated list of `s-t` pairs.
    pub fn parse_set(s: &str) -> Result<BTreeSet<AlignedWordPair>, Error> {
        s.split_whitespace().map(str::parse).collect()
    }

    /// Formats a pair set as `s-t s-t ...`.
    pub fn format_set(pairs: &BTreeSet<AlignedWordPair>) -> String {
        pairs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Invertible for AlignedWordPair {
    fn invert(&self) -> Self {
        Self {
            source_index: self.target_index,
            target_index: self.source_index,
            ..*self
        }
    }
}

impl PartialEq for AlignedWordPair {
    fn eq(&self, other: &Self) -> bool {
        self.source_index == other.source_index && self.target_index == other.target_index
    }
}

impl Eq for AlignedWordPair {}

impl Hash for AlignedWordPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source_index.hash(state);
        self.target_index.hash(state);
    }
}

impl PartialOrd for AlignedWordPair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AlignedWordPair {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source_index
            .cmp(&other.source_index)
            .then(self.target_index.cmp(&other.target_index))
    }
}

impl fmt::Display for AlignedWordPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source_index, self.target_index)
    }
}

impl FromStr for AlignedWordPair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::Custom(format!("invalid aligned word pair {:?}", s));
        let (src, trg) = s.split_once('-').ok_or_else(invalid)?;
        let src = src.parse().map_err(|_| invalid())?;
        let trg = trg.parse().map_err(|_| invalid())?;
        Ok(AlignedWordPair::new(src, trg))
    }
}

/// Alignment of one segment, as a set of pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignmentRow {
    text_id: String,
    row_ref: RowRef,
    aligned_word_pairs: BTreeSet<AlignedWordPair>,
}

impl AlignmentRow {
    pub fn new(
        text_id: &str,
        row_ref: RowRef,
        aligned_word_pairs: impl IntoIterator<Item = AlignedWordPair>,
    ) -> Self {
        Self {
            text_id: text_id.to_string(),
            row_ref,
            aligned_word_pairs: aligned_word_pairs.into_iter().collect(),
        }
    }

    pub fn aligned_word_pairs(&self) -> &BTreeSet<AlignedWordPair> {
        &self.aligned_word_pairs
    }
}

impl Row for AlignmentRow {
    fn text_id(&self) -> &str {
        &self.text_id
    }

    fn row_ref(&self) -> &RowRef {
        &self.row_ref
    }

    fn is_empty(&self) -> bool {
        self.aligned_word_pairs.is_empty()
    }
}

impl Invertible for AlignmentRow {
    fn invert(&self) -> Self {
        Self {
            text_id: self.text_id.clone(),
            row_ref: self.row_ref.clone(),
            aligned_word_pairs: self.aligned_word_pairs.iter().map(|p| p.invert()).collect(),
        }
    }
}

/// Alignment of one segment as an ordered list of index tuples.
///
/// Unlike [AlignmentRow], keeps duplicates and order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextAlignment {
    text_id: String,
    segment_ref: RowRef,
    pairs: Vec<(usize, usize)>,
}

impl TextAlignment {
    pub fn new(text_id: &str, segment_ref: RowRef, pairs: Vec<(usize, usize)>) -> Self {
        Self {
            text_id: text_id.to_string(),
            segment_ref,
            pairs,
        }
    }

    pub fn segment_ref(&self) -> &RowRef {
        &self.segment_ref
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Set view of the pairs. Duplicates collapse.
    pub fn to_alignment_row(&self) -> AlignmentRow {
        AlignmentRow::new(
            &self.text_id,
            self.segment_ref.clone(),
            self.pairs
                .iter()
                .map(|(src, trg)| AlignedWordPair::new(*src, *trg)),
        )
    }
}

impl Row for TextAlignment {
    fn text_id(&self) -> &str {
        &self.text_id
    }

    fn row_ref(&self) -> &RowRef {
        &self.segment_ref
    }

    fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Invertible for TextAlignment {
    fn invert(&self) -> Self {
        Self {
            text_id: self.text_id.clone(),
            segment_ref: self.segment_ref.clone(),
            pairs: self.pairs.iter().map(|(src, trg)| (*trg, *src)).collect(),
        }
    }
}

/// Pairs are listed by target index, then source index.
impl From<&AlignmentRow> for TextAlignment {
    fn from(row: &AlignmentRow) -> Self {
        let mut pairs: Vec<(usize, usize)> = row
            .aligned_word_pairs
            .iter()
            .map(|p| (p.source_index, p.target_index))
            .collect();
        pairs.sort_by_key(|(src, trg)| (*trg, *src));
        Self {
            text_id: row.text_id.clone(),
            segment_ref: row.row_ref.clone(),
            pairs,
        }
    }
}
