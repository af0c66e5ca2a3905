//! Joined rows.
use serde::Serialize;

use crate::refs::RowRef;
use crate::rows::{AlignedWordPair, Invertible, Row, TextRowFlags};

/// Rows of `n` corpora joined on a shared ref.
///
/// Slot `i` holds the refs, segment and flags contributed by corpus `i`.
/// A slot without a row of its own carries the reference ref of the joined row
/// and an empty segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NParallelTextRow {
    text_id: String,
    #[serde(skip)]
    row_ref: RowRef,
    n_refs: Vec<Vec<RowRef>>,
    n_segments: Vec<Vec<String>>,
    n_flags: Vec<TextRowFlags>,
    aligned_word_pairs: Option<Vec<AlignedWordPair>>,
}

impl NParallelTextRow {
    pub(crate) fn new(
        text_id: String,
        row_ref: RowRef,
        n_refs: Vec<Vec<RowRef>>,
        n_segments: Vec<Vec<String>>,
        n_flags: Vec<TextRowFlags>,
    ) -> Self {
        Self {
            text_id,
            row_ref,
            n_refs,
            n_segments,
            n_flags,
            aligned_word_pairs: None,
        }
    }

    pub(crate) fn with_aligned_word_pairs(mut self, pairs: Option<Vec<AlignedWordPair>>) -> Self {
        self.aligned_word_pairs = pairs;
        self
    }

    pub fn n(&self) -> usize {
        self.n_segments.len()
    }

    pub fn refs(&self, i: usize) -> &[RowRef] {
        &self.n_refs[i]
    }

    pub fn n_refs(&self) -> &[Vec<RowRef>] {
        &self.n_refs
    }

    pub fn segment(&self, i: usize) -> &[String] {
        &self.n_segments[i]
    }

    pub fn n_segments(&self) -> &[Vec<String>] {
        &self.n_segments
    }

    pub fn text(&self, i: usize) -> String {
        self.n_segments[i].join(" ")
    }

    pub fn flags(&self, i: usize) -> TextRowFlags {
        self.n_flags[i]
    }

    pub fn is_sentence_start(&self, i: usize) -> bool {
        self.n_flags[i].contains(TextRowFlags::SENTENCE_START)
    }

    pub fn is_in_range(&self, i: usize) -> bool {
        self.n_flags[i].contains(TextRowFlags::IN_RANGE)
    }

    pub fn is_range_start(&self, i: usize) -> bool {
        self.n_flags[i].contains(TextRowFlags::RANGE_START)
    }

    pub fn aligned_word_pairs(&self) -> Option<&[AlignedWordPair]> {
        self.aligned_word_pairs.as_deref()
    }
}

impl Row for NParallelTextRow {
    fn text_id(&self) -> &str {
        &self.text_id
    }

    fn row_ref(&self) -> &RowRef {
        &self.row_ref
    }

    /// Empty as soon as one of the slots has no segment.
    fn is_empty(&self) -> bool {
        self.n_segments.iter().any(Vec::is_empty)
    }
}

/// Source/target row of a [super::ParallelTextCorpus].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParallelTextRow {
    text_id: String,
    #[serde(skip)]
    row_ref: RowRef,
    source_refs: Vec<RowRef>,
    target_refs: Vec<RowRef>,
    source_segment: Vec<String>,
    target_segment: Vec<String>,
    source_flags: TextRowFlags,
    target_flags: TextRowFlags,
    aligned_word_pairs: Option<Vec<AlignedWordPair>>,
}

impl ParallelTextRow {
    pub fn source_refs(&self) -> &[RowRef] {
        &self.source_refs
    }

    pub fn target_refs(&self) -> &[RowRef] {
        &self.target_refs
    }

    pub fn source_segment(&self) -> &[String] {
        &self.source_segment
    }

    pub fn target_segment(&self) -> &[String] {
        &self.target_segment
    }

    pub fn source_text(&self) -> String {
        self.source_segment.join(" ")
    }

    pub fn target_text(&self) -> String {
        self.target_segment.join(" ")
    }

    pub fn source_flags(&self) -> TextRowFlags {
        self.source_flags
    }

    pub fn target_flags(&self) -> TextRowFlags {
        self.target_flags
    }

    pub fn is_source_sentence_start(&self) -> bool {
        self.source_flags.contains(TextRowFlags::SENTENCE_START)
    }

    pub fn is_source_in_range(&self) -> bool {
        self.source_flags.contains(TextRowFlags::IN_RANGE)
    }

    pub fn is_source_range_start(&self) -> bool {
        self.source_flags.contains(TextRowFlags::RANGE_START)
    }

    pub fn is_target_sentence_start(&self) -> bool {
        self.target_flags.contains(TextRowFlags::SENTENCE_START)
    }

    pub fn is_target_in_range(&self) -> bool {
        self.target_flags.contains(TextRowFlags::IN_RANGE)
    }

    pub fn is_target_range_start(&self) -> bool {
        self.target_flags.contains(TextRowFlags::RANGE_START)
    }

    pub fn aligned_word_pairs(&self) -> Option<&[AlignedWordPair]> {
        self.aligned_word_pairs.as_deref()
    }
}

impl From<NParallelTextRow> for ParallelTextRow {
    /// Takes slots 0 and 1 as source and target.
    fn from(row: NParallelTextRow) -> Self {
        let mut refs = row.n_refs.into_iter();
        let mut segments = row.n_segments.into_iter();
        let mut flags = row.n_flags.into_iter();
        Self {
            text_id: row.text_id,
            row_ref: row.row_ref,
            source_refs: refs.next().unwrap_or_default(),
            target_refs: refs.next().unwrap_or_default(),
            source_segment: segments.next().unwrap_or_default(),
            target_segment: segments.next().unwrap_or_default(),
            source_flags: flags.next().unwrap_or(TextRowFlags::NONE),
            target_flags: flags.next().unwrap_or(TextRowFlags::NONE),
            aligned_word_pairs: row.aligned_word_pairs,
        }
    }
}

impl Row for ParallelTextRow {
    fn text_id(&self) -> &str {
        &self.text_id
    }

    fn row_ref(&self) -> &RowRef {
        &self.row_ref
    }

    fn is_empty(&self) -> bool {
        self.source_segment.is_empty() || self.target_segment.is_empty()
    }
}

impl Invertible for ParallelTextRow {
    fn invert(&self) -> Self {
        Self {
            text_id: self.text_id.clone(),
            row_ref: self.row_ref.clone(),
            source_refs: self.target_refs.clone(),
            target_refs: self.source_refs.clone(),
            source_segment: self.target_segment.clone(),
            target_segment: self.source_segment.clone(),
            source_flags: self.target_flags,
            target_flags: self.source_flags,
            aligned_word_pairs: self
                .aligned_word_pairs
                .as_ref()
                .map(|pairs| pairs.iter().map(Invertible::invert).collect()),
        }
    }
}
