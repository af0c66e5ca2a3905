//! Verse range bookkeeping of the join.
use std::cmp::Ordering;

use super::NParallelTextRow;
use crate::error::Error;
use crate::refs::RowRef;
use crate::rows::{Row, TextRow, TextRowFlags};

#[derive(Debug, Default)]
struct RangeRow {
    refs: Vec<RowRef>,
    segment: Vec<String>,
    same_ref_rows: Vec<TextRow>,
    /// Text position of `same_ref_rows`.
    same_ref_position: usize,
    is_sentence_start: bool,
}

/// Per-corpus accumulators of the range being joined, plus the rows last
/// seen under the current ref of each corpus.
#[derive(Debug)]
pub(crate) struct RangeInfo {
    text_id: String,
    position: usize,
    rows: Vec<RangeRow>,
}

impl RangeInfo {
    pub fn new(n: usize) -> Self {
        Self {
            text_id: String::new(),
            position: 0,
            rows: (0..n).map(|_| RangeRow::default()).collect(),
        }
    }

    pub fn is_in_range(&self) -> bool {
        self.rows.iter().any(|r| !r.refs.is_empty())
    }

    /// Whether a range is open in the text at `position`.
    pub fn is_in_range_of(&self, position: usize) -> bool {
        self.is_in_range() && self.position == position
    }

    /// Adds `row` of corpus `i`, read from the text at `position`, to the range.
    pub fn add_text_row(&mut self, row: &TextRow, i: usize, position: usize) {
        self.text_id = row.text_id().to_string();
        self.position = position;
        let range_row = &mut self.rows[i];
        range_row.refs.push(row.row_ref().clone());
        if range_row.segment.is_empty() {
            range_row.is_sentence_start = row.is_sentence_start();
        }
        range_row.segment.extend_from_slice(row.segment());
    }

    pub fn same_ref_rows(&self, i: usize) -> &[TextRow] {
        &self.rows[i].same_ref_rows
    }

    pub fn push_same_ref_row(&mut self, i: usize, row: TextRow, position: usize) {
        let range_row = &mut self.rows[i];
        if range_row.same_ref_position != position {
            range_row.same_ref_rows.clear();
            range_row.same_ref_position = position;
        }
        range_row.same_ref_rows.push(row);
    }

    pub fn clear_same_ref_rows(&mut self, i: usize) {
        self.rows[i].same_ref_rows.clear();
    }

    /// Whether corpus `i` has rows under the ref of `other`, read from the text at `position`.
    ///
    /// Rows kept under another ref or text are dropped.
    pub fn check_same_ref_rows(
        &mut self,
        i: usize,
        other: &TextRow,
        position: usize,
    ) -> Result<bool, Error> {
        let range_row = &mut self.rows[i];
        if let Some(first) = range_row.same_ref_rows.first() {
            if range_row.same_ref_position != position
                || first.row_ref().try_cmp(other.row_ref())? != Ordering::Equal
            {
                range_row.same_ref_rows.clear();
            }
        }
        Ok(!range_row.same_ref_rows.is_empty())
    }

    /// Takes the accumulated range as a joined row, if any.
    ///
    /// Corpora that took no part in the range get the refs of the first one that did.
    pub fn create_row(&mut self) -> Option<NParallelTextRow> {
        let reference = self.rows.iter().find(|r| !r.refs.is_empty())?.refs.clone();
        let row_ref = reference.first()?.clone();
        let mut n_refs = Vec::with_capacity(self.rows.len());
        let mut n_segments = Vec::with_capacity(self.rows.len());
        let mut n_flags = Vec::with_capacity(self.rows.len());
        for row in self.rows.iter_mut() {
            let refs = std::mem::take(&mut row.refs);
            n_refs.push(if refs.is_empty() { reference.clone() } else { refs });
            n_segments.push(std::mem::take(&mut row.segment));
            n_flags.push(if row.is_sentence_start {
                TextRowFlags::SENTENCE_START
            } else {
                TextRowFlags::NONE
            });
            row.is_sentence_start = false;
        }
        Some(NParallelTextRow::new(
            std::mem::take(&mut self.text_id),
            row_ref,
            n_refs,
            n_segments,
            n_flags,
        ))
    }
}
