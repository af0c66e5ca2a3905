//! N-way join of text corpora.
use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use super::range::RangeInfo;
use super::NParallelTextRow;
use crate::corpus::{AlignmentCollection, AlignmentCorpus, Collection, Corpus, Text, TextCorpus};
use crate::error::Error;
use crate::refs::RowRef;
use crate::rows::{AlignedWordPair, AlignmentRow, Row, Rows, TextRow, TextRowFlags};

/// Join of `n` text corpora on their row refs.
///
/// Text ids taking part are the ones every corpus has, plus every text of a corpus
/// flagged with `all_rows`. Rows of a ref some corpora lack are dropped unless one of
/// the corpora having them is flagged.
#[derive(Clone, Default)]
pub struct NParallelTextCorpus {
    corpora: Vec<Arc<dyn TextCorpus>>,
    all_rows: Vec<bool>,
    alignment_corpus: Option<Arc<dyn AlignmentCorpus>>,
}

impl NParallelTextCorpus {
    pub fn new(corpora: Vec<Arc<dyn TextCorpus>>) -> Self {
        let all_rows = vec![false; corpora.len()];
        Self {
            corpora,
            all_rows,
            alignment_corpus: None,
        }
    }

    /// Sets the all-rows flag of every corpus.
    pub fn with_all_rows(mut self, all_rows: Vec<bool>) -> Result<Self, Error> {
        if all_rows.len() != self.corpora.len() {
            return Err(Error::Custom(format!(
                "{} all-rows flags for {} corpora",
                all_rows.len(),
                self.corpora.len()
            )));
        }
        self.all_rows = all_rows;
        Ok(self)
    }

    /// Attaches aligned word pairs to joined rows with a matching ref.
    pub fn with_alignment_corpus(mut self, alignment_corpus: Arc<dyn AlignmentCorpus>) -> Self {
        self.alignment_corpus = Some(alignment_corpus);
        self
    }

    pub fn n(&self) -> usize {
        self.corpora.len()
    }

    pub fn corpora(&self) -> &[Arc<dyn TextCorpus>] {
        &self.corpora
    }

    pub fn all_rows(&self) -> &[bool] {
        &self.all_rows
    }

    pub fn alignment_corpus(&self) -> Option<&Arc<dyn AlignmentCorpus>> {
        self.alignment_corpus.as_ref()
    }

    /// Whether corpus `i` is tokenized, `None` when out of bounds.
    pub fn is_tokenized(&self, i: usize) -> Option<bool> {
        self.corpora.get(i).map(|c| c.is_tokenized())
    }

    fn text_ids(&self, filter: Option<&HashSet<String>>) -> HashSet<String> {
        let per_corpus: Vec<HashSet<String>> = self
            .corpora
            .iter()
            .map(|c| c.text_ids().into_iter().collect())
            .collect();
        let mut ids = match per_corpus.split_first() {
            Some((first, rest)) => rest.iter().fold(first.clone(), |acc, ids| {
                acc.intersection(ids).cloned().collect()
            }),
            None => HashSet::new(),
        };
        for (ids_of_corpus, _) in per_corpus
            .iter()
            .zip(&self.all_rows)
            .filter(|(_, all_rows)| **all_rows)
        {
            ids.extend(ids_of_corpus.iter().cloned());
        }
        if let Some(filter) = filter {
            ids.retain(|id| filter.contains(id));
        }
        ids
    }

    /// Text ids taking part, in the order every cursor reads them.
    ///
    /// Texts are ordered by the sort key of the first corpus holding them, then by id.
    fn ordered_text_ids(&self, filter: Option<&HashSet<String>>) -> Vec<String> {
        let mut keyed: Vec<(String, String)> = self
            .text_ids(filter)
            .into_iter()
            .map(|id| {
                let sort_key = self
                    .corpora
                    .iter()
                    .find_map(|c| match c.text(&id) {
                        Collection::Present(text) => Some(text.sort_key().to_string()),
                        Collection::Absent(_) => None,
                    })
                    .unwrap_or_else(|| id.clone());
                (sort_key, id)
            })
            .collect();
        keyed.sort();
        keyed.into_iter().map(|(_, id)| id).collect()
    }

    /// Ids of texts whose rows may not have gaps, per corpus.
    fn strict_text_ids(&self) -> Vec<HashSet<String>> {
        self.corpora
            .iter()
            .map(|c| {
                let corpus_allows = c.missing_rows_allowed();
                c.texts()
                    .iter()
                    .filter(|t| !corpus_allows || !t.missing_rows_allowed())
                    .map(|t| t.id().to_string())
                    .collect()
            })
            .collect()
    }
}

impl Corpus for NParallelTextCorpus {
    type Row = NParallelTextRow;

    fn get_rows(&self, text_ids: Option<&HashSet<String>>) -> Rows<'_, NParallelTextRow> {
        let ids = self.ordered_text_ids(text_ids);
        debug!("joining {} corpora over {} texts", self.n(), ids.len());
        let alignments = self.alignment_corpus.as_ref().map(|a| {
            positioned(ids.clone(), move |id| {
                AlignmentCollection::get_rows(&a.collection(id))
            })
        });
        Box::new(NParallelRows {
            all_rows: &self.all_rows,
            cursors: self
                .corpora
                .iter()
                .map(|c| positioned(ids.clone(), move |id| Text::get_rows(&c.text(id))))
                .collect(),
            current: vec![None; self.n()],
            positions: vec![0; self.n()],
            alignments,
            next_alignment: None,
            strict: self.strict_text_ids(),
            range: RangeInfo::new(self.n()),
            pending: VecDeque::new(),
            error: None,
            started: false,
            done: false,
        })
    }
}

/// Rows tagged with the position of their text in `ids`.
type Positioned<'a, R> = Box<dyn Iterator<Item = (usize, Result<R, Error>)> + 'a>;

fn positioned<'a, R: 'a, F>(ids: Vec<String>, rows_of: F) -> Positioned<'a, R>
where
    F: Fn(&str) -> Rows<'static, R> + 'a,
{
    Box::new(
        ids.into_iter()
            .enumerate()
            .flat_map(move |(pos, id)| rows_of(&id).map(move |row| (pos, row))),
    )
}

/// Orders `(text position, ref)` keys. Refs are only compared within a text.
fn cmp_keys(a: (usize, &RowRef), b: (usize, &RowRef)) -> Result<Ordering, Error> {
    match a.0.cmp(&b.0) {
        Ordering::Equal => a.1.try_cmp(b.1),
        ordering => Ok(ordering),
    }
}

/// Whether `rows` would open a new range rather than continue the current one.
fn starts_new_range<'r>(mut rows: impl Iterator<Item = &'r TextRow>) -> bool {
    rows.all(|r| !r.is_in_range() || r.is_range_start())
}

/// Join state machine.
///
/// Each step looks at the current row of every corpus and either joins the rows
/// sitting on the smallest ref, emits them alone, or folds them into a range.
struct NParallelRows<'a> {
    all_rows: &'a [bool],
    cursors: Vec<Positioned<'a, TextRow>>,
    current: Vec<Option<TextRow>>,
    /// Text position of each current row.
    positions: Vec<usize>,
    alignments: Option<Positioned<'a, AlignmentRow>>,
    next_alignment: Option<(usize, AlignmentRow)>,
    strict: Vec<HashSet<String>>,
    range: RangeInfo,
    pending: VecDeque<NParallelTextRow>,
    error: Option<Error>,
    started: bool,
    done: bool,
}

impl<'a> NParallelRows<'a> {
    fn advance(&mut self, i: usize) -> Result<(), Error> {
        self.current[i] = match self.cursors[i].next() {
            Some((pos, row)) => {
                self.positions[i] = pos;
                Some(row?)
            }
            None => None,
        };
        Ok(())
    }

    fn fill(&mut self) -> Result<(), Error> {
        if !self.started {
            self.started = true;
            for i in 0..self.current.len() {
                self.advance(i)?;
            }
        }
        if self.current.iter().all(Option::is_none) {
            self.done = true;
            self.flush_range();
            return Ok(());
        }
        self.step()
    }

    fn step(&mut self) -> Result<(), Error> {
        let min = self.min_ref_indexes()?;
        let incomplete = self.current.iter().filter(|r| r.is_some()).count();
        if min.len() < incomplete || incomplete == 1 {
            let non_min: Vec<usize> = (0..self.current.len())
                .filter(|i| !min.contains(i))
                .collect();
            self.step_min_rows(&min, &non_min)
        } else {
            self.step_same_ref(&min)
        }
    }

    /// Indexes of the corpora sitting on the smallest ref.
    fn min_ref_indexes(&self) -> Result<Vec<usize>, Error> {
        let mut min: Option<(usize, &RowRef)> = None;
        let mut indexes = Vec::new();
        for (i, row) in self.current.iter().enumerate() {
            let key = match row {
                Some(row) => (self.positions[i], row.row_ref()),
                None => continue,
            };
            let ordering = match min {
                Some(min) => cmp_keys(min, key)?.reverse(),
                None => Ordering::Less,
            };
            match ordering {
                Ordering::Less => {
                    min = Some(key);
                    indexes.clear();
                    indexes.push(i);
                }
                Ordering::Equal => indexes.push(i),
                Ordering::Greater => (),
            }
        }
        Ok(indexes)
    }

    /// Some corpora are past the smallest ref, or only one is left.
    fn step_min_rows(&mut self, min: &[usize], non_min: &[usize]) -> Result<(), Error> {
        let all_rows = self.all_rows;
        let min_in_range = min
            .iter()
            .any(|&i| self.current[i].as_ref().map_or(false, TextRow::is_in_range));
        if non_min.iter().any(|&j| !all_rows[j]) && min_in_range {
            if self.opens_range(min) {
                self.flush_range();
            }
            for &i in min {
                if let Some(row) = &self.current[i] {
                    self.range.add_text_row(row, i, self.positions[i]);
                }
            }
            for &j in non_min {
                self.range.clear_same_ref_rows(j);
            }
        } else {
            self.create_min_ref_rows(min, non_min)?;
        }
        for &i in min {
            if let Some(row) = self.current[i].take() {
                self.range.push_same_ref_row(i, row, self.positions[i]);
            }
            self.advance(i)?;
        }
        Ok(())
    }

    /// Every corpus left sits on the same ref.
    fn step_same_ref(&mut self, min: &[usize]) -> Result<(), Error> {
        let all_rows = self.all_rows;
        let row_ref = match self.current[min[0]].as_ref() {
            Some(row) => row.row_ref().clone(),
            None => return Ok(()),
        };
        let position = self.positions[min[0]];
        let pairs = self.aligned_word_pairs(position, &row_ref)?;
        let joins_range = min.iter().any(|&i| {
            self.current[i].as_ref().map_or(false, TextRow::is_in_range)
                && min.iter().all(|&j| j == i || !all_rows[j])
        });
        if joins_range {
            if self.opens_range(min) {
                self.flush_range();
            }
            for &i in min {
                if let Some(row) = &self.current[i] {
                    self.range.add_text_row(row, i, self.positions[i]);
                }
                self.range.clear_same_ref_rows(i);
            }
        } else {
            for &i in min {
                for &j in min {
                    if i == j {
                        continue;
                    }
                    let other = match &self.current[j] {
                        Some(row) => row.clone(),
                        None => continue,
                    };
                    if self.range.check_same_ref_rows(i, &other, position)? {
                        for same_ref_row in self.range.same_ref_rows(i).to_vec() {
                            let mut slots = vec![None; self.current.len()];
                            slots[i] = Some(same_ref_row);
                            slots[j] = Some(other.clone());
                            self.create_rows(&slots, false, None);
                        }
                    }
                }
            }
            let slots = self.current.clone();
            self.create_rows(&slots, false, pairs);
        }
        for &i in min {
            if let Some(row) = self.current[i].take() {
                self.range.push_same_ref_row(i, row, self.positions[i]);
            }
            self.advance(i)?;
        }
        Ok(())
    }

    /// Emits the rows on the smallest ref that still have a counterpart under the
    /// same ref, then the remaining ones of all-rows corpora as one row.
    fn create_min_ref_rows(&mut self, min: &[usize], non_min: &[usize]) -> Result<(), Error> {
        let all_rows = self.all_rows;
        let force_in_range = self.force_in_range(min, non_min);
        let mut yielded = Vec::new();
        for &i in min {
            let row = match &self.current[i] {
                Some(row) => row.clone(),
                None => continue,
            };
            let position = self.positions[i];
            for &j in non_min {
                if self.range.check_same_ref_rows(j, &row, position)? {
                    yielded.push(i);
                    for same_ref_row in self.range.same_ref_rows(j).to_vec() {
                        let mut slots = vec![None; self.current.len()];
                        slots[i] = Some(row.clone());
                        slots[j] = Some(same_ref_row);
                        self.create_rows(&slots, force_in_range, None);
                    }
                }
            }
            if !yielded.contains(&i) {
                self.check_missing_row(&row, non_min)?;
            }
        }

        let mut slots = vec![None; self.current.len()];
        for &i in min.iter().filter(|&&i| all_rows[i] && !yielded.contains(&i)) {
            slots[i] = self.current[i].clone();
        }
        if slots.iter().any(Option::is_some) {
            self.create_rows(&slots, force_in_range, None);
        }
        Ok(())
    }

    /// A corpus disallowing missing rows has the text of `row` but not its ref.
    fn check_missing_row(&self, row: &TextRow, non_min: &[usize]) -> Result<(), Error> {
        if non_min
            .iter()
            .any(|&j| self.strict[j].contains(row.text_id()))
        {
            return Err(Error::MissingRow {
                text_id: row.text_id().to_string(),
                row_ref: row.row_ref().to_string(),
            });
        }
        Ok(())
    }

    /// Placeholders stand inside a range when every other corpus is in the middle
    /// of one, in the same text.
    fn force_in_range(&self, min: &[usize], non_min: &[usize]) -> bool {
        let position = match min.iter().find(|&&i| self.current[i].is_some()) {
            Some(&i) => self.positions[i],
            None => return false,
        };
        let others: Option<Vec<(usize, &TextRow)>> = non_min
            .iter()
            .map(|&j| self.current[j].as_ref().map(|r| (self.positions[j], r)))
            .collect();
        match others {
            Some(others) => {
                others.iter().all(|(pos, _)| *pos == position)
                    && others.iter().any(|(_, r)| r.is_in_range() && !r.is_range_start())
            }
            None => false,
        }
    }

    /// A step on the rows of `min` closes the open range before adding to it.
    fn opens_range(&self, min: &[usize]) -> bool {
        let position = match min.first() {
            Some(&i) => self.positions[i],
            None => return false,
        };
        !self.range.is_in_range_of(position)
            || starts_new_range(min.iter().filter_map(|&i| self.current[i].as_ref()))
    }

    /// Pairs of the alignment row with ref `row_ref` in the text at `position`.
    ///
    /// Alignment rows before `row_ref` are skipped; a later one is kept for the next ref.
    fn aligned_word_pairs(
        &mut self,
        position: usize,
        row_ref: &RowRef,
    ) -> Result<Option<Vec<AlignedWordPair>>, Error> {
        let alignments = match self.alignments.as_mut() {
            Some(alignments) => alignments,
            None => return Ok(None),
        };
        loop {
            if self.next_alignment.is_none() {
                self.next_alignment = match alignments.next() {
                    Some((pos, alignment)) => Some((pos, alignment?)),
                    None => None,
                };
            }
            let ordering = match &self.next_alignment {
                Some((pos, alignment)) => cmp_keys((*pos, alignment.row_ref()), (position, row_ref))?,
                None => return Ok(None),
            };
            match ordering {
                Ordering::Less => self.next_alignment = None,
                Ordering::Equal => {
                    return Ok(self
                        .next_alignment
                        .take()
                        .map(|(_, a)| a.aligned_word_pairs().iter().cloned().collect()))
                }
                Ordering::Greater => return Ok(None),
            }
        }
    }

    /// Emits one joined row out of `slots`, after any pending range.
    fn create_rows(
        &mut self,
        slots: &[Option<TextRow>],
        force_in_range: bool,
        pairs: Option<Vec<AlignedWordPair>>,
    ) {
        self.flush_range();
        let reference = match slots.iter().flatten().next() {
            Some(row) => row,
            None => return,
        };
        let placeholder_flags = if force_in_range {
            TextRowFlags::IN_RANGE
        } else {
            TextRowFlags::NONE
        };
        let mut n_refs = Vec::with_capacity(slots.len());
        let mut n_segments = Vec::with_capacity(slots.len());
        let mut n_flags = Vec::with_capacity(slots.len());
        for slot in slots {
            match slot {
                Some(row) => {
                    n_refs.push(vec![row.row_ref().clone()]);
                    n_segments.push(row.segment().to_vec());
                    n_flags.push(row.flags());
                }
                None => {
                    n_refs.push(vec![reference.row_ref().clone()]);
                    n_segments.push(Vec::new());
                    n_flags.push(placeholder_flags);
                }
            }
        }
        let row = NParallelTextRow::new(
            reference.text_id().to_string(),
            reference.row_ref().clone(),
            n_refs,
            n_segments,
            n_flags,
        )
        .with_aligned_word_pairs(pairs);
        self.pending.push_back(row);
    }

    fn flush_range(&mut self) {
        if let Some(row) = self.range.create_row() {
            self.pending.push_back(row);
        }
    }
}

impl<'a> Iterator for NParallelRows<'a> {
    type Item = Result<NParallelTextRow, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.pending.pop_front() {
                return Some(Ok(row));
            }
            if let Some(e) = self.error.take() {
                return Some(Err(e));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.fill() {
                warn!("join stopped: {}", e);
                self.done = true;
                self.error = Some(e);
            }
        }
    }
}
