//! Source/target join.
use std::collections::HashSet;
use std::sync::Arc;

use super::{NParallelTextCorpus, ParallelTextRow};
use crate::corpus::{AlignmentCorpus, Corpus, TextCorpus};
use crate::rows::Rows;

/// Join of a source and a target corpus.
///
/// A two-corpus [NParallelTextCorpus] whose rows are read as source/target pairs.
#[derive(Clone)]
pub struct ParallelTextCorpus {
    inner: NParallelTextCorpus,
}

impl ParallelTextCorpus {
    pub fn new(source: Arc<dyn TextCorpus>, target: Arc<dyn TextCorpus>) -> Self {
        Self {
            inner: NParallelTextCorpus::new(vec![source, target]),
        }
    }

    pub fn with_alignment_corpus(mut self, alignment_corpus: Arc<dyn AlignmentCorpus>) -> Self {
        self.inner = self.inner.with_alignment_corpus(alignment_corpus);
        self
    }

    /// Keeps source rows without a target counterpart.
    pub fn with_all_source_rows(self, all_source_rows: bool) -> Self {
        let all_target_rows = self.all_target_rows();
        self.with_all_rows(all_source_rows, all_target_rows)
    }

    /// Keeps target rows without a source counterpart.
    pub fn with_all_target_rows(self, all_target_rows: bool) -> Self {
        let all_source_rows = self.all_source_rows();
        self.with_all_rows(all_source_rows, all_target_rows)
    }

    fn with_all_rows(mut self, all_source_rows: bool, all_target_rows: bool) -> Self {
        // always two corpora, so the flags fit
        if let Ok(inner) = self
            .inner
            .clone()
            .with_all_rows(vec![all_source_rows, all_target_rows])
        {
            self.inner = inner;
        }
        self
    }

    pub fn source(&self) -> &Arc<dyn TextCorpus> {
        &self.inner.corpora()[0]
    }

    pub fn target(&self) -> &Arc<dyn TextCorpus> {
        &self.inner.corpora()[1]
    }

    pub fn all_source_rows(&self) -> bool {
        self.inner.all_rows()[0]
    }

    pub fn all_target_rows(&self) -> bool {
        self.inner.all_rows()[1]
    }

    pub fn is_source_tokenized(&self) -> bool {
        self.source().is_tokenized()
    }

    pub fn is_target_tokenized(&self) -> bool {
        self.target().is_tokenized()
    }

    /// Swaps source and target, their all-rows flags and the alignments.
    pub fn invert(&self) -> ParallelTextCorpus {
        let mut inverted = ParallelTextCorpus::new(self.target().clone(), self.source().clone())
            .with_all_rows(self.all_target_rows(), self.all_source_rows());
        if let Some(alignment_corpus) = self.inner.alignment_corpus() {
            inverted = inverted.with_alignment_corpus(Arc::new(alignment_corpus.invert()));
        }
        inverted
    }
}

impl Corpus for ParallelTextCorpus {
    type Row = ParallelTextRow;

    fn get_rows(&self, text_ids: Option<&HashSet<String>>) -> Rows<'_, ParallelTextRow> {
        Box::new(
            self.inner
                .get_rows(text_ids)
                .map(|row| row.map(ParallelTextRow::from)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{
        AlignmentCollection, DictionaryAlignmentCorpus, DictionaryTextCorpus,
        MemoryAlignmentCollection, MemoryText, Text,
    };
    use crate::error::Error;
    use crate::refs::RowRef;
    use crate::rows::{AlignedWordPair, AlignmentRow, Row, TextRow, TextRowFlags};

    fn row(text_id: &str, r: u64, text: &str, flags: TextRowFlags) -> TextRow {
        TextRow::new(text_id, RowRef::from(r))
            .with_text(text)
            .with_flags(flags)
    }

    fn seg(r: u64, text: &str) -> TextRow {
        row("text1", r, text, TextRowFlags::SENTENCE_START)
    }

    fn ranged(r: u64, text: &str, flags: TextRowFlags) -> TextRow {
        row("text1", r, text, flags)
    }

    fn corpus(texts: Vec<MemoryText>) -> Arc<dyn TextCorpus> {
        Arc::new(DictionaryTextCorpus::new(
            texts.into_iter().map(|t| Arc::new(t) as Arc<dyn Text>),
        ))
    }

    fn text1(rows: Vec<TextRow>) -> Arc<dyn TextCorpus> {
        corpus(vec![MemoryText::new("text1", rows)])
    }

    fn refs(refs: &[u64]) -> Vec<RowRef> {
        refs.iter().map(|r| RowRef::from(*r)).collect()
    }

    fn collect(corpus: &ParallelTextCorpus) -> Vec<ParallelTextRow> {
        corpus.get_rows(None).collect::<Result<_, _>>().unwrap()
    }

    fn alignments(rows: Vec<(u64, AlignedWordPair)>) -> Arc<dyn AlignmentCorpus> {
        let rows = rows
            .into_iter()
            .map(|(r, pair)| AlignmentRow::new("text1", RowRef::from(r), vec![pair]))
            .collect();
        Arc::new(DictionaryAlignmentCorpus::new(vec![
            Arc::new(MemoryAlignmentCollection::new("text1", rows)) as Arc<dyn AlignmentCollection>,
        ]))
    }

    fn range_start() -> TextRowFlags {
        TextRowFlags::IN_RANGE | TextRowFlags::RANGE_START
    }

    fn sentence_range_start() -> TextRowFlags {
        TextRowFlags::SENTENCE_START | range_start()
    }

    #[test]
    fn no_rows() {
        let corpus = ParallelTextCorpus::new(corpus(vec![]), corpus(vec![]));
        assert!(collect(&corpus).is_empty());
        assert_eq!(corpus.count(true, None).unwrap(), 0);
        assert_eq!(corpus.count(false, None).unwrap(), 0);
    }

    #[test]
    fn no_missing_rows() {
        let source = text1(vec![
            ranged(1, "source segment 1 .", TextRowFlags::NONE),
            seg(2, "source segment 2 ."),
            seg(3, "source segment 3 ."),
        ]);
        let target = text1(vec![
            seg(1, "target segment 1 ."),
            seg(2, "target segment 2 ."),
            ranged(3, "target segment 3 .", TextRowFlags::NONE),
        ]);
        let corpus = ParallelTextCorpus::new(source, target).with_alignment_corpus(alignments(vec![
            (1, AlignedWordPair::new(0, 0)),
            (2, AlignedWordPair::new(1, 1)),
            (3, AlignedWordPair::new(2, 2)),
        ]));
        let rows = collect(&corpus);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].source_refs(), refs(&[1]).as_slice());
        assert_eq!(rows[0].target_refs(), refs(&[1]).as_slice());
        assert_eq!(rows[0].source_text(), "source segment 1 .");
        assert_eq!(rows[0].target_text(), "target segment 1 .");
        assert!(!rows[0].is_source_sentence_start());
        assert!(rows[0].is_target_sentence_start());
        assert_eq!(rows[0].aligned_word_pairs(), Some(&[AlignedWordPair::new(0, 0)][..]));
        assert_eq!(rows[2].source_refs(), refs(&[3]).as_slice());
        assert!(rows[2].is_source_sentence_start());
        assert!(!rows[2].is_target_sentence_start());
        assert_eq!(rows[2].aligned_word_pairs(), Some(&[AlignedWordPair::new(2, 2)][..]));
    }

    #[test]
    fn missing_middle_target_row() {
        let source = text1(vec![
            seg(1, "source segment 1 ."),
            seg(2, "source segment 2 ."),
            seg(3, "source segment 3 ."),
        ]);
        let target = text1(vec![seg(1, "target segment 1 ."), seg(3, "target segment 3 .")]);
        let corpus = ParallelTextCorpus::new(source, target).with_alignment_corpus(alignments(vec![
            (1, AlignedWordPair::new(0, 0)),
            (3, AlignedWordPair::new(2, 2)),
        ]));
        let rows = collect(&corpus);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].source_refs(), refs(&[3]).as_slice());
        assert_eq!(rows[1].target_text(), "target segment 3 .");
        assert_eq!(rows[1].aligned_word_pairs(), Some(&[AlignedWordPair::new(2, 2)][..]));
    }

    #[test]
    fn missing_first_and_last_rows() {
        let source = text1(vec![seg(2, "source segment 2 ."), seg(3, "source segment 3 .")]);
        let target = text1(vec![
            seg(1, "target segment 1 ."),
            seg(2, "target segment 2 ."),
        ]);
        let rows = collect(&ParallelTextCorpus::new(source, target));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source_refs(), refs(&[2]).as_slice());
    }

    #[test]
    fn range() {
        let source = text1(vec![
            seg(1, "source segment 1 ."),
            ranged(2, "source segment 2 . source segment 3 .", range_start()),
            ranged(3, "", TextRowFlags::IN_RANGE),
            seg(4, "source segment 4 ."),
        ]);
        let target = text1(vec![
            seg(1, "target segment 1 ."),
            seg(2, "target segment 2 ."),
            seg(3, "target segment 3 ."),
            seg(4, "target segment 4 ."),
        ]);
        let rows = collect(&ParallelTextCorpus::new(source, target));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].source_refs(), refs(&[2, 3]).as_slice());
        assert_eq!(rows[1].target_refs(), refs(&[2, 3]).as_slice());
        assert_eq!(rows[1].source_text(), "source segment 2 . source segment 3 .");
        assert_eq!(rows[1].target_text(), "target segment 2 . target segment 3 .");
        assert!(!rows[1].is_source_sentence_start());
        assert!(rows[1].is_target_sentence_start());
    }

    #[test]
    fn overlapping_ranges() {
        let source = text1(vec![
            seg(1, "source segment 1 ."),
            ranged(2, "source segment 2 . source segment 3 .", sentence_range_start()),
            ranged(3, "", TextRowFlags::IN_RANGE),
        ]);
        let target = text1(vec![
            ranged(1, "target segment 1 . target segment 2 .", sentence_range_start()),
            ranged(2, "", TextRowFlags::IN_RANGE),
            seg(3, "target segment 3 ."),
        ]);
        let rows = collect(&ParallelTextCorpus::new(source, target));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source_refs(), refs(&[1, 2, 3]).as_slice());
        assert_eq!(rows[0].target_refs(), refs(&[1, 2, 3]).as_slice());
        assert_eq!(
            rows[0].source_text(),
            "source segment 1 . source segment 2 . source segment 3 ."
        );
        assert_eq!(
            rows[0].target_text(),
            "target segment 1 . target segment 2 . target segment 3 ."
        );
        assert!(rows[0].is_source_sentence_start());
        assert!(rows[0].is_target_sentence_start());
    }

    #[test]
    fn overlapping_ranges_and_missing_rows() {
        let source = text1(vec![
            ranged(
                1,
                "source segment 1 . source segment 2 . source segment 3 .",
                sentence_range_start(),
            ),
            ranged(2, "", TextRowFlags::IN_RANGE),
            ranged(3, "", TextRowFlags::IN_RANGE),
        ]);
        let target = text1(vec![
            ranged(3, "target segment 3 . target segment 4 .", sentence_range_start()),
            ranged(4, "", TextRowFlags::IN_RANGE),
        ]);
        let rows = collect(&ParallelTextCorpus::new(source, target));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source_refs(), refs(&[1, 2, 3]).as_slice());
        assert_eq!(rows[0].target_refs(), refs(&[3, 4]).as_slice());
        assert_eq!(rows[0].target_text(), "target segment 3 . target segment 4 .");
        assert!(rows[0].is_source_sentence_start());
        assert!(rows[0].is_target_sentence_start());
    }

    #[test]
    fn adjacent_ranges_same_text() {
        let source = text1(vec![
            ranged(1, "source segment 1 . source segment 2 .", range_start()),
            ranged(2, "", TextRowFlags::IN_RANGE),
            ranged(3, "source segment 3 . source segment 4 .", sentence_range_start()),
            ranged(4, "", TextRowFlags::IN_RANGE),
        ]);
        let target = text1(vec![
            ranged(1, "target segment 1 .", TextRowFlags::NONE),
            seg(2, "target segment 2 ."),
            seg(3, "target segment 3 ."),
            seg(4, "target segment 4 ."),
        ]);
        let rows = collect(&ParallelTextCorpus::new(source, target));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_refs(), refs(&[1, 2]).as_slice());
        assert_eq!(rows[0].target_refs(), refs(&[1, 2]).as_slice());
        assert_eq!(rows[0].target_text(), "target segment 1 . target segment 2 .");
        assert!(!rows[0].is_source_sentence_start());
        assert!(!rows[0].is_target_sentence_start());
        assert_eq!(rows[1].source_refs(), refs(&[3, 4]).as_slice());
        assert_eq!(rows[1].target_text(), "target segment 3 . target segment 4 .");
        assert!(rows[1].is_source_sentence_start());
        assert!(rows[1].is_target_sentence_start());
    }

    #[test]
    fn adjacent_ranges_different_texts() {
        let source = text1(vec![
            ranged(1, "source segment 1 . source segment 2 .", range_start()),
            ranged(2, "", TextRowFlags::IN_RANGE),
            seg(3, "source segment 3 ."),
            seg(4, "source segment 4 ."),
        ]);
        let target = text1(vec![
            seg(1, "target segment 1 ."),
            seg(2, "target segment 2 ."),
            ranged(3, "target segment 3 . target segment 4 .", sentence_range_start()),
            ranged(4, "", TextRowFlags::IN_RANGE),
        ]);
        let rows = collect(&ParallelTextCorpus::new(source, target));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_refs(), refs(&[1, 2]).as_slice());
        assert_eq!(rows[0].target_text(), "target segment 1 . target segment 2 .");
        assert_eq!(rows[1].target_refs(), refs(&[3, 4]).as_slice());
        assert_eq!(rows[1].source_text(), "source segment 3 . source segment 4 .");
    }

    #[test]
    fn adjacent_ranges_with_empty_target_segments() {
        let source = text1(vec![
            ranged(1, "source segment 1 . source segment 2 .", range_start()),
            ranged(2, "", TextRowFlags::IN_RANGE),
            ranged(3, "source segment 3 . source segment 4 .", range_start()),
            ranged(4, "", TextRowFlags::IN_RANGE),
        ]);
        let target = text1(vec![
            ranged(1, "", range_start()),
            ranged(2, "", TextRowFlags::IN_RANGE),
            ranged(3, "", range_start()),
            ranged(4, "", TextRowFlags::IN_RANGE),
        ]);
        let corpus = ParallelTextCorpus::new(source, target)
            .with_all_source_rows(true)
            .with_all_target_rows(false);
        let rows = collect(&corpus);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_refs(), refs(&[1, 2]).as_slice());
        assert_eq!(rows[0].target_refs(), refs(&[1, 2]).as_slice());
        assert!(rows[0].target_segment().is_empty());
        assert_eq!(rows[1].source_refs(), refs(&[3, 4]).as_slice());
        assert_eq!(rows[1].source_text(), "source segment 3 . source segment 4 .");
        assert!(rows[1].target_segment().is_empty());
    }

    #[test]
    fn all_source_rows() {
        let source = corpus(vec![
            MemoryText::new(
                "text1",
                vec![
                    seg(1, "source segment 1 ."),
                    seg(2, "source segment 2 ."),
                    seg(3, "source segment 3 ."),
                    seg(4, "source segment 4 ."),
                ],
            ),
            MemoryText::new("text2", vec![row("text2", 5, "source segment 5 .", TextRowFlags::SENTENCE_START)]),
            MemoryText::new(
                "text3",
                vec![
                    row("text3", 6, "source segment 6 .", TextRowFlags::SENTENCE_START),
                    row("text3", 7, "source segment 7 .", TextRowFlags::SENTENCE_START),
                ],
            ),
        ]);
        let target = corpus(vec![
            MemoryText::new(
                "text1",
                vec![
                    seg(1, "target segment 1 ."),
                    seg(3, "target segment 3 ."),
                    seg(4, "target segment 4 ."),
                ],
            ),
            MemoryText::new(
                "text3",
                vec![
                    row("text3", 6, "target segment 6 .", TextRowFlags::SENTENCE_START),
                    row("text3", 7, "target segment 7 .", TextRowFlags::SENTENCE_START),
                ],
            ),
        ]);
        let corpus = ParallelTextCorpus::new(source, target).with_all_source_rows(true);
        let rows = collect(&corpus);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[1].source_refs(), refs(&[2]).as_slice());
        assert_eq!(rows[1].target_refs(), refs(&[2]).as_slice());
        assert_eq!(rows[1].source_text(), "source segment 2 .");
        assert!(rows[1].target_segment().is_empty());
        assert_eq!(rows[4].source_refs(), refs(&[5]).as_slice());
        assert_eq!(rows[4].target_refs(), refs(&[5]).as_slice());
        assert_eq!(rows[4].text_id(), "text2");
        assert!(rows[4].target_segment().is_empty());
    }

    #[test]
    fn missing_text() {
        let source = corpus(vec![
            MemoryText::new("text1", vec![row("text1", 1, "source segment 1 .", TextRowFlags::SENTENCE_START)]),
            MemoryText::new("text2", vec![row("text2", 2, "source segment 2 .", TextRowFlags::SENTENCE_START)]),
            MemoryText::new("text3", vec![row("text3", 3, "source segment 3 .", TextRowFlags::SENTENCE_START)]),
        ]);
        let target = corpus(vec![
            MemoryText::new("text1", vec![row("text1", 1, "target segment 1 .", TextRowFlags::SENTENCE_START)]),
            MemoryText::new("text3", vec![row("text3", 3, "target segment 3 .", TextRowFlags::SENTENCE_START)]),
        ]);
        let rows = collect(&ParallelTextCorpus::new(source, target));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_refs(), refs(&[1]).as_slice());
        assert_eq!(rows[1].target_refs(), refs(&[3]).as_slice());
        assert_eq!(rows[1].target_text(), "target segment 3 .");
    }

    #[test]
    fn range_all_target_rows() {
        let source = text1(vec![
            seg(1, "source segment 1 ."),
            ranged(2, "source segment 2 . source segment 3 .", sentence_range_start()),
            ranged(3, "", TextRowFlags::IN_RANGE),
            seg(4, "source segment 4 ."),
        ]);
        let target = text1(vec![
            seg(1, "target segment 1 ."),
            seg(2, "target segment 2 ."),
            seg(3, "target segment 3 ."),
            seg(4, "target segment 4 ."),
        ]);
        let corpus = ParallelTextCorpus::new(source, target).with_all_target_rows(true);
        let rows = collect(&corpus);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].source_refs(), refs(&[2]).as_slice());
        assert_eq!(rows[1].target_refs(), refs(&[2]).as_slice());
        assert_eq!(rows[1].source_text(), "source segment 2 . source segment 3 .");
        assert!(rows[1].is_source_in_range());
        assert!(rows[1].is_source_range_start());
        assert_eq!(rows[1].target_text(), "target segment 2 .");
        assert_eq!(rows[2].source_refs(), refs(&[3]).as_slice());
        assert!(rows[2].source_segment().is_empty());
        assert!(rows[2].is_source_in_range());
        assert!(!rows[2].is_source_range_start());
        assert_eq!(rows[2].target_text(), "target segment 3 .");
    }

    #[test]
    fn same_ref_middle_many_to_many() {
        let source = text1(vec![
            seg(1, "source segment 1 ."),
            seg(2, "source segment 2-1 ."),
            seg(2, "source segment 2-2 ."),
            seg(3, "source segment 3 ."),
        ]);
        let target = text1(vec![
            seg(1, "target segment 1 ."),
            seg(2, "target segment 2-1 ."),
            seg(2, "target segment 2-2 ."),
            seg(3, "target segment 3 ."),
        ]);
        let rows = collect(&ParallelTextCorpus::new(source, target));
        let pairs: Vec<(String, String)> = rows
            .iter()
            .map(|r| (r.source_text(), r.target_text()))
            .collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(pairs[1], ("source segment 2-1 .".into(), "target segment 2-1 .".into()));
        assert_eq!(pairs[2], ("source segment 2-1 .".into(), "target segment 2-2 .".into()));
        assert_eq!(pairs[3], ("source segment 2-2 .".into(), "target segment 2-1 .".into()));
        assert_eq!(pairs[4], ("source segment 2-2 .".into(), "target segment 2-2 .".into()));
        assert!(rows[1..5].iter().all(|r| r.source_refs() == refs(&[2]).as_slice()));
    }

    #[test]
    fn same_ref_middle_one_to_many() {
        let source = text1(vec![
            seg(1, "source segment 1 ."),
            seg(2, "source segment 2 ."),
            seg(3, "source segment 3 ."),
        ]);
        let target = text1(vec![
            seg(1, "target segment 1 ."),
            seg(2, "target segment 2-1 ."),
            seg(2, "target segment 2-2 ."),
            seg(3, "target segment 3 ."),
        ]);
        let corpus = ParallelTextCorpus::new(source, target).with_all_target_rows(true);
        let rows = collect(&corpus);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].source_text(), "source segment 2 .");
        assert_eq!(rows[1].target_text(), "target segment 2-1 .");
        assert_eq!(rows[2].source_text(), "source segment 2 .");
        assert_eq!(rows[2].target_text(), "target segment 2-2 .");
    }

    #[test]
    fn same_ref_middle_many_to_one() {
        let source = text1(vec![
            seg(1, "source segment 1 ."),
            seg(2, "source segment 2-1 ."),
            seg(2, "source segment 2-2 ."),
            seg(3, "source segment 3 ."),
        ]);
        let target = text1(vec![
            seg(1, "target segment 1 ."),
            seg(2, "target segment 2 ."),
            seg(3, "target segment 3 ."),
        ]);
        let corpus = ParallelTextCorpus::new(source, target).with_all_source_rows(true);
        let rows = collect(&corpus);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].source_text(), "source segment 2-1 .");
        assert_eq!(rows[1].target_text(), "target segment 2 .");
        assert_eq!(rows[2].source_text(), "source segment 2-2 .");
        assert_eq!(rows[2].target_text(), "target segment 2 .");
    }

    #[test]
    fn same_ref_last_one_to_many() {
        let source = text1(vec![seg(1, "source segment 1 ."), seg(2, "source segment 2 .")]);
        let target = text1(vec![
            seg(1, "target segment 1 ."),
            seg(2, "target segment 2-1 ."),
            seg(2, "target segment 2-2 ."),
            seg(3, "target segment 3 ."),
        ]);
        let corpus = ParallelTextCorpus::new(source, target).with_all_target_rows(true);
        let rows = collect(&corpus);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2].source_text(), "source segment 2 .");
        assert_eq!(rows[2].target_text(), "target segment 2-2 .");
        assert!(rows[3].source_segment().is_empty());
        assert_eq!(rows[3].source_refs(), refs(&[3]).as_slice());
    }

    #[test]
    fn count_missing_row() {
        let source = || text1(vec![seg(1, "source segment 1 ."), seg(2, "source segment 2 .")]);
        let target = || {
            text1(vec![
                seg(1, "target segment 1 ."),
                seg(2, "target segment 2 ."),
                seg(3, "target segment 3 ."),
            ])
        };
        let corpus = ParallelTextCorpus::new(source(), target());
        assert_eq!(corpus.count(true, None).unwrap(), 2);
        assert_eq!(corpus.count(false, None).unwrap(), 2);

        let corpus = ParallelTextCorpus::new(source(), target()).with_all_target_rows(true);
        assert_eq!(corpus.count(true, None).unwrap(), 3);
        assert_eq!(corpus.count(false, None).unwrap(), 2);
    }

    #[test]
    fn count_empty_row() {
        let source = text1(vec![
            seg(1, "source segment 1 ."),
            seg(2, "source segment 2 ."),
            seg(3, "source segment 3 ."),
        ]);
        let target = text1(vec![seg(1, "target segment 1 ."), seg(2, ""), seg(3, "target segment 3 .")]);
        let corpus = ParallelTextCorpus::new(source, target);
        assert_eq!(corpus.count(true, None).unwrap(), 3);
        assert_eq!(corpus.count(false, None).unwrap(), 2);
    }

    #[test]
    fn ref_format_mismatch() {
        let source = text1(vec![TextRow::new("text1", RowRef::parse("GEN 1:1")).with_text("a")]);
        let target = text1(vec![TextRow::new("text1", RowRef::parse("MYKEY")).with_text("b")]);
        let rows: Vec<_> = ParallelTextCorpus::new(source, target).get_rows(None).collect();
        assert_eq!(rows.len(), 1);
        match &rows[0] {
            Err(Error::RefMismatch(mismatch)) => {
                assert_eq!(mismatch.refs(), &["GEN 1:1".to_string(), "MYKEY".to_string()]);
            }
            other => panic!("expected a ref mismatch, got {:?}", other),
        }
    }

    #[test]
    fn line_numbered_texts() {
        let text = |id: &str, lines: &[&str]| {
            let rows = lines
                .iter()
                .enumerate()
                .map(|(n, line)| row(id, n as u64 + 1, line, TextRowFlags::SENTENCE_START))
                .collect();
            MemoryText::new(id, rows)
        };
        let source = corpus(vec![text("a", &["a1", "a2", "a3"]), text("b", &["b1", "b2"])]);
        let target = corpus(vec![text("a", &["A1", "A2"]), text("b", &["B1", "B2"])]);
        let rows = collect(&ParallelTextCorpus::new(source, target));
        let pairs: Vec<(String, String)> = rows
            .iter()
            .map(|r| (r.source_text(), r.target_text()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("a1".to_string(), "A1".to_string()),
                ("a2".to_string(), "A2".to_string()),
                ("b1".to_string(), "B1".to_string()),
                ("b2".to_string(), "B2".to_string()),
            ]
        );
        assert_eq!(rows[2].text_id(), "b");
    }

    #[test]
    fn books_in_id_order() {
        let verse = |book: &str, text: &str| {
            TextRow::new(book, RowRef::parse(&format!("{} 1:1", book))).with_text(text)
        };
        let source = corpus(vec![
            MemoryText::new("GEN", vec![verse("GEN", "g")]),
            MemoryText::new("EXO", vec![verse("EXO", "e")]),
        ]);
        let target = corpus(vec![MemoryText::new("GEN", vec![verse("GEN", "G")])]);
        let rows = collect(&ParallelTextCorpus::new(source, target).with_all_source_rows(true));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text_id(), "EXO");
        assert!(rows[0].target_segment().is_empty());
        assert_eq!(rows[1].text_id(), "GEN");
        assert_eq!(rows[1].source_text(), "g");
        assert_eq!(rows[1].target_text(), "G");
    }

    #[test]
    fn alignments_of_line_numbered_texts() {
        let source = corpus(vec![
            MemoryText::new("a", vec![row("a", 1, "a1", TextRowFlags::SENTENCE_START)]),
            MemoryText::new("b", vec![row("b", 1, "b1", TextRowFlags::SENTENCE_START)]),
        ]);
        let target = corpus(vec![
            MemoryText::new("a", vec![row("a", 1, "A1", TextRowFlags::SENTENCE_START)]),
            MemoryText::new("b", vec![row("b", 1, "B1", TextRowFlags::SENTENCE_START)]),
        ]);
        let alignments = Arc::new(DictionaryAlignmentCorpus::new(vec![
            Arc::new(MemoryAlignmentCollection::new(
                "a",
                vec![AlignmentRow::new("a", RowRef::from(1u64), vec![AlignedWordPair::new(0, 0)])],
            )) as Arc<dyn AlignmentCollection>,
            Arc::new(MemoryAlignmentCollection::new(
                "b",
                vec![AlignmentRow::new("b", RowRef::from(1u64), vec![AlignedWordPair::new(0, 1)])],
            )) as Arc<dyn AlignmentCollection>,
        ]));
        let corpus = ParallelTextCorpus::new(source, target).with_alignment_corpus(alignments);
        let rows = collect(&corpus);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].aligned_word_pairs(), Some(&[AlignedWordPair::new(0, 0)][..]));
        assert_eq!(rows[1].aligned_word_pairs(), Some(&[AlignedWordPair::new(0, 1)][..]));
    }

    #[test]
    fn invert_swaps_corpora() {
        let source = text1(vec![seg(1, "source segment 1 ."), seg(2, "source segment 2 .")]);
        let target = text1(vec![seg(1, "target segment 1 .")]);
        let corpus = ParallelTextCorpus::new(source, target)
            .with_all_source_rows(true)
            .with_alignment_corpus(alignments(vec![(1, AlignedWordPair::new(0, 3))]));
        let inverted = corpus.invert();
        assert!(inverted.all_target_rows());
        assert!(!inverted.all_source_rows());
        let rows = collect(&inverted);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_text(), "target segment 1 .");
        assert_eq!(rows[0].aligned_word_pairs(), Some(&[AlignedWordPair::new(3, 0)][..]));
        assert!(rows[1].source_segment().is_empty());
        assert!(!inverted.is_source_tokenized());
    }
}
