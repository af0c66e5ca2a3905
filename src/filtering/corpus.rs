//! Filtered corpora.
//!
//! Text-level filters hide whole texts: looking one up by id gives a placeholder
//! with the filtered text's id and sort key. Row-level filters drop rows on the fly.
use std::collections::HashSet;
use std::sync::Arc;

use super::Filter;
use crate::corpus::{
    AlignmentCollection, AlignmentCorpus, Collection, Corpus, Placeholder, Text, TextCorpus,
};
use crate::rows::{AlignmentRow, Rows, TextRow};

/// Text corpus keeping the texts `filter` detects.
pub struct FilterTextCorpus<C, F> {
    inner: C,
    filter: F,
}

impl<C, F> FilterTextCorpus<C, F>
where
    C: TextCorpus,
    F: Filter<Arc<dyn Text>> + Send + Sync,
{
    pub fn new(inner: C, filter: F) -> Self {
        Self { inner, filter }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C, F> Corpus for FilterTextCorpus<C, F>
where
    C: TextCorpus,
    F: Filter<Arc<dyn Text>> + Send + Sync,
{
    type Row = TextRow;

    fn get_rows(&self, text_ids: Option<&HashSet<String>>) -> Rows<'_, TextRow> {
        crate::corpus::text_rows(self.texts(), text_ids)
    }

    fn missing_rows_allowed(&self) -> bool {
        self.inner.missing_rows_allowed()
    }
}

impl<C, F> TextCorpus for FilterTextCorpus<C, F>
where
    C: TextCorpus,
    F: Filter<Arc<dyn Text>> + Send + Sync,
{
    fn texts(&self) -> Vec<Arc<dyn Text>> {
        self.inner
            .texts()
            .into_iter()
            .filter(|t| self.filter.detect(t))
            .collect()
    }

    fn text(&self, id: &str) -> Collection<dyn Text> {
        match self.inner.text(id) {
            Collection::Present(text) if self.filter.detect(&text) => Collection::Present(text),
            Collection::Present(text) => {
                Collection::Absent(Placeholder::new(text.id(), text.sort_key()))
            }
            absent => absent,
        }
    }

    fn create_null_text(&self, id: &str) -> Placeholder {
        self.inner.create_null_text(id)
    }
}

/// Alignment corpus keeping the collections `filter` detects.
pub struct FilterAlignmentCorpus<C, F> {
    inner: C,
    filter: F,
}

impl<C, F> FilterAlignmentCorpus<C, F>
where
    C: AlignmentCorpus,
    F: Filter<Arc<dyn AlignmentCollection>> + Send + Sync,
{
    pub fn new(inner: C, filter: F) -> Self {
        Self { inner, filter }
    }
}

impl<C, F> Corpus for FilterAlignmentCorpus<C, F>
where
    C: AlignmentCorpus,
    F: Filter<Arc<dyn AlignmentCollection>> + Send + Sync,
{
    type Row = AlignmentRow;

    fn get_rows(&self, text_ids: Option<&HashSet<String>>) -> Rows<'_, AlignmentRow> {
        let collections: Vec<_> = self
            .collections()
            .into_iter()
            .filter(|c| text_ids.map_or(true, |ids| ids.contains(c.id())))
            .collect();
        Box::new(collections.into_iter().flat_map(|c| c.get_rows()))
    }
}

impl<C, F> AlignmentCorpus for FilterAlignmentCorpus<C, F>
where
    C: AlignmentCorpus,
    F: Filter<Arc<dyn AlignmentCollection>> + Send + Sync,
{
    fn collections(&self) -> Vec<Arc<dyn AlignmentCollection>> {
        self.inner
            .collections()
            .into_iter()
            .filter(|c| self.filter.detect(c))
            .collect()
    }

    fn collection(&self, id: &str) -> Collection<dyn AlignmentCollection> {
        match self.inner.collection(id) {
            Collection::Present(c) if self.filter.detect(&c) => Collection::Present(c),
            Collection::Present(c) => Collection::Absent(Placeholder::new(c.id(), c.sort_key())),
            absent => absent,
        }
    }
}

/// Any corpus, keeping the rows `filter` detects. Errors are always passed through.
pub struct FilterRows<C, F> {
    inner: C,
    filter: F,
}

impl<C, F> FilterRows<C, F>
where
    C: Corpus,
    F: Filter<C::Row>,
{
    pub fn new(inner: C, filter: F) -> Self {
        Self { inner, filter }
    }
}

impl<C, F> Corpus for FilterRows<C, F>
where
    C: Corpus,
    F: Filter<C::Row>,
{
    type Row = C::Row;

    fn get_rows(&self, text_ids: Option<&HashSet<String>>) -> Rows<'_, C::Row> {
        Box::new(
            self.inner
                .get_rows(text_ids)
                .filter(move |row| row.as_ref().map_or(true, |r| self.filter.detect(r))),
        )
    }

    fn missing_rows_allowed(&self) -> bool {
        self.inner.missing_rows_allowed()
    }
}
