//! Transformed texts and corpora.
//!
//! A failing transform stops nothing by itself: its error is yielded as a
//! [crate::error::HandlerFailure] holding the row it failed on, handed back by
//! the transform without copying it.
use std::collections::HashSet;
use std::sync::Arc;

use super::Transform;
use crate::corpus::{text_rows, Collection, Corpus, Placeholder, Text, TextCorpus};
use crate::error::Error;
use crate::rows::{Rows, TextRow};

#[derive(Clone)]
pub struct TransformText {
    inner: Arc<dyn Text>,
    transform: Arc<dyn Transform>,
}

impl TransformText {
    pub fn new(inner: Arc<dyn Text>, transform: Arc<dyn Transform>) -> Self {
        Self { inner, transform }
    }
}

impl Text for TransformText {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn sort_key(&self) -> &str {
        self.inner.sort_key()
    }

    fn is_tokenized(&self) -> bool {
        self.inner.is_tokenized()
    }

    fn missing_rows_allowed(&self) -> bool {
        self.inner.missing_rows_allowed()
    }

    fn get_rows(&self) -> Rows<'static, TextRow> {
        let transform = self.transform.clone();
        Box::new(
            self.inner
                .get_rows()
                .map(move |row| -> Result<TextRow, Error> { Ok(transform.transform_own(row?)?) }),
        )
    }
}

/// Text corpus whose rows go through `transform`.
pub struct TransformTextCorpus<C> {
    inner: C,
    transform: Arc<dyn Transform>,
}

impl<C: TextCorpus> TransformTextCorpus<C> {
    pub fn new(inner: C, transform: Arc<dyn Transform>) -> Self {
        Self { inner, transform }
    }
}

impl<C: TextCorpus> Corpus for TransformTextCorpus<C> {
    type Row = TextRow;

    fn get_rows(&self, text_ids: Option<&HashSet<String>>) -> Rows<'_, TextRow> {
        text_rows(self.texts(), text_ids)
    }

    fn missing_rows_allowed(&self) -> bool {
        self.inner.missing_rows_allowed()
    }
}

impl<C: TextCorpus> TextCorpus for TransformTextCorpus<C> {
    fn texts(&self) -> Vec<Arc<dyn Text>> {
        self.inner
            .texts()
            .into_iter()
            .map(|t| Arc::new(TransformText::new(t, self.transform.clone())) as Arc<dyn Text>)
            .collect()
    }

    fn text(&self, id: &str) -> Collection<dyn Text> {
        match self.inner.text(id) {
            Collection::Present(t) => {
                Collection::Present(Arc::new(TransformText::new(t, self.transform.clone())))
            }
            absent => absent,
        }
    }

    fn create_null_text(&self, id: &str) -> Placeholder {
        self.inner.create_null_text(id)
    }
}
