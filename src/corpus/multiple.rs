//! Merging corpora under per-corpus keys.
use std::collections::HashSet;
use std::sync::Arc;

use super::{text_rows, Collection, Corpus, Placeholder, Text, TextCorpus};
use crate::rows::{Rows, TextRow};

/// Text renamed to `{corpus_key}_{id}`, with sort key `{corpus_key}_{sort_key}`.
///
/// Rows are the inner text's, untouched.
#[derive(Clone)]
pub struct MultipleText {
    id: String,
    sort_key: String,
    inner: Arc<dyn Text>,
}

impl MultipleText {
    pub fn new(corpus_key: &str, inner: Arc<dyn Text>) -> Self {
        Self {
            id: format!("{}_{}", corpus_key, inner.id()),
            sort_key: format!("{}_{}", corpus_key, inner.sort_key()),
            inner,
        }
    }

    pub fn inner(&self) -> &Arc<dyn Text> {
        &self.inner
    }
}

impl Text for MultipleText {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.sort_key
    }

    fn is_tokenized(&self) -> bool {
        self.inner.is_tokenized()
    }

    fn missing_rows_allowed(&self) -> bool {
        self.inner.missing_rows_allowed()
    }

    fn get_rows(&self) -> Rows<'static, TextRow> {
        self.inner.get_rows()
    }

    fn count(&self, include_empty: bool) -> Result<usize, crate::error::Error> {
        self.inner.count(include_empty)
    }
}

/// Several text corpora seen as one, each text namespaced by its corpus key.
#[derive(Clone)]
pub struct MultipleTextCorpus {
    corpora: Vec<(String, Arc<dyn TextCorpus>)>,
}

impl MultipleTextCorpus {
    pub fn new(corpora: Vec<(String, Arc<dyn TextCorpus>)>) -> Self {
        Self { corpora }
    }

    pub fn corpus(&self, key: &str) -> Option<&Arc<dyn TextCorpus>> {
        self.corpora
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, corpus)| corpus)
    }
}

impl Corpus for MultipleTextCorpus {
    type Row = TextRow;

    fn get_rows(&self, text_ids: Option<&HashSet<String>>) -> Rows<'_, TextRow> {
        text_rows(self.texts(), text_ids)
    }

    fn missing_rows_allowed(&self) -> bool {
        self.corpora.iter().all(|(_, c)| c.missing_rows_allowed())
    }
}

impl TextCorpus for MultipleTextCorpus {
    fn texts(&self) -> Vec<Arc<dyn Text>> {
        let mut texts: Vec<Arc<dyn Text>> = self
            .corpora
            .iter()
            .flat_map(|(key, corpus)| {
                corpus
                    .texts()
                    .into_iter()
                    .map(move |t| Arc::new(MultipleText::new(key, t)) as Arc<dyn Text>)
            })
            .collect();
        texts.sort_by(|a, b| a.sort_key().cmp(b.sort_key()).then(a.id().cmp(b.id())));
        texts
    }

    fn text(&self, id: &str) -> Collection<dyn Text> {
        for (key, corpus) in &self.corpora {
            if let Some(inner_id) = id.strip_prefix(&format!("{}_", key)) {
                if let Collection::Present(inner) = corpus.text(inner_id) {
                    return Collection::Present(Arc::new(MultipleText::new(key, inner)));
                }
            }
        }
        Collection::Absent(self.create_null_text(id))
    }

    fn create_null_text(&self, id: &str) -> Placeholder {
        Placeholder::new(id, id)
    }
}
