//! Text corpus over a dictionary of texts.
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use glob::glob;

use super::{text_rows, Collection, Corpus, Placeholder, StreamText, Text, TextCorpus};
use crate::error::Error;
use crate::io::reader::RowParser;
use crate::io::{FileStreamSource, StreamContainer};
use crate::refs::{book_number, scripture_sort_key};
use crate::rows::{Rows, TextRow};

/// Id of the only text of a corpus read from a single file.
pub const ALL_TEXT_ID: &str = "*all*";

/// Text corpus keyed by text id.
#[derive(Clone, Default)]
pub struct DictionaryTextCorpus {
    texts: BTreeMap<String, Arc<dyn Text>>,
    scripture: bool,
}

impl DictionaryTextCorpus {
    pub fn new(texts: impl IntoIterator<Item = Arc<dyn Text>>) -> Self {
        let mut corpus = Self::default();
        for text in texts {
            corpus.add_text(text);
        }
        corpus
    }

    /// Placeholders for missing texts get scripture sort keys.
    pub fn with_scripture_placeholders(mut self) -> Self {
        self.scripture = true;
        self
    }

    /// Adds a text, replacing any text with the same id.
    pub fn add_text(&mut self, text: Arc<dyn Text>) {
        self.texts.insert(text.id().to_string(), text);
    }

    /// One text per container entry, named after the entry's file stem.
    pub fn from_container(
        container: &dyn StreamContainer,
        parser: Arc<dyn RowParser<Row = TextRow>>,
        tokenized: bool,
    ) -> Result<Self, Error> {
        let mut corpus = Self::default();
        for name in container.entry_names()? {
            let id = text_id_of(&name);
            debug!("text {} from entry {}", id, name);
            corpus.add_text(Arc::new(
                StreamText::new(&id, container.source(&name), parser.clone())
                    .with_sort_key(&sort_key_of(&id))
                    .with_tokenized(tokenized),
            ));
        }
        Ok(corpus)
    }

    /// One text per file matching `pattern`, named after the file stem.
    ///
    /// A pattern naming an existing file gives a single text with id [ALL_TEXT_ID].
    pub fn from_glob(
        pattern: &str,
        parser: Arc<dyn RowParser<Row = TextRow>>,
        tokenized: bool,
    ) -> Result<Self, Error> {
        let mut corpus = Self::default();
        if Path::new(pattern).is_file() {
            corpus.add_text(Arc::new(
                StreamText::new(
                    ALL_TEXT_ID,
                    Arc::new(FileStreamSource::new(Path::new(pattern))),
                    parser,
                )
                .with_tokenized(tokenized),
            ));
            return Ok(corpus);
        }

        for path in glob(pattern)? {
            let path = path?;
            if !path.is_file() {
                continue;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let id = text_id_of(&name);
            debug!("text {} from file {:?}", id, path);
            corpus.add_text(Arc::new(
                StreamText::new(&id, Arc::new(FileStreamSource::new(&path)), parser.clone())
                    .with_sort_key(&sort_key_of(&id))
                    .with_tokenized(tokenized),
            ));
        }
        if corpus.texts.is_empty() {
            warn!("no file matches {}", pattern);
        }
        Ok(corpus)
    }
}

/// Book ids sort in canonical order, other ids by themselves.
fn sort_key_of(id: &str) -> String {
    match book_number(id) {
        Some(_) => scripture_sort_key(id),
        None => id.to_string(),
    }
}

/// File name up to its first dot (`MAT.txt.gz` gives `MAT`).
fn text_id_of(name: &str) -> String {
    let base = name.rsplit('/').next().unwrap_or(name);
    match base.split_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => base.to_string(),
    }
}

impl Corpus for DictionaryTextCorpus {
    type Row = TextRow;

    fn get_rows(&self, text_ids: Option<&HashSet<String>>) -> Rows<'_, TextRow> {
        text_rows(self.texts(), text_ids)
    }

    fn missing_rows_allowed(&self) -> bool {
        self.texts.values().all(|t| t.missing_rows_allowed())
    }
}

impl TextCorpus for DictionaryTextCorpus {
    fn texts(&self) -> Vec<Arc<dyn Text>> {
        let mut texts: Vec<Arc<dyn Text>> = self.texts.values().cloned().collect();
        texts.sort_by(|a, b| a.sort_key().cmp(b.sort_key()).then(a.id().cmp(b.id())));
        texts
    }

    fn text(&self, id: &str) -> Collection<dyn Text> {
        match self.texts.get(id) {
            Some(text) => Collection::Present(text.clone()),
            None => Collection::Absent(self.create_null_text(id)),
        }
    }

    fn create_null_text(&self, id: &str) -> Placeholder {
        if self.scripture {
            Placeholder::scripture(id)
        } else {
            Placeholder::new(id, id)
        }
    }
}
