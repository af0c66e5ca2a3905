/*! Corpora

A corpus is a lazily traversed, ref-ordered sequence of rows. Text corpora are made of [Text]s,
alignment corpora of [AlignmentCollection]s, both ordered by sort key.

Texts are looked up by id without failing: an unknown or filtered out id gives a [Collection::Absent]
placeholder that has the same id and sort key and no rows.

Every traversal is a fresh one: calling `get_rows` twice gives two independent iterators
that yield the same rows in the same order.
!*/
mod alignment;
mod dictionary;
mod multiple;
mod text;

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Error;
use crate::refs::scripture_sort_key;
use crate::rows::{Row, Rows, TextRow};

pub use alignment::{
    AlignmentCollection, AlignmentCorpus, DictionaryAlignmentCorpus, MemoryAlignmentCollection,
    MemoryTextAlignmentCollection, StreamAlignmentCollection, TextAlignmentCollection,
    TextAlignmentCorpus, TextAlignmentView,
};
pub use dictionary::DictionaryTextCorpus;
pub use multiple::{MultipleText, MultipleTextCorpus};
pub use text::{MemoryText, StreamText};

/// Sequence of rows that can be traversed any number of times.
pub trait Corpus {
    type Row: Row;

    /// Rows of the texts named in `text_ids` (every text if `None`), in corpus order.
    fn get_rows(&self, text_ids: Option<&HashSet<String>>) -> Rows<'_, Self::Row>;

    /// Counts rows, skipping empty ones unless `include_empty`.
    ///
    /// Fails with the first error the traversal hits.
    fn count(&self, include_empty: bool, text_ids: Option<&HashSet<String>>) -> Result<usize, Error> {
        let mut count = 0;
        for row in self.get_rows(text_ids) {
            let row = row?;
            if include_empty || !row.is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Whether consumers must tolerate gaps in the ref sequence.
    fn missing_rows_allowed(&self) -> bool {
        true
    }
}

/// Ordered collection of [TextRow]s.
pub trait Text: Send + Sync {
    fn id(&self) -> &str;

    fn sort_key(&self) -> &str;

    fn is_tokenized(&self) -> bool {
        false
    }

    fn missing_rows_allowed(&self) -> bool {
        true
    }

    fn get_rows(&self) -> Rows<'static, TextRow>;

    fn count(&self, include_empty: bool) -> Result<usize, Error> {
        let mut count = 0;
        for row in self.get_rows() {
            let row = row?;
            if include_empty || !row.is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Corpus made of [Text]s.
pub trait TextCorpus: Corpus<Row = TextRow> + Send + Sync {
    /// Texts ordered by sort key.
    fn texts(&self) -> Vec<Arc<dyn Text>>;

    /// Text with id `id`, or a placeholder for it.
    fn text(&self, id: &str) -> Collection<dyn Text> {
        match self.texts().into_iter().find(|t| t.id() == id) {
            Some(text) => Collection::Present(text),
            None => Collection::Absent(self.create_null_text(id)),
        }
    }

    fn text_ids(&self) -> Vec<String> {
        self.texts().iter().map(|t| t.id().to_string()).collect()
    }

    fn is_tokenized(&self) -> bool {
        let texts = self.texts();
        !texts.is_empty() && texts.iter().all(|t| t.is_tokenized())
    }

    /// Placeholder standing for a text this corpus does not have.
    fn create_null_text(&self, id: &str) -> Placeholder {
        Placeholder::new(id, id)
    }
}

impl<C: Corpus + ?Sized> Corpus for Arc<C> {
    type Row = C::Row;

    fn get_rows(&self, text_ids: Option<&HashSet<String>>) -> Rows<'_, C::Row> {
        (**self).get_rows(text_ids)
    }

    fn count(&self, include_empty: bool, text_ids: Option<&HashSet<String>>) -> Result<usize, Error> {
        (**self).count(include_empty, text_ids)
    }

    fn missing_rows_allowed(&self) -> bool {
        (**self).missing_rows_allowed()
    }
}

impl<C: TextCorpus + ?Sized> TextCorpus for Arc<C> {
    fn texts(&self) -> Vec<Arc<dyn Text>> {
        (**self).texts()
    }

    fn text(&self, id: &str) -> Collection<dyn Text> {
        (**self).text(id)
    }

    fn is_tokenized(&self) -> bool {
        (**self).is_tokenized()
    }

    fn create_null_text(&self, id: &str) -> Placeholder {
        (**self).create_null_text(id)
    }
}

impl<C: AlignmentCorpus + ?Sized> AlignmentCorpus for Arc<C> {
    fn collections(&self) -> Vec<Arc<dyn AlignmentCollection>> {
        (**self).collections()
    }

    fn collection(&self, id: &str) -> Collection<dyn AlignmentCollection> {
        (**self).collection(id)
    }
}

/// Rows of `texts`, restricted to `text_ids`.
pub(crate) fn text_rows<'a>(
    texts: Vec<Arc<dyn Text>>,
    text_ids: Option<&HashSet<String>>,
) -> Rows<'a, TextRow> {
    let texts: Vec<Arc<dyn Text>> = match text_ids {
        Some(ids) => texts.into_iter().filter(|t| ids.contains(t.id())).collect(),
        None => texts,
    };
    Box::new(texts.into_iter().flat_map(|t| t.get_rows()))
}

/// Identity of a collection that has no rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    id: String,
    sort_key: String,
}

impl Placeholder {
    pub fn new(id: &str, sort_key: &str) -> Self {
        Self {
            id: id.to_string(),
            sort_key: sort_key.to_string(),
        }
    }

    /// Placeholder of a scripture book, sorted by book number.
    pub fn scripture(book: &str) -> Self {
        Self::new(book, &scripture_sort_key(book))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }
}

impl Text for Placeholder {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.sort_key
    }

    fn get_rows(&self) -> Rows<'static, TextRow> {
        Box::new(std::iter::empty())
    }

    fn count(&self, _include_empty: bool) -> Result<usize, Error> {
        Ok(0)
    }
}

/// A collection looked up by id: either present, or absent with a zero-row placeholder.
#[derive(Debug)]
pub enum Collection<T: ?Sized> {
    Present(Arc<T>),
    Absent(Placeholder),
}

impl<T: ?Sized> Clone for Collection<T> {
    fn clone(&self) -> Self {
        match self {
            Collection::Present(inner) => Collection::Present(inner.clone()),
            Collection::Absent(p) => Collection::Absent(p.clone()),
        }
    }
}

impl<T: ?Sized> Collection<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Collection::Present(_))
    }

    pub fn present(&self) -> Option<&Arc<T>> {
        match self {
            Collection::Present(inner) => Some(inner),
            Collection::Absent(_) => None,
        }
    }
}

impl Text for Collection<dyn Text> {
    fn id(&self) -> &str {
        match self {
            Collection::Present(t) => t.id(),
            Collection::Absent(p) => p.id(),
        }
    }

    fn sort_key(&self) -> &str {
        match self {
            Collection::Present(t) => t.sort_key(),
            Collection::Absent(p) => p.sort_key(),
        }
    }

    fn is_tokenized(&self) -> bool {
        match self {
            Collection::Present(t) => t.is_tokenized(),
            Collection::Absent(_) => false,
        }
    }

    fn missing_rows_allowed(&self) -> bool {
        match self {
            Collection::Present(t) => t.missing_rows_allowed(),
            Collection::Absent(_) => true,
        }
    }

    fn get_rows(&self) -> Rows<'static, TextRow> {
        match self {
            Collection::Present(t) => t.get_rows(),
            Collection::Absent(p) => Text::get_rows(p),
        }
    }
}
