/*! Alignment collections and corpora.

[AlignmentRow] sets are the canonical form of an alignment. [TextAlignment] collections are either
held in memory or read through a [TextAlignmentView] of an alignment collection.

Inverting never touches the inverted value: it builds a new collection or a lazily inverting view.
!*/
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use super::{Collection, Corpus, Placeholder};
use crate::error::Error;
use crate::io::reader::{AlignmentLineParser, RowParser};
use crate::io::StreamSource;
use crate::rows::{AlignmentRow, Invertible, Row, Rows, TextAlignment};

/// Ordered collection of [AlignmentRow]s.
pub trait AlignmentCollection: Send + Sync {
    fn id(&self) -> &str;

    fn sort_key(&self) -> &str;

    fn get_rows(&self) -> Rows<'static, AlignmentRow>;

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

    /// Collection with every row inverted.
    fn invert(&self) -> Arc<dyn AlignmentCollection>;
}

impl AlignmentCollection for Placeholder {
    fn id(&self) -> &str {
        Placeholder::id(self)
    }

    fn sort_key(&self) -> &str {
        Placeholder::sort_key(self)
    }

    fn get_rows(&self) -> Rows<'static, AlignmentRow> {
        Box::new(std::iter::empty())
    }

    fn invert(&self) -> Arc<dyn AlignmentCollection> {
        Arc::new(self.clone())
    }
}

impl AlignmentCollection for Collection<dyn AlignmentCollection> {
    fn id(&self) -> &str {
        match self {
            Collection::Present(c) => c.id(),
            Collection::Absent(p) => p.id(),
        }
    }

    fn sort_key(&self) -> &str {
        match self {
            Collection::Present(c) => c.sort_key(),
            Collection::Absent(p) => p.sort_key(),
        }
    }

    fn get_rows(&self) -> Rows<'static, AlignmentRow> {
        match self {
            Collection::Present(c) => c.get_rows(),
            Collection::Absent(_) => Box::new(std::iter::empty()),
        }
    }

    fn invert(&self) -> Arc<dyn AlignmentCollection> {
        match self {
            Collection::Present(c) => c.invert(),
            Collection::Absent(p) => AlignmentCollection::invert(p),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MemoryAlignmentCollection {
    id: String,
    sort_key: String,
    rows: Arc<Vec<AlignmentRow>>,
}

impl MemoryAlignmentCollection {
    pub fn new(id: &str, rows: Vec<AlignmentRow>) -> Self {
        Self {
            id: id.to_string(),
            sort_key: id.to_string(),
            rows: Arc::new(rows),
        }
    }

    pub fn with_sort_key(mut self, sort_key: &str) -> Self {
        self.sort_key = sort_key.to_string();
        self
    }
}

impl AlignmentCollection for MemoryAlignmentCollection {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.sort_key
    }

    fn get_rows(&self) -> Rows<'static, AlignmentRow> {
        let rows = self.rows.clone();
        Box::new((0..rows.len()).map(move |idx| Ok(rows[idx].clone())))
    }

    fn invert(&self) -> Arc<dyn AlignmentCollection> {
        Arc::new(Self {
            id: self.id.clone(),
            sort_key: self.sort_key.clone(),
            rows: Arc::new(self.rows.iter().map(Invertible::invert).collect()),
        })
    }
}

/// Alignment file (see [AlignmentLineParser]), inverted on the fly when needed.
#[derive(Clone)]
pub struct StreamAlignmentCollection {
    id: String,
    sort_key: String,
    source: Arc<dyn StreamSource>,
    inverted: bool,
}

impl StreamAlignmentCollection {
    pub fn new(id: &str, source: Arc<dyn StreamSource>) -> Self {
        Self {
            id: id.to_string(),
            sort_key: id.to_string(),
            source,
            inverted: false,
        }
    }

    pub fn with_sort_key(mut self, sort_key: &str) -> Self {
        self.sort_key = sort_key.to_string();
        self
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }
}

impl AlignmentCollection for StreamAlignmentCollection {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.sort_key
    }

    fn get_rows(&self) -> Rows<'static, AlignmentRow> {
        let stream = match self.source.open() {
            Ok(stream) => stream,
            Err(e) => return Box::new(std::iter::once(Err(e))),
        };
        let rows = AlignmentLineParser.parse(&self.id, stream);
        if self.inverted {
            Box::new(rows.map(|row| row.map(|r| r.invert())))
        } else {
            rows
        }
    }

    fn invert(&self) -> Arc<dyn AlignmentCollection> {
        Arc::new(Self {
            inverted: !self.inverted,
            ..self.clone()
        })
    }
}

/// Alignment corpus made of [AlignmentCollection]s.
pub trait AlignmentCorpus: Corpus<Row = AlignmentRow> + Send + Sync {
    /// Collections ordered by sort key.
    fn collections(&self) -> Vec<Arc<dyn AlignmentCollection>>;

    fn collection(&self, id: &str) -> Collection<dyn AlignmentCollection> {
        match self.collections().into_iter().find(|c| c.id() == id) {
            Some(c) => Collection::Present(c),
            None => Collection::Absent(Placeholder::new(id, id)),
        }
    }

    fn text_ids(&self) -> Vec<String> {
        self.collections()
            .iter()
            .map(|c| c.id().to_string())
            .collect()
    }

    /// Corpus with every collection inverted, ids and order kept.
    fn invert(&self) -> DictionaryAlignmentCorpus {
        DictionaryAlignmentCorpus::new(self.collections().iter().map(|c| c.invert()))
    }
}

#[derive(Clone, Default)]
pub struct DictionaryAlignmentCorpus {
    collections: BTreeMap<String, Arc<dyn AlignmentCollection>>,
}

impl DictionaryAlignmentCorpus {
    pub fn new(collections: impl IntoIterator<Item = Arc<dyn AlignmentCollection>>) -> Self {
        Self {
            collections: collections
                .into_iter()
                .map(|c| (c.id().to_string(), c))
                .collect(),
        }
    }

    pub fn add_collection(&mut self, collection: Arc<dyn AlignmentCollection>) {
        self.collections
            .insert(collection.id().to_string(), collection);
    }
}

impl Corpus for DictionaryAlignmentCorpus {
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

impl AlignmentCorpus for DictionaryAlignmentCorpus {
    fn collections(&self) -> Vec<Arc<dyn AlignmentCollection>> {
        let mut collections: Vec<_> = self.collections.values().cloned().collect();
        collections.sort_by(|a, b| a.sort_key().cmp(b.sort_key()).then(a.id().cmp(b.id())));
        collections
    }

    fn collection(&self, id: &str) -> Collection<dyn AlignmentCollection> {
        match self.collections.get(id) {
            Some(c) => Collection::Present(c.clone()),
            None => Collection::Absent(Placeholder::new(id, id)),
        }
    }
}

/// Ordered collection of [TextAlignment]s.
pub trait TextAlignmentCollection: Send + Sync {
    fn id(&self) -> &str;

    fn sort_key(&self) -> &str;

    fn get_rows(&self) -> Rows<'static, TextAlignment>;

    fn invert(&self) -> Arc<dyn TextAlignmentCollection>;
}

impl TextAlignmentCollection for Placeholder {
    fn id(&self) -> &str {
        Placeholder::id(self)
    }

    fn sort_key(&self) -> &str {
        Placeholder::sort_key(self)
    }

    fn get_rows(&self) -> Rows<'static, TextAlignment> {
        Box::new(std::iter::empty())
    }

    fn invert(&self) -> Arc<dyn TextAlignmentCollection> {
        Arc::new(self.clone())
    }
}

impl TextAlignmentCollection for Collection<dyn TextAlignmentCollection> {
    fn id(&self) -> &str {
        match self {
            Collection::Present(c) => c.id(),
            Collection::Absent(p) => p.id(),
        }
    }

    fn sort_key(&self) -> &str {
        match self {
            Collection::Present(c) => c.sort_key(),
            Collection::Absent(p) => p.sort_key(),
        }
    }

    fn get_rows(&self) -> Rows<'static, TextAlignment> {
        match self {
            Collection::Present(c) => c.get_rows(),
            Collection::Absent(_) => Box::new(std::iter::empty()),
        }
    }

    fn invert(&self) -> Arc<dyn TextAlignmentCollection> {
        match self {
            Collection::Present(c) => c.invert(),
            Collection::Absent(p) => TextAlignmentCollection::invert(p),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MemoryTextAlignmentCollection {
    id: String,
    sort_key: String,
    alignments: Arc<Vec<TextAlignment>>,
}

impl MemoryTextAlignmentCollection {
    pub fn new(id: &str, alignments: Vec<TextAlignment>) -> Self {
        Self {
            id: id.to_string(),
            sort_key: id.to_string(),
            alignments: Arc::new(alignments),
        }
    }
}

impl TextAlignmentCollection for MemoryTextAlignmentCollection {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.sort_key
    }

    fn get_rows(&self) -> Rows<'static, TextAlignment> {
        let alignments = self.alignments.clone();
        Box::new((0..alignments.len()).map(move |idx| Ok(alignments[idx].clone())))
    }

    fn invert(&self) -> Arc<dyn TextAlignmentCollection> {
        Arc::new(Self {
            id: self.id.clone(),
            sort_key: self.sort_key.clone(),
            alignments: Arc::new(self.alignments.iter().map(Invertible::invert).collect()),
        })
    }
}

/// [TextAlignment]s read from an [AlignmentCollection].
///
/// Pairs are listed by target then source index. Inverting swaps every tuple in place.
#[derive(Clone)]
pub struct TextAlignmentView {
    inner: Arc<dyn AlignmentCollection>,
    inverted: bool,
}

impl TextAlignmentView {
    pub fn new(inner: Arc<dyn AlignmentCollection>) -> Self {
        Self {
            inner,
            inverted: false,
        }
    }
}

impl TextAlignmentCollection for TextAlignmentView {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn sort_key(&self) -> &str {
        self.inner.sort_key()
    }

    fn get_rows(&self) -> Rows<'static, TextAlignment> {
        let inverted = self.inverted;
        Box::new(self.inner.get_rows().map(move |row| -> Result<TextAlignment, Error> {
            let alignment = TextAlignment::from(&row?);
            Ok(if inverted {
                alignment.invert()
            } else {
                alignment
            })
        }))
    }

    fn invert(&self) -> Arc<dyn TextAlignmentCollection> {
        Arc::new(Self {
            inner: self.inner.clone(),
            inverted: !self.inverted,
        })
    }
}

/// Corpus of [TextAlignmentCollection]s.
#[derive(Clone, Default)]
pub struct TextAlignmentCorpus {
    collections: BTreeMap<String, Arc<dyn TextAlignmentCollection>>,
}

impl TextAlignmentCorpus {
    pub fn new(collections: impl IntoIterator<Item = Arc<dyn TextAlignmentCollection>>) -> Self {
        Self {
            collections: collections
                .into_iter()
                .map(|c| (c.id().to_string(), c))
                .collect(),
        }
    }

    /// Views every collection of an alignment corpus.
    pub fn from_alignment_corpus(corpus: &dyn AlignmentCorpus) -> Self {
        Self::new(
            corpus
                .collections()
                .into_iter()
                .map(|c| Arc::new(TextAlignmentView::new(c)) as Arc<dyn TextAlignmentCollection>),
        )
    }

    /// Collections ordered by sort key.
    pub fn collections(&self) -> Vec<Arc<dyn TextAlignmentCollection>> {
        let mut collections: Vec<_> = self.collections.values().cloned().collect();
        collections.sort_by(|a, b| a.sort_key().cmp(b.sort_key()).then(a.id().cmp(b.id())));
        collections
    }

    pub fn collection(&self, id: &str) -> Collection<dyn TextAlignmentCollection> {
        match self.collections.get(id) {
            Some(c) => Collection::Present(c.clone()),
            None => Collection::Absent(Placeholder::new(id, id)),
        }
    }

    pub fn invert(&self) -> TextAlignmentCorpus {
        Self::new(self.collections().iter().map(|c| c.invert()))
    }
}

impl Corpus for TextAlignmentCorpus {
    type Row = TextAlignment;

    fn get_rows(&self, text_ids: Option<&HashSet<String>>) -> Rows<'_, TextAlignment> {
        let collections: Vec<_> = self
            .collections()
            .into_iter()
            .filter(|c| text_ids.map_or(true, |ids| ids.contains(c.id())))
            .collect();
        Box::new(collections.into_iter().flat_map(|c| c.get_rows()))
    }
}
