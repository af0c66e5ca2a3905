//! Texts backed by memory or by a stream source.
use std::sync::Arc;

use super::Text;
use crate::io::reader::RowParser;
use crate::io::StreamSource;
use crate::refs::scripture_sort_key;
use crate::rows::{Rows, TextRow};

/// Text holding its rows. Each traversal clones them.
#[derive(Debug, Clone)]
pub struct MemoryText {
    id: String,
    sort_key: String,
    rows: Arc<Vec<TextRow>>,
    tokenized: bool,
    missing_rows_allowed: bool,
}

impl MemoryText {
    pub fn new(id: &str, rows: Vec<TextRow>) -> Self {
        Self {
            id: id.to_string(),
            sort_key: id.to_string(),
            rows: Arc::new(rows),
            tokenized: false,
            missing_rows_allowed: true,
        }
    }

    /// Scripture book, sorted by book number.
    pub fn scripture(book: &str, rows: Vec<TextRow>) -> Self {
        Self::new(book, rows).with_sort_key(&scripture_sort_key(book))
    }

    pub fn with_sort_key(mut self, sort_key: &str) -> Self {
        self.sort_key = sort_key.to_string();
        self
    }

    pub fn with_tokenized(mut self, tokenized: bool) -> Self {
        self.tokenized = tokenized;
        self
    }

    pub fn with_missing_rows_allowed(mut self, allowed: bool) -> Self {
        self.missing_rows_allowed = allowed;
        self
    }
}

impl Text for MemoryText {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.sort_key
    }

    fn is_tokenized(&self) -> bool {
        self.tokenized
    }

    fn missing_rows_allowed(&self) -> bool {
        self.missing_rows_allowed
    }

    fn get_rows(&self) -> Rows<'static, TextRow> {
        let rows = self.rows.clone();
        Box::new((0..rows.len()).map(move |idx| Ok(rows[idx].clone())))
    }
}

/// Text parsed from a stream each time it is traversed.
///
/// A source that fails to open yields that single error.
#[derive(Clone)]
pub struct StreamText {
    id: String,
    sort_key: String,
    source: Arc<dyn StreamSource>,
    parser: Arc<dyn RowParser<Row = TextRow>>,
    tokenized: bool,
}

impl StreamText {
    pub fn new(
        id: &str,
        source: Arc<dyn StreamSource>,
        parser: Arc<dyn RowParser<Row = TextRow>>,
    ) -> Self {
        Self {
            id: id.to_string(),
            sort_key: id.to_string(),
            source,
            parser,
            tokenized: false,
        }
    }

    pub fn with_sort_key(mut self, sort_key: &str) -> Self {
        self.sort_key = sort_key.to_string();
        self
    }

    pub fn with_tokenized(mut self, tokenized: bool) -> Self {
        self.tokenized = tokenized;
        self
    }

    pub fn source(&self) -> &Arc<dyn StreamSource> {
        &self.source
    }
}

impl std::fmt::Debug for StreamText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamText")
            .field("id", &self.id)
            .field("sort_key", &self.sort_key)
            .field("source", &self.source.location())
            .finish()
    }
}

impl Text for StreamText {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.sort_key
    }

    fn is_tokenized(&self) -> bool {
        self.tokenized
    }

    fn get_rows(&self) -> Rows<'static, TextRow> {
        match self.source.open() {
            Ok(stream) => self.parser.parse(&self.id, stream),
            Err(e) => {
                warn!("could not open {}: {}", self.source.location(), e);
                Box::new(std::iter::once(Err(e)))
            }
        }
    }
}
