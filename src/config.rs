/*! Corpus configuration

A [CorpusConfig] says where a text corpus lives and how to read it. It is read from JSON:

```json
{
    "kind": "archive",
    "path": "corpora/en.zip",
    "tokenized": true,
    "encoding": "utf-8"
}
```

or guessed from a command line argument with [CorpusConfig::from_arg].
!*/
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::corpus::{DictionaryTextCorpus, TextCorpus};
use crate::error::Error;
use crate::io::reader::{LineRowParser, RowParser};
use crate::io::{DirectoryContainer, MemoryContainer, TextEncoding, ZipContainer};
use crate::rows::TextRow;

/// Where the texts of a corpus are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusKind {
    /// A directory, a glob pattern or a single file.
    Files,
    /// A zip archive, one text per entry.
    Archive,
    /// Texts given inline in `texts`.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorpusConfig {
    pub kind: CorpusKind,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub tokenized: bool,
    #[serde(default)]
    pub encoding: TextEncoding,
    #[serde(default)]
    pub texts: BTreeMap<String, String>,
}

impl CorpusConfig {
    pub fn new(kind: CorpusKind, path: Option<PathBuf>) -> Self {
        Self {
            kind,
            path,
            tokenized: false,
            encoding: TextEncoding::default(),
            texts: BTreeMap::new(),
        }
    }

    pub fn with_tokenized(mut self, tokenized: bool) -> Self {
        self.tokenized = tokenized;
        self
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        debug!("reading corpus config {:?}", path);
        Self::from_reader(File::open(path)?)
    }

    /// Config matching a command line argument.
    ///
    /// A `.json` file is read as a config, a `.zip` file is an archive, anything else
    /// (directory, glob pattern, file) is read as files.
    pub fn from_arg(arg: &str, tokenized: bool) -> Result<Self, Error> {
        let path = Path::new(arg);
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());
        match extension.as_deref() {
            Some("json") if path.is_file() => Self::from_path(path),
            Some("zip") => Ok(Self::new(CorpusKind::Archive, Some(path.to_path_buf()))
                .with_tokenized(tokenized)),
            _ => Ok(Self::new(CorpusKind::Files, Some(path.to_path_buf()))
                .with_tokenized(tokenized)),
        }
    }

    fn path(&self) -> Result<&Path, Error> {
        self.path
            .as_deref()
            .ok_or_else(|| Error::Custom(format!("{:?} corpus without a path", self.kind)))
    }

    /// Text corpus of stream-backed texts.
    pub fn build(&self) -> Result<Arc<dyn TextCorpus>, Error> {
        let parser: Arc<dyn RowParser<Row = TextRow>> =
            Arc::new(LineRowParser::new(self.tokenized, self.encoding));
        let corpus = match self.kind {
            CorpusKind::Files => {
                let path = self.path()?;
                if path.is_dir() {
                    DictionaryTextCorpus::from_container(
                        &DirectoryContainer::new(path),
                        parser,
                        self.tokenized,
                    )?
                } else {
                    DictionaryTextCorpus::from_glob(&path.to_string_lossy(), parser, self.tokenized)?
                }
            }
            CorpusKind::Archive => DictionaryTextCorpus::from_container(
                &ZipContainer::open(self.path()?)?,
                parser,
                self.tokenized,
            )?,
            CorpusKind::Memory => {
                let mut container = MemoryContainer::default();
                for (id, text) in &self.texts {
                    container.insert(id, self.encoding.encode(text));
                }
                DictionaryTextCorpus::from_container(&container, parser, self.tokenized)?
            }
        };
        Ok(Arc::new(corpus))
    }
}
