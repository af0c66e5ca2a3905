//! Named stream containers: directories, archives and in-memory bundles.
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::archive::{ZipArchiveHandle, ZipEntryStreamSource};
use super::source::{FileStreamSource, MemoryStreamSource, StreamSource};
use crate::error::Error;

/// Set of named streams.
///
/// [StreamContainer::exists] lets callers tell a missing entry apart from an unreadable one.
pub trait StreamContainer: Send + Sync {
    fn exists(&self, name: &str) -> bool;

    /// Source over the entry `name`. Absence is only reported when opening.
    fn source(&self, name: &str) -> Arc<dyn StreamSource>;

    /// Entry names, in container order.
    fn entry_names(&self) -> Result<Vec<String>, Error>;

    fn open(&self, name: &str) -> Result<Box<dyn Read>, Error> {
        self.source(name).open()
    }
}

/// Files of a directory (not recursive).
#[derive(Debug, Clone)]
pub struct DirectoryContainer {
    root: PathBuf,
}

impl DirectoryContainer {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl StreamContainer for DirectoryContainer {
    fn exists(&self, name: &str) -> bool {
        self.root.join(name).is_file()
    }

    fn source(&self, name: &str) -> Arc<dyn StreamSource> {
        Arc::new(FileStreamSource::new(&self.root.join(name)))
    }

    fn entry_names(&self) -> Result<Vec<String>, Error> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Entries of a zip archive.
#[derive(Debug, Clone)]
pub struct ZipContainer {
    handle: ZipArchiveHandle,
}

impl ZipContainer {
    pub fn open(path: &Path) -> Result<Self, Error> {
        Ok(Self {
            handle: ZipArchiveHandle::open(path)?,
        })
    }

    pub fn handle(&self) -> &ZipArchiveHandle {
        &self.handle
    }

    pub fn close(&self) {
        self.handle.close()
    }
}

impl StreamContainer for ZipContainer {
    fn exists(&self, name: &str) -> bool {
        self.handle.exists(name)
    }

    fn source(&self, name: &str) -> Arc<dyn StreamSource> {
        Arc::new(ZipEntryStreamSource::new(self.handle.clone(), name))
    }

    fn entry_names(&self) -> Result<Vec<String>, Error> {
        self.handle.entry_names()
    }
}

/// Named byte buffers.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryContainer {
    pub fn insert(&mut self, name: &str, bytes: Vec<u8>) -> &mut Self {
        self.entries.insert(name.to_string(), bytes);
        self
    }
}

impl StreamContainer for MemoryContainer {
    fn exists(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn source(&self, name: &str) -> Arc<dyn StreamSource> {
        match self.entries.get(name) {
            Some(bytes) => Arc::new(MemoryStreamSource::new(bytes.clone())),
            None => Arc::new(MissingSource(name.to_string())),
        }
    }

    fn entry_names(&self) -> Result<Vec<String>, Error> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// Source of an entry that is not in its container.
struct MissingSource(String);

impl StreamSource for MissingSource {
    fn open(&self) -> Result<Box<dyn Read>, Error> {
        Err(Error::NotFound(self.0.clone()))
    }

    fn location(&self) -> String {
        self.0.clone()
    }
}
