/*! Zip archive access.

A [ZipArchiveHandle] owns an opened archive and can be cloned and shared by any number of
[ZipEntryStreamSource]. Closing the handle releases the archive once for every clone, and
streams still open on one of its entries fail on their next read.
!*/
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use zip::result::ZipError;
use zip::ZipArchive;

use super::source::{open_file, StreamSource};
use crate::error::Error;

/// Upper bound on the buffer reserved from an entry's declared size.
const MAX_PREALLOC: u64 = 1 << 20;

type SharedArchive = Arc<Mutex<Option<ZipArchive<std::fs::File>>>>;

#[derive(Clone)]
pub struct ZipArchiveHandle {
    path: PathBuf,
    inner: SharedArchive,
}

impl std::fmt::Debug for ZipArchiveHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipArchiveHandle")
            .field("path", &self.path)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl ZipArchiveHandle {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let file = open_file(path)?;
        let archive = ZipArchive::new(file)?;
        debug!("opened archive {:?} ({} entries)", path, archive.len());
        Ok(Self {
            path: path.to_path_buf(),
            inner: Arc::new(Mutex::new(Some(archive))),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `f` on the archive, failing if it has been closed.
    fn with_archive<T>(
        &self,
        f: impl FnOnce(&mut ZipArchive<std::fs::File>) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| Error::Custom(format!("archive {:?}: poisoned lock", self.path)))?;
        match guard.as_mut() {
            Some(archive) => f(archive),
            None => {
                warn!("access to closed archive {:?}", self.path);
                Err(Error::ArchiveClosed(self.path.clone()))
            }
        }
    }

    /// Whether `name` is an entry of the archive. A closed archive has no entries.
    pub fn exists(&self, name: &str) -> bool {
        self.with_archive(|archive| Ok(archive.file_names().any(|n| n == name)))
            .unwrap_or(false)
    }

    /// File entries, in archive order.
    pub fn entry_names(&self) -> Result<Vec<String>, Error> {
        self.with_archive(|archive| {
            let mut names = Vec::with_capacity(archive.len());
            for idx in 0..archive.len() {
                let entry = archive.by_index_raw(idx)?;
                if !entry.is_dir() {
                    names.push(entry.name().to_string());
                }
            }
            Ok(names)
        })
    }

    /// Decompresses a whole entry.
    pub fn read_entry(&self, name: &str) -> Result<Vec<u8>, Error> {
        self.with_archive(|archive| {
            let mut entry = archive.by_name(name).map_err(|e| match e {
                ZipError::FileNotFound => {
                    Error::NotFound(format!("{}:{}", self.path.display(), name))
                }
                e => Error::Zip(e),
            })?;
            // the header size is untrusted
            let mut bytes = Vec::with_capacity(entry.size().min(MAX_PREALLOC) as usize);
            entry.read_to_end(&mut bytes)?;
            Ok(bytes)
        })
    }

    /// Releases the archive. Later calls are no-ops.
    pub fn close(&self) {
        match self.inner.lock() {
            Ok(mut guard) => {
                if guard.take().is_some() {
                    debug!("closed archive {:?}", self.path);
                }
            }
            Err(_) => error!("could not close archive {:?}: poisoned lock", self.path),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().map(|guard| guard.is_none()).unwrap_or(true)
    }
}

/// Source over one archive entry.
#[derive(Debug, Clone)]
pub struct ZipEntryStreamSource {
    handle: ZipArchiveHandle,
    name: String,
}

impl ZipEntryStreamSource {
    pub fn new(handle: ZipArchiveHandle, name: &str) -> Self {
        Self {
            handle,
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exists(&self) -> bool {
        self.handle.exists(&self.name)
    }
}

impl StreamSource for ZipEntryStreamSource {
    fn open(&self) -> Result<Box<dyn Read>, Error> {
        let bytes = self.handle.read_entry(&self.name)?;
        Ok(Box::new(ZipEntryStream {
            handle: self.handle.clone(),
            cursor: Cursor::new(bytes),
        }))
    }

    fn location(&self) -> String {
        format!("{}:{}", self.handle.path.display(), self.name)
    }
}

/// Substream of an entry. Reads fail once the archive is closed.
struct ZipEntryStream {
    handle: ZipArchiveHandle,
    cursor: Cursor<Vec<u8>>,
}

impl Read for ZipEntryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.handle.is_closed() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("archive {:?} is closed", self.handle.path),
            ));
        }
        self.cursor.read(buf)
    }
}
