//! Stream sources.
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flate2::read::MultiGzDecoder;
use serde::Deserialize;

use crate::error::Error;

/// Opens byte streams over some physical source.
///
/// Each call to [StreamSource::open] gives an independent stream,
/// released when dropped.
pub trait StreamSource: Send + Sync {
    fn open(&self) -> Result<Box<dyn Read>, Error>;

    /// Human readable location, used in logs and errors.
    fn location(&self) -> String;
}

/// Maps a missing path to [Error::NotFound].
pub(crate) fn open_file(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::NotFound(path.display().to_string()),
        _ => Error::Io(e),
    })
}

/// File-backed source.
///
/// Files ending in `.gz` are decompressed with a [MultiGzDecoder].
#[derive(Debug, Clone)]
pub struct FileStreamSource {
    path: PathBuf,
}

impl FileStreamSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_gzipped(&self) -> bool {
        self.path.extension().map_or(false, |ext| ext == "gz")
    }
}

impl StreamSource for FileStreamSource {
    fn open(&self) -> Result<Box<dyn Read>, Error> {
        let file = open_file(&self.path)?;
        debug!("opened {:?}", self.path);
        if self.is_gzipped() {
            Ok(Box::new(MultiGzDecoder::new(file)))
        } else {
            Ok(Box::new(file))
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory source. Opening never fails.
#[derive(Debug, Clone)]
pub struct MemoryStreamSource {
    bytes: Arc<[u8]>,
}

impl MemoryStreamSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Encodes `text` with `encoding`.
    pub fn from_text(text: &str, encoding: TextEncoding) -> Self {
        Self::new(encoding.encode(text))
    }
}

impl StreamSource for MemoryStreamSource {
    fn open(&self) -> Result<Box<dyn Read>, Error> {
        Ok(Box::new(Cursor::new(self.bytes.clone())))
    }

    fn location(&self) -> String {
        format!("<memory: {} bytes>", self.bytes.len())
    }
}

/// Text encodings the parsers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-16le")]
    Utf16Le,
    #[serde(rename = "utf-16be")]
    Utf16Be,
}

impl TextEncoding {
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            TextEncoding::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        }
    }

    /// Wraps `reader` so that it yields UTF-8.
    pub fn decode(self, reader: Box<dyn Read>) -> Box<dyn Read> {
        match self {
            TextEncoding::Utf8 => reader,
            TextEncoding::Utf16Le => Box::new(Utf16Decoder::new(reader, true)),
            TextEncoding::Utf16Be => Box::new(Utf16Decoder::new(reader, false)),
        }
    }
}

/// Streaming UTF-16 to UTF-8 conversion.
struct Utf16Decoder<R> {
    inner: R,
    little_endian: bool,
    raw: Vec<u8>,
    out: Vec<u8>,
    out_pos: usize,
    eof: bool,
}

impl<R: Read> Utf16Decoder<R> {
    fn new(inner: R, little_endian: bool) -> Self {
        Self {
            inner,
            little_endian,
            raw: Vec::new(),
            out: Vec::new(),
            out_pos: 0,
            eof: false,
        }
    }

    fn fill(&mut self) -> io::Result<()> {
        self.out.clear();
        self.out_pos = 0;

        let mut chunk = [0u8; 4096];
        let n = self.inner.read(&mut chunk)?;
        if n == 0 {
            self.eof = true;
            if !self.raw.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "truncated utf-16 stream",
                ));
            }
            return Ok(());
        }
        self.raw.extend_from_slice(&chunk[..n]);

        let mut consumed = self.raw.len() & !1;
        let mut units: Vec<u16> = self.raw[..consumed]
            .chunks_exact(2)
            .map(|b| {
                if self.little_endian {
                    u16::from_le_bytes([b[0], b[1]])
                } else {
                    u16::from_be_bytes([b[0], b[1]])
                }
            })
            .collect();

        // a high surrogate waits for its pair
        if matches!(units.last().copied(), Some(0xD800..=0xDBFF)) {
            units.pop();
            consumed -= 2;
        }

        for c in char::decode_utf16(units) {
            let c = c.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let mut buf = [0u8; 4];
            self.out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
        self.raw.drain(..consumed);
        Ok(())
    }
}

impl<R: Read> Read for Utf16Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.out_pos >= self.out.len() {
            if self.eof {
                return Ok(0);
            }
            self.fill()?;
        }
        let n = buf.len().min(self.out.len() - self.out_pos);
        buf[..n].copy_from_slice(&self.out[self.out_pos..self.out_pos + n]);
        self.out_pos += n;
        Ok(n)
    }
}
