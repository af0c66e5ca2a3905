//! Error enum
use std::fmt;
use std::path::PathBuf;

use crate::rows::{Row, TextRow};

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// A file or archive entry that does not exist.
    NotFound(String),
    Zip(zip::result::ZipError),
    /// An archive was used after [crate::io::ZipArchiveHandle::close].
    ArchiveClosed(PathBuf),
    RefMismatch(RefMismatch),
    MalformedSource(MalformedSource),
    Handler(HandlerFailure),
    /// A join hit a gap in a corpus that does not allow missing rows.
    MissingRow {
        text_id: String,
        row_ref: String,
    },
    InvalidRef(String),
    Serde(serde_json::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    Custom(String),
}

/// Refs of incompatible formats were compared during a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefMismatch {
    refs: Vec<String>,
}

impl RefMismatch {
    pub fn new(refs: Vec<String>) -> Self {
        Self { refs }
    }

    pub fn refs(&self) -> &[String] {
        &self.refs
    }
}

impl fmt::Display for RefMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = self.refs.join(" and ");
        let quoted = self
            .refs
            .iter()
            .map(|r| format!("\"{}\"", r))
            .collect::<Vec<_>>()
            .join(" and ");
        write!(
            f,
            "Invalid format in {}. Mismatched key formats {}. There may be an extraneous tab, missing ref, or inconsistent use of user-defined refs.",
            plain, quoted
        )
    }
}

/// A parser could not make sense of its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedSource {
    pub text_id: String,
    pub line: usize,
    pub message: String,
}

impl fmt::Display for MalformedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malformed source in {} at line {}: {}",
            self.text_id, self.line, self.message
        )
    }
}

/// A row transform failed. Holds the row it failed on.
#[derive(Debug)]
pub struct HandlerFailure {
    row: TextRow,
    source: Box<Error>,
}

impl HandlerFailure {
    pub fn new(row: TextRow, source: Error) -> Self {
        Self {
            row,
            source: Box::new(source),
        }
    }

    pub fn row(&self) -> &TextRow {
        &self.row
    }

    pub fn inner(&self) -> &Error {
        &self.source
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::NotFound(name) => write!(f, "not found: {}", name),
            Error::Zip(e) => write!(f, "archive error: {}", e),
            Error::ArchiveClosed(path) => write!(f, "archive {:?} is closed", path),
            Error::RefMismatch(e) => e.fmt(f),
            Error::MalformedSource(e) => e.fmt(f),
            Error::Handler(e) => write!(
                f,
                "an error occurred while processing the row {} in {}: {}",
                e.row.row_ref(),
                e.row.text_id(),
                e.source
            ),
            Error::MissingRow { text_id, row_ref } => {
                write!(f, "missing row {} in {}", row_ref, text_id)
            }
            Error::InvalidRef(r) => write!(f, "invalid ref: {}", r),
            Error::Serde(e) => write!(f, "serialization error: {}", e),
            Error::Glob(e) => write!(f, "glob error: {}", e),
            Error::GlobPattern(e) => write!(f, "glob pattern error: {}", e),
            Error::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Zip(e) => Some(e),
            Error::Handler(e) => Some(e.source.as_ref()),
            Error::Serde(e) => Some(e),
            Error::Glob(e) => Some(e),
            Error::GlobPattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Error {
        match e {
            zip::result::ZipError::FileNotFound => Error::NotFound("archive entry".to_string()),
            e => Error::Zip(e),
        }
    }
}

impl From<RefMismatch> for Error {
    fn from(e: RefMismatch) -> Error {
        Error::RefMismatch(e)
    }
}

impl From<MalformedSource> for Error {
    fn from(e: MalformedSource) -> Error {
        Error::MalformedSource(e)
    }
}

impl From<HandlerFailure> for Error {
    fn from(e: HandlerFailure) -> Error {
        Error::Handler(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}
