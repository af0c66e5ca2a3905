/*! Row references.

Every row is located in its collection by a [RowRef]. Refs of the same kind are totally ordered,
refs of different kinds cannot be compared: doing so yields [crate::error::RefMismatch].
!*/
mod scripture;

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{Error, RefMismatch};

pub use scripture::{book_id, book_number, scripture_sort_key, ScriptureElement, ScriptureRef};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowRef {
    /// Positional ref (line number, integer key).
    Number(u64),
    /// User-defined ref.
    Key(String),
    Scripture(ScriptureRef),
}

impl RowRef {
    /// Guesses the ref kind from its textual form.
    ///
    /// `GEN 1:1` is a scripture ref, `12` a number, anything else a key.
    pub fn parse(s: &str) -> Self {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = s.parse() {
                return RowRef::Number(n);
            }
        }
        match ScriptureRef::parse(s) {
            Ok(r) => RowRef::Scripture(r),
            Err(_) => RowRef::Key(s.to_string()),
        }
    }

    /// Orders two refs, failing if their kinds differ.
    ///
    /// Scripture refs are compared without verse segments.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, Error> {
        match (self, other) {
            (RowRef::Number(a), RowRef::Number(b)) => Ok(a.cmp(b)),
            (RowRef::Key(a), RowRef::Key(b)) => Ok(a.cmp(b)),
            (RowRef::Scripture(a), RowRef::Scripture(b)) => Ok(a.compare(b, false)),
            (a, b) => Err(RefMismatch::new(vec![a.to_string(), b.to_string()]).into()),
        }
    }

    pub fn as_scripture(&self) -> Option<&ScriptureRef> {
        match self {
            RowRef::Scripture(r) => Some(r),
            _ => None,
        }
    }
}

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRef::Number(n) => write!(f, "{}", n),
            RowRef::Key(k) => write!(f, "{}", k),
            RowRef::Scripture(r) => r.fmt(f),
        }
    }
}

impl Serialize for RowRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<u64> for RowRef {
    fn from(n: u64) -> Self {
        RowRef::Number(n)
    }
}

impl From<&str> for RowRef {
    fn from(s: &str) -> Self {
        RowRef::parse(s)
    }
}

impl From<ScriptureRef> for RowRef {
    fn from(r: ScriptureRef) -> Self {
        RowRef::Scripture(r)
    }
}
