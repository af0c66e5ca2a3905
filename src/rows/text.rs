//! Text rows.
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::Row;
use crate::error::Error;
use crate::refs::RowRef;

/// Position of a row relative to sentences and verse ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRowFlags(u8);

impl TextRowFlags {
    pub const NONE: TextRowFlags = TextRowFlags(0);
    pub const SENTENCE_START: TextRowFlags = TextRowFlags(1);
    pub const IN_RANGE: TextRowFlags = TextRowFlags(1 << 1);
    pub const RANGE_START: TextRowFlags = TextRowFlags(1 << 2);

    pub fn contains(self, other: TextRowFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for TextRowFlags {
    fn default() -> Self {
        TextRowFlags::SENTENCE_START
    }
}

impl BitOr for TextRowFlags {
    type Output = TextRowFlags;

    fn bitor(self, rhs: TextRowFlags) -> TextRowFlags {
        TextRowFlags(self.0 | rhs.0)
    }
}

const FLAG_NAMES: [(TextRowFlags, &str); 3] = [
    (TextRowFlags::SENTENCE_START, "ss"),
    (TextRowFlags::IN_RANGE, "ir"),
    (TextRowFlags::RANGE_START, "rs"),
];

/// Comma separated flag names (`ss,ir,rs`).
impl fmt::Display for TextRowFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = FLAG_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", names.join(","))
    }
}

impl FromStr for TextRowFlags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .try_fold(TextRowFlags::NONE, |acc, name| {
                FLAG_NAMES
                    .iter()
                    .find(|(_, n)| *n == name)
                    .map(|(flag, _)| acc | *flag)
                    .ok_or_else(|| Error::Custom(format!("unknown row flag {:?}", name)))
            })
    }
}

impl Serialize for TextRowFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A segment of text, possibly tokenized.
///
/// Untokenized segments hold the whole text as a single element.
/// Empty segments hold nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRow {
    text_id: String,
    row_ref: RowRef,
    segment: Vec<String>,
    flags: TextRowFlags,
}

impl TextRow {
    /// Creates an empty sentence-start row.
    pub fn new(text_id: &str, row_ref: RowRef) -> Self {
        Self {
            text_id: text_id.to_string(),
            row_ref,
            segment: Vec::new(),
            flags: TextRowFlags::SENTENCE_START,
        }
    }

    pub fn with_segment(mut self, segment: Vec<String>) -> Self {
        self.segment = segment;
        self
    }

    /// Sets an untokenized segment.
    pub fn with_text(self, text: &str) -> Self {
        if text.is_empty() {
            self.with_segment(Vec::new())
        } else {
            self.with_segment(vec![text.to_string()])
        }
    }

    pub fn with_flags(mut self, flags: TextRowFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn segment(&self) -> &[String] {
        &self.segment
    }

    pub fn into_segment(self) -> Vec<String> {
        self.segment
    }

    pub fn flags(&self) -> TextRowFlags {
        self.flags
    }

    /// Segment joined by single spaces.
    pub fn text(&self) -> String {
        self.segment.join(" ")
    }

    pub fn is_sentence_start(&self) -> bool {
        self.flags.contains(TextRowFlags::SENTENCE_START)
    }

    pub fn is_in_range(&self) -> bool {
        self.flags.contains(TextRowFlags::IN_RANGE)
    }

    pub fn is_range_start(&self) -> bool {
        self.flags.contains(TextRowFlags::RANGE_START)
    }
}

impl Row for TextRow {
    fn text_id(&self) -> &str {
        &self.text_id
    }

    fn row_ref(&self) -> &RowRef {
        &self.row_ref
    }

    fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }
}
