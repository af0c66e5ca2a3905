//! Scripture references.
//!
//! A scripture ref is a verse reference (`MAT 1:1`) optionally followed by a
//! path locating non-verse content relative to that verse
//! (`MAT 1:1/1:s` is the section header right after verse 1).
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use lazy_static::lazy_static;

use crate::error::Error;

/// Book ids in canonical order. A book's number is its 1-based position.
const BOOK_IDS: &[&str] = &[
    "GEN", "EXO", "LEV", "NUM", "DEU", "JOS", "JDG", "RUT", "1SA", "2SA", "1KI", "2KI", "1CH",
    "2CH", "EZR", "NEH", "EST", "JOB", "PSA", "PRO", "ECC", "SNG", "ISA", "JER", "LAM", "EZK",
    "DAN", "HOS", "JOL", "AMO", "OBA", "JON", "MIC", "NAM", "HAB", "ZEP", "HAG", "ZEC", "MAL",
    "MAT", "MRK", "LUK", "JHN", "ACT", "ROM", "1CO", "2CO", "GAL", "EPH", "PHP", "COL", "1TH",
    "2TH", "1TI", "2TI", "TIT", "PHM", "HEB", "JAS", "1PE", "2PE", "1JN", "2JN", "3JN", "JUD",
    "REV", "TOB", "JDT", "ESG", "WIS", "SIR", "BAR", "LJE", "S3Y", "SUS", "BEL", "1MA", "2MA",
    "3MA", "4MA", "1ES", "2ES", "MAN", "PS2", "ODA", "PSS", "JSA", "JDB", "TBS", "SST", "DNT",
    "BLT", "XXA", "XXB", "XXC", "XXD", "XXE", "XXF", "XXG", "FRT", "BAK", "OTH", "3ES", "EZA",
    "5EZ", "6EZ", "INT", "CNC", "GLO", "TDX", "NDX", "DAG", "PS3", "2BA", "LBA", "JUB", "ENO",
    "1MQ", "2MQ", "3MQ", "REP", "4BA", "LAO",
];

lazy_static! {
    static ref BOOK_NUMBERS: HashMap<&'static str, usize> = BOOK_IDS
        .iter()
        .enumerate()
        .map(|(idx, id)| (*id, idx + 1))
        .collect();
}

/// 1-based canonical number of a book id.
pub fn book_number(book: &str) -> Option<usize> {
    BOOK_NUMBERS.get(book).copied()
}

/// Book id of a canonical number.
pub fn book_id(number: usize) -> Option<&'static str> {
    number.checked_sub(1).and_then(|idx| BOOK_IDS.get(idx)).copied()
}

/// Sort key of a scripture text: its zero-padded book number.
///
/// Unknown books sort after every known one.
pub fn scripture_sort_key(book: &str) -> String {
    format!("{:03}", book_number(book).unwrap_or(999))
}

/// Element of a [ScriptureRef] path. Position 0 means unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScriptureElement {
    position: u32,
    name: String,
}

impl ScriptureElement {
    pub fn new(position: u32, name: &str) -> Self {
        Self {
            position,
            name: name.to_string(),
        }
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ScriptureElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.position == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.position, self.name)
        }
    }
}

/// Verse reference. Equality, hashing and ordering look at verse numbers, so
/// `GEN 1:01` and `GEN 1:1` are the same ref.
#[derive(Debug, Clone)]
pub struct ScriptureRef {
    book: String,
    book_num: usize,
    chapter: u32,
    verse: String,
    verse_num: u32,
    path: Vec<ScriptureElement>,
}

impl ScriptureRef {
    /// Verse reference with an empty path.
    pub fn verse(book: &str, chapter: u32, verse: u32) -> Result<Self, Error> {
        let book_num = book_number(book).ok_or_else(|| Error::InvalidRef(book.to_string()))?;
        Ok(Self {
            book: book.to_string(),
            book_num,
            chapter,
            verse: verse.to_string(),
            verse_num: verse,
            path: Vec::new(),
        })
    }

    /// Parses `BOOK C:V[/pos:name]*`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidRef(s.to_string());
        let mut parts = s.split('/');
        let vref = parts.next().ok_or_else(invalid)?;

        let (book, chapter_verse) = vref.trim().split_once(' ').ok_or_else(invalid)?;
        let book_num = book_number(book).ok_or_else(invalid)?;
        let (chapter, verse) = chapter_verse.split_once(':').ok_or_else(invalid)?;
        let chapter: u32 = chapter.parse().map_err(|_| invalid())?;

        let digits: String = verse.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(invalid());
        }
        let verse_num: u32 = digits.parse().map_err(|_| invalid())?;

        let path = parts
            .map(|part| match part.split_once(':') {
                Some((pos, name)) => pos
                    .parse()
                    .map(|pos| ScriptureElement::new(pos, name))
                    .map_err(|_| invalid()),
                None => Ok(ScriptureElement::new(0, part)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            book: book.to_string(),
            book_num,
            chapter,
            verse: verse.to_string(),
            verse_num,
            path,
        })
    }

    /// Appends a path element.
    pub fn with_element(mut self, position: u32, name: &str) -> Self {
        self.path.push(ScriptureElement::new(position, name));
        self
    }

    pub fn book(&self) -> &str {
        &self.book
    }

    pub fn book_num(&self) -> usize {
        self.book_num
    }

    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    /// Verse as written, segments and ranges included (`1a`, `1-2`).
    pub fn verse_str(&self) -> &str {
        &self.verse
    }

    pub fn verse_num(&self) -> u32 {
        self.verse_num
    }

    pub fn path(&self) -> &[ScriptureElement] {
        &self.path
    }

    /// True for a plain verse: a non-zero verse with no path.
    pub fn is_verse(&self) -> bool {
        self.verse_num != 0 && self.path.is_empty()
    }

    /// Compares two refs. When `compare_segments` is false, `1a` and `1b`
    /// are the same verse.
    pub fn compare(&self, other: &Self, compare_segments: bool) -> Ordering {
        let ord = self
            .book_num
            .cmp(&other.book_num)
            .then(self.chapter.cmp(&other.chapter))
            .then(self.verse_num.cmp(&other.verse_num));
        let ord = if compare_segments {
            ord.then_with(|| self.segment().cmp(other.segment()))
        } else {
            ord
        };
        ord.then_with(|| self.path.cmp(&other.path))
    }

    fn segment(&self) -> &str {
        let end = self
            .verse
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.verse.len());
        &self.verse[end..]
    }
}

impl PartialEq for ScriptureRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScriptureRef {}

impl Hash for ScriptureRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.book_num.hash(state);
        self.chapter.hash(state);
        self.verse_num.hash(state);
        self.segment().hash(state);
        self.path.hash(state);
    }
}

impl PartialOrd for ScriptureRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScriptureRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other, true)
    }
}

impl fmt::Display for ScriptureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)?;
        for element in &self.path {
            write!(f, "/{}", element)?;
        }
        Ok(())
    }
}
