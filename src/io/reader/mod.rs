/*! Row parsers

Parsers turn a byte stream into a lazy sequence of rows. They know nothing about where the bytes come
from, so the same parser reads files, archive entries and memory buffers.

- [LineRowParser]: one [crate::rows::TextRow] per line.
- [AlignmentLineParser]: one [crate::rows::AlignmentRow] per line.
!*/
mod alignreader;
mod textreader;

use std::io::Read;

use crate::rows::Rows;

pub use alignreader::AlignmentLineParser;
pub use textreader::LineRowParser;

/// Parses a stream into rows of a given text.
///
/// The returned rows own the stream and do not borrow the parser.
pub trait RowParser: Send + Sync {
    type Row;

    fn parse(&self, text_id: &str, reader: Box<dyn Read>) -> Rows<'static, Self::Row>;
}
