/*! Line-oriented text reading.

Each line of the stream is a row, in one of three layouts:

- `segment`: the ref is the 1-based line number.
- `ref\tsegment`
- `ref\tsegment\tflags`, flags being a comma separated list of `ss`, `ir` and `rs`.

Rows without a flags column start a sentence.
!*/
use std::io::{BufRead, BufReader, Lines, Read};

use super::RowParser;
use crate::error::{Error, MalformedSource};
use crate::io::TextEncoding;
use crate::refs::RowRef;
use crate::rows::{Rows, TextRow, TextRowFlags};

#[derive(Debug, Clone, Copy, Default)]
pub struct LineRowParser {
    tokenized: bool,
    encoding: TextEncoding,
}

impl LineRowParser {
    pub fn new(tokenized: bool, encoding: TextEncoding) -> Self {
        Self {
            tokenized,
            encoding,
        }
    }

    pub fn is_tokenized(&self) -> bool {
        self.tokenized
    }
}

impl RowParser for LineRowParser {
    type Row = TextRow;

    fn parse(&self, text_id: &str, reader: Box<dyn Read>) -> Rows<'static, TextRow> {
        let reader = BufReader::new(self.encoding.decode(reader));
        Box::new(LineRows {
            text_id: text_id.to_string(),
            lines: reader.lines(),
            line_no: 0,
            tokenized: self.tokenized,
        })
    }
}

/// Reader that yields one [TextRow] per line.
struct LineRows<T> {
    text_id: String,
    lines: Lines<BufReader<T>>,
    line_no: usize,
    tokenized: bool,
}

impl<T> LineRows<T> {
    fn malformed(&self, message: &str) -> Error {
        MalformedSource {
            text_id: self.text_id.clone(),
            line: self.line_no,
            message: message.to_string(),
        }
        .into()
    }

    fn parse_line(&self, line: &str) -> Result<TextRow, Error> {
        // byte order mark
        let line = if self.line_no == 1 {
            line.trim_start_matches('\u{feff}')
        } else {
            line
        };
        let line = line.trim_end_matches('\r');

        let columns: Vec<&str> = line.split('\t').collect();
        let (row_ref, text, flags) = match columns.as_slice() {
            [text] => (
                RowRef::Number(self.line_no as u64),
                *text,
                TextRowFlags::SENTENCE_START,
            ),
            [key, text] => (self.parse_ref(key)?, *text, TextRowFlags::SENTENCE_START),
            [key, text, flags] => (
                self.parse_ref(key)?,
                *text,
                flags
                    .parse()
                    .map_err(|e: Error| self.malformed(&e.to_string()))?,
            ),
            _ => return Err(self.malformed("extraneous tab")),
        };

        let segment = if self.tokenized {
            text.split_whitespace().map(String::from).collect()
        } else if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        };

        Ok(TextRow::new(&self.text_id, row_ref)
            .with_segment(segment)
            .with_flags(flags))
    }

    fn parse_ref(&self, key: &str) -> Result<RowRef, Error> {
        let key = key.trim();
        if key.is_empty() {
            return Err(self.malformed("missing ref"));
        }
        Ok(RowRef::parse(key))
    }
}

impl<T> Iterator for LineRows<T>
where
    T: Read,
{
    type Item = Result<TextRow, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line.map_err(Error::Io).and_then(|l| self.parse_line(&l)))
    }
}
