//! Alignment files: one `ref\tpairs` (or bare `pairs`) line per row.
use std::io::{BufRead, BufReader, Read};

use super::RowParser;
use crate::error::{Error, MalformedSource};
use crate::refs::RowRef;
use crate::rows::{AlignedWordPair, AlignmentRow, Rows};

#[derive(Debug, Clone, Copy, Default)]
pub struct AlignmentLineParser;

impl RowParser for AlignmentLineParser {
    type Row = AlignmentRow;

    fn parse(&self, text_id: &str, reader: Box<dyn Read>) -> Rows<'static, AlignmentRow> {
        let text_id = text_id.to_string();
        Box::new(
            BufReader::new(reader)
                .lines()
                .enumerate()
                .map(move |(idx, line)| parse_line(&text_id, idx + 1, &line?)),
        )
    }
}

fn parse_line(text_id: &str, line_no: usize, line: &str) -> Result<AlignmentRow, Error> {
    let malformed = |message: String| -> Error {
        MalformedSource {
            text_id: text_id.to_string(),
            line: line_no,
            message,
        }
        .into()
    };

    let line = line.trim_end_matches('\r');
    let (row_ref, pairs) = match line.split_once('\t') {
        Some((key, _)) if key.trim().is_empty() => return Err(malformed("missing ref".into())),
        Some((_, pairs)) if pairs.contains('\t') => {
            return Err(malformed("extraneous tab".into()))
        }
        Some((key, pairs)) => (RowRef::parse(key.trim()), pairs),
        None => (RowRef::Number(line_no as u64), line),
    };
    let pairs = AlignedWordPair::parse_set(pairs).map_err(|e| malformed(e.to_string()))?;
    Ok(AlignmentRow::new(text_id, row_ref, pairs))
}
