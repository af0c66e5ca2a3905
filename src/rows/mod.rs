/*! Row model

Rows are the values corpora yield. Each is located by a text id and a [RowRef]:

- [TextRow]: a segment of text, possibly part of a verse range.
- [AlignmentRow]: word alignments between a source and a target segment.
- [crate::parallel::NParallelTextRow]: a tuple of rows joined across corpora.

Rows are built fresh on each traversal and never mutated afterwards.
!*/
mod alignment;
mod text;

use crate::error::Error;
use crate::refs::RowRef;

pub use alignment::{AlignedWordPair, AlignmentRow, TextAlignment};
pub use text::{TextRow, TextRowFlags};

/// Lazy, fallible row sequence.
pub type Rows<'a, R> = Box<dyn Iterator<Item = Result<R, Error>> + 'a>;

/// Common row capabilities.
pub trait Row {
    fn text_id(&self) -> &str;
    fn row_ref(&self) -> &RowRef;
    /// A row is empty when it has no content.
    fn is_empty(&self) -> bool;
}

/// Values that have a swapped source/target counterpart.
///
/// Inverting twice gives back an equal value.
pub trait Invertible {
    fn invert(&self) -> Self;
}
