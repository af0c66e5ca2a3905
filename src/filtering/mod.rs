/*! Filtering utilities

Filters operate on whole texts or on rows, and implement [filter::Filter].
Any `Fn(&T) -> bool` closure is a filter as well.

Filtered corpora never copy their inner rows:
- [FilterTextCorpus] and [FilterAlignmentCorpus] hide whole collections, leaving placeholders behind.
- [FilterRows] drops rows of any corpus, joined ones included.
!*/
mod corpus;
mod filter;
mod row;

pub use corpus::{FilterAlignmentCorpus, FilterRows, FilterTextCorpus};
pub use filter::Filter;
pub use row::{Length, NonEmpty, TextIds};
