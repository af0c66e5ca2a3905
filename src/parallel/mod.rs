/*! Parallel corpora

Joins of text corpora on their row refs. [NParallelTextCorpus] joins any number of
corpora; [ParallelTextCorpus] is the source/target case.

Rows are joined when every corpus left sits on the same ref. Runs of rows flagged
as in range are folded into a single joined row covering the whole range on every side.
Refs of different kinds stop the join with a [crate::error::RefMismatch].
!*/
mod nparallel;
mod parallel;
mod range;
mod row;

pub use nparallel::NParallelTextCorpus;
pub use parallel::ParallelTextCorpus;
pub use row::{NParallelTextRow, ParallelTextRow};
