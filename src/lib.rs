/*! # corpora

Lazy, ref-ordered views over text and alignment corpora.

Corpora are read from files, directories, zip archives or memory, filtered and transformed
row by row, and joined on their refs into parallel corpora:

```no_run
use corpora::config::CorpusConfig;
use corpora::corpus::Corpus;
use corpora::parallel::ParallelTextCorpus;

let source = CorpusConfig::from_arg("en.zip", false)?.build()?;
let target = CorpusConfig::from_arg("fr", false)?.build()?;
let parallel = ParallelTextCorpus::new(source, target).with_all_source_rows(true);
for row in parallel.get_rows(None) {
    let row = row?;
    println!("{}\t{}", row.source_text(), row.target_text());
}
# Ok::<(), corpora::error::Error>(())
```
!*/
#[macro_use]
extern crate log;

pub mod config;
pub mod corpus;
pub mod error;
pub mod filtering;
pub mod io;
pub mod parallel;
pub mod refs;
pub mod rows;
pub mod transformers;
