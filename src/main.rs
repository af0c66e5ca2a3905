//! # corpora
//!
//! Joins text corpora on their row refs and prints parallel rows.
//!
//! ```sh
//! corpora 0.1.0
//! parallel corpus tool.
//!
//! USAGE:
//!     corpora <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     count       Count the rows of a corpus
//!     help        Prints this message or the help of the given subcommand(s)
//!     parallel    Join two corpora and print their parallel rows
//! ```
//!
//! Corpora are zip archives, directories, glob patterns or json configs (see [corpora::config]).
use std::io::{BufWriter, Write};

use corpora::config::CorpusConfig;
use corpora::corpus::{Corpus, TextCorpus};
use corpora::error::Error;
use corpora::parallel::ParallelTextCorpus;
use corpora::rows::Row;
use itertools::Itertools;
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

fn parallel(p: cli::Parallel) -> Result<(), Error> {
    let source = CorpusConfig::from_arg(&p.src, p.tokenized)?.build()?;
    let target = CorpusConfig::from_arg(&p.trg, p.tokenized)?.build()?;
    info!(
        "joining {} source texts with {} target texts",
        source.text_ids().len(),
        target.text_ids().len()
    );

    let corpus = ParallelTextCorpus::new(source, target)
        .with_all_source_rows(p.all_source_rows)
        .with_all_target_rows(p.all_target_rows);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let (mut written, mut skipped) = (0usize, 0usize);
    for row in corpus.get_rows(None) {
        let row = row?;
        if row.is_empty() && !p.include_empty {
            skipped += 1;
            continue;
        }
        match p.format {
            cli::Format::Tsv => writeln!(
                out,
                "{}\t{}\t{}\t{}",
                row.source_refs().iter().join(","),
                row.target_refs().iter().join(","),
                row.source_text(),
                row.target_text()
            )?,
            cli::Format::Json => writeln!(out, "{}", serde_json::to_string(&row)?)?,
        }
        written += 1;
    }
    out.flush()?;
    info!("{} rows written, {} empty rows skipped", written, skipped);
    Ok(())
}

fn count(c: cli::Count) -> Result<(), Error> {
    let corpus = CorpusConfig::from_arg(&c.src, false)?.build()?;
    let n = corpus.count(c.include_empty, None)?;
    info!("{} texts", corpus.text_ids().len());
    println!("{}", n);
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Corpora::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Corpora::Parallel(p) => parallel(p)?,
        cli::Corpora::Count(c) => count(c)?,
    };
    Ok(())
}
