//! Command line arguments and parameters management/parsing.
use std::str::FromStr;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "corpora", about = "parallel corpus tool.")]
/// Holds every command that is callable by the `corpora` command.
pub enum Corpora {
    #[structopt(about = "Join two corpora and print their parallel rows")]
    Parallel(Parallel),
    #[structopt(about = "Count the rows of a corpus")]
    Count(Count),
}

/// Output format of joined rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Tsv,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tsv" => Ok(Format::Tsv),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown format {} (expected tsv or json)", other)),
        }
    }
}

#[derive(Debug, StructOpt)]
/// Parallel command and parameters.
///
/// ```sh
/// corpora-parallel 0.1.0
/// Join two corpora and print their parallel rows
///
/// USAGE:
///     corpora parallel [FLAGS] [OPTIONS] <src> <trg>
///
/// FLAGS:
///         --all-source-rows    keep source rows without a target row
///         --all-target-rows    keep target rows without a source row
///     -e, --include-empty      print rows with an empty side
///     -t, --tokenized          corpora are tokenized
///
/// OPTIONS:
///     -f, --format <format>    output format (tsv or json) [default: tsv]
///
/// ARGS:
///     <src>    source corpus (zip archive, directory, glob pattern, file or json config)
///     <trg>    target corpus
/// ```
pub struct Parallel {
    #[structopt(
        help = "source corpus (zip archive, directory, glob pattern, file or json config)"
    )]
    pub src: String,
    #[structopt(help = "target corpus")]
    pub trg: String,
    #[structopt(long = "all-source-rows", help = "keep source rows without a target row")]
    pub all_source_rows: bool,
    #[structopt(long = "all-target-rows", help = "keep target rows without a source row")]
    pub all_target_rows: bool,
    #[structopt(short = "t", long = "tokenized", help = "corpora are tokenized")]
    pub tokenized: bool,
    #[structopt(
        short = "f",
        long = "format",
        default_value = "tsv",
        help = "output format (tsv or json)"
    )]
    pub format: Format,
    #[structopt(short = "e", long = "include-empty", help = "print rows with an empty side")]
    pub include_empty: bool,
}

#[derive(Debug, StructOpt)]
/// Count command and parameters.
pub struct Count {
    #[structopt(help = "corpus (zip archive, directory, glob pattern, file or json config)")]
    pub src: String,
    #[structopt(short = "e", long = "include-empty", help = "count empty rows")]
    pub include_empty: bool,
}
