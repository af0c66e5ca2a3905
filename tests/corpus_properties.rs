use std::collections::HashSet;
use std::sync::Arc;

use corpora::corpus::{
    AlignmentCollection, AlignmentCorpus, Corpus, DictionaryAlignmentCorpus,
    DictionaryTextCorpus, MemoryAlignmentCollection, MemoryText, MultipleText, StreamText, Text,
    TextAlignmentCorpus, TextCorpus,
};
use corpora::filtering::{FilterRows, FilterTextCorpus, NonEmpty, TextIds};
use corpora::io::reader::{LineRowParser, RowParser};
use corpora::io::{MemoryStreamSource, TextEncoding};
use corpora::parallel::ParallelTextCorpus;
use corpora::refs::RowRef;
use corpora::rows::{AlignedWordPair, AlignmentRow, Invertible, Row, TextAlignment, TextRow};

fn verse(book: &str, chapter: u32, verse: u32, text: &str) -> TextRow {
    TextRow::new(book, RowRef::parse(&format!("{} {}:{}", book, chapter, verse))).with_text(text)
}

fn corpus(texts: Vec<MemoryText>) -> Arc<dyn TextCorpus> {
    Arc::new(DictionaryTextCorpus::new(
        texts.into_iter().map(|t| Arc::new(t) as Arc<dyn Text>),
    ))
}

fn stream_text(id: &str, content: &str) -> StreamText {
    let parser: Arc<dyn RowParser<Row = TextRow>> =
        Arc::new(LineRowParser::new(false, TextEncoding::Utf8));
    StreamText::new(
        id,
        Arc::new(MemoryStreamSource::from_text(content, TextEncoding::Utf8)),
        parser,
    )
}

#[test]
fn alignment_invert_is_an_involution() {
    let row = AlignmentRow::new(
        "MAT",
        RowRef::parse("MAT 1:1"),
        vec![
            AlignedWordPair::new(0, 1),
            AlignedWordPair::new(2, 0),
            AlignedWordPair::new(3, 3),
        ],
    );
    let inverted = row.invert();
    assert_ne!(inverted, row);
    assert_eq!(inverted.invert(), row);
    assert!(inverted.aligned_word_pairs().contains(&AlignedWordPair::new(1, 0)));

    let alignment = TextAlignment::new("MAT", RowRef::parse("MAT 1:1"), vec![(0, 1), (0, 1), (4, 2)]);
    assert_eq!(alignment.invert().invert(), alignment);
    assert_eq!(alignment.invert().pairs(), &[(1, 0), (1, 0), (2, 4)]);
}

#[test]
fn invert_keeps_emptiness() {
    let empty = AlignmentRow::new("MAT", RowRef::from(1u64), vec![]);
    let full = AlignmentRow::new("MAT", RowRef::from(2u64), vec![AlignedWordPair::new(0, 0)]);
    assert!(empty.is_empty() && empty.invert().is_empty());
    assert!(!full.is_empty() && !full.invert().is_empty());

    let corpus = DictionaryAlignmentCorpus::new(vec![Arc::new(MemoryAlignmentCollection::new(
        "MAT",
        vec![empty, full],
    )) as Arc<dyn AlignmentCollection>]);
    let inverted = corpus.invert();
    assert_eq!(inverted.text_ids(), corpus.text_ids());
    assert_eq!(inverted.count(true, None).unwrap(), 2);
    assert_eq!(inverted.count(false, None).unwrap(), 1);

    let view = TextAlignmentCorpus::from_alignment_corpus(&inverted);
    let rows: Vec<_> = view.get_rows(None).collect::<Result<_, _>>().unwrap();
    assert!(rows[0].is_empty());
    assert_eq!(rows[1].pairs(), &[(0, 0)]);
}

#[test]
fn count_matches_rows() {
    let source = corpus(vec![MemoryText::scripture(
        "MAT",
        vec![
            verse("MAT", 1, 1, "Book of the genealogy"),
            verse("MAT", 1, 2, ""),
            verse("MAT", 1, 3, "and Judah"),
        ],
    )]);
    let target = corpus(vec![MemoryText::scripture(
        "MAT",
        vec![
            verse("MAT", 1, 1, "Livre de la genealogie"),
            verse("MAT", 1, 2, "Abraham engendra Isaac"),
            verse("MAT", 1, 4, "Aram engendra Aminadab"),
        ],
    )]);

    for corpus in [source.clone(), target.clone()] {
        let rows: Vec<_> = corpus.get_rows(None).collect::<Result<_, _>>().unwrap();
        let non_empty = rows.iter().filter(|r| !r.is_empty()).count();
        assert_eq!(corpus.count(true, None).unwrap(), rows.len());
        assert_eq!(corpus.count(false, None).unwrap(), non_empty);
    }

    let parallel = ParallelTextCorpus::new(source, target)
        .with_all_source_rows(true)
        .with_all_target_rows(true);
    let rows: Vec<_> = parallel.get_rows(None).collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(parallel.count(true, None).unwrap(), 4);
    assert_eq!(parallel.count(false, None).unwrap(), 1);
    assert!(parallel.count(false, None).unwrap() <= parallel.count(true, None).unwrap());

    let non_empty = FilterRows::new(parallel, NonEmpty);
    assert_eq!(non_empty.count(true, None).unwrap(), 1);
}

#[test]
fn filtered_text_is_a_placeholder() {
    let inner = corpus(vec![
        MemoryText::scripture("MAT", vec![verse("MAT", 1, 1, "genealogy")]),
        MemoryText::scripture("MRK", vec![verse("MRK", 1, 1, "beginning")]),
    ]);
    let filtered = FilterTextCorpus::new(inner.clone(), TextIds::new(["MAT"]));

    let hidden = filtered.text("MRK");
    assert!(!hidden.is_present());
    assert_eq!(hidden.id(), "MRK");
    assert_eq!(hidden.sort_key(), inner.text("MRK").sort_key());
    assert_eq!(hidden.get_rows().count(), 0);

    let kept = filtered.text("MAT");
    assert!(kept.is_present());
    assert_eq!(filtered.text_ids(), vec!["MAT".to_string()]);
    assert_eq!(filtered.count(true, None).unwrap(), 1);
}

#[test]
fn get_rows_is_restartable() {
    let text = stream_text("MAT", "MAT 1:1\tBook of the genealogy\nMAT 1:2\tAbraham\n");
    let first: Vec<_> = text.get_rows().collect::<Result<_, _>>().unwrap();
    let second: Vec<_> = text.get_rows().collect::<Result<_, _>>().unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);

    let corpus = DictionaryTextCorpus::new(vec![Arc::new(text) as Arc<dyn Text>]);
    let ids: HashSet<String> = ["MAT".to_string()].into_iter().collect();
    let first: Vec<_> = corpus.get_rows(Some(&ids)).collect::<Result<_, _>>().unwrap();
    let second: Vec<_> = corpus.get_rows(Some(&ids)).collect::<Result<_, _>>().unwrap();
    assert_eq!(first, second);
}

#[test]
fn multiple_text_namespaces_ids() {
    let inner: Arc<dyn Text> = Arc::new(stream_text("MAT", "first\nsecond\n"));
    let text = MultipleText::new("en", inner.clone());
    assert_eq!(text.id(), "en_MAT");
    assert_eq!(text.sort_key(), "en_MAT");

    let rows: Vec<_> = text.get_rows().collect::<Result<_, _>>().unwrap();
    let inner_rows: Vec<_> = inner.get_rows().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows, inner_rows);
    assert_eq!(rows[0].text_id(), "MAT");
}
