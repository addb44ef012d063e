use lexer_framework::{CharSource, FileSource, Position, StringSource};
use std::io::Write;

fn drain(source: &mut impl CharSource) -> Vec<(char, Position)> {
    let mut out = Vec::new();
    while source.has_more_chars() {
        let position = source.position();
        if let Some(ch) = source.next_char() {
            out.push((ch, position));
        }
    }
    out
}

#[test]
fn test_string_source_positions() {
    let mut source = StringSource::new("ab\nc");
    let chars = drain(&mut source);
    assert_eq!(
        chars,
        vec![
            ('a', Position::at(1, 1, 0)),
            ('b', Position::at(1, 2, 1)),
            ('\n', Position::at(1, 3, 2)),
            ('c', Position::at(2, 1, 3)),
        ]
    );
    assert_eq!(source.position(), Position::at(2, 2, 4));
    assert_eq!(source.next_char(), None);
}

#[test]
fn test_string_source_remaining() {
    let mut source = StringSource::new("héllo");
    source.next_char();
    source.next_char();
    assert_eq!(source.remaining(), "llo");
    assert_eq!(source.position().column, 3);
}

#[test]
fn test_string_source_empty() {
    let mut source = StringSource::new("");
    assert!(!source.has_more_chars());
    assert_eq!(source.next_char(), None);
    assert_eq!(source.position(), Position::new());
}

#[test]
fn test_file_source_yields_nothing_before_open() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "xyz").unwrap();

    let mut source = FileSource::new(file.path());
    assert!(!source.has_more_chars());
    assert_eq!(source.next_char(), None);
}

#[test]
fn test_file_source_reads_after_open() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "(define\n42)").unwrap();

    let mut source = FileSource::new(file.path());
    source.open().unwrap();
    let text: String = drain(&mut source).into_iter().map(|(ch, _)| ch).collect();
    assert_eq!(text, "(define\n42)");
    assert_eq!(source.position(), Position::at(2, 4, 11));

    source.close();
    assert!(!source.has_more_chars());
}

#[test]
fn test_file_source_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut source = FileSource::new(dir.path().join("missing.txt"));
    let err = source.open().unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
