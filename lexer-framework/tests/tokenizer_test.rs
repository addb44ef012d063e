use lexer_framework::{
    FileSource, Lexer, LexerError, Position, StringSource, Token, TokenInput, TERMINAL,
};
use pretty_assertions::assert_eq;
use std::io::Write;
use test_log::test;

fn sexpr_lexer() -> Lexer {
    let mut lexer = Lexer::new();
    lexer
        .add_comment_type("--", "\n")
        .add_nested_comment_type("(*", "*)")
        .add_string_type("\"", Some("\\\""))
        .add_symbol("(", "PAR_OPEN")
        .add_symbol(")", "PAR_CLOSE")
        .add_symbol("-", "MINUS")
        .add_terminal(r"[a-z][a-z0-9\-]*", "ID")
        .add_terminal(r"[1-9]\d*", "NUM")
        .add_keyword("define")
        .add_keyword("not");
    lexer
}

fn types(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(Token::token_type).collect()
}

#[test]
fn test_sexpr_program() {
    let code = "-- This is a comment\n\
                (define answer 42)\n\
                (define a-name \"Tho\\\"mas\")\n\
                (define another-name a-name)";

    let tokens = sexpr_lexer().tokenize(code).unwrap();

    assert_eq!(
        types(&tokens),
        vec![
            "PAR_OPEN", "DEFINE", "ID", "NUM", "PAR_CLOSE", //
            "PAR_OPEN", "DEFINE", "ID", "STRING", "PAR_CLOSE", //
            "PAR_OPEN", "DEFINE", "ID", "ID", "PAR_CLOSE",
        ]
    );
    assert_eq!(tokens[7].content(), "a-name");
    assert_eq!(tokens[8].content(), "\"Tho\\\"mas\"");
    assert_eq!(tokens[13].content(), "a-name");
}

#[test]
fn test_symbol_order_does_not_split_identifiers() {
    let mut lexer = Lexer::new();
    lexer
        .add_symbol("-", "MINUS")
        .add_symbol("(", "PAR_OPEN")
        .add_symbol(")", "PAR_CLOSE")
        .add_terminal(r"[a-z][a-z0-9\-]*", "ID");

    let tokens = lexer.tokenize("(define a-name)").unwrap();
    let listed: Vec<_> = tokens
        .iter()
        .map(|t| format!("{}:{}", t.token_type(), t.content()))
        .collect();
    assert_eq!(
        listed,
        vec!["PAR_OPEN:(", "ID:define", "ID:a-name", "PAR_CLOSE:)"]
    );
}

#[test]
fn test_token_positions() {
    let tokens = sexpr_lexer().tokenize("-- c\n(define answer 42)").unwrap();

    assert_eq!(tokens[0].start(), Position::at(2, 1, 5));
    assert_eq!(tokens[0].end(), Position::at(2, 1, 5));

    let answer = &tokens[2];
    assert_eq!(answer.content(), "answer");
    assert_eq!(answer.start(), Position::at(2, 9, 13));
    assert_eq!(answer.end(), Position::at(2, 14, 18));
}

#[test]
fn test_case_sensitivity() {
    let mut lexer = sexpr_lexer();
    let code = "(DEFINE whoami \"alterego\")";

    let tokens = lexer.tokenize(code).unwrap();
    assert_eq!(tokens.len(), 5);
    assert!(tokens[1].matches_type(TERMINAL));

    lexer.set_case_sensitive(false);
    let tokens = lexer.tokenize(code).unwrap();
    assert_eq!(tokens.len(), 5);
    assert!(tokens[1].matches_type("DEFINE"));
    assert_eq!(tokens[1].content(), "DEFINE");
}

#[test]
fn test_nested_comment_yields_nothing() {
    let tokens = sexpr_lexer().tokenize("(* a (* b *) c *)").unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn test_nested_comment_before_code() {
    let code = "(* \nthis is a (*nested*) comment\n*)\n(define answer 42)";
    let tokens = sexpr_lexer().tokenize(code).unwrap();
    assert_eq!(
        types(&tokens),
        vec!["PAR_OPEN", "DEFINE", "ID", "NUM", "PAR_CLOSE"]
    );
    assert_eq!(tokens[0].start().line, 4);
}

#[test]
fn test_flat_comment_closes_at_first_end() {
    let mut lexer = Lexer::new();
    lexer.add_comment_type("/*", "*/");

    let tokens = lexer.tokenize("/* a /* b */ c */").unwrap();
    let contents: Vec<_> = tokens.iter().map(Token::content).collect();
    assert_eq!(contents, vec!["c", "*/"]);
}

#[test]
fn test_comment_closes_span() {
    let tokens = sexpr_lexer().tokenize("answer-- trailing\n42").unwrap();
    assert_eq!(types(&tokens), vec!["ID", "NUM"]);
}

#[test]
fn test_unterminated_comment_is_dropped() {
    let tokens = sexpr_lexer().tokenize("answer (* never closed").unwrap();
    assert_eq!(types(&tokens), vec!["ID"]);
}

#[test]
fn test_unterminated_string_is_dropped() {
    let tokens = sexpr_lexer().tokenize("(define s \"open").unwrap();
    assert_eq!(types(&tokens), vec!["PAR_OPEN", "DEFINE", "ID"]);
}

#[test]
fn test_escape_is_not_a_terminator() {
    let mut lexer = Lexer::new();
    lexer.add_string_type("'", Some("''"));

    let tokens = lexer.tokenize("'it''s' x").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].content(), "'it''s'");
    assert_eq!(tokens[0].token_type(), "STRING");
    assert_eq!(tokens[1].content(), "x");
}

#[test]
fn test_string_closes_span_and_keeps_whitespace() {
    let mut lexer = Lexer::new();
    lexer.add_named_string_type("TEXT", "\"", None);

    let tokens = lexer.tokenize("say\"  hello  \"now").unwrap();
    let contents: Vec<_> = tokens.iter().map(Token::content).collect();
    assert_eq!(contents, vec!["say", "\"  hello  \"", "now"]);
    assert_eq!(tokens[1].token_type(), "TEXT");
}

#[test]
fn test_keywords_never_apply_to_strings() {
    let mut lexer = Lexer::new();
    lexer
        .add_string_type("'", None)
        .add_keyword("'define'")
        .add_keyword("define");

    let tokens = lexer.tokenize("'define' define").unwrap();
    assert_eq!(types(&tokens), vec!["STRING", "DEFINE"]);
}

#[test]
fn test_multi_type_keyword_is_added() {
    let mut lexer = Lexer::new();
    lexer
        .set_multi_type_tokens(true)
        .add_terminal("[a-z]+", "ID")
        .add_keyword("or");

    let tokens = lexer.tokenize("a or b").unwrap();
    let or: Vec<_> = tokens[1].types().collect();
    assert_eq!(or, vec!["ID", "OR"]);
    assert!(tokens[0].matches_type("ID"));
    assert!(!tokens[0].matches_type("OR"));
}

#[test]
fn test_single_type_keyword_replaces() {
    let mut lexer = Lexer::new();
    lexer.add_terminal("[a-z]+", "ID").add_keyword("or");

    let tokens = lexer.tokenize("a or b").unwrap();
    assert_eq!(types(&tokens), vec!["ID", "OR", "ID"]);
    assert_eq!(tokens[1].types().count(), 1);
}

#[test]
fn test_custom_whitespace() {
    let mut lexer = Lexer::new();
    lexer.set_whitespace(",;");

    let tokens = lexer.tokenize("a,b;;c d").unwrap();
    let contents: Vec<_> = tokens.iter().map(Token::content).collect();
    assert_eq!(contents, vec!["a", "b", "c d"]);
}

#[test]
fn test_round_trip_reconstructs_text() {
    let code = "-- header\n(define  x \"a \\\" b\")\n(* c (* d *) *)\t(not   y-z)\n";
    let tokens = sexpr_lexer().tokenize(code).unwrap();
    let chars: Vec<char> = code.chars().collect();

    let mut rebuilt = String::new();
    let mut next = 0;
    for token in &tokens {
        let start = token.start().offset;
        let end = token.end().offset;
        let gap: String = chars[next..start].iter().collect();
        let stripped = strip_comments(&gap);
        assert!(
            stripped.chars().all(char::is_whitespace),
            "gap {gap:?} holds more than whitespace and comments"
        );
        rebuilt.push_str(&gap);

        let slice: String = chars[start..=end].iter().collect();
        assert_eq!(token.content(), slice);
        rebuilt.push_str(token.content());
        next = end + 1;
    }
    rebuilt.extend(&chars[next..]);

    assert_eq!(rebuilt, code);
}

fn strip_comments(gap: &str) -> String {
    let mut out = String::new();
    let mut rest = gap;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("--") {
            rest = after.split_once('\n').map_or("", |(_, tail)| tail);
        } else if rest.starts_with("(*") {
            let mut depth = 0;
            let mut i = 0;
            while i < rest.len() {
                if rest[i..].starts_with("(*") {
                    depth += 1;
                    i += 2;
                } else if rest[i..].starts_with("*)") {
                    depth -= 1;
                    i += 2;
                    if depth == 0 {
                        break;
                    }
                } else {
                    i += rest[i..].chars().next().map_or(1, char::len_utf8);
                }
            }
            rest = &rest[i..];
        } else {
            let ch = rest.chars().next().unwrap();
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}

#[test]
fn test_pull_contract() {
    let lexer = sexpr_lexer();
    let mut tokenizer = lexer.tokenizer(StringSource::new("(not x)")).unwrap();
    tokenizer.open().unwrap();

    let mut seen = Vec::new();
    while tokenizer.has_more_tokens() {
        seen.push(tokenizer.next_token().unwrap());
    }
    tokenizer.close();

    assert_eq!(types(&seen), vec!["PAR_OPEN", "NOT", "ID", "PAR_CLOSE"]);
    assert!(!tokenizer.has_more_tokens());
    assert_eq!(tokenizer.next_token(), None);
}

#[test]
fn test_tokenize_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "(define answer 42)\n(define a-name \"Tho\\\"mas\")").unwrap();

    let mut tokenizer = sexpr_lexer().tokenizer(FileSource::new(file.path())).unwrap();
    tokenizer.open().unwrap();
    let tokens: Vec<_> = tokenizer.by_ref().collect();
    tokenizer.close();

    assert_eq!(tokens.len(), 10);
    assert_eq!(tokens[8].token_type(), "STRING");
    assert_eq!(tokens[8].content(), "\"Tho\\\"mas\"");
}

#[test]
fn test_empty_input() {
    assert!(sexpr_lexer().tokenize("").unwrap().is_empty());
    assert!(sexpr_lexer().tokenize(" \n\t ").unwrap().is_empty());
}

#[test]
fn test_invalid_pattern_is_reported() {
    let mut lexer = Lexer::new();
    lexer.add_terminal("[a-z", "BROKEN");

    let err = lexer.tokenize("x").unwrap_err();
    assert!(matches!(
        err,
        LexerError::InvalidPattern { ref pattern, .. } if pattern == "[a-z"
    ));
}

mod validation {
    use lexer_framework::{Lexer, LexerError};
    use rstest::rstest;

    #[rstest]
    #[case::comment_start(|l: &mut Lexer| { l.add_comment_type("", "*/"); }, "comment start sequence")]
    #[case::comment_end(|l: &mut Lexer| { l.add_nested_comment_type("/*", ""); }, "comment end sequence")]
    #[case::delimiter(|l: &mut Lexer| { l.add_string_type("", None); }, "string delimiter")]
    #[case::escape(|l: &mut Lexer| { l.add_string_type("\"", Some("")); }, "escape sequence")]
    #[case::symbol(|l: &mut Lexer| { l.add_symbol("", "NOTHING"); }, "symbol")]
    #[case::keyword(|l: &mut Lexer| { l.add_keyword(""); }, "keyword")]
    fn test_empty_sequences_are_rejected(
        #[case] configure: fn(&mut Lexer),
        #[case] expected: &str,
    ) {
        let mut lexer = Lexer::new();
        configure(&mut lexer);

        match lexer.tokenize("x") {
            Err(LexerError::EmptySequence { what }) => assert_eq!(what, expected),
            other => panic!("expected empty sequence error, got {other:?}"),
        }
    }
}
