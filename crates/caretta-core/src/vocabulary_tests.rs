use indoc::indoc;

use crate::{TokenId, TokenVocabulary, VocabularyError};

#[test]
fn parse_tokens_listing() {
    let text = indoc! {"
        NUMBER=1
        PLUS=2

        MINUS=3
        '+'=2
    "};

    let vocabulary = TokenVocabulary::parse(text).unwrap();

    assert_eq!(vocabulary.get("NUMBER"), Some(TokenId(1)));
    assert_eq!(vocabulary.get("'+'"), Some(TokenId(2)));
    assert_eq!(vocabulary.get_literal("+"), Some(TokenId(2)));
    assert_eq!(vocabulary.get("MINUS"), Some(TokenId(3)));
    assert_eq!(vocabulary.get("TIMES"), None);
    // EOF is implicit
    assert_eq!(vocabulary.get("EOF"), Some(TokenId::EOF));
    assert_eq!(vocabulary.len(), 5);
}

#[test]
fn splits_at_last_equals_sign() {
    let vocabulary = TokenVocabulary::parse("'='=7\n'=='=8\n").unwrap();

    assert_eq!(vocabulary.get("'='"), Some(TokenId(7)));
    assert_eq!(vocabulary.get("'=='"), Some(TokenId(8)));
}

#[test]
fn display_name_prefers_symbolic_names() {
    let text = indoc! {"
        '('=1
        LPAREN=1
        T__0=2
        ','=2
        T__1=3
    "};

    let vocabulary = TokenVocabulary::parse(text).unwrap();

    assert_eq!(vocabulary.display_name(TokenId(1)), Some("LPAREN"));
    assert_eq!(vocabulary.display_name(TokenId(2)), Some("','"));
    assert_eq!(vocabulary.display_name(TokenId(3)), Some("T__1"));
    assert_eq!(vocabulary.display_name(TokenId::EOF), Some("EOF"));
    assert_eq!(vocabulary.display_name(TokenId(99)), None);
}

#[test]
fn invalid_lines_report_line_number() {
    let err = TokenVocabulary::parse("NUMBER=1\nPLUS\n").unwrap_err();
    assert_eq!(
        err,
        VocabularyError::InvalidLine {
            line: 2,
            text: "PLUS".into()
        }
    );
    assert_eq!(err.to_string(), "invalid token definition on line 2: `PLUS`");

    let err = TokenVocabulary::parse("NUMBER=one").unwrap_err();
    assert!(matches!(err, VocabularyError::InvalidLine { line: 1, .. }));

    let err = TokenVocabulary::parse("=4").unwrap_err();
    assert!(matches!(err, VocabularyError::InvalidLine { line: 1, .. }));
}

#[test]
fn insert_programmatically() {
    let mut vocabulary = TokenVocabulary::new();
    vocabulary.insert("ID", TokenId(4));

    let names: Vec<_> = vocabulary.iter().collect();
    assert_eq!(names, [("EOF", TokenId::EOF), ("ID", TokenId(4))]);
}
