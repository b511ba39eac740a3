//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Names and keywords
//! - Numeric literals (integers and floats)
//! - String literals with escape sequences
//! - Operators and punctuation
//! - Layout markers (NEWLINE, INDENT, TAB, `;`)
//! - Comments
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.sqy".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_names() {
    let source = "foo bar baz_123 _underscore while lambda".to_string();
    let tokens = tokenize(source, Some("test.sqy".to_string())).unwrap();

    assert_eq!(tokens.len(), 7);
    assert_eq!(tokens[0].kind, TokenKind::Name);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].kind, TokenKind::Name);
    assert_eq!(tokens[4].value, "while");
    assert_eq!(tokens[5].value, "lambda");
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100.5".to_string();
    let tokens = tokenize(source, Some("test.sqy".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].value, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" 'world' "multiple words""#.to_string();
    let tokens = tokenize(source, Some("test.sqy".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "world");
    assert_eq!(tokens[2].value, "multiple words");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""line\nnext\ttab""#.to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].value, "line\nnext\ttab");
}

#[test]
fn test_tokenize_multi_char_operators() {
    let source = "** := :: -> <- <= >= != == << >>".to_string();
    let tokens = tokenize(source, None).unwrap();
    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();

    assert_eq!(
        values,
        vec!["**", ":=", "::", "->", "<-", "<=", ">=", "!=", "==", "<<", ">>", "EOF"]
    );
    assert!(tokens[..11].iter().all(|token| token.kind == TokenKind::Operator));
}

#[test]
fn test_tokenize_operators_without_spaces() {
    let source = "a:=b**2".to_string();
    let tokens = tokenize(source, None).unwrap();
    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();

    assert_eq!(values, vec!["a", ":=", "b", "**", "2", "EOF"]);
}

#[test]
fn test_tokenize_layout_markers() {
    assert_eq!(
        kinds("a\nb;c"),
        vec![
            TokenKind::Name,
            TokenKind::Newline,
            TokenKind::Name,
            TokenKind::Semicolon,
            TokenKind::Name,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_indent_and_tabs() {
    assert_eq!(
        kinds("x ::\n\t\ty"),
        vec![
            TokenKind::Name,
            TokenKind::Operator,
            TokenKind::Indent,
            TokenKind::Tab,
            TokenKind::Name,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_inline_tab_is_whitespace() {
    assert_eq!(
        kinds("a\t+\tb"),
        vec![TokenKind::Name, TokenKind::Operator, TokenKind::Name, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_crlf() {
    assert_eq!(
        kinds("a\r\nb\r\n\tc"),
        vec![
            TokenKind::Name,
            TokenKind::Newline,
            TokenKind::Name,
            TokenKind::Indent,
            TokenKind::Name,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let source = "x: 1 # the answer\ny".to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[3].kind, TokenKind::Newline);
    assert_eq!(tokens[4].value, "y");
}

#[test]
fn test_tokenize_spans() {
    let source = "ab + 12".to_string();
    let tokens = tokenize(source, Some("test.sqy".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 2);
    assert_eq!(tokens[2].span.start.0, 5);
    assert_eq!(tokens[2].span.end.0, 7);
    assert_eq!(*tokens[2].span.start.1, "test.sqy");
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}

#[test]
fn test_tokenize_unrecognised_character() {
    let result = tokenize("a ` b".to_string(), None);

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_tokenize_unknown_operator_is_still_a_token() {
    let tokens = tokenize("a @ b".to_string(), None).unwrap();

    assert_eq!(tokens[1].kind, TokenKind::Operator);
    assert_eq!(tokens[1].value, "@");
}
