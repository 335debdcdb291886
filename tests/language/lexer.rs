//! Integration tests for the lexer

use regmach_language::{Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

#[test]
fn instruction_tokens() {
    assert_eq!(
        kinds("(assign n ((op -) (reg n) (const 1)))"),
        vec![
            TokenKind::LParen,
            TokenKind::Symbol("assign".into()),
            TokenKind::Symbol("n".into()),
            TokenKind::LParen,
            TokenKind::LParen,
            TokenKind::Symbol("op".into()),
            TokenKind::Symbol("-".into()),
            TokenKind::RParen,
            TokenKind::LParen,
            TokenKind::Symbol("reg".into()),
            TokenKind::Symbol("n".into()),
            TokenKind::RParen,
            TokenKind::LParen,
            TokenKind::Symbol("const".into()),
            TokenKind::Int(1),
            TokenKind::RParen,
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn operator_symbols() {
    for op in ["+", "-", "*", "/", "==", "<=", "!=", "null?", "fact-loop"] {
        assert_eq!(kinds(op), vec![TokenKind::Symbol(op.into()), TokenKind::Eof]);
    }
}

#[test]
fn numbers_and_literals() {
    assert_eq!(
        kinds("-7 2.5 nil true false \"a\\nb\""),
        vec![
            TokenKind::Int(-7),
            TokenKind::Float(2.5),
            TokenKind::Nil,
            TokenKind::True,
            TokenKind::False,
            TokenKind::String("a\nb".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_and_commas_are_skipped() {
    assert_eq!(
        kinds("; entry point\n(a, b)"),
        vec![
            TokenKind::LParen,
            TokenKind::Symbol("a".into()),
            TokenKind::Symbol("b".into()),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn spans_track_lines() {
    let tokens = Lexer::tokenize_all("(a\n  b)");
    let b = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Symbol("b".into()))
        .unwrap();
    assert_eq!(b.span.line, 2);
    assert_eq!(b.span.column, 3);
}
