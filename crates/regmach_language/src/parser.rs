//! Reader for controller program text.
//!
//! Builds [`Ast`] data from tokens with an explicit stack of open lists, so
//! nesting depth is bounded by memory rather than by the call stack.

use regmach_foundation::{Error, ErrorKind, Result};

use crate::ast::Ast;
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Reads data one at a time from controller text.
pub struct Parser<'src> {
    source: &'src str,
    lexer: Lexer<'src>,
    /// A significant token already lexed but not consumed.
    peeked: Option<Token>,
}

impl<'src> Parser<'src> {
    /// A reader positioned before the first datum of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            lexer: Lexer::new(source),
            peeked: None,
        }
    }

    /// Reads the next datum.
    ///
    /// # Errors
    /// Returns a `ParseError` on a lexical error, a stray `)`, an
    /// unterminated list or when no datum is left.
    pub fn parse(&mut self) -> Result<Ast> {
        let mut open: Vec<(Span, Vec<Ast>)> = Vec::new();
        loop {
            let token = self.next();
            let span = token.span;
            let datum = match token.kind {
                TokenKind::LParen => {
                    open.push((span, Vec::new()));
                    continue;
                }
                TokenKind::RParen => match open.pop() {
                    Some((start, items)) => Ast::List(items, start.to(span)),
                    None => {
                        let message = format!("unexpected {}", TokenKind::RParen.name());
                        return Err(self.error_at(span, &message));
                    }
                },
                TokenKind::Eof => {
                    return Err(match open.last() {
                        Some(&(start, _)) => self.error_at(start, "unterminated list"),
                        None => self.error_at(span, "unexpected end of input"),
                    });
                }
                TokenKind::Error(message) => return Err(self.error_at(span, &message)),
                TokenKind::Comment(_) => continue,
                TokenKind::Nil => Ast::Nil(span),
                TokenKind::True => Ast::Bool(true, span),
                TokenKind::False => Ast::Bool(false, span),
                TokenKind::Int(n) => Ast::Int(n, span),
                TokenKind::Float(x) => Ast::Float(x, span),
                TokenKind::String(text) => Ast::String(text, span),
                TokenKind::Symbol(name) => Ast::Symbol(name, span),
            };
            match open.last_mut() {
                Some((_, items)) => items.push(datum),
                None => return Ok(datum),
            }
        }
    }

    /// Reads every remaining datum.
    ///
    /// # Errors
    /// Fails on the first datum that [`parse`](Self::parse) rejects.
    pub fn parse_all(&mut self) -> Result<Vec<Ast>> {
        let mut forms = Vec::new();
        while self.peek().kind != TokenKind::Eof {
            forms.push(self.parse()?);
        }
        Ok(forms)
    }

    fn peek(&mut self) -> &Token {
        let token = self.next();
        self.peeked.insert(token)
    }

    fn next(&mut self) -> Token {
        self.peeked.take().unwrap_or_else(|| self.lex_significant())
    }

    fn lex_significant(&mut self) -> Token {
        loop {
            let token = self.lexer.next_token();
            if !token.kind.is_trivia() {
                return token;
            }
        }
    }

    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::new(ErrorKind::ParseError {
            message: message.to_string(),
            line: span.line,
            column: span.column,
            context: line_containing(self.source, span.start).to_string(),
        })
    }
}

/// The whole line of `source` that byte `offset` falls on.
fn line_containing(source: &str, offset: usize) -> &str {
    let start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = source[offset..].find('\n').map_or(source.len(), |i| offset + i);
    &source[start..end]
}

/// Reads all of `source` as a sequence of data.
///
/// # Errors
/// Returns a `ParseError` describing the first problem found.
pub fn parse(source: &str) -> Result<Vec<Ast>> {
    Parser::new(source).parse_all()
}

/// Reads the first datum of `source`. Anything after it is ignored.
///
/// # Errors
/// Returns a `ParseError` if there is no well-formed first datum.
pub fn parse_one(source: &str) -> Result<Ast> {
    Parser::new(source).parse()
}
