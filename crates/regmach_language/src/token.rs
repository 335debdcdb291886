//! Tokens produced by the lexer.

use crate::span::Span;

/// One lexed token and where it sits in the source.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// What was read.
    pub kind: TokenKind,
    /// Where it was read.
    pub span: Span,
}

impl Token {
    /// Pairs a kind with its span.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The slice of `source` this token was read from.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }
}

/// What a token is. Literal variants carry their decoded value.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// `(`
    LParen,
    /// `)`
    RParen,

    /// `nil`
    Nil,
    /// `true`
    True,
    /// `false`
    False,
    /// `42`, `-17`
    Int(i64),
    /// `2.5`, `-0.5`
    Float(f64),
    /// Quoted text with escapes already resolved.
    String(String),
    /// Any other atom: register names, labels, operator names.
    Symbol(String),

    /// From `;` to end of line, `;` included.
    Comment(String),
    /// No more input.
    Eof,
    /// Malformed input, with a message.
    Error(String),
}

impl TokenKind {
    /// Tokens the parser skips over.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// Name used in parse error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Nil => "nil",
            Self::True => "true",
            Self::False => "false",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Comment(_) => "comment",
            Self::Eof => "end of input",
            Self::Error(_) => "error",
        }
    }
}
