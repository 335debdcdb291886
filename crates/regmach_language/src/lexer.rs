//! Lexer for controller program text.
//!
//! Controller text has very little syntax: parentheses, string literals,
//! `;` comments and atoms. An atom is read as one maximal run of atom
//! characters and then classified, so `1+`, `-` and `null?` are symbols
//! while `-7` and `2.5` are numbers.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Splits controller text into tokens, tracking line and column.
pub struct Lexer<'src> {
    source: &'src str,
    /// Byte offset of the next unread character.
    offset: usize,
    line: u32,
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Reads the next token. Returns `Eof` forever once input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_blank();

        let (start, line, column) = (self.offset, self.line, self.column);
        let kind = match self.peek() {
            None => TokenKind::Eof,
            Some('(') => {
                self.bump();
                TokenKind::LParen
            }
            Some(')') => {
                self.bump();
                TokenKind::RParen
            }
            Some(';') => self.read_comment(),
            Some('"') => self.read_string(),
            Some(c) if is_atom_char(c) => self.read_atom(),
            Some(c) => {
                self.bump();
                TokenKind::Error(format!("unexpected character: {c}"))
            }
        };

        Token::new(kind, Span::new(start, self.offset, line, column))
    }

    /// Lexes `source` to the end, comments included. The last token is `Eof`.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes characters while `pred` holds and returns them as a slice.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'src str {
        let (source, start) = (self.source, self.offset);
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &source[start..self.offset]
    }

    /// Commas separate items like whitespace does.
    fn skip_blank(&mut self) {
        self.take_while(|c| c.is_whitespace() || c == ',');
    }

    fn read_comment(&mut self) -> TokenKind {
        TokenKind::Comment(self.take_while(|c| c != '\n').to_string())
    }

    fn read_string(&mut self) -> TokenKind {
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                None => return TokenKind::Error("unterminated string literal".into()),
                Some('"') => return TokenKind::String(text),
                Some('\\') => match self.bump() {
                    Some('n') => text.push('\n'),
                    Some('r') => text.push('\r'),
                    Some('t') => text.push('\t'),
                    Some(c @ ('\\' | '"')) => text.push(c),
                    Some(c) => return TokenKind::Error(format!("invalid escape sequence: \\{c}")),
                    None => {
                        return TokenKind::Error("unexpected end of input in string escape".into());
                    }
                },
                Some(c) => text.push(c),
            }
        }
    }

    fn read_atom(&mut self) -> TokenKind {
        classify_atom(self.take_while(is_atom_char))
    }
}

/// Decides what a run of atom characters denotes.
fn classify_atom(word: &str) -> TokenKind {
    match word {
        "nil" => return TokenKind::Nil,
        "true" => return TokenKind::True,
        "false" => return TokenKind::False,
        _ => {}
    }

    if !looks_numeric(word) {
        return TokenKind::Symbol(word.to_string());
    }
    if word.contains('.') {
        word.parse()
            .map_or_else(|e| TokenKind::Error(format!("invalid float: {e}")), TokenKind::Float)
    } else {
        word.parse()
            .map_or_else(|e| TokenKind::Error(format!("invalid integer: {e}")), TokenKind::Int)
    }
}

/// An optional sign, then digits with at most one interior `.`.
fn looks_numeric(word: &str) -> bool {
    let digits = word.strip_prefix(['+', '-']).unwrap_or(word);
    digits.starts_with(|c: char| c.is_ascii_digit())
        && !digits.ends_with('.')
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1
}

/// Characters that may appear in an atom.
fn is_atom_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '_' | '+' | '-' | '*' | '/' | '!' | '?' | '<' | '>' | '=' | '&' | '%' | '$' | '^' | '.'
                | ':'
        )
}
