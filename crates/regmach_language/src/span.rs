//! Byte ranges with line and column, attached to tokens and forms.

/// Where a token or form was read from. Line 0 marks a span built in code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Span {
    /// First byte.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
    /// Line of `start`, from 1. Zero for synthetic spans.
    pub line: u32,
    /// Column of `start`, from 1.
    pub column: u32,
}

impl Span {
    /// Builds a span from raw parts. Lines and columns count from 1.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// The empty span at line 1, column 1.
    #[must_use]
    pub const fn at_start() -> Self {
        Self::new(0, 0, 1, 1)
    }

    /// Extends `self` through the end of `other`, keeping `self`'s position.
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        Self {
            start: self.start,
            end: other.end,
            line: self.line,
            column: self.column,
        }
    }

    /// True when the span does not point into any source text.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.line == 0
    }

    /// The slice of `source` under this span.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}
