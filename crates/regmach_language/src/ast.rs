//! Data read from controller text.
//!
//! A program is a sequence of label statements, each itself a list.

use std::fmt;

use regmach_foundation::Value;

use crate::span::Span;

/// One datum read from program text, tagged with where it was read.
#[derive(Clone, Debug, PartialEq)]
pub enum Ast {
    /// `nil`
    Nil(Span),
    /// `true`, `false`
    Bool(bool, Span),
    /// `42`
    Int(i64, Span),
    /// `2.5`
    Float(f64, Span),
    /// `"text"`
    String(String, Span),
    /// `fact-loop`, `+`
    Symbol(String, Span),
    /// `(reg n)`
    List(Vec<Ast>, Span),
}

impl Ast {
    /// Where the datum was read. Synthetic for nodes built in code.
    #[must_use]
    pub const fn span(&self) -> Span {
        let (Self::Nil(span)
        | Self::Bool(_, span)
        | Self::Int(_, span)
        | Self::Float(_, span)
        | Self::String(_, span)
        | Self::Symbol(_, span)
        | Self::List(_, span)) = self;
        *span
    }

    /// True for symbols.
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(..))
    }

    /// True for lists, empty ones included.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(..))
    }

    /// Items of a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Ast]> {
        if let Self::List(items, _) = self { Some(items.as_slice()) } else { None }
    }

    /// Name of a symbol.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        if let Self::Symbol(name, _) = self { Some(name.as_str()) } else { None }
    }

    /// Value of an integer literal.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        if let Self::Int(n, _) = self { Some(*n) } else { None }
    }

    /// Matches [`Value::type_name`] for the value this datum quotes to.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil(_) => "nil",
            Self::Bool(..) => "bool",
            Self::Int(..) => "int",
            Self::Float(..) => "float",
            Self::String(..) => "string",
            Self::Symbol(..) => "symbol",
            Self::List(..) => "list",
        }
    }

    /// The value `(const DATUM)` denotes. Symbols stay symbols and lists
    /// become persistent lists, recursively.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Nil(_) => Value::Nil,
            Self::Bool(b, _) => Value::from(*b),
            Self::Int(n, _) => Value::from(*n),
            Self::Float(x, _) => Value::from(*x),
            Self::String(text, _) => Value::from(text.as_str()),
            Self::Symbol(name, _) => Value::symbol(name.as_str()),
            Self::List(items, _) => Value::List(items.iter().map(Self::to_value).collect()),
        }
    }
}

// Builders for programs assembled in code. All carry the synthetic span.
impl Ast {
    /// An integer datum.
    #[must_use]
    pub fn int(n: i64) -> Self {
        Self::Int(n, Span::default())
    }

    /// A float datum.
    #[must_use]
    pub fn float(x: f64) -> Self {
        Self::Float(x, Span::default())
    }

    /// `true` or `false`.
    #[must_use]
    pub fn bool_lit(b: bool) -> Self {
        Self::Bool(b, Span::default())
    }

    /// A string datum.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::String(text.into(), Span::default())
    }

    /// A symbol datum.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into(), Span::default())
    }

    /// A list datum.
    #[must_use]
    pub fn list(items: Vec<Ast>) -> Self {
        Self::List(items, Span::default())
    }
}

/// Prints text the reader reads back as the same datum. Floats always keep
/// a decimal point and strings are quoted with escapes.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil(_) => f.write_str("nil"),
            Self::Bool(b, _) => write!(f, "{b}"),
            Self::Int(n, _) => write!(f, "{n}"),
            Self::Float(x, _) => write!(f, "{x:?}"),
            Self::String(text, _) => write!(f, "{text:?}"),
            Self::Symbol(name, _) => f.write_str(name),
            Self::List(items, _) => {
                f.write_str("(")?;
                if let Some((first, rest)) = items.split_first() {
                    write!(f, "{first}")?;
                    for item in rest {
                        write!(f, " {item}")?;
                    }
                }
                f.write_str(")")
            }
        }
    }
}
