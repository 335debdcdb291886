//! Core value type carried by registers, operations, and the control stack.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::Arc;

use crate::collections::Seq;

/// Core value type for all regmach data.
///
/// Values are immutable and cheaply cloneable. The machine never inspects
/// them except to test truthiness and to follow `Label` jump targets; the
/// meaning of everything else belongs to the operation table.
#[derive(Clone)]
pub enum Value {
    /// The nil value. Registers start out holding it.
    Nil,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(Arc<str>),
    /// Quoted symbol.
    Symbol(Arc<str>),
    /// Persistent list.
    List(Seq<Value>),
    /// A label's instruction block, usable as a `goto`/`branch` target.
    Label(BlockRef),
}

/// Reference to the compiled instructions of one labeled block.
///
/// The block is the half-open range `start..end` of the machine's compiled
/// instruction arena. An empty range is a halt marker.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockRef {
    /// The label that named the block.
    pub label: Arc<str>,
    /// Index of the block's first instruction.
    pub start: usize,
    /// Index one past the block's last instruction.
    pub end: usize,
}

impl BlockRef {
    /// Creates a block reference.
    #[must_use]
    pub fn new(label: impl Into<Arc<str>>, range: Range<usize>) -> Self {
        Self {
            label: label.into(),
            start: range.start,
            end: range.end,
        }
    }

    /// Returns the block as an index range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns true if the block holds no instructions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl Value {
    /// Name of the variant, as used in type mismatch messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::List(_) => "list",
            Self::Label(_) => "label",
        }
    }

    /// True only for `nil`.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// What `test` and `branch` look at. Everything but `nil` and `false`
    /// counts as true, including `0` and the empty list.
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }

    /// A quoted symbol.
    #[must_use]
    pub fn symbol(name: impl Into<Arc<str>>) -> Self {
        Self::Symbol(name.into())
    }

    /// The payload of a `Bool`.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self { Some(*b) } else { None }
    }

    /// The payload of an `Int`.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        if let Self::Int(n) = self { Some(*n) } else { None }
    }

    /// The payload of a `Float`. Ints are not converted.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        if let Self::Float(x) = self { Some(*x) } else { None }
    }

    /// Any number as f64. Ints above 2^53 may round.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Self::Int(n) => Some(n as f64),
            Self::Float(x) => Some(x),
            _ => None,
        }
    }

    /// Text of a `String`. Symbols do not count.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(text) = self { Some(text) } else { None }
    }

    /// Name of a `Symbol`.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        if let Self::Symbol(name) = self { Some(name) } else { None }
    }

    /// Items of a `List`.
    #[must_use]
    pub const fn as_list(&self) -> Option<&Seq<Value>> {
        if let Self::List(items) = self { Some(items) } else { None }
    }

    /// The block of a `Label`, for jumps.
    #[must_use]
    pub const fn as_label(&self) -> Option<&BlockRef> {
        if let Self::Label(block) = self { Some(block) } else { None }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Nil
    }
}

/// Floats compare by bit pattern so `Value` can be `Eq` and `Hash`.
/// `NaN` equals itself and `0.0` differs from `-0.0`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::{Bool, Float, Int, Label, List, Nil, String, Symbol};
        match (self, other) {
            (Nil, Nil) => true,
            (Bool(x), Bool(y)) => x == y,
            (Int(x), Int(y)) => x == y,
            (Float(x), Float(y)) => x.to_bits() == y.to_bits(),
            (String(x), String(y)) | (Symbol(x), Symbol(y)) => x == y,
            (List(x), List(y)) => x == y,
            (Label(x), Label(y)) => x == y,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Nil => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(x) => x.to_bits().hash(state),
            Self::String(text) | Self::Symbol(text) => text.hash(state),
            Self::List(items) => items.hash(state),
            Self::Label(block) => block.hash(state),
        }
    }
}

/// Numbers order across int and float. Other variants only order against
/// themselves, and lists or labels not at all.
impl PartialOrd for Value {
    #[allow(clippy::cast_precision_loss)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use Value::{Bool, Int, Nil, String, Symbol};
        match (self, other) {
            (Nil, Nil) => Some(Ordering::Equal),
            (Bool(x), Bool(y)) => Some(x.cmp(y)),
            (Int(x), Int(y)) => Some(x.cmp(y)),
            (String(x), String(y)) | (Symbol(x), Symbol(y)) => Some(x.cmp(y)),
            _ => self.as_number()?.partial_cmp(&other.as_number()?),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) => write!(f, "{text:?}"),
            Self::Symbol(name) => write!(f, "'{name}"),
            Self::List(items) => write!(f, "{items:?}"),
            Self::Label(block) => write!(f, "<label {} {}..{}>", block.label, block.start, block.end),
            _ => fmt::Display::fmt(self, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(text) | Self::Symbol(text) => f.write_str(text),
            Self::List(items) => {
                f.write_str("(")?;
                let mut sep = "";
                for item in items.iter() {
                    write!(f, "{sep}{item}")?;
                    sep = " ";
                }
                f.write_str(")")
            }
            Self::Label(block) => write!(f, "<label {}>", block.label),
        }
    }
}

macro_rules! value_from {
    ($($source:ty => |$x:ident| $body:expr;)*) => {
        $(
            impl From<$source> for Value {
                fn from($x: $source) -> Self {
                    $body
                }
            }
        )*
    };
}

value_from! {
    bool => |b| Self::Bool(b);
    i64 => |n| Self::Int(n);
    i32 => |n| Self::Int(i64::from(n));
    f64 => |x| Self::Float(x);
    &str => |text| Self::String(text.into());
    String => |text| Self::String(text.into());
    BlockRef => |block| Self::Label(block);
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
