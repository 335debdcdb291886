//! Errors raised while reading, assembling or running a controller.
//!
//! Every kind is fatal to the `setup` or `run` call that raised it. Position
//! and label frames ride along in [`ErrorContext`].

use std::fmt;

use thiserror::Error;

/// A failure plus wherever we know it happened.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// What failed.
    pub kind: ErrorKind,
    /// Where, if anyone recorded it.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// An error with no context yet.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Replaces any context already attached.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes `frame` onto the context's stack, starting an empty context
    /// first if there is none.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.context = Some(self.context.take().unwrap_or_default().with_frame(frame));
        self
    }

    /// [`ErrorKind::DuplicateRegister`]
    #[must_use]
    pub fn duplicate_register(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateRegister(name.into()))
    }

    /// [`ErrorKind::UnknownRegister`]
    #[must_use]
    pub fn unknown_register(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownRegister(name.into()))
    }

    /// [`ErrorKind::UnknownOperation`]
    #[must_use]
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownOperation(name.into()))
    }

    /// [`ErrorKind::UnknownInstruction`]
    #[must_use]
    pub fn unknown_instruction(tag: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownInstruction(tag.into()))
    }

    /// [`ErrorKind::MalformedInstruction`]
    #[must_use]
    pub fn malformed_instruction(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedInstruction(message.into()))
    }

    /// [`ErrorKind::MalformedProgram`]
    #[must_use]
    pub fn malformed_program(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedProgram(message.into()))
    }

    /// [`ErrorKind::DuplicateLabel`]
    #[must_use]
    pub fn duplicate_label(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateLabel(name.into()))
    }

    /// [`ErrorKind::UndefinedLabel`]
    #[must_use]
    pub fn undefined_label(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedLabel(name.into()))
    }

    /// [`ErrorKind::StackUnderflow`]
    #[must_use]
    pub fn stack_underflow() -> Self {
        Self::new(ErrorKind::StackUnderflow)
    }

    /// `expected` and `actual` are [`Value::type_name`](crate::Value::type_name) strings.
    #[must_use]
    pub fn type_mismatch(expected: &'static str, actual: &'static str) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// `expected` is free text such as `"2"` or `"at least 1"`.
    #[must_use]
    pub fn arity_mismatch(expected: impl Into<String>, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch {
            expected: expected.into(),
            actual,
        })
    }

    /// [`ErrorKind::LimitExceeded`]
    #[must_use]
    pub fn limit_exceeded(limit: SemanticLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }
}

/// What went wrong. Callers match on this; the message comes from `Display`.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A register name was given twice at setup.
    #[error("duplicate register: {0}")]
    DuplicateRegister(String),

    /// A register name that was not allocated at setup.
    #[error("unknown register: {0}")]
    UnknownRegister(String),

    /// An operation name absent from the operation table.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// An instruction tag outside `assign`, `test`, `branch`, `goto`, `save`, `restore`.
    #[error("unknown instruction: {0}")]
    UnknownInstruction(String),

    /// A known instruction with operands of the wrong shape.
    #[error("malformed instruction: {0}")]
    MalformedInstruction(String),

    /// A label statement that is not `(name)` or `(name (instruction ...))`.
    #[error("malformed program: {0}")]
    MalformedProgram(String),

    /// The same label was declared twice.
    #[error("duplicate label: {0}")]
    DuplicateLabel(String),

    /// A label referenced at run time was never declared.
    #[error("undefined label: {0}")]
    UndefinedLabel(String),

    /// `restore` on an empty control stack.
    #[error("stack underflow: restore from an empty control stack")]
    StackUnderflow,

    /// A value of the wrong type reached an operation or a jump.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Type the consumer needed.
        expected: &'static str,
        /// Type it got.
        actual: &'static str,
    },

    /// An operation received the wrong number of arguments.
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Accepted counts, as text.
        expected: String,
        /// Arguments actually passed.
        actual: usize,
    },

    /// `/` or `rem` with a zero integer divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// Program or seed text that does not read as data.
    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        /// What the reader expected or found.
        message: String,
        /// 1-based.
        line: u32,
        /// 1-based.
        column: u32,
        /// The full text of the offending line.
        context: String,
    },

    /// A configured bound on a run was hit.
    #[error("limit exceeded: {0}")]
    LimitExceeded(SemanticLimit),

    /// Reading a program or seed file failed.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Bounds a run can exceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticLimit {
    /// More instructions than `MachineConfig::max_steps` allows.
    MaxSteps {
        /// The bound that was hit.
        limit: u64,
    },
}

impl fmt::Display for SemanticLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxSteps { limit } => write!(f, "max steps ({limit}) exceeded"),
        }
    }
}

/// Where an error happened, as far as the raiser knew.
///
/// Assembly errors carry a line and column. Run-time errors carry only
/// frames such as `label fact-loop`, innermost first.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File the text came from, when it came from a file.
    pub source: Option<String>,
    /// 1-based line of the offending form.
    pub line: Option<usize>,
    /// 1-based column of the offending form.
    pub column: Option<usize>,
    /// Frames, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// An empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the file the text came from.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Records a line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Appends an outer frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

/// Renders as `at FILE:LINE:COL` followed by one `  in FRAME` line per frame.
impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.line.zip(self.column);
        match (&self.source, position) {
            (Some(source), Some((line, column))) => write!(f, "at {source}:{line}:{column}")?,
            (Some(source), None) => write!(f, "at {source}")?,
            (None, Some((line, column))) => write!(f, "at {line}:{column}")?,
            (None, None) => {}
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
        }
        self.stack
            .iter()
            .try_for_each(|frame| writeln!(f, "  in {frame}"))
    }
}

/// Shorthand used throughout the regmach crates.
pub type Result<T> = std::result::Result<T, Error>;
