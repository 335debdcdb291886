//! Compiled instruction set.
//!
//! The assembler turns each source instruction into one [`Instruction`]
//! holding only static operands: register names, label names, constants and
//! operation names. Nothing here is resolved against the machine until the
//! instruction executes.

use std::fmt;

use regmach_foundation::Value;

/// A value-producing leaf: register read, constant, or label reference.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// `(reg NAME)` - current contents of a register.
    Reg(String),
    /// `(const LITERAL)` - a literal value.
    Const(Value),
    /// `(label NAME)` - the named block, as a jump-target value.
    Label(String),
}

/// `((op NAME) ARG...)` - an operation applied to primitive arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationCall {
    /// Name looked up in the operation table when the call is evaluated.
    pub name: String,
    /// Arguments, evaluated left to right.
    pub args: Vec<Primitive>,
}

/// Right-hand side of an `assign`.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// A single primitive.
    Primitive(Primitive),
    /// A single-level operation application.
    Operation(OperationCall),
}

/// Where a `goto` or `branch` transfers control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// `label NAME` - a block named in the source.
    Label(String),
    /// `reg NAME` - a block previously stored in a register.
    Reg(String),
}

/// One executable instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    /// Advance, evaluate, store into `register`.
    Assign {
        /// Destination register.
        register: String,
        /// Value to store.
        expression: Expression,
    },
    /// Advance, evaluate, store truthiness into the flag.
    Test(OperationCall),
    /// Jump to `target` if the flag is set, otherwise advance.
    Branch(Target),
    /// Replace the cursor with `target`.
    Goto(Target),
    /// Advance, push the register's value.
    Save(String),
    /// Advance, pop into the register.
    Restore(String),
}

impl Instruction {
    /// The source tag of this instruction.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "assign",
            Self::Test(_) => "test",
            Self::Branch(_) => "branch",
            Self::Goto(_) => "goto",
            Self::Save(_) => "save",
            Self::Restore(_) => "restore",
        }
    }

    /// Names of every register this instruction reads or writes.
    #[must_use]
    pub fn registers(&self) -> Vec<&str> {
        let mut names = Vec::new();
        match self {
            Self::Assign {
                register,
                expression,
            } => {
                names.push(register.as_str());
                match expression {
                    Expression::Primitive(p) => names.extend(p.register()),
                    Expression::Operation(call) => names.extend(call.registers()),
                }
            }
            Self::Test(call) => names.extend(call.registers()),
            Self::Branch(Target::Reg(r)) | Self::Goto(Target::Reg(r)) => names.push(r.as_str()),
            Self::Branch(Target::Label(_)) | Self::Goto(Target::Label(_)) => {}
            Self::Save(r) | Self::Restore(r) => names.push(r.as_str()),
        }
        names
    }
}

impl Primitive {
    /// The register this primitive reads, if any.
    #[must_use]
    pub fn register(&self) -> Option<&str> {
        match self {
            Self::Reg(name) => Some(name),
            Self::Const(_) | Self::Label(_) => None,
        }
    }
}

impl OperationCall {
    /// Registers read by the arguments, in order.
    pub fn registers(&self) -> impl Iterator<Item = &str> {
        self.args.iter().filter_map(Primitive::register)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reg(name) => write!(f, "(reg {name})"),
            Self::Const(value) => write!(f, "(const {value})"),
            Self::Label(name) => write!(f, "(label {name})"),
        }
    }
}

impl fmt::Display for OperationCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "((op {})", self.name)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Operation(call) => write!(f, "{call}"),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(name) => write!(f, "label {name}"),
            Self::Reg(name) => write!(f, "reg {name}"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign {
                register,
                expression,
            } => write!(f, "(assign {register} {expression})"),
            Self::Test(call) => write!(f, "(test {call})"),
            Self::Branch(target) => write!(f, "(branch {target})"),
            Self::Goto(target) => write!(f, "(goto {target})"),
            Self::Save(register) => write!(f, "(save {register})"),
            Self::Restore(register) => write!(f, "(restore {register})"),
        }
    }
}
