//! Assembler for transforming a program datum into instructions.
//!
//! A program is a sequence of label statements, `(name)` or
//! `(name (instruction ...))`. Every block's instructions are appended to one
//! flat arena in source order and the label table records the block's own
//! index range. Ranges never overlap, so running off the end of a block halts
//! the machine instead of falling into the next one.
//!
//! Only shape is checked here. Register names, operation names and label
//! references are resolved when the instruction executes.

use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

use regmach_foundation::{BlockRef, Error, Result};
use regmach_language::{Ast, Span};

use crate::instruction::{Expression, Instruction, OperationCall, Primitive, Target};

/// Mapping from label name to its block's range in the instruction arena.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelTable {
    blocks: HashMap<String, Range<usize>>,
}

impl LabelTable {
    /// Creates an empty label table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a block.
    ///
    /// # Errors
    /// Returns `DuplicateLabel` if `name` is already declared.
    pub fn insert(&mut self, name: &str, range: Range<usize>) -> Result<()> {
        if self.blocks.contains_key(name) {
            return Err(Error::duplicate_label(name));
        }
        self.blocks.insert(name.to_string(), range);
        Ok(())
    }

    /// Returns the instruction range of a block.
    ///
    /// # Errors
    /// Returns `UndefinedLabel` if no block has this name.
    pub fn get(&self, name: &str) -> Result<Range<usize>> {
        self.blocks
            .get(name)
            .cloned()
            .ok_or_else(|| Error::undefined_label(name))
    }

    /// Returns a block as a first-class value payload.
    ///
    /// # Errors
    /// Returns `UndefinedLabel` if no block has this name.
    pub fn block_ref(&self, name: &str) -> Result<BlockRef> {
        self.get(name).map(|range| BlockRef::new(name, range))
    }

    /// Returns true if a block has this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// Returns the label whose block contains `index`.
    ///
    /// Empty blocks contain nothing.
    #[must_use]
    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.blocks
            .iter()
            .find(|(_, range)| range.contains(&index))
            .map(|(name, _)| name.as_str())
    }

    /// Every block with its range, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Range<usize>)> + '_ {
        self.blocks
            .iter()
            .map(|(name, range)| (name.as_str(), range.clone()))
    }

    /// Returns all label names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.blocks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of declared blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if no blocks are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Compiled program ready for execution.
///
/// Every label range lies within `code`, so a jump can never leave the arena.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompiledProgram {
    code: Vec<Instruction>,
    labels: LabelTable,
}

impl CompiledProgram {
    /// Pairs an instruction arena with its label table.
    ///
    /// # Errors
    /// Returns `MalformedProgram` if a label's range is reversed or runs past
    /// the end of `code`.
    pub fn new(code: Vec<Instruction>, labels: LabelTable) -> Result<Self> {
        let len = code.len();
        if let Some((name, range)) = labels
            .iter()
            .find(|(_, range)| range.start > range.end || range.end > len)
        {
            return Err(Error::malformed_program(format!(
                "label `{name}` covers {}..{} but the program has {len} instructions",
                range.start, range.end
            )));
        }
        Ok(Self { code, labels })
    }

    /// Every instruction of every block, in source order.
    #[must_use]
    pub fn code(&self) -> &[Instruction] {
        &self.code
    }

    /// Per-block ranges into [`code`](Self::code).
    #[must_use]
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// The cursor a fresh run starts with: the whole arena.
    #[must_use]
    pub fn entry(&self) -> Range<usize> {
        0..self.code.len()
    }

    /// Returns the instruction at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.code.get(index)
    }

    /// Returns the number of instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Returns true if there are no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Returns every register name the program mentions, sorted.
    #[must_use]
    pub fn register_names(&self) -> BTreeSet<&str> {
        self.code.iter().flat_map(Instruction::registers).collect()
    }

    /// Returns the instructions of one block.
    ///
    /// # Errors
    /// Returns `UndefinedLabel` if no block has this name.
    pub fn block(&self, name: &str) -> Result<&[Instruction]> {
        let range = self.labels.get(name)?;
        Ok(self.code.get(range).unwrap_or_default())
    }
}

/// One-shot compiler from program datum to [`CompiledProgram`].
#[derive(Debug, Default)]
pub struct Assembler {
    code: Vec<Instruction>,
    labels: LabelTable,
}

impl Assembler {
    /// Creates a new assembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles a whole program.
    ///
    /// # Errors
    /// Returns `MalformedProgram` for a bad label statement, `DuplicateLabel`
    /// for a repeated name, and `UnknownInstruction` or
    /// `MalformedInstruction` for a bad instruction.
    pub fn assemble(mut self, program: &[Ast]) -> Result<CompiledProgram> {
        for statement in program {
            self.assemble_statement(statement)?;
        }
        Ok(CompiledProgram {
            code: self.code,
            labels: self.labels,
        })
    }

    fn assemble_statement(&mut self, statement: &Ast) -> Result<()> {
        let span = statement.span();
        let Some(elements) = statement.as_list() else {
            return Err(located(
                Error::malformed_program(format!(
                    "label statement must be a list, got {}",
                    statement.type_name()
                )),
                span,
            ));
        };

        let (name, body) = match elements {
            [Ast::Symbol(name, _)] => (name.as_str(), &[][..]),
            [Ast::Symbol(name, _), Ast::List(body, _)] => (name.as_str(), body.as_slice()),
            [Ast::Symbol(name, _), other] => {
                return Err(located(
                    Error::malformed_program(format!(
                        "body of label `{name}` must be a list, got {}",
                        other.type_name()
                    )),
                    other.span(),
                ));
            }
            [first, ..] if !first.is_symbol() => {
                return Err(located(
                    Error::malformed_program(format!(
                        "label name must be a symbol, got {}",
                        first.type_name()
                    )),
                    first.span(),
                ));
            }
            _ => {
                return Err(located(
                    Error::malformed_program("label statement must be (name) or (name (instruction ...))"),
                    span,
                ));
            }
        };

        let start = self.code.len();
        for ast in body {
            let instruction = assemble_instruction(ast)
                .map_err(|e| e.with_frame(format!("label {name}")))?;
            self.code.push(instruction);
        }
        let end = self.code.len();

        self.labels
            .insert(name, start..end)
            .map_err(|e| located(e, span))
    }
}

/// Compiles a program with a fresh [`Assembler`].
///
/// # Errors
/// See [`Assembler::assemble`].
pub fn assemble(program: &[Ast]) -> Result<CompiledProgram> {
    Assembler::new().assemble(program)
}

/// Compiles a single instruction.
///
/// # Errors
/// Returns `UnknownInstruction` for a tag outside the six known ones and
/// `MalformedInstruction` for a bad operand shape.
pub fn assemble_instruction(ast: &Ast) -> Result<Instruction> {
    let span = ast.span();
    let elements = match ast {
        Ast::List(elements, _) if !elements.is_empty() => elements.as_slice(),
        _ => {
            return Err(malformed(span, format!("expected an instruction list, got {ast}")));
        }
    };
    let Some(tag) = elements[0].as_symbol() else {
        return Err(malformed(
            span,
            format!("instruction tag must be a symbol, got {}", elements[0]),
        ));
    };
    let operands = &elements[1..];

    match tag {
        "assign" => match operands {
            [register, expression] => Ok(Instruction::Assign {
                register: register_name(register)?,
                expression: assemble_expression(expression)?,
            }),
            _ => Err(malformed(span, "assign expects (assign REG EXPRESSION)")),
        },
        "test" => match operands {
            [expression] => match assemble_expression(expression)? {
                Expression::Operation(call) => Ok(Instruction::Test(call)),
                Expression::Primitive(_) => Err(malformed(
                    expression.span(),
                    "test expects an operation application",
                )),
            },
            _ => Err(malformed(span, "test expects (test ((op NAME) ARG...))")),
        },
        "branch" => assemble_target(operands, span, "branch").map(Instruction::Branch),
        "goto" => assemble_target(operands, span, "goto").map(Instruction::Goto),
        "save" => match operands {
            [register] => Ok(Instruction::Save(register_name(register)?)),
            _ => Err(malformed(span, "save expects (save REG)")),
        },
        "restore" => match operands {
            [register] => Ok(Instruction::Restore(register_name(register)?)),
            _ => Err(malformed(span, "restore expects (restore REG)")),
        },
        other => Err(located(Error::unknown_instruction(other), span)),
    }
}

fn assemble_target(operands: &[Ast], span: Span, tag: &str) -> Result<Target> {
    match operands {
        [Ast::Symbol(kind, _), name] => {
            let name = symbol_operand(name, kind)?;
            match kind.as_str() {
                "label" => Ok(Target::Label(name)),
                "reg" => Ok(Target::Reg(name)),
                _ => Err(malformed(
                    span,
                    format!("{tag} target must be `label` or `reg`, got `{kind}`"),
                )),
            }
        }
        _ => Err(malformed(span, format!("{tag} expects ({tag} label NAME) or ({tag} reg NAME)"))),
    }
}

fn assemble_expression(ast: &Ast) -> Result<Expression> {
    match ast {
        Ast::List(elements, span) => match elements.first() {
            Some(Ast::List(head, head_span)) => {
                let name = match head.as_slice() {
                    [Ast::Symbol(op, _), name] if op == "op" => symbol_operand(name, "op")?,
                    _ => {
                        return Err(malformed(*head_span, "operation head must be (op NAME)"));
                    }
                };
                let args = elements[1..]
                    .iter()
                    .map(assemble_primitive)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Expression::Operation(OperationCall { name, args }))
            }
            Some(_) => assemble_primitive(ast).map(Expression::Primitive),
            None => Err(malformed(*span, "empty expression")),
        },
        _ => Err(malformed(ast.span(), format!("expected an expression, got {ast}"))),
    }
}

fn assemble_primitive(ast: &Ast) -> Result<Primitive> {
    let span = ast.span();
    match ast.as_list() {
        Some([Ast::Symbol(kind, _), operand]) => match kind.as_str() {
            "reg" => Ok(Primitive::Reg(symbol_operand(operand, kind)?)),
            "label" => Ok(Primitive::Label(symbol_operand(operand, kind)?)),
            "const" => Ok(Primitive::Const(operand.to_value())),
            "op" => Err(malformed(span, "operations cannot be nested")),
            _ => Err(malformed(span, format!("unknown primitive `{kind}`"))),
        },
        _ => Err(malformed(
            span,
            format!("expected (reg NAME), (const VALUE) or (label NAME), got {ast}"),
        )),
    }
}

fn register_name(ast: &Ast) -> Result<String> {
    symbol_operand(ast, "register")
}

fn symbol_operand(ast: &Ast, what: &str) -> Result<String> {
    ast.as_symbol().map(str::to_string).ok_or_else(|| {
        malformed(
            ast.span(),
            format!("{what} name must be a symbol, got {}", ast.type_name()),
        )
    })
}

fn malformed(span: Span, message: impl Into<String>) -> Error {
    located(Error::malformed_instruction(message), span)
}

/// Attaches the span's position unless the node was built in code.
fn located(error: Error, span: Span) -> Error {
    if span.is_synthetic() {
        return error;
    }
    let context = error
        .context
        .clone()
        .unwrap_or_default()
        .with_position(span.line as usize, span.column as usize);
    error.with_context(context)
}
