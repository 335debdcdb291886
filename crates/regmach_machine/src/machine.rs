//! The register machine.
//!
//! A [`Machine`] owns its registers, operation table, flag, control stack
//! and compiled program. It only exists after a successful setup, and `run`
//! takes `&mut self`, so a second run cannot start while one is in progress.
//!
//! # Control transfer
//!
//! The cursor is the range of instructions still to execute. A run starts
//! with the whole arena, so execution begins at the first block and flows
//! through the program in source order until the first jump. A jump replaces
//! the cursor with the target block's own range; reaching the end of that
//! range halts the run even when more blocks follow in the source.

use std::ops::Range;

use regmach_foundation::{BlockRef, Error, Result, SemanticLimit, Value};
use regmach_language::{Ast, parse};

use crate::assembler::{Assembler, CompiledProgram, LabelTable};
use crate::config::MachineConfig;
use crate::instruction::{Expression, Instruction, OperationCall, Primitive, Target};
use crate::operation::OperationTable;
use crate::register::{Register, RegisterFile};
use crate::stack::ControlStack;
use crate::trace::Tracer;

/// Statistics for one completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Instructions executed.
    pub steps: u64,
}

/// A compiled, runnable register machine.
#[derive(Debug)]
pub struct Machine {
    registers: RegisterFile,
    operations: OperationTable,
    flag: bool,
    stack: ControlStack,
    program: CompiledProgram,
    cursor: Range<usize>,
    tracer: Tracer,
    config: MachineConfig,
}

impl Machine {
    /// Allocates registers, installs operations and compiles `program`.
    ///
    /// # Errors
    /// Returns `DuplicateRegister` if a name repeats, or any assembler error.
    pub fn setup<I, S>(registers: I, operations: OperationTable, program: &[Ast]) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(registers, operations, program, MachineConfig::default())
    }

    /// Like [`Machine::setup`], with explicit configuration.
    ///
    /// # Errors
    /// Returns `DuplicateRegister` if a name repeats, or any assembler error.
    pub fn with_config<I, S>(
        registers: I,
        operations: OperationTable,
        program: &[Ast],
        config: MachineConfig,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = Assembler::new().assemble(program)?;
        Self::from_compiled(registers, operations, program, config)
    }

    /// Sets up a machine around an already assembled program.
    ///
    /// # Errors
    /// Returns `DuplicateRegister` if a name repeats.
    pub fn from_compiled<I, S>(
        registers: I,
        operations: OperationTable,
        program: CompiledProgram,
        config: MachineConfig,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut file = RegisterFile::new();
        for name in registers {
            file.allocate(name)?;
        }

        Ok(Self {
            registers: file,
            operations,
            flag: false,
            stack: ControlStack::new(),
            cursor: program.len()..program.len(),
            program,
            tracer: Tracer::new(config.trace.clone()),
            config,
        })
    }

    /// Parses program text, then sets up a machine.
    ///
    /// # Errors
    /// Returns a `ParseError` for unreadable text, otherwise as
    /// [`Machine::setup`].
    pub fn from_source<I, S>(registers: I, operations: OperationTable, source: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = parse(source)?;
        Self::setup(registers, operations, &program)
    }

    /// Runs from the first instruction until the cursor is exhausted.
    ///
    /// Registers, the flag and the stack keep whatever they held before.
    ///
    /// # Errors
    /// Returns the first error raised by an instruction, or `LimitExceeded`
    /// if a step limit is configured and reached. The cursor is left where
    /// the failing instruction put it.
    pub fn run(&mut self) -> Result<RunStats> {
        self.cursor = self.program.entry();
        self.tracer.run_start(self.cursor.len());

        let mut steps = 0u64;
        while !self.cursor.is_empty() {
            if let Some(limit) = self.config.max_steps {
                if steps >= limit {
                    return Err(Error::limit_exceeded(SemanticLimit::MaxSteps { limit }));
                }
            }

            let index = self.cursor.start;
            self.step(steps, index)
                .map_err(|e| self.with_location(e, index))?;
            steps += 1;
        }

        self.tracer.halt(steps);
        Ok(RunStats { steps })
    }

    /// Executes the instruction at `index`.
    fn step(&mut self, step: u64, index: usize) -> Result<()> {
        let Self {
            registers,
            operations,
            flag,
            stack,
            program,
            cursor,
            tracer,
            ..
        } = self;

        let instruction = program
            .get(index)
            .ok_or_else(|| Error::malformed_program(format!("no instruction at {index}")))?;
        tracer.execute(step, index, instruction);

        match instruction {
            Instruction::Assign {
                register,
                expression,
            } => {
                cursor.start += 1;
                let value = evaluate(expression, registers, operations, program.labels())?;
                registers.write(register, value)?;
            }
            Instruction::Test(call) => {
                cursor.start += 1;
                let value = apply(call, registers, operations, program.labels())?;
                *flag = value.is_truthy();
            }
            Instruction::Branch(target) => {
                if *flag {
                    let block = resolve(target, registers, program.labels())?;
                    tracer.jump(step, &block.label, block.start, block.end);
                    *cursor = block.range();
                } else {
                    cursor.start += 1;
                }
            }
            Instruction::Goto(target) => {
                let block = resolve(target, registers, program.labels())?;
                tracer.jump(step, &block.label, block.start, block.end);
                *cursor = block.range();
            }
            Instruction::Save(register) => {
                cursor.start += 1;
                stack.push(registers.read(register)?);
            }
            Instruction::Restore(register) => {
                cursor.start += 1;
                let value = stack.pop()?;
                registers.write(register, value)?;
            }
        }

        Ok(())
    }

    fn with_location(&self, error: Error, index: usize) -> Error {
        match self.program.labels().label_at(index) {
            Some(label) => error.with_frame(format!("label {label}")),
            None => error,
        }
    }

    // =========================================================================
    // Register access
    // =========================================================================

    /// Looks up a register.
    ///
    /// # Errors
    /// Returns `UnknownRegister` if `name` was not allocated at setup.
    pub fn register(&self, name: &str) -> Result<&Register> {
        self.registers.get(name)
    }

    /// Looks up a register for writing.
    ///
    /// # Errors
    /// Returns `UnknownRegister` if `name` was not allocated at setup.
    pub fn register_mut(&mut self, name: &str) -> Result<&mut Register> {
        self.registers.get_mut(name)
    }

    /// Returns a copy of a register's value.
    ///
    /// # Errors
    /// Returns `UnknownRegister` if `name` was not allocated at setup.
    pub fn get_register_value(&self, name: &str) -> Result<Value> {
        self.registers.read(name)
    }

    /// Stores a value into a register.
    ///
    /// # Errors
    /// Returns `UnknownRegister` if `name` was not allocated at setup.
    pub fn set_register_value(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.registers.write(name, value.into())
    }

    /// Returns all register names, sorted.
    #[must_use]
    pub fn register_names(&self) -> Vec<&str> {
        self.registers.names()
    }

    // =========================================================================
    // Read-only state
    // =========================================================================

    /// Returns the control stack.
    #[must_use]
    pub fn stack(&self) -> &ControlStack {
        &self.stack
    }

    /// Returns the flag last written by `test`.
    #[must_use]
    pub fn flag(&self) -> bool {
        self.flag
    }

    /// Returns the compiled program.
    #[must_use]
    pub fn program(&self) -> &CompiledProgram {
        &self.program
    }

    /// Returns the operation table.
    #[must_use]
    pub fn operations(&self) -> &OperationTable {
        &self.operations
    }

    /// Returns the remaining instruction range.
    ///
    /// Empty after a clean halt; after a failed run it is wherever the
    /// failing instruction left it.
    #[must_use]
    pub fn cursor(&self) -> Range<usize> {
        self.cursor.clone()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Returns the tracer.
    #[must_use]
    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Returns the tracer mutably.
    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }
}

// =============================================================================
// Evaluation
// =============================================================================

fn evaluate(
    expression: &Expression,
    registers: &RegisterFile,
    operations: &OperationTable,
    labels: &LabelTable,
) -> Result<Value> {
    match expression {
        Expression::Primitive(primitive) => primitive_value(primitive, registers, labels),
        Expression::Operation(call) => apply(call, registers, operations, labels),
    }
}

fn apply(
    call: &OperationCall,
    registers: &RegisterFile,
    operations: &OperationTable,
    labels: &LabelTable,
) -> Result<Value> {
    let operation = operations.get(&call.name)?;
    let args = call
        .args
        .iter()
        .map(|arg| primitive_value(arg, registers, labels))
        .collect::<Result<Vec<_>>>()?;
    operation.call(&args)
}

fn primitive_value(
    primitive: &Primitive,
    registers: &RegisterFile,
    labels: &LabelTable,
) -> Result<Value> {
    match primitive {
        Primitive::Reg(name) => registers.read(name),
        Primitive::Const(value) => Ok(value.clone()),
        Primitive::Label(name) => labels.block_ref(name).map(Value::Label),
    }
}

/// Resolves a jump target against this program's label table.
///
/// Register-held blocks are looked up again by label name so a value seeded
/// from outside can never point past the arena.
fn resolve(target: &Target, registers: &RegisterFile, labels: &LabelTable) -> Result<BlockRef> {
    match target {
        Target::Label(name) => labels.block_ref(name),
        Target::Reg(name) => match registers.get(name)?.value() {
            Value::Label(block) => labels.block_ref(&block.label),
            other => Err(Error::type_mismatch("label", other.type_name())),
        },
    }
}
