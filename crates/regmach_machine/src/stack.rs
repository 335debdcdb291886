//! The control stack used by `save` and `restore`.

use regmach_foundation::{Error, Result, Value};

/// LIFO value stack.
///
/// Unbounded apart from available memory. Popping an empty stack is an
/// error, never a default value.
#[derive(Clone, Debug, Default)]
pub struct ControlStack {
    values: Vec<Value>,
}

impl ControlStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a value.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Pops the most recently pushed value.
    ///
    /// # Errors
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn pop(&mut self) -> Result<Value> {
        self.values.pop().ok_or_else(Error::stack_underflow)
    }

    /// Returns the most recently pushed value without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Value> {
        self.values.last()
    }

    /// Returns true if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of values on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.values.len()
    }
}
