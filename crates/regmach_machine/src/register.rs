//! Named register cells.

use std::collections::HashMap;

use regmach_foundation::{Error, Result, Value};

/// A single named mutable value cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Register {
    value: Value,
}

impl Register {
    /// Creates a register holding `nil`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current contents.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replaces the contents.
    pub fn set(&mut self, value: Value) {
        self.value = value;
    }
}

/// The machine's register set, keyed by name.
///
/// Registers are allocated once at setup and never removed.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    registers: HashMap<String, Register>,
}

impl RegisterFile {
    /// Creates an empty register file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a register.
    ///
    /// # Errors
    /// Returns `DuplicateRegister` if `name` is already allocated.
    pub fn allocate(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.registers.contains_key(&name) {
            return Err(Error::duplicate_register(name));
        }
        self.registers.insert(name, Register::new());
        Ok(())
    }

    /// Looks up a register.
    ///
    /// # Errors
    /// Returns `UnknownRegister` if `name` was never allocated.
    pub fn get(&self, name: &str) -> Result<&Register> {
        self.registers
            .get(name)
            .ok_or_else(|| Error::unknown_register(name))
    }

    /// Looks up a register for writing.
    ///
    /// # Errors
    /// Returns `UnknownRegister` if `name` was never allocated.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Register> {
        self.registers
            .get_mut(name)
            .ok_or_else(|| Error::unknown_register(name))
    }

    /// Reads a register's value.
    ///
    /// # Errors
    /// Returns `UnknownRegister` if `name` was never allocated.
    pub fn read(&self, name: &str) -> Result<Value> {
        self.get(name).map(|r| r.value().clone())
    }

    /// Writes a register's value.
    ///
    /// # Errors
    /// Returns `UnknownRegister` if `name` was never allocated.
    pub fn write(&mut self, name: &str, value: Value) -> Result<()> {
        self.get_mut(name)?.set(value);
        Ok(())
    }

    /// Returns true if `name` is allocated.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.registers.contains_key(name)
    }

    /// Returns the number of registers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    /// Returns true if no registers are allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Returns register names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.registers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
