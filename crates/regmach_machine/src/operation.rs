//! Caller-supplied primitive operations.
//!
//! The table is opaque to the machine: an operation is any function from a
//! positional argument slice to one value. Errors it returns propagate out
//! of `run` unchanged.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regmach_foundation::{Error, Result, Value};

type OperationFn = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// A named primitive operation.
#[derive(Clone)]
pub struct Operation {
    name: Arc<str>,
    func: Arc<OperationFn>,
}

impl Operation {
    /// Wraps a function as an operation.
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// The operation's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the operation to evaluated arguments.
    ///
    /// # Errors
    /// Returns whatever error the operation itself produces.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.func)(args)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operation({})", self.name)
    }
}

/// Mapping from operation name to [`Operation`].
#[derive(Clone, Debug, Default)]
pub struct OperationTable {
    operations: HashMap<String, Operation>,
}

impl OperationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add an operation.
    #[must_use]
    pub fn with<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.insert(Operation::new(name, func));
        self
    }

    /// Adds or replaces an operation under its own name.
    pub fn insert(&mut self, operation: Operation) {
        self.operations
            .insert(operation.name().to_string(), operation);
    }

    /// Adds every operation from `other`, replacing same-named entries.
    pub fn extend(&mut self, other: OperationTable) {
        self.operations.extend(other.operations);
    }

    /// Looks up an operation.
    ///
    /// # Errors
    /// Returns `UnknownOperation` if `name` is not in the table.
    pub fn get(&self, name: &str) -> Result<&Operation> {
        self.operations
            .get(name)
            .ok_or_else(|| Error::unknown_operation(name))
    }

    /// Returns true if `name` is in the table.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Returns the number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
