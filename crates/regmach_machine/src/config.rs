//! Configuration for a machine.

use crate::trace::TracerConfig;

/// Knobs that do not change what a program computes.
///
/// The default has tracing off and no step limit.
#[derive(Clone, Debug, Default)]
pub struct MachineConfig {
    /// Tracer settings.
    pub trace: TracerConfig,

    /// Maximum instructions a single `run` may execute (None = unbounded).
    pub max_steps: Option<u64>,
}

impl MachineConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that traces every event to stderr.
    #[must_use]
    pub fn tracing() -> Self {
        Self {
            trace: TracerConfig::new().enabled().to_stderr(),
            ..Self::default()
        }
    }

    /// Builder method to set tracer settings.
    #[must_use]
    pub fn with_trace(mut self, trace: TracerConfig) -> Self {
        self.trace = trace;
        self
    }

    /// Builder method to bound the number of steps per run.
    #[must_use]
    pub fn with_max_steps(mut self, limit: u64) -> Self {
        self.max_steps = Some(limit);
        self
    }
}
