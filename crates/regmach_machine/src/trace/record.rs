//! Trace event and record types.

use std::fmt;

/// Events recorded while a machine runs.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceEvent {
    /// `run` was called.
    RunStart {
        /// Number of instructions in the entry sequence.
        instructions: usize,
    },

    /// An instruction is about to execute.
    Execute {
        /// Index of the instruction in the compiled arena.
        index: usize,
        /// The instruction, in source syntax.
        instruction: String,
    },

    /// A `goto` or taken `branch` replaced the cursor.
    Jump {
        /// Label of the destination block.
        label: String,
        /// First instruction of the block.
        start: usize,
        /// One past the last instruction of the block.
        end: usize,
    },

    /// The cursor ran out and the machine halted.
    Halt {
        /// Instructions executed during this run.
        steps: u64,
    },
}

impl TraceEvent {
    /// Returns a short kebab-case name for this event type.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::RunStart { .. } => "run-start",
            Self::Execute { .. } => "execute",
            Self::Jump { .. } => "jump",
            Self::Halt { .. } => "halt",
        }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunStart { instructions } => write!(f, "run start ({instructions} instructions)"),
            Self::Execute { index, instruction } => write!(f, "#{index:04} {instruction}"),
            Self::Jump { label, start, end } => write!(f, "jump -> {label} [{start}..{end})"),
            Self::Halt { steps } => write!(f, "halt after {steps} steps"),
        }
    }
}

/// A recorded trace event with bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceRecord {
    /// Monotonically increasing record ID.
    pub id: u64,
    /// Which call to `run` produced this record (1-based).
    pub run: u64,
    /// Instructions executed in this run when the event was recorded.
    pub step: u64,
    /// The event.
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(id: u64, run: u64, step: u64, event: TraceEvent) -> Self {
        Self {
            id,
            run,
            step,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R{:03} [{:06}] step {}: {}",
            self.run, self.id, self.step, self.event
        )
    }
}
