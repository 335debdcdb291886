//! Optional record of what a machine did.
//!
//! A traced run yields a `run-start`, one `execute` per instruction, a
//! `jump` whenever the cursor is replaced and a closing `halt`. Disabled
//! tracers skip even formatting the instruction.

pub mod buffer;
pub mod record;

pub use buffer::TraceBuffer;
pub use record::{TraceEvent, TraceRecord};

use std::io::{self, Write};

use crate::instruction::Instruction;

/// Echo destination for records as they are taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceOutput {
    /// Keep records in the buffer only.
    #[default]
    None,
    /// Also print each record to stderr.
    Stderr,
}

/// Tracer settings. Off by default, with room for 10 000 records.
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Master switch.
    pub enabled: bool,
    /// Ring capacity. The oldest records fall off first.
    pub buffer_size: usize,
    /// Echo destination.
    pub output: TraceOutput,
    /// Event type names to keep. Empty keeps everything.
    pub event_filter: Vec<String>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 10_000,
            output: TraceOutput::None,
            event_filter: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// Same as `default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns tracing on.
    #[must_use]
    pub fn enabled(self) -> Self {
        Self {
            enabled: true,
            ..self
        }
    }

    /// Sets the ring capacity.
    #[must_use]
    pub fn with_buffer_size(self, buffer_size: usize) -> Self {
        Self {
            buffer_size,
            ..self
        }
    }

    /// Echoes every kept record to stderr.
    #[must_use]
    pub fn to_stderr(self) -> Self {
        Self {
            output: TraceOutput::Stderr,
            ..self
        }
    }

    /// Keeps only events whose `event_type()` is listed.
    #[must_use]
    pub fn filter_events(self, event_filter: Vec<String>) -> Self {
        Self {
            event_filter,
            ..self
        }
    }

    fn keeps(&self, event: &TraceEvent) -> bool {
        self.event_filter.is_empty() || self.event_filter.iter().any(|t| t == event.event_type())
    }
}

/// Collects [`TraceRecord`]s for a machine, numbering runs from 1.
#[derive(Clone, Debug)]
pub struct Tracer {
    config: TracerConfig,
    buffer: TraceBuffer,
    run: u64,
}

impl Tracer {
    /// A tracer with an empty buffer sized from `config`.
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        Self {
            buffer: TraceBuffer::new(config.buffer_size),
            config,
            run: 0,
        }
    }

    /// True when events are being kept.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Starts keeping events.
    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    /// Stops keeping events. The buffer is left as is.
    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    /// Number of the run in progress, or of the last one. Zero before any run.
    #[must_use]
    pub fn current_run(&self) -> u64 {
        self.run
    }

    /// Keeps `event` if tracing is on and the filter lets it through.
    #[inline]
    pub fn record(&mut self, step: u64, event: TraceEvent) {
        self.record_with(step, || event);
    }

    /// Like `record`, but only builds the event when it will be kept.
    fn record_with(&mut self, step: u64, event: impl FnOnce() -> TraceEvent) {
        if !self.config.enabled {
            return;
        }
        let event = event();
        if !self.config.keeps(&event) {
            return;
        }
        self.buffer.push(self.run, step, event);
        if self.config.output == TraceOutput::Stderr {
            if let Some(record) = self.buffer.last() {
                let _ = writeln!(io::stderr().lock(), "{record}");
            }
        }
    }

    /// Records kept so far.
    #[must_use]
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Drops every kept record. Run numbering carries on.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Opens a new run over a cursor of `instructions` entries.
    #[inline]
    pub fn run_start(&mut self, instructions: usize) {
        self.run += 1;
        self.record(0, TraceEvent::RunStart { instructions });
    }

    /// Notes that `instruction`, at arena `index`, is about to execute.
    #[inline]
    pub fn execute(&mut self, step: u64, index: usize, instruction: &Instruction) {
        self.record_with(step, || TraceEvent::Execute {
            index,
            instruction: instruction.to_string(),
        });
    }

    /// Notes that the cursor was replaced by `label`'s block.
    #[inline]
    pub fn jump(&mut self, step: u64, label: &str, start: usize, end: usize) {
        self.record_with(step, || TraceEvent::Jump {
            label: label.to_string(),
            start,
            end,
        });
    }

    /// Closes the run after `steps` instructions.
    #[inline]
    pub fn halt(&mut self, steps: u64) {
        self.record(steps, TraceEvent::Halt { steps });
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new(TracerConfig::default())
    }
}
