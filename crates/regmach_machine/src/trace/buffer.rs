//! Bounded storage for trace records.

use std::collections::VecDeque;

use super::record::{TraceEvent, TraceRecord};

/// Holds at most `max_size` records, dropping from the front once full.
#[derive(Clone, Debug)]
pub struct TraceBuffer {
    records: VecDeque<TraceRecord>,
    max_size: usize,
    next_id: u64,
}

impl TraceBuffer {
    /// An empty buffer. Preallocates at most 1024 slots.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            next_id: 0,
        }
    }

    /// Appends `event` and returns its id. Ids never repeat within a buffer.
    pub fn push(&mut self, run: u64, step: u64, event: TraceEvent) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        if self.max_size == 0 {
            return id;
        }
        if self.records.len() == self.max_size {
            self.records.pop_front();
        }
        self.records.push_back(TraceRecord::new(id, run, step, event));

        id
    }

    /// Records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clears all records. IDs keep increasing afterwards.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records.iter()
    }

    /// The newest record still held.
    #[must_use]
    pub fn last(&self) -> Option<&TraceRecord> {
        self.records.back()
    }

    /// Up to `count` of the newest records, oldest first.
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<&TraceRecord> {
        let start = self.records.len().saturating_sub(count);
        self.records.iter().skip(start).collect()
    }

    /// Records whose event has this `event_type()`.
    #[must_use]
    pub fn by_event_type(&self, event_type: &str) -> Vec<&TraceRecord> {
        self.records
            .iter()
            .filter(|r| r.event_type() == event_type)
            .collect()
    }

    /// Records taken during run number `run`.
    #[must_use]
    pub fn records_for_run(&self, run: u64) -> Vec<&TraceRecord> {
        self.records.iter().filter(|r| r.run == run).collect()
    }
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::new(10_000)
    }
}
