/// Bounded in-memory history of recent real notifications
///
/// Insertion-ordered, deduplicated by exact string equality, capped at
/// [`HISTORY_CAPACITY`] entries. Used to backfill newly joined subscribers.
/// Volatile by design: the buffer starts empty and is lost on restart.
use std::collections::VecDeque;

use super::classifier::is_real_notification;

/// Maximum number of notifications retained.
pub const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Default)]
pub struct HistoryBuffer {
    entries: VecDeque<String>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Append `text` unless it is already present (exact match).
    ///
    /// Evicts from the front once the buffer exceeds capacity. Callers are
    /// expected to classify before recording; this method only handles
    /// ordering, dedup and eviction. Returns whether the entry was appended.
    pub fn record_if_new(&mut self, text: &str) -> bool {
        if self.entries.iter().any(|entry| entry == text) {
            return false;
        }

        self.entries.push_back(text.to_string());
        while self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        true
    }

    /// The last `n` stored entries that classify as real, in insertion order.
    ///
    /// Stored entries are already real, but the re-filter is kept so a bad
    /// write can never be replayed to a new subscriber.
    pub fn recent_real(&self, n: usize) -> Vec<String> {
        let real: Vec<&String> = self
            .entries
            .iter()
            .filter(|entry| is_real_notification(entry.as_str()))
            .collect();

        real.iter()
            .skip(real.len().saturating_sub(n))
            .map(|entry| entry.to_string())
            .collect()
    }

    /// Every stored entry that classifies as real, in insertion order.
    pub fn all_real(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| is_real_notification(entry.as_str()))
            .cloned()
            .collect()
    }

    /// Total stored entries, real or not. Used for status reporting.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
