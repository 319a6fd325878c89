//! Bounded, most-recent-first history of rendered results.

use std::collections::VecDeque;

use crate::core::analysis::AnalysisReport;

/// Separator placed between fragments when the history is rendered.
pub const FRAGMENT_SEPARATOR: &str = "<hr>";

/// One rendered result. `markup` is replayed verbatim; `report` is kept so
/// the entry's download action can export it.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: String,
    pub report: AnalysisReport,
    pub markup: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl ResultHistory {
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert at the front; returns the entry evicted from the back, if any.
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// All fragments joined with [`FRAGMENT_SEPARATOR`].
    pub fn joined_markup(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.markup.as_str())
            .collect::<Vec<_>>()
            .join(FRAGMENT_SEPARATOR)
    }
}
