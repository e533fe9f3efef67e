use super::render::ResultView;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: u64,
    pub view: ResultView,
    pub highlighted: bool,
}

/// Rendered results, newest first.
#[derive(Debug, Default)]
pub struct ResultHistory {
    entries: VecDeque<HistoryEntry>,
}

impl ResultHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `view` in front, highlighted. Returns the new entry and the ids
    /// of older entries whose highlight was dropped to make room for it.
    pub fn prepend(&mut self, id: u64, view: ResultView) -> (HistoryEntry, Vec<u64>) {
        let mut dimmed = Vec::new();
        for entry in self.entries.iter_mut().filter(|e| e.highlighted) {
            entry.highlighted = false;
            dimmed.push(entry.id);
        }
        let entry = HistoryEntry {
            id,
            view,
            highlighted: true,
        };
        self.entries.push_front(entry.clone());
        (entry, dimmed)
    }

    /// Returns false when the entry is gone or was no longer highlighted.
    pub fn clear_highlight(&mut self, id: u64) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) if entry.highlighted => {
                entry.highlighted = false;
                true
            }
            _ => false,
        }
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
