//! Checkpointed undo log for search-time domain removals.

use std::iter::Rev;
use std::vec::Drain;

/// A value removed from a working domain, with the slot it occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Removal {
    pub(crate) var: usize,
    pub(crate) value: i64,
    pub(crate) position: usize,
}

/// Stack of entries split into checkpoints.
///
/// Backtracking to a checkpoint drains every entry pushed after it, most
/// recent first, so removals can be undone in exact reverse order.
#[derive(Debug, Clone)]
pub(crate) struct Trail<T> {
    /// At index i is the trail length when checkpoint i + 1 was opened.
    delimiters: Vec<usize>,
    entries: Vec<T>,
}

// Manual impl so `T` need not be `Default`.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Self {
            delimiters: Vec::new(),
            entries: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.delimiters.push(self.entries.len());
    }

    pub(crate) fn checkpoint(&self) -> usize {
        self.delimiters.len()
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drops back to `checkpoint`, yielding undone entries newest first.
    pub(crate) fn backtrack_to(&mut self, checkpoint: usize) -> Rev<Drain<'_, T>> {
        debug_assert!(checkpoint <= self.checkpoint());
        let keep = if checkpoint == self.checkpoint() {
            self.entries.len()
        } else {
            self.delimiters[checkpoint]
        };
        self.delimiters.truncate(checkpoint);
        self.entries.drain(keep..).rev()
    }
}
