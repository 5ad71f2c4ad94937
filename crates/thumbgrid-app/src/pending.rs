use std::collections::BTreeSet;
use thumbgrid_core::{DataIndex, join_indices};

/// Entries marked for removal on the next backend run.
///
/// Membership only; serialization is ascending so the outbound field is
/// stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingDeletions {
    marked: BTreeSet<DataIndex>,
}

impl PendingDeletions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, index: DataIndex) -> bool {
        self.marked.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.marked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DataIndex> + '_ {
        self.marked.iter().copied()
    }

    /// Returns whether the index is marked afterwards.
    pub fn toggle(&mut self, index: DataIndex) -> bool {
        if self.marked.remove(&index) {
            false
        } else {
            self.marked.insert(index);
            true
        }
    }

    /// Mark exactly `0..count`.
    pub fn mark_all(&mut self, count: usize) {
        self.marked = (0..count).map(DataIndex).collect();
    }

    pub fn clear(&mut self) {
        self.marked.clear();
    }

    pub fn serialize(&self) -> String {
        join_indices(self.marked.iter().map(|i| i.0))
    }
}
