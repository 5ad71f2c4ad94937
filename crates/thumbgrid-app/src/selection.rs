use thumbgrid_core::{DataIndex, MAX_OUTPUTS, clamp_output_count, join_indices};

/// What a [`SelectionTracker::toggle`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Selected { evicted: Vec<DataIndex> },
    Deselected,
}

/// Chosen entries in the order they were picked, bounded by a limit that is
/// read on every toggle. Picking past the limit evicts the oldest pick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    order: Vec<DataIndex>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indices(&self) -> &[DataIndex] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, index: DataIndex) -> bool {
        self.order.contains(&index)
    }

    /// Deselect if present, otherwise select, evicting the oldest picks
    /// until there is room. `limit` is clamped to `[1, 6]`.
    pub fn toggle(&mut self, index: DataIndex, limit: i64) -> SelectionChange {
        if let Some(pos) = self.order.iter().position(|&i| i == index) {
            self.order.remove(pos);
            return SelectionChange::Deselected;
        }

        let limit = clamp_output_count(limit);
        let excess = (self.order.len() + 1).saturating_sub(limit);
        let evicted: Vec<DataIndex> = self.order.drain(..excess).collect();
        self.order.push(index);
        SelectionChange::Selected { evicted }
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    /// Overwrite with a backend-confirmed selection, keeping at most six.
    pub fn replace(&mut self, indices: &[usize]) {
        self.order = indices
            .iter()
            .take(MAX_OUTPUTS)
            .map(|&i| DataIndex(i))
            .collect();
    }

    /// Comma-joined indices in selection order.
    pub fn serialize(&self) -> String {
        join_indices(self.order.iter().map(|i| i.0))
    }
}
