//! Visual slot <-> data index mapping.
//!
//! The grid shows the newest entry first: with `n` entries, slot 0 holds data
//! index `n - 1` and slot `n - 1` holds data index 0.

use thumbgrid_core::{DataIndex, VisualSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMapper {
    total: usize,
}

impl IndexMapper {
    pub fn new(total: usize) -> Self {
        Self { total }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn to_data(&self, slot: VisualSlot) -> Option<DataIndex> {
        (slot.0 < self.total).then(|| DataIndex(self.total - 1 - slot.0))
    }

    pub fn to_visual(&self, index: DataIndex) -> Option<VisualSlot> {
        (index.0 < self.total).then(|| VisualSlot(self.total - 1 - index.0))
    }

    /// Every slot in drawing order, paired with the entry it shows.
    pub fn slots(&self) -> impl Iterator<Item = (VisualSlot, DataIndex)> + use<> {
        let total = self.total;
        (0..total).map(move |slot| (VisualSlot(slot), DataIndex(total - 1 - slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_newest_entry_is_first_slot() {
        let mapper = IndexMapper::new(5);
        assert_eq!(mapper.to_data(VisualSlot(0)), Some(DataIndex(4)));
        assert_eq!(mapper.to_data(VisualSlot(4)), Some(DataIndex(0)));
        assert_eq!(mapper.to_visual(DataIndex(3)), Some(VisualSlot(1)));
    }

    #[test]
    fn test_out_of_range_maps_to_none() {
        let mapper = IndexMapper::new(3);
        assert_eq!(mapper.to_data(VisualSlot(3)), None);
        assert_eq!(mapper.to_visual(DataIndex(7)), None);
        assert_eq!(IndexMapper::new(0).to_data(VisualSlot(0)), None);
    }

    #[test]
    fn test_slots_in_drawing_order() {
        let pairs: Vec<_> = IndexMapper::new(3).slots().collect();
        assert_eq!(
            pairs,
            vec![
                (VisualSlot(0), DataIndex(2)),
                (VisualSlot(1), DataIndex(1)),
                (VisualSlot(2), DataIndex(0)),
            ]
        );
    }

    proptest! {
        /// dataIndex = total - 1 - visualSlot for every valid slot, and the
        /// mapping inverts itself.
        #[test]
        fn prop_mapping_is_reversed_bijection(total in 1usize..=30, raw in 0usize..30) {
            prop_assume!(raw < total);
            let mapper = IndexMapper::new(total);
            let data = mapper.to_data(VisualSlot(raw)).unwrap();
            prop_assert_eq!(data.0, total - 1 - raw);
            prop_assert_eq!(mapper.to_visual(data), Some(VisualSlot(raw)));
        }
    }
}
