use crate::geometry::{Rect, Vec2};
use crate::index_mapper::IndexMapper;
use thumbgrid_core::{DataIndex, VisualSlot};

pub const COLUMNS: usize = 3;
pub const CELL_SIZE: f32 = 84.0;
pub const PADDING: f32 = 6.0;
/// Side of the delete and zoom buttons.
pub const CONTROL_SIZE: f32 = 16.0;
/// Gap between a control button and its cell's edges.
pub const CONTROL_INSET: f32 = 2.0;
/// Gap between a thumbnail image and its cell's edges.
pub const IMAGE_INSET: f32 = 4.0;
/// Height reserved above the grid when the host reports no control row.
pub const DEFAULT_CONTROL_ROW_HEIGHT: f32 = 100.0;

const STRIDE: f32 = CELL_SIZE + PADDING;

/// Grid geometry for a gallery of `count` entries.
///
/// The grid starts below the control row (buttons and fields) and is laid
/// out in [`COLUMNS`] columns, newest entry first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    count: usize,
    control_row_height: f32,
}

impl GridLayout {
    pub fn new(count: usize, control_row_height: f32) -> Self {
        Self {
            count,
            control_row_height: control_row_height.max(0.0),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn control_row_height(&self) -> f32 {
        self.control_row_height
    }

    pub fn mapper(&self) -> IndexMapper {
        IndexMapper::new(self.count)
    }

    pub fn rows(&self) -> usize {
        self.count.div_ceil(COLUMNS)
    }

    /// Top-left corner of slot 0.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(PADDING, self.control_row_height + PADDING)
    }

    pub fn cell_rect(&self, slot: VisualSlot) -> Rect {
        let row = slot.0 / COLUMNS;
        let col = slot.0 % COLUMNS;
        let origin = self.origin();
        Rect::from_pos_size(
            Vec2::new(origin.x + col as f32 * STRIDE, origin.y + row as f32 * STRIDE),
            Vec2::new(CELL_SIZE, CELL_SIZE),
        )
    }

    /// Delete toggle, anchored at the cell's top-right corner.
    pub fn delete_button_rect(&self, slot: VisualSlot) -> Rect {
        let cell = self.cell_rect(slot);
        Rect::from_pos_size(
            Vec2::new(cell.max.x - CONTROL_SIZE - CONTROL_INSET, cell.min.y + CONTROL_INSET),
            Vec2::new(CONTROL_SIZE, CONTROL_SIZE),
        )
    }

    /// Zoom control, anchored at the cell's bottom-right corner.
    pub fn zoom_button_rect(&self, slot: VisualSlot) -> Rect {
        let cell = self.cell_rect(slot);
        Rect::from_pos_size(
            Vec2::new(
                cell.max.x - CONTROL_SIZE - CONTROL_INSET,
                cell.max.y - CONTROL_SIZE - CONTROL_INSET,
            ),
            Vec2::new(CONTROL_SIZE, CONTROL_SIZE),
        )
    }

    /// Area a thumbnail image is fitted into.
    pub fn image_rect(&self, slot: VisualSlot) -> Rect {
        self.cell_rect(slot).shrink(IMAGE_INSET)
    }

    /// Slot under `pos`. The padding to the right of and below a cell counts
    /// as part of that cell.
    pub fn slot_at(&self, pos: Vec2) -> Option<VisualSlot> {
        let origin = self.origin();
        let x = pos.x - origin.x;
        let y = pos.y - origin.y;
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / STRIDE).floor() as usize;
        let row = (y / STRIDE).floor() as usize;
        if col >= COLUMNS || row >= self.rows() {
            return None;
        }
        let slot = row * COLUMNS + col;
        (slot < self.count).then_some(VisualSlot(slot))
    }

    /// Data index of the entry under `pos`.
    pub fn index_at(&self, pos: Vec2) -> Option<DataIndex> {
        self.slot_at(pos).and_then(|slot| self.mapper().to_data(slot))
    }

    /// Smallest node size that shows every row of the grid.
    pub fn min_size(&self) -> Vec2 {
        let width = PADDING + COLUMNS as f32 * STRIDE - PADDING;
        let height = self.control_row_height + PADDING + self.rows() as f32 * STRIDE + PADDING;
        Vec2::new(width, height)
    }

    /// Grow a requested node size up to [`Self::min_size`].
    pub fn clamp_size(&self, requested: Vec2) -> Vec2 {
        let min = self.min_size();
        Vec2::new(requested.x.max(min.x), requested.y.max(min.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(count: usize) -> GridLayout {
        GridLayout::new(count, 100.0)
    }

    #[test]
    fn test_cell_positions() {
        let grid = layout(7);
        assert_eq!(grid.cell_rect(VisualSlot(0)).min, Vec2::new(6.0, 106.0));
        assert_eq!(grid.cell_rect(VisualSlot(2)).min, Vec2::new(186.0, 106.0));
        assert_eq!(grid.cell_rect(VisualSlot(4)).min, Vec2::new(96.0, 196.0));
    }

    #[test]
    fn test_control_rects() {
        let grid = layout(1);
        let delete = grid.delete_button_rect(VisualSlot(0));
        assert_eq!(delete.min, Vec2::new(72.0, 108.0));
        assert_eq!(delete.max, Vec2::new(88.0, 124.0));

        let zoom = grid.zoom_button_rect(VisualSlot(0));
        assert_eq!(zoom.min, Vec2::new(72.0, 172.0));
        assert_eq!(zoom.max, Vec2::new(88.0, 188.0));
    }

    #[test]
    fn test_rows_round_up() {
        assert_eq!(layout(0).rows(), 0);
        assert_eq!(layout(3).rows(), 1);
        assert_eq!(layout(4).rows(), 2);
        assert_eq!(layout(30).rows(), 10);
    }

    #[test]
    fn test_slot_at() {
        let grid = layout(5);
        assert_eq!(grid.slot_at(Vec2::new(10.0, 110.0)), Some(VisualSlot(0)));
        assert_eq!(grid.slot_at(Vec2::new(100.0, 200.0)), Some(VisualSlot(4)));
        // Padding right of slot 0 still belongs to it.
        assert_eq!(grid.slot_at(Vec2::new(93.0, 110.0)), Some(VisualSlot(0)));
        // Slot 5 is past the last entry.
        assert_eq!(grid.slot_at(Vec2::new(190.0, 200.0)), None);
    }

    #[test]
    fn test_slot_at_outside_grid() {
        let grid = layout(9);
        assert_eq!(grid.slot_at(Vec2::new(2.0, 150.0)), None);
        assert_eq!(grid.slot_at(Vec2::new(50.0, 60.0)), None);
        // Right of the third column does not wrap into the next row.
        assert_eq!(grid.slot_at(Vec2::new(280.0, 110.0)), None);
    }

    #[test]
    fn test_slot_at_rejects_extreme_positions() {
        let grid = layout(5);
        assert_eq!(grid.slot_at(Vec2::new(10.0, 1.0e30)), None);
        assert_eq!(grid.slot_at(Vec2::new(1.0e30, 110.0)), None);
        assert_eq!(grid.slot_at(Vec2::new(f32::NAN, f32::NAN)), None);
        assert_eq!(grid.slot_at(Vec2::new(10.0, f32::INFINITY)), None);
    }

    #[test]
    fn test_negative_control_row_is_zeroed() {
        let grid = GridLayout::new(3, -20.0);
        assert_eq!(grid.control_row_height(), 0.0);
        assert_eq!(grid.origin(), Vec2::new(PADDING, PADDING));
    }

    #[test]
    fn test_index_at_applies_reverse_mapping() {
        let grid = layout(5);
        assert_eq!(grid.index_at(Vec2::new(10.0, 110.0)), Some(DataIndex(4)));
        assert_eq!(grid.index_at(Vec2::new(100.0, 200.0)), Some(DataIndex(0)));
    }

    #[test]
    fn test_min_size() {
        assert_eq!(layout(0).min_size(), Vec2::new(270.0, 112.0));
        assert_eq!(layout(4).min_size(), Vec2::new(270.0, 292.0));
        let clamped = layout(4).clamp_size(Vec2::new(400.0, 10.0));
        assert_eq!(clamped, Vec2::new(400.0, 292.0));
    }
}
