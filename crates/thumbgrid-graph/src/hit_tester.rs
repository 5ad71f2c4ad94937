use crate::geometry::{Rect, Vec2};
use crate::grid::GridLayout;
use thumbgrid_core::DataIndex;

/// Result of a hit test at a given position.
///
/// Priority order: DeleteToggle > Zoom > Thumbnail > None
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// Nothing interactive at the tested position.
    None,
    /// The delete toggle of an entry.
    DeleteToggle(DataIndex),
    /// The zoom/preview control of an entry.
    Zoom(DataIndex),
    /// The body of a thumbnail.
    Thumbnail(DataIndex),
}

/// A control button and the entry it acts on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotZone {
    pub rect: Rect,
    pub index: DataIndex,
}

/// Hit tester for the thumbnail grid.
///
/// Holds the control hot-zones of the last layout, already mapped to data
/// indices, and resolves pointer positions with control buttons taking
/// priority over the thumbnail body.
#[derive(Debug, Clone)]
pub struct HitTester {
    layout: GridLayout,
    delete_zones: Vec<HotZone>,
    zoom_zones: Vec<HotZone>,
}

impl Default for HitTester {
    fn default() -> Self {
        Self::new()
    }
}

impl HitTester {
    pub fn new() -> Self {
        Self {
            layout: GridLayout::new(0, 0.0),
            delete_zones: Vec::new(),
            zoom_zones: Vec::new(),
        }
    }

    /// Rebuild hot-zones from a layout.
    ///
    /// Call this after any change to the entry count or control row height.
    pub fn update(&mut self, layout: &GridLayout) {
        self.layout = *layout;
        self.delete_zones.clear();
        self.zoom_zones.clear();

        for (slot, index) in layout.mapper().slots() {
            self.delete_zones.push(HotZone {
                rect: layout.delete_button_rect(slot),
                index,
            });
            self.zoom_zones.push(HotZone {
                rect: layout.zoom_button_rect(slot),
                index,
            });
        }
        tracing::debug!("Rebuilt hit zones for {} thumbnails", layout.count());
    }

    /// Perform a hit test at the given position.
    pub fn hit_test(&self, pos: Vec2) -> HitResult {
        if let Some(index) = self.hit_test_delete(pos) {
            return HitResult::DeleteToggle(index);
        }

        if let Some(index) = self.hit_test_zoom(pos) {
            return HitResult::Zoom(index);
        }

        if let Some(index) = self.layout.index_at(pos) {
            return HitResult::Thumbnail(index);
        }

        HitResult::None
    }

    pub fn hit_test_delete(&self, pos: Vec2) -> Option<DataIndex> {
        Self::find_zone(&self.delete_zones, pos)
    }

    pub fn hit_test_zoom(&self, pos: Vec2) -> Option<DataIndex> {
        Self::find_zone(&self.zoom_zones, pos)
    }

    fn find_zone(zones: &[HotZone], pos: Vec2) -> Option<DataIndex> {
        zones
            .iter()
            .find(|zone| zone.rect.contains(pos))
            .map(|zone| zone.index)
    }

    // -- Accessors for testing --

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn delete_zones(&self) -> &[HotZone] {
        &self.delete_zones
    }

    pub fn zoom_zones(&self) -> &[HotZone] {
        &self.zoom_zones
    }
}
