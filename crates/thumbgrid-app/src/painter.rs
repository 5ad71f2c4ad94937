//! Draws a gallery onto a [`RenderSurface`].

use thumbgrid_graph::{GridLayout, RenderSurface, Vec2, palette};

use crate::state::GalleryState;

const PENDING_CROSS_INSET: f32 = 10.0;
const BUTTON_CROSS_INSET: f32 = 4.0;
const ZOOM_LENS_RADIUS: f32 = 4.0;

pub fn paint<S: RenderSurface + ?Sized>(state: &GalleryState, layout: &GridLayout, surface: &mut S) {
    for (slot, index) in layout.mapper().slots() {
        let Some(entry) = state.store.get(index) else {
            continue;
        };
        let cell = layout.cell_rect(slot);

        surface.fill_rect(cell, palette::SLOT_BACKGROUND);

        // Undecoded images keep an empty slot until their size is known.
        if let Some(rect) = entry
            .image()
            .dimensions()
            .and_then(|(w, h)| layout.image_rect(slot).fit(w, h))
        {
            surface.draw_image(entry.image().source(), rect);
        }

        if state.pending.contains(index) {
            surface.fill_rect(cell, palette::PENDING_FILL);
            surface.stroke_cross(cell.shrink(PENDING_CROSS_INSET), palette::PENDING_CROSS, 3.0);
        }

        let delete = layout.delete_button_rect(slot);
        surface.fill_rect(delete, palette::DELETE_BUTTON);
        surface.stroke_cross(delete.shrink(BUTTON_CROSS_INSET), palette::ICON, 2.0);

        let zoom = layout.zoom_button_rect(slot).center();
        let lens = Vec2::new(zoom.x - 1.0, zoom.y - 1.0);
        surface.stroke_circle(lens, ZOOM_LENS_RADIUS, palette::ICON, 2.0);
        surface.stroke_line(
            Vec2::new(zoom.x + 3.0, zoom.y + 3.0),
            Vec2::new(zoom.x + 6.0, zoom.y + 6.0),
            palette::ICON,
            2.0,
        );

        if state.selection.contains(index) {
            surface.stroke_rect(cell.shrink(1.0), palette::SELECTION, 2.0);
        }
    }
}
