use serde::{Deserialize, Serialize};
use thumbgrid_core::{DataIndex, WidgetId, clamp_output_count};
use thumbgrid_events::{Subscription, SyncBus, SyncEvent};
use thumbgrid_graph::{GridLayout, HitResult, HitTester, RenderSurface, Vec2};

use crate::arity::{ArityChange, OutputArityController, OutputPorts};
use crate::decode::DecodeWorker;
use crate::painter;
use crate::reconciler::{SyncOutcome, SyncReconciler};
use crate::selection::SelectionChange;
use crate::settings::WidgetSettings;
use crate::state::GalleryState;

/// Node fields the backend reads when the graph executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFields {
    /// Selected data indices in selection order, comma-joined.
    pub selected_indices: String,
    /// Data indices marked for deletion, comma-joined.
    pub pending_deletions: String,
    pub output_count: i64,
}

/// An open preview overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub index: DataIndex,
    /// High-resolution image when the backend sent one, else the thumbnail.
    pub source: String,
}

/// One gallery attached to one graph node.
///
/// Construction is two-phase: [`GalleryWidget::new`] builds empty state and
/// the owning framework calls [`GalleryWidget::finalize_layout`] once the
/// node is set up.
#[derive(Debug)]
pub struct GalleryWidget {
    id: WidgetId,
    settings: WidgetSettings,
    state: GalleryState,
    fields: NodeFields,
    ports: OutputPorts,
    layout: GridLayout,
    hit_tester: HitTester,
    size: Vec2,
    preview: Option<PreviewRequest>,
    reconciler: SyncReconciler,
    subscription: Option<Subscription>,
    needs_redraw: bool,
}

impl GalleryWidget {
    pub fn new(id: WidgetId, settings: WidgetSettings) -> Self {
        let decoder = if settings.decode_in_background {
            DecodeWorker::spawn()
        } else {
            DecodeWorker::inline()
        };
        let layout = GridLayout::new(0, settings.control_row_height);
        let fields = NodeFields {
            selected_indices: String::new(),
            pending_deletions: String::new(),
            output_count: settings.output_count() as i64,
        };

        Self {
            id,
            settings,
            state: GalleryState::new(),
            fields,
            ports: OutputPorts::new(),
            layout,
            hit_tester: HitTester::new(),
            size: layout.min_size(),
            preview: None,
            reconciler: SyncReconciler::new(decoder),
            subscription: None,
            needs_redraw: true,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn settings(&self) -> &WidgetSettings {
        &self.settings
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn fields(&self) -> &NodeFields {
        &self.fields
    }

    pub fn ports(&self) -> &OutputPorts {
        &self.ports
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn preview(&self) -> Option<&PreviewRequest> {
        self.preview.as_ref()
    }

    // -- Lifecycle --

    /// Start receiving sync events. Replaces any earlier subscription.
    pub fn attach(&mut self, bus: &SyncBus) {
        self.subscription = Some(bus.subscribe(self.id));
    }

    pub fn detach(&mut self) {
        self.subscription = None;
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Second initialization phase: match ports to the configured count and
    /// lay out the grid.
    pub fn finalize_layout(&mut self) -> ArityChange {
        self.apply_output_count()
    }

    // -- Output count --

    /// Edit the output count field. Ports do not follow until
    /// [`Self::apply_output_count`].
    pub fn set_output_count(&mut self, value: i64) {
        self.fields.output_count = clamp_output_count(value) as i64;
    }

    /// Selection limit, read fresh from the output count field.
    pub fn selection_limit(&self) -> usize {
        clamp_output_count(self.fields.output_count)
    }

    /// The explicit "apply" control.
    pub fn apply_output_count(&mut self) -> ArityChange {
        let change = OutputArityController::apply(&mut self.ports, self.fields.output_count);
        self.recompute_layout();
        change
    }

    // -- Pointer input --

    /// Handle a pointer-down in widget-local coordinates.
    pub fn on_pointer_down(&mut self, pos: Vec2) -> HitResult {
        let hit = self.hit_tester.hit_test(pos);
        match hit {
            HitResult::DeleteToggle(index) => {
                self.toggle_pending(index);
            }
            HitResult::Zoom(index) => {
                self.open_preview(index);
            }
            HitResult::Thumbnail(index) => {
                self.toggle_selection(index);
            }
            HitResult::None => {}
        }
        hit
    }

    /// No-op for indices outside the store.
    pub fn toggle_selection(&mut self, index: DataIndex) -> Option<SelectionChange> {
        if !self.state.store.contains(index) {
            return None;
        }
        let change = self
            .state
            .selection
            .toggle(index, self.fields.output_count);
        tracing::debug!("Selection toggle {} -> {:?}", index, change);
        self.sync_fields();
        Some(change)
    }

    /// No-op for indices outside the store.
    pub fn toggle_pending(&mut self, index: DataIndex) -> Option<bool> {
        if !self.state.store.contains(index) {
            return None;
        }
        let marked = self.state.pending.toggle(index);
        tracing::debug!("Pending deletion {} -> {}", index, marked);
        self.sync_fields();
        Some(marked)
    }

    /// Bulk "delete all": mark every entry and drop the selection.
    pub fn mark_all_for_deletion(&mut self) {
        self.state.pending.mark_all(self.state.store.len());
        self.state.selection.clear();
        self.sync_fields();
    }

    pub fn open_preview(&mut self, index: DataIndex) -> Option<&PreviewRequest> {
        let entry = self.state.store.get(index)?;
        self.preview = Some(PreviewRequest {
            index,
            source: entry.payload().preview_source().to_string(),
        });
        self.needs_redraw = true;
        self.preview.as_ref()
    }

    pub fn close_preview(&mut self) {
        if self.preview.take().is_some() {
            self.needs_redraw = true;
        }
    }

    // -- Sync --

    /// Apply every pending bus event in arrival order. Returns how many were
    /// applied; malformed ones are dropped.
    pub fn poll_sync(&mut self) -> usize {
        let Some(subscription) = &self.subscription else {
            return 0;
        };
        let pending = subscription.drain();
        pending
            .into_iter()
            .filter_map(|detail| self.apply_sync_value(detail))
            .count()
    }

    pub fn apply_sync_value(&mut self, detail: serde_json::Value) -> Option<SyncOutcome> {
        let outcome = self.reconciler.apply_raw(&mut self.state, detail)?;
        self.after_sync();
        Some(outcome)
    }

    pub fn apply_sync(&mut self, event: &SyncEvent) -> SyncOutcome {
        let outcome = self.reconciler.apply(&mut self.state, event);
        self.after_sync();
        outcome
    }

    fn after_sync(&mut self) {
        // Data indices were renumbered, so an open preview may point elsewhere.
        self.preview = None;
        self.sync_fields();
        self.recompute_layout();
    }

    // -- Layout and drawing --

    pub fn recompute_layout(&mut self) {
        self.layout = GridLayout::new(self.state.store.len(), self.settings.control_row_height);
        self.hit_tester.update(&self.layout);
        self.size = self.layout.clamp_size(self.size);
        self.needs_redraw = true;
    }

    /// Host resize request; the node never shrinks below its grid.
    pub fn resize(&mut self, requested: Vec2) -> Vec2 {
        self.size = self.layout.clamp_size(requested);
        self.size
    }

    pub fn paint<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        painter::paint(&self.state, &self.layout, surface);
    }

    /// Whether something changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn sync_fields(&mut self) {
        self.fields.selected_indices = self.state.selection.serialize();
        self.fields.pending_deletions = self.state.pending.serialize();
        self.needs_redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thumbgrid_core::{ThumbPayload, VisualSlot};

    fn widget() -> GalleryWidget {
        let settings = WidgetSettings {
            decode_in_background: false,
            ..WidgetSettings::default()
        };
        let mut widget = GalleryWidget::new(WidgetId::new(), settings);
        widget.finalize_layout();
        widget
    }

    fn with_entries(count: usize) -> GalleryWidget {
        let mut widget = widget();
        let thumbs = (0..count)
            .map(|n| ThumbPayload::new(format!("t{n}")).with_size(8, 8))
            .collect();
        widget.apply_sync(&SyncEvent::full(thumbs, vec![]));
        widget
    }

    fn body(widget: &GalleryWidget, index: usize) -> Vec2 {
        let slot = widget.layout().mapper().to_visual(DataIndex(index)).unwrap();
        let cell = widget.layout().cell_rect(slot);
        Vec2::new(cell.min.x + 10.0, cell.min.y + 40.0)
    }

    #[test]
    fn test_finalize_creates_default_ports() {
        let widget = widget();
        assert_eq!(widget.ports().names(), vec!["image_1", "image_2"]);
        assert_eq!(widget.fields().output_count, 2);
    }

    #[test]
    fn test_click_selects_mapped_entry() {
        let mut widget = with_entries(5);
        let pos = body(&widget, 1);
        assert_eq!(widget.on_pointer_down(pos), HitResult::Thumbnail(DataIndex(1)));
        assert_eq!(widget.fields().selected_indices, "1");
    }

    #[test]
    fn test_selection_limit_follows_output_field() {
        let mut widget = with_entries(5);
        for index in [0, 1, 2] {
            let pos = body(&widget, index);
            widget.on_pointer_down(pos);
        }
        assert_eq!(widget.fields().selected_indices, "1,2");

        widget.set_output_count(3);
        let pos = body(&widget, 4);
        widget.on_pointer_down(pos);
        assert_eq!(widget.fields().selected_indices, "1,2,4");
        // Ports only change when the count is applied.
        assert_eq!(widget.ports().ports().len(), 2);
    }

    #[test]
    fn test_delete_click_leaves_selection_alone() {
        let mut widget = with_entries(3);
        let pos = body(&widget, 2);
        widget.on_pointer_down(pos);

        let delete = widget.layout().delete_button_rect(VisualSlot(0)).center();
        assert_eq!(widget.on_pointer_down(delete), HitResult::DeleteToggle(DataIndex(2)));
        assert_eq!(widget.fields().pending_deletions, "2");
        assert_eq!(widget.fields().selected_indices, "2");

        widget.on_pointer_down(delete);
        assert_eq!(widget.fields().pending_deletions, "");
    }

    #[test]
    fn test_zoom_click_opens_preview_only() {
        let mut widget = widget();
        widget.apply_sync(&SyncEvent::full(
            vec![
                ThumbPayload::new("small").with_preview("large"),
                ThumbPayload::new("only-small"),
            ],
            vec![0],
        ));

        let zoom = widget.layout().zoom_button_rect(VisualSlot(1)).center();
        assert_eq!(widget.on_pointer_down(zoom), HitResult::Zoom(DataIndex(0)));
        assert_eq!(widget.preview().map(|p| p.source.as_str()), Some("large"));
        assert_eq!(widget.fields().selected_indices, "0");
        assert_eq!(widget.fields().pending_deletions, "");

        widget.open_preview(DataIndex(1));
        assert_eq!(widget.preview().map(|p| p.source.as_str()), Some("only-small"));
        widget.close_preview();
        assert!(widget.preview().is_none());
    }

    #[test]
    fn test_out_of_range_toggles_are_noops() {
        let mut widget = with_entries(2);
        assert_eq!(widget.toggle_selection(DataIndex(5)), None);
        assert_eq!(widget.toggle_pending(DataIndex(2)), None);
        assert!(widget.open_preview(DataIndex(9)).is_none());
        assert_eq!(widget.on_pointer_down(Vec2::new(-3.0, 500.0)), HitResult::None);
        assert_eq!(widget.fields().selected_indices, "");
    }

    #[test]
    fn test_mark_all_for_deletion() {
        let mut widget = with_entries(4);
        widget.toggle_selection(DataIndex(3));
        widget.mark_all_for_deletion();
        assert_eq!(widget.fields().pending_deletions, "0,1,2,3");
        assert_eq!(widget.fields().selected_indices, "");
    }

    #[test]
    fn test_sync_resets_fields_and_grows_node() {
        let mut widget = with_entries(2);
        widget.toggle_pending(DataIndex(0));
        let before = widget.size();

        let thumbs = (0..7).map(|n| ThumbPayload::new(format!("n{n}"))).collect();
        widget.apply_sync(&SyncEvent::full(thumbs, vec![6, 5]));

        assert_eq!(widget.fields().pending_deletions, "");
        assert_eq!(widget.fields().selected_indices, "6,5");
        assert_eq!(widget.layout().rows(), 3);
        assert!(widget.size().y > before.y);
    }

    #[test]
    fn test_resize_is_clamped_to_grid() {
        let mut widget = with_entries(6);
        let size = widget.resize(Vec2::new(100.0, 100.0));
        assert_eq!(size, widget.layout().min_size());
    }

    #[test]
    fn test_apply_output_count_clamps() {
        let mut widget = widget();
        widget.set_output_count(10);
        assert_eq!(widget.apply_output_count().count, 6);
        widget.set_output_count(0);
        assert_eq!(widget.apply_output_count().count, 1);
        assert_eq!(widget.selection_limit(), 1);
    }

    #[test]
    fn test_sync_closes_preview() {
        let mut widget = with_entries(3);
        assert!(widget.open_preview(DataIndex(1)).is_some());

        let malformed = serde_json::json!({ "mode": "delta", "removes": "all" });
        assert!(widget.apply_sync_value(malformed).is_none());
        assert_eq!(widget.preview().map(|p| p.index), Some(DataIndex(1)));

        let delta = serde_json::json!({ "mode": "delta", "removes": [0] });
        assert!(widget.apply_sync_value(delta).is_some());
        assert!(widget.preview().is_none());
    }

    #[test]
    fn test_decode_mode_follows_settings() {
        assert!(!widget().reconciler.decoder().is_background());

        let background = GalleryWidget::new(WidgetId::new(), WidgetSettings::default());
        assert!(background.reconciler.decoder().is_background());
    }

    #[test]
    fn test_redraw_flag() {
        let mut widget = with_entries(1);
        assert!(widget.take_redraw());
        assert!(!widget.take_redraw());
        widget.toggle_pending(DataIndex(0));
        assert!(widget.take_redraw());
    }
}
