use crate::entry::EntryStore;
use crate::pending::PendingDeletions;
use crate::selection::SelectionTracker;

/// Everything one gallery instance knows about its thumbnails.
#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    pub store: EntryStore,
    pub selection: SelectionTracker,
    pub pending: PendingDeletions,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }
}
