use thumbgrid_core::{DataIndex, ThumbPayload};
use thumbgrid_events::{SyncEvent, SyncMode};

use crate::decode::DecodeWorker;
use crate::entry::Entry;
use crate::state::GalleryState;

/// Summary of one applied sync event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    pub mode: SyncMode,
    pub removed: usize,
    pub added: usize,
    /// Oldest entries dropped to stay within capacity.
    pub truncated: usize,
    pub len: usize,
}

/// Applies backend pushes to a [`GalleryState`].
///
/// The backend is authoritative: after every event the selection equals the
/// event's `selected` list and pending deletions are empty.
#[derive(Debug)]
pub struct SyncReconciler {
    decoder: DecodeWorker,
}

impl SyncReconciler {
    pub fn new(decoder: DecodeWorker) -> Self {
        Self { decoder }
    }

    pub fn decoder(&self) -> &DecodeWorker {
        &self.decoder
    }

    /// Decode and apply a raw event body. Malformed bodies are logged and
    /// leave the state untouched.
    pub fn apply_raw(
        &self,
        state: &mut GalleryState,
        detail: serde_json::Value,
    ) -> Option<SyncOutcome> {
        match SyncEvent::from_value(detail) {
            Ok(event) => Some(self.apply(state, &event)),
            Err(err) => {
                tracing::warn!("Dropping gallery sync event: {}", err);
                None
            }
        }
    }

    pub fn apply(&self, state: &mut GalleryState, event: &SyncEvent) -> SyncOutcome {
        let (removed, added, truncated) = match event.mode {
            SyncMode::Full => {
                let entries = self.build_entries(&event.thumbs);
                let added = entries.len();
                let truncated = state.store.replace_all(entries);
                (0, added, truncated)
            }
            SyncMode::Delta => {
                let removed = Self::apply_removals(state, &event.removes);
                let mut truncated = 0;
                for entry in self.build_entries(&event.adds) {
                    truncated += state.store.append(entry);
                }
                (removed, event.adds.len(), truncated)
            }
        };
        let truncated = truncated + state.store.truncate_to_capacity();

        state.selection.replace(&event.selected);
        state.pending.clear();

        if let Some(count) = event.count {
            tracing::debug!("Backend reports {} entries in its collection", count);
        }

        let outcome = SyncOutcome {
            mode: event.mode,
            removed,
            added,
            truncated,
            len: state.store.len(),
        };
        tracing::info!(
            "Applied {:?} sync: -{} +{} (dropped {}), {} entries, selection [{}]",
            outcome.mode,
            outcome.removed,
            outcome.added,
            outcome.truncated,
            outcome.len,
            state.selection.serialize()
        );
        outcome
    }

    fn build_entries(&self, payloads: &[ThumbPayload]) -> Vec<Entry> {
        payloads
            .iter()
            .cloned()
            .map(|payload| {
                let entry = Entry::from_payload(payload);
                self.decoder.submit(entry.image().clone());
                entry
            })
            .collect()
    }

    /// Highest index first so each removal leaves the lower targets in place.
    /// Duplicates and out-of-range indices are skipped.
    fn apply_removals(state: &mut GalleryState, removes: &[i64]) -> usize {
        let mut targets: Vec<usize> = removes
            .iter()
            .filter_map(|&idx| usize::try_from(idx).ok())
            .collect();
        targets.sort_unstable_by(|a, b| b.cmp(a));
        targets.dedup();

        let mut removed = 0;
        for idx in targets {
            if state.store.remove_at(DataIndex(idx)).is_some() {
                removed += 1;
            } else {
                tracing::debug!("Ignoring removal of missing entry {}", idx);
            }
        }
        removed
    }
}

impl Default for SyncReconciler {
    fn default() -> Self {
        Self::new(DecodeWorker::default())
    }
}
