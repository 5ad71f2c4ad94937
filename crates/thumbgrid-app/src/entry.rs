use parking_lot::RwLock;
use std::sync::Arc;
use thumbgrid_core::{DataIndex, STORE_CAPACITY, ThumbPayload};

use crate::decode::decode_dimensions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    Pending,
    Ready { width: u32, height: u32 },
    Failed,
}

/// Encoded image plus its decode progress.
///
/// Clones share the decode state, so a worker thread can resolve a handle
/// that is already stored in an entry.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    source: Arc<str>,
    state: Arc<RwLock<DecodeState>>,
}

impl ImageHandle {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self::with_state(source, DecodeState::Pending)
    }

    /// Handle whose dimensions are already known.
    pub fn with_size(source: impl Into<Arc<str>>, width: u32, height: u32) -> Self {
        Self::with_state(source, DecodeState::Ready { width, height })
    }

    fn with_state(source: impl Into<Arc<str>>, state: DecodeState) -> Self {
        Self {
            source: source.into(),
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn state(&self) -> DecodeState {
        *self.state.read()
    }

    pub fn is_pending(&self) -> bool {
        self.state() == DecodeState::Pending
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self.state() {
            DecodeState::Ready { width, height } => Some((width, height)),
            _ => None,
        }
    }

    /// Decode on the calling thread. Only a pending handle changes state.
    pub fn decode_now(&self) {
        if !self.is_pending() {
            return;
        }
        let resolved = match decode_dimensions(&self.source) {
            Ok((width, height)) => DecodeState::Ready { width, height },
            Err(err) => {
                tracing::warn!("Thumbnail decode failed: {}", err);
                DecodeState::Failed
            }
        };
        let mut state = self.state.write();
        if *state == DecodeState::Pending {
            *state = resolved;
        }
    }
}

/// One thumbnail. Immutable once created.
#[derive(Debug, Clone)]
pub struct Entry {
    image: ImageHandle,
    payload: Arc<ThumbPayload>,
}

impl Entry {
    pub fn from_payload(payload: ThumbPayload) -> Self {
        let image = match payload.size_hint() {
            Some((width, height)) => ImageHandle::with_size(payload.data.as_str(), width, height),
            None => ImageHandle::new(payload.data.as_str()),
        };
        Self {
            image,
            payload: Arc::new(payload),
        }
    }

    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    pub fn payload(&self) -> &ThumbPayload {
        &self.payload
    }
}

/// Ordered thumbnails; position is the data index, oldest first.
#[derive(Debug, Clone)]
pub struct EntryStore {
    entries: Vec<Entry>,
    capacity: usize,
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryStore {
    pub fn new() -> Self {
        Self::with_capacity(STORE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: DataIndex) -> Option<&Entry> {
        self.entries.get(index.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn contains(&self, index: DataIndex) -> bool {
        index.0 < self.entries.len()
    }

    /// Append at the newest end. Returns how many old entries were dropped
    /// to stay within capacity.
    pub fn append(&mut self, entry: Entry) -> usize {
        self.entries.push(entry);
        self.truncate_to_capacity()
    }

    /// Positional removal; later entries move down by one.
    pub fn remove_at(&mut self, index: DataIndex) -> Option<Entry> {
        self.contains(index).then(|| self.entries.remove(index.0))
    }

    /// Returns how many entries were dropped to stay within capacity.
    pub fn replace_all(&mut self, entries: Vec<Entry>) -> usize {
        self.entries = entries;
        self.truncate_to_capacity()
    }

    /// Drop the oldest entries until the store fits its capacity.
    pub fn truncate_to_capacity(&mut self) -> usize {
        let excess = self.entries.len().saturating_sub(self.capacity);
        if excess > 0 {
            self.entries.drain(..excess);
            tracing::debug!("Dropped {} oldest thumbnails over capacity", excess);
        }
        excess
    }
}
