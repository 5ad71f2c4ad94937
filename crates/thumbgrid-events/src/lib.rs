use serde::{Deserialize, Deserializer, Serialize};
use thumbgrid_core::{GalleryError, ThumbPayload};

pub mod bus;

pub use bus::{Subscription, SyncBus, SyncEnvelope};

/// Name the backend uses when it pushes gallery updates.
pub const SYNC_EVENT_NAME: &str = "thumbgrid.gallery.previews";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Replace the whole entry list. Also assumed when the backend omits `mode`.
    #[default]
    Full,
    /// Apply removals, then additions, to the current entry list.
    Delta,
}

/// Backend-pushed update for one gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncEvent {
    #[serde(default)]
    pub mode: SyncMode,
    /// Complete entry list, used in full mode.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub thumbs: Vec<ThumbPayload>,
    /// Appended entries, used in delta mode.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub adds: Vec<ThumbPayload>,
    /// Data indices to remove, used in delta mode. Unordered.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub removes: Vec<i64>,
    /// Authoritative selection, already renumbered by the backend.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub selected: Vec<usize>,
    /// Size of the backend collection, informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SyncEvent {
    pub fn full(thumbs: Vec<ThumbPayload>, selected: Vec<usize>) -> Self {
        Self {
            mode: SyncMode::Full,
            thumbs,
            selected,
            ..Self::default()
        }
    }

    pub fn delta(removes: Vec<i64>, adds: Vec<ThumbPayload>, selected: Vec<usize>) -> Self {
        Self {
            mode: SyncMode::Delta,
            adds,
            removes,
            selected,
            ..Self::default()
        }
    }

    /// Decode and validate a raw event body.
    pub fn from_value(value: serde_json::Value) -> Result<Self, GalleryError> {
        let event: SyncEvent = serde_json::from_value(value)
            .map_err(|err| GalleryError::malformed(err.to_string()))?;
        event.validate()?;
        Ok(event)
    }

    pub fn from_json(raw: &str) -> Result<Self, GalleryError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|err| GalleryError::malformed(err.to_string()))?;
        Self::from_value(value)
    }

    /// Payloads the event's mode will turn into entries.
    pub fn incoming(&self) -> &[ThumbPayload] {
        match self.mode {
            SyncMode::Full => &self.thumbs,
            SyncMode::Delta => &self.adds,
        }
    }

    fn validate(&self) -> Result<(), GalleryError> {
        if let Some(pos) = self
            .incoming()
            .iter()
            .position(|payload| payload.data.trim().is_empty())
        {
            return Err(GalleryError::malformed(format!(
                "thumb payload {pos} has no image data"
            )));
        }
        Ok(())
    }
}
