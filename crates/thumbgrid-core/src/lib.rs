use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub mod error;
pub mod indices;

pub use error::GalleryError;
pub use indices::join_indices;

/// Maximum number of entries a gallery keeps. Older entries are dropped first.
pub const STORE_CAPACITY: usize = 30;

/// Lower bound for the output count and the selection limit.
pub const MIN_OUTPUTS: usize = 1;

/// Upper bound for the output count, the selection limit and the
/// authoritative selection accepted from a sync event.
pub const MAX_OUTPUTS: usize = 6;

/// Output count used when the node field is unset or unparsable.
pub const DEFAULT_OUTPUT_COUNT: usize = 2;

/// Position of an entry in the entry store (0 = oldest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DataIndex(pub usize);

impl fmt::Display for DataIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of an entry in the rendered grid (0 = top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VisualSlot(pub usize);

impl fmt::Display for VisualSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one gallery widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(pub Uuid);

impl WidgetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One thumbnail as pushed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbPayload {
    /// Encoded thumbnail, either a data URL or bare base64.
    pub data: String,
    /// Optional higher-resolution variant shown by the preview overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default, rename = "w", skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, rename = "h", skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ThumbPayload {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            preview: None,
            width: None,
            height: None,
        }
    }

    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = Some(preview.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Dimension hint, only when both sides are present and non-zero.
    pub fn size_hint(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }

    /// Source the preview overlay should display.
    pub fn preview_source(&self) -> &str {
        self.preview.as_deref().unwrap_or(&self.data)
    }
}

/// Clamp a configured output count (or selection limit) into
/// `[MIN_OUTPUTS, MAX_OUTPUTS]`.
pub fn clamp_output_count(value: i64) -> usize {
    value.clamp(MIN_OUTPUTS as i64, MAX_OUTPUTS as i64) as usize
}
