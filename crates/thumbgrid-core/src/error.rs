use thiserror::Error;

/// Failure conditions inside the gallery.
///
/// None of these reach the user: callers log them and fall back to the
/// previous consistent state.
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Malformed sync event: {0}")]
    MalformedSync(String),
    #[error("Image decode failed: {0}")]
    Decode(String),
    #[error("Settings IO error: {0}")]
    SettingsIo(#[from] std::io::Error),
    #[error("Settings parse error: {0}")]
    SettingsParse(String),
}

impl GalleryError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSync(reason.into())
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode(reason.into())
    }
}
