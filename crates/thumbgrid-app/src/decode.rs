//! Thumbnail decoding.
//!
//! Entries are created with a pending image handle; the dimensions arrive
//! later from a background thread. Rendering skips image content until then.

use base64::Engine;
use crossbeam_channel::{Sender, unbounded};
use std::io::Cursor;
use std::thread::JoinHandle;
use thumbgrid_core::GalleryError;

use crate::entry::ImageHandle;

/// Raw bytes of a data URL (`data:image/png;base64,...`) or bare base64.
pub fn source_bytes(source: &str) -> Result<Vec<u8>, GalleryError> {
    let encoded = match source.strip_prefix("data:") {
        Some(rest) => {
            let (_, data) = rest
                .split_once(";base64,")
                .ok_or_else(|| GalleryError::decode("data URL is not base64 encoded"))?;
            data
        }
        None => source,
    };
    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|err| GalleryError::decode(err.to_string()))
}

/// Read the pixel dimensions of an encoded image.
pub fn decode_dimensions(source: &str) -> Result<(u32, u32), GalleryError> {
    let bytes = source_bytes(source)?;
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| GalleryError::decode(err.to_string()))?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|err| GalleryError::decode(err.to_string()))?;
    if width == 0 || height == 0 {
        return Err(GalleryError::decode(format!(
            "empty image ({width}x{height})"
        )));
    }
    Ok((width, height))
}

/// Resolves pending image handles, on a worker thread when available.
pub struct DecodeWorker {
    tx: Option<Sender<ImageHandle>>,
    thread: Option<JoinHandle<()>>,
}

impl DecodeWorker {
    /// Decode on a dedicated thread. Falls back to inline decoding if the
    /// thread cannot be started.
    pub fn spawn() -> Self {
        let (tx, rx) = unbounded::<ImageHandle>();
        let spawned = std::thread::Builder::new()
            .name("thumbgrid-decode".to_string())
            .spawn(move || {
                for handle in rx {
                    handle.decode_now();
                }
            });

        match spawned {
            Ok(thread) => Self {
                tx: Some(tx),
                thread: Some(thread),
            },
            Err(err) => {
                tracing::warn!("Failed to start decode thread, decoding inline: {}", err);
                Self::inline()
            }
        }
    }

    /// Decode synchronously inside [`Self::submit`].
    pub fn inline() -> Self {
        Self {
            tx: None,
            thread: None,
        }
    }

    pub fn is_background(&self) -> bool {
        self.tx.is_some()
    }

    pub fn submit(&self, handle: ImageHandle) {
        if !handle.is_pending() {
            return;
        }
        match &self.tx {
            Some(tx) => {
                if let Err(err) = tx.send(handle) {
                    err.into_inner().decode_now();
                }
            }
            None => handle.decode_now(),
        }
    }
}

impl Default for DecodeWorker {
    fn default() -> Self {
        Self::spawn()
    }
}

impl Drop for DecodeWorker {
    fn drop(&mut self) {
        // Closing the channel lets the thread finish the queue and exit.
        self.tx.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("Decode thread panicked");
            }
        }
    }
}

impl std::fmt::Debug for DecodeWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeWorker")
            .field("background", &self.is_background())
            .finish()
    }
}
