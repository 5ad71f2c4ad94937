use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thumbgrid_core::{DEFAULT_OUTPUT_COUNT, GalleryError, clamp_output_count};
use thumbgrid_graph::DEFAULT_CONTROL_ROW_HEIGHT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Height of the button/field row drawn above the grid.
    pub control_row_height: f32,
    /// Output count a new widget starts with. Clamped to `[1, 6]` on use.
    pub default_output_count: i64,
    /// Decode thumbnails on a worker thread instead of inline.
    pub decode_in_background: bool,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            control_row_height: DEFAULT_CONTROL_ROW_HEIGHT,
            default_output_count: DEFAULT_OUTPUT_COUNT as i64,
            decode_in_background: true,
        }
    }
}

impl WidgetSettings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("thumbgrid").join("settings.json"))
    }

    /// Load from the user config directory, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            tracing::info!("No config directory, using default settings");
            return Self::default();
        };
        if !path.exists() {
            tracing::info!("Settings file not found, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("Failed to load settings from {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, GalleryError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| GalleryError::SettingsParse(e.to_string()))?;
        tracing::info!("Settings loaded from {:?}", path);
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), GalleryError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| GalleryError::SettingsParse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn output_count(&self) -> usize {
        clamp_output_count(self.default_output_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"default_output_count": 4}"#).unwrap();

        let settings = WidgetSettings::load_from(&path).unwrap();
        assert_eq!(settings.default_output_count, 4);
        assert_eq!(settings.control_row_height, DEFAULT_CONTROL_ROW_HEIGHT);
        assert!(settings.decode_in_background);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = WidgetSettings {
            control_row_height: 64.0,
            default_output_count: 3,
            decode_in_background: false,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(WidgetSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            WidgetSettings::load_from(&path),
            Err(GalleryError::SettingsParse(_))
        ));
        assert!(matches!(
            WidgetSettings::load_from(&dir.path().join("missing.json")),
            Err(GalleryError::SettingsIo(_))
        ));
    }

    #[test]
    fn test_output_count_is_clamped() {
        let settings = WidgetSettings {
            default_output_count: 12,
            ..WidgetSettings::default()
        };
        assert_eq!(settings.output_count(), 6);
    }
}
