//! Player preferences
//!
//! Read from LocalStorage on web and a JSON file in the working directory
//! on native. Game state itself is never saved.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Visual Effects ===
    /// CRT scanline composite
    pub scanlines: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no scanline roll, no rainbow cycling)
    pub reduced_motion: bool,

    /// Bubble Destroyer RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            scanlines: true,
            show_fps: false,
            reduced_motion: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Scanlines actually drawn (respects reduced_motion)
    pub fn effective_scanlines(&self) -> bool {
        self.scanlines && !self.reduced_motion
    }

    /// Parse settings JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "scanline_arcade_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Stored settings unreadable: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Settings file next to the working directory
    #[cfg(not(target_arch = "wasm32"))]
    pub const FILE_NAME: &'static str = "scanline_arcade_settings.json";

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(Self::FILE_NAME)
    }

    /// Read a settings file, falling back to defaults if missing or invalid
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        let loaded = std::fs::read_to_string(path)
            .map_err(crate::ArcadeError::from)
            .and_then(|json| Self::from_json(&json));
        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                if path.exists() {
                    log::warn!("Settings file {} unreadable: {}", path.display(), e);
                } else {
                    log::info!("Using default settings");
                }
                Self::default()
            }
        }
    }

    /// Write a settings file that `load_from` reads back
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{"muted": true, "seed": 42}"#).unwrap();
        assert!(s.muted);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.master_volume, Settings::default().master_volume);
        assert!(s.scanlines);
    }

    #[test]
    fn test_volumes_are_clamped() {
        let s = Settings::from_json(r#"{"master_volume": 3.0, "sfx_volume": -1.0}"#).unwrap();
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.sfx_volume, 0.0);
    }

    #[test]
    fn test_reduced_motion_disables_scanlines() {
        let s = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!s.effective_scanlines());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ nope").is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_roundtrip_and_missing_file() {
        let dir = std::env::temp_dir().join(format!("scanline_settings_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        assert_eq!(Settings::load_from(&path), Settings::default());

        let s = Settings {
            show_fps: true,
            seed: Some(7),
            ..Default::default()
        };
        s.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), s);

        std::fs::remove_dir_all(&dir).ok();
    }
}
