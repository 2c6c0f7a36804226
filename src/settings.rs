//! Player preferences
//!
//! Persisted in LocalStorage, independent of any game session.

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
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Visuals ===
    /// Draw the starfield/grid layer
    pub show_background: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.6,
            music_volume: 0.3,
            muted: false,
            show_background: true,
        }
    }
}

impl Settings {
    /// Effective sound effect gain
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music gain
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "neon_catch_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_silences_everything() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        assert_eq!(settings.sfx_gain(), 0.0);
        assert_eq!(settings.music_gain(), 0.0);
    }

    #[test]
    fn test_gains() {
        let settings = Settings::default();
        assert!((settings.sfx_gain() - 0.48).abs() < 1e-5);
        assert!((settings.music_gain() - 0.24).abs() < 1e-5);
    }

    #[test]
    fn test_old_json_fills_new_fields() {
        let settings: Settings = serde_json::from_str(r#"{ "muted": true }"#).unwrap();
        assert!(settings.muted);
        assert!(settings.show_background);
    }
}
