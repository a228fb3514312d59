//! Player preferences
//!
//! Persisted in LocalStorage. Preferences only; scores are never stored.

use serde::{Deserialize, Serialize};

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Mute all tones (the engine keeps running silently)
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Pop and crash tones (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Continuous engine drone (0.0 - 1.0)
    pub engine_volume: f32,

    // === Visual Effects ===
    /// Neon glow (shadow blur) on cars, road edges and skyline
    pub glow: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 1.0,
            sfx_volume: 1.0,
            engine_volume: 1.0,
            glow: true,
        }
    }
}

impl Settings {
    /// Mix level for discrete tones. Mute is applied live by the audio
    /// dispatcher, not folded in here.
    pub fn sfx_mix(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Mix level for the engine drone
    pub fn engine_mix(&self) -> f32 {
        (self.master_volume * self.engine_volume).clamp(0.0, 1.0)
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "neon_arcade_settings";

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
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
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
                log::debug!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No settings store on native ({})", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
