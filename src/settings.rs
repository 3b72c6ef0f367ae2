//! User preferences
//!
//! Persisted as plain key-value strings in LocalStorage on the web, or as a
//! JSON file natively.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default elasticity (percent)
pub const DEFAULT_ELASTICITY_PERCENT: u8 = 100;

/// Minimum time between elasticity saves (ms)
pub const SAVE_THROTTLE_MS: f64 = 500.0;

/// Simulation preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Collision elasticity as a whole percentage (0 - 100)
    pub collision_elasticity: u8,
    /// Keep previously drawn positions on screen
    pub persist_path: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            collision_elasticity: DEFAULT_ELASTICITY_PERCENT,
            persist_path: false,
        }
    }
}

/// Parse a percentage the way a slider value is stored
///
/// Accepts any finite number and keeps its integer part, clamped to 0..=100.
pub fn parse_percent(s: &str) -> Option<u8> {
    let value: f64 = s.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc().clamp(0.0, 100.0) as u8)
}

impl Settings {
    /// LocalStorage keys
    pub const ELASTICITY_KEY: &'static str = "collision_elasticity";
    pub const PERSIST_KEY: &'static str = "persist";

    /// Elasticity as a coefficient in [0, 1]
    pub fn elasticity(&self) -> f64 {
        f64::from(self.collision_elasticity) / 100.0
    }

    /// Set elasticity from a slider percentage, clamped to 0..=100
    pub fn set_elasticity_percent(&mut self, percent: i32) {
        self.collision_elasticity = percent.clamp(0, 100) as u8;
    }

    pub fn toggle_persist_path(&mut self) {
        self.persist_path = !self.persist_path;
    }

    /// Build settings from a key-value store lookup
    pub fn from_pairs<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = get(Self::ELASTICITY_KEY) {
            match parse_percent(&raw) {
                Some(percent) => settings.collision_elasticity = percent,
                None => log::warn!("Ignoring stored elasticity {raw:?}"),
            }
        }
        if let Some(raw) = get(Self::PERSIST_KEY) {
            settings.persist_path = raw == "true";
        }

        settings
    }

    /// Key-value pairs for storage
    pub fn to_pairs(&self) -> [(&'static str, String); 2] {
        [
            (Self::ELASTICITY_KEY, self.collision_elasticity.to_string()),
            (Self::PERSIST_KEY, self.persist_path.to_string()),
        ]
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({e}), using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&json) {
            Ok(mut settings) => {
                settings.collision_elasticity = settings.collision_elasticity.min(100);
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Corrupt settings at {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file. Returns false on failure.
    pub fn save_to(&self, path: &Path) -> bool {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize settings: {e}");
                return false;
            }
        };
        match std::fs::write(path, json) {
            Ok(()) => {
                log::info!("Settings saved to {}", path.display());
                true
            }
            Err(e) => {
                log::warn!("Failed to save settings to {}: {e}", path.display());
                false
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        match storage {
            Some(storage) => {
                let settings = Self::from_pairs(|key| storage.get_item(key).ok().flatten());
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            for (key, value) in self.to_pairs() {
                let _ = storage.set_item(key, &value);
            }
            log::info!("Settings saved");
        }
    }
}

/// Rate limiter for preference writes while a slider is being dragged
///
/// The first request in a quiet period saves immediately. Requests within
/// the window are coalesced into one trailing save released by [`poll`].
///
/// [`poll`]: SaveThrottle::poll
#[derive(Debug, Clone)]
pub struct SaveThrottle {
    interval_ms: f64,
    last_save_ms: Option<f64>,
    pending: bool,
}

impl Default for SaveThrottle {
    fn default() -> Self {
        Self::new(SAVE_THROTTLE_MS)
    }
}

impl SaveThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_save_ms: None,
            pending: false,
        }
    }

    fn window_open(&self, now_ms: f64) -> bool {
        self.last_save_ms
            .is_none_or(|last| now_ms - last >= self.interval_ms)
    }

    /// Ask to save at `now_ms`. Returns true if the caller should save now.
    pub fn request(&mut self, now_ms: f64) -> bool {
        if self.window_open(now_ms) {
            self.last_save_ms = Some(now_ms);
            self.pending = false;
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Returns true once a deferred save is due
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if self.pending && self.window_open(now_ms) {
            self.last_save_ms = Some(now_ms);
            self.pending = false;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
