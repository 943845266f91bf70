//! Lifetime run statistics
//!
//! Persisted to LocalStorage: how many runs were started, how many reached
//! the exit, and the fastest completion.

use serde::{Deserialize, Serialize};

/// Aggregate stats across every session
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunStats {
    /// Runs started (first spawn plus every reset)
    pub total_attempts: u32,
    /// Runs that reached the exit
    pub completions: u32,
    /// Fastest completion in seconds, if any
    pub best_time: Option<f32>,
}

impl RunStats {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "devilish_platformer_stats";

    /// Create empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one started run
    pub fn note_attempt(&mut self) {
        self.total_attempts += 1;
    }

    /// Would this completion time set a new best?
    pub fn qualifies(&self, time: f32) -> bool {
        match self.best_time {
            Some(best) => time < best,
            None => true,
        }
    }

    /// Record a completed run.
    /// Returns true if the time is a new best.
    pub fn record_completion(&mut self, time: f32) -> bool {
        self.completions += 1;
        if self.qualifies(time) {
            self.best_time = Some(time);
            true
        } else {
            false
        }
    }

    /// Load stats from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(stats) = serde_json::from_str::<RunStats>(&json) {
                    log::info!("Loaded run stats ({} attempts)", stats.total_attempts);
                    return stats;
                }
            }
        }

        log::info!("No run stats found, starting fresh");
        Self::new()
    }

    /// Save stats to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Run stats saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Format seconds as "M:SS.hh" for the HUD timer
pub fn format_time(secs: f32) -> String {
    let secs = secs.max(0.0);
    let minutes = (secs / 60.0).floor() as u32;
    let rem = secs - minutes as f32 * 60.0;
    format!("{}:{:05.2}", minutes, rem)
}
