//! Devilish Platformer - a deliberately cruel single-screen platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `effects`: Particle bursts and camera shake driven by sim events
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Key-name to intent mapping
//! - `tuning`: Data-driven game balance
//! - `stats`: Attempt counts and best completion time

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod effects;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod stats;
pub mod tuning;

pub use stats::RunStats;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Level dimensions in world units (one unit = one CSS pixel at 1:1)
    pub const LEVEL_WIDTH: f32 = 1280.0;
    pub const LEVEL_HEIGHT: f32 = 720.0;

    /// Player collision box
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 44.0;
}

/// Deterministic pseudo-noise in [-0.5, 0.5) from two integer keys.
///
/// Visual jitter (camera shake, stone warning wobble) uses this instead of an
/// RNG so draw code stays repeatable for a given frame counter.
#[inline]
pub fn hash_noise(seed: u32, salt: u32) -> f32 {
    let h = seed
        .wrapping_mul(2654435761)
        .wrapping_add(salt.wrapping_mul(7919));
    let h = (h ^ (h >> 13)).wrapping_mul(0x5bd1e995);
    (h % 1000) as f32 / 1000.0 - 0.5
}

/// Frame-rate independent exponential approach of `current` toward `target`.
/// `rate` is the decay constant per second; higher converges faster.
#[inline]
pub fn approach(current: Vec2, target: Vec2, rate: f32, dt: f32) -> Vec2 {
    current + (target - current) * (1.0 - (-rate * dt).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_noise_range() {
        for seed in 0..500 {
            for salt in 0..4 {
                let n = hash_noise(seed, salt);
                assert!((-0.5..0.5).contains(&n), "noise out of range: {}", n);
            }
        }
    }

    #[test]
    fn test_approach_converges() {
        let mut pos = Vec2::ZERO;
        let target = Vec2::new(100.0, -40.0);
        for _ in 0..600 {
            pos = approach(pos, target, 8.0, 1.0 / 120.0);
        }
        assert!((pos - target).length() < 1.0);
    }
}
