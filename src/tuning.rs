//! Gameplay tuning values
//!
//! Everything the sim and effects layers read as a knob lives here, so a
//! whole balance pass is one struct edit. Persisted in LocalStorage so
//! in-browser experiments survive a reload.

use serde::{Deserialize, Serialize};

/// One screen-shake envelope: peak magnitude in pixels, ramping linearly
/// to zero over `duration` seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShakeSpec {
    pub magnitude: f32,
    pub duration: f32,
}

/// One particle burst recipe. Speeds are px/s, lifetimes seconds, sizes
/// pixels; each particle samples uniformly from its range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BurstSpec {
    pub count: u32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_life: f32,
    pub max_life: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Subtracted from each particle's vy so debris arcs upward
    pub upward_bias: f32,
}

/// Gameplay tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // === Player movement ===
    /// Downward acceleration (px/s^2, y grows downward)
    pub gravity: f32,
    /// Horizontal run speed, applied directly while a key is held (px/s)
    pub move_speed: f32,
    /// Launch velocity of a grounded jump (px/s, negative is up)
    pub jump_velocity: f32,
    /// Launch velocity of the airborne jump (px/s, negative is up)
    pub double_jump_velocity: f32,
    /// Fall speed cap (px/s)
    pub terminal_velocity: f32,
    /// Jumps granted on landing; 2 enables the double jump
    pub max_jumps: u8,

    // === Falling stones ===
    /// Stones fall this much faster than the player
    pub stone_gravity_scale: f32,
    /// Velocity kept after a bounce (0..1)
    pub stone_restitution: f32,
    /// Bounces before a stone settles where it lands
    pub stone_max_bounces: u8,

    // === Camera ===
    /// Exponential follow rate (higher snaps faster)
    pub camera_follow_rate: f32,
    /// Landing faster than this reads as a hard landing (px/s)
    pub hard_landing_speed: f32,

    // === Screen shake ===
    pub shake_land: ShakeSpec,
    pub shake_block: ShakeSpec,
    pub shake_stone: ShakeSpec,
    pub shake_wall_break: ShakeSpec,
    pub shake_death: ShakeSpec,
    pub shake_win: ShakeSpec,

    // === Particles ===
    /// Gravity applied to particles, gentler than the player's
    pub particle_gravity: f32,
    pub land_burst: BurstSpec,
    pub land_burst_hard: BurstSpec,
    pub block_burst: BurstSpec,
    pub wall_crack_burst: BurstSpec,
    pub wall_break_burst: BurstSpec,
    pub stone_burst: BurstSpec,
    pub death_burst: BurstSpec,
    pub win_burst: BurstSpec,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            // Player movement
            gravity: 2880.0,
            move_speed: 390.0,
            jump_velocity: -900.0,
            double_jump_velocity: -810.0,
            terminal_velocity: 1080.0,
            max_jumps: 2,

            // Falling stones
            stone_gravity_scale: 1.5,
            stone_restitution: 0.4,
            stone_max_bounces: 2,

            // Camera
            camera_follow_rate: 7.5,
            hard_landing_speed: 480.0,

            // Screen shake, ordered by how hard each moment should hit
            shake_land: ShakeSpec {
                magnitude: 2.0,
                duration: 0.15,
            },
            shake_block: ShakeSpec {
                magnitude: 4.0,
                duration: 0.3,
            },
            shake_stone: ShakeSpec {
                magnitude: 5.0,
                duration: 0.35,
            },
            shake_wall_break: ShakeSpec {
                magnitude: 8.0,
                duration: 0.5,
            },
            shake_death: ShakeSpec {
                magnitude: 12.0,
                duration: 0.8,
            },
            shake_win: ShakeSpec {
                magnitude: 6.0,
                duration: 0.5,
            },

            // Particles
            particle_gravity: 864.0,
            land_burst: BurstSpec {
                count: 5,
                min_speed: 30.0,
                max_speed: 90.0,
                min_life: 0.3,
                max_life: 0.8,
                min_size: 1.0,
                max_size: 3.0,
                upward_bias: 75.0,
            },
            land_burst_hard: BurstSpec {
                count: 8,
                min_speed: 30.0,
                max_speed: 120.0,
                min_life: 0.3,
                max_life: 0.8,
                min_size: 1.0,
                max_size: 3.0,
                upward_bias: 75.0,
            },
            block_burst: BurstSpec {
                count: 12,
                min_speed: 60.0,
                max_speed: 240.0,
                min_life: 0.4,
                max_life: 0.9,
                min_size: 2.0,
                max_size: 4.0,
                upward_bias: 30.0,
            },
            wall_crack_burst: BurstSpec {
                count: 20,
                min_speed: 60.0,
                max_speed: 300.0,
                min_life: 0.5,
                max_life: 1.2,
                min_size: 2.0,
                max_size: 5.0,
                upward_bias: 60.0,
            },
            wall_break_burst: BurstSpec {
                count: 50,
                min_speed: 60.0,
                max_speed: 300.0,
                min_life: 0.5,
                max_life: 1.2,
                min_size: 2.0,
                max_size: 5.0,
                upward_bias: 60.0,
            },
            stone_burst: BurstSpec {
                count: 15,
                min_speed: 60.0,
                max_speed: 300.0,
                min_life: 0.5,
                max_life: 1.2,
                min_size: 2.0,
                max_size: 5.0,
                upward_bias: 60.0,
            },
            death_burst: BurstSpec {
                count: 40,
                min_speed: 60.0,
                max_speed: 480.0,
                min_life: 0.5,
                max_life: 1.2,
                min_size: 2.0,
                max_size: 5.0,
                upward_bias: 60.0,
            },
            win_burst: BurstSpec {
                count: 60,
                min_speed: 60.0,
                max_speed: 360.0,
                min_life: 0.5,
                max_life: 1.2,
                min_size: 2.0,
                max_size: 5.0,
                upward_bias: 60.0,
            },
        }
    }
}

impl Tuning {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "devilish_platformer_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(tuning) = serde_json::from_str(&json) {
                    log::info!("Loaded tuning from LocalStorage");
                    return tuning;
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
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
    fn test_defaults_are_sane() {
        let t = Tuning::default();
        assert!(t.gravity > 0.0);
        assert!(t.move_speed > 0.0);
        assert!(t.terminal_velocity > 0.0);
        assert!(t.jump_velocity < 0.0);
        assert!(t.double_jump_velocity < 0.0);
        assert_eq!(t.max_jumps, 2);
        assert!(t.stone_restitution > 0.0 && t.stone_restitution < 1.0);
    }

    #[test]
    fn test_double_jump_is_weaker_than_first() {
        let t = Tuning::default();
        assert!(t.double_jump_velocity.abs() < t.jump_velocity.abs());
    }

    #[test]
    fn test_shake_magnitudes_escalate() {
        let t = Tuning::default();
        assert!(t.shake_land.magnitude < t.shake_block.magnitude);
        assert!(t.shake_block.magnitude < t.shake_death.magnitude);
        assert!(t.shake_wall_break.magnitude < t.shake_death.magnitude);
    }

    #[test]
    fn test_burst_ranges_are_well_formed() {
        let t = Tuning::default();
        for spec in [
            t.land_burst,
            t.land_burst_hard,
            t.block_burst,
            t.wall_crack_burst,
            t.wall_break_burst,
            t.stone_burst,
            t.death_burst,
            t.win_burst,
        ] {
            assert!(spec.count > 0);
            assert!(spec.min_speed <= spec.max_speed);
            assert!(spec.min_life > 0.0 && spec.min_life <= spec.max_life);
            assert!(spec.min_size > 0.0 && spec.min_size <= spec.max_size);
        }
    }

    #[test]
    fn test_roundtrips_through_json() {
        let t = Tuning::default();
        let json = serde_json::to_string(&t).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back.gravity, t.gravity);
        assert_eq!(back.death_burst.count, t.death_burst.count);
    }
}
