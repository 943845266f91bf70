//! Visual feedback layer: particle bursts and camera shake.
//!
//! Everything here is cosmetic. The sim never reads from this module, so
//! randomness is allowed; the particle RNG is seeded per session and the
//! shake jitter derives from a frame counter hash.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::GameEvent;
use crate::tuning::{BurstSpec, Tuning};
use crate::{approach, hash_noise};

/// Maximum live particles; the oldest is evicted past this
pub const MAX_PARTICLES: usize = 256;

/// Velocity retained per reference tick (light drag)
const PARTICLE_DRAG: f32 = 0.98;

/// Particle color codes, resolved to RGBA by the renderer's palette
pub const COLOR_DUST: u32 = 0;
pub const COLOR_DEATH: u32 = 1;
pub const COLOR_WALL: u32 = 2;
pub const COLOR_STONE: u32 = 3;
pub const COLOR_WIN: u32 = 4;
pub const COLOR_SPARK: u32 = 5;

/// A short-lived visual particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// Seconds left to live
    pub life: f32,
    /// Initial lifetime, for alpha/size fade
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    /// 1.0 when fresh, 0.0 at expiry
    #[inline]
    pub fn life_frac(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Pool of particles with its own RNG
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Radial burst at `at`; direction is uniform around the circle with an
    /// upward bias so debris arcs rather than sprays flat.
    pub fn burst(&mut self, at: Vec2, spec: &BurstSpec, color: u32) {
        use std::f32::consts::TAU;
        for _ in 0..spec.count {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let angle = self.rng.random_range(0.0..TAU);
            let speed = self.rng.random_range(spec.min_speed..=spec.max_speed);
            let life = self.rng.random_range(spec.min_life..=spec.max_life);
            let size = self.rng.random_range(spec.min_size..=spec.max_size);
            let mut vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            vel.y -= spec.upward_bias;
            self.particles.push(Particle {
                pos: at,
                vel,
                color,
                life,
                max_life: life,
                size,
            });
        }
    }

    /// Age and move all particles, dropping the expired ones
    pub fn update(&mut self, dt: f32, gravity: f32) {
        // Drag is defined per sim tick; rescale for the frame delta
        let drag = PARTICLE_DRAG.powf(dt / crate::consts::SIM_DT);
        for p in &mut self.particles {
            p.vel.y += gravity * dt;
            p.vel *= drag;
            p.pos += p.vel * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

/// Active shake envelope; magnitude ramps linearly down to exactly zero
#[derive(Debug, Clone, Copy, Default)]
struct Shake {
    magnitude: f32,
    duration: f32,
    remaining: f32,
}

/// Scrolling camera with screen shake.
///
/// The view is the same width as the level, so only the vertical scroll
/// follows the player, clamped to a quarter-screen of travel.
pub struct Camera {
    pub scroll: Vec2,
    shake: Shake,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            scroll: Vec2::ZERO,
            shake: Shake::default(),
        }
    }

    /// Glide the scroll toward centering `target` in the view
    pub fn follow(&mut self, target: Vec2, bounds: Vec2, rate: f32, dt: f32) {
        let desired = target - bounds * 0.5;
        self.scroll = approach(self.scroll, desired, rate, dt);
        // Level and view share a width, so there is no horizontal travel
        self.scroll.x = 0.0;
        let limit = bounds.y * 0.25;
        self.scroll.y = self.scroll.y.clamp(-limit, limit);
    }

    /// Start a shake, merging with any active one by taking the stronger
    pub fn kick(&mut self, magnitude: f32, duration: f32) {
        if magnitude >= self.current_shake() && duration > 0.0 {
            self.shake = Shake {
                magnitude,
                duration,
                remaining: duration,
            };
        }
    }

    /// Advance the shake clock
    pub fn update(&mut self, dt: f32) {
        self.shake.remaining = (self.shake.remaining - dt).max(0.0);
    }

    /// Present shake magnitude: linear ramp from the kick value to zero
    pub fn current_shake(&self) -> f32 {
        if self.shake.remaining <= 0.0 || self.shake.duration <= 0.0 {
            0.0
        } else {
            self.shake.magnitude * (self.shake.remaining / self.shake.duration)
        }
    }

    /// World-to-view translation for this frame, shake jitter included.
    /// `salt` should change every frame (any frame counter works).
    pub fn view_offset(&self, salt: u32) -> Vec2 {
        let mut offset = -self.scroll;
        let mag = self.current_shake();
        if mag > 0.0 {
            offset.x += hash_noise(salt, 17) * 2.0 * mag;
            offset.y += hash_noise(salt, 31) * 2.0 * mag;
        }
        offset
    }

    pub fn reset(&mut self) {
        self.scroll = Vec2::ZERO;
        self.shake = Shake::default();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Facade the shell talks to: routes sim events into bursts and kicks
pub struct Effects {
    pub particles: ParticleSystem,
    pub camera: Camera,
}

impl Effects {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: ParticleSystem::new(seed),
            camera: Camera::new(),
        }
    }

    /// Translate one sim event into visual feedback
    pub fn on_event(&mut self, event: &GameEvent, tuning: &Tuning) {
        match *event {
            GameEvent::Jump { .. } => {}
            GameEvent::Land { at, impact } => {
                if impact >= tuning.hard_landing_speed {
                    self.particles.burst(at, &tuning.land_burst_hard, COLOR_DUST);
                    self.camera
                        .kick(tuning.shake_land.magnitude, tuning.shake_land.duration);
                } else {
                    self.particles.burst(at, &tuning.land_burst, COLOR_DUST);
                }
            }
            GameEvent::Block { at } => {
                self.particles.burst(at, &tuning.block_burst, COLOR_SPARK);
                self.camera
                    .kick(tuning.shake_block.magnitude, tuning.shake_block.duration);
            }
            GameEvent::WallCracked { at } => {
                self.particles
                    .burst(at, &tuning.wall_crack_burst, COLOR_WALL);
            }
            GameEvent::WallShattered { at } => {
                self.particles
                    .burst(at, &tuning.wall_break_burst, COLOR_WALL);
                self.camera.kick(
                    tuning.shake_wall_break.magnitude,
                    tuning.shake_wall_break.duration,
                );
            }
            GameEvent::StoneImpact { at, settled } => {
                if !settled {
                    self.particles.burst(at, &tuning.stone_burst, COLOR_STONE);
                    self.camera
                        .kick(tuning.shake_stone.magnitude, tuning.shake_stone.duration);
                }
            }
            GameEvent::Death { at, .. } => {
                self.particles.burst(at, &tuning.death_burst, COLOR_DEATH);
                self.camera
                    .kick(tuning.shake_death.magnitude, tuning.shake_death.duration);
            }
            GameEvent::Win { at } => {
                self.particles.burst(at, &tuning.win_burst, COLOR_WIN);
                self.camera
                    .kick(tuning.shake_win.magnitude, tuning.shake_win.duration);
            }
        }
    }

    /// Per-frame advance: camera glide plus particle aging
    pub fn update(&mut self, dt: f32, follow_target: Vec2, bounds: Vec2, tuning: &Tuning) {
        self.camera
            .follow(follow_target, bounds, tuning.camera_follow_rate, dt);
        self.camera.update(dt);
        self.particles.update(dt, tuning.particle_gravity);
    }

    /// Wipe everything; called when a run resets
    pub fn clear(&mut self) {
        self.particles.clear();
        self.camera.reset();
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any shake reaches exactly zero within its duration and never
        /// increases along the way.
        #[test]
        fn prop_shake_monotone_and_finite(
            mag in 0.5f32..40.0,
            dur in 0.05f32..2.0,
        ) {
            let mut cam = Camera::new();
            cam.kick(mag, dur);

            let dt = 1.0 / 120.0;
            let mut prev = cam.current_shake();
            let steps = (dur / dt).ceil() as usize + 1;
            for _ in 0..steps {
                cam.update(dt);
                let now = cam.current_shake();
                prop_assert!(now <= prev + 1e-5);
                prev = now;
            }
            prop_assert_eq!(cam.current_shake(), 0.0);
        }
    }
}
