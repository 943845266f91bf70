//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness; visual jitter belongs to the effects layer
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{box_hits_spike, point_in_triangle, resolve, spike_triangle};
pub use level::devilish_level;
pub use physics::{step_player, step_stones};
pub use rect::Aabb;
pub use state::{
    DeathCause, Facing, GameEvent, GameState, Level, LoopPhase, Obstacle, ObstacleClass,
    ObstacleKind, Player, StonePhase, StoneState,
};
pub use tick::{TickInput, tick};
