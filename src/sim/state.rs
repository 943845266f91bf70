//! Game state and core simulation types
//!
//! Everything the fixed-timestep loop reads or writes lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Phase of the outer game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopPhase {
    /// Normal gameplay; ticks advance the world
    Running,
    /// One-tick restorative state entered on a reset intent
    Resetting,
    /// Loop has been told to exit; ticks are no-ops
    Terminated,
}

/// Which way the player sprite faces (rendering only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the collision box
    pub pos: Vec2,
    /// Velocity in world units per second
    pub vel: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    /// Jumps still available: 2 on the ground, counts down in the air
    pub jumps_left: u8,
    pub on_ground: bool,
    pub alive: bool,
    pub won: bool,
    /// Previous-tick jump intent, for edge detection
    #[serde(default)]
    pub jump_was_held: bool,
}

impl Player {
    pub fn spawn(at: Vec2, max_jumps: u8) -> Self {
        Self {
            pos: at,
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            facing: Facing::Right,
            jumps_left: max_jumps,
            on_ground: false,
            alive: true,
            won: false,
            jump_was_held: false,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Center of the feet edge, where landing dust appears
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x * 0.5, self.pos.y + self.size.y)
    }
}

/// Broad behavioral class of an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleClass {
    /// Kills on contact, never moves (spikes)
    StaticHazard,
    /// Kills on contact, falls when triggered (stones)
    DynamicFalling,
    /// Blocks horizontal movement, never kills (magic walls)
    StaticBlocker,
}

/// Lifecycle of a falling stone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StonePhase {
    /// Hanging in place, waiting for the player to cross the trigger range
    Idle,
    /// Triggered; wobbles in place until the timer expires
    Warning { remaining: f32 },
    /// In free fall
    Falling,
    /// Settled on a platform after its bounces; still lethal
    Resting,
}

/// Mutable physics state of a falling stone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoneState {
    /// Player center-x range that arms this stone
    pub trigger: (f32, f32),
    /// Seconds of warning wobble before the drop
    pub warn_time: f32,
    pub phase: StonePhase,
    /// Downward speed while falling (world units/sec)
    pub fall_vel: f32,
    /// Bounces used so far
    pub bounces: u8,
}

impl StoneState {
    pub fn new(trigger: (f32, f32), warn_time: f32) -> Self {
        Self {
            trigger,
            warn_time,
            phase: StonePhase::Idle,
            fall_vel: 0.0,
            bounces: 0,
        }
    }
}

/// Obstacle variants; this set is closed on purpose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Spike,
    FallingStone(StoneState),
    MagicWall {
        /// Fresh contacts left before the wall shatters
        hp: u8,
        /// Contact latch so a sustained push counts as one hit
        #[serde(default)]
        touching: bool,
    },
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Bounding region; only falling stones ever move theirs
    pub region: Aabb,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn class(&self) -> ObstacleClass {
        match self.kind {
            ObstacleKind::Spike => ObstacleClass::StaticHazard,
            ObstacleKind::FallingStone(_) => ObstacleClass::DynamicFalling,
            ObstacleKind::MagicWall { .. } => ObstacleClass::StaticBlocker,
        }
    }

    /// Whether touching this obstacle kills the player
    pub fn is_lethal(&self) -> bool {
        matches!(
            self.kind,
            ObstacleKind::Spike | ObstacleKind::FallingStone(_)
        )
    }

    /// A shattered wall stops blocking but stays in the list
    pub fn is_solid(&self) -> bool {
        matches!(self.kind, ObstacleKind::MagicWall { hp, .. } if hp > 0)
    }
}

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Spike,
    Stone,
    /// Fell below the level
    OutOfBounds,
}

/// One-frame happenings, drained by the shell after each tick for
/// effects, audio and stats. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump { at: Vec2, double: bool },
    Land { at: Vec2, impact: f32 },
    /// Player pushed against a solid magic wall
    Block { at: Vec2 },
    WallCracked { at: Vec2 },
    WallShattered { at: Vec2 },
    StoneImpact { at: Vec2, settled: bool },
    Death { at: Vec2, cause: DeathCause },
    Win { at: Vec2 },
}

/// Immutable level description: geometry plus initial obstacle states
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Level extent in world units; (0,0) is the top-left corner, y grows down
    pub bounds: Vec2,
    /// Player spawn point (top-left of the collision box)
    pub spawn: Vec2,
    pub platforms: Vec<Aabb>,
    /// Obstacle templates; live copies are cloned from these on spawn/reset
    pub obstacles: Vec<Obstacle>,
    /// Reaching this region wins the run
    pub exit: Aabb,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Gameplay constants in effect for this run
    pub tuning: Tuning,
    /// Current loop phase
    pub phase: LoopPhase,
    /// Runs started, including the first
    pub attempts: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds since the current run started; frozen on death or win
    pub run_time: f32,
    pub player: Player,
    /// Immutable template the run was built from
    pub level: Level,
    /// Live obstacles (sorted by id for determinism)
    pub obstacles: Vec<Obstacle>,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh state for the given level and tuning
    pub fn new(level: Level, tuning: Tuning) -> Self {
        let player = Player::spawn(level.spawn, tuning.max_jumps);
        let obstacles = level.obstacles.clone();
        let mut state = Self {
            tuning,
            phase: LoopPhase::Running,
            attempts: 1,
            time_ticks: 0,
            run_time: 0.0,
            player,
            level,
            obstacles,
            events: Vec::new(),
        };
        state.normalize_order();
        state
    }

    /// Restore the run to its initial conditions: player back at spawn,
    /// obstacle dynamic state rebuilt from the level templates.
    pub fn respawn(&mut self) {
        self.player = Player::spawn(self.level.spawn, self.tuning.max_jumps);
        self.obstacles = self.level.obstacles.clone();
        self.run_time = 0.0;
        self.normalize_order();
    }

    /// Ensure obstacles are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|o| o.id);
    }
}
