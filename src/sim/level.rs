//! The built-in level layout.

use glam::Vec2;

use super::rect::Aabb;
use super::state::{Level, Obstacle, ObstacleKind, StoneState};
use crate::consts::{LEVEL_HEIGHT, LEVEL_WIDTH};

/// Spike collision box size
pub const SPIKE_WIDTH: f32 = 32.0;
pub const SPIKE_HEIGHT: f32 = 26.0;

/// Falling stones are square
pub const STONE_SIZE: f32 = 45.0;

/// Build the one devilish level.
///
/// A single screen, left-to-right: the player spawns near the bottom-left
/// and has to climb past spikes, a two-hit magic wall and three trap stones
/// to reach the exit strip on the right edge.
pub fn devilish_level() -> Level {
    let w = LEVEL_WIDTH;
    let h = LEVEL_HEIGHT;

    let platforms = vec![
        Aabb::new(0.0, h - 50.0, w, 50.0),        // Ground
        Aabb::new(120.0, h - 160.0, 200.0, 20.0), // First ledge
        Aabb::new(400.0, h - 240.0, 160.0, 20.0), // Mid platform
        Aabb::new(640.0, h - 320.0, 180.0, 20.0), // High platform
        Aabb::new(900.0, h - 200.0, 200.0, 20.0), // Right platform
        Aabb::new(1100.0, h - 280.0, 120.0, 20.0), // Final approach
        Aabb::new(300.0, h - 120.0, 80.0, 16.0),  // Small step
        Aabb::new(580.0, h - 160.0, 60.0, 16.0),  // Gap bridge
        Aabb::new(820.0, h - 240.0, 70.0, 16.0),  // Precision jump
    ];

    let mut obstacles = Vec::new();
    let mut next_id = 1u32;
    let mut push = |region: Aabb, kind: ObstacleKind| {
        obstacles.push(Obstacle {
            id: next_id,
            region,
            kind,
        });
        next_id += 1;
    };

    // Spikes guard the landing zones of most platforms
    for &(x, y) in &[
        (180.0, h - 178.0),
        (450.0, h - 258.0),
        (700.0, h - 338.0),
        (950.0, h - 218.0),
        (1150.0, h - 298.0),
    ] {
        push(
            Aabb::new(x, y, SPIKE_WIDTH, SPIKE_HEIGHT),
            ObstacleKind::Spike,
        );
    }

    // Stones hang over the mid-level walkways; each arms when the player's
    // center-x crosses its range and drops after its own warning delay
    for &(x, top_y, trigger, warn) in &[
        (480.0, 50.0, (420.0, 540.0), 1.5),
        (680.0, 30.0, (600.0, 720.0), 1.0),
        (980.0, 40.0, (920.0, 1020.0), 2.0),
    ] {
        push(
            Aabb::new(x, top_y, STONE_SIZE, STONE_SIZE),
            ObstacleKind::FallingStone(StoneState::new(trigger, warn)),
        );
    }

    // The magic wall blocks the low route until broken with two fresh hits
    push(
        Aabb::new(350.0, h - 140.0, 70.0, 80.0),
        ObstacleKind::MagicWall {
            hp: 2,
            touching: false,
        },
    );

    Level {
        bounds: Vec2::new(w, h),
        spawn: Vec2::new(60.0, h - 100.0),
        platforms,
        obstacles,
        exit: Aabb::new(w - 60.0, 0.0, 60.0, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleClass;

    #[test]
    fn test_level_layout_sane() {
        let level = devilish_level();

        assert_eq!(level.bounds, Vec2::new(1280.0, 720.0));
        assert_eq!(level.platforms.len(), 9);
        assert_eq!(level.obstacles.len(), 9);

        // Spawn sits inside the level, above the ground
        assert!(level.spawn.x > 0.0 && level.spawn.x < level.bounds.x);
        assert!(level.spawn.y < level.bounds.y - 50.0);

        // Exit strip hugs the right edge, full height
        assert_eq!(level.exit.right(), level.bounds.x);
        assert_eq!(level.exit.top(), 0.0);
        assert_eq!(level.exit.bottom(), level.bounds.y);
    }

    #[test]
    fn test_obstacle_ids_unique_and_sorted() {
        let level = devilish_level();
        for pair in level.obstacles.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }

    #[test]
    fn test_obstacle_classes() {
        let level = devilish_level();

        let count = |class: ObstacleClass| {
            level
                .obstacles
                .iter()
                .filter(|o| o.class() == class)
                .count()
        };

        assert_eq!(count(ObstacleClass::StaticHazard), 5);
        assert_eq!(count(ObstacleClass::DynamicFalling), 3);
        assert_eq!(count(ObstacleClass::StaticBlocker), 1);
    }

    #[test]
    fn test_stone_triggers_cover_their_columns() {
        let level = devilish_level();
        for ob in &level.obstacles {
            if let ObstacleKind::FallingStone(stone) = &ob.kind {
                let (lo, hi) = stone.trigger;
                assert!(lo < hi);
                // Each stone hangs somewhere inside its own trigger range
                let cx = ob.region.center().x;
                assert!((lo..=hi).contains(&cx), "stone at {} outside ({}, {})", cx, lo, hi);
                assert!(stone.warn_time > 0.0);
            }
        }
    }

    #[test]
    fn test_wall_takes_two_hits() {
        let level = devilish_level();
        let wall = level
            .obstacles
            .iter()
            .find(|o| matches!(o.kind, ObstacleKind::MagicWall { .. }));
        let Some(wall) = wall else {
            panic!("level has no magic wall");
        };
        assert!(matches!(wall.kind, ObstacleKind::MagicWall { hp: 2, .. }));
        assert!(wall.is_solid());
        assert!(!wall.is_lethal());
    }
}
