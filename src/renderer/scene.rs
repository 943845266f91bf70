//! CPU-side scene assembly
//!
//! Builds one triangle list per frame in world coordinates, already
//! shifted by the camera's view offset; the pipeline only maps world
//! space to NDC.

use glam::Vec2;

use crate::effects::Effects;
use crate::hash_noise;
use crate::sim::{Facing, GameState, ObstacleKind, StonePhase, spike_triangle};

use super::shapes;
use super::vertex::{Vertex, colors, particle_color};

/// Pixels of sideways wobble on a stone in its warning phase
const STONE_WOBBLE: f32 = 6.0;

/// Assemble the frame's vertices. `salt` should change every frame; it
/// drives the shake jitter and the stone wobble.
pub fn build_scene(state: &GameState, effects: &Effects, salt: u32) -> Vec<Vertex> {
    let offset = effects.camera.view_offset(salt);
    let mut verts: Vec<Vertex> = Vec::with_capacity(1024);

    for plat in &state.level.platforms {
        verts.extend(shapes::rect(plat.pos + offset, plat.size, colors::PLATFORM));
    }

    let exit = &state.level.exit;
    verts.extend(shapes::rect(exit.pos + offset, exit.size, colors::EXIT));

    for ob in &state.obstacles {
        match &ob.kind {
            ObstacleKind::MagicWall { hp, .. } => {
                // A shattered wall is gone from the scene; its debris
                // already lives in the particle pool
                if *hp == 0 {
                    continue;
                }
                let color = if *hp > 1 {
                    colors::MAGIC_WALL
                } else {
                    colors::MAGIC_WALL_CRACKED
                };
                verts.extend(shapes::rect(ob.region.pos + offset, ob.region.size, color));
            }
            ObstacleKind::Spike => {
                let [a, b, c] = spike_triangle(&ob.region);
                verts.extend(shapes::triangle(
                    a + offset,
                    b + offset,
                    c + offset,
                    colors::SPIKE,
                ));
            }
            ObstacleKind::FallingStone(stone) => {
                let mut pos = ob.region.pos;
                let color = if matches!(stone.phase, StonePhase::Warning { .. }) {
                    pos.x += hash_noise(salt, ob.id.wrapping_mul(131)) * STONE_WOBBLE;
                    colors::STONE_WARNING
                } else {
                    colors::STONE
                };
                verts.extend(shapes::rect(pos + offset, ob.region.size, color));
            }
        }
    }

    // Player body plus a facing eye
    let p = &state.player;
    let body_color = if p.alive {
        colors::PLAYER
    } else {
        colors::PLAYER_DEAD
    };
    verts.extend(shapes::rect(p.pos + offset, p.size, body_color));
    if p.alive {
        let eye_x = match p.facing {
            Facing::Right => p.pos.x + p.size.x * 0.68,
            Facing::Left => p.pos.x + p.size.x * 0.32,
        };
        let eye = Vec2::new(eye_x, p.pos.y + p.size.y * 0.28);
        verts.extend(shapes::circle(eye + offset, 4.0, colors::PLAYER_EYE, 10));
    }

    // Particles fade and shrink as they age
    for particle in effects.particles.iter() {
        let frac = particle.life_frac();
        let color = particle_color(particle.color, frac);
        let size = (particle.size * (0.4 + 0.6 * frac)).max(0.5);
        verts.extend(shapes::rect_centered(
            particle.pos + offset,
            Vec2::splat(size),
            color,
        ));
    }

    verts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::devilish_level;
    use crate::tuning::Tuning;

    fn scene_len(state: &GameState) -> usize {
        let fx = Effects::new(1);
        build_scene(state, &fx, 0).len()
    }

    #[test]
    fn test_scene_is_nonempty() {
        let state = GameState::new(devilish_level(), Tuning::default());
        assert!(scene_len(&state) > 0);
    }

    #[test]
    fn test_shattered_wall_is_not_drawn() {
        let mut state = GameState::new(devilish_level(), Tuning::default());
        let baseline = scene_len(&state);

        for ob in &mut state.obstacles {
            if let ObstacleKind::MagicWall { hp, .. } = &mut ob.kind {
                *hp = 0;
            }
        }
        // One rectangle (6 vertices) disappears with the wall
        assert_eq!(scene_len(&state), baseline - 6);
    }

    #[test]
    fn test_dead_player_loses_the_eye() {
        let mut state = GameState::new(devilish_level(), Tuning::default());
        let alive = scene_len(&state);
        state.player.alive = false;
        let dead = scene_len(&state);
        assert!(dead < alive);
    }
}
