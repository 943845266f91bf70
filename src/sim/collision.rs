//! Collision resolution and frame outcomes.
//!
//! The tricky part of the sim: one pass that clamps the player against
//! solids, then settles the frame's outcome with a fixed precedence.
//! Lethal contact beats blocking and landing; a frame that kills the
//! player produces a `Death` event and nothing else.

use glam::Vec2;

use super::rect::Aabb;
use super::state::{DeathCause, GameEvent, Level, Obstacle, ObstacleKind, Player};
use crate::tuning::Tuning;

/// Proximity margin around a magic wall that keeps its contact latch held,
/// so a sustained push clamped flush against the face counts as one hit.
const WALL_CONTACT_MARGIN: f32 = 3.0;

/// Spike triangles are inset from their bounding box by this much at the base
const SPIKE_BASE_INSET: f32 = 4.0;

/// Point-in-triangle via barycentric coordinates
pub fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom.abs() < 0.001 {
        return false;
    }

    let u = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / denom;
    let v = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / denom;
    let w = 1.0 - u - v;

    u >= 0.0 && v >= 0.0 && w >= 0.0
}

/// The lethal triangle of a spike: apex at the top-center of its region,
/// base corners inset so grazing the box edge is survivable.
pub fn spike_triangle(region: &Aabb) -> [Vec2; 3] {
    [
        Vec2::new(region.center().x, region.top()),
        Vec2::new(region.left() + SPIKE_BASE_INSET, region.bottom() - SPIKE_BASE_INSET),
        Vec2::new(region.right() - SPIKE_BASE_INSET, region.bottom() - SPIKE_BASE_INSET),
    ]
}

/// Box-vs-spike test: corners plus center against the lethal triangle
pub fn box_hits_spike(pbox: &Aabb, region: &Aabb) -> bool {
    if !pbox.overlaps(region) {
        return false;
    }
    let [a, b, c] = spike_triangle(region);
    let probes = [
        Vec2::new(pbox.left(), pbox.top()),
        Vec2::new(pbox.right(), pbox.top()),
        Vec2::new(pbox.left(), pbox.bottom()),
        Vec2::new(pbox.right(), pbox.bottom()),
        pbox.center(),
    ];
    probes.iter().any(|&p| point_in_triangle(p, a, b, c))
}

/// Clamp the player against solids and settle the frame's outcome.
///
/// Runs after integration. Order inside one call:
/// 1. solid magic walls clamp horizontal motion (vy is never touched)
/// 2. platforms resolve along the axis of least penetration
/// 3. level edge clamps
/// 4. lethal scan on the final box; a hit emits `Death` and suppresses
///    every blocking/landing event gathered earlier in the frame
/// 5. otherwise wall damage, `Block`/`Land` events and the exit check commit
pub fn resolve(
    player: &mut Player,
    level: &Level,
    obstacles: &mut [Obstacle],
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    let was_on_ground = player.on_ground;
    let fall_speed = player.vel.y.max(0.0);
    player.on_ground = false;

    let interactive = player.alive && !player.won;

    let mut pending: Vec<GameEvent> = Vec::new();
    let mut fresh_wall_hits: Vec<usize> = Vec::new();

    if interactive {
        for (i, ob) in obstacles.iter_mut().enumerate() {
            if !ob.is_solid() {
                continue;
            }
            let ObstacleKind::MagicWall { touching, .. } = &mut ob.kind else {
                continue;
            };

            let pbox = player.aabb();
            if pbox.overlaps(&ob.region) {
                if pbox.center().x < ob.region.center().x {
                    player.pos.x = ob.region.left() - player.size.x;
                } else {
                    player.pos.x = ob.region.right();
                }
                player.vel.x = 0.0;

                if !*touching {
                    *touching = true;
                    fresh_wall_hits.push(i);
                    let edge_x = if pbox.center().x < ob.region.center().x {
                        ob.region.left()
                    } else {
                        ob.region.right()
                    };
                    pending.push(GameEvent::Block {
                        at: Vec2::new(edge_x, pbox.center().y),
                    });
                }
            } else if !pbox.overlaps(&ob.region.inflated(WALL_CONTACT_MARGIN)) {
                *touching = false;
            }
        }
    }

    // Platform resolution along the axis of least penetration. The player
    // never moves more than ~9 units per substep, well under the thinnest
    // platform, so simple clamping cannot tunnel.
    for plat in &level.platforms {
        let pbox = player.aabb();
        if !pbox.overlaps(plat) {
            continue;
        }
        let pen_x = (pbox.right() - plat.left()).min(plat.right() - pbox.left());
        let pen_y = (pbox.bottom() - plat.top()).min(plat.bottom() - pbox.top());

        if pen_y <= pen_x {
            if pbox.center().y < plat.center().y {
                if player.vel.y >= 0.0 {
                    player.pos.y = plat.top() - player.size.y;
                    player.vel.y = 0.0;
                    player.on_ground = true;
                }
            } else {
                player.pos.y = plat.bottom();
                player.vel.y = player.vel.y.max(0.0);
            }
        } else {
            if pbox.center().x < plat.center().x {
                player.pos.x = plat.left() - player.size.x;
            } else {
                player.pos.x = plat.right();
            }
            player.vel.x = 0.0;
        }
    }

    // Level edges: sides and ceiling clamp, the bottom is open (and fatal)
    player.pos.x = player.pos.x.clamp(0.0, level.bounds.x - player.size.x);
    if player.pos.y < 0.0 {
        player.pos.y = 0.0;
        player.vel.y = player.vel.y.max(0.0);
    }

    if !interactive {
        return;
    }

    // Lethal scan on the final box
    let final_box = player.aabb();
    let mut death: Option<DeathCause> = None;
    for ob in obstacles.iter() {
        match &ob.kind {
            ObstacleKind::Spike => {
                if box_hits_spike(&final_box, &ob.region) {
                    death = Some(DeathCause::Spike);
                }
            }
            ObstacleKind::FallingStone(_) => {
                if final_box.overlaps(&ob.region) {
                    death = Some(DeathCause::Stone);
                }
            }
            ObstacleKind::MagicWall { .. } => {}
        }
        if death.is_some() {
            break;
        }
    }
    if death.is_none() && player.pos.y > level.bounds.y {
        death = Some(DeathCause::OutOfBounds);
    }

    if let Some(cause) = death {
        player.alive = false;
        player.vel = Vec2::ZERO;
        events.push(GameEvent::Death {
            at: final_box.center(),
            cause,
        });
        return;
    }

    // No death this frame: wall damage and movement events commit
    for i in fresh_wall_hits {
        let ObstacleKind::MagicWall { hp, .. } = &mut obstacles[i].kind else {
            continue;
        };
        *hp = hp.saturating_sub(1);
        let at = obstacles[i].region.center();
        if *hp == 0 {
            pending.push(GameEvent::WallShattered { at });
        } else {
            pending.push(GameEvent::WallCracked { at });
        }
    }
    events.append(&mut pending);

    if player.on_ground && !was_on_ground {
        player.jumps_left = tuning.max_jumps;
        events.push(GameEvent::Land {
            at: player.feet(),
            impact: fall_speed,
        });
    }

    if final_box.overlaps(&level.exit) {
        player.won = true;
        events.push(GameEvent::Win {
            at: final_box.center(),
        });
    }
}
