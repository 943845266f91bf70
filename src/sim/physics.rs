//! Player and stone integration under the fixed timestep.
//!
//! Only velocities and positions change here; overlap resolution and all
//! death/win outcomes live in `collision`.

use glam::Vec2;

use super::state::{Facing, GameEvent, Level, Obstacle, ObstacleKind, Player, StonePhase};
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Advance the player one substep: horizontal intent, jump edges, gravity.
///
/// Movement is intent-driven with no acceleration ramp: horizontal velocity
/// is set directly from the held direction and drops to zero the moment both
/// keys are released. Jumps fire on the rising edge of the jump intent only;
/// holding the key never repeats.
pub fn step_player(
    player: &mut Player,
    input: &TickInput,
    tuning: &Tuning,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    let controllable = player.alive && !player.won;

    if controllable {
        let mut dir = 0.0;
        if input.move_left {
            dir -= 1.0;
            player.facing = Facing::Left;
        }
        if input.move_right {
            dir += 1.0;
            player.facing = Facing::Right;
        }
        player.vel.x = dir * tuning.move_speed;
    } else {
        player.vel.x = 0.0;
    }

    // Gravity before the jump check, so a jump tick ends at the exact
    // launch velocity
    player.vel.y += tuning.gravity * dt;
    player.vel.y = player.vel.y.min(tuning.terminal_velocity);

    if controllable {
        let jump_edge = input.jump && !player.jump_was_held;
        player.jump_was_held = input.jump;

        if jump_edge && player.jumps_left > 0 {
            let double = !player.on_ground;
            player.vel.y = if double {
                tuning.double_jump_velocity
            } else {
                tuning.jump_velocity
            };
            player.jumps_left -= 1;
            player.on_ground = false;
            events.push(GameEvent::Jump {
                at: player.feet(),
                double,
            });
        }
    } else {
        player.jump_was_held = input.jump;
    }

    player.pos += player.vel * dt;
}

/// Advance every falling stone one substep.
///
/// Idle stones arm when the player's center-x enters their trigger range.
/// Armed stones wobble in place for their warning time, then fall under
/// boosted gravity, bounce off platforms a limited number of times and
/// finally rest. Stones are lethal through the whole lifecycle.
pub fn step_stones(
    obstacles: &mut [Obstacle],
    player_center_x: f32,
    level: &Level,
    tuning: &Tuning,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    for ob in obstacles.iter_mut() {
        let ObstacleKind::FallingStone(stone) = &mut ob.kind else {
            continue;
        };

        match stone.phase {
            StonePhase::Idle => {
                let (lo, hi) = stone.trigger;
                if (lo..=hi).contains(&player_center_x) {
                    stone.phase = StonePhase::Warning {
                        remaining: stone.warn_time,
                    };
                }
            }
            StonePhase::Warning { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    stone.phase = StonePhase::Falling;
                    stone.fall_vel = 0.0;
                } else {
                    stone.phase = StonePhase::Warning { remaining };
                }
            }
            StonePhase::Falling => {
                stone.fall_vel += tuning.gravity * tuning.stone_gravity_scale * dt;
                stone.fall_vel = stone.fall_vel.min(tuning.terminal_velocity);
                ob.region.pos.y += stone.fall_vel * dt;

                // Land on the first platform the bottom edge crosses
                for plat in &level.platforms {
                    if !ob.region.overlaps(plat) || stone.fall_vel < 0.0 {
                        continue;
                    }
                    ob.region.pos.y = plat.top() - ob.region.size.y;
                    let at = Vec2::new(ob.region.center().x, plat.top());

                    if stone.bounces < tuning.stone_max_bounces {
                        stone.fall_vel = -stone.fall_vel * tuning.stone_restitution;
                        stone.bounces += 1;
                        events.push(GameEvent::StoneImpact { at, settled: false });
                    } else {
                        stone.fall_vel = 0.0;
                        stone.phase = StonePhase::Resting;
                        events.push(GameEvent::StoneImpact { at, settled: true });
                    }
                    break;
                }

                // Past the level bottom: park on the floor line
                if ob.region.bottom() > level.bounds.y {
                    ob.region.pos.y = level.bounds.y - ob.region.size.y;
                    stone.fall_vel = 0.0;
                    stone.phase = StonePhase::Resting;
                    events.push(GameEvent::StoneImpact {
                        at: Vec2::new(ob.region.center().x, level.bounds.y),
                        settled: true,
                    });
                }
            }
            StonePhase::Resting => {}
        }
    }
}
