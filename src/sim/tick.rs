//! Per-frame simulation step
//!
//! Fixed order inside a tick: discrete actions, spawners, bomb drops,
//! collision resolution, round progression, then movement and timers.
//! The host calls [`tick`] exactly once per frame at 50 Hz.

use glam::Vec2;

use super::collision;
use super::geometry::Facing;
use super::state::{DescentPhase, EnemyKind, GamePhase, GameState, PickupKind};
use crate::consts::*;

/// One frame's worth of input, already debounced by the host. Held-key
/// fields repeat every frame; action fields are edge-triggered.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
    pub fire: bool,
    pub gravity: bool,
    pub hyper: bool,
    pub shield: bool,
    pub quit: bool,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: TickInput) {
    if input.quit {
        state.phase = GamePhase::Quit;
        return;
    }
    if state.phase != GamePhase::Playing {
        return;
    }
    state.frame += 1;

    if input.fire {
        state.fire_beam();
    }
    if input.gravity {
        state.activate_gravity();
    }
    if input.hyper {
        state.activate_hyper();
    }
    if input.shield {
        state.activate_shield();
    }

    run_spawners(state);
    collision::resolve(state);
    if state.phase != GamePhase::Playing {
        return;
    }
    advance_round(state);
    advance_entities(state, input);
}

/// Timed spawns and stationary-enemy bomb drops
fn run_spawners(state: &mut GameState) {
    if state.frame % ENEMY_SPAWN_PERIOD == 0 {
        let kind = if state.round == 1 {
            EnemyKind::Standard
        } else {
            EnemyKind::Splitter
        };
        state.spawn_enemy(kind);
    }
    if state.frame % HEART_SPAWN_PERIOD == 0 {
        state.spawn_pickup(PickupKind::Heart);
    }

    // Collect droppers first; spawn_bomb borrows the whole state.
    let frame = state.frame;
    let droppers: Vec<(Vec2, Vec2)> = state
        .enemies
        .iter()
        .filter(|e| e.phase == DescentPhase::Stationary && frame % e.interval == 0)
        .map(|e| (e.rect.center, Vec2::new(e.rect.center.x, e.rect.bottom())))
        .collect();
    let with_beam = state.round > BEAM_ROUNDS_AFTER;
    for (center, drop_pos) in droppers {
        state.spawn_bomb(center, drop_pos);
        if with_beam {
            state.spawn_enemy_beam(center);
        }
    }
}

/// Advance the round once enough kills have accumulated this round.
/// Each advance drops an attack boost and a heart as a reward.
fn advance_round(state: &mut GameState) {
    if state.kills_this_round < KILLS_PER_ROUND {
        return;
    }
    state.round += 1;
    state.kills_this_round = 0;
    state.spawn_pickup(PickupKind::AttackBoost);
    state.spawn_pickup(PickupKind::Heart);
    if state.round_pacing > 50.0 {
        state.round_pacing -= 50.0;
    } else {
        state.round_pacing -= 0.1;
    }
    log::info!(
        "round {} (frame {}, score {})",
        state.round,
        state.frame,
        state.score
    );
}

/// Movement and per-frame timers for every entity collection
fn advance_entities(state: &mut GameState, input: TickInput) {
    move_player(state, input);

    for enemy in &mut state.enemies {
        descend(
            &mut enemy.rect.center,
            &mut enemy.vy,
            enemy.bound,
            &mut enemy.phase,
        );
    }
    for pickup in &mut state.pickups {
        descend(
            &mut pickup.rect.center,
            &mut pickup.vy,
            pickup.bound,
            &mut pickup.phase,
        );
    }

    state.beams.retain_mut(|beam| {
        beam.rect.translate(beam.dir * BEAM_SPEED);
        beam.rect.inside_arena()
    });
    state.bombs.retain_mut(|bomb| {
        bomb.rect.translate(bomb.dir * BOMB_SPEED);
        bomb.rect.inside_arena()
    });

    state.enemy_beams.retain_mut(|beam| {
        beam.life -= 1;
        beam.age += 1;
        if beam.age % ENEMY_BEAM_GROWTH_PERIOD == 0 {
            beam.thickness += 1;
        }
        beam.life >= 0 && beam.thickness <= ENEMY_BEAM_MAX_THICKNESS
    });

    state.explosions.retain_mut(|e| {
        e.life -= 1;
        e.life >= 0
    });
    state.gravity_fields.retain_mut(|g| {
        g.life -= 1;
        g.life >= 0
    });
    state.shields.retain_mut(|s| {
        s.life -= 1;
        s.life >= 0
    });
}

/// Held-key movement with per-axis rollback: an axis that would leave the
/// arena is undone alone, so the player slides along the boundary.
fn move_player(state: &mut GameState, input: TickInput) {
    let player = &mut state.player;
    if player.hyper_ticks > 0 {
        player.hyper_ticks -= 1;
    }

    let dx = (input.right as i32) - (input.left as i32);
    let dy = (input.down as i32) - (input.up as i32);
    let speed = if input.boost {
        PLAYER_BOOST_SPEED
    } else {
        PLAYER_SPEED
    };

    if dx != 0 {
        let old_x = player.rect.center.x;
        player.rect.center.x += dx as f32 * speed;
        if !player.rect.inside_x() {
            player.rect.center.x = old_x;
        }
    }
    if dy != 0 {
        let old_y = player.rect.center.y;
        player.rect.center.y += dy as f32 * speed;
        if !player.rect.inside_y() {
            player.rect.center.y = old_y;
        }
    }

    if let Some(facing) = Facing::from_offsets(dx, dy) {
        player.facing = facing;
    }
}

/// Move down, then stop permanently the first frame center y exceeds the
/// stop altitude.
fn descend(pos: &mut Vec2, vy: &mut f32, bound: f32, phase: &mut DescentPhase) {
    pos.y += *vy;
    if *phase == DescentPhase::Descending && pos.y > bound {
        *vy = 0.0;
        *phase = DescentPhase::Stationary;
    }
}
