//! Ordered pairwise collision resolution
//!
//! One pass per frame, in a fixed order; later checks never see entities
//! consumed by earlier ones. Removals are flagged (or vectors are taken
//! wholesale) and applied after each sub-pass completes, so no collection is
//! mutated while it is being walked.

use super::state::{Explosion, GamePhase, GameState, PickupKind};
use crate::consts::*;

/// Run the whole combat resolution for this frame
pub fn resolve(state: &mut GameState) {
    enemy_beam_pass(state);
    bomb_beam_pass(state);
    gravity_pass(state);
    pickup_pass(state);
    player_bomb_pass(state);
    shield_pass(state);
}

/// Enemy x player beam. A beam is consumed by the first enemy it overlaps.
/// Splitters die on any hit, regardless of remaining hp, and release their
/// two children; everyone else takes the beam's captured power as damage.
fn enemy_beam_pass(state: &mut GameState) {
    let beams = std::mem::take(&mut state.beams);
    let mut kept = Vec::with_capacity(beams.len());
    let mut dead = vec![false; state.enemies.len()];
    let mut splits: Vec<(f32, f32)> = Vec::new();

    'beams: for beam in beams {
        for (ei, enemy) in state.enemies.iter_mut().enumerate() {
            if dead[ei] || !beam.rect.intersects(&enemy.rect) {
                continue;
            }
            if enemy.kind.splits() {
                dead[ei] = true;
                splits.push((enemy.rect.center.x, enemy.bound));
                state
                    .explosions
                    .push(Explosion::new(enemy.rect.center, EXPLOSION_KILL));
            } else {
                enemy.hp -= beam.power as i32;
                if enemy.hp <= 0 {
                    dead[ei] = true;
                    state
                        .explosions
                        .push(Explosion::new(enemy.rect.center, EXPLOSION_KILL));
                } else {
                    state
                        .explosions
                        .push(Explosion::new(enemy.rect.center, EXPLOSION_HIT));
                }
            }
            continue 'beams; // beam consumed either way
        }
        kept.push(beam);
    }
    state.beams = kept;

    let kills = dead.iter().filter(|&&d| d).count();
    let mut idx = 0;
    state.enemies.retain(|_| {
        let keep = !dead[idx];
        idx += 1;
        keep
    });
    for _ in 0..kills {
        state.award_kill();
    }
    for (x, bound) in splits {
        state.spawn_split_children(x, bound);
    }
}

/// Bomb x player beam. High attack power lets beams pierce: the bomb dies
/// but the beam flies on.
fn bomb_beam_pass(state: &mut GameState) {
    let pierce = state.player.power > PIERCE_POWER;
    let bombs = std::mem::take(&mut state.bombs);
    let mut kept = Vec::with_capacity(bombs.len());
    let mut used = vec![false; state.beams.len()];
    let mut destroyed = 0u32;

    'bombs: for bomb in bombs {
        for (bi, beam) in state.beams.iter().enumerate() {
            if used[bi] || !bomb.rect.intersects(&beam.rect) {
                continue;
            }
            if pierce {
                state
                    .explosions
                    .push(Explosion::new(bomb.rect.center, EXPLOSION_PIERCED_BOMB));
            } else {
                used[bi] = true;
                state
                    .explosions
                    .push(Explosion::new(bomb.rect.center, EXPLOSION_BOMB));
            }
            destroyed += 1;
            continue 'bombs;
        }
        kept.push(bomb);
    }
    state.bombs = kept;

    if !pierce {
        let mut idx = 0;
        state.beams.retain(|_| {
            let keep = !used[idx];
            idx += 1;
            keep
        });
    }
    state.score += destroyed * SCORE_PER_BOMB;
}

/// Gravity field x bombs, then x enemies. The field persists; everything it
/// overlaps dies. Enemy kills bypass hp, and a caught splitter still
/// releases its children (which the field will claim next frame).
fn gravity_pass(state: &mut GameState) {
    if state.gravity_fields.is_empty() {
        return;
    }
    let fields: Vec<_> = state.gravity_fields.iter().map(|g| g.rect()).collect();

    let bombs = std::mem::take(&mut state.bombs);
    let mut kept = Vec::with_capacity(bombs.len());
    for bomb in bombs {
        if fields.iter().any(|f| f.intersects(&bomb.rect)) {
            state
                .explosions
                .push(Explosion::new(bomb.rect.center, EXPLOSION_BOMB));
            state.score += SCORE_PER_BOMB;
        } else {
            kept.push(bomb);
        }
    }
    state.bombs = kept;

    let mut dead = vec![false; state.enemies.len()];
    let mut splits: Vec<(f32, f32)> = Vec::new();
    for (ei, enemy) in state.enemies.iter().enumerate() {
        if fields.iter().any(|f| f.intersects(&enemy.rect)) {
            dead[ei] = true;
            if enemy.kind.splits() {
                splits.push((enemy.rect.center.x, enemy.bound));
            }
            state
                .explosions
                .push(Explosion::new(enemy.rect.center, EXPLOSION_BOMB));
        }
    }
    let kills = dead.iter().filter(|&&d| d).count();
    let mut idx = 0;
    state.enemies.retain(|_| {
        let keep = !dead[idx];
        idx += 1;
        keep
    });
    for _ in 0..kills {
        state.award_kill();
    }
    for (x, bound) in splits {
        state.spawn_split_children(x, bound);
    }
}

/// Player x pickups. Hearts heal 1 HP when below max; boosts raise attack
/// power. The pickup is consumed either way.
fn pickup_pass(state: &mut GameState) {
    let player_rect = state.player.rect;
    let mut hearts = 0u32;
    let mut boosts = 0u32;
    state.pickups.retain(|pickup| {
        if pickup.rect.intersects(&player_rect) {
            match pickup.kind {
                PickupKind::Heart => hearts += 1,
                PickupKind::AttackBoost => boosts += 1,
            }
            false
        } else {
            true
        }
    });
    for _ in 0..hearts {
        if state.player.hp < state.player.hp_max {
            state.player.hp += 1;
        }
    }
    state.player.power += boosts;
}

/// Player x bombs. Invulnerable contact converts the bomb into score;
/// normal contact costs 1 HP per bomb and ends the session at zero.
fn player_bomb_pass(state: &mut GameState) {
    let player_rect = state.player.rect;
    let mut hits = 0u32;
    state.bombs.retain(|bomb| {
        if bomb.rect.intersects(&player_rect) {
            hits += 1;
            false
        } else {
            true
        }
    });
    if hits == 0 {
        return;
    }
    if state.player.is_invulnerable() {
        state.score += hits * SCORE_PER_BOMB;
        return;
    }
    for _ in 0..hits {
        state.player.hp = state.player.hp.saturating_sub(1);
        if state.player.hp == 0 {
            state.phase = GamePhase::Destroyed;
            log::info!(
                "player destroyed at frame {}, final score {}",
                state.frame,
                state.score
            );
            break;
        }
    }
}

/// Bomb x shield. The bomb dies; the shield only expires by its own timer.
fn shield_pass(state: &mut GameState) {
    if state.shields.is_empty() {
        return;
    }
    let shields: Vec<_> = state.shields.iter().map(|s| s.rect).collect();
    let bombs = std::mem::take(&mut state.bombs);
    let mut kept = Vec::with_capacity(bombs.len());
    for bomb in bombs {
        if shields.iter().any(|s| s.intersects(&bomb.rect)) {
            state
                .explosions
                .push(Explosion::new(bomb.rect.center, EXPLOSION_BOMB));
        } else {
            kept.push(bomb);
        }
    }
    state.bombs = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::state::{Beam, Bomb, DescentPhase, Enemy, EnemyKind};
    use glam::Vec2;

    fn enemy_at(kind: EnemyKind, x: f32, y: f32) -> Enemy {
        Enemy {
            kind,
            rect: Rect::square(Vec2::new(x, y), kind.size()),
            vy: 0.0,
            bound: y,
            phase: DescentPhase::Stationary,
            interval: 100,
            hp: kind.hp(),
        }
    }

    fn beam_at(x: f32, y: f32, power: u32) -> Beam {
        Beam {
            rect: Rect::new(Vec2::new(x, y), BEAM_WIDTH, BEAM_HEIGHT),
            dir: Vec2::X,
            power,
        }
    }

    fn bomb_at(x: f32, y: f32) -> Bomb {
        Bomb {
            rect: Rect::square(Vec2::new(x, y), 40.0),
            dir: Vec2::Y,
            radius: 20.0,
        }
    }

    #[test]
    fn test_beam_kills_standard_enemy_and_awards_score() {
        let mut state = GameState::new(1);
        let mut enemy = enemy_at(EnemyKind::Standard, 400.0, 200.0);
        enemy.hp = 1;
        state.enemies.push(enemy);
        state.live_enemies = 1;
        state.beams.push(beam_at(400.0, 200.0, 1));

        resolve(&mut state);

        assert!(state.enemies.is_empty());
        assert!(state.beams.is_empty());
        assert_eq!(state.score, SCORE_PER_KILL);
        assert_eq!(state.kills_this_round, 1);
        assert_eq!(state.live_enemies, 0);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].life, EXPLOSION_KILL);
    }

    #[test]
    fn test_surviving_enemy_takes_damage() {
        let mut state = GameState::new(1);
        state.enemies.push(enemy_at(EnemyKind::Standard, 400.0, 200.0));
        state.live_enemies = 1;
        state.beams.push(beam_at(400.0, 200.0, 1));

        resolve(&mut state);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].hp, 2);
        assert_eq!(state.score, 0);
        assert_eq!(state.explosions[0].life, EXPLOSION_HIT);
    }

    #[test]
    fn test_splitter_releases_exactly_two_children() {
        let mut state = GameState::new(1);
        state.enemies.push(enemy_at(EnemyKind::Splitter, 700.0, 300.0));
        state.live_enemies = 1;
        state.beams.push(beam_at(700.0, 300.0, 1));

        resolve(&mut state);

        assert_eq!(state.enemies.len(), 2);
        let left = &state.enemies[0];
        let right = &state.enemies[1];
        assert_eq!(left.kind, EnemyKind::SmallLeft);
        assert_eq!(right.kind, EnemyKind::SmallRight);
        assert_eq!(left.rect.center, Vec2::new(650.0, 300.0));
        assert_eq!(right.rect.center, Vec2::new(750.0, 300.0));
        assert_eq!(left.bound, 300.0);
        assert_eq!(right.bound, 300.0);
        // parent out, two children in
        assert_eq!(state.live_enemies, 2);
        assert_eq!(state.score, SCORE_PER_KILL);
    }

    #[test]
    fn test_splitter_dies_on_any_hit_despite_hp() {
        let mut state = GameState::new(1);
        let mut splitter = enemy_at(EnemyKind::Splitter, 700.0, 300.0);
        splitter.hp = 2;
        state.enemies.push(splitter);
        state.live_enemies = 1;
        state.beams.push(beam_at(700.0, 300.0, 1));

        resolve(&mut state);

        assert!(state.enemies.iter().all(|e| e.kind != EnemyKind::Splitter));
        assert_eq!(state.kills_this_round, 1);
    }

    #[test]
    fn test_low_power_beam_consumed_by_bomb() {
        let mut state = GameState::new(1);
        state.player.power = 1;
        state.bombs.push(bomb_at(500.0, 500.0));
        state.beams.push(beam_at(500.0, 500.0, 1));

        resolve(&mut state);

        assert!(state.bombs.is_empty());
        assert!(state.beams.is_empty());
        assert_eq!(state.score, SCORE_PER_BOMB);
        assert_eq!(state.explosions[0].life, EXPLOSION_BOMB);
    }

    #[test]
    fn test_high_power_beam_pierces_bombs() {
        let mut state = GameState::new(1);
        state.player.power = 4;
        state.bombs.push(bomb_at(500.0, 500.0));
        state.bombs.push(bomb_at(510.0, 505.0));
        state.beams.push(beam_at(500.0, 500.0, 4));

        resolve(&mut state);

        assert!(state.bombs.is_empty());
        assert_eq!(state.beams.len(), 1);
        assert_eq!(state.score, 2 * SCORE_PER_BOMB);
        assert!(
            state
                .explosions
                .iter()
                .all(|e| e.life == EXPLOSION_PIERCED_BOMB)
        );
    }

    #[test]
    fn test_gravity_field_claims_bombs_and_enemies() {
        let mut state = GameState::new(1);
        state.score = 200;
        assert!(state.activate_gravity());
        state.bombs.push(bomb_at(100.0, 100.0));
        state.enemies.push(enemy_at(EnemyKind::Standard, 1200.0, 300.0));
        state.live_enemies = 1;

        resolve(&mut state);

        assert!(state.bombs.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.gravity_fields.len(), 1);
        assert_eq!(state.score, SCORE_PER_BOMB + SCORE_PER_KILL);
        assert_eq!(state.kills_this_round, 1);
    }

    #[test]
    fn test_gravity_field_splits_splitter() {
        let mut state = GameState::new(1);
        state.score = 200;
        assert!(state.activate_gravity());
        state.enemies.push(enemy_at(EnemyKind::Splitter, 700.0, 300.0));
        state.live_enemies = 1;

        resolve(&mut state);

        assert_eq!(state.enemies.len(), 2);
        assert!(state.enemies.iter().all(|e| e.kind != EnemyKind::Splitter));
    }

    #[test]
    fn test_heart_heals_only_below_max() {
        let mut state = GameState::new(1);
        state.player.hp = 5;
        state.pickups.push(crate::sim::state::Pickup {
            kind: PickupKind::Heart,
            rect: state.player.rect,
            vy: 0.0,
            bound: 0.0,
            phase: DescentPhase::Stationary,
        });
        resolve(&mut state);
        assert_eq!(state.player.hp, 5);
        assert!(state.pickups.is_empty());

        state.player.hp = 3;
        state.pickups.push(crate::sim::state::Pickup {
            kind: PickupKind::Heart,
            rect: state.player.rect,
            vy: 0.0,
            bound: 0.0,
            phase: DescentPhase::Stationary,
        });
        resolve(&mut state);
        assert_eq!(state.player.hp, 4);
    }

    #[test]
    fn test_attack_boost_raises_power() {
        let mut state = GameState::new(1);
        state.pickups.push(crate::sim::state::Pickup {
            kind: PickupKind::AttackBoost,
            rect: state.player.rect,
            vy: 0.0,
            bound: 0.0,
            phase: DescentPhase::Stationary,
        });
        resolve(&mut state);
        assert_eq!(state.player.power, 2);
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_normal_bomb_contact_costs_one_hp() {
        let mut state = GameState::new(1);
        let center = state.player.rect.center;
        state.bombs.push(bomb_at(center.x, center.y));

        resolve(&mut state);

        assert_eq!(state.player.hp, PLAYER_MAX_HP - 1);
        assert!(state.bombs.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_invulnerable_bomb_contact_scores_instead() {
        let mut state = GameState::new(1);
        state.player.hyper_ticks = 100;
        let center = state.player.rect.center;
        state.bombs.push(bomb_at(center.x, center.y));

        resolve(&mut state);

        assert_eq!(state.player.hp, PLAYER_MAX_HP);
        assert_eq!(state.score, SCORE_PER_BOMB);
        assert!(state.bombs.is_empty());
    }

    #[test]
    fn test_last_hp_bomb_ends_session_with_final_score() {
        let mut state = GameState::new(1);
        state.player.hp = 1;
        state.score = 137;
        let center = state.player.rect.center;
        state.bombs.push(bomb_at(center.x, center.y));

        resolve(&mut state);

        assert_eq!(state.player.hp, 0);
        assert_eq!(state.phase, GamePhase::Destroyed);
        assert_eq!(state.score, 137);
    }

    #[test]
    fn test_shield_blocks_bomb_and_survives() {
        let mut state = GameState::new(1);
        state.score = 50;
        assert!(state.activate_shield());
        let shield_center = state.shields[0].rect.center;
        state.bombs.push(bomb_at(shield_center.x, shield_center.y));

        resolve(&mut state);

        assert!(state.bombs.is_empty());
        assert_eq!(state.shields.len(), 1);
        assert_eq!(state.explosions.len(), 1);
    }
}
