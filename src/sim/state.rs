//! Entity types and the session state
//!
//! `GameState` is the single owner of every entity collection. Entities never
//! hold references to each other; anything one entity needs from another
//! (a bomb's target, an enemy beam's endpoints) is captured by value at
//! spawn time.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Facing, Rect, direction_between};
use crate::consts::*;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player HP reached zero; `score` is the final result
    Destroyed,
    /// User quit mid-session; no result payload
    Quit,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Last non-zero movement direction; selects the sprite orientation
    pub facing: Facing,
    pub hp: u32,
    pub hp_max: u32,
    /// Attack power; only ever increases
    pub power: u32,
    /// Frames of invulnerability remaining; 0 = normal state
    pub hyper_ticks: u32,
}

impl Player {
    fn new() -> Self {
        Self {
            rect: Rect::square(Vec2::new(PLAYER_START_X, PLAYER_START_Y), PLAYER_SIZE),
            facing: Facing::East,
            hp: PLAYER_MAX_HP,
            hp_max: PLAYER_MAX_HP,
            power: 1,
            hyper_ticks: 0,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.hyper_ticks > 0
    }
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Standard,
    /// Releases two Small children when destroyed, by any means
    Splitter,
    SmallLeft,
    SmallRight,
}

impl EnemyKind {
    pub fn hp(&self) -> i32 {
        match self {
            EnemyKind::Standard => 3,
            EnemyKind::Splitter => 2,
            EnemyKind::SmallLeft | EnemyKind::SmallRight => 1,
        }
    }

    pub fn size(&self) -> f32 {
        match self {
            EnemyKind::Standard => STANDARD_ENEMY_SIZE,
            EnemyKind::Splitter => SPLITTER_SIZE,
            EnemyKind::SmallLeft | EnemyKind::SmallRight => SMALL_ENEMY_SIZE,
        }
    }

    pub fn splits(&self) -> bool {
        matches!(self, EnemyKind::Splitter)
    }
}

/// Descend-then-stop lifecycle. The transition is one-way: once an entity
/// crosses its stop altitude it stays put for the rest of its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DescentPhase {
    Descending,
    Stationary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub rect: Rect,
    pub vy: f32,
    /// Stop altitude: descent halts the frame center y first exceeds this
    pub bound: f32,
    pub phase: DescentPhase,
    /// Bomb-drop cadence: drops when `frame % interval == 0` while stationary
    pub interval: u64,
    pub hp: i32,
}

/// Player beam. Damage is the attack power captured at creation; later
/// power pickups do not retroactively buff beams in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub rect: Rect,
    pub dir: Vec2,
    pub power: u32,
}

/// Enemy bomb. Aimed at the player's position once, at spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub rect: Rect,
    pub dir: Vec2,
    /// Visual radius, random per bomb
    pub radius: f32,
}

/// A growing line segment from a stationary enemy to where the player stood
/// when it fired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBeam {
    pub from: Vec2,
    pub to: Vec2,
    pub thickness: u32,
    pub age: u32,
    pub life: i32,
}

/// Full-screen area effect that destroys overlapping bombs and enemies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravityField {
    pub life: i32,
}

impl GravityField {
    pub fn rect(&self) -> Rect {
        Rect::new(
            Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
            ARENA_WIDTH,
            ARENA_HEIGHT,
        )
    }
}

/// Bomb-blocking wall, anchored relative to the player at activation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub rect: Rect,
    pub life: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Heals 1 HP if below max
    Heart,
    /// Attack power +1
    AttackBoost,
}

/// Falls like an enemy, then sits at its stop altitude until collected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub rect: Rect,
    pub vy: f32,
    pub bound: f32,
    pub phase: DescentPhase,
}

/// Cosmetic blast marker; holds no gameplay state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub life: i32,
}

impl Explosion {
    pub fn new(pos: Vec2, life: i32) -> Self {
        Self { pos, life }
    }

    /// Which of the two blast images to show; flips every 10 frames of
    /// remaining life
    pub fn frame(&self) -> u8 {
        ((self.life.max(0) / 10) % 2) as u8
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Frame counter, incremented once per tick
    pub frame: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub beams: Vec<Beam>,
    pub bombs: Vec<Bomb>,
    pub enemy_beams: Vec<EnemyBeam>,
    pub gravity_fields: Vec<GravityField>,
    pub shields: Vec<Shield>,
    pub pickups: Vec<Pickup>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    /// Difficulty epoch, starts at 1 and never decreases
    pub round: u32,
    /// Kills since the last round advance; resets to 0 at 5
    pub kills_this_round: u32,
    /// Total enemies ever spawned, children included
    pub enemies_spawned: u64,
    /// Enemies currently alive
    pub live_enemies: u32,
    /// Reserved pacing knob, decremented on every round advance. Nothing
    /// consumes it yet.
    pub round_pacing: f32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            phase: GamePhase::Playing,
            player: Player::new(),
            enemies: Vec::new(),
            beams: Vec::new(),
            bombs: Vec::new(),
            enemy_beams: Vec::new(),
            gravity_fields: Vec::new(),
            shields: Vec::new(),
            pickups: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            round: 1,
            kills_this_round: 0,
            enemies_spawned: 0,
            live_enemies: 0,
            round_pacing: 200.0,
        }
    }

    /// Spawn one enemy at a random x along the top edge
    pub fn spawn_enemy(&mut self, kind: EnemyKind) {
        let x = self.rng.random_range(0.0..=ARENA_WIDTH);
        let bound = self.rng.random_range(ENEMY_BOUND_MIN..=ENEMY_BOUND_MAX);
        let interval = self
            .rng
            .random_range(ENEMY_INTERVAL_MIN..=ENEMY_INTERVAL_MAX);
        self.enemies.push(Enemy {
            kind,
            rect: Rect::square(Vec2::new(x, 0.0), kind.size()),
            vy: ENEMY_DESCENT_SPEED,
            bound,
            phase: DescentPhase::Descending,
            interval,
            hp: kind.hp(),
        });
        self.enemies_spawned += 1;
        self.live_enemies += 1;
    }

    /// Release a destroyed splitter's two children at its last position and
    /// stop altitude: exactly one left, one right, never more.
    pub fn spawn_split_children(&mut self, x: f32, bound: f32) {
        for (kind, offset) in [
            (EnemyKind::SmallLeft, -SPLIT_OFFSET),
            (EnemyKind::SmallRight, SPLIT_OFFSET),
        ] {
            let interval = self
                .rng
                .random_range(ENEMY_INTERVAL_MIN..=ENEMY_INTERVAL_MAX);
            self.enemies.push(Enemy {
                kind,
                rect: Rect::square(Vec2::new(x + offset, bound), kind.size()),
                vy: ENEMY_DESCENT_SPEED,
                bound,
                phase: DescentPhase::Descending,
                interval,
                hp: kind.hp(),
            });
            self.enemies_spawned += 1;
            self.live_enemies += 1;
        }
    }

    /// Drop a pickup from a random x along the top edge
    pub fn spawn_pickup(&mut self, kind: PickupKind) {
        let x = self.rng.random_range(0.0..=ARENA_WIDTH);
        let bound = self.rng.random_range(ENEMY_BOUND_MIN..=ENEMY_BOUND_MAX);
        self.pickups.push(Pickup {
            kind,
            rect: Rect::square(Vec2::new(x, 0.0), PICKUP_SIZE),
            vy: ENEMY_DESCENT_SPEED,
            bound,
            phase: DescentPhase::Descending,
        });
    }

    /// Fire a beam in the player's facing direction, offset one body length
    /// ahead. The beam snapshots the current attack power.
    pub fn fire_beam(&mut self) {
        let dir = self.player.facing.unit();
        let origin = self.player.rect.center + dir * self.player.rect.size;
        self.beams.push(Beam {
            rect: Rect::new(origin, BEAM_WIDTH, BEAM_HEIGHT),
            dir,
            power: self.player.power,
        });
    }

    /// Drop a bomb from `drop_pos`, aimed at the player's current position
    /// as seen from `enemy_center`. The aim is fixed for the bomb's life.
    pub fn spawn_bomb(&mut self, enemy_center: Vec2, drop_pos: Vec2) {
        let radius = self.rng.random_range(BOMB_MIN_RADIUS..=BOMB_MAX_RADIUS);
        let dir = direction_between(enemy_center, self.player.rect.center);
        self.bombs.push(Bomb {
            rect: Rect::square(drop_pos, radius * 2.0),
            dir,
            radius,
        });
    }

    /// Emit an enemy beam from `from` toward the player's current position
    pub fn spawn_enemy_beam(&mut self, from: Vec2) {
        self.enemy_beams.push(EnemyBeam {
            from,
            to: self.player.rect.center,
            thickness: 1,
            age: 0,
            life: ENEMY_BEAM_LIFE,
        });
    }

    /// Activate the gravity field if the score covers the cost.
    /// Deduction and activation are atomic; an unaffordable press is a no-op.
    pub fn activate_gravity(&mut self) -> bool {
        if self.score < GRAVITY_COST {
            return false;
        }
        self.score -= GRAVITY_COST;
        self.gravity_fields.push(GravityField { life: GRAVITY_LIFE });
        log::debug!("gravity field up (frame {})", self.frame);
        true
    }

    /// Enter the invulnerable state if the score covers the cost. Pressing
    /// again while active just rewinds the timer to full.
    pub fn activate_hyper(&mut self) -> bool {
        if self.score < HYPER_COST {
            return false;
        }
        self.score -= HYPER_COST;
        self.player.hyper_ticks = HYPER_DURATION;
        log::debug!("hyper state entered (frame {})", self.frame);
        true
    }

    /// Raise a shield if the score covers the cost and none is active
    pub fn activate_shield(&mut self) -> bool {
        if self.score < SHIELD_COST || !self.shields.is_empty() {
            return false;
        }
        self.score -= SHIELD_COST;
        let anchor = self.player.rect.center + self.player.rect.size;
        self.shields.push(Shield {
            rect: Rect::new(anchor, SHIELD_WIDTH, SHIELD_HEIGHT),
            life: SHIELD_LIFE,
        });
        log::debug!("shield raised (frame {})", self.frame);
        true
    }

    /// Score and counter bookkeeping for one enemy death
    pub(crate) fn award_kill(&mut self) {
        self.score += SCORE_PER_KILL;
        self.kills_this_round += 1;
        self.live_enemies = self.live_enemies.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_activation_deducts_cost() {
        let mut state = GameState::new(1);
        state.score = 250;
        assert!(state.activate_gravity());
        assert_eq!(state.score, 50);
        assert_eq!(state.gravity_fields.len(), 1);
        assert_eq!(state.gravity_fields[0].life, GRAVITY_LIFE);
    }

    #[test]
    fn test_gravity_unaffordable_is_noop() {
        let mut state = GameState::new(1);
        state.score = 199;
        assert!(!state.activate_gravity());
        assert_eq!(state.score, 199);
        assert!(state.gravity_fields.is_empty());
    }

    #[test]
    fn test_second_shield_refused_while_active() {
        let mut state = GameState::new(1);
        state.score = 500;
        assert!(state.activate_shield());
        assert_eq!(state.score, 450);
        assert!(!state.activate_shield());
        assert_eq!(state.score, 450);
        assert_eq!(state.shields.len(), 1);
    }

    #[test]
    fn test_hyper_retrigger_overwrites_timer() {
        let mut state = GameState::new(1);
        state.score = 300;
        assert!(state.activate_hyper());
        state.player.hyper_ticks = 17;
        assert!(state.activate_hyper());
        assert_eq!(state.player.hyper_ticks, HYPER_DURATION);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_beam_captures_power_at_creation() {
        let mut state = GameState::new(1);
        state.player.power = 2;
        state.fire_beam();
        state.player.power = 4;
        state.fire_beam();
        assert_eq!(state.beams[0].power, 2);
        assert_eq!(state.beams[1].power, 4);
    }

    #[test]
    fn test_spawned_enemy_within_ranges() {
        let mut state = GameState::new(42);
        for _ in 0..20 {
            state.spawn_enemy(EnemyKind::Standard);
        }
        for enemy in &state.enemies {
            assert!(enemy.rect.center.x >= 0.0 && enemy.rect.center.x <= ARENA_WIDTH);
            assert!(enemy.bound >= ENEMY_BOUND_MIN && enemy.bound <= ENEMY_BOUND_MAX);
            assert!(enemy.interval >= ENEMY_INTERVAL_MIN && enemy.interval <= ENEMY_INTERVAL_MAX);
            assert_eq!(enemy.phase, DescentPhase::Descending);
        }
        assert_eq!(state.enemies_spawned, 20);
        assert_eq!(state.live_enemies, 20);
    }

    #[test]
    fn test_split_children_positions() {
        let mut state = GameState::new(7);
        state.spawn_split_children(600.0, 240.0);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.enemies[0].kind, EnemyKind::SmallLeft);
        assert_eq!(state.enemies[0].rect.center.x, 550.0);
        assert_eq!(state.enemies[1].kind, EnemyKind::SmallRight);
        assert_eq!(state.enemies[1].rect.center.x, 650.0);
        for child in &state.enemies {
            assert_eq!(child.rect.center.y, 240.0);
            assert_eq!(child.bound, 240.0);
            assert_eq!(child.hp, 1);
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(12345);
        let mut b = GameState::new(12345);
        for _ in 0..5 {
            a.spawn_enemy(EnemyKind::Splitter);
            b.spawn_enemy(EnemyKind::Splitter);
        }
        for (x, y) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(x.rect.center, y.rect.center);
            assert_eq!(x.bound, y.bound);
            assert_eq!(x.interval, y.interval);
        }
    }
}
