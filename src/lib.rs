//! Sky Siege - a wave-survival arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, round progression)
//! - `settings`: Host preferences with file persistence
//! - `highscores`: Leaderboard persisted between sessions
//!
//! Rendering, input devices and audio are external collaborators: the host
//! feeds the simulation one `TickInput` snapshot per frame and draws the
//! `RenderFrame` it gets back.

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 1600.0;
    pub const ARENA_HEIGHT: f32 = 900.0;

    /// Fixed frame rate; one simulation tick is one frame
    pub const FRAME_RATE: u32 = 50;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 80.0;
    pub const PLAYER_START_X: f32 = 900.0;
    pub const PLAYER_START_Y: f32 = 400.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_BOOST_SPEED: f32 = 10.0;
    pub const PLAYER_MAX_HP: u32 = 5;

    /// Player beam
    pub const BEAM_SPEED: f32 = 10.0;
    pub const BEAM_WIDTH: f32 = 40.0;
    pub const BEAM_HEIGHT: f32 = 20.0;
    /// Attack power above which beams pierce bombs without being consumed
    pub const PIERCE_POWER: u32 = 3;

    /// Bombs
    pub const BOMB_SPEED: f32 = 6.0;
    pub const BOMB_MIN_RADIUS: f32 = 10.0;
    pub const BOMB_MAX_RADIUS: f32 = 50.0;

    /// Enemies descend at this rate until they cross their stop altitude
    pub const ENEMY_DESCENT_SPEED: f32 = 6.0;
    pub const ENEMY_BOUND_MIN: f32 = 50.0;
    pub const ENEMY_BOUND_MAX: f32 = 450.0;
    pub const ENEMY_INTERVAL_MIN: u64 = 50;
    pub const ENEMY_INTERVAL_MAX: u64 = 300;
    pub const STANDARD_ENEMY_SIZE: f32 = 60.0;
    pub const SPLITTER_SIZE: f32 = 80.0;
    pub const SMALL_ENEMY_SIZE: f32 = 40.0;
    /// Horizontal offset of a splitter's two children from its last position
    pub const SPLIT_OFFSET: f32 = 50.0;

    /// Spawn cadence (frames)
    pub const ENEMY_SPAWN_PERIOD: u64 = 200;
    pub const HEART_SPAWN_PERIOD: u64 = 1500;

    /// Pickup box size
    pub const PICKUP_SIZE: f32 = 40.0;

    /// Ability costs (score) and durations (frames)
    pub const GRAVITY_COST: u32 = 200;
    pub const GRAVITY_LIFE: i32 = 400;
    pub const HYPER_COST: u32 = 100;
    pub const HYPER_DURATION: u32 = 500;
    pub const SHIELD_COST: u32 = 50;
    pub const SHIELD_LIFE: i32 = 400;
    pub const SHIELD_WIDTH: f32 = 160.0;
    pub const SHIELD_HEIGHT: f32 = 20.0;

    /// Enemy beam: thickness +1 every growth period, dead past max
    pub const ENEMY_BEAM_LIFE: i32 = 120;
    pub const ENEMY_BEAM_GROWTH_PERIOD: u32 = 10;
    pub const ENEMY_BEAM_MAX_THICKNESS: u32 = 10;

    /// Explosion lifetimes (frames)
    pub const EXPLOSION_HIT: i32 = 10;
    pub const EXPLOSION_KILL: i32 = 100;
    pub const EXPLOSION_BOMB: i32 = 50;
    pub const EXPLOSION_PIERCED_BOMB: i32 = 30;

    /// Scoring
    pub const SCORE_PER_KILL: u32 = 10;
    pub const SCORE_PER_BOMB: u32 = 1;

    /// Kills needed to advance a round
    pub const KILLS_PER_ROUND: u32 = 5;
    /// Rounds beyond this add enemy beams to every bomb drop
    pub const BEAM_ROUNDS_AFTER: u32 = 3;
}
