//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick = one frame at 50 Hz)
//! - Seeded RNG only
//! - Single owner for every entity collection
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;
pub mod view;

pub use geometry::{Facing, Rect, direction_between};
pub use state::{
    Beam, Bomb, DescentPhase, Enemy, EnemyBeam, EnemyKind, Explosion, GamePhase, GameState,
    GravityField, Pickup, PickupKind, Player, Shield,
};
pub use tick::{TickInput, tick};
pub use view::{BeamSegment, Hud, RenderFrame, Sprite, SpriteKind, render_frame};
