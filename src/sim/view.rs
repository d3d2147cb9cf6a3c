//! Read-only projection of the session state for the host to draw
//!
//! The simulation never draws anything itself. Once per frame the host calls
//! [`render_frame`] and gets back plain data: sprite placements, beam
//! segments and the HUD numbers. Nothing here mutates state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EnemyKind, GameState, PickupKind};
use crate::consts::KILLS_PER_ROUND;
use crate::sim::geometry::Facing;

/// What to draw at a sprite's position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player { facing: Facing, invulnerable: bool },
    Enemy { kind: EnemyKind },
    Beam { dir: Vec2 },
    Bomb { radius: f32 },
    GravityField,
    Shield,
    Pickup { kind: PickupKind },
    Explosion { frame: u8 },
}

/// One positioned drawable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub pos: Vec2,
    pub kind: SpriteKind,
}

/// Enemy beams render as line segments, not boxes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub thickness: u32,
}

/// Status readout for the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub hp: u32,
    pub hp_max: u32,
    pub power: u32,
    pub score: u32,
    pub round: u32,
    /// Kills still needed before the next round starts
    pub remaining_to_next_round: u32,
    pub live_enemies: u32,
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub sprites: Vec<Sprite>,
    pub beam_segments: Vec<BeamSegment>,
    pub hud: Hud,
}

/// Project the current state into draw order: area effects at the back, the
/// player on top, explosions above everything.
pub fn render_frame(state: &GameState) -> RenderFrame {
    let mut sprites = Vec::new();

    for field in &state.gravity_fields {
        sprites.push(Sprite {
            pos: field.rect().center,
            kind: SpriteKind::GravityField,
        });
    }
    for enemy in &state.enemies {
        sprites.push(Sprite {
            pos: enemy.rect.center,
            kind: SpriteKind::Enemy { kind: enemy.kind },
        });
    }
    for bomb in &state.bombs {
        sprites.push(Sprite {
            pos: bomb.rect.center,
            kind: SpriteKind::Bomb {
                radius: bomb.radius,
            },
        });
    }
    for beam in &state.beams {
        sprites.push(Sprite {
            pos: beam.rect.center,
            kind: SpriteKind::Beam { dir: beam.dir },
        });
    }
    for pickup in &state.pickups {
        sprites.push(Sprite {
            pos: pickup.rect.center,
            kind: SpriteKind::Pickup { kind: pickup.kind },
        });
    }
    for shield in &state.shields {
        sprites.push(Sprite {
            pos: shield.rect.center,
            kind: SpriteKind::Shield,
        });
    }
    sprites.push(Sprite {
        pos: state.player.rect.center,
        kind: SpriteKind::Player {
            facing: state.player.facing,
            invulnerable: state.player.is_invulnerable(),
        },
    });
    for explosion in &state.explosions {
        sprites.push(Sprite {
            pos: explosion.pos,
            kind: SpriteKind::Explosion {
                frame: explosion.frame(),
            },
        });
    }

    let beam_segments = state
        .enemy_beams
        .iter()
        .map(|b| BeamSegment {
            from: b.from,
            to: b.to,
            thickness: b.thickness,
        })
        .collect();

    RenderFrame {
        sprites,
        beam_segments,
        hud: Hud {
            hp: state.player.hp,
            hp_max: state.player.hp_max,
            power: state.player.power,
            score: state.score,
            round: state.round,
            remaining_to_next_round: KILLS_PER_ROUND - state.kills_this_round.min(KILLS_PER_ROUND),
            live_enemies: state.live_enemies,
        },
    }
}
