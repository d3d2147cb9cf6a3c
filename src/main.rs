//! Sky Siege entry point
//!
//! Headless native host: runs the simulation at a fixed 50 Hz, feeds it
//! autopilot input, logs the HUD once a second and records the result on
//! the leaderboard. A graphical front end would drive the same loop with
//! real key state instead of the autopilot.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use sky_siege::consts::{ARENA_HEIGHT, ARENA_WIDTH, FRAME_RATE, PLAYER_SIZE};
use sky_siege::sim::{GamePhase, GameState, TickInput, render_frame, tick};
use sky_siege::{HighScores, Settings};

fn main() {
    env_logger::init();
    log::info!("Sky Siege starting...");

    let settings = Settings::load();
    let seed = seed_from(&settings);
    log::info!("Session seed: {seed}");

    let mut state = GameState::new(seed);
    let mut high_scores = HighScores::load();

    let frame_duration = Duration::from_secs(1) / FRAME_RATE;
    let mut next_frame = Instant::now();

    while state.phase == GamePhase::Playing {
        let input = if settings.autopilot {
            autopilot_input(&state)
        } else {
            TickInput::default()
        };
        tick(&mut state, input);

        if settings.hud_log && state.frame % FRAME_RATE as u64 == 0 {
            let frame = render_frame(&state);
            log::info!(
                "hp {}/{} power {} score {} round {} enemies {} (next round in {})",
                frame.hud.hp,
                frame.hud.hp_max,
                frame.hud.power,
                frame.hud.score,
                frame.hud.round,
                frame.hud.live_enemies,
                frame.hud.remaining_to_next_round,
            );
        }

        next_frame += frame_duration;
        let now = Instant::now();
        match next_frame.checked_duration_since(now) {
            Some(remaining) => thread::sleep(remaining),
            None => {
                // fell behind; resync instead of bursting to catch up
                next_frame = now;
            }
        }
    }

    match state.phase {
        GamePhase::Destroyed => {
            println!(
                "Destroyed at round {} after {} frames. Final score: {}",
                state.round, state.frame, state.score
            );
            if let Some(rank) = high_scores.add_score(state.score, state.round, state.frame) {
                println!("High score! Rank {rank}");
                high_scores.save();
            }
        }
        GamePhase::Quit => {
            println!("Session quit at frame {}", state.frame);
        }
        GamePhase::Playing => unreachable!(),
    }
}

/// Seed priority: CLI argument, then settings, then the clock
fn seed_from(settings: &Settings) -> u64 {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.parse() {
            Ok(seed) => return seed,
            Err(_) => log::warn!("Ignoring non-numeric seed argument {arg:?}"),
        }
    }
    if let Some(seed) = settings.seed {
        return seed;
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Minimal self-playing input: hold position near the center, dodge the
/// closest bomb and fire every fourth frame.
fn autopilot_input(state: &GameState) -> TickInput {
    let pos = state.player.rect.center;
    let margin = PLAYER_SIZE * 2.0;

    let mut input = TickInput {
        fire: state.frame % 4 == 0,
        ..TickInput::default()
    };

    // stay off the walls
    if pos.x < margin {
        input.right = true;
    } else if pos.x > ARENA_WIDTH - margin {
        input.left = true;
    }
    if pos.y < ARENA_HEIGHT * 0.4 {
        input.down = true;
    } else if pos.y > ARENA_HEIGHT - margin {
        input.up = true;
    }

    // dodge the closest bomb, boosted
    if let Some(bomb) = state
        .bombs
        .iter()
        .min_by(|a, b| {
            let da = a.rect.center.distance_squared(pos);
            let db = b.rect.center.distance_squared(pos);
            da.total_cmp(&db)
        })
        .filter(|b| b.rect.center.distance(pos) < PLAYER_SIZE * 3.0)
    {
        input.boost = true;
        if bomb.rect.center.x < pos.x {
            input.right = true;
            input.left = false;
        } else {
            input.left = true;
            input.right = false;
        }
    }

    input
}
