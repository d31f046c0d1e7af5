//! Demo autopilot
//!
//! Reads the state and produces the input a cautious player would give:
//! pick the nearest safe platform above, drift under it, hop when grounded.

use super::state::{GameState, Platform, PlatformKind};
use super::tick::TickInput;

/// How far above the player's feet a platform can be and still be a target
const REACH: f32 = 180.0;
/// Horizontal slack before the autopilot bothers steering
const DEAD_ZONE: f32 = 6.0;

fn is_target(platform: &Platform, feet: f32) -> bool {
    platform.is_solid()
        && platform.kind != PlatformKind::Kill
        && platform.top() < feet - 1.0
        && platform.top() > feet - REACH
}

/// Decide this tick's input
pub fn drive(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    if !matches!(state.phase, super::state::RunPhase::Alive) {
        return input;
    }

    let player = &state.player;
    let feet = player.bottom();
    let center = player.center().x;

    // Closest step up, leaning toward springs and teleports
    let target = state
        .platforms
        .iter()
        .filter(|p| is_target(p, feet))
        .min_by(|a, b| {
            let score = |p: &Platform| {
                let bonus = match p.kind {
                    PlatformKind::Spring | PlatformKind::Teleport => 60.0,
                    _ => 0.0,
                };
                (feet - p.top()) + (p.pos.x + p.size.x / 2.0 - center).abs() * 0.5 - bonus
            };
            score(a).total_cmp(&score(b))
        });

    if let Some(platform) = target {
        let goal = platform.pos.x + platform.size.x / 2.0 + platform.dx * 10.0;
        let error = goal - center;
        if error < -DEAD_ZONE {
            input.left = true;
        } else if error > DEAD_ZONE {
            input.right = true;
        }
    }

    input.jump = player.grounded;
    input
}
