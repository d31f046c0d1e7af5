//! Camera scroll
//!
//! The camera never moves. When the player climbs past the threshold the
//! whole world is shifted down instead, and the shift becomes score.

use super::state::GameState;
use crate::consts::*;

/// Recenter on the player if they rose above the threshold
///
/// Returns the meters gained this tick.
pub fn follow_player(state: &mut GameState) -> f64 {
    if state.player.pos.y >= SCROLL_THRESHOLD {
        return 0.0;
    }
    let offset = SCROLL_THRESHOLD - state.player.pos.y;
    state.player.pos.y = SCROLL_THRESHOLD;
    shift_world(state, offset);
    offset as f64 * METERS_PER_PIXEL * state.session.modifiers.score
}

/// Move every entity down by `offset` pixels
pub fn shift_world(state: &mut GameState, offset: f32) {
    for p in state.platforms.iter_mut() {
        p.pos.y += offset;
    }
    for b in state.bullets.iter_mut() {
        b.pos.y += offset;
    }
    for p in state.particles.iter_mut() {
        p.pos.y += offset;
    }
    for t in state.turrets.iter_mut() {
        t.y += offset;
    }
}
