//! Player kinematics
//!
//! Horizontal motion is input driven with acceleration and friction;
//! vertical motion is gravity driven and suppressed while grounded.

use super::state::{GameState, Player};
use super::tick::TickInput;
use crate::audio::SoundCue;
use crate::consts::*;
use crate::settings::RunModifiers;
use crate::wrap_x;

/// Current horizontal acceleration and speed cap
pub fn horizontal_limits(player: &Player) -> (f32, f32) {
    if player.has_speed_boost() {
        (
            PLAYER_ACCEL * SPEED_BOOST_ACCEL_MULT,
            MAX_PLAYER_SPEED * SPEED_BOOST_MAX_MULT,
        )
    } else {
        (PLAYER_ACCEL, MAX_PLAYER_SPEED)
    }
}

/// Apply held directions to horizontal velocity
pub fn steer(player: &mut Player, input: &TickInput) {
    let (accel, max_speed) = horizontal_limits(player);
    if input.left {
        player.vel.x -= accel;
    } else if input.right {
        player.vel.x += accel;
    } else {
        player.vel.x *= PLAYER_FRICTION;
    }
    player.vel.x = player.vel.x.clamp(-max_speed, max_speed);
}

/// Try to jump; only honored while grounded
///
/// Returns true if the jump happened.
pub fn try_jump(player: &mut Player, modifiers: &RunModifiers) -> bool {
    if !player.grounded {
        return false;
    }
    player.vel.y = BASE_JUMP_FORCE * modifiers.jump;
    player.grounded = false;
    player.hazard_ticks = 0;
    true
}

/// Gravity while airborne, none while grounded
pub fn apply_gravity(player: &mut Player, modifiers: &RunModifiers) {
    if player.grounded {
        player.vel.y = 0.0;
    } else {
        player.vel.y += GRAVITY * modifiers.gravity;
    }
}

/// Integrate one tick of player motion
pub fn integrate(state: &mut GameState, input: &TickInput) {
    let modifiers = state.session.modifiers;
    let player = &mut state.player;

    player.immunity.tick();
    player.speed_boost.tick();

    steer(player, input);
    let jumped = input.jump && try_jump(player, &modifiers);

    player.pos.x += player.vel.x;
    apply_gravity(player, &modifiers);
    player.pos.y += player.vel.y;
    player.pos.x = wrap_x(player.pos.x, player.size.x);

    if jumped {
        state.cue(SoundCue::Jump);
    }
}
