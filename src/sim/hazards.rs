//! Turrets and bullets

use glam::Vec2;

use super::collision::bullet_hits_player;
use super::state::{Bullet, GameState};
use crate::consts::*;

/// Count down turret cooldowns and fire the ones that reach zero
pub fn update_turrets(state: &mut GameState) {
    let mut shots: Vec<(Vec2, f32)> = Vec::new();
    for turret in state.turrets.iter_mut() {
        if turret.cooldown > 0 {
            turret.cooldown -= 1;
        } else {
            shots.push(turret.muzzle());
            turret.cooldown = TURRET_FIRE_COOLDOWN;
        }
    }
    for (pos, vx) in shots {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos,
            vx,
            radius: BULLET_RADIUS,
        });
    }
}

/// Advance bullets and drop the ones that left the play area
pub fn update_bullets(state: &mut GameState) {
    for bullet in state.bullets.iter_mut() {
        bullet.pos.x += bullet.vx;
    }
    state.bullets.retain(|b| {
        b.pos.x >= -BULLET_BOUNDS_MARGIN && b.pos.x <= PLAY_WIDTH + BULLET_BOUNDS_MARGIN
    });
}

/// Consume bullets touching the player
///
/// Returns true if one of them was fatal (player not immune).
pub fn resolve_bullet_contacts(state: &mut GameState) -> bool {
    let player = &state.player;
    let before = state.bullets.len();
    state.bullets.retain(|b| !bullet_hits_player(b, player));
    let hits = before - state.bullets.len();
    if hits > 0 && state.player.is_immune() {
        log::debug!("{} bullet(s) absorbed by immunity", hits);
        return false;
    }
    hits > 0
}

/// Forget turrets that scrolled far below the screen
pub fn cull_turrets(state: &mut GameState) {
    state
        .turrets
        .retain(|t| t.y <= PLAY_HEIGHT + TURRET_CULL_MARGIN);
}
