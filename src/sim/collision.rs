//! Collision detection and response
//!
//! Landing on a platform is a pure function of the player and the platform:
//! `land` returns the new player state plus the side effects the tick should
//! apply. `resolve_platforms` picks the first qualifying platform in
//! insertion order and applies them.

use super::state::{Bullet, GameState, Platform, PlatformKind, Player};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::{spans_overlap, wrap_x};

/// Result of landing on one platform
#[derive(Debug, Clone)]
pub struct Landing {
    /// Player after the platform's effect
    pub player: Player,
    /// Player ended the contact standing on the platform
    pub standing: bool,
    /// Unshielded contact with a kill platform
    pub on_hazard: bool,
    /// Platform breaks (breakables)
    pub breaks_platform: bool,
    /// Screen shake to apply
    pub shake: Option<f32>,
    pub cue: Option<SoundCue>,
}

/// Whether the falling player touches the top of a platform this tick
///
/// The vertical tolerance grows with fall speed so fast falls can't tunnel.
pub fn qualifies(player: &Player, platform: &Platform) -> bool {
    if !platform.is_solid() {
        return false;
    }
    if !spans_overlap(player.pos.x, player.size.x, platform.pos.x, platform.size.x) {
        return false;
    }
    let bottom = player.bottom();
    let tolerance = player.vel.y.max(LANDING_TOLERANCE);
    bottom >= platform.top() && bottom <= platform.top() + platform.size.y + tolerance
}

/// Apply a platform's behavior to the player
pub fn land(player: &Player, platform: &Platform, jump_multiplier: f32) -> Landing {
    let mut next = player.clone();
    let landing = |next: Player| Landing {
        player: next,
        standing: true,
        on_hazard: false,
        breaks_platform: false,
        shake: None,
        cue: None,
    };

    match platform.kind {
        PlatformKind::Spring => {
            next.vel.y = SPRING_FORCE;
            next.grounded = false;
            return Landing {
                standing: false,
                shake: Some(SPRING_SHAKE),
                cue: Some(SoundCue::Spring),
                ..landing(next)
            };
        }
        PlatformKind::Teleport => {
            next.pos.y -= TELEPORT_OFFSET;
            next.vel.y = BASE_JUMP_FORCE * jump_multiplier;
            next.grounded = false;
            return Landing {
                standing: false,
                cue: Some(SoundCue::Teleport),
                ..landing(next)
            };
        }
        _ => {}
    }

    // Everything else stands the player on top
    next.pos.y = platform.top() - next.size.y;
    next.vel.y = 0.0;
    next.grounded = true;

    match platform.kind {
        PlatformKind::Moving => {
            // Carry can push the box across a wall, so wrap again
            next.pos.x = wrap_x(next.pos.x + platform.dx, next.size.x);
            landing(next)
        }
        PlatformKind::Breakable => Landing {
            breaks_platform: true,
            ..landing(next)
        },
        PlatformKind::Speed => {
            next.speed_boost.refresh(SPEED_BOOST_TICKS);
            Landing {
                cue: Some(SoundCue::Powerup),
                ..landing(next)
            }
        }
        PlatformKind::Immunity => {
            next.immunity.refresh(IMMUNITY_TICKS);
            Landing {
                cue: Some(SoundCue::Powerup),
                ..landing(next)
            }
        }
        PlatformKind::Kill => {
            let on_hazard = !next.is_immune();
            Landing {
                on_hazard,
                ..landing(next)
            }
        }
        _ => landing(next),
    }
}

/// Resolve the player against the field
///
/// Returns true if sustained hazard contact killed the player.
pub fn resolve_platforms(state: &mut GameState) -> bool {
    let mut standing = false;
    let mut on_hazard = false;

    if state.player.vel.y >= 0.0 {
        let hit = state
            .platforms
            .iter()
            .position(|p| qualifies(&state.player, p));

        if let Some(idx) = hit {
            let landing = land(
                &state.player,
                &state.platforms[idx],
                state.session.modifiers.jump,
            );
            state.player = landing.player;
            standing = landing.standing;
            on_hazard = landing.on_hazard;
            if landing.breaks_platform {
                state.platforms[idx].break_apart();
            }
            if let Some(shake) = landing.shake {
                state.screen_shake = shake;
            }
            if let Some(cue) = landing.cue {
                state.cue(cue);
            }
        }
    }

    let mut fatal = false;
    if on_hazard && state.player.grounded {
        state.player.hazard_ticks += 1;
        if state.player.hazard_ticks > HAZARD_GRACE_TICKS {
            fatal = true;
        }
    } else {
        state.player.hazard_ticks = 0;
    }

    if !standing {
        state.player.grounded = false;
    }
    fatal
}

/// Circle-vs-box-center test used for bullets
pub fn bullet_hits_player(bullet: &Bullet, player: &Player) -> bool {
    let distance = bullet.pos.distance(player.center());
    distance < bullet.radius + player.size.x / 2.0
}
