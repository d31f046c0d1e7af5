//! Platform field
//!
//! Seeds, generates and recycles platforms for the endless modes, or lays out
//! an authored level for custom mode.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Platform, PlatformKind, Turret, TurretSide};
use crate::consts::*;

/// Lay out the field for a fresh life
pub fn populate(state: &mut GameState) {
    if let Some(level) = state.session.level.clone() {
        load_level(state, &level);
    } else {
        seed_field(state);
    }
    if state.platforms.is_empty() {
        log::error!("Platform field empty after populate");
        debug_assert!(false, "platform field must never be empty");
    }
}

/// Safe start platform plus a column of generated platforms above it
fn seed_field(state: &mut GameState) {
    let start_x = PLAY_WIDTH / 2.0 - PLATFORM_WIDTH / 2.0;
    let mut last_y = PLAY_HEIGHT - 50.0;
    let id = state.next_entity_id();
    state.platforms.push(Platform::new(
        id,
        Vec2::new(start_x, last_y),
        PlatformKind::Normal,
        0.0,
    ));

    let mut last_x = start_x;
    for _ in 1..MAX_PLATFORMS {
        last_y -= VERTICAL_GAP;
        let platform = generate_platform(state, last_y, last_x);
        last_x = platform.pos.x;
        state.platforms.push(platform);
    }
}

/// Copy an authored level into the field, shifted so its bottom is on screen
pub fn load_level(state: &mut GameState, level: &crate::level::CustomLevel) {
    let y_offset = PLAY_HEIGHT - EDITOR_HEIGHT;
    for p in &level.platforms {
        let id = state.next_entity_id();
        state.platforms.push(Platform {
            id,
            pos: Vec2::new(p.x, p.y + y_offset),
            size: Vec2::new(p.width, p.height),
            kind: p.kind,
            dx: p.dx,
            broken: false,
        });
    }
    for t in &level.turrets {
        let id = state.next_entity_id();
        state.turrets.push(Turret {
            id,
            y: t.y + y_offset,
            side: t.side,
            cooldown: t.fire_cooldown,
        });
    }
    log::info!(
        "Loaded level '{}' ({} platforms, {} turrets)",
        level.name,
        level.platforms.len(),
        level.turrets.len()
    );
}

/// Draw a behavior tag from the fixed weighted distribution
pub fn roll_kind(roll: f64, altitude: f64) -> PlatformKind {
    if roll > 0.94 {
        PlatformKind::Kill
    } else if roll > 0.90 {
        PlatformKind::Teleport
    } else if roll > 0.86 {
        PlatformKind::Speed
    } else if roll > 0.82 {
        PlatformKind::Immunity
    } else if roll > 0.70 {
        PlatformKind::Moving
    } else if roll > 0.60 {
        PlatformKind::Spring
    } else if roll > 0.50 && altitude >= BREAKABLE_MIN_ALTITUDE {
        PlatformKind::Breakable
    } else {
        PlatformKind::Normal
    }
}

/// Generate one platform at `y`, jittered around `anchor_x`
///
/// May also spawn a turret near the same altitude.
pub fn generate_platform(state: &mut GameState, y: f32, anchor_x: f32) -> Platform {
    let kind = roll_kind(state.rng.random::<f64>(), state.score);

    let dx = if kind == PlatformKind::Moving {
        if state.rng.random_bool(0.5) {
            MOVING_PLATFORM_SPEED
        } else {
            -MOVING_PLATFORM_SPEED
        }
    } else {
        0.0
    };

    let jitter = (state.rng.random::<f32>() - 0.5) * PLATFORM_JITTER;
    let x = (anchor_x + jitter).clamp(0.0, PLAY_WIDTH - PLATFORM_WIDTH);

    if state.rng.random_bool(TURRET_SPAWN_CHANCE) {
        let side = if state.rng.random_bool(0.5) {
            TurretSide::Left
        } else {
            TurretSide::Right
        };
        let cooldown = state.rng.random_range(0..TURRET_INITIAL_COOLDOWN_MAX);
        let id = state.next_entity_id();
        log::debug!("Turret {} spawned on {:?} wall at y={}", id, side, y - 20.0);
        state.turrets.push(Turret {
            id,
            y: y - 20.0,
            side,
            cooldown,
        });
    }

    let id = state.next_entity_id();
    Platform::new(id, Vec2::new(x, y), kind, dx)
}

/// Drift moving platforms, bouncing off both walls
pub fn update_moving(state: &mut GameState) {
    for p in state.platforms.iter_mut().filter(|p| p.kind == PlatformKind::Moving) {
        p.pos.x += p.dx;
        if p.pos.x < 0.0 || p.pos.x + p.size.x > PLAY_WIDTH {
            p.dx = -p.dx;
        }
    }
}

/// Replace platforms that scrolled below the screen (endless modes only)
///
/// Each replacement goes into the slot of the platform it replaces and sits
/// one gap above whatever is highest at that moment, so successive
/// replacements stack upward.
pub fn recycle(state: &mut GameState) {
    if !state.session.mode.is_endless() {
        return;
    }
    let expired: Vec<usize> = state
        .platforms
        .iter()
        .enumerate()
        .filter(|(_, p)| p.pos.y > PLAY_HEIGHT)
        .map(|(i, _)| i)
        .collect();

    for idx in expired {
        let (top_y, anchor_x) = state
            .highest_platform()
            .map(|p| (p.pos.y, p.pos.x))
            .unwrap_or((PLAY_HEIGHT, PLAY_WIDTH / 2.0));
        let replacement = generate_platform(state, top_y - VERTICAL_GAP, anchor_x);
        log::debug!(
            "Recycled platform {} -> {} ({:?}) at y={}",
            state.platforms[idx].id,
            replacement.id,
            replacement.kind,
            replacement.pos.y
        );
        state.platforms[idx] = replacement;
    }
}
