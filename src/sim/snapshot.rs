//! Render snapshot
//!
//! A flat, serializable view of everything a renderer paints. Built from
//! `&GameState` after the frame's ticks; renderers never touch the state.

use serde::Serialize;

use super::state::{GameState, PlatformKind, RunPhase, TurretSide};
use crate::consts::CHECKPOINT_BANNER_TICKS;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: u32,
    pub immune: bool,
    pub speed_boost: bool,
    /// False while the death burst plays
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformKind,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurretView {
    pub x: f32,
    pub y: f32,
    pub side: TurretSide,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub angle: f32,
    pub alpha: f32,
    pub color: u32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot {
    pub player: PlayerView,
    pub platforms: Vec<PlatformView>,
    pub turrets: Vec<TurretView>,
    pub bullets: Vec<BulletView>,
    pub particles: Vec<ParticleView>,
    /// Whole meters
    pub score: u64,
    /// `None` when lives are unlimited
    pub lives: Option<u32>,
    pub screen_shake: f32,
    /// Banner opacity (0 = hidden)
    pub checkpoint_banner: f32,
    pub game_over: bool,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        let lives = match state.session.lives {
            super::state::Lives::Limited(n) => Some(n),
            super::state::Lives::Unlimited => None,
        };

        Self {
            player: PlayerView {
                x: player.pos.x,
                y: player.pos.y,
                size: player.size.x,
                color: player.color,
                immune: player.is_immune(),
                speed_boost: player.has_speed_boost(),
                visible: state.phase == RunPhase::Alive,
            },
            platforms: state
                .platforms
                .iter()
                .filter(|p| p.is_solid())
                .map(|p| PlatformView {
                    x: p.pos.x,
                    y: p.pos.y,
                    width: p.size.x,
                    height: p.size.y,
                    kind: p.kind,
                    color: p.kind.color(),
                })
                .collect(),
            turrets: state
                .turrets
                .iter()
                .map(|t| TurretView {
                    x: t.x(),
                    y: t.y,
                    side: t.side,
                })
                .collect(),
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletView {
                    x: b.pos.x,
                    y: b.pos.y,
                    radius: b.radius,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    x: p.pos.x,
                    y: p.pos.y,
                    size: p.size,
                    angle: p.angle,
                    alpha: p.life.clamp(0.0, 1.0),
                    color: p.color,
                })
                .collect(),
            score: state.score.max(0.0).floor() as u64,
            lives,
            screen_shake: state.screen_shake,
            checkpoint_banner: state.checkpoint_banner_ticks as f32
                / CHECKPOINT_BANNER_TICKS as f32,
            game_over: state.is_over(),
        }
    }
}
