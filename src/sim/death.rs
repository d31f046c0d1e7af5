//! Death and respawn
//!
//! `Alive -> Dying -> Alive | GameOver`. While dying the world is frozen and
//! only the voxel burst keeps animating.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, Particle, RunPhase};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::settings::GameMode;

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Fell below the screen
    Fell,
    /// Stood on a kill platform too long
    Hazard,
    /// Hit by a turret bullet
    Shot,
}

/// Enter the dying phase (no-op unless alive)
pub fn trigger_death(state: &mut GameState, cause: DeathCause) {
    if state.phase != RunPhase::Alive {
        return;
    }
    log::info!("Player died ({:?}) at {:.0}m", cause, state.score);
    state.phase = RunPhase::Dying {
        ticks_left: DEATH_DURATION_TICKS,
    };
    state.screen_shake = DEATH_SHAKE;
    state.cue(SoundCue::Death);
    spawn_voxel_burst(state);
}

/// Break the player box into a grid of tumbling voxels
fn spawn_voxel_burst(state: &mut GameState) {
    let origin = state.player.pos;
    let size = state.player.size;
    let color = state.player.color;
    let rng = &mut state.fx_rng;

    let mut i = 0.0;
    while i < size.x {
        let mut j = 0.0;
        while j < size.y {
            state.particles.push(Particle {
                pos: origin + Vec2::new(i, j),
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 12.0,
                    (rng.random::<f32>() - 0.5) * 12.0 - 5.0,
                ),
                angle: rng.random::<f32>() * std::f32::consts::TAU,
                spin: (rng.random::<f32>() - 0.5) * 0.4,
                life: 1.0,
                size: VOXEL_SIZE,
                color,
            });
            j += VOXEL_SIZE;
        }
        i += VOXEL_SIZE;
    }
}

/// Tumble and fade particles
pub fn update_particles(state: &mut GameState) {
    for p in state.particles.iter_mut() {
        p.pos += p.vel;
        p.angle += p.spin;
        p.vel.y += 0.25;
        p.vel.x *= 0.99;
        p.life -= 0.012;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Count down the death animation and decide what comes next
pub fn update_dying(state: &mut GameState) {
    let RunPhase::Dying { ticks_left } = state.phase else {
        return;
    };
    if ticks_left > 1 {
        state.phase = RunPhase::Dying {
            ticks_left: ticks_left - 1,
        };
        return;
    }

    if state.session.mode == GameMode::EndlessProgress {
        log::info!("Respawning at checkpoint {}m", state.session.checkpoint);
        state.begin_life();
    } else if state.session.lives.can_respawn() {
        state.session.lives.consume();
        log::info!("Life lost, {:?} remaining", state.session.lives);
        state.emit(GameEvent::LifeLost);
        state.begin_life();
    } else {
        let score = state.score.floor() as u64;
        log::info!("Game over with {}m", score);
        state.phase = RunPhase::GameOver;
        state.emit(GameEvent::GameOver { score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RunSettings;
    use crate::sim::state::Lives;

    fn run_out_death(state: &mut GameState) {
        for _ in 0..DEATH_DURATION_TICKS {
            update_dying(state);
        }
    }

    #[test]
    fn test_trigger_spawns_grid_burst() {
        let mut state = GameState::new(&RunSettings::default());
        trigger_death(&mut state, DeathCause::Fell);
        assert!(state.is_dying());
        // 25px box in 5px voxels
        assert_eq!(state.particles.len(), 25);
        assert_eq!(state.screen_shake, DEATH_SHAKE);
        assert!(state.events.contains(&GameEvent::Sound(SoundCue::Death)));
    }

    #[test]
    fn test_retrigger_while_dying_is_noop() {
        let mut state = GameState::new(&RunSettings::default());
        trigger_death(&mut state, DeathCause::Shot);
        update_dying(&mut state);
        let phase = state.phase;
        let particles = state.particles.len();
        trigger_death(&mut state, DeathCause::Hazard);
        assert_eq!(state.phase, phase);
        assert_eq!(state.particles.len(), particles);
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut state = GameState::new(&RunSettings::default());
        state.score = 321.7;
        state.drain_events();
        trigger_death(&mut state, DeathCause::Fell);
        run_out_death(&mut state);
        assert!(state.is_over());
        assert!(state.events.contains(&GameEvent::GameOver { score: 321 }));
        assert!(!state.events.contains(&GameEvent::LifeLost));
    }

    #[test]
    fn test_spare_life_respawns_at_zero() {
        let mut settings = RunSettings::default();
        settings.starting_lives = 3;
        let mut state = GameState::new(&settings);
        state.score = 900.0;
        state.platforms.clear();
        trigger_death(&mut state, DeathCause::Fell);
        state.drain_events();
        run_out_death(&mut state);

        assert_eq!(state.phase, RunPhase::Alive);
        assert_eq!(state.session.lives, Lives::Limited(2));
        assert_eq!(state.score, 0.0);
        assert_eq!(state.platforms.len(), MAX_PLATFORMS);
        assert_eq!(state.events, vec![GameEvent::LifeLost]);
    }

    #[test]
    fn test_endless_respawns_at_checkpoint() {
        let mut settings = RunSettings::for_mode(GameMode::EndlessProgress);
        settings.resume_checkpoint = 400.0;
        let mut state = GameState::new(&settings);
        state.session.checkpoint = 1200.0;
        state.score = 1333.0;
        trigger_death(&mut state, DeathCause::Shot);
        state.drain_events();
        run_out_death(&mut state);

        assert_eq!(state.phase, RunPhase::Alive);
        assert_eq!(state.score, 1200.0);
        assert_eq!(state.session.lives, Lives::Unlimited);
        assert!(state.events.is_empty());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_particles_fade_out() {
        let mut state = GameState::new(&RunSettings::default());
        trigger_death(&mut state, DeathCause::Fell);
        for _ in 0..100 {
            update_particles(&mut state);
        }
        assert!(state.particles.is_empty());
    }
}
