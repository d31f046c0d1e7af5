//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::death::{self, DeathCause};
use super::state::GameState;
use super::{collision, field, hazards, player, scoring, scroll};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held (wins over right)
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Jump pressed this frame (edge, honored only while grounded)
    pub jump: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Don't tick once the run is over
    if state.is_over() {
        return;
    }

    state.time_ticks += 1;

    // Decay screen shake
    if state.screen_shake > 0.0 {
        state.screen_shake *= 0.9;
        if state.screen_shake < 0.01 {
            state.screen_shake = 0.0;
        }
    }
    state.checkpoint_banner_ticks = state.checkpoint_banner_ticks.saturating_sub(1);

    // Particles animate in every phase
    death::update_particles(state);

    if state.is_dying() {
        death::update_dying(state);
        return;
    }

    // Hazards and field move on their own
    hazards::update_turrets(state);
    hazards::update_bullets(state);
    field::update_moving(state);

    player::integrate(state, input);

    let hazard_fatal = collision::resolve_platforms(state);
    let shot = hazards::resolve_bullet_contacts(state);

    let gained = scroll::follow_player(state);
    field::recycle(state);
    hazards::cull_turrets(state);

    scoring::add_score(state, gained);
    scoring::evaluate(state);

    if shot {
        death::trigger_death(state, DeathCause::Shot);
    } else if hazard_fatal {
        death::trigger_death(state, DeathCause::Hazard);
    } else if state.player.pos.y > PLAY_HEIGHT + FALL_DEATH_MARGIN {
        death::trigger_death(state, DeathCause::Fell);
    }

    if state.platforms.is_empty() {
        log::error!("Platform field emptied at tick {}", state.time_ticks);
        debug_assert!(false, "platform field must never be empty");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundCue;
    use crate::level::CustomLevel;
    use crate::settings::{GameMode, RunSettings};
    use crate::sim::state::{GameEvent, Platform, PlatformKind, RunPhase};
    use glam::Vec2;

    /// A quiet world: one platform, the player standing on it, no turrets
    fn standing_on(kind: PlatformKind) -> GameState {
        let mut state = GameState::new(&RunSettings::default());
        state.turrets.clear();
        state.bullets.clear();
        state.platforms = vec![Platform::new(900, Vec2::new(150.0, 500.0), kind, 0.0)];
        state.player.pos = Vec2::new(160.0, 500.0 - state.player.size.y);
        state.player.vel = Vec2::ZERO;
        state.player.grounded = true;
        state.drain_events();
        state
    }

    #[test]
    fn test_grounded_implies_zero_vy() {
        let mut state = GameState::new(&RunSettings::default());
        state.turrets.clear();
        let inputs = [
            TickInput::default(),
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                ..Default::default()
            },
        ];
        for i in 0..600 {
            tick(&mut state, &inputs[i % inputs.len()]);
            if state.phase == RunPhase::Alive && state.player.grounded {
                assert_eq!(state.player.vel.y, 0.0);
            }
        }
    }

    #[test]
    fn test_player_lands_on_start_platform() {
        let mut state = GameState::new(&RunSettings::default());
        state.turrets.clear();
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.player.grounded);
        assert_eq!(state.player.bottom(), PLAY_HEIGHT - 50.0);
    }

    #[test]
    fn test_spring_scenario() {
        let mut state = standing_on(PlatformKind::Spring);
        let y = state.player.pos.y;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.vel.y, SPRING_FORCE);
        assert!(!state.player.grounded);
        assert_eq!(state.player.pos.y, y);
        assert!(state.drain_events().contains(&GameEvent::Sound(SoundCue::Spring)));
    }

    #[test]
    fn test_moving_platform_carry_keeps_player_wrapped() {
        let mut state = standing_on(PlatformKind::Normal);
        state.platforms = vec![Platform::new(
            900,
            Vec2::new(2.0, 500.0),
            PlatformKind::Moving,
            -MOVING_PLATFORM_SPEED,
        )];
        state.player.pos.x = -12.0;

        tick(&mut state, &TickInput::default());

        let center = state.player.center().x;
        assert!(state.player.grounded);
        assert!((0.0..PLAY_WIDTH).contains(&center), "center {center}");
    }

    #[test]
    fn test_teleport_lifts_player_and_scrolls() {
        let mut state = standing_on(PlatformKind::Teleport);
        tick(&mut state, &TickInput::default());

        // 475 - 450 = 25 is above the threshold, so the world scrolls
        assert_eq!(state.player.pos.y, SCROLL_THRESHOLD);
        assert_eq!(state.player.vel.y, BASE_JUMP_FORCE);
        assert!(!state.player.grounded);
        let expected = (SCROLL_THRESHOLD - 25.0) as f64 * METERS_PER_PIXEL;
        assert!((state.score - expected).abs() < 1e-4);
        assert!(state.drain_events().contains(&GameEvent::Sound(SoundCue::Teleport)));
    }

    #[test]
    fn test_kill_platform_grace_window() {
        let mut state = standing_on(PlatformKind::Kill);
        for _ in 0..HAZARD_GRACE_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, RunPhase::Alive);
        assert_eq!(state.player.hazard_ticks, HAZARD_GRACE_TICKS);

        tick(&mut state, &TickInput::default());
        assert!(state.is_dying());
    }

    #[test]
    fn test_jump_resets_hazard_counter() {
        let mut state = standing_on(PlatformKind::Kill);
        for _ in 0..40 {
            tick(&mut state, &TickInput::default());
        }
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        assert_eq!(state.player.hazard_ticks, 0);
        assert!(state.drain_events().contains(&GameEvent::Sound(SoundCue::Jump)));
    }

    #[test]
    fn test_immune_player_survives_kill_platform_and_bullets() {
        let mut state = standing_on(PlatformKind::Kill);
        for i in 0..1000u32 {
            // Keep topping up immunity as a pad chain would
            state.player.immunity.refresh(IMMUNITY_TICKS);
            if i % 50 == 0 {
                let center = state.player.center();
                state.bullets.push(crate::sim::state::Bullet {
                    id: 10_000 + i,
                    pos: center,
                    vx: 0.0,
                    radius: BULLET_RADIUS,
                });
            }
            tick(&mut state, &TickInput::default());
            assert_eq!(state.phase, RunPhase::Alive);
            assert!(state.bullets.is_empty());
        }
        assert_eq!(state.player.hazard_ticks, 0);
    }

    #[test]
    fn test_unshielded_bullet_kills() {
        let mut state = standing_on(PlatformKind::Normal);
        let center = state.player.center();
        state.bullets.push(crate::sim::state::Bullet {
            id: 777,
            pos: center,
            vx: 0.0,
            radius: BULLET_RADIUS,
        });
        tick(&mut state, &TickInput::default());
        assert!(state.is_dying());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_falling_off_screen_kills() {
        let mut state = GameState::new(&RunSettings::default());
        state.turrets.clear();
        state.platforms = vec![Platform::new(
            900,
            Vec2::new(0.0, -500.0),
            PlatformKind::Normal,
            0.0,
        )];
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
            if state.is_dying() {
                break;
            }
        }
        assert!(state.is_dying());
    }

    #[test]
    fn test_dying_freezes_world() {
        let mut state = standing_on(PlatformKind::Normal);
        death::trigger_death(&mut state, DeathCause::Fell);
        let player_pos = state.player.pos;
        let platforms = state.platforms.clone();
        let input = TickInput {
            right: true,
            jump: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input);
        }
        assert_eq!(state.player.pos, player_pos);
        assert_eq!(state.platforms, platforms);
    }

    #[test]
    fn test_checkpoint_respawn_restores_score() {
        let mut settings = RunSettings::for_mode(GameMode::EndlessProgress);
        settings.resume_checkpoint = 1000.0;
        settings.checkpoint_interval = 200.0;
        let mut state = GameState::new(&settings);

        // Climb through one checkpoint
        scoring::add_score(&mut state, 250.0);
        scoring::evaluate(&mut state);
        assert_eq!(state.session.checkpoint, 1200.0);

        death::trigger_death(&mut state, DeathCause::Fell);
        for _ in 0..DEATH_DURATION_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, RunPhase::Alive);
        assert_eq!(state.score, 1200.0);
    }

    #[test]
    fn test_game_over_stops_ticking() {
        let mut state = GameState::new(&RunSettings::default());
        death::trigger_death(&mut state, DeathCause::Fell);
        for _ in 0..DEATH_DURATION_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.is_over());
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_custom_level_round_trip_without_recycling() {
        let json = r#"{ "name": "TOWER", "platforms": [
            { "x": 160, "y": 2950, "width": 85, "height": 12, "type": "normal" },
            { "x": 160, "y": 2880, "width": 85, "height": 12, "type": "normal" },
            { "x": 160, "y": 2810, "width": 85, "height": 12, "type": "normal" }
        ] }"#;
        let level = CustomLevel::from_json(json).expect("valid level");
        let mut state =
            GameState::with_level(&RunSettings::default(), level).expect("accepted");
        let ids: Vec<u32> = state.platforms.iter().map(|p| p.id).collect();

        // One life: while it lasts the field is only ever shifted, never replaced
        for i in 0..400 {
            let input = TickInput {
                jump: i % 20 == 0,
                ..Default::default()
            };
            tick(&mut state, &input);
            if state.phase == RunPhase::Alive {
                let now: Vec<u32> = state.platforms.iter().map(|p| p.id).collect();
                assert_eq!(now, ids);
            }
        }
        assert_eq!(state.session.mode, GameMode::Custom);
    }

    #[test]
    fn test_custom_respawn_reloads_authored_level() {
        let json = r#"{ "name": "RELOAD", "platforms": [
            { "x": 160, "y": 2950, "width": 85, "height": 12, "type": "normal" },
            { "x": 40, "y": 2880, "width": 60, "height": 12, "type": "breakable" }
        ] }"#;
        let level = CustomLevel::from_json(json).expect("valid level");
        let mut settings = RunSettings::default();
        settings.starting_lives = 2;
        let mut state = GameState::with_level(&settings, level.clone()).expect("accepted");

        // Scroll and break the field, then die
        for p in state.platforms.iter_mut() {
            p.pos.y += 123.0;
            p.break_apart();
        }
        death::trigger_death(&mut state, DeathCause::Fell);
        for _ in 0..DEATH_DURATION_TICKS {
            tick(&mut state, &TickInput::default());
        }

        assert_eq!(state.phase, RunPhase::Alive);
        assert_eq!(state.session.mode, GameMode::Custom);
        assert_eq!(state.session.lives, crate::sim::state::Lives::Limited(1));
        assert!(state.drain_events().contains(&GameEvent::LifeLost));
        assert_eq!(state.platforms.len(), level.platforms.len());
        let shift = PLAY_HEIGHT - EDITOR_HEIGHT;
        for (placed, authored) in state.platforms.iter().zip(&level.platforms) {
            assert_eq!(placed.pos.x, authored.x);
            assert_eq!(placed.pos.y, authored.y + shift);
            assert_eq!(placed.size.x, authored.width);
            assert!(!placed.broken);
        }
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut settings = RunSettings::default();
        settings.seed = 99999;
        settings.starting_lives = 3;
        let mut state1 = GameState::new(&settings);
        let mut state2 = GameState::new(&settings);

        for i in 0..2000 {
            let input = TickInput {
                left: (i / 90) % 3 == 0,
                right: (i / 90) % 3 == 1,
                jump: i % 7 == 0,
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.platforms, state2.platforms);
        assert_eq!(state1.events, state2.events);
    }
}
