//! Altitude thresholds: milestones, coins and checkpoints
//!
//! Every tracker buckets the score by floor division and remembers the last
//! bucket it reported, so a large per-tick delta can neither skip a bucket
//! nor report one twice.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, Session};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::settings::GameMode;

/// Fixed-interval threshold tracker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub interval: f64,
    /// Last bucket already reported
    pub last_bucket: u64,
}

impl Threshold {
    /// Create a tracker that treats everything up to `altitude` as reported
    pub fn seeded(interval: f64, altitude: f64) -> Self {
        let interval = interval.max(1.0);
        Self {
            interval,
            last_bucket: bucket(altitude, interval),
        }
    }

    /// Buckets newly crossed by reaching `score`
    pub fn advance(&mut self, score: f64) -> std::ops::RangeInclusive<u64> {
        let current = bucket(score, self.interval);
        let first = self.last_bucket + 1;
        if current > self.last_bucket {
            self.last_bucket = current;
        }
        first..=current
    }

    /// Altitude of a bucket boundary
    pub fn altitude(&self, bucket: u64) -> f64 {
        bucket as f64 * self.interval
    }
}

fn bucket(score: f64, interval: f64) -> u64 {
    if score <= 0.0 {
        0
    } else {
        (score / interval).floor() as u64
    }
}

/// All trackers for the current life
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTrackers {
    pub milestone: Threshold,
    pub coin: Option<Threshold>,
    pub checkpoint: Option<Threshold>,
}

impl ScoreTrackers {
    /// Seed every tracker at the life's starting altitude
    pub fn new(session: &Session, start: f64) -> Self {
        let checkpoint = match session.mode {
            GameMode::EndlessProgress => {
                Some(Threshold::seeded(session.checkpoint_interval, start))
            }
            _ => None,
        };
        Self {
            milestone: Threshold::seeded(MILESTONE_INTERVAL, start),
            coin: session
                .mode
                .coin_interval()
                .map(|interval| Threshold::seeded(interval, start)),
            checkpoint,
        }
    }
}

/// Add this tick's climb to the score
pub fn add_score(state: &mut GameState, delta: f64) {
    if delta > 0.0 {
        state.score += delta;
    }
}

/// Fire notifications for every threshold the score crossed this tick
pub fn evaluate(state: &mut GameState) {
    let score = state.score;

    let milestone = &mut state.trackers.milestone;
    let crossed: Vec<f64> = milestone.advance(score).map(|b| milestone.altitude(b)).collect();
    for altitude in crossed {
        log::info!("Milestone reached: {}m", altitude);
        state.emit(GameEvent::Milestone { altitude });
    }

    if let Some(coin) = state.trackers.coin.as_mut() {
        let coins = coin.advance(score).count();
        let value = state.session.modifiers.coin_value();
        for _ in 0..coins {
            state.emit(GameEvent::CoinEarned { value });
            state.cue(SoundCue::Coin);
        }
    }

    if let Some(checkpoint) = state.trackers.checkpoint.as_mut() {
        let newest = checkpoint.advance(score).last().map(|b| checkpoint.altitude(b));
        if let Some(altitude) = newest {
            log::info!("Checkpoint stored at {}m", altitude);
            state.session.checkpoint = altitude;
            state.checkpoint_banner_ticks = CHECKPOINT_BANNER_TICKS;
            state.cue(SoundCue::Powerup);
            state.emit(GameEvent::CheckpointReached { altitude });
        }
    }
}
