//! Sound cue triggers
//!
//! The simulation never plays audio. It queues `SoundCue`s alongside its other
//! events and the host forwards them to whatever backend it has through a
//! `CueSink`. Sinks are fire-and-forget: nothing they do can reach the tick.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player left the ground
    Jump,
    /// Spring pad launch
    Spring,
    /// Teleport pad displacement
    Teleport,
    /// Speed/immunity pickup or checkpoint stored
    Powerup,
    /// Coin earned
    Coin,
    /// Player destroyed
    Death,
}

impl SoundCue {
    /// Tone recipe for synth backends: (start Hz, end Hz, seconds)
    pub fn tone(&self) -> (f32, Option<f32>, f32) {
        match self {
            SoundCue::Jump => (300.0, Some(600.0), 0.12),
            SoundCue::Spring => (200.0, Some(1200.0), 0.25),
            SoundCue::Teleport => (1200.0, Some(200.0), 0.3),
            SoundCue::Powerup => (440.0, Some(880.0), 0.2),
            SoundCue::Coin => (987.0, Some(1318.0), 0.1),
            SoundCue::Death => (150.0, Some(40.0), 0.5),
        }
    }
}

/// Receiver for sound cues
pub trait CueSink {
    /// Play a cue at the given gain (0.0 - 1.0)
    fn play(&mut self, cue: SoundCue, gain: f32);
}

/// Volume/mute front end in front of any sink
#[derive(Debug)]
pub struct AudioMixer<S: CueSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: CueSink> AudioMixer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Forward a cue to the sink unless silenced
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(cue, vol);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Sink that writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: u64,
}

impl CueSink for LogSink {
    fn play(&mut self, cue: SoundCue, gain: f32) {
        self.played += 1;
        let (freq, _, secs) = cue.tone();
        log::trace!("cue {:?} at {:.2} gain ({} Hz, {}s)", cue, gain, freq, secs);
    }
}
