//! Frame scheduling
//!
//! The host calls `Driver::frame` once per display frame. The driver reads its
//! `Clock`, turns the elapsed time into whole fixed ticks, and runs them.

use std::time::Instant;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, GameState, RenderSnapshot, TickInput, tick};

/// Monotonic time source in seconds
pub trait Clock {
    fn now(&mut self) -> f64;
}

/// Wall clock
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-stepped clock for tests and replays
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, secs: f64) {
        self.now += secs;
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> f64 {
        self.now
    }
}

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f64,
    last_time: Option<f64>,
    running: bool,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedStep {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            last_time: None,
            running: true,
        }
    }

    /// Number of ticks owed at time `now`
    pub fn substeps(&mut self, now: f64) -> u32 {
        if !self.running {
            return 0;
        }
        let step = SIM_DT as f64;
        let dt = match self.last_time {
            Some(last) => (now - last).clamp(0.0, MAX_FRAME_DT as f64),
            None => step,
        };
        self.last_time = Some(now);
        self.accumulator += dt;

        let mut substeps = 0;
        // Epsilon absorbs float drift from summing 1/60ths
        while self.accumulator + 1e-6 >= step && substeps < MAX_SUBSTEPS {
            self.accumulator -= step;
            substeps += 1;
        }
        substeps
    }

    /// Cancel the schedule; nothing partial survives
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
        self.last_time = None;
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Owns the run and advances it in whole ticks
#[derive(Debug)]
pub struct Driver<C: Clock> {
    state: GameState,
    clock: C,
    step: FixedStep,
}

impl<C: Clock> Driver<C> {
    pub fn new(state: GameState, clock: C) -> Self {
        Self {
            state,
            clock,
            step: FixedStep::new(),
        }
    }

    /// Run the ticks owed since the last frame
    ///
    /// The jump edge is consumed by the first substep. Returns ticks run.
    pub fn frame(&mut self, input: &TickInput) -> u32 {
        let now = self.clock.now();
        let substeps = self.step.substeps(now);
        let mut input = input.clone();
        for _ in 0..substeps {
            tick(&mut self.state, &input);
            // Clear one-shot inputs after processing
            input.jump = false;
        }
        substeps
    }

    /// Pause: tear down the schedule
    pub fn stop(&mut self) {
        if self.step.is_running() {
            log::info!("Driver stopped at tick {}", self.state.time_ticks);
        }
        self.step.stop();
    }

    /// Resume after `stop`
    pub fn start(&mut self) {
        if !self.step.is_running() {
            log::info!("Driver resumed at tick {}", self.state.time_ticks);
        }
        self.step.start();
    }

    pub fn is_running(&self) -> bool {
        self.step.is_running()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn into_state(self) -> GameState {
        self.state
    }
}
