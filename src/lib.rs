//! Neon Ascent - A vertically scrolling neon platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, field generation, scoring)
//! - `settings`: Run settings and modifiers handed in by the menus
//! - `level`: Authored level descriptors produced by the level editor
//! - `audio`: Sound cue triggers and the sink trait hosts implement
//! - `clock`: Fixed-rate scheduling driven through an explicit clock

pub mod audio;
pub mod clock;
pub mod level;
pub mod settings;
pub mod sim;

pub use audio::{CueSink, SoundCue};
pub use clock::{Clock, Driver, FixedStep, ManualClock, SystemClock};
pub use level::{CustomLevel, LevelError};
pub use settings::{GameMode, RunModifiers, RunSettings, SettingsError};

/// Game configuration constants
///
/// Units are pixels and ticks; one tick is one frame at 60 Hz.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the scheduler will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play area dimensions
    pub const PLAY_WIDTH: f32 = 400.0;
    pub const PLAY_HEIGHT: f32 = 650.0;

    /// Player box and spawn
    pub const PLAYER_SIZE: f32 = 25.0;
    pub const PLAYER_SPAWN_Y: f32 = PLAY_HEIGHT - 100.0;
    pub const DEFAULT_PLAYER_COLOR: u32 = 0x00ffaa;

    /// Vertical physics
    pub const GRAVITY: f32 = 0.38;
    pub const BASE_JUMP_FORCE: f32 = -12.5;
    pub const SPRING_FORCE: f32 = -21.0;

    /// Horizontal physics
    pub const PLAYER_ACCEL: f32 = 0.8;
    pub const PLAYER_FRICTION: f32 = 0.8;
    pub const MAX_PLAYER_SPEED: f32 = 4.5;
    pub const SPEED_BOOST_ACCEL_MULT: f32 = 2.0;
    pub const SPEED_BOOST_MAX_MULT: f32 = 2.2;

    /// Power-up durations (ticks)
    pub const SPEED_BOOST_TICKS: u32 = 240;
    pub const IMMUNITY_TICKS: u32 = 480;

    /// Kill platforms are survivable for this many consecutive ticks
    pub const HAZARD_GRACE_TICKS: u32 = 50;

    /// Minimum landing tolerance below a platform top
    pub const LANDING_TOLERANCE: f32 = 8.0;
    /// Upward displacement of a teleport pad
    pub const TELEPORT_OFFSET: f32 = 450.0;

    /// Platform field
    pub const PLATFORM_WIDTH: f32 = 85.0;
    pub const PLATFORM_HEIGHT: f32 = 12.0;
    pub const MAX_PLATFORMS: usize = 20;
    pub const VERTICAL_GAP: f32 = 70.0;
    pub const PLATFORM_JITTER: f32 = 260.0;
    pub const MOVING_PLATFORM_SPEED: f32 = 1.5;
    /// Breakable platforms only appear past this altitude (meters)
    pub const BREAKABLE_MIN_ALTITUDE: f64 = 400.0;
    /// Height of the level editor canvas; authored levels start at its bottom
    pub const EDITOR_HEIGHT: f32 = 3000.0;

    /// Hazards
    pub const TURRET_SPAWN_CHANCE: f64 = 0.12;
    pub const TURRET_INITIAL_COOLDOWN_MAX: u32 = 100;
    pub const TURRET_FIRE_COOLDOWN: u32 = 110;
    pub const TURRET_WIDTH: f32 = 15.0;
    pub const TURRET_HEIGHT: f32 = 25.0;
    pub const BULLET_SPEED: f32 = 4.5;
    pub const BULLET_RADIUS: f32 = 6.0;
    pub const BULLET_MUZZLE_INSET: f32 = 10.0;
    pub const BULLET_BOUNDS_MARGIN: f32 = 50.0;
    pub const TURRET_CULL_MARGIN: f32 = 200.0;

    /// Camera: the player is held at this fraction of the screen height
    pub const SCROLL_THRESHOLD: f32 = PLAY_HEIGHT * 0.45;
    /// Meters of score per pixel scrolled
    pub const METERS_PER_PIXEL: f64 = 0.2;

    /// Score thresholds (meters)
    pub const MILESTONE_INTERVAL: f64 = 2500.0;
    pub const STANDARD_COIN_INTERVAL: f64 = 200.0;
    pub const ENDLESS_COIN_INTERVAL: f64 = 1000.0;
    pub const DEFAULT_CHECKPOINT_INTERVAL: f64 = 200.0;
    /// How long the "progress stored" banner stays up (ticks)
    pub const CHECKPOINT_BANNER_TICKS: u32 = 120;

    /// Death sequence
    pub const FALL_DEATH_MARGIN: f32 = 80.0;
    pub const DEATH_DURATION_TICKS: u32 = 90;
    pub const DEATH_SHAKE: f32 = 20.0;
    pub const SPRING_SHAKE: f32 = 5.0;
    pub const VOXEL_SIZE: f32 = 5.0;
}

/// Wrap a horizontal position so the box center stays within `[0, PLAY_WIDTH)`
#[inline]
pub fn wrap_x(x: f32, width: f32) -> f32 {
    let center = (x + width / 2.0).rem_euclid(consts::PLAY_WIDTH);
    center - width / 2.0
}

/// Axis-aligned box overlap on the x axis only
#[inline]
pub fn spans_overlap(a_x: f32, a_w: f32, b_x: f32, b_w: f32) -> bool {
    a_x + a_w > b_x && a_x < b_x + b_w
}
