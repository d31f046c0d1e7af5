//! Game state and core simulation types
//!
//! All state that a tick reads or writes lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::scoring::ScoreTrackers;
use crate::audio::SoundCue;
use crate::consts::*;
use crate::level::CustomLevel;
use crate::settings::{GameMode, RunModifiers, RunSettings};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Active gameplay
    Alive,
    /// Death animation playing; physics suspended
    Dying { ticks_left: u32 },
    /// Run ended, final score reported
    GameOver,
}

/// Platform behavior tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    #[default]
    Normal,
    Moving,
    Breakable,
    Spring,
    Teleport,
    Speed,
    Immunity,
    Kill,
}

impl PlatformKind {
    /// Display color (0xRRGGBB) for renderers
    pub fn color(&self) -> u32 {
        match self {
            PlatformKind::Normal => 0x00ffff,
            PlatformKind::Moving => 0xff00ff,
            PlatformKind::Breakable => 0x555555,
            PlatformKind::Spring => 0xffff00,
            PlatformKind::Teleport => 0xbf00ff,
            PlatformKind::Speed => 0x00ff44,
            PlatformKind::Immunity => 0xffffff,
            PlatformKind::Kill => 0xff4444,
        }
    }
}

/// A timed power-up on the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buff {
    pub active: bool,
    pub remaining: u32,
}

impl Buff {
    /// Activate (or top up) for a fixed duration
    pub fn refresh(&mut self, ticks: u32) {
        self.active = true;
        self.remaining = ticks;
    }

    /// Count down one tick; deactivates the tick after the timer hits zero
    pub fn tick(&mut self) {
        if self.remaining > 0 {
            self.remaining -= 1;
        } else {
            self.active = false;
        }
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    pub immunity: Buff,
    pub speed_boost: Buff,
    /// Consecutive ticks standing on a kill platform without immunity
    pub hazard_ticks: u32,
    pub color: u32,
}

impl Player {
    pub fn new(color: u32) -> Self {
        Self {
            pos: Vec2::new(PLAY_WIDTH / 2.0 - PLAYER_SIZE / 2.0, PLAYER_SPAWN_Y),
            vel: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            grounded: false,
            immunity: Buff::default(),
            speed_boost: Buff::default(),
            hazard_ticks: 0,
            color,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn is_immune(&self) -> bool {
        self.immunity.active
    }

    pub fn has_speed_boost(&self) -> bool {
        self.speed_boost.active
    }
}

/// A platform entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PlatformKind,
    /// Horizontal drift per tick (moving platforms)
    pub dx: f32,
    /// Breakable platforms break once stood on
    pub broken: bool,
}

impl Platform {
    pub fn new(id: u32, pos: Vec2, kind: PlatformKind, dx: f32) -> Self {
        Self {
            id,
            pos,
            size: Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
            kind,
            dx,
            broken: false,
        }
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// Whether the platform still collides and paints
    pub fn is_solid(&self) -> bool {
        !self.broken
    }

    /// Mark broken (one-shot, never reverts)
    pub fn break_apart(&mut self) {
        self.broken = true;
    }
}

/// Which wall a turret hangs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurretSide {
    Left,
    Right,
}

/// A wall turret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turret {
    pub id: u32,
    pub y: f32,
    pub side: TurretSide,
    /// Ticks until next shot
    pub cooldown: u32,
}

impl Turret {
    /// Left edge of the turret body
    pub fn x(&self) -> f32 {
        match self.side {
            TurretSide::Left => 0.0,
            TurretSide::Right => PLAY_WIDTH - TURRET_WIDTH,
        }
    }

    /// Bullet spawn point and velocity, aimed at the opposite wall
    pub fn muzzle(&self) -> (Vec2, f32) {
        let y = self.y + BULLET_MUZZLE_INSET;
        match self.side {
            TurretSide::Left => (Vec2::new(BULLET_MUZZLE_INSET, y), BULLET_SPEED),
            TurretSide::Right => (Vec2::new(PLAY_WIDTH - BULLET_MUZZLE_INSET, y), -BULLET_SPEED),
        }
    }
}

/// A turret projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    pub vx: f32,
    pub radius: f32,
}

/// A voxel from the death burst (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,
    pub spin: f32,
    pub life: f32, // 1 -> 0
    pub size: f32,
    pub color: u32,
}

/// Remaining lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lives {
    Limited(u32),
    Unlimited,
}

impl Lives {
    /// True if losing the current life still leaves one to play
    pub fn can_respawn(&self) -> bool {
        match self {
            Lives::Limited(n) => *n > 1,
            Lives::Unlimited => true,
        }
    }

    pub fn consume(&mut self) {
        if let Lives::Limited(n) = self {
            *n = n.saturating_sub(1);
        }
    }
}

/// Per-run context that survives respawns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub mode: GameMode,
    pub modifiers: RunModifiers,
    pub lives: Lives,
    /// Last stored checkpoint (endless mode respawn altitude)
    pub checkpoint: f64,
    pub checkpoint_interval: f64,
    pub player_color: u32,
    /// Authored level (custom mode)
    pub level: Option<CustomLevel>,
}

impl Session {
    pub fn new(settings: &RunSettings, level: Option<CustomLevel>) -> Self {
        let lives = match settings.mode {
            GameMode::EndlessProgress => Lives::Unlimited,
            _ => Lives::Limited(settings.starting_lives),
        };
        Self {
            mode: settings.mode,
            modifiers: settings.modifiers,
            lives,
            checkpoint: settings.starting_altitude(),
            checkpoint_interval: settings.checkpoint_interval,
            player_color: settings.player_color,
            level,
        }
    }

    /// Altitude each life starts at
    pub fn respawn_altitude(&self) -> f64 {
        match self.mode {
            GameMode::EndlessProgress => self.checkpoint,
            _ => 0.0,
        }
    }
}

/// Notifications for the host, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A life was consumed and the run restarts at zero
    LifeLost,
    /// Currency earned
    CoinEarned { value: u32 },
    /// Milestone altitude crossed (commentary trigger)
    Milestone { altitude: f64 },
    /// New checkpoint stored (persist it)
    CheckpointReached { altitude: f64 },
    /// Run over
    GameOver { score: u64 },
    /// Fire-and-forget sound trigger
    Sound(SoundCue),
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (field generation, turrets)
    pub rng: Pcg32,
    /// Cosmetic RNG (particles only)
    #[serde(skip, default = "cosmetic_rng")]
    pub fx_rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: RunPhase,
    pub session: Session,
    /// Altitude in meters (fractional)
    pub score: f64,
    pub player: Player,
    /// Platforms in insertion order (collision priority)
    pub platforms: Vec<Platform>,
    pub turrets: Vec<Turret>,
    pub bullets: Vec<Bullet>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub trackers: ScoreTrackers,
    pub screen_shake: f32,
    /// Ticks left on the "progress stored" banner
    pub checkpoint_banner_ticks: u32,
    /// Pending host notifications
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

fn cosmetic_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Start a procedurally generated run
    ///
    /// Custom mode needs a level; without one the run falls back to standard.
    pub fn new(settings: &RunSettings) -> Self {
        let mut settings = settings.clone();
        if settings.mode == GameMode::Custom {
            log::warn!("Custom mode requested without a level, running standard mode");
            settings.mode = GameMode::Standard;
        }
        Self::start(&settings, None)
    }

    /// Start a run on an authored level
    pub fn with_level(
        settings: &RunSettings,
        level: CustomLevel,
    ) -> Result<Self, crate::level::LevelError> {
        level.validate()?;
        let mut settings = settings.clone();
        settings.mode = GameMode::Custom;
        Ok(Self::start(&settings, Some(level)))
    }

    fn start(settings: &RunSettings, level: Option<CustomLevel>) -> Self {
        let session = Session::new(settings, level);
        let mut state = Self {
            seed: settings.seed,
            rng: Pcg32::seed_from_u64(settings.seed),
            fx_rng: Pcg32::seed_from_u64(settings.seed ^ 0x9e37_79b9_7f4a_7c15),
            time_ticks: 0,
            phase: RunPhase::Alive,
            trackers: ScoreTrackers::new(&session, 0.0),
            session,
            score: 0.0,
            player: Player::new(settings.player_color),
            platforms: Vec::with_capacity(MAX_PLATFORMS),
            turrets: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            screen_shake: 0.0,
            checkpoint_banner_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        log::info!(
            "Run started: mode={} seed={} start={}m",
            state.session.mode.as_str(),
            state.seed,
            state.session.respawn_altitude()
        );
        state.begin_life();
        state
    }

    /// Reset player, score and field for a fresh life at the respawn altitude
    pub fn begin_life(&mut self) {
        let start = self.session.respawn_altitude();
        self.phase = RunPhase::Alive;
        self.score = start;
        self.trackers = ScoreTrackers::new(&self.session, start);
        self.screen_shake = 0.0;
        self.checkpoint_banner_ticks = 0;
        self.player = Player::new(self.session.player_color);
        self.platforms.clear();
        self.turrets.clear();
        self.bullets.clear();
        self.particles.clear();
        super::field::populate(self);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.phase, RunPhase::Dying { .. })
    }

    pub fn is_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    /// Queue a host notification
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Queue a sound trigger
    pub fn cue(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::Sound(cue));
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Highest (smallest y) platform, if any
    pub fn highest_platform(&self) -> Option<&Platform> {
        self.platforms
            .iter()
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    }
}
