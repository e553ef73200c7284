//! Round state and core simulation types
//!
//! Everything the renderer and the host shell read lives here. The player
//! registry is owned exclusively by `RoundState`; other modules receive
//! borrowed access through the `sim` entry points and never hold references
//! across frames.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::PLAYER_PALETTE;
use crate::settings::GameSettings;

/// Current phase of a session
///
/// `Home` and `Settings` are screen-only states: the controller never enters
/// them on its own, they are reached through the discrete navigation commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Home,
    Settings,
    /// Waiting for the first touch
    Lobby,
    /// Fixed timer before zones appear; players may still join or leave
    Countdown,
    /// Zones are live; collision happens at the end (or per wave in Survive)
    Reveal,
    /// Round over, outcome frozen on screen
    Result,
}

/// A tracked pointer, alive or dead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Touch identifier; mouse input uses `consts::MOUSE_POINTER_ID`
    pub id: i32,
    /// Index into `consts::PLAYER_PALETTE`
    pub color: usize,
    /// Surface position, fixed at the moment the pointer joined
    pub position: Vec2,
    pub is_alive: bool,
    /// Game time (ms) when the pointer joined
    pub joined_at: f64,
    /// Game time (ms) of death; `None` while alive
    pub death_time: Option<f64>,
}

impl Player {
    pub fn color_hex(&self) -> &'static str {
        PLAYER_PALETTE[self.color % PLAYER_PALETTE.len()]
    }
}

/// Entrance animation assigned to a zone at generation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationKind {
    FadeIn,
    Grow,
    Ripple,
    Slide,
    Wobble,
}

/// Outline shape of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneShape {
    Circle,
    /// Organic outline built from `DangerZone::points`
    Blob,
}

/// One control point of a blob outline
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BlobPoint {
    /// Bearing in the zone's local frame, radians in [0, 2π)
    pub angle: f32,
    /// Radius multiplier at this bearing, in [0.85, 1.15]
    pub variance: f32,
}

/// A procedurally placed hazard shape
///
/// Immutable after generation except `rotation`, which advances every
/// unpaused frame. The whole set is replaced wholesale at wave boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DangerZone {
    pub pos: Vec2,
    pub radius: f32,
    pub shape: ZoneShape,
    pub animation: AnimationKind,
    /// Blob control points, ordered by ascending angle; empty for circles
    pub points: Vec<BlobPoint>,
    pub rotation: f32,
    /// Radians per second
    pub rotation_speed: f32,
    /// Start offset for the slide entrance animation
    pub slide_offset: Vec2,
}

/// A short-lived visual effect entity
///
/// Snapshot of a player's position/color at death time; carries no reference
/// back to the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Per-frame-equivalent velocity (60 Hz reference frame)
    pub vel: Vec2,
    /// Elapsed lifetime (ms)
    pub life: f32,
    /// Lifetime at which the particle is dropped (ms)
    pub max_life: f32,
    /// Palette index of the player that spawned it
    pub color: usize,
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Particle {
    pub fn color_hex(&self) -> &'static str {
        PLAYER_PALETTE[self.color % PLAYER_PALETTE.len()]
    }
}

/// End-of-round outcome, emitted exactly once per round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub survivors: u32,
    pub total: u32,
    /// Full final registry, including players that died mid-round
    pub players: Vec<Player>,
}

/// Complete state of one game session
///
/// Single-writer: only the frame driver mutates this, with pointer events
/// applied synchronously between frames.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub settings: GameSettings,
    pub phase: GamePhase,
    /// Logical surface size; picked up at the next zone generation
    pub width: f32,
    pub height: f32,

    /// Player registry, keyed by pointer id
    pub players: BTreeMap<i32, Player>,
    pub zones: Vec<DangerZone>,
    pub particles: Vec<Particle>,

    /// Unpaused time since the current phase began (ms)
    pub phase_time: f64,
    /// Cumulative unpaused game time (ms); all timers derive from this
    pub game_time: f64,
    pub paused: bool,

    /// Survive mode: current wave (0-based)
    pub wave_index: u32,
    /// Survive mode: game time at which the current wave began
    pub wave_start: f64,
    /// Guards against resolving collisions twice in one wave/reveal window
    pub wave_collision_done: bool,

    /// Set once, at the RESULT transition
    pub result: Option<GameResult>,

    pub(crate) rng: Pcg32,
}

impl RoundState {
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self {
            settings: GameSettings::default(),
            phase: GamePhase::Home,
            width,
            height,
            players: BTreeMap::new(),
            zones: Vec::new(),
            particles: Vec::new(),
            phase_time: 0.0,
            game_time: 0.0,
            paused: false,
            wave_index: 0,
            wave_start: 0.0,
            wave_collision_done: false,
            result: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Applied at the start of the next zone generation, never retroactively
    pub fn set_surface_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn alive_count(&self) -> usize {
        self.players.values().filter(|p| p.is_alive).count()
    }
}
