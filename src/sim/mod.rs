//! Simulation core
//!
//! All gameplay logic lives here. This module must stay pure and
//! platform-free:
//! - Delta-time driven, with all timers derived from the game clock
//! - Caller-supplied, seedable RNG only
//! - Single writer: the frame driver mutates, pointer events apply between
//!   frames, everything else borrows
//! - No rendering or browser dependencies

pub mod clock;
pub mod collision;
pub mod easing;
pub mod particles;
pub mod pointers;
pub mod round;
pub mod state;
pub mod zones;

pub use clock::FrameClock;
pub use collision::{CollisionSummary, player_radius, zone_effective_radius};
pub use easing::{ZoneTransform, zone_transform};
pub use pointers::{GestureTracker, set_pointer_active};
pub use round::{go_home, play_again, start_round, tick, toggle_pause};
pub use state::{
    AnimationKind, BlobPoint, DangerZone, GamePhase, GameResult, Particle, Player, RoundState,
    ZoneShape,
};
