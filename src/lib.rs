//! Hotzone - a local multiplayer reflex party game
//!
//! Core modules:
//! - `sim`: Delta-time driven simulation (phase machine, zones, collisions, particles)
//! - `render`: Canvas 2D rendering of the per-frame state (wasm only)
//! - `settings`: Persisted game settings (mode + difficulty)
//!
//! Any number of players hold a finger on a shared touch surface. Danger zones
//! appear for a brief window; depending on the mode, being inside (or outside)
//! one at the moment of impact is fatal. The simulation is pure and
//! platform-free; `main.rs` wires it to the browser.

pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod render;

pub use settings::{Difficulty, GameMode, GameSettings};

/// Game configuration constants
pub mod consts {
    /// Countdown length before zones are revealed (ms of unpaused time)
    pub const WAITING_PHASE_MS: f64 = 3000.0;
    /// Reveal entrance animation length in Classic/Reverse (ms)
    pub const REVEAL_ANIMATION_MS: f64 = 500.0;
    /// How long the outcome stays on screen before the summary (ms)
    pub const RESULT_DISPLAY_MS: f64 = 5000.0;

    /// Player marker sizing: 8% of the min screen dimension, clamped
    pub const PLAYER_BASE_RADIUS_PCT: f32 = 0.08;
    pub const PLAYER_MIN_RADIUS: f32 = 25.0;
    pub const PLAYER_MAX_RADIUS: f32 = 60.0;

    /// Reserved pointer id for mouse input (touches use their identifier)
    pub const MOUSE_POINTER_ID: i32 = -1;

    /// Exactly this many simultaneous touches arm the pause gesture
    pub const PAUSE_GESTURE_TOUCHES: u32 = 3;
    /// All fingers must lift within this window of the first touch (ms)
    pub const PAUSE_GESTURE_WINDOW_MS: f64 = 600.0;

    /// Particles spawned per player death
    pub const DEATH_BURST_COUNT: u32 = 16;
    /// Reference frame length for particle velocities (60 Hz)
    pub const FRAME_REFERENCE_MS: f32 = 1000.0 / 60.0;

    /// Player colors, in join-order fallback rotation
    pub const PLAYER_PALETTE: [&str; 12] = [
        "#06B6D4", // Cyan
        "#84CC16", // Lime
        "#3B82F6", // Blue
        "#8B5CF6", // Violet
        "#10B981", // Emerald
        "#6366F1", // Indigo
        "#14B8A6", // Teal
        "#D946EF", // Fuchsia
        "#F97316", // Orange
        "#0EA5E9", // Sky
        "#9333EA", // Purple
        "#FDE047", // Yellow
    ];
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle_tau(mut angle: f32) -> f32 {
    use std::f32::consts::TAU;
    angle %= TAU;
    if angle < 0.0 {
        angle += TAU;
    }
    angle
}

/// Smaller of the two surface dimensions, used for all size scaling
#[inline]
pub fn min_dimension(width: f32, height: f32) -> f32 {
    width.min(height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_normalize_angle_tau() {
        assert!((normalize_angle_tau(0.0) - 0.0).abs() < 1e-6);
        assert!((normalize_angle_tau(TAU + 0.5) - 0.5).abs() < 1e-6);
        assert!((normalize_angle_tau(-PI) - PI).abs() < 1e-5);
        let n = normalize_angle_tau(-0.25);
        assert!(n >= 0.0 && n < TAU);
    }
}
