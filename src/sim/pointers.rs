//! Pointer tracking: join/leave, early-release deaths, pause gesture
//!
//! Raw pointer events arrive pre-mapped to surface coordinates. Joining is
//! only possible while the round still accepts players (LOBBY/COUNTDOWN);
//! once zones are revealed, lifting a finger is a death, not a leave.

use glam::Vec2;
use rand::Rng;

use super::collision::CollisionSummary;
use super::round;
use super::state::{GamePhase, Player, RoundState};
use crate::consts::{PAUSE_GESTURE_TOUCHES, PAUSE_GESTURE_WINDOW_MS, PLAYER_PALETTE};
use crate::settings::GameMode;

/// Apply a pointer activation/deactivation to the player registry
///
/// No-op while paused. After every update the player count is synced to the
/// lobby transitions (first join starts the countdown, last leave cancels it).
pub fn set_pointer_active(state: &mut RoundState, id: i32, x: f32, y: f32, active: bool) {
    if state.paused {
        return;
    }

    if active {
        if !state.players.contains_key(&id)
            && matches!(state.phase, GamePhase::Lobby | GamePhase::Countdown)
        {
            let color = pick_color(state);
            let player = Player {
                id,
                color,
                position: Vec2::new(x, y),
                is_alive: true,
                joined_at: state.game_time,
                death_time: None,
            };
            log::debug!("Pointer {id} joined with color {}", player.color_hex());
            state.players.insert(id, player);
        }
    } else if state.players.contains_key(&id) {
        match state.phase {
            GamePhase::Lobby | GamePhase::Countdown => {
                state.players.remove(&id);
                log::debug!("Pointer {id} left");
            }
            GamePhase::Reveal => {
                let mut died = false;
                if let Some(player) = state.players.get_mut(&id) {
                    if player.is_alive {
                        player.is_alive = false;
                        player.death_time = Some(state.game_time);
                        died = true;
                    }
                }
                // Letting go ends a Survive round as soon as one player is left
                if died && state.settings.mode == GameMode::Survive {
                    let survivors = state.alive_count() as u32;
                    if survivors <= 1 {
                        let total = state.player_count() as u32;
                        round::finish_round(state, CollisionSummary { survivors, total });
                        return;
                    }
                }
            }
            // Result/Home/Settings: stale pointer events are ignored
            _ => {}
        }
    }

    sync_lobby_transitions(state);
}

/// Drive LOBBY <-> COUNTDOWN from the current player count
fn sync_lobby_transitions(state: &mut RoundState) {
    let count = state.player_count();
    if state.phase == GamePhase::Lobby && count >= 1 {
        round::enter_phase(state, GamePhase::Countdown);
    } else if state.phase == GamePhase::Countdown && count == 0 {
        round::enter_phase(state, GamePhase::Lobby);
    }
}

/// Pick a palette index, preferring colors no tracked player is using
fn pick_color(state: &mut RoundState) -> usize {
    let available: Vec<usize> = (0..PLAYER_PALETTE.len())
        .filter(|i| !state.players.values().any(|p| p.color == *i))
        .collect();
    if available.is_empty() {
        // Palette exhausted: deterministic cyclic fallback
        state.players.len() % PLAYER_PALETTE.len()
    } else {
        available[state.rng.random_range(0..available.len())]
    }
}

/// Detects the 3-finger pause gesture across a touch sequence
///
/// A sequence runs from the first touch until all pointers lift; the peak
/// simultaneous-touch count is tracked as a running maximum. Seeing exactly
/// three at the peak, with every finger lifted within 600ms of the first
/// touch, toggles pause instead of acting as gameplay input.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    max_touches: u32,
    first_touch_at: f64,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a touch-start; `active_count` is the touch count after the event
    pub fn on_touch_start(&mut self, active_count: u32, now: f64) {
        self.max_touches = self.max_touches.max(active_count);
        if active_count == 1 && self.max_touches == 1 {
            self.first_touch_at = now;
        }
    }

    /// Record a touch-end; returns true when the gesture fired
    pub fn on_touch_end(&mut self, remaining_count: u32, now: f64) -> bool {
        if self.max_touches == PAUSE_GESTURE_TOUCHES && remaining_count == 0 {
            let elapsed = now - self.first_touch_at;
            if elapsed < PAUSE_GESTURE_WINDOW_MS {
                self.max_touches = 0;
                return true;
            }
        }
        if remaining_count == 0 {
            self.max_touches = 0;
        }
        false
    }
}
