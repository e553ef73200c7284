//! Round/wave phase controller
//!
//! One state machine for all three modes. Mode differences are confined to a
//! reveal plan (single guarded check vs. endless wave cycling) and the
//! survival rule applied by the collision resolver; the transition skeleton
//! is shared.
//!
//! All timers derive from the accumulated game clock, never from wall-clock
//! timers, so a single pause gate freezes everything uniformly.

use super::collision::{self, CollisionSummary};
use super::particles;
use super::state::{GamePhase, GameResult, RoundState};
use super::zones;
use crate::consts::{REVEAL_ANIMATION_MS, WAITING_PHASE_MS};
use crate::settings::{GameMode, GameSettings};

/// Reveal behavior, parameterized by mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealPlan {
    /// One collision check when the entrance animation completes
    SingleCheck,
    /// Waves cycle indefinitely, each with a guarded mid-wave impact
    WaveCycle,
}

fn reveal_plan(mode: GameMode) -> RevealPlan {
    match mode {
        GameMode::Classic | GameMode::Reverse => RevealPlan::SingleCheck,
        GameMode::Survive => RevealPlan::WaveCycle,
    }
}

/// Advance the simulation by `dt` ms of unpaused time
///
/// Called once per animation frame by the loop driver; a paused frame never
/// reaches the accumulators.
pub fn tick(state: &mut RoundState, dt: f64) {
    if state.paused {
        return;
    }

    state.phase_time += dt;
    state.game_time += dt;

    particles::advance(&mut state.particles, dt as f32);
    let dt_secs = (dt / 1000.0) as f32;
    for zone in &mut state.zones {
        zone.rotation += zone.rotation_speed * dt_secs;
    }

    match state.phase {
        GamePhase::Countdown => {
            if state.phase_time >= WAITING_PHASE_MS {
                begin_reveal(state);
            }
        }
        GamePhase::Reveal => match reveal_plan(state.settings.mode) {
            RevealPlan::SingleCheck => {
                if state.phase_time >= REVEAL_ANIMATION_MS && !state.wave_collision_done {
                    state.wave_collision_done = true;
                    let summary = resolve_now(state);
                    finish_round(state, summary);
                }
            }
            RevealPlan::WaveCycle => wave_tick(state),
        },
        _ => {}
    }
}

/// Countdown expired: generate the first zone set and reveal it
fn begin_reveal(state: &mut RoundState) {
    state.wave_index = 0;
    state.wave_start = state.game_time;
    state.wave_collision_done = false;
    regenerate_zones(state);
    enter_phase(state, GamePhase::Reveal);
}

/// One Survive wave: impact check at 60% of the cycle, next wave at the end
fn wave_tick(state: &mut RoundState) {
    let cycle = zones::wave_cycle_duration(state.wave_index);
    let impact = cycle * zones::WAVE_IMPACT_FRACTION;
    let local = state.game_time - state.wave_start;

    if local >= impact && !state.wave_collision_done {
        state.wave_collision_done = true;
        let summary = resolve_now(state);
        if summary.survivors <= 1 {
            finish_round(state, summary);
            return;
        }
    }

    if local >= cycle {
        state.wave_index += 1;
        state.wave_start = state.game_time;
        state.wave_collision_done = false;
        regenerate_zones(state);
        log::info!("Wave {} begins", state.wave_index);
    }
}

fn resolve_now(state: &mut RoundState) -> CollisionSummary {
    collision::resolve(
        &mut state.players,
        &state.zones,
        &mut state.particles,
        &mut state.rng,
        state.settings.mode,
        state.width,
        state.height,
        state.game_time,
    )
}

/// Replace the zone set wholesale, reading the surface size as of now
fn regenerate_zones(state: &mut RoundState) {
    state.zones = zones::generate(
        &mut state.rng,
        state.width,
        state.height,
        state.settings.difficulty,
        state.settings.mode,
        state.wave_index,
        &state.players,
    );
}

/// Switch phase and reset the phase timer
///
/// Entering LOBBY or COUNTDOWN also clears the per-round transients so a
/// fresh round never inherits particles, zones, or wave bookkeeping.
pub(crate) fn enter_phase(state: &mut RoundState, phase: GamePhase) {
    log::info!("Phase {:?} -> {:?}", state.phase, phase);
    state.phase = phase;
    state.phase_time = 0.0;
    if matches!(phase, GamePhase::Lobby | GamePhase::Countdown) {
        state.particles.clear();
        state.zones.clear();
        state.wave_index = 0;
        state.wave_start = 0.0;
        state.wave_collision_done = false;
    }
}

/// Record the outcome (once) and move to RESULT
pub(crate) fn finish_round(state: &mut RoundState, summary: CollisionSummary) {
    if state.result.is_none() {
        state.result = Some(GameResult {
            survivors: summary.survivors,
            total: summary.total,
            players: state.players.values().cloned().collect(),
        });
        log::info!(
            "Round over: {}/{} survived",
            summary.survivors,
            summary.total
        );
    }
    state.paused = false;
    enter_phase(state, GamePhase::Result);
}

/// Begin a round with the given settings (HOME -> LOBBY)
pub fn start_round(state: &mut RoundState, settings: GameSettings) {
    state.settings = settings;
    reset_session(state);
    enter_phase(state, GamePhase::Lobby);
}

/// RESULT -> fresh LOBBY, same settings
pub fn play_again(state: &mut RoundState) {
    reset_session(state);
    enter_phase(state, GamePhase::Lobby);
}

/// Back to the home screen, dropping all round state
pub fn go_home(state: &mut RoundState) {
    reset_session(state);
    state.zones.clear();
    state.particles.clear();
    enter_phase(state, GamePhase::Home);
}

/// Open the settings screen (external navigation only)
pub fn open_settings(state: &mut RoundState) {
    enter_phase(state, GamePhase::Settings);
}

fn reset_session(state: &mut RoundState) {
    state.players.clear();
    state.result = None;
    state.paused = false;
}

/// Toggle pause; only meaningful while a round is in progress
pub fn toggle_pause(state: &mut RoundState) {
    if matches!(
        state.phase,
        GamePhase::Lobby | GamePhase::Countdown | GamePhase::Reveal
    ) {
        state.paused = !state.paused;
        log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
    }
}

/// Pause without toggling (used by the window-blur handler)
pub fn pause(state: &mut RoundState) {
    if !state.paused {
        toggle_pause(state);
    }
}
