//! Canvas 2D rendering
//!
//! Draws the per-frame renderable state (players, zones, particles) onto the
//! shared surface. Read-only over the simulation; drawing runs every frame,
//! paused or not, so the last visual state stays on screen.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::consts::REVEAL_ANIMATION_MS;
use crate::settings::{Difficulty, GameMode};
use crate::sim::collision::player_radius;
use crate::sim::easing::zone_transform;
use crate::sim::state::{GamePhase, RoundState, ZoneShape};
use crate::sim::zones::{WAVE_IMPACT_FRACTION, wave_cycle_duration};

const ZONE_FILL: &str = "#EF4444";
const ZONE_STROKE: &str = "#7F1D1D";
const SAFE_FILL: &str = "#22c55e";
const SAFE_STROKE: &str = "#14532d";
const FADE_FILL: &str = "#9CA3AF";
const FADE_STROKE: &str = "#4B5563";
const DEAD_FILL: &str = "#6B7280";

/// Draw one frame
pub fn draw(ctx: &CanvasRenderingContext2d, state: &RoundState) {
    let width = state.width as f64;
    let height = state.height as f64;
    ctx.clear_rect(0.0, 0.0, width, height);

    draw_background(ctx, state);
    draw_zones(ctx, state);
    draw_particles(ctx, state);
    draw_players(ctx, state);
}

/// Animated dot-grid backdrop; gets twitchier with difficulty
fn draw_background(ctx: &CanvasRenderingContext2d, state: &RoundState) {
    const GRID_SIZE: f64 = 40.0;
    const DOT_RADIUS: f64 = 2.0;

    let cols = (state.width as f64 / GRID_SIZE).ceil() as i32 + 1;
    let rows = (state.height as f64 / GRID_SIZE).ceil() as i32 + 1;
    let anim_time = state.game_time;

    for i in 0..cols {
        for j in 0..rows {
            let mut x = i as f64 * GRID_SIZE;
            let mut y = j as f64 * GRID_SIZE;
            let mut alpha = 0.1;
            let mut color = "#000000";

            match state.settings.difficulty {
                Difficulty::Easy => {
                    let wave = ((anim_time / 4000.0 + (i + j) as f64 * 0.2).sin() + 1.0) / 2.0;
                    alpha = 0.05 + wave * 0.05;
                }
                Difficulty::Medium => {
                    let t = anim_time / 2500.0;
                    x += (t + j as f64 * 0.5).sin() * 4.0;
                    y += (t + i as f64 * 0.5).cos() * 4.0;
                }
                Difficulty::Hard => {
                    let t = anim_time / 1500.0;
                    x += (t + i as f64 * 1.5 + j as f64).sin() * 6.0;
                    y += (t * 1.2 + j as f64 * 1.5 - i as f64).cos() * 6.0;
                    color = "#7F1D1D";
                    alpha = 0.15;
                }
            }

            ctx.set_global_alpha(alpha);
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            let _ = ctx.arc(x, y, DOT_RADIUS, 0.0, TAU);
            ctx.fill();
        }
    }
    ctx.set_global_alpha(1.0);
}

/// Entrance progress for the current reveal window, plus the fade-out flag
fn zone_progress(state: &RoundState) -> (f32, bool) {
    if state.phase == GamePhase::Result {
        return (1.0, false);
    }
    match state.settings.mode {
        GameMode::Classic | GameMode::Reverse => {
            ((state.phase_time / REVEAL_ANIMATION_MS).min(1.0) as f32, false)
        }
        GameMode::Survive => {
            let cycle = wave_cycle_duration(state.wave_index);
            let impact = cycle * WAVE_IMPACT_FRACTION;
            let local = state.game_time - state.wave_start;
            if local < impact {
                ((local / impact) as f32, false)
            } else {
                (((local - impact) / (cycle - impact)) as f32, true)
            }
        }
    }
}

fn draw_zones(ctx: &CanvasRenderingContext2d, state: &RoundState) {
    if !matches!(state.phase, GamePhase::Reveal | GamePhase::Result) {
        return;
    }
    let (progress, fading_out) = zone_progress(state);
    let is_reverse = state.settings.mode == GameMode::Reverse;

    for zone in &state.zones {
        let transform = zone_transform(
            zone.animation,
            progress,
            zone.slide_offset,
            state.game_time,
            fading_out,
        );

        ctx.save();
        let _ = ctx.translate(
            (zone.pos.x + transform.offset.x) as f64,
            (zone.pos.y + transform.offset.y) as f64,
        );
        let _ = ctx.rotate(zone.rotation as f64);
        ctx.begin_path();

        if zone.shape == ZoneShape::Blob && !zone.points.is_empty() {
            let deformed: Vec<(f64, f64)> = zone
                .points
                .iter()
                .map(|p| {
                    let variance = p.variance
                        + transform.wobble_factor
                            * (p.angle * 10.0 + (state.game_time / 100.0) as f32).sin();
                    let r = (zone.radius * transform.scale * variance) as f64;
                    (p.angle.cos() as f64 * r, p.angle.sin() as f64 * r)
                })
                .collect();

            let len = deformed.len();
            let first_mid = (
                (deformed[len - 1].0 + deformed[0].0) / 2.0,
                (deformed[len - 1].1 + deformed[0].1) / 2.0,
            );
            ctx.move_to(first_mid.0, first_mid.1);
            for i in 0..len {
                let p1 = deformed[i];
                let p2 = deformed[(i + 1) % len];
                ctx.quadratic_curve_to(p1.0, p1.1, (p1.0 + p2.0) / 2.0, (p1.1 + p2.1) / 2.0);
            }
        } else {
            let _ = ctx.arc(0.0, 0.0, (zone.radius * transform.scale) as f64, 0.0, TAU);
        }

        ctx.close_path();
        ctx.set_global_alpha(transform.opacity.clamp(0.0, 1.0) as f64);

        let (fill, stroke) = if fading_out {
            (FADE_FILL, FADE_STROKE)
        } else if is_reverse {
            (SAFE_FILL, SAFE_STROKE)
        } else {
            (ZONE_FILL, ZONE_STROKE)
        };
        ctx.set_fill_style_str(fill);
        ctx.fill();
        ctx.set_line_width(3.0);
        ctx.set_stroke_style_str(stroke);
        ctx.stroke();
        ctx.restore();
    }
    ctx.set_global_alpha(1.0);
}

fn draw_particles(ctx: &CanvasRenderingContext2d, state: &RoundState) {
    for p in &state.particles {
        let progress = (p.life / p.max_life).clamp(0.0, 1.0) as f64;
        let size = p.size as f64 * (1.0 - progress);

        ctx.save();
        let _ = ctx.translate(p.pos.x as f64, p.pos.y as f64);
        let _ = ctx.rotate(p.rotation as f64);
        ctx.set_global_alpha(1.0 - progress);
        ctx.set_fill_style_str(p.color_hex());
        ctx.begin_path();
        ctx.move_to(0.0, -size);
        ctx.line_to(size, 0.0);
        ctx.line_to(0.0, size);
        ctx.line_to(-size, 0.0);
        ctx.close_path();
        ctx.fill();
        ctx.restore();
    }
    ctx.set_global_alpha(1.0);
}

/// Spring-out curve for the player entrance pop
fn spring_out(t: f64) -> f64 {
    const PERIOD: f64 = 0.4;
    2.0_f64.powf(-10.0 * t) * ((t - PERIOD / 4.0) * TAU / PERIOD).sin() + 1.0
}

fn draw_players(ctx: &CanvasRenderingContext2d, state: &RoundState) {
    let radius = player_radius(state.width, state.height) as f64;
    let anim_time = state.game_time;

    for player in state.players.values() {
        let (x, y) = (player.position.x as f64, player.position.y as f64);

        if player.is_alive {
            let age = anim_time - player.joined_at;
            let scale = if age < 600.0 {
                spring_out(age / 600.0)
            } else {
                1.0
            };
            let current = radius * scale;

            // Pulsing halo
            let pulse = (anim_time / 150.0).sin() * 4.0;
            ctx.begin_path();
            let _ = ctx.arc(x, y, (current * 2.0 + pulse).max(0.0), 0.0, TAU);
            ctx.set_stroke_style_str(player.color_hex());
            ctx.set_global_alpha(0.5 * (age / 200.0).min(1.0));
            ctx.set_line_width(10.0);
            ctx.stroke();
            ctx.set_global_alpha(1.0);

            ctx.begin_path();
            let _ = ctx.arc(x, y, current.max(0.0), 0.0, TAU);
            ctx.set_fill_style_str(player.color_hex());
            ctx.set_stroke_style_str("#000000");
            ctx.fill();
            ctx.set_line_width(3.0);
            ctx.stroke();
        } else {
            ctx.save();
            ctx.set_global_alpha(0.8);

            ctx.begin_path();
            let _ = ctx.arc(x, y, radius, 0.0, TAU);
            ctx.set_fill_style_str(DEAD_FILL);
            ctx.set_stroke_style_str("#000000");
            ctx.fill();
            ctx.set_line_width(3.0);
            ctx.stroke();

            // Colored X marks the fallen
            let r = radius * 0.4;
            ctx.begin_path();
            ctx.move_to(x - r, y - r);
            ctx.line_to(x + r, y + r);
            ctx.move_to(x + r, y - r);
            ctx.line_to(x - r, y + r);
            ctx.set_stroke_style_str(player.color_hex());
            ctx.set_line_width(4.0);
            ctx.set_line_cap("round");
            ctx.stroke();

            ctx.restore();
        }
    }
}
