//! Procedural danger zone generation
//!
//! Randomized per call behind a caller-supplied RNG, so production rolls a
//! fresh layout every wave while tests drive a seeded `Pcg32` and assert
//! structural properties.

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{AnimationKind, BlobPoint, DangerZone, Player, ZoneShape};
use crate::min_dimension;
use crate::settings::{Difficulty, GameMode};

/// Zone count range and size band for one difficulty level
#[derive(Debug, Clone, Copy)]
pub struct DifficultyTuning {
    pub count_min: u32,
    pub count_max: u32,
    /// Radius band as fractions of the min screen dimension
    pub size_min_pct: f32,
    pub size_max_pct: f32,
}

pub const fn tuning(difficulty: Difficulty) -> DifficultyTuning {
    match difficulty {
        Difficulty::Easy => DifficultyTuning {
            count_min: 2,
            count_max: 3,
            size_min_pct: 0.25,
            size_max_pct: 0.38,
        },
        Difficulty::Medium => DifficultyTuning {
            count_min: 4,
            count_max: 6,
            size_min_pct: 0.20,
            size_max_pct: 0.30,
        },
        Difficulty::Hard => DifficultyTuning {
            count_min: 7,
            count_max: 10,
            size_min_pct: 0.15,
            size_max_pct: 0.22,
        },
    }
}

/// Wave length in Survive mode: shrinks 120ms per wave, floored at 800ms
pub fn wave_cycle_duration(wave: u32) -> f64 {
    (2500.0 - 120.0 * wave as f64).max(800.0)
}

/// Fraction of the wave cycle at which the impact check fires
pub const WAVE_IMPACT_FRACTION: f64 = 0.6;

/// Zone count for a Survive wave: one more per wave, two extra on Hard,
/// capped so late waves stay renderable
pub fn survive_zone_count(difficulty: Difficulty, wave: u32) -> u32 {
    let config = tuning(difficulty);
    let mut count = config.count_min + wave;
    if difficulty == Difficulty::Hard {
        count += 2;
    }
    count.min(15 + wave / 2)
}

/// Zone radius multiplier for a Survive wave (+5% per wave)
pub fn survive_size_multiplier(wave: u32) -> f32 {
    1.0 + 0.05 * wave as f32
}

/// Minimum spacing between zone edges during placement
///
/// Shrinks with the wave index and goes negative (permitting overlap) in
/// late Survive waves. Outside Survive the buffer is a flat 20px.
pub fn placement_buffer(mode: GameMode, wave: u32, min_dim: f32) -> f32 {
    if mode == GameMode::Survive {
        (20.0 - 5.0 * wave as f32).max(-0.2 * min_dim)
    } else {
        20.0
    }
}

/// Roll an entrance animation from the difficulty-weighted table
pub fn entrance_animation<R: Rng>(difficulty: Difficulty, rng: &mut R) -> AnimationKind {
    let roll: f32 = rng.random();
    match difficulty {
        Difficulty::Easy => {
            if roll > 0.6 {
                AnimationKind::Grow
            } else {
                AnimationKind::FadeIn
            }
        }
        Difficulty::Medium => {
            if roll > 0.7 {
                AnimationKind::Wobble
            } else if roll > 0.4 {
                AnimationKind::Ripple
            } else {
                AnimationKind::Grow
            }
        }
        Difficulty::Hard => {
            if roll > 0.7 {
                AnimationKind::Slide
            } else if roll > 0.4 {
                AnimationKind::Wobble
            } else {
                AnimationKind::Ripple
            }
        }
    }
}

/// Generate the full zone set for a round or wave
///
/// The set is rebuilt wholesale at every phase/wave boundary. Placement uses
/// rejection sampling against the zones already in the batch; a spot that
/// never clears its buffer is dropped (count comes in under target) except in
/// late Survive waves, where it is force-accepted so escalation never stalls.
pub fn generate<R: Rng>(
    rng: &mut R,
    width: f32,
    height: f32,
    difficulty: Difficulty,
    mode: GameMode,
    wave: u32,
    _players: &BTreeMap<i32, Player>,
) -> Vec<DangerZone> {
    let config = tuning(difficulty);
    let min_dim = min_dimension(width, height);
    let batch_animation = entrance_animation(difficulty, rng);

    let count = if mode == GameMode::Survive {
        survive_zone_count(difficulty, wave)
    } else {
        rng.random_range(config.count_min..=config.count_max)
    };
    let size_multiplier = if mode == GameMode::Survive {
        survive_size_multiplier(wave)
    } else {
        1.0
    };
    let buffer = placement_buffer(mode, wave, min_dim);
    let force_accept = mode == GameMode::Survive && wave > 8;
    let max_attempts = if mode == GameMode::Survive && wave > 5 {
        100
    } else {
        50
    };

    let mut zones: Vec<DangerZone> = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let mut candidate = (Vec2::ZERO, 0.0_f32);
        let mut cleared = false;

        for _attempt in 0..max_attempts {
            let base_pct =
                config.size_min_pct + rng.random::<f32>() * (config.size_max_pct - config.size_min_pct);
            let mut radius = min_dim * base_pct * size_multiplier;
            if mode == GameMode::Survive {
                // Keep one zone from swallowing the whole screen early on
                radius = radius.min(min_dim * 0.6);
            }
            let pos = Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height);
            candidate = (pos, radius);

            let collides = zones
                .iter()
                .any(|z| pos.distance(z.pos) < radius + z.radius + buffer);
            if !collides {
                cleared = true;
                break;
            }
        }

        if !cleared && !force_accept {
            continue;
        }
        let (pos, radius) = candidate;

        let animation = if mode == GameMode::Survive {
            // Later waves lean on the harsher table half the time
            if rng.random_bool(0.5) {
                entrance_animation(Difficulty::Hard, rng)
            } else {
                batch_animation
            }
        } else if rng.random_bool(0.2) {
            entrance_animation(difficulty, rng)
        } else {
            batch_animation
        };

        let shape = if rng.random_bool(0.7) {
            ZoneShape::Blob
        } else {
            ZoneShape::Circle
        };
        let points = if shape == ZoneShape::Blob {
            let num_points = rng.random_range(8..=14);
            (0..num_points)
                .map(|j| BlobPoint {
                    angle: j as f32 / num_points as f32 * TAU,
                    variance: 0.85 + rng.random::<f32>() * 0.3,
                })
                .collect()
        } else {
            Vec::new()
        };

        let slide_angle = rng.random::<f32>() * TAU;
        let slide_dist = 200.0 + rng.random::<f32>() * 300.0;

        zones.push(DangerZone {
            pos,
            radius,
            shape,
            animation,
            points,
            rotation: rng.random::<f32>() * TAU,
            rotation_speed: rng.random_range(-0.3..0.3),
            slide_offset: Vec2::new(slide_angle.cos(), slide_angle.sin()) * slide_dist,
        });
    }

    log::debug!(
        "Generated {} zones ({:?}/{:?}, wave {})",
        zones.len(),
        difficulty,
        mode,
        wave
    );
    zones
}
