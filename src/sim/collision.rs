//! Pointer-vs-zone collision resolution
//!
//! The tricky part of the game: a zone under animation is not a circle. Blob
//! outlines are control points with per-point radius variance, so the
//! effective radius at the player's bearing comes from interpolating the two
//! straddling points in the zone's rotated local frame.

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::easing::zone_transform;
use super::state::{DangerZone, Particle, Player, ZoneShape};
use crate::consts::{
    DEATH_BURST_COUNT, PLAYER_BASE_RADIUS_PCT, PLAYER_MAX_RADIUS, PLAYER_MIN_RADIUS,
};
use crate::settings::GameMode;
use crate::{min_dimension, normalize_angle_tau};

/// Shrinks the hit distance slightly so near-boundary contact still triggers
/// rather than slipping through on exact pixel edges
const TOLERANCE: f32 = 2.0;

/// Outcome of one resolution pass over the full registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionSummary {
    pub survivors: u32,
    pub total: u32,
}

/// Visual/collision radius of a player marker, derived from surface size
pub fn player_radius(width: f32, height: f32) -> f32 {
    (min_dimension(width, height) * PLAYER_BASE_RADIUS_PCT)
        .clamp(PLAYER_MIN_RADIUS, PLAYER_MAX_RADIUS)
}

/// Whether touching a zone kills (Classic/Survive) or saves (Reverse)
pub fn zone_contact_is_lethal(mode: GameMode) -> bool {
    mode != GameMode::Reverse
}

/// Effective zone radius along the bearing from zone center to `target_angle`
///
/// For blobs: locate the two control points straddling the bearing in the
/// zone's rotated local frame and linearly interpolate their variance. A zero
/// angular span (degenerate single-point outline) yields the nearer point's
/// variance. Wobble-animated zones perturb each endpoint with a sinusoid
/// keyed to the game clock.
pub fn zone_effective_radius(zone: &DangerZone, target_angle: f32, now: f64) -> f32 {
    if zone.shape != ZoneShape::Blob || zone.points.is_empty() {
        return zone.radius;
    }

    let wobble = zone_transform(zone.animation, 1.0, zone.slide_offset, now, false).wobble_factor;
    let angle = normalize_angle_tau(target_angle - zone.rotation);

    let points = &zone.points;
    let mut p1 = points[points.len() - 1];
    let mut p2 = points[0];
    for pair in points.windows(2) {
        if angle >= pair[0].angle && angle < pair[1].angle {
            p1 = pair[0];
            p2 = pair[1];
            break;
        }
    }

    let mut span = p2.angle - p1.angle;
    if span < 0.0 {
        span += TAU;
    }
    let mut along = angle - p1.angle;
    if along < 0.0 {
        along += TAU;
    }
    let t = if span == 0.0 { 0.0 } else { along / span };

    let phase = (now / 100.0) as f32;
    let v1 = p1.variance + wobble * (p1.angle * 10.0 + phase).sin();
    let v2 = p2.variance + wobble * (p2.angle * 10.0 + phase).sin();

    zone.radius * (v1 + (v2 - v1) * t)
}

fn intersects(position: Vec2, player_r: f32, zone: &DangerZone, now: f64) -> bool {
    let delta = position - zone.pos;
    let bearing = delta.y.atan2(delta.x);
    let effective = zone_effective_radius(zone, bearing, now);
    delta.length() < effective + player_r - TOLERANCE
}

/// Resolve survival for every live player against the active zone set
///
/// Killed players are marked dead in place (`death_time = now`) and burst
/// into particles; already-dead players only count toward `total`.
pub fn resolve<R: Rng>(
    players: &mut BTreeMap<i32, Player>,
    zones: &[DangerZone],
    particles: &mut Vec<Particle>,
    rng: &mut R,
    mode: GameMode,
    width: f32,
    height: f32,
    now: f64,
) -> CollisionSummary {
    let player_r = player_radius(width, height);
    let lethal = zone_contact_is_lethal(mode);

    let mut survivors = 0;
    let mut total = 0;
    for player in players.values_mut() {
        total += 1;
        if !player.is_alive {
            continue;
        }

        let in_zone = zones
            .iter()
            .any(|zone| intersects(player.position, player_r, zone, now));

        if in_zone == lethal {
            player.is_alive = false;
            player.death_time = Some(now);
            spawn_death_burst(particles, rng, player.position, player.color);
        } else {
            survivors += 1;
        }
    }

    CollisionSummary { survivors, total }
}

/// Spawn the radial particle burst for a death at `pos`
pub fn spawn_death_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    color: usize,
) {
    for i in 0..DEATH_BURST_COUNT {
        let angle = TAU * i as f32 / DEATH_BURST_COUNT as f32;
        let speed = 2.0 + rng.random::<f32>() * 5.0;
        particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: 0.0,
            max_life: 800.0 + rng.random::<f32>() * 400.0,
            color,
            size: 8.0 + rng.random::<f32>() * 8.0,
            rotation: rng.random::<f32>() * TAU,
            rotation_speed: (rng.random::<f32>() - 0.5) * 0.4,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{AnimationKind, BlobPoint};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn circle_zone(x: f32, y: f32, radius: f32) -> DangerZone {
        DangerZone {
            pos: Vec2::new(x, y),
            radius,
            shape: ZoneShape::Circle,
            animation: AnimationKind::Grow,
            points: Vec::new(),
            rotation: 0.0,
            rotation_speed: 0.0,
            slide_offset: Vec2::ZERO,
        }
    }

    fn blob_zone(radius: f32, variances: &[f32]) -> DangerZone {
        let n = variances.len();
        DangerZone {
            pos: Vec2::ZERO,
            radius,
            shape: ZoneShape::Blob,
            animation: AnimationKind::Grow,
            points: variances
                .iter()
                .enumerate()
                .map(|(j, &variance)| BlobPoint {
                    angle: j as f32 / n as f32 * TAU,
                    variance,
                })
                .collect(),
            rotation: 0.0,
            rotation_speed: 0.0,
            slide_offset: Vec2::ZERO,
        }
    }

    fn player_at(id: i32, x: f32, y: f32) -> Player {
        Player {
            id,
            color: id.unsigned_abs() as usize,
            position: Vec2::new(x, y),
            is_alive: true,
            joined_at: 0.0,
            death_time: None,
        }
    }

    #[test]
    fn test_player_radius_clamped() {
        // 8% of min dim, clamped to [25, 60]
        assert_eq!(player_radius(800.0, 600.0), 48.0);
        assert_eq!(player_radius(200.0, 200.0), 25.0);
        assert_eq!(player_radius(2000.0, 2000.0), 60.0);
    }

    #[test]
    fn test_circle_intersection_tolerance_boundary() {
        let zone = circle_zone(0.0, 0.0, 100.0);
        let pr = player_radius(800.0, 600.0);
        let threshold = 100.0 + pr - TOLERANCE;
        assert!(intersects(Vec2::new(threshold - 1.0, 0.0), pr, &zone, 0.0));
        assert!(!intersects(Vec2::new(threshold + 1.0, 0.0), pr, &zone, 0.0));
    }

    #[test]
    fn test_blob_radius_interpolates_between_points() {
        let zone = blob_zone(100.0, &[1.0, 1.1, 0.9, 1.0]);
        assert!((zone_effective_radius(&zone, 0.0, 0.0) - 100.0).abs() < 1e-3);
        assert!((zone_effective_radius(&zone, FRAC_PI_2, 0.0) - 110.0).abs() < 1e-3);
        // Midway between the first two points
        assert!((zone_effective_radius(&zone, FRAC_PI_4, 0.0) - 105.0).abs() < 1e-3);
    }

    #[test]
    fn test_blob_radius_wraps_last_segment() {
        let zone = blob_zone(100.0, &[1.0, 1.1, 0.9, 1.2]);
        // Bearing in the wrap-around segment between the last point and 2π
        let bearing = 3.0 * FRAC_PI_2 + FRAC_PI_4;
        let expected = 100.0 * (1.2 + (1.0 - 1.2) * 0.5);
        assert!((zone_effective_radius(&zone, bearing, 0.0) - expected).abs() < 1e-2);
    }

    #[test]
    fn test_blob_rotation_shifts_lookup_frame() {
        let mut zone = blob_zone(100.0, &[1.0, 1.1, 0.9, 1.0]);
        zone.rotation = FRAC_PI_2;
        // World bearing π now lands on the local π/2 point
        assert!((zone_effective_radius(&zone, PI, 0.0) - 110.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_single_point_blob() {
        let zone = blob_zone(100.0, &[1.1]);
        // Zero span falls back to the nearer point's variance, no div-by-zero
        for bearing in [0.0, 1.0, 4.0] {
            assert!((zone_effective_radius(&zone, bearing, 0.0) - 110.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_empty_registry_resolves_to_zero() {
        let mut players = BTreeMap::new();
        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(1);
        let summary = resolve(
            &mut players,
            &[circle_zone(100.0, 100.0, 50.0)],
            &mut particles,
            &mut rng,
            GameMode::Classic,
            800.0,
            600.0,
            0.0,
        );
        assert_eq!(summary, CollisionSummary { survivors: 0, total: 0 });
        assert!(particles.is_empty());
    }

    #[test]
    fn test_reverse_is_exact_complement_of_classic() {
        let zones = vec![circle_zone(100.0, 100.0, 80.0)];
        let mut rng = Pcg32::seed_from_u64(2);

        for (mode, inside_survives) in [(GameMode::Classic, false), (GameMode::Reverse, true)] {
            let mut players = BTreeMap::new();
            players.insert(1, player_at(1, 100.0, 100.0)); // inside
            players.insert(2, player_at(2, 700.0, 500.0)); // outside
            let mut particles = Vec::new();

            let summary = resolve(
                &mut players,
                &zones,
                &mut particles,
                &mut rng,
                mode,
                800.0,
                600.0,
                1000.0,
            );
            assert_eq!(summary.total, 2);
            assert_eq!(summary.survivors, 1);
            assert_eq!(players[&1].is_alive, inside_survives);
            assert_eq!(players[&2].is_alive, !inside_survives);
        }
    }

    #[test]
    fn test_death_marks_player_and_bursts_particles() {
        let mut players = BTreeMap::new();
        players.insert(1, player_at(1, 100.0, 100.0));
        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(3);

        let summary = resolve(
            &mut players,
            &[circle_zone(100.0, 100.0, 80.0)],
            &mut particles,
            &mut rng,
            GameMode::Classic,
            800.0,
            600.0,
            2500.0,
        );
        assert_eq!(summary, CollisionSummary { survivors: 0, total: 1 });
        assert!(!players[&1].is_alive);
        assert_eq!(players[&1].death_time, Some(2500.0));

        assert_eq!(particles.len(), DEATH_BURST_COUNT as usize);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(100.0, 100.0));
            let speed = p.vel.length();
            assert!((2.0..=7.0).contains(&speed));
            assert!((800.0..=1200.0).contains(&p.max_life));
            assert!((8.0..=16.0).contains(&p.size));
        }
    }

    #[test]
    fn test_dead_players_count_toward_total_only() {
        let mut players = BTreeMap::new();
        players.insert(1, player_at(1, 700.0, 500.0));
        let mut corpse = player_at(2, 10.0, 10.0);
        corpse.is_alive = false;
        corpse.death_time = Some(100.0);
        players.insert(2, corpse);

        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(4);
        let summary = resolve(
            &mut players,
            &[],
            &mut particles,
            &mut rng,
            GameMode::Classic,
            800.0,
            600.0,
            500.0,
        );
        assert_eq!(summary, CollisionSummary { survivors: 1, total: 2 });
        // No second death, no second burst
        assert_eq!(players[&2].death_time, Some(100.0));
        assert!(particles.is_empty());
    }

    #[test]
    fn test_reverse_with_no_zones_kills_everyone() {
        let mut players = BTreeMap::new();
        players.insert(1, player_at(1, 400.0, 300.0));
        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(5);
        let summary = resolve(
            &mut players,
            &[],
            &mut particles,
            &mut rng,
            GameMode::Reverse,
            800.0,
            600.0,
            0.0,
        );
        assert_eq!(summary, CollisionSummary { survivors: 0, total: 1 });
    }

    proptest::proptest! {
        #[test]
        fn prop_blob_effective_radius_within_variance_band(
            bearing in 0.0f32..std::f32::consts::TAU,
            rotation in 0.0f32..std::f32::consts::TAU,
        ) {
            let mut zone = blob_zone(100.0, &[0.9, 1.1, 0.95, 1.05, 1.0, 0.85]);
            zone.rotation = rotation;
            let r = zone_effective_radius(&zone, bearing, 0.0);
            // Interpolation can never leave the variance band
            proptest::prop_assert!((100.0 * 0.85 - 1e-3..=100.0 * 1.15 + 1e-3).contains(&r));
        }
    }
}
