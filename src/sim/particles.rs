//! Particle advancement
//!
//! Particles are fire-and-forget: burst on death, drift outward, expire.
//! Velocities are stored in per-frame units (60 Hz reference) and scaled by
//! the actual frame delta so motion stays frame-rate independent.

use super::state::Particle;
use crate::consts::FRAME_REFERENCE_MS;

/// Advance all particles by `dt` ms and drop the expired ones
pub fn advance(particles: &mut Vec<Particle>, dt: f32) {
    let frames = dt / FRAME_REFERENCE_MS;
    particles.retain_mut(|p| {
        p.pos += p.vel * frames;
        p.rotation += p.rotation_speed * frames;
        p.life += dt;
        p.life < p.max_life
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn particle(max_life: f32) -> Particle {
        Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(3.0, -3.0),
            life: 0.0,
            max_life,
            color: 0,
            size: 10.0,
            rotation: 0.0,
            rotation_speed: 0.2,
        }
    }

    #[test]
    fn test_advance_integrates_position_and_life() {
        let mut particles = vec![particle(1000.0)];
        advance(&mut particles, FRAME_REFERENCE_MS);
        let p = &particles[0];
        assert!((p.pos.x - 103.0).abs() < 1e-3);
        assert!((p.pos.y - 97.0).abs() < 1e-3);
        assert!((p.life - FRAME_REFERENCE_MS).abs() < 1e-3);
        assert!((p.rotation - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_motion_is_frame_rate_independent() {
        let mut at_60hz = vec![particle(10_000.0)];
        let mut at_30hz = vec![particle(10_000.0)];
        for _ in 0..4 {
            advance(&mut at_60hz, FRAME_REFERENCE_MS);
        }
        for _ in 0..2 {
            advance(&mut at_30hz, FRAME_REFERENCE_MS * 2.0);
        }
        assert!((at_60hz[0].pos - at_30hz[0].pos).length() < 1e-3);
    }

    #[test]
    fn test_expired_particles_are_dropped() {
        let mut particles = vec![particle(100.0), particle(1000.0)];
        advance(&mut particles, 100.0);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].max_life, 1000.0);
    }

    #[test]
    fn test_zero_dt_is_a_no_op() {
        let mut particles = vec![particle(500.0)];
        let before = particles[0].clone();
        advance(&mut particles, 0.0);
        assert_eq!(particles[0].pos, before.pos);
        assert_eq!(particles[0].life, before.life);
    }
}
