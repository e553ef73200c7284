//! Easing curves and zone entrance transforms
//!
//! Pure numeric helpers shared by the renderer and the collision resolver
//! (the wobble factor deforms collision boundaries too).

use glam::Vec2;

use super::state::AnimationKind;

pub fn ease_out_back(x: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;
    1.0 + C3 * (x - 1.0).powi(3) + C1 * (x - 1.0).powi(2)
}

pub fn ease_out_cubic(x: f32) -> f32 {
    1.0 - (1.0 - x).powi(3)
}

pub fn ease_elastic(x: f32) -> f32 {
    const C4: f32 = std::f32::consts::TAU / 3.0;
    if x == 0.0 {
        0.0
    } else if x == 1.0 {
        1.0
    } else {
        2.0_f32.powf(-10.0 * x) * ((x * 10.0 - 0.75) * C4).sin() + 1.0
    }
}

/// How a zone is drawn (and collided) at a given animation progress
#[derive(Debug, Clone, Copy)]
pub struct ZoneTransform {
    pub scale: f32,
    pub opacity: f32,
    pub offset: Vec2,
    /// Outline deformation amplitude; nonzero only mid-wobble
    pub wobble_factor: f32,
}

impl ZoneTransform {
    const IDENTITY: Self = Self {
        scale: 1.0,
        opacity: 1.0,
        offset: Vec2::ZERO,
        wobble_factor: 0.0,
    };
}

/// Compute the entrance (or fade-out) transform for a zone
///
/// `progress` runs 0..=1 over the animation window; `anim_time` is the
/// cumulative game clock in ms, used to phase the wobble oscillation.
pub fn zone_transform(
    kind: AnimationKind,
    progress: f32,
    slide_offset: Vec2,
    anim_time: f64,
    fading_out: bool,
) -> ZoneTransform {
    if fading_out {
        return ZoneTransform {
            opacity: 1.0 - progress,
            ..ZoneTransform::IDENTITY
        };
    }

    let mut transform = ZoneTransform::IDENTITY;
    match kind {
        AnimationKind::FadeIn => {
            transform.opacity = progress;
        }
        AnimationKind::Grow => {
            transform.scale = ease_out_back(progress);
        }
        AnimationKind::Ripple => {
            transform.scale = ease_elastic(progress);
            transform.opacity = (progress * 1.5).min(1.0);
        }
        AnimationKind::Slide => {
            let slide = ease_out_cubic(progress);
            transform.offset = slide_offset * (1.0 - slide);
            transform.opacity = if progress < 0.2 { progress * 5.0 } else { 1.0 };
        }
        AnimationKind::Wobble => {
            transform.scale = if progress < 1.0 {
                ease_out_back(progress)
            } else {
                1.0
            };
            transform.wobble_factor = (1.0 - progress) * 0.3 * (anim_time as f32 / 50.0).sin();
        }
    }
    transform
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_easing_endpoints() {
        for ease in [ease_out_back, ease_out_cubic, ease_elastic] {
            assert!(ease(0.0).abs() < 1e-4);
            assert!((ease(1.0) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_slide_transform_returns_to_origin() {
        let offset = Vec2::new(300.0, -150.0);
        let t0 = zone_transform(AnimationKind::Slide, 0.0, offset, 0.0, false);
        let t1 = zone_transform(AnimationKind::Slide, 1.0, offset, 0.0, false);
        assert!((t0.offset - offset).length() < 1e-3);
        assert!(t1.offset.length() < 1e-3);
        assert!((t1.opacity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_wobble_factor_zero_at_full_progress() {
        // Collision resolution evaluates transforms at progress 1
        for ms in [0.0, 123.0, 4567.0] {
            let t = zone_transform(AnimationKind::Wobble, 1.0, Vec2::ZERO, ms, false);
            assert_eq!(t.wobble_factor, 0.0);
        }
    }

    #[test]
    fn test_fade_out_only_touches_opacity() {
        let t = zone_transform(AnimationKind::Grow, 0.4, Vec2::new(50.0, 50.0), 99.0, true);
        assert!((t.scale - 1.0).abs() < 1e-6);
        assert!((t.opacity - 0.6).abs() < 1e-6);
        assert_eq!(t.offset, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_cubic_monotonic_and_bounded(a in 0.0f32..1.0, b in 0.0f32..1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ease_out_cubic(lo) <= ease_out_cubic(hi) + 1e-6);
            prop_assert!((0.0..=1.0 + 1e-6).contains(&ease_out_cubic(a)));
        }

        #[test]
        fn prop_wobble_amplitude_bounded(progress in 0.0f32..1.0, ms in 0.0f64..100_000.0) {
            let t = zone_transform(AnimationKind::Wobble, progress, Vec2::ZERO, ms, false);
            prop_assert!(t.wobble_factor.abs() <= 0.3 + 1e-6);
        }
    }
}
