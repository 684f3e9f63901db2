//! Motion curves
//!
//! Every curve is a pure function of a phase angle and an intensity. Phase is
//! derived from elapsed time and speed, so the same inputs always produce the
//! same offset.

use std::f32::consts::{FRAC_1_SQRT_2, TAU};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use typegrid_core::Vec2;

/// Oscillation frequency at speed 1.0, in cycles per second
pub const BASE_FREQUENCY: f32 = 0.5;

/// The kind of motion applied to a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationType {
    #[default]
    None,
    /// Horizontal side-to-side swing
    Sway,
    /// Upward hops returning to rest
    Bounce,
    /// Circular orbit starting at the rest position
    Rotate,
    /// Diagonal breathing in and out
    Pulse,
}

impl AnimationType {
    pub const ALL: [AnimationType; 5] = [
        AnimationType::None,
        AnimationType::Sway,
        AnimationType::Bounce,
        AnimationType::Rotate,
        AnimationType::Pulse,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnimationType::None => "none",
            AnimationType::Sway => "sway",
            AnimationType::Bounce => "bounce",
            AnimationType::Rotate => "rotate",
            AnimationType::Pulse => "pulse",
        }
    }
}

impl fmt::Display for AnimationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an animation name that does not exist
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown animation type: {0}")]
pub struct UnknownAnimationType(pub String);

impl FromStr for AnimationType {
    type Err = UnknownAnimationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimationType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownAnimationType(s.to_string()))
    }
}

/// Phase angle (radians) reached after `elapsed` seconds at `speed`
pub fn phase_at(speed: f32, elapsed: f32) -> f32 {
    TAU * BASE_FREQUENCY * speed * elapsed
}

/// Offset produced by `animation_type` at a given phase angle
pub fn offset_at_phase(animation_type: AnimationType, intensity: f32, phase: f32) -> Vec2 {
    if intensity == 0.0 {
        return Vec2::ZERO;
    }

    match animation_type {
        AnimationType::None => Vec2::ZERO,
        AnimationType::Sway => Vec2::new(intensity * phase.sin(), 0.0),
        AnimationType::Bounce => Vec2::new(0.0, -intensity * phase.sin().abs()),
        AnimationType::Rotate => {
            Vec2::new(intensity * phase.sin(), intensity * (1.0 - phase.cos()))
        }
        AnimationType::Pulse => {
            let d = intensity * phase.sin() * FRAC_1_SQRT_2;
            Vec2::new(d, d)
        }
    }
}

/// Offset for `animation_type` after `elapsed` seconds
///
/// Pure and deterministic: identical arguments always yield identical output.
pub fn compute_offset(
    animation_type: AnimationType,
    intensity: f32,
    speed: f32,
    elapsed: f32,
) -> Vec2 {
    offset_at_phase(animation_type, intensity, phase_at(speed, elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    /// Seconds for a quarter cycle at the given speed
    fn quarter_cycle(speed: f32) -> f32 {
        0.25 / (BASE_FREQUENCY * speed)
    }

    #[test]
    fn test_sway_starts_at_rest() {
        let offset = compute_offset(AnimationType::Sway, 20.0, 1.0, 0.0);
        assert_eq!(offset, Vec2::ZERO);
    }

    #[test]
    fn test_sway_quarter_cycle_reaches_intensity() {
        let offset = compute_offset(AnimationType::Sway, 20.0, 1.0, quarter_cycle(1.0));
        assert!((offset.length() - 20.0).abs() < EPSILON);
        assert!((offset.x - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_speed_scales_the_cycle() {
        let fast = compute_offset(AnimationType::Sway, 10.0, 2.0, quarter_cycle(2.0));
        assert!((fast.x - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_intensity_is_always_zero() {
        for kind in AnimationType::ALL {
            for step in 0..50 {
                let t = step as f32 * 0.137;
                assert_eq!(compute_offset(kind, 0.0, 1.7, t), Vec2::ZERO, "{kind} at {t}");
            }
        }
    }

    #[test]
    fn test_offsets_are_deterministic() {
        for kind in AnimationType::ALL {
            let a = compute_offset(kind, 12.5, 1.3, 3.21);
            let b = compute_offset(kind, 12.5, 1.3, 3.21);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_bounce_only_moves_up() {
        for step in 0..40 {
            let offset = compute_offset(AnimationType::Bounce, 15.0, 1.0, step as f32 * 0.1);
            assert_eq!(offset.x, 0.0);
            assert!(offset.y <= 0.0);
        }
    }

    #[test]
    fn test_rotate_orbit_returns_to_rest() {
        let full_cycle = 1.0 / BASE_FREQUENCY;
        let offset = compute_offset(AnimationType::Rotate, 10.0, 1.0, full_cycle);
        assert!(offset.length() < EPSILON);

        let half = compute_offset(AnimationType::Rotate, 10.0, 1.0, full_cycle / 2.0);
        assert!((half.y - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_pulse_magnitude_matches_intensity() {
        let offset = compute_offset(AnimationType::Pulse, 8.0, 1.0, quarter_cycle(1.0));
        assert!((offset.length() - 8.0).abs() < EPSILON);
        assert_eq!(offset.x, offset.y);
    }

    #[test]
    fn test_parse_animation_type() {
        assert_eq!("sway".parse::<AnimationType>(), Ok(AnimationType::Sway));
        assert_eq!(" Pulse ".parse::<AnimationType>(), Ok(AnimationType::Pulse));
        assert!("wobble".parse::<AnimationType>().is_err());
        for kind in AnimationType::ALL {
            assert_eq!(kind.as_str().parse::<AnimationType>(), Ok(kind));
        }
    }
}
