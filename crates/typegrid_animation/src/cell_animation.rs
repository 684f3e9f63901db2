//! Per-cell animation state
//!
//! A cell owns at most one [`CellAnimation`]. The animation never touches the
//! cell's bounds; it only produces a visual offset that renderers add to the
//! bounds at draw time.
//!
//! ```text
//!   idle ──set──► stopped ──play──► playing
//!    ▲               ▲                 │
//!    │               └─────pause───────┘
//!    └──────────── remove (any state)
//! ```
//!
//! "Idle" is the absence of a `CellAnimation` (`Option::None` on the cell).

use std::f32::consts::TAU;

use typegrid_core::Vec2;

use crate::motion::{offset_at_phase, AnimationType, BASE_FREQUENCY};

/// Observable state of a cell's animation slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    /// No animation assigned
    Idle,
    /// Assigned but not running; offset is zero
    Stopped,
    /// Running; offset advances every tick
    Playing,
}

impl AnimationState {
    /// State of an optional animation slot
    pub fn of(animation: Option<&CellAnimation>) -> Self {
        match animation {
            None => AnimationState::Idle,
            Some(anim) if anim.is_playing() => AnimationState::Playing,
            Some(_) => AnimationState::Stopped,
        }
    }
}

/// Time-driven positional offset for one cell
#[derive(Clone, Debug, PartialEq)]
pub struct CellAnimation {
    animation_type: AnimationType,
    intensity: f32,
    speed: f32,
    is_playing: bool,
    /// Accumulated phase in radians, kept in `0..TAU`
    phase: f32,
    offset: Vec2,
}

impl CellAnimation {
    /// Create a stopped animation. Negative or non-finite parameters clamp to 0.
    pub fn new(animation_type: AnimationType, intensity: f32, speed: f32) -> Self {
        Self {
            animation_type,
            intensity: sanitize(intensity),
            speed: sanitize(speed),
            is_playing: false,
            phase: 0.0,
            offset: Vec2::ZERO,
        }
    }

    /// Restore an animation with an explicit play state
    pub fn with_playing(mut self, playing: bool) -> Self {
        self.is_playing = playing;
        self
    }

    pub fn animation_type(&self) -> AnimationType {
        self.animation_type
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn state(&self) -> AnimationState {
        AnimationState::of(Some(self))
    }

    /// Current phase angle in radians
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Offset computed by the most recent tick
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Change the amplitude. Applies on the next tick; phase is kept.
    ///
    /// Returns false (and leaves the value untouched) for non-finite input.
    pub fn set_intensity(&mut self, intensity: f32) -> bool {
        if !intensity.is_finite() {
            tracing::warn!(intensity, "ignoring non-finite animation intensity");
            return false;
        }
        self.intensity = intensity.max(0.0);
        true
    }

    /// Change the speed multiplier. Applies on the next tick; phase is kept.
    pub fn set_speed(&mut self, speed: f32) -> bool {
        if !speed.is_finite() {
            tracing::warn!(speed, "ignoring non-finite animation speed");
            return false;
        }
        self.speed = speed.max(0.0);
        true
    }

    /// Start (or resume) producing offsets
    pub fn play(&mut self) {
        self.is_playing = true;
    }

    /// Stop and return to rest: offset and phase go back to zero
    pub fn pause(&mut self) {
        self.is_playing = false;
        self.phase = 0.0;
        self.offset = Vec2::ZERO;
    }

    /// Advance by `dt` seconds and return the new offset
    ///
    /// A stopped animation stays at rest. Negative or non-finite deltas are
    /// treated as zero.
    pub fn tick(&mut self, dt: f32) -> Vec2 {
        if !self.is_playing {
            return self.offset;
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.phase = (self.phase + TAU * BASE_FREQUENCY * self.speed * dt).rem_euclid(TAU);
        self.offset = offset_at_phase(self.animation_type, self.intensity, self.phase);
        tracing::trace!(
            kind = %self.animation_type,
            phase = self.phase,
            x = self.offset.x,
            y = self.offset.y,
            "animation tick"
        );
        self.offset
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
