//! typegrid Animation System
//!
//! Deterministic, per-cell motion for grid cells.
//!
//! # Features
//!
//! - **Motion curves**: sway, bounce, rotate, and pulse as pure functions of
//!   elapsed time, intensity, and speed
//! - **CellAnimation**: the idle/stopped/playing state machine a cell owns
//! - **FrameClock**: host timestamps to clamped frame deltas
//!
//! Animations only ever produce an offset. Cell geometry stays untouched.

pub mod cell_animation;
pub mod clock;
pub mod motion;

pub use cell_animation::{AnimationState, CellAnimation};
pub use clock::FrameClock;
pub use motion::{
    compute_offset, offset_at_phase, phase_at, AnimationType, UnknownAnimationType,
    BASE_FREQUENCY,
};
