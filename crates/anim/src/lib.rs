#![warn(missing_docs)]
//! Time-based interpolation of layout transitions.
//!
//! An [`AnimationState`] is a plain value: beginning one allocates nothing
//! external and advancing one is a pure step, so any scheduler that can
//! supply per-tick deltas can drive it. The authoritative layout is never
//! touched — interpolated values are merged over it at synchronization time
//! and the state converges to the target, which then becomes the baseline
//! for any future transition.

pub mod easing;
pub mod state;

pub use easing::{Easing, Interpolation};
pub use state::{AnimProp, AnimValues, AnimationConfig, AnimationState};
