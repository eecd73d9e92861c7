#![warn(missing_docs)]
//! Pointer-ray intersection against the resolved scene tree.
//!
//! One [`Raycaster`] exists per active pointer identity; the
//! [`PointerManager`] keeps that mapping exactly in sync with the set of
//! pointers supplied each tick and reports the nearest hit per pointer.

pub mod manager;
pub mod raycaster;

pub use manager::{PointerManager, PointerState};
pub use raycaster::{RayHit, Raycaster};
