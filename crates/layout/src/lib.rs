#![warn(missing_docs)]
//! Flex layout: style trees in, rectangle trees out.
//!
//! The flex arithmetic itself is delegated to [`taffy`]; this crate owns the
//! tree shapes on both sides of that boundary and the adapter between them.
//! A layout pass is pure: the same style tree always produces the same
//! rectangle tree, and callers never observe engine-internal state.

pub mod engine;
pub mod tree;

pub use engine::{compute, LayoutError};
pub use tree::{LayoutRect, StyleNode};
