//! Error taxonomy for the synchronization pipeline.

use thiserror::Error;

/// Pipeline errors, from per-node style problems to per-pass layout failures.
///
/// Only `LayoutShapeMismatch` aborts anything, and then only the current
/// layout pass: the previous descriptors stay live and the pass is retried.
/// Everything else degrades locally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An attribute value could not be resolved; the node keeps no fill.
    #[error("cannot resolve style attribute {attribute}: {value:?}")]
    StyleResolution {
        /// Attribute name as declared.
        attribute: &'static str,
        /// The value that failed to resolve.
        value: String,
    },

    /// The rectangle tree returned by the layout engine does not match the
    /// style tree that produced it.
    #[error("layout tree shape mismatch at depth {depth}: {expected} style children, {actual} rects")]
    LayoutShapeMismatch {
        /// Tree depth at which the shapes diverged.
        depth: usize,
        /// Child count in the style tree.
        expected: usize,
        /// Child count in the rectangle tree.
        actual: usize,
    },

    /// Unrecognized easing or interpolation identifier; falls back to linear.
    #[error("unrecognized animation identifier {identifier:?}")]
    AnimationConfig {
        /// The identifier that failed to resolve.
        identifier: String,
    },

    /// A pointer's identity or ray was malformed; that pointer is skipped
    /// for the tick.
    #[error("malformed pointer ray for {id:?}")]
    PointerReconcile {
        /// Pointer identity as supplied.
        id: String,
    },
}
