#![warn(missing_docs)]
//! Resolved scene-node descriptors and the rectangle-to-node synchronizer.
//!
//! A [`SceneNode`] carries everything a renderer needs for one layout
//! rectangle: planar geometry, a material, a parent-relative x/y position
//! with an absolute z elevation, and its children. Descriptors are derived
//! values — synchronization always produces a fresh tree for the affected
//! subtree, so a render in flight keeps a consistent snapshot.

pub mod node;
pub mod sync;

pub use node::{Extent, Material, PaintNode, PlaneGeometry, SceneNode, TextureHandle, TextureSlot};
pub use sync::synchronize;
