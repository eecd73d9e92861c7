//! Layout-rectangle to scene-node synchronization.

use crate::node::{Extent, Material, PaintNode, PlaneGeometry, SceneNode};
use flexspace_layout::LayoutRect;
use glam::Vec3;

/// Convert a resolved rectangle (plus paint attributes) into a scene node,
/// recursively.
///
/// The coordinate system is centered on the parent's box because the scene
/// graph's origin convention is center-based: flex `left`/`top` offsets are
/// converted, and the vertical axis is flipped (flex top grows downward,
/// scene y grows upward).
///
/// ```text
/// x = (rect.width  - parent.width ) / 2 + rect.left
/// y = (parent.height - rect.height) / 2 - rect.top
/// z = elevation                     (absolute, never summed with ancestors)
/// ```
///
/// The returned tree is a complete replacement for the node's previous
/// descriptor; nothing is patched in place.
pub fn synchronize(rect: &LayoutRect, paint: &PaintNode, parent: Extent) -> SceneNode {
    debug_assert_eq!(
        rect.children.len(),
        paint.children.len(),
        "rect and paint trees must be congruent"
    );

    let geometry = PlaneGeometry {
        width: rect.width,
        height: rect.height,
    };
    let material = Material::from_paint(paint);
    let position = Vec3::new(
        (rect.width - parent.width) / 2.0 + rect.left,
        (parent.height - rect.height) / 2.0 - rect.top,
        paint.elevation,
    );

    let own_extent = Extent {
        width: rect.width,
        height: rect.height,
    };
    let children = rect
        .children
        .iter()
        .zip(&paint.children)
        .map(|(child_rect, child_paint)| synchronize(child_rect, child_paint, own_extent))
        .collect();

    SceneNode {
        geometry,
        material,
        position,
        children,
    }
}
