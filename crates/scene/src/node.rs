//! Descriptor types consumed by the renderer boundary.

use flexspace_core::{color, Color};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Opaque handle to a texture owned by the host renderer.
pub type TextureHandle = u64;

/// Content texture state for leaf nodes.
///
/// Content loading is the host's job; while a texture is pending the node
/// renders with a placeholder material, and readiness refreshes only the
/// material — geometry and position are untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureSlot {
    /// No texture; the fill (if any) is the whole material.
    #[default]
    None,
    /// Content requested but not yet available.
    Pending,
    /// Content ready under the host's handle.
    Ready(TextureHandle),
}

/// Planar geometry sized to a layout rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaneGeometry {
    /// Width, copied directly from the resolved rectangle.
    pub width: f32,
    /// Height, copied directly from the resolved rectangle.
    pub height: f32,
}

/// Width/height of a parent box, for centering children.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    /// Parent width.
    pub width: f32,
    /// Parent height.
    pub height: f32,
}

/// Paint-relevant view of one layout-participating element.
///
/// Congruent in shape with the style and rectangle trees; the frame driver
/// rebuilds it in the same walk that builds the style tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaintNode {
    /// Background fill attribute, unresolved.
    pub background_color: Option<String>,
    /// Resolved opacity.
    pub opacity: f32,
    /// Node-local z depth. Absolute: never summed with ancestors.
    pub elevation: f32,
    /// Content texture state.
    pub texture: TextureSlot,
    /// Render both faces (image and text content).
    pub double_sided: bool,
    /// Children in layout order.
    pub children: Vec<PaintNode>,
}

impl PaintNode {
    /// A paint node with default (invisible) fill and full opacity.
    pub fn plain() -> Self {
        Self {
            opacity: 1.0,
            ..Default::default()
        }
    }
}

/// Material reflecting a node's fill, opacity and content state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Resolved fill color; `None` leaves the renderer default, an
    /// effectively invisible fill with no texture.
    pub color: Option<Color>,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Whether the renderer must alpha-blend this node.
    pub transparent: bool,
    /// Content texture.
    pub map: TextureSlot,
    /// Render both faces.
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: None,
            opacity: 1.0,
            transparent: false,
            map: TextureSlot::None,
            double_sided: false,
        }
    }
}

impl Material {
    /// Build the material for a paint node.
    ///
    /// An unresolvable `background_color` is a per-node style error: it is
    /// logged and the fill stays undefined, siblings and ancestors proceed.
    pub fn from_paint(paint: &PaintNode) -> Self {
        let mut material = Material::default();

        if paint.opacity < 1.0 {
            material.transparent = true;
            material.opacity = paint.opacity;
        }

        if let Some(value) = &paint.background_color {
            match color::parse(value) {
                Some(resolved) => material.color = Some(resolved),
                None => {
                    let err = flexspace_core::Error::StyleResolution {
                        attribute: "backgroundColor",
                        value: value.clone(),
                    };
                    warn!(%err, "node keeps no fill");
                }
            }
        }

        match paint.texture {
            TextureSlot::None => {}
            slot => {
                // Content nodes blend and show both faces even while the
                // texture is still pending.
                material.map = slot;
                material.transparent = true;
                material.double_sided = paint.double_sided;
            }
        }

        material
    }
}

/// Everything the renderer needs for one layout rectangle.
///
/// Positions are parent-relative on x/y; z is the node's absolute
/// elevation. Descriptor trees are replaced wholesale per affected subtree,
/// never mutated in place — the single exception is a content-readiness
/// material refresh, which swaps only the `material` value.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Planar geometry sized to the rectangle.
    pub geometry: PlaneGeometry,
    /// Resolved material.
    pub material: Material,
    /// Offset from the parent's center; `z` is absolute elevation.
    pub position: Vec3,
    /// Children in layout order.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Total node count including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }

    /// Immutable lookup by child-index path.
    pub fn descendant(&self, path: &[usize]) -> Option<&SceneNode> {
        let mut node = self;
        for &index in path {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    /// Mutable lookup by child-index path.
    pub fn descendant_mut(&mut self, path: &[usize]) -> Option<&mut SceneNode> {
        let mut node = self;
        for &index in path {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }
}
