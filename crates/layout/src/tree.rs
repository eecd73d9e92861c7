//! The two tree shapes flanking the layout engine boundary.

use flexspace_core::{Error, Style};

/// One node of the style tree handed to the layout engine.
///
/// Built fresh on every layout-triggering update; no identity persists
/// across rebuilds, so comparisons are always structural.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleNode {
    /// The element's declared attributes, copied verbatim.
    pub style: Style,
    /// Layout-participating children in declaration order.
    pub children: Vec<StyleNode>,
}

impl StyleNode {
    /// A node with the given style and no children.
    pub fn leaf(style: Style) -> Self {
        Self {
            style,
            children: Vec::new(),
        }
    }

    /// A node with the given style and children.
    pub fn with_children(style: Style, children: Vec<StyleNode>) -> Self {
        Self { style, children }
    }

    /// Total node count including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(StyleNode::node_count).sum::<usize>()
    }
}

/// One resolved rectangle, congruent in shape and order to the style tree
/// it was computed from.
///
/// `left`/`top` of every non-root rectangle are relative to its parent's
/// box; converting to an absolute 3D position additionally needs the parent
/// extent and a per-node elevation, which is the scene synchronizer's job.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutRect {
    /// Offset from the parent's left edge.
    pub left: f32,
    /// Offset from the parent's top edge (downward).
    pub top: f32,
    /// Resolved width.
    pub width: f32,
    /// Resolved height.
    pub height: f32,
    /// Child rectangles in the style tree's child order.
    pub children: Vec<LayoutRect>,
}

impl LayoutRect {
    /// True when this rectangle's own values equal `other`'s, children
    /// ignored. Change detection compares node-locally; subtree changes
    /// surface on the subtree's own nodes.
    pub fn same_rect(&self, other: &LayoutRect) -> bool {
        self.left == other.left
            && self.top == other.top
            && self.width == other.width
            && self.height == other.height
    }

    /// Verify this tree is congruent in shape with `style`.
    ///
    /// Returns the first divergence as a [`Error::LayoutShapeMismatch`];
    /// a mismatch is fatal for the layout pass that produced it.
    pub fn check_congruent(&self, style: &StyleNode) -> Result<(), Error> {
        fn walk(rect: &LayoutRect, style: &StyleNode, depth: usize) -> Result<(), Error> {
            if rect.children.len() != style.children.len() {
                return Err(Error::LayoutShapeMismatch {
                    depth,
                    expected: style.children.len(),
                    actual: rect.children.len(),
                });
            }
            for (r, s) in rect.children.iter().zip(&style.children) {
                walk(r, s, depth + 1)?;
            }
            Ok(())
        }
        walk(self, style, 0)
    }
}
