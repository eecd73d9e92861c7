//! Adapter over the external flex engine.
//!
//! Each [`compute`] call builds a fresh engine tree, runs the flex
//! algorithm, and snapshots the results into an owned [`LayoutRect`] tree.
//! The engine is free to mutate its own tree in place; none of that state
//! survives the call, so callers never observe a partially computed layout
//! and node ids are never reused across passes.

use crate::tree::{LayoutRect, StyleNode};
use flexspace_core::{style, Style};
use taffy::{AvailableSpace, Dimension, LengthPercentage, LengthPercentageAuto, TaffyTree};
use thiserror::Error;
use tracing::trace;

/// Failures of a single layout pass.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The flex engine rejected the tree.
    #[error("flex engine failure: {0}")]
    Engine(#[from] taffy::TaffyError),
    /// The output tree's shape diverged from the input style tree.
    #[error(transparent)]
    Shape(flexspace_core::Error),
}

/// Run the flex algorithm over `tree`, returning a congruent rectangle tree.
///
/// Pure and deterministic: identical inputs produce bit-identical outputs.
pub fn compute(tree: &StyleNode) -> Result<LayoutRect, LayoutError> {
    let mut taffy: TaffyTree<()> = TaffyTree::new();
    taffy.disable_rounding();

    let built = build(&mut taffy, tree)?;

    let available = taffy::Size {
        width: tree
            .style
            .width
            .map(AvailableSpace::Definite)
            .unwrap_or(AvailableSpace::MaxContent),
        height: tree
            .style
            .height
            .map(AvailableSpace::Definite)
            .unwrap_or(AvailableSpace::MaxContent),
    };
    taffy.compute_layout(built.id, available)?;

    let rects = snapshot(&taffy, &built)?;
    rects.check_congruent(tree).map_err(LayoutError::Shape)?;
    trace!(nodes = tree.node_count(), "layout pass complete");
    Ok(rects)
}

/// Engine-side mirror of the style tree, kept only for the snapshot walk.
struct BuiltNode {
    id: taffy::NodeId,
    children: Vec<BuiltNode>,
}

fn build(taffy: &mut TaffyTree<()>, node: &StyleNode) -> Result<BuiltNode, taffy::TaffyError> {
    let children = node
        .children
        .iter()
        .map(|child| build(taffy, child))
        .collect::<Result<Vec<_>, _>>()?;
    let child_ids: Vec<taffy::NodeId> = children.iter().map(|c| c.id).collect();
    let id = taffy.new_with_children(to_taffy(&node.style), &child_ids)?;
    Ok(BuiltNode { id, children })
}

fn snapshot(taffy: &TaffyTree<()>, built: &BuiltNode) -> Result<LayoutRect, taffy::TaffyError> {
    let layout = taffy.layout(built.id)?;
    Ok(LayoutRect {
        left: layout.location.x,
        top: layout.location.y,
        width: layout.size.width,
        height: layout.size.height,
        children: built
            .children
            .iter()
            .map(|child| snapshot(taffy, child))
            .collect::<Result<Vec<_>, _>>()?,
    })
}

/// Map declared attributes onto the engine's style type.
///
/// Two shorthand rules follow the box-model semantics the declared styles
/// assume: an unset `flex_direction` means column, and `flex: n` with
/// positive `n` is a growth factor with a zero basis.
fn to_taffy(style: &Style) -> taffy::Style {
    let mut out = taffy::Style::default();

    out.flex_direction = match style.flex_direction.unwrap_or(style::FlexDirection::Column) {
        style::FlexDirection::Row => taffy::FlexDirection::Row,
        style::FlexDirection::RowReverse => taffy::FlexDirection::RowReverse,
        style::FlexDirection::Column => taffy::FlexDirection::Column,
        style::FlexDirection::ColumnReverse => taffy::FlexDirection::ColumnReverse,
    };
    out.justify_content = style.justify_content.map(|justify| match justify {
        style::JustifyContent::FlexStart => taffy::JustifyContent::FlexStart,
        style::JustifyContent::Center => taffy::JustifyContent::Center,
        style::JustifyContent::FlexEnd => taffy::JustifyContent::FlexEnd,
        style::JustifyContent::SpaceBetween => taffy::JustifyContent::SpaceBetween,
        style::JustifyContent::SpaceAround => taffy::JustifyContent::SpaceAround,
    });
    out.align_items = style.align_items.map(|align| match align {
        style::AlignItems::FlexStart => taffy::AlignItems::FlexStart,
        style::AlignItems::Center => taffy::AlignItems::Center,
        style::AlignItems::FlexEnd => taffy::AlignItems::FlexEnd,
        style::AlignItems::Stretch => taffy::AlignItems::Stretch,
    });
    out.align_self = style.align_self.and_then(|align| match align {
        style::AlignSelf::Auto => None,
        style::AlignSelf::FlexStart => Some(taffy::AlignSelf::FlexStart),
        style::AlignSelf::Center => Some(taffy::AlignSelf::Center),
        style::AlignSelf::FlexEnd => Some(taffy::AlignSelf::FlexEnd),
        style::AlignSelf::Stretch => Some(taffy::AlignSelf::Stretch),
    });

    if let Some(flex) = style.flex {
        if flex > 0.0 {
            out.flex_grow = flex;
            out.flex_basis = Dimension::Length(0.0);
        }
    }

    out.size = taffy::Size {
        width: dimension(style.width),
        height: dimension(style.height),
    };
    out.min_size.width = dimension(style.min_width);
    out.max_size.width = dimension(style.max_width);

    out.margin = taffy::Rect {
        left: LengthPercentageAuto::Length(style.margin.resolve_left()),
        right: LengthPercentageAuto::Length(style.margin.resolve_right()),
        top: LengthPercentageAuto::Length(style.margin.resolve_top()),
        bottom: LengthPercentageAuto::Length(style.margin.resolve_bottom()),
    };
    out.padding = taffy::Rect {
        left: LengthPercentage::Length(style.padding.resolve_left()),
        right: LengthPercentage::Length(style.padding.resolve_right()),
        top: LengthPercentage::Length(style.padding.resolve_top()),
        bottom: LengthPercentage::Length(style.padding.resolve_bottom()),
    };
    out.border = taffy::Rect {
        left: LengthPercentage::Length(style.border_width.resolve_left()),
        right: LengthPercentage::Length(style.border_width.resolve_right()),
        top: LengthPercentage::Length(style.border_width.resolve_top()),
        bottom: LengthPercentage::Length(style.border_width.resolve_bottom()),
    };
    out.inset = taffy::Rect {
        left: inset(style.left),
        right: inset(style.right),
        top: inset(style.top),
        bottom: inset(style.bottom),
    };

    out
}

fn dimension(value: Option<f32>) -> Dimension {
    value.map(Dimension::Length).unwrap_or(Dimension::Auto)
}

fn inset(value: Option<f32>) -> LengthPercentageAuto {
    value
        .map(LengthPercentageAuto::Length)
        .unwrap_or(LengthPercentageAuto::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_100x100(children: Vec<StyleNode>) -> StyleNode {
        StyleNode::with_children(Style::default().with_size(100.0, 100.0), children)
    }

    #[test]
    fn test_column_flex_split() {
        let tree = root_100x100(vec![
            StyleNode::leaf(Style::default().with_flex(1.0)),
            StyleNode::leaf(Style::default().with_flex(1.0)),
        ]);
        let rects = compute(&tree).expect("layout");

        assert_eq!(rects.width, 100.0);
        assert_eq!(rects.height, 100.0);
        assert_eq!(rects.children.len(), 2);
        assert_eq!(rects.children[0].height, 50.0);
        assert_eq!(rects.children[1].height, 50.0);
        assert_eq!(rects.children[0].top, 0.0);
        assert_eq!(rects.children[1].top, 50.0);
    }

    #[test]
    fn test_unset_direction_defaults_to_column() {
        // Two fixed-height children must stack vertically, not side by side.
        let tree = root_100x100(vec![
            StyleNode::leaf(Style::default().with_size(10.0, 10.0)),
            StyleNode::leaf(Style::default().with_size(10.0, 10.0)),
        ]);
        let rects = compute(&tree).expect("layout");
        assert_eq!(rects.children[0].top, 0.0);
        assert_eq!(rects.children[1].top, 10.0);
        assert_eq!(rects.children[1].left, 0.0);
    }

    #[test]
    fn test_padding_offsets_children() {
        let tree = StyleNode::with_children(
            Style::default().with_size(100.0, 100.0).with_padding(10.0),
            vec![StyleNode::leaf(Style::default().with_size(20.0, 20.0))],
        );
        let rects = compute(&tree).expect("layout");
        assert_eq!(rects.children[0].left, 10.0);
        assert_eq!(rects.children[0].top, 10.0);
    }

    #[test]
    fn test_justify_center() {
        let tree = StyleNode::with_children(
            Style::default()
                .with_size(100.0, 100.0)
                .with_justify_content(style::JustifyContent::Center),
            vec![StyleNode::leaf(Style::default().with_size(20.0, 20.0))],
        );
        let rects = compute(&tree).expect("layout");
        assert_eq!(rects.children[0].top, 40.0);
    }

    #[test]
    fn test_relative_offset() {
        let mut child = Style::default().with_size(20.0, 20.0);
        child.left = Some(5.0);
        child.top = Some(7.0);
        let tree = root_100x100(vec![StyleNode::leaf(child)]);
        let rects = compute(&tree).expect("layout");
        assert_eq!(rects.children[0].left, 5.0);
        assert_eq!(rects.children[0].top, 7.0);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let tree = root_100x100(vec![
            StyleNode::leaf(Style::default().with_flex(1.0).with_margin(3.0)),
            StyleNode::with_children(
                Style::default().with_flex(2.0).with_padding(4.0),
                vec![StyleNode::leaf(Style::default().with_flex(1.0))],
            ),
        ]);
        let first = compute(&tree).expect("layout");
        let second = compute(&tree).expect("layout");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_container_is_valid() {
        let rects = compute(&root_100x100(Vec::new())).expect("layout");
        assert!(rects.children.is_empty());
        assert_eq!(rects.width, 100.0);
    }

    #[test]
    fn test_degenerate_zero_size() {
        let tree = StyleNode::leaf(Style::default().with_size(0.0, 0.0));
        let rects = compute(&tree).expect("layout");
        assert_eq!(rects.width, 0.0);
        assert_eq!(rects.height, 0.0);
    }
}
