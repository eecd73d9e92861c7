//! Mirrors the declarative element tree into the pipeline's tree shapes.
//!
//! One walk produces all three congruent trees: the style tree handed to
//! the layout engine, the paint tree consumed by the scene synchronizer,
//! and the handle tree the driver uses to address nodes. Building them in
//! a single pass is what guarantees their shapes can never diverge.

use crate::element::{Element, ElementHandle, ElementKind, ROOT_HANDLE};
use flexspace_core::Style;
use flexspace_layout::StyleNode;
use flexspace_scene::PaintNode;

/// Element handles arranged congruently with the style tree.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleNode {
    /// The element's handle ([`ROOT_HANDLE`] for the synthesized root).
    pub handle: ElementHandle,
    /// Children in layout order.
    pub children: Vec<HandleNode>,
}

impl HandleNode {
    /// Child-index path to `handle`, if it is in this tree.
    pub fn path_to(&self, handle: ElementHandle) -> Option<Vec<usize>> {
        if self.handle == handle {
            return Some(Vec::new());
        }
        for (index, child) in self.children.iter().enumerate() {
            if let Some(mut path) = child.path_to(handle) {
                path.insert(0, index);
                return Some(path);
            }
        }
        None
    }
}

/// The three congruent trees produced from one element-tree walk.
#[derive(Debug, Clone)]
pub struct BuiltTrees {
    /// Input to the layout engine.
    pub style: StyleNode,
    /// Input to the scene synchronizer.
    pub paint: PaintNode,
    /// Node addressing for the driver.
    pub handles: HandleNode,
}

/// Build all three trees under a synthesized root of the given extent.
///
/// The externally assigned width/height become the root's style; the user
/// element hangs underneath. Non-participating elements are walked through:
/// their participating descendants surface in the nearest participating
/// ancestor's child list, in declaration order.
pub fn build_trees(root: &Element, width: f32, height: f32) -> BuiltTrees {
    let mut style_children = Vec::new();
    let mut paint_children = Vec::new();
    let mut handle_children = Vec::new();
    collect_participating(
        std::slice::from_ref(root),
        &mut style_children,
        &mut paint_children,
        &mut handle_children,
    );

    BuiltTrees {
        style: StyleNode::with_children(
            Style::default().with_size(width, height),
            style_children,
        ),
        paint: PaintNode {
            children: paint_children,
            ..PaintNode::plain()
        },
        handles: HandleNode {
            handle: ROOT_HANDLE,
            children: handle_children,
        },
    }
}

/// Build just the style tree, for callers that run layout themselves.
pub fn build_style_tree(root: &Element, width: f32, height: f32) -> StyleNode {
    build_trees(root, width, height).style
}

fn collect_participating(
    elements: &[Element],
    style_out: &mut Vec<StyleNode>,
    paint_out: &mut Vec<PaintNode>,
    handle_out: &mut Vec<HandleNode>,
) {
    for element in elements {
        if let Some((style, paint, handles)) = build_node(element) {
            style_out.push(style);
            paint_out.push(paint);
            handle_out.push(handles);
        } else {
            // Walk through the non-participating wrapper to any
            // participating descendants.
            collect_participating(&element.children, style_out, paint_out, handle_out);
        }
    }
}

fn build_node(element: &Element) -> Option<(StyleNode, PaintNode, HandleNode)> {
    if !element.participates_in_layout() {
        return None;
    }

    let mut style_children = Vec::new();
    let mut paint_children = Vec::new();
    let mut handle_children = Vec::new();
    collect_participating(
        &element.children,
        &mut style_children,
        &mut paint_children,
        &mut handle_children,
    );

    let style = StyleNode::with_children(element.style.clone(), style_children);
    let paint = PaintNode {
        background_color: element.style.background_color.clone(),
        opacity: element.style.resolved_opacity(),
        elevation: element.elevation,
        texture: element.texture(),
        double_sided: matches!(
            element.kind,
            ElementKind::Image { .. } | ElementKind::Text { .. }
        ),
        children: paint_children,
    };
    let handles = HandleNode {
        handle: element.handle(),
        children: handle_children,
    };
    Some((style, paint, handles))
}

/// The paint view of a single element, for material-only refreshes.
pub fn element_paint(element: &Element) -> PaintNode {
    PaintNode {
        background_color: element.style.background_color.clone(),
        opacity: element.style.resolved_opacity(),
        elevation: element.elevation,
        texture: element.texture(),
        double_sided: matches!(
            element.kind,
            ElementKind::Image { .. } | ElementKind::Text { .. }
        ),
        children: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    fn mounted(mut root: Element) -> Element {
        let mut next = 1;
        root.assign_handles(&mut next);
        root
    }

    #[test]
    fn test_root_is_synthesized_with_extent() {
        let root = mounted(Element::layer(Style::default()));
        let trees = build_trees(&root, 100.0, 80.0);
        assert_eq!(trees.style.style.width, Some(100.0));
        assert_eq!(trees.style.style.height, Some(80.0));
        assert_eq!(trees.handles.handle, ROOT_HANDLE);
        assert_eq!(trees.style.children.len(), 1);
    }

    #[test]
    fn test_pointer_anchor_is_walked_through() {
        let root = mounted(
            Element::layer(Style::default()).with_child(
                Element::pointer_anchor()
                    .with_child(Element::layer(Style::default().with_flex(1.0)))
                    .with_child(Element::layer(Style::default().with_flex(2.0))),
            ),
        );
        let trees = build_trees(&root, 100.0, 100.0);

        // The anchor's two layers surface directly under the user root.
        let user_root = &trees.style.children[0];
        assert_eq!(user_root.children.len(), 2);
        assert_eq!(user_root.children[0].style.flex, Some(1.0));
        assert_eq!(user_root.children[1].style.flex, Some(2.0));
    }

    #[test]
    fn test_all_anchor_subtree_is_empty_container() {
        let root = mounted(
            Element::layer(Style::default())
                .with_child(Element::pointer_anchor().with_child(Element::pointer_anchor())),
        );
        let trees = build_trees(&root, 50.0, 50.0);
        assert!(trees.style.children[0].children.is_empty());
        assert!(trees.paint.children[0].children.is_empty());
    }

    #[test]
    fn test_trees_are_congruent() {
        let root = mounted(
            Element::layer(Style::default())
                .with_child(Element::layer(Style::default()))
                .with_child(
                    Element::pointer_anchor().with_child(Element::image("x.png", Style::default())),
                ),
        );
        let trees = build_trees(&root, 10.0, 10.0);

        fn shape(style: &StyleNode) -> Vec<usize> {
            let mut out = vec![style.children.len()];
            for child in &style.children {
                out.extend(shape(child));
            }
            out
        }
        fn paint_shape(paint: &PaintNode) -> Vec<usize> {
            let mut out = vec![paint.children.len()];
            for child in &paint.children {
                out.extend(paint_shape(child));
            }
            out
        }
        assert_eq!(shape(&trees.style), paint_shape(&trees.paint));
    }

    #[test]
    fn test_style_copied_verbatim() {
        // The builder must not default anything; `Element::text` leaves
        // layout attributes unset and they stay unset.
        let root = mounted(
            Element::layer(Style::default()).with_child(Element::text("hi", Style::default())),
        );
        let trees = build_trees(&root, 10.0, 10.0);
        let text_style = &trees.style.children[0].children[0].style;
        assert!(text_style.flex.is_none());
        assert!(text_style.flex_direction.is_none());
    }

    #[test]
    fn test_handle_paths() {
        let root = mounted(
            Element::layer(Style::default())
                .with_child(Element::layer(Style::default()))
                .with_child(Element::layer(Style::default())),
        );
        let trees = build_trees(&root, 10.0, 10.0);
        assert_eq!(trees.handles.path_to(1), Some(vec![0]));
        assert_eq!(trees.handles.path_to(3), Some(vec![0, 1]));
        assert_eq!(trees.handles.path_to(42), None);
    }
}
