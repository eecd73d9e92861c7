//! The retained declarative element tree.
//!
//! Elements are what the host application constructs and mutates; the
//! pipeline mirrors them into style, paint and handle trees on every
//! layout-triggering update. Defaulting happens here, in the constructors —
//! by the time a style reaches the tree builders it is copied verbatim.

use flexspace_anim::AnimationConfig;
use flexspace_core::style::{AlignItems, FlexDirection, JustifyContent, TextAlign};
use flexspace_core::Style;
use flexspace_scene::TextureSlot;

/// Handle to an element for updates and content notifications.
pub type ElementHandle = u64;

/// Handle value reserved for the synthesized root.
pub const ROOT_HANDLE: ElementHandle = 0;

/// Styling for rasterized text content.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Text color, in any format the color resolver accepts.
    pub color: String,
    /// Font family name passed through to the rasterizer.
    pub font_family: String,
    /// Font size in layout units; multiplied by pixels-per-unit at raster
    /// request time.
    pub font_size: f32,
    /// Horizontal alignment.
    pub text_align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: "#fff".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 2.0,
            text_align: TextAlign::Left,
        }
    }
}

/// What an element is, and the content it carries.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Plain colored container.
    Layer,
    /// Quad textured with a host-loaded image.
    Image {
        /// Asset location, opaque to the pipeline.
        source: String,
    },
    /// Quad textured with host-rasterized text.
    Text {
        /// The text to rasterize.
        content: String,
        /// Raster styling.
        text_style: TextStyle,
    },
    /// Pointer-only helper; does not participate in layout. Its
    /// layout-participating descendants are walked through to the nearest
    /// participating ancestor's child list.
    PointerAnchor,
}

/// One node of the declarative hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) handle: ElementHandle,
    /// Element kind and content.
    pub kind: ElementKind,
    /// Declared style attributes.
    pub style: Style,
    /// Transition configuration; `None` means layout changes apply
    /// immediately. Inherited by descendants that do not set their own.
    pub animation: Option<AnimationConfig>,
    /// Node-local absolute z depth.
    pub elevation: f32,
    pub(crate) texture: TextureSlot,
    /// Children in declaration order.
    pub children: Vec<Element>,
}

impl Element {
    /// A container with the layer defaults filled into unset attributes:
    /// `flex: 0`, column direction, opaque, children packed to flex-start.
    pub fn layer(style: Style) -> Self {
        Self {
            handle: 0,
            kind: ElementKind::Layer,
            style: apply_layer_defaults(style),
            animation: None,
            elevation: 0.0,
            texture: TextureSlot::None,
            children: Vec::new(),
        }
    }

    /// An image leaf; content starts pending and renders as a placeholder
    /// until the host reports the texture ready.
    pub fn image(source: impl Into<String>, style: Style) -> Self {
        Self {
            handle: 0,
            kind: ElementKind::Image {
                source: source.into(),
            },
            style: apply_layer_defaults(style),
            animation: None,
            elevation: 0.0,
            texture: TextureSlot::Pending,
            children: Vec::new(),
        }
    }

    /// A text leaf with default raster styling.
    pub fn text(content: impl Into<String>, style: Style) -> Self {
        Self {
            handle: 0,
            kind: ElementKind::Text {
                content: content.into(),
                text_style: TextStyle::default(),
            },
            style,
            animation: None,
            elevation: 0.0,
            texture: TextureSlot::Pending,
            children: Vec::new(),
        }
    }

    /// A pointer-only helper node.
    pub fn pointer_anchor() -> Self {
        Self {
            handle: 0,
            kind: ElementKind::PointerAnchor,
            style: Style::default(),
            animation: None,
            elevation: 0.0,
            texture: TextureSlot::None,
            children: Vec::new(),
        }
    }

    /// Builder: append a child.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: set elevation.
    pub fn with_elevation(mut self, elevation: f32) -> Self {
        self.elevation = elevation;
        self
    }

    /// Builder: request animated layout transitions.
    pub fn with_animation(mut self, config: AnimationConfig) -> Self {
        self.animation = Some(config);
        self
    }

    /// Builder: set text raster styling on a text element. No-op for other
    /// kinds.
    pub fn with_text_style(mut self, style: TextStyle) -> Self {
        if let ElementKind::Text { text_style, .. } = &mut self.kind {
            *text_style = style;
        }
        self
    }

    /// Whether this element occupies a slot in the layout tree.
    pub fn participates_in_layout(&self) -> bool {
        !matches!(self.kind, ElementKind::PointerAnchor)
    }

    /// Re-apply this kind's constructor defaulting to a replacement style.
    pub(crate) fn defaulted_style(&self, style: Style) -> Style {
        match self.kind {
            ElementKind::Layer | ElementKind::Image { .. } => apply_layer_defaults(style),
            _ => style,
        }
    }

    /// The handle assigned at mount time.
    pub fn handle(&self) -> ElementHandle {
        self.handle
    }

    /// Current content texture state.
    pub fn texture(&self) -> TextureSlot {
        self.texture
    }

    /// Assign handles in preorder, starting from `next`.
    pub(crate) fn assign_handles(&mut self, next: &mut ElementHandle) {
        self.handle = *next;
        *next += 1;
        for child in &mut self.children {
            child.assign_handles(next);
        }
    }

    /// Find an element by handle.
    pub fn find(&self, handle: ElementHandle) -> Option<&Element> {
        if self.handle == handle {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(handle))
    }

    pub(crate) fn find_mut(&mut self, handle: ElementHandle) -> Option<&mut Element> {
        if self.handle == handle {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(handle))
    }
}

/// Fill the container defaults into unset attributes.
fn apply_layer_defaults(mut style: Style) -> Style {
    style.flex = style.flex.or(Some(0.0));
    style.flex_direction = style.flex_direction.or(Some(FlexDirection::Column));
    style.opacity = style.opacity.or(Some(1.0));
    style.align_items = style.align_items.or(Some(AlignItems::FlexStart));
    style.justify_content = style.justify_content.or(Some(JustifyContent::FlexStart));
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_defaults_fill_unset_only() {
        let layer = Element::layer(Style::default().with_flex(1.0));
        assert_eq!(layer.style.flex, Some(1.0));
        assert_eq!(layer.style.flex_direction, Some(FlexDirection::Column));
        assert_eq!(layer.style.opacity, Some(1.0));
        assert_eq!(layer.style.align_items, Some(AlignItems::FlexStart));
    }

    #[test]
    fn test_handle_assignment_preorder() {
        let mut tree = Element::layer(Style::default())
            .with_child(Element::layer(Style::default()))
            .with_child(
                Element::layer(Style::default()).with_child(Element::layer(Style::default())),
            );
        let mut next = 1;
        tree.assign_handles(&mut next);

        assert_eq!(tree.handle(), 1);
        assert_eq!(tree.children[0].handle(), 2);
        assert_eq!(tree.children[1].handle(), 3);
        assert_eq!(tree.children[1].children[0].handle(), 4);
        assert_eq!(next, 5);
    }

    #[test]
    fn test_find_by_handle() {
        let mut tree =
            Element::layer(Style::default()).with_child(Element::text("hi", Style::default()));
        let mut next = 1;
        tree.assign_handles(&mut next);

        let text = tree.find(2).unwrap();
        assert!(matches!(text.kind, ElementKind::Text { .. }));
        assert!(tree.find(99).is_none());
    }

    #[test]
    fn test_content_leaves_start_pending() {
        assert_eq!(
            Element::image("a.png", Style::default()).texture(),
            TextureSlot::Pending
        );
        assert_eq!(
            Element::layer(Style::default()).texture(),
            TextureSlot::None
        );
    }
}
