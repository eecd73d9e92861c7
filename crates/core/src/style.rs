//! Style attribute model for layout-participating elements.
//!
//! A [`Style`] is the verbatim attribute set an element declares. Nothing is
//! defaulted here; element constructors fill in their own defaults before a
//! style ever reaches the layout pass. All comparisons are by value so change
//! detection never depends on allocation identity.

use serde::{Deserialize, Serialize};

/// Main-axis direction of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    /// Children laid out left to right.
    Row,
    /// Children laid out right to left.
    RowReverse,
    /// Children laid out top to bottom.
    Column,
    /// Children laid out bottom to top.
    ColumnReverse,
}

/// Main-axis distribution of free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    /// Pack children at the start of the main axis.
    FlexStart,
    /// Center children on the main axis.
    Center,
    /// Pack children at the end of the main axis.
    FlexEnd,
    /// Even gaps between children, none at the edges.
    SpaceBetween,
    /// Even gaps around every child.
    SpaceAround,
}

/// Cross-axis alignment of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    /// Align to the start of the cross axis.
    FlexStart,
    /// Center on the cross axis.
    Center,
    /// Align to the end of the cross axis.
    FlexEnd,
    /// Stretch to fill the cross axis.
    Stretch,
}

/// Per-child override of the parent's [`AlignItems`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignSelf {
    /// Inherit the parent's cross-axis alignment.
    Auto,
    /// Align to the start of the cross axis.
    FlexStart,
    /// Center on the cross axis.
    Center,
    /// Align to the end of the cross axis.
    FlexEnd,
    /// Stretch to fill the cross axis.
    Stretch,
}

/// Horizontal alignment for rasterized text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    /// Left-aligned text.
    Left,
    /// Centered text.
    Center,
    /// Right-aligned text.
    Right,
    /// Justified text.
    Justify,
}

/// Per-edge dimension block used for margin, padding and border width.
///
/// `all` is the shorthand; explicit edges win over it. Unset edges resolve
/// to zero, matching the flex engine's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Edges {
    /// Shorthand applied to every edge not set explicitly.
    pub all: Option<f32>,
    /// Left edge.
    pub left: Option<f32>,
    /// Right edge.
    pub right: Option<f32>,
    /// Top edge.
    pub top: Option<f32>,
    /// Bottom edge.
    pub bottom: Option<f32>,
}

impl Edges {
    /// Uniform value on all four edges.
    pub fn uniform(value: f32) -> Self {
        Self {
            all: Some(value),
            ..Default::default()
        }
    }

    /// Resolved left edge.
    pub fn resolve_left(&self) -> f32 {
        self.left.or(self.all).unwrap_or(0.0)
    }

    /// Resolved right edge.
    pub fn resolve_right(&self) -> f32 {
        self.right.or(self.all).unwrap_or(0.0)
    }

    /// Resolved top edge.
    pub fn resolve_top(&self) -> f32 {
        self.top.or(self.all).unwrap_or(0.0)
    }

    /// Resolved bottom edge.
    pub fn resolve_bottom(&self) -> f32 {
        self.bottom.or(self.all).unwrap_or(0.0)
    }

    /// True when no edge is set at all.
    pub fn is_unset(&self) -> bool {
        self.all.is_none()
            && self.left.is_none()
            && self.right.is_none()
            && self.top.is_none()
            && self.bottom.is_none()
    }
}

/// The attribute set one element contributes to the layout pass.
///
/// Unset attributes mean "engine default", not zero. Paint attributes
/// (`background_color`, `opacity`) ride along so a single value comparison
/// covers both layout- and style-only change classes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    /// Main-axis direction; containers default to column when unset.
    pub flex_direction: Option<FlexDirection>,
    /// Main-axis distribution.
    pub justify_content: Option<JustifyContent>,
    /// Cross-axis alignment of children.
    pub align_items: Option<AlignItems>,
    /// Per-child cross-axis override.
    pub align_self: Option<AlignSelf>,
    /// Flex shorthand: growth factor with a zero basis when positive.
    pub flex: Option<f32>,
    /// Fixed width in layout units.
    pub width: Option<f32>,
    /// Fixed height in layout units.
    pub height: Option<f32>,
    /// Minimum width constraint.
    pub min_width: Option<f32>,
    /// Maximum width constraint.
    pub max_width: Option<f32>,
    /// Outer spacing.
    pub margin: Edges,
    /// Inner spacing.
    pub padding: Edges,
    /// Border thickness; participates in layout like padding.
    pub border_width: Edges,
    /// Relative offset from the left edge.
    pub left: Option<f32>,
    /// Relative offset from the right edge.
    pub right: Option<f32>,
    /// Relative offset from the top edge.
    pub top: Option<f32>,
    /// Relative offset from the bottom edge.
    pub bottom: Option<f32>,
    /// Background fill, in any format [`crate::color::parse`] accepts.
    pub background_color: Option<String>,
    /// Fill opacity; values below 1 mark the material transparent.
    pub opacity: Option<f32>,
}

impl Style {
    /// Builder: set width and height.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Builder: set the flex shorthand.
    pub fn with_flex(mut self, flex: f32) -> Self {
        self.flex = Some(flex);
        self
    }

    /// Builder: set the main-axis direction.
    pub fn with_flex_direction(mut self, direction: FlexDirection) -> Self {
        self.flex_direction = Some(direction);
        self
    }

    /// Builder: set main-axis distribution.
    pub fn with_justify_content(mut self, justify: JustifyContent) -> Self {
        self.justify_content = Some(justify);
        self
    }

    /// Builder: set cross-axis alignment.
    pub fn with_align_items(mut self, align: AlignItems) -> Self {
        self.align_items = Some(align);
        self
    }

    /// Builder: set the background fill.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Builder: set opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Builder: set uniform margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = Edges::uniform(margin);
        self
    }

    /// Builder: set uniform padding.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = Edges::uniform(padding);
        self
    }

    /// Resolved opacity, defaulting to fully opaque.
    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }
}
