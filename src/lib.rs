//! flexspace - flexbox-style layout rendered as a 3D scene tree
//!
//! Describe a two-dimensional box-layout hierarchy (flex direction,
//! alignment, padding, colors) and get back a tree of 3D scene-node
//! descriptors: planar geometry, materials, and centered positions with
//! per-node z elevation. Layout changes are detected per update and can be
//! animated over time; pointer rays are testable against the rendered tree
//! once per frame.
//!
//! # Example
//!
//! ```rust
//! use flexspace::{Element, Ui, UiProps};
//! use flexspace_core::Style;
//!
//! let root = Element::layer(Style::default())
//!     .with_child(Element::layer(Style::default().with_flex(1.0)))
//!     .with_child(Element::layer(Style::default().with_flex(1.0)));
//!
//! let mut ui = Ui::new(
//!     UiProps { width: 100.0, height: 100.0, ..Default::default() },
//!     root,
//! )?;
//!
//! // In your frame loop:
//! ui.tick(0.0, &[]);
//! let scene = ui.scene();
//! assert_eq!(scene.children[0].children.len(), 2);
//! # anyhow::Ok(())
//! ```

pub mod change;
pub mod config;
pub mod element;
pub mod style_tree;
pub mod ui;

// Re-export commonly used types
pub use change::UpdateKind;
pub use config::DemoConfig;
pub use element::{Element, ElementHandle, ElementKind, TextStyle};
pub use style_tree::{build_style_tree, build_trees, BuiltTrees, HandleNode};
pub use ui::{ContentDetail, ContentRequest, Ui, UiProps};

// The pipeline's building blocks, re-exported for hosts that drive them
// directly.
pub use flexspace_anim::{AnimProp, AnimValues, AnimationConfig, AnimationState, Easing, Interpolation};
pub use flexspace_core::{Color, Error, Style};
pub use flexspace_interaction::{PointerManager, PointerState, RayHit, Raycaster};
pub use flexspace_layout::{LayoutRect, StyleNode};
pub use flexspace_scene::{Material, PlaneGeometry, SceneNode, TextureSlot};
