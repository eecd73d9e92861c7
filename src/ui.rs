//! The frame driver: staged prop updates, per-tick animation advancement,
//! scene synchronization and pointer intersection, in that order.

use crate::change::{classify, UpdateKind};
use crate::element::{Element, ElementHandle, ElementKind, ROOT_HANDLE};
use crate::style_tree::{build_trees, element_paint, BuiltTrees, HandleNode};
use anyhow::{Context, Result};
use flexspace_anim::{AnimProp, AnimValues, AnimationConfig, AnimationState};
use flexspace_core::style::TextAlign;
use flexspace_core::{FrameClock, Style};
use flexspace_interaction::{PointerManager, PointerState, RayHit};
use flexspace_layout::{compute, LayoutRect};
use flexspace_scene::{synchronize, Extent, Material, PaintNode, SceneNode, TextureHandle, TextureSlot};
use glam::Vec3;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error};

/// Externally assigned root configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct UiProps {
    /// Root width in layout units.
    pub width: f32,
    /// Root height in layout units.
    pub height: f32,
    /// Pixels per layout unit, threaded into content raster requests.
    pub ppu: f32,
    /// World position of the root plane.
    pub position: Vec3,
}

impl Default for UiProps {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            ppu: 1.0,
            position: Vec3::ZERO,
        }
    }
}

/// A leaf whose content the host still needs to provide.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRequest {
    /// The requesting element.
    pub handle: ElementHandle,
    /// Raster target width in pixels (layout width times ppu).
    pub pixel_width: f32,
    /// Raster target height in pixels.
    pub pixel_height: f32,
    /// What to load or rasterize.
    pub detail: ContentDetail,
}

/// Kind-specific content request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentDetail {
    /// Decode an image asset.
    Image {
        /// Asset location, opaque to the pipeline.
        source: String,
    },
    /// Rasterize a run of text.
    Text {
        /// The text to draw.
        content: String,
        /// Font size in pixels (layout size times ppu).
        font_px: f32,
        /// Text color attribute, unresolved.
        color: String,
        /// Horizontal alignment.
        align: TextAlign,
    },
}

type IntersectCallback = Box<dyn FnMut(&str, &RayHit)>;

/// The retained root of a layout hierarchy rendered as a 3D scene tree.
///
/// Owns the single authoritative style/layout trees for the whole
/// hierarchy (flex layout is a global computation), the derived scene
/// descriptors, per-element animation state, and the pointer manager.
pub struct Ui {
    props: UiProps,
    root: Element,
    trees: BuiltTrees,
    layout: LayoutRect,
    scene: SceneNode,
    animations: HashMap<ElementHandle, AnimationState>,
    pointers: PointerManager,
    relayout_requested: bool,
    clock: FrameClock,
    intersect_callback: Option<IntersectCallback>,
}

impl Ui {
    /// Mount `root` under a synthesized plane of the given extent and run
    /// the initial layout pass.
    pub fn new(props: UiProps, mut root: Element) -> Result<Self> {
        let mut next_handle = ROOT_HANDLE + 1;
        root.assign_handles(&mut next_handle);

        let trees = build_trees(&root, props.width, props.height);
        let layout = compute(&trees.style).context("initial layout pass")?;

        let mut ui = Self {
            props,
            root,
            trees,
            layout,
            scene: SceneNode {
                geometry: Default::default(),
                material: Material::default(),
                position: Vec3::ZERO,
                children: Vec::new(),
            },
            animations: HashMap::new(),
            pointers: PointerManager::new(),
            relayout_requested: false,
            clock: FrameClock::new(),
            intersect_callback: None,
        };
        ui.resync();
        Ok(ui)
    }

    /// Root configuration.
    pub fn props(&self) -> &UiProps {
        &self.props
    }

    /// The mounted element tree.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Find a mounted element by handle.
    pub fn find(&self, handle: ElementHandle) -> Option<&Element> {
        self.root.find(handle)
    }

    /// The current descriptor tree.
    pub fn scene(&self) -> &SceneNode {
        &self.scene
    }

    /// The authoritative (non-animated) layout tree.
    pub fn layout(&self) -> &LayoutRect {
        &self.layout
    }

    /// Register the pointer-intersection callback, invoked at most once
    /// per pointer per tick with the nearest hit.
    pub fn on_intersect(&mut self, callback: impl FnMut(&str, &RayHit) + 'static) {
        self.intersect_callback = Some(Box::new(callback));
    }

    /// Enqueue a root-level re-layout for the next tick.
    ///
    /// Style-only changes route through here — re-layout is a first-class
    /// operation, never an implicit side effect of a property write.
    pub fn request_relayout(&mut self) {
        self.relayout_requested = true;
    }

    /// Replace an element's style and classify the update.
    ///
    /// `LayoutChanged` adopts the new layout immediately, starting (or
    /// retargeting) transitions on every node whose rectangle moved and
    /// whose element — or nearest configured ancestor — requests animation.
    /// `StyleOnly` enqueues a re-layout for the next tick. A failed layout
    /// pass keeps the previous descriptors, logs, and retries next tick.
    pub fn set_style(&mut self, handle: ElementHandle, style: Style) -> Result<UpdateKind> {
        let element = self
            .root
            .find_mut(handle)
            .with_context(|| format!("no element with handle {handle}"))?;
        if !element.participates_in_layout() {
            element.style = style;
            return Ok(UpdateKind::NoOp);
        }
        let style = element.defaulted_style(style);
        let previous_style = std::mem::replace(&mut element.style, style);
        let next_style = element.style.clone();

        let trees = build_trees(&self.root, self.props.width, self.props.height);
        let next_layout = match compute(&trees.style) {
            Ok(layout) => layout,
            Err(err) => {
                error!(%err, "layout pass failed; keeping previous descriptors");
                self.relayout_requested = true;
                return Ok(UpdateKind::NoOp);
            }
        };

        let kind = {
            let previous_rect = rect_for(&self.trees.handles, &self.layout, handle);
            let next_rect = rect_for(&trees.handles, &next_layout, handle);
            match (previous_rect, next_rect) {
                (Some(previous), Some(next)) => {
                    classify(&previous_style, &next_style, previous, next)
                }
                // Not in the layout tree (e.g. under an all-anchor subtree).
                _ => UpdateKind::NoOp,
            }
        };

        match kind {
            UpdateKind::LayoutChanged => self.adopt_with_transitions(trees, next_layout),
            UpdateKind::StyleOnly => {
                self.trees = trees;
                self.request_relayout();
            }
            UpdateKind::NoOp => {
                self.trees = trees;
            }
        }
        Ok(kind)
    }

    /// Set or clear an element's transition configuration. Affects future
    /// layout changes; an in-flight transition keeps its original config.
    pub fn set_animation(
        &mut self,
        handle: ElementHandle,
        config: Option<AnimationConfig>,
    ) -> Result<()> {
        let element = self
            .root
            .find_mut(handle)
            .with_context(|| format!("no element with handle {handle}"))?;
        element.animation = config;
        Ok(())
    }

    /// Resize the root plane, transitioning affected nodes like any other
    /// layout change.
    pub fn set_size(&mut self, width: f32, height: f32) -> Result<UpdateKind> {
        self.props.width = width;
        self.props.height = height;

        let trees = build_trees(&self.root, width, height);
        let next_layout = match compute(&trees.style) {
            Ok(layout) => layout,
            Err(err) => {
                error!(%err, "layout pass failed; keeping previous descriptors");
                self.relayout_requested = true;
                return Ok(UpdateKind::NoOp);
            }
        };

        if next_layout == self.layout {
            self.trees = trees;
            return Ok(UpdateKind::NoOp);
        }
        self.adopt_with_transitions(trees, next_layout);
        Ok(UpdateKind::LayoutChanged)
    }

    /// Mark a pending leaf's content ready and refresh that node's
    /// material in place — geometry and position untouched.
    pub fn notify_content_ready(
        &mut self,
        handle: ElementHandle,
        texture: TextureHandle,
    ) -> Result<()> {
        let element = self
            .root
            .find_mut(handle)
            .with_context(|| format!("no element with handle {handle}"))?;
        element.texture = TextureSlot::Ready(texture);
        let paint = element_paint(element);

        let path = self
            .trees
            .handles
            .path_to(handle)
            .context("element does not participate in layout")?;

        if let Some(cached) = paint_descendant_mut(&mut self.trees.paint, &path) {
            cached.texture = TextureSlot::Ready(texture);
        }
        if let Some(node) = self.scene.descendant_mut(&path) {
            node.material = Material::from_paint(&paint);
        }
        Ok(())
    }

    /// Pending content leaves, with raster extents scaled by ppu.
    pub fn content_requests(&self) -> Vec<ContentRequest> {
        let mut requests = Vec::new();
        self.collect_requests(&self.trees.handles, &self.layout, &mut requests);
        requests
    }

    /// Run one frame: advance in-flight transitions, re-synchronize the
    /// scene (running any requested re-layout first), then reconcile and
    /// test pointers, invoking the intersect callback per hit.
    ///
    /// `now` is an externally supplied monotonic clock in the same units
    /// as transition durations.
    pub fn tick(
        &mut self,
        now: f64,
        pointers: &[PointerState],
    ) -> BTreeMap<String, Option<RayHit>> {
        let dt = self.clock.delta(now);

        // 1. Advance transitions; converged ones retire and the
        //    authoritative target takes over.
        let states = std::mem::take(&mut self.animations);
        for (handle, state) in states {
            let (state, _) = state.advance(dt);
            if state.finished() {
                debug!(handle, "transition converged");
            } else {
                self.animations.insert(handle, state);
            }
        }

        // 2. Re-synchronize. A requested re-layout runs here; style-only
        //    changes apply without animation.
        if self.relayout_requested {
            self.trees = build_trees(&self.root, self.props.width, self.props.height);
            match compute(&self.trees.style) {
                Ok(layout) => {
                    self.layout = layout;
                    self.relayout_requested = false;
                }
                Err(err) => {
                    error!(%err, "re-layout failed; retrying next tick");
                }
            }
        }
        self.resync();

        // 3. Pointers: reconcile testers, then report nearest hits.
        self.pointers.reconcile(pointers);
        let hits = self.pointers.test(&self.scene, pointers);
        if let Some(callback) = &mut self.intersect_callback {
            for (id, hit) in &hits {
                if let Some(hit) = hit {
                    callback(id, hit);
                }
            }
        }
        hits
    }

    /// Identities currently tracked by the pointer manager.
    pub fn active_pointer_ids(&self) -> Vec<String> {
        self.pointers.active_ids()
    }

    fn adopt_with_transitions(&mut self, trees: BuiltTrees, next_layout: LayoutRect) {
        let mut transitions = Vec::new();
        collect_transitions(
            &self.root,
            &trees.handles,
            &self.layout,
            &next_layout,
            None,
            &mut transitions,
        );
        for (handle, previous, target, config) in transitions {
            let state = match self.animations.remove(&handle) {
                Some(in_flight) if !in_flight.finished() => in_flight.retarget(target, config),
                _ => AnimationState::begin(previous, target, config),
            };
            self.animations.insert(handle, state);
        }
        self.trees = trees;
        self.layout = next_layout;
        self.resync();
    }

    /// Rebuild the descriptor tree from the authoritative layout with any
    /// in-flight interpolated values merged over it. Wholesale replacement:
    /// a reader of the previous tree keeps a consistent snapshot.
    fn resync(&mut self) {
        let rects = self.overridden_layout();
        let root_extent = Extent {
            width: rects.width,
            height: rects.height,
        };
        let mut scene = synchronize(&rects, &self.trees.paint, root_extent);
        scene.position = self.props.position;
        self.scene = scene;
    }

    fn overridden_layout(&self) -> LayoutRect {
        let mut rects = self.layout.clone();
        apply_overrides(&mut rects, &self.trees.handles, &self.animations);
        rects
    }

    fn collect_requests(
        &self,
        handles: &HandleNode,
        rect: &LayoutRect,
        out: &mut Vec<ContentRequest>,
    ) {
        if let Some(element) = self.root.find(handles.handle) {
            if element.texture() == TextureSlot::Pending {
                let detail = match &element.kind {
                    ElementKind::Image { source } => Some(ContentDetail::Image {
                        source: source.clone(),
                    }),
                    ElementKind::Text {
                        content,
                        text_style,
                    } => Some(ContentDetail::Text {
                        content: content.clone(),
                        font_px: text_style.font_size * self.props.ppu,
                        color: text_style.color.clone(),
                        align: text_style.text_align,
                    }),
                    _ => None,
                };
                if let Some(detail) = detail {
                    out.push(ContentRequest {
                        handle: handles.handle,
                        pixel_width: rect.width * self.props.ppu,
                        pixel_height: rect.height * self.props.ppu,
                        detail,
                    });
                }
            }
        }
        for (child_handles, child_rect) in handles.children.iter().zip(&rect.children) {
            self.collect_requests(child_handles, child_rect, out);
        }
    }
}

/// Rect values a layout transition interpolates.
fn rect_values(rect: &LayoutRect) -> AnimValues {
    AnimValues::from([
        (AnimProp::Left, rect.left),
        (AnimProp::Top, rect.top),
        (AnimProp::Width, rect.width),
        (AnimProp::Height, rect.height),
    ])
}

fn rect_for<'a>(
    handles: &HandleNode,
    layout: &'a LayoutRect,
    handle: ElementHandle,
) -> Option<&'a LayoutRect> {
    let path = handles.path_to(handle)?;
    let mut rect = layout;
    for index in path {
        rect = rect.children.get(index)?;
    }
    Some(rect)
}

fn paint_descendant_mut<'a>(paint: &'a mut PaintNode, path: &[usize]) -> Option<&'a mut PaintNode> {
    let mut node = paint;
    for &index in path {
        node = node.children.get_mut(index)?;
    }
    Some(node)
}

fn apply_overrides(
    rect: &mut LayoutRect,
    handles: &HandleNode,
    animations: &HashMap<ElementHandle, AnimationState>,
) {
    if let Some(state) = animations.get(&handles.handle) {
        let values = state.rendered();
        if let Some(&left) = values.get(&AnimProp::Left) {
            rect.left = left;
        }
        if let Some(&top) = values.get(&AnimProp::Top) {
            rect.top = top;
        }
        if let Some(&width) = values.get(&AnimProp::Width) {
            rect.width = width;
        }
        if let Some(&height) = values.get(&AnimProp::Height) {
            rect.height = height;
        }
    }
    for (child_rect, child_handles) in rect.children.iter_mut().zip(&handles.children) {
        apply_overrides(child_rect, child_handles, animations);
    }
}

/// Walk the congruent handle/old-rect/new-rect trees collecting one
/// transition per moved rectangle whose element (or nearest configured
/// ancestor) requests animation.
fn collect_transitions(
    root: &Element,
    handles: &HandleNode,
    old: &LayoutRect,
    new: &LayoutRect,
    inherited: Option<AnimationConfig>,
    out: &mut Vec<(ElementHandle, AnimValues, AnimValues, AnimationConfig)>,
) {
    debug_assert_eq!(old.children.len(), new.children.len());

    let config = root
        .find(handles.handle)
        .and_then(|element| element.animation)
        .or(inherited);

    if handles.handle != ROOT_HANDLE && !old.same_rect(new) {
        if let Some(config) = config {
            out.push((handles.handle, rect_values(old), rect_values(new), config));
        }
    }

    for ((child_handles, child_old), child_new) in
        handles.children.iter().zip(&old.children).zip(&new.children)
    {
        collect_transitions(root, child_handles, child_old, child_new, config, out);
    }
}
