//! Per-pointer tester lifecycle and tick hit-testing.

use crate::raycaster::{RayHit, Raycaster};
use flexspace_core::Error;
use flexspace_scene::SceneNode;
use glam::Vec3;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// One pointer's identity and ray for the current tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerState {
    /// Stable identity across ticks.
    pub id: String,
    /// Ray origin in world space.
    pub origin: Vec3,
    /// Ray direction; normalized by the tester.
    pub direction: Vec3,
}

impl PointerState {
    /// Convenience constructor.
    pub fn new(id: impl Into<String>, origin: Vec3, direction: Vec3) -> Self {
        Self {
            id: id.into(),
            origin,
            direction,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        let malformed = self.id.is_empty()
            || !self.origin.is_finite()
            || !self.direction.is_finite()
            || self.direction == Vec3::ZERO;
        if malformed {
            Err(Error::PointerReconcile {
                id: self.id.clone(),
            })
        } else {
            Ok(())
        }
    }
}

/// Owns one [`Raycaster`] per active pointer identity.
///
/// Invariant: after [`reconcile`](Self::reconcile), the tester map's key
/// set equals the identities of the supplied pointers (minus any with a
/// malformed identity, which are dropped with a warning).
#[derive(Debug, Default)]
pub struct PointerManager {
    testers: HashMap<String, Raycaster>,
}

impl PointerManager {
    /// An empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sync the tester map with this tick's active pointers: create testers
    /// for new identities, drop testers whose identity disappeared.
    pub fn reconcile(&mut self, pointers: &[PointerState]) {
        for pointer in pointers {
            if pointer.id.is_empty() {
                warn!("dropping pointer with empty identity");
                continue;
            }
            self.testers.entry(pointer.id.clone()).or_default();
        }
        self.testers
            .retain(|id, _| pointers.iter().any(|p| p.id == *id));
    }

    /// Cast every active pointer's ray against `root`.
    ///
    /// Returns the nearest hit (or `None`) per identity. A pointer with a
    /// malformed ray contributes `None` this tick; other pointers are
    /// unaffected.
    pub fn test(
        &mut self,
        root: &SceneNode,
        pointers: &[PointerState],
    ) -> BTreeMap<String, Option<RayHit>> {
        let mut hits = BTreeMap::new();
        for pointer in pointers {
            let Some(tester) = self.testers.get_mut(&pointer.id) else {
                continue;
            };
            if let Err(err) = pointer.validate() {
                warn!(%err, "skipping pointer for this tick");
                hits.insert(pointer.id.clone(), None);
                continue;
            }
            tester.set(pointer.origin, pointer.direction);
            hits.insert(pointer.id.clone(), tester.intersect_tree(root));
        }
        hits
    }

    /// Currently tracked identities, sorted.
    pub fn active_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.testers.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of tracked pointers.
    pub fn len(&self) -> usize {
        self.testers.len()
    }

    /// True when no pointer is tracked.
    pub fn is_empty(&self) -> bool {
        self.testers.is_empty()
    }
}
