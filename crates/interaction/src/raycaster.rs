//! Ray intersection with layout-derived quads.

use flexspace_scene::SceneNode;
use glam::{Vec2, Vec3};

const PARALLEL_EPSILON: f32 = 1e-4;

/// Result of casting a pointer ray into the scene tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit {
    /// World-space position where the ray hit the quad.
    pub position: Vec3,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// Coordinates on the quad, `(0, 0)` bottom-left to `(1, 1)` top-right.
    pub uv: (f32, f32),
    /// Child-index path of the hit node from the tested root.
    pub path: Vec<usize>,
}

/// Ray tester for one pointer identity.
///
/// Scene quads lie in planes of constant z (each node's absolute
/// elevation) facing +z, with x/y offsets composing down the tree, so the
/// intersection test is a plane hit followed by a point-in-quad check.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Raycaster {
    origin: Vec3,
    direction: Vec3,
}

impl Raycaster {
    /// A tester with no ray assigned yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign this tick's ray.
    pub fn set(&mut self, origin: Vec3, direction: Vec3) {
        self.origin = origin;
        self.direction = direction.normalize_or_zero();
    }

    /// Cast against `root` and every descendant, returning the nearest hit.
    ///
    /// Ordered by distance from the ray origin; exact ties keep the node
    /// encountered first in traversal order.
    pub fn intersect_tree(&self, root: &SceneNode) -> Option<RayHit> {
        if self.direction == Vec3::ZERO {
            return None;
        }
        let mut nearest: Option<RayHit> = None;
        let mut path = Vec::new();
        self.walk(root, Vec2::ZERO, &mut path, &mut nearest);
        nearest
    }

    fn walk(
        &self,
        node: &SceneNode,
        parent_offset: Vec2,
        path: &mut Vec<usize>,
        nearest: &mut Option<RayHit>,
    ) {
        let center = Vec2::new(
            parent_offset.x + node.position.x,
            parent_offset.y + node.position.y,
        );

        if let Some(hit) = self.intersect_quad(node, center) {
            let closer = nearest
                .as_ref()
                .map(|best| hit.0 < best.distance)
                .unwrap_or(true);
            if closer {
                *nearest = Some(RayHit {
                    position: hit.1,
                    distance: hit.0,
                    uv: hit.2,
                    path: path.clone(),
                });
            }
        }

        for (index, child) in node.children.iter().enumerate() {
            path.push(index);
            self.walk(child, center, path, nearest);
            path.pop();
        }
    }

    /// Ray-plane intersection at the node's elevation, then a bounds check
    /// against the quad extents.
    fn intersect_quad(&self, node: &SceneNode, center: Vec2) -> Option<(f32, Vec3, (f32, f32))> {
        let width = node.geometry.width;
        let height = node.geometry.height;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }

        let denom = self.direction.z;
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (node.position.z - self.origin.z) / denom;
        if t < 0.0 {
            return None;
        }

        let hit = self.origin + self.direction * t;
        let u = hit.x - center.x;
        let v = hit.y - center.y;
        let half_width = width * 0.5;
        let half_height = height * 0.5;

        if u.abs() <= half_width && v.abs() <= half_height {
            let uv = ((u + half_width) / width, (v + half_height) / height);
            Some((t, hit, uv))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexspace_scene::{Material, PlaneGeometry, SceneNode};

    fn quad(x: f32, y: f32, z: f32, width: f32, height: f32) -> SceneNode {
        SceneNode {
            geometry: PlaneGeometry { width, height },
            material: Material::default(),
            position: Vec3::new(x, y, z),
            children: Vec::new(),
        }
    }

    fn caster_at(origin: Vec3, direction: Vec3) -> Raycaster {
        let mut caster = Raycaster::new();
        caster.set(origin, direction);
        caster
    }

    #[test]
    fn test_hit_quad_center() {
        let caster = caster_at(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = caster.intersect_tree(&quad(0.0, 0.0, 0.0, 2.0, 1.0)).unwrap();
        assert!((hit.distance - 10.0).abs() < 1e-5);
        assert!((hit.uv.0 - 0.5).abs() < 1e-5);
        assert!((hit.uv.1 - 0.5).abs() < 1e-5);
        assert!(hit.path.is_empty());
    }

    #[test]
    fn test_miss_outside_bounds() {
        let caster = caster_at(Vec3::new(5.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(caster.intersect_tree(&quad(0.0, 0.0, 0.0, 2.0, 1.0)).is_none());
    }

    #[test]
    fn test_behind_origin_is_not_hit() {
        let caster = caster_at(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(caster.intersect_tree(&quad(0.0, 0.0, 0.0, 2.0, 2.0)).is_none());
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut root = quad(0.0, 0.0, 0.0, 10.0, 10.0);
        root.children.push(quad(0.0, 0.0, 5.0, 4.0, 4.0));

        let caster = caster_at(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = caster.intersect_tree(&root).unwrap();
        // The elevated child is closer to the origin than the root plane.
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert_eq!(hit.path, vec![0]);
    }

    #[test]
    fn test_tie_keeps_first_in_traversal_order() {
        let mut root = quad(0.0, 0.0, 0.0, 10.0, 10.0);
        root.children.push(quad(0.0, 0.0, 0.0, 10.0, 10.0));

        let caster = caster_at(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = caster.intersect_tree(&root).unwrap();
        assert!(hit.path.is_empty());
    }

    #[test]
    fn test_child_offsets_compose() {
        let mut root = quad(10.0, 0.0, 0.0, 40.0, 40.0);
        root.children.push(quad(5.0, 0.0, 1.0, 2.0, 2.0));

        // Child world center is x = 15.
        let caster = caster_at(Vec3::new(15.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = caster.intersect_tree(&root).unwrap();
        assert_eq!(hit.path, vec![0]);
        assert!((hit.distance - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_quad_not_hittable() {
        let caster = caster_at(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(caster.intersect_tree(&quad(0.0, 0.0, 0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let caster = caster_at(Vec3::new(0.0, -10.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(caster.intersect_tree(&quad(0.0, 0.0, 0.0, 4.0, 4.0)).is_none());
    }
}
