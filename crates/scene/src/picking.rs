use foundation::ids::ObjectId;
use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;

use crate::entity::NodeId;
use crate::world::Scene;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir.scale(t)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    /// Pick target the hit resolved to.
    pub target: NodeId,
    /// Node whose geometry was actually hit.
    pub node: NodeId,
    pub owner: Option<ObjectId>,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
        }
    }
}

/// Ray picking against a list of pick targets.
///
/// Every raycast-enabled node in a target's subtree is tested against its
/// oriented box, and a hit always resolves to the target itself, never to an
/// outline or caption child.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - Equal distances go to the target listed first.
pub fn pick(scene: &Scene, targets: &[NodeId], ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let dir = ray.dir.normalize()?;

    let mut best: Option<(f64, usize, NodeId)> = None;
    for (order, target) in targets.iter().enumerate() {
        for node_id in scene.subtree(*target) {
            let Some(node) = scene.node(node_id) else {
                continue;
            };
            if !node.raycast || !node.visible {
                continue;
            }
            let Some(shape) = scene.shape_of(node_id) else {
                continue;
            };
            let Some(wt) = scene.world_transform(node_id) else {
                continue;
            };

            let local_origin = wt.to_local(ray.origin);
            let local_dir = wt.dir_to_local(dir);
            let Some(t) = shape
                .local_bounds()
                .ray_entry(local_origin, local_dir, 0.0, opts.max_distance)
            else {
                continue;
            };

            best = match best {
                None => Some((t, order, node_id)),
                Some((bt, bo, bn)) => {
                    let ord = stable_total_cmp_f64(t, bt).then_with(|| order.cmp(&bo));
                    if ord.is_lt() {
                        Some((t, order, node_id))
                    } else {
                        Some((bt, bo, bn))
                    }
                }
            };
        }
    }

    let (t, order, node) = best?;
    let target = targets[order];
    Some(PickHit {
        target,
        node,
        owner: scene.node(target).and_then(|n| n.owner.clone()),
        distance: t,
        point: Ray::new(ray.origin, dir).at(t),
    })
}

/// Intersection of `ray` with the horizontal plane at height `y`.
pub fn intersect_horizontal_plane(ray: Ray, y: f64) -> Option<Vec3> {
    if ray.dir.y.abs() < 1e-12 {
        return None;
    }
    let t = (y - ray.origin.y) / ray.dir.y;
    if t < 0.0 || !t.is_finite() {
        return None;
    }
    Some(ray.at(t))
}
