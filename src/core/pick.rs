use glam::Vec3;

use super::items::ItemId;

/// Ray-sphere intersection; returns the nearest non-negative `t` along the
/// ray, assuming `ray_dir` is normalized.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// One pickable sphere in the scene's ownership tree.
///
/// Decorative child meshes carry `item: None` and point at their owner via
/// `parent`; the node that owns the display metadata carries `item: Some`.
#[derive(Clone, Copy, Debug)]
pub struct PickNode {
    pub center: Vec3,
    pub radius: f32,
    pub parent: Option<usize>,
    pub item: Option<ItemId>,
}

/// Cast a ray against every pick node and resolve the hit to the item that
/// owns it.
///
/// The nearest intersection by distance along the ray wins; from there we
/// walk up the parent chain to the first node carrying an item id. A hit
/// whose ancestry carries no metadata is treated as no hit at all.
pub fn resolve(nodes: &[PickNode], ray_origin: Vec3, ray_dir: Vec3) -> Option<ItemId> {
    let mut best: Option<(usize, f32)> = None;
    for (i, node) in nodes.iter().enumerate() {
        if let Some(t) = ray_sphere(ray_origin, ray_dir, node.center, node.radius) {
            match best {
                Some((_, best_t)) if t >= best_t => {}
                _ => best = Some((i, t)),
            }
        }
    }
    let (mut idx, _) = best?;
    loop {
        let node = &nodes[idx];
        if let Some(id) = node.item {
            return Some(id);
        }
        match node.parent {
            Some(parent) => idx = parent,
            None => return None,
        }
    }
}
