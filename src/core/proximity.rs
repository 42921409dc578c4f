use glam::Vec3;

use super::items::{ItemId, ItemKind, Registry};

/// Find the item nearest to the viewer, if it is closer than `threshold`.
///
/// Linear scan in registration order; the main card never participates (it
/// has its own screen-space affordance). On an exact distance tie the first
/// item encountered wins, which keeps the result deterministic.
pub fn nearest_within(viewer: Vec3, registry: &Registry, threshold: f32) -> Option<ItemId> {
    let mut best: Option<(ItemId, f32)> = None;
    for item in registry.all() {
        if item.kind == ItemKind::MainCard {
            continue;
        }
        let dist = viewer.distance(item.position);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((item.id, dist)),
        }
    }
    match best {
        Some((id, dist)) if dist < threshold => Some(id),
        _ => None,
    }
}
