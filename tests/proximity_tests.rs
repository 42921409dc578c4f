// Host-side tests for the proximity evaluator.
// The main crate is wasm-only, so we include the pure modules directly.

#![allow(dead_code)]
mod items {
    include!("../src/core/items.rs");
}
mod proximity {
    include!("../src/core/proximity.rs");
}

use glam::Vec3;
use items::{ItemKind, ItemMeta, Registry};
use proximity::nearest_within;

fn registry_at(positions: &[(ItemKind, Vec3)]) -> Registry {
    let mut registry = Registry::new();
    for (i, (kind, pos)) in positions.iter().enumerate() {
        let id = registry.register(*kind, ItemMeta::new(format!("item-{i}")), 0.2);
        registry.set_position(id, *pos);
    }
    registry
}

#[test]
fn empty_registry_yields_none() {
    let registry = Registry::new();
    assert_eq!(nearest_within(Vec3::ZERO, &registry, 10.0), None);
}

#[test]
fn picks_minimum_distance_within_threshold() {
    let registry = registry_at(&[
        (ItemKind::Repository, Vec3::new(0.0, 0.0, 3.0)),
        (ItemKind::Repository, Vec3::new(0.0, 0.0, 8.0)),
        (ItemKind::Skill, Vec3::new(0.0, 0.0, 20.0)),
    ]);
    let hit = nearest_within(Vec3::ZERO, &registry, 6.5).expect("expected a candidate");
    assert_eq!(registry.get(hit).unwrap().meta.title, "item-0");
}

#[test]
fn none_when_nothing_is_inside_threshold() {
    let registry = registry_at(&[
        (ItemKind::Repository, Vec3::new(0.0, 0.0, 8.0)),
        (ItemKind::Skill, Vec3::new(0.0, 0.0, 20.0)),
    ]);
    assert_eq!(nearest_within(Vec3::ZERO, &registry, 6.5), None);
}

#[test]
fn threshold_comparison_is_strict() {
    let registry = registry_at(&[(ItemKind::Repository, Vec3::new(0.0, 0.0, 5.0))]);
    assert_eq!(nearest_within(Vec3::ZERO, &registry, 5.0), None);
    assert!(nearest_within(Vec3::ZERO, &registry, 5.001).is_some());
}

#[test]
fn main_card_never_participates() {
    let registry = registry_at(&[
        (ItemKind::MainCard, Vec3::new(0.0, 0.0, 1.0)),
        (ItemKind::Repository, Vec3::new(0.0, 0.0, 4.0)),
    ]);
    let hit = nearest_within(Vec3::ZERO, &registry, 6.5).unwrap();
    assert_eq!(registry.get(hit).unwrap().kind, ItemKind::Repository);
}

#[test]
fn result_invariant_under_reordering() {
    let positions = [
        Vec3::new(1.0, 2.0, 0.5),
        Vec3::new(-3.0, 0.0, 1.0),
        Vec3::new(0.2, 0.2, 0.2),
        Vec3::new(5.0, 5.0, 5.0),
    ];
    let viewer = Vec3::new(0.3, -0.4, 2.0);

    let forward = registry_at(
        &positions
            .iter()
            .map(|p| (ItemKind::Repository, *p))
            .collect::<Vec<_>>(),
    );
    let reversed = registry_at(
        &positions
            .iter()
            .rev()
            .map(|p| (ItemKind::Repository, *p))
            .collect::<Vec<_>>(),
    );

    let a = nearest_within(viewer, &forward, 10.0).unwrap();
    let b = nearest_within(viewer, &reversed, 10.0).unwrap();
    assert_eq!(
        forward.get(a).unwrap().position,
        reversed.get(b).unwrap().position
    );
}

#[test]
fn tie_breaks_to_first_in_registry_order() {
    let registry = registry_at(&[
        (ItemKind::Repository, Vec3::new(0.0, 0.0, 2.0)),
        (ItemKind::Repository, Vec3::new(0.0, 0.0, -2.0)),
    ]);
    let hit = nearest_within(Vec3::ZERO, &registry, 6.5).unwrap();
    assert_eq!(registry.get(hit).unwrap().meta.title, "item-0");
}
