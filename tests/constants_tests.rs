// Host-side tests for configuration constants and their relationships.
// The main crate is wasm-only, so we include the pure module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn interaction_tuning_is_within_reasonable_bounds() {
    assert!(PROXIMITY_THRESHOLD > 0.0);
    assert!(NEAR_DEBOUNCE_MS > 0.0);
    assert!(HIDE_FADE_MS > 0.0);
    assert!(CLICK_DRAG_EPSILON_PX > 0.0);

    // Easing factors must be valid blend weights
    assert!(EMPHASIS_ALPHA > 0.0 && EMPHASIS_ALPHA < 1.0);
    assert!(ROTATION_EASE_ALPHA > 0.0 && ROTATION_EASE_ALPHA < 1.0);

    // Elevated emphasis must actually elevate
    assert!(ACTIVE_GLOW_BOOST > 1.0);
    assert!(ACTIVE_SCALE > 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn card_hover_hysteresis_is_consistent() {
    assert!(CARD_HOVER_RADIUS_FRAC > 0.0 && CARD_HOVER_RADIUS_FRAC < 0.5);
    assert!(CARD_HOVER_EXIT_FACTOR > 1.0, "exit must be outside enter");
    assert!(CARD_HOVER_SETTLE_MS > 0.0);
    assert!(CARD_HOVER_SETTLE_MS < HIDE_FADE_MS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_range_is_ordered() {
    assert!(CAMERA_Z_MIN < CAMERA_Z_DEFAULT);
    assert!(CAMERA_Z_DEFAULT < CAMERA_Z_MAX);
    assert!(CAMERA_ZNEAR > 0.0);
    assert!(CAMERA_ZNEAR < CAMERA_ZFAR);
    assert!(CAMERA_FOVY_DEG > 0.0 && CAMERA_FOVY_DEG < 180.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scene_layout_keeps_panels_reachable() {
    // Panels must dip inside the proximity threshold at the near side of
    // their orbit for the near-candidate affordance to ever fire.
    assert!(PANEL_ORBIT_RADIUS - CAMERA_Z_MAX < PROXIMITY_THRESHOLD);
    assert!(PANEL_ORBIT_SPEED > 0.0);
    assert!(PANEL_BOB_AMPLITUDE >= 0.0);
    assert!(PANEL_BREATHE_AMPLITUDE >= 0.0 && PANEL_BREATHE_AMPLITUDE < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn particle_field_is_sane() {
    assert!(PARTICLE_COUNT > 0);
    assert!(PARTICLE_BOUND > 0.0);
    assert!(PARTICLE_DRIFT_GAIN > 0.0);
}

#[test]
fn skill_column_is_populated_and_descends() {
    assert!(!SKILLS.is_empty());
    for pair in SKILLS.windows(2) {
        assert!(pair[0].2 > pair[1].2, "badge heights descend down the column");
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn listing_limits_are_positive() {
    assert!(MAX_REPOS_DISPLAY > 0);
    assert!(MAX_TAGS_DISPLAY > 0);
    assert!(!GITHUB_USERNAME.is_empty());
}
