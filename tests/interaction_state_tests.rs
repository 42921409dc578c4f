// Host-side tests for the interaction state machine: debounce, precedence,
// overlay reconciliation and emphasis easing.
// The main crate is wasm-only, so we include the pure modules directly.

#![allow(dead_code)]
mod items {
    include!("../src/core/items.rs");
}
mod proximity {
    include!("../src/core/proximity.rs");
}
#[path = "../src/core/state.rs"]
mod state;

use glam::Vec3;
use items::{ItemId, ItemKind, ItemMeta, Registry};
use state::{CardHover, CursorMode, InteractionState, InteractionTuning, OverlaySink};

#[derive(Default)]
struct RecordingSink {
    shows: Vec<String>,
    hides: usize,
    cursors: Vec<CursorMode>,
}

impl OverlaySink for RecordingSink {
    fn show_overlay(&mut self, title: &str, _tags: &[String], _badge: Option<u64>) {
        self.shows.push(title.to_string());
    }

    fn hide_overlay(&mut self) {
        self.hides += 1;
    }

    fn set_cursor(&mut self, mode: CursorMode) {
        self.cursors.push(mode);
    }
}

fn tuning() -> InteractionTuning {
    InteractionTuning {
        near_debounce_ms: 150.0,
        hide_fade_ms: 300.0,
        emphasis_alpha: 0.1,
        active_glow_boost: 2.5,
        active_scale: 1.15,
    }
}

fn three_items(registry: &mut Registry) -> (ItemId, ItemId, ItemId) {
    let a = registry.register(ItemKind::Repository, ItemMeta::new("alpha"), 0.2);
    let b = registry.register(ItemKind::Repository, ItemMeta::new("beta"), 0.2);
    let c = registry.register(ItemKind::Skill, ItemMeta::new("gamma"), 0.3);
    (a, b, c)
}

#[test]
fn click_beats_hover_beats_proximity() {
    let mut registry = Registry::new();
    let (a, b, c) = three_items(&mut registry);
    let mut st = InteractionState::new(tuning());
    let mut sink = RecordingSink::default();

    st.observe_near(Some(c), 0.0);
    st.poll(150.0, &registry, &mut sink);
    st.set_hovered(Some(b), 150.0, &registry, &mut sink);
    st.set_clicked(Some(a), 150.0, &registry, &mut sink);
    assert_eq!(st.active_item(), Some(a));

    st.set_clicked(None, 151.0, &registry, &mut sink);
    assert_eq!(st.active_item(), Some(b));

    st.set_hovered(None, 152.0, &registry, &mut sink);
    assert_eq!(st.active_item(), Some(c));
}

#[test]
fn debounce_applies_only_final_value_exactly_once() {
    let mut registry = Registry::new();
    let (a, b, _) = three_items(&mut registry);
    let mut st = InteractionState::new(tuning());
    let mut sink = RecordingSink::default();

    st.observe_near(Some(a), 0.0);
    // Changed again before the delay elapsed: last write wins, delay restarts.
    st.observe_near(Some(b), 100.0);

    st.poll(150.0, &registry, &mut sink);
    assert_eq!(st.near_candidate(), None, "not due until 100 + 150");
    st.poll(249.0, &registry, &mut sink);
    assert_eq!(st.near_candidate(), None);
    st.poll(250.0, &registry, &mut sink);
    assert_eq!(st.near_candidate(), Some(b));

    // The intermediate candidate never surfaced.
    assert_eq!(sink.shows, vec!["beta".to_string()]);

    // Nothing further fires.
    st.poll(1000.0, &registry, &mut sink);
    assert_eq!(sink.shows.len(), 1);
}

#[test]
fn repeating_the_pending_candidate_does_not_restart_the_delay() {
    let mut registry = Registry::new();
    let (a, _, _) = three_items(&mut registry);
    let mut st = InteractionState::new(tuning());
    let mut sink = RecordingSink::default();

    st.observe_near(Some(a), 0.0);
    // The evaluator reports the same candidate every tick.
    st.observe_near(Some(a), 50.0);
    st.observe_near(Some(a), 100.0);
    st.poll(150.0, &registry, &mut sink);
    assert_eq!(st.near_candidate(), Some(a));
}

#[test]
fn returning_to_the_applied_value_cancels_the_pending_update() {
    let mut registry = Registry::new();
    let (a, b, _) = three_items(&mut registry);
    let mut st = InteractionState::new(tuning());
    let mut sink = RecordingSink::default();

    st.observe_near(Some(a), 0.0);
    st.poll(150.0, &registry, &mut sink);
    assert_eq!(st.near_candidate(), Some(a));

    st.observe_near(Some(b), 200.0);
    st.observe_near(Some(a), 250.0);
    st.poll(500.0, &registry, &mut sink);
    assert_eq!(st.near_candidate(), Some(a));
    assert_eq!(sink.shows, vec!["alpha".to_string()]);
}

#[test]
fn click_on_empty_space_clears_and_hides_after_fade() {
    let mut registry = Registry::new();
    let (a, _, _) = three_items(&mut registry);
    let mut st = InteractionState::new(tuning());
    let mut sink = RecordingSink::default();

    st.set_clicked(Some(a), 0.0, &registry, &mut sink);
    assert_eq!(sink.shows, vec!["alpha".to_string()]);

    st.set_clicked(None, 1000.0, &registry, &mut sink);
    assert_eq!(st.clicked_item(), None);
    st.poll(1299.0, &registry, &mut sink);
    assert_eq!(sink.hides, 0, "fade delay has not elapsed");
    st.poll(1300.0, &registry, &mut sink);
    assert_eq!(sink.hides, 1);
    st.poll(2000.0, &registry, &mut sink);
    assert_eq!(sink.hides, 1, "hide fires exactly once");
}

#[test]
fn a_new_show_cancels_the_pending_hide() {
    let mut registry = Registry::new();
    let (a, b, _) = three_items(&mut registry);
    let mut st = InteractionState::new(tuning());
    let mut sink = RecordingSink::default();

    st.set_clicked(Some(a), 0.0, &registry, &mut sink);
    st.set_clicked(None, 100.0, &registry, &mut sink);
    st.set_hovered(Some(b), 200.0, &registry, &mut sink);

    st.poll(1000.0, &registry, &mut sink);
    assert_eq!(sink.hides, 0);
    assert_eq!(sink.shows, vec!["alpha".to_string(), "beta".to_string()]);
}

#[test]
fn overlay_switches_content_without_an_intermediate_hide() {
    let mut registry = Registry::new();
    let (a, b, _) = three_items(&mut registry);
    let mut st = InteractionState::new(tuning());
    let mut sink = RecordingSink::default();

    st.set_hovered(Some(a), 0.0, &registry, &mut sink);
    st.set_hovered(Some(b), 50.0, &registry, &mut sink);
    assert_eq!(sink.shows, vec!["alpha".to_string(), "beta".to_string()]);
    assert_eq!(sink.hides, 0);
}

#[test]
fn end_to_end_proximity_switch_waits_for_the_debounce() {
    let mut registry = Registry::new();
    let (a, b, c) = three_items(&mut registry);
    registry.set_position(a, Vec3::new(0.0, 0.0, 3.0));
    registry.set_position(b, Vec3::new(0.0, 0.0, 8.0));
    registry.set_position(c, Vec3::new(0.0, 0.0, 20.0));

    let mut st = InteractionState::new(tuning());
    let mut sink = RecordingSink::default();
    let threshold = 6.5;

    let near = proximity::nearest_within(Vec3::ZERO, &registry, threshold);
    assert_eq!(near, Some(a));
    st.observe_near(near, 0.0);
    st.poll(150.0, &registry, &mut sink);
    assert_eq!(st.active_item(), Some(a));

    // The viewer moved; distances are now 10, 2, 20.
    registry.set_position(a, Vec3::new(0.0, 0.0, 10.0));
    registry.set_position(b, Vec3::new(0.0, 0.0, 2.0));
    let near = proximity::nearest_within(Vec3::ZERO, &registry, threshold);
    assert_eq!(near, Some(b));
    st.observe_near(near, 200.0);

    st.poll(349.0, &registry, &mut sink);
    assert_eq!(st.active_item(), Some(a), "switch must wait for the debounce");
    st.poll(350.0, &registry, &mut sink);
    assert_eq!(st.active_item(), Some(b));
}

#[test]
fn emphasis_converges_without_overshoot() {
    let mut registry = Registry::new();
    let (a, _, _) = three_items(&mut registry);
    let mut st = InteractionState::new(tuning());
    let mut sink = RecordingSink::default();

    st.set_clicked(Some(a), 0.0, &registry, &mut sink);
    let target_glow = 0.2 * 2.5;
    let target_scale = 1.15;

    let mut prev_glow = 0.2;
    let mut prev_scale = 1.0;
    for _ in 0..30 {
        st.step_emphasis(&registry);
        let e = st.emphasis_of(registry.get(a).unwrap());
        assert!(e.glow >= prev_glow && e.glow <= target_glow + 1e-6, "no overshoot");
        assert!(e.scale >= prev_scale && e.scale <= target_scale + 1e-6);
        prev_glow = e.glow;
        prev_scale = e.scale;
    }
    // ~95% of the step within 30 ticks at alpha = 0.1
    assert!(prev_glow > 0.2 + (target_glow - 0.2) * 0.94);
    assert!(prev_scale > 1.0 + (target_scale - 1.0) * 0.94);
}

#[test]
fn emphasis_relaxes_back_to_resting_values() {
    let mut registry = Registry::new();
    let (a, _, _) = three_items(&mut registry);
    let mut st = InteractionState::new(tuning());
    let mut sink = RecordingSink::default();

    st.set_clicked(Some(a), 0.0, &registry, &mut sink);
    for _ in 0..50 {
        st.step_emphasis(&registry);
    }
    st.set_clicked(None, 10.0, &registry, &mut sink);
    for _ in 0..80 {
        st.step_emphasis(&registry);
    }
    let e = st.emphasis_of(registry.get(a).unwrap());
    assert!((e.glow - 0.2).abs() < 0.01);
    assert!((e.scale - 1.0).abs() < 0.01);
}

#[test]
fn card_hover_settles_before_toggling() {
    let mut hover = CardHover::new(100.0);
    hover.observe(10.0, 50.0, 1.5, 0.0);
    assert_eq!(hover.poll(50.0), None, "not settled yet");
    assert_eq!(hover.poll(100.0), Some(true));
    assert!(hover.is_inside());
}

#[test]
fn card_hover_has_exit_hysteresis() {
    let mut hover = CardHover::new(100.0);
    hover.observe(10.0, 50.0, 1.5, 0.0);
    hover.poll(100.0);

    // Between the enter radius and 1.5x it: still inside.
    hover.observe(60.0, 50.0, 1.5, 200.0);
    assert_eq!(hover.poll(400.0), None);
    assert!(hover.is_inside());

    hover.observe(80.0, 50.0, 1.5, 500.0);
    assert_eq!(hover.poll(600.0), Some(false));
    assert!(!hover.is_inside());
}

#[test]
fn card_hover_pending_exit_is_cancelled_by_returning() {
    let mut hover = CardHover::new(100.0);
    hover.observe(10.0, 50.0, 1.5, 0.0);
    hover.poll(100.0);

    hover.observe(90.0, 50.0, 1.5, 200.0);
    // Back inside the band before the exit settles.
    hover.observe(60.0, 50.0, 1.5, 250.0);
    assert_eq!(hover.poll(1000.0), None);
    assert!(hover.is_inside());
}
