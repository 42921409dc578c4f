//! Interaction state and overlay reconciliation.
//!
//! One instance lives for the whole app. The proximity evaluator feeds
//! `observe_near` every tick, the pointer evaluator feeds `set_hovered` /
//! `set_clicked` from event handlers, and the frame loop calls `poll` once
//! per tick to fire due timers. All deferred work is a single deadline slot
//! per category; re-arming replaces the slot, nothing is ever queued.

use fnv::FnvHashMap;

use super::items::{InteractiveItem, ItemId, Registry};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CursorMode {
    Default,
    Grab,
    Grabbing,
    Pointer,
}

/// Boundary to the presentation layer. The DOM implements this; tests use a
/// recording stub.
pub trait OverlaySink {
    fn show_overlay(&mut self, title: &str, tags: &[String], badge: Option<u64>);
    fn hide_overlay(&mut self);
    fn set_cursor(&mut self, mode: CursorMode);
}

#[derive(Clone, Copy, Debug)]
pub struct InteractionTuning {
    pub near_debounce_ms: f64,
    pub hide_fade_ms: f64,
    pub emphasis_alpha: f32,
    pub active_glow_boost: f32,
    pub active_scale: f32,
}

/// Per-item eased visual state (glow intensity, uniform scale).
#[derive(Clone, Copy, Debug)]
pub struct Emphasis {
    pub glow: f32,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug)]
struct PendingNear {
    value: Option<ItemId>,
    due_ms: f64,
}

pub struct InteractionState {
    tuning: InteractionTuning,
    near: Option<ItemId>,
    hovered: Option<ItemId>,
    clicked: Option<ItemId>,
    pending_near: Option<PendingNear>,
    pending_hide_ms: Option<f64>,
    /// What the overlay currently displays (visible or fading out).
    shown: Option<ItemId>,
    emphasis: FnvHashMap<ItemId, Emphasis>,
}

impl InteractionState {
    pub fn new(tuning: InteractionTuning) -> Self {
        Self {
            tuning,
            near: None,
            hovered: None,
            clicked: None,
            pending_near: None,
            pending_hide_ms: None,
            shown: None,
            emphasis: FnvHashMap::default(),
        }
    }

    /// Click beats hover beats proximity. Derived on demand, never cached.
    pub fn active_item(&self) -> Option<ItemId> {
        self.clicked.or(self.hovered).or(self.near)
    }

    pub fn near_candidate(&self) -> Option<ItemId> {
        self.near
    }

    pub fn hovered_item(&self) -> Option<ItemId> {
        self.hovered
    }

    pub fn clicked_item(&self) -> Option<ItemId> {
        self.clicked
    }

    /// Feed the per-tick proximity result. A change is not applied here; it
    /// is scheduled to land `near_debounce_ms` after the *last* change, so a
    /// viewer orbiting a boundary between two items does not flicker.
    pub fn observe_near(&mut self, candidate: Option<ItemId>, now_ms: f64) {
        let effective = match self.pending_near {
            Some(p) => p.value,
            None => self.near,
        };
        if candidate == effective {
            return;
        }
        if candidate == self.near {
            // Returned to the applied value before the delay elapsed.
            self.pending_near = None;
        } else {
            self.pending_near = Some(PendingNear {
                value: candidate,
                due_ms: now_ms + self.tuning.near_debounce_ms,
            });
        }
    }

    /// Pointer hover result, applied immediately (no debounce).
    pub fn set_hovered(
        &mut self,
        item: Option<ItemId>,
        now_ms: f64,
        registry: &Registry,
        sink: &mut impl OverlaySink,
    ) {
        if self.hovered == item {
            return;
        }
        self.hovered = item;
        self.reconcile(now_ms, registry, sink);
    }

    /// Click result, applied immediately. `None` is click-on-empty-space and
    /// clears any previous selection.
    pub fn set_clicked(
        &mut self,
        item: Option<ItemId>,
        now_ms: f64,
        registry: &Registry,
        sink: &mut impl OverlaySink,
    ) {
        if self.clicked == item {
            return;
        }
        self.clicked = item;
        self.reconcile(now_ms, registry, sink);
    }

    /// Fire due timers: at most one pending near-candidate update and one
    /// pending overlay hide exist at any time.
    pub fn poll(&mut self, now_ms: f64, registry: &Registry, sink: &mut impl OverlaySink) {
        if let Some(p) = self.pending_near {
            if now_ms >= p.due_ms {
                self.pending_near = None;
                self.near = p.value;
                self.reconcile(now_ms, registry, sink);
            }
        }
        if let Some(due) = self.pending_hide_ms {
            if now_ms >= due {
                self.pending_hide_ms = None;
                self.shown = None;
                sink.hide_overlay();
            }
        }
    }

    fn reconcile(&mut self, now_ms: f64, registry: &Registry, sink: &mut impl OverlaySink) {
        match self.active_item() {
            Some(id) => {
                // Any show cancels a pending hide, including a re-show of
                // the item that was about to fade out.
                self.pending_hide_ms = None;
                if self.shown != Some(id) {
                    if let Some(item) = registry.get(id) {
                        sink.show_overlay(&item.meta.title, &item.meta.tags, item.meta.badge);
                        self.shown = Some(id);
                    }
                }
            }
            None => {
                if self.shown.is_some() && self.pending_hide_ms.is_none() {
                    self.pending_hide_ms = Some(now_ms + self.tuning.hide_fade_ms);
                }
            }
        }
    }

    /// Ease every item's glow and scale toward its target. Runs every tick
    /// whether or not the overlay is visible; the fixed blend factor makes
    /// convergence tick-rate dependent, which is fine for a cosmetic effect.
    pub fn step_emphasis(&mut self, registry: &Registry) {
        let active = self.active_item();
        let alpha = self.tuning.emphasis_alpha;
        for item in registry.all() {
            let (target_glow, target_scale) = if Some(item.id) == active {
                (
                    item.base_glow * self.tuning.active_glow_boost,
                    self.tuning.active_scale,
                )
            } else {
                (item.base_glow, 1.0)
            };
            let e = self.emphasis.entry(item.id).or_insert(Emphasis {
                glow: item.base_glow,
                scale: 1.0,
            });
            e.glow += (target_glow - e.glow) * alpha;
            e.scale += (target_scale - e.scale) * alpha;
        }
    }

    pub fn emphasis_of(&self, item: &InteractiveItem) -> Emphasis {
        self.emphasis.get(&item.id).copied().unwrap_or(Emphasis {
            glow: item.base_glow,
            scale: 1.0,
        })
    }

    /// Eased scale for an item, 1.0 until the first easing step.
    pub fn emphasis_scale(&self, id: ItemId) -> f32 {
        self.emphasis.get(&id).map(|e| e.scale).unwrap_or(1.0)
    }

    /// Eased glow relative to the item's resting glow; decorations multiply
    /// their own emissive by this.
    pub fn glow_ratio(&self, registry: &Registry, id: ItemId) -> f32 {
        match registry.get(id) {
            Some(item) if item.base_glow > 0.0 => self.emphasis_of(item).glow / item.base_glow,
            _ => 1.0,
        }
    }
}

/// Screen-space hover for the main card's profile overlay.
///
/// Independent of `InteractionState`: enter inside the base radius, leave
/// only past `exit_factor` times it, and both transitions settle for
/// `settle_ms` before taking effect.
pub struct CardHover {
    settle_ms: f64,
    inside: bool,
    pending: Option<(bool, f64)>,
}

impl CardHover {
    pub fn new(settle_ms: f64) -> Self {
        Self {
            settle_ms,
            inside: false,
            pending: None,
        }
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn observe(&mut self, dist_px: f32, enter_radius_px: f32, exit_factor: f32, now_ms: f64) {
        let wants = if !self.inside && dist_px < enter_radius_px {
            Some(true)
        } else if self.inside && dist_px > enter_radius_px * exit_factor {
            Some(false)
        } else {
            None
        };
        match wants {
            Some(v) => {
                if self.pending.map(|(pv, _)| pv) != Some(v) {
                    self.pending = Some((v, now_ms + self.settle_ms));
                }
            }
            None => self.pending = None,
        }
    }

    /// Returns the transition to apply, if one just settled.
    pub fn poll(&mut self, now_ms: f64) -> Option<bool> {
        if let Some((v, due)) = self.pending {
            if now_ms >= due {
                self.pending = None;
                self.inside = v;
                return Some(v);
            }
        }
        None
    }
}
