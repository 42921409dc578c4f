//! Pointer wiring: hover picking, drag-rotate, click selection, wheel zoom
//! and the card's screen-space hover. Each handler runs to completion
//! before the next tick, so plain `Rc<RefCell<…>>` sharing is safe here.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use instant::Instant;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::camera;
use crate::constants::{
    CAMERA_Z_MAX, CAMERA_Z_MIN, CARD_HOVER_EXIT_FACTOR, CARD_HOVER_RADIUS_FRAC,
    CLICK_DRAG_EPSILON_PX,
};
use crate::core::pick;
use crate::core::{CardHover, CursorMode, InteractionState, OverlaySink, Registry};
use crate::overlay::DomSink;
use crate::scene::Scene;

#[derive(Default, Clone, Copy)]
pub struct MouseState {
    /// Canvas backing-store pixels.
    pub x: f32,
    pub y: f32,
}

#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub last_x: f32,
    pub last_y: f32,
    /// Cumulative pixels travelled since pointer-down; below the click
    /// epsilon a release counts as a click.
    pub moved_px: f32,
}

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<Scene>>,
    pub registry: Rc<RefCell<Registry>>,
    pub state: Rc<RefCell<InteractionState>>,
    pub sink: Rc<RefCell<DomSink>>,
    pub card_hover: Rc<RefCell<CardHover>>,
    pub mouse: Rc<RefCell<MouseState>>,
    pub drag: Rc<RefCell<DragState>>,
    pub camera_z: Rc<RefCell<f32>>,
    pub epoch: Rc<Instant>,
}

impl InputWiring {
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

#[inline]
fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / (rect.width() as f32).max(1.0)) * canvas.width() as f32;
    let sy = (y_css / (rect.height() as f32).max(1.0)) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

fn resolve_under_pointer(w: &InputWiring, pos: Vec2) -> Option<crate::core::ItemId> {
    let (ro, rd) =
        camera::screen_to_world_ray(&w.canvas, pos.x, pos.y, *w.camera_z.borrow());
    pick::resolve(&w.scene.borrow().pick_nodes(), ro, rd)
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = pointer_canvas_px(&ev, &w.canvas);
        {
            let mut ms = w.mouse.borrow_mut();
            ms.x = pos.x;
            ms.y = pos.y;
        }

        // Screen-space profile-card affordance, independent of picking.
        let rect = w.canvas.get_bounding_client_rect();
        let cx = rect.width() as f32 / 2.0;
        let cy = rect.height() as f32 / 2.0;
        let mx = ev.client_x() as f32 - rect.left() as f32;
        let my = ev.client_y() as f32 - rect.top() as f32;
        let dist = ((mx - cx).powi(2) + (my - cy).powi(2)).sqrt();
        let radius = rect.width().min(rect.height()) as f32 * CARD_HOVER_RADIUS_FRAC;
        w.card_hover
            .borrow_mut()
            .observe(dist, radius, CARD_HOVER_EXIT_FACTOR, w.now_ms());

        if w.drag.borrow().active {
            let (dx, dy) = {
                let mut ds = w.drag.borrow_mut();
                let dx = ev.client_x() as f32 - ds.last_x;
                let dy = ev.client_y() as f32 - ds.last_y;
                ds.last_x = ev.client_x() as f32;
                ds.last_y = ev.client_y() as f32;
                ds.moved_px += dx.abs() + dy.abs();
                (dx, dy)
            };
            w.scene.borrow_mut().apply_drag(dx, dy);
        } else {
            let hit = resolve_under_pointer(&w, pos);
            let mut sink = w.sink.borrow_mut();
            w.state
                .borrow_mut()
                .set_hovered(hit, w.now_ms(), &w.registry.borrow(), &mut *sink);
            sink.set_cursor(if hit.is_some() {
                CursorMode::Pointer
            } else {
                CursorMode::Grab
            });
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        {
            let mut ds = w.drag.borrow_mut();
            ds.active = true;
            ds.last_x = ev.client_x() as f32;
            ds.last_y = ev.client_y() as f32;
            ds.moved_px = 0.0;
        }
        w.sink.borrow_mut().set_cursor(CursorMode::Grabbing);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let was_drag = w.drag.borrow().active;
        if !was_drag {
            return;
        }
        let moved = w.drag.borrow().moved_px;
        w.drag.borrow_mut().active = false;

        if moved < CLICK_DRAG_EPSILON_PX {
            // A stationary press-release is a click: select the hit item,
            // or clear the selection on empty space.
            let pos = pointer_canvas_px(&ev, &w.canvas);
            let hit = resolve_under_pointer(&w, pos);
            let mut sink = w.sink.borrow_mut();
            w.state
                .borrow_mut()
                .set_clicked(hit, w.now_ms(), &w.registry.borrow(), &mut *sink);
            if let Some(id) = hit {
                log::info!("[click] selected item {:?}", id);
            }
        }
        let hovered = w.state.borrow().hovered_item();
        w.sink.borrow_mut().set_cursor(if hovered.is_some() {
            CursorMode::Pointer
        } else {
            CursorMode::Grab
        });
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        let mut z = w.camera_z.borrow_mut();
        *z = (*z + ev.delta_y() as f32 * 0.01).clamp(CAMERA_Z_MIN, CAMERA_Z_MAX);
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
