#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod github;
mod overlay;
mod render;
mod scene;

use crate::constants::{
    ACTIVE_GLOW_BOOST, ACTIVE_SCALE, CARD_HOVER_SETTLE_MS, EMPHASIS_ALPHA, GITHUB_USERNAME,
    HIDE_FADE_MS, MAX_REPOS_DISPLAY, NEAR_DEBOUNCE_MS,
};
use crate::core::{CardHover, InteractionState, InteractionTuning, Registry};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Fetch the profile and listings, populating the scene with whatever
/// succeeded. A profile failure surfaces inline; a listing failure only
/// skips the panels.
async fn populate_from_remote(
    document: &web::Document,
    scene: &Rc<RefCell<scene::Scene>>,
    registry: &Rc<RefCell<Registry>>,
) {
    match github::fetch_profile(GITHUB_USERNAME).await {
        Ok(profile) => {
            log::info!(
                "[fetch] profile {} ({} public repos)",
                profile.display_name(),
                profile.public_repos
            );
            overlay::set_profile(document, &profile);
            match github::fetch_recent_repos(GITHUB_USERNAME, MAX_REPOS_DISPLAY).await {
                Ok(repos) => {
                    scene
                        .borrow_mut()
                        .add_repo_panels(&mut registry.borrow_mut(), &repos);
                }
                Err(e) => {
                    // Degraded but not fatal: the panels simply don't exist.
                    log::warn!("[fetch] repo listing failed: {e:?}");
                }
            }
            scene.borrow_mut().add_skill_badges(&mut registry.borrow_mut());
            overlay::hide_loading(document);
        }
        Err(e) => {
            log::error!("[fetch] profile failed: {e:?}");
            overlay::show_load_error(document, &format!("Error: {e}"));
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("orbitfolio starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    // ---------------- Scene + interaction state ----------------
    let registry = Rc::new(RefCell::new(Registry::new()));
    let scene = Rc::new(RefCell::new(scene::Scene::new(&mut registry.borrow_mut())));
    let state = Rc::new(RefCell::new(InteractionState::new(InteractionTuning {
        near_debounce_ms: NEAR_DEBOUNCE_MS,
        hide_fade_ms: HIDE_FADE_MS,
        emphasis_alpha: EMPHASIS_ALPHA,
        active_glow_boost: ACTIVE_GLOW_BOOST,
        active_scale: ACTIVE_SCALE,
    })));
    let sink = Rc::new(RefCell::new(overlay::DomSink::new(
        document.clone(),
        canvas.clone(),
    )));
    let card_hover = Rc::new(RefCell::new(CardHover::new(CARD_HOVER_SETTLE_MS)));
    let mouse = Rc::new(RefCell::new(events::MouseState::default()));
    let drag = Rc::new(RefCell::new(events::DragState::default()));
    let camera_z = Rc::new(RefCell::new(constants::CAMERA_Z_DEFAULT));
    let epoch = Rc::new(Instant::now());

    // One fetch per session, awaited before the dependent population.
    populate_from_remote(&document, &scene, &registry).await;

    let gpu = frame::init_gpu(&canvas).await;

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        registry: registry.clone(),
        state: state.clone(),
        sink: sink.clone(),
        card_hover: card_hover.clone(),
        mouse: mouse.clone(),
        drag: drag.clone(),
        camera_z: camera_z.clone(),
        epoch: epoch.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        document,
        canvas,
        scene,
        registry,
        state,
        sink,
        card_hover,
        mouse,
        drag,
        camera_z,
        epoch,
        gpu,
    )));
    frame::start_loop(frame_ctx);

    Ok(())
}
