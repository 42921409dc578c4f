//! Per-tick pipeline: motion → proximity → timers → emphasis → draw.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::PROXIMITY_THRESHOLD;
use crate::core::{proximity, CardHover, InteractionState, Registry};
use crate::events::{DragState, MouseState};
use crate::overlay::{self, DomSink};
use crate::render::{self, MeshInstance, ParticleInstance};
use crate::scene::Scene;
use crate::camera;

pub struct FrameContext<'a> {
    pub document: web::Document,
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

    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
    pub time_sec: f32,

    mesh_instances: [Vec<MeshInstance>; 4],
    particle_instances: Vec<ParticleInstance>,
}

impl<'a> FrameContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        scene: Rc<RefCell<Scene>>,
        registry: Rc<RefCell<Registry>>,
        state: Rc<RefCell<InteractionState>>,
        sink: Rc<RefCell<DomSink>>,
        card_hover: Rc<RefCell<CardHover>>,
        mouse: Rc<RefCell<MouseState>>,
        drag: Rc<RefCell<DragState>>,
        camera_z: Rc<RefCell<f32>>,
        epoch: Rc<Instant>,
        gpu: Option<render::GpuState<'a>>,
    ) -> Self {
        Self {
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
            last_instant: Instant::now(),
            time_sec: 0.0,
            mesh_instances: Default::default(),
            particle_instances: Vec::new(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        self.time_sec += dt_sec;
        let now_ms = self.epoch.elapsed().as_secs_f64() * 1000.0;

        // Motion pass; item positions land in the registry.
        let dragging = self.drag.borrow().active;
        {
            let state = self.state.clone();
            self.scene.borrow_mut().animate(
                self.time_sec,
                dragging,
                &mut self.registry.borrow_mut(),
                |id| state.borrow().emphasis_scale(id),
            );
        }

        // Proximity probe from the viewer, debounced into the state.
        let camera_z = *self.camera_z.borrow();
        let candidate = proximity::nearest_within(
            camera::eye(camera_z),
            &self.registry.borrow(),
            PROXIMITY_THRESHOLD,
        );
        {
            let mut state = self.state.borrow_mut();
            state.observe_near(candidate, now_ms);
            state.poll(now_ms, &self.registry.borrow(), &mut *self.sink.borrow_mut());
            state.step_emphasis(&self.registry.borrow());
        }

        // Profile overlay follows the screen-space card hover.
        if let Some(entered) = self.card_hover.borrow_mut().poll(now_ms) {
            if entered {
                overlay::show_profile(&self.document);
            } else {
                overlay::hide_profile(&self.document);
            }
        }

        self.build_draw_lists();

        let mouse = *self.mouse.borrow();
        let pointer_ndc = render::pointer_ndc(&self.canvas, Vec2::new(mouse.x, mouse.y));
        let lights = self.scene.borrow().lights(self.time_sec, pointer_ndc);
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let draw = render::FrameDraw {
                camera_z,
                lights,
                meshes: &self.mesh_instances,
                particles: &self.particle_instances,
            };
            if let Err(e) = g.render(dt_sec, &draw) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    fn build_draw_lists(&mut self) {
        for list in &mut self.mesh_instances {
            list.clear();
        }
        self.particle_instances.clear();

        let scene = self.scene.borrow();
        let registry = self.registry.borrow();
        let state = self.state.borrow();
        for node in scene.nodes() {
            let Some(mesh) = node.mesh else { continue };
            let glow = match node.owner {
                Some(id) => state.glow_ratio(&registry, id),
                None => 1.0,
            };
            self.mesh_instances[render::mesh_slot(mesh)].push(MeshInstance {
                model: node.world().to_cols_array_2d(),
                color: node.color.to_array(),
                emissive: [node.emissive * glow, 0.0, 0.0, 0.0],
            });
        }
        for layer in &scene.particles {
            render::pack_particles(layer, &mut self.particle_instances);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
