//! Per-frame orchestration: one requestAnimationFrame callback ticks every
//! animator, then hands the composed draw list to the renderer.

use glam::{EulerRot, Mat4, Vec3};
use instant::Instant;
use rand::rngs::SmallRng;
use scene_core::{
    AnchoredShapes, FrameQuality, GalaxyField, ModelAnimator, PassingShapes, QualityController,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::AudioReactor;
use crate::render::{GpuState, MeshSlot, ShapeDraw, ShapeInstance};

pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    pub galaxy: GalaxyField,
    pub passing: PassingShapes,
    pub anchored: AnchoredShapes,
    pub model: ModelAnimator,
    pub quality: FrameQuality,
    pub controller: QualityController,
    /// Absent when the platform refused an audio element; the scene then
    /// animates from base values.
    pub audio: Option<Rc<AudioReactor>>,
    pub gpu: Option<GpuState<'static>>,
    pub rng: SmallRng,
    pub particle_size: f32,
    pub adaptive: bool,
    pub started_at: Instant,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let elapsed = (now - self.started_at).as_secs_f32();

        // Quality adjustment is applied before anything reads the draw
        // range, so a frame never sees a transitional count.
        if self.adaptive {
            if let Some(event) = self.quality.push(dt) {
                let count = self.controller.apply(event);
                self.galaxy.set_count(count);
                log::info!("[quality] {:?} -> {} particles", event, count);
            }
        }

        self.passing.tick(elapsed, dt, &mut self.rng);
        self.anchored.tick(elapsed, dt);
        let amplitude = self.audio.as_ref().map_or(0.0, |a| a.sample());
        self.model.tick(elapsed, dt, amplitude);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());

        let mut draws: Vec<ShapeDraw> =
            Vec::with_capacity(self.anchored.len() + self.passing.pool_size() + 1);

        let group = Mat4::from_rotation_y(self.anchored.group_yaw());
        for i in 0..self.anchored.len() {
            let r = self.anchored.rotation(i);
            let m = group
                * Mat4::from_translation(self.anchored.position(i))
                * Mat4::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
            draws.push(ShapeDraw {
                mesh: MeshSlot::Anchored(self.anchored.kind(i)),
                instance: ShapeInstance::new(m, 1.0),
            });
        }

        for s in self.passing.iter_active() {
            let m = Mat4::from_translation(s.position)
                * Mat4::from_euler(EulerRot::XYZ, s.rotation.x, s.rotation.y, s.rotation.z);
            draws.push(ShapeDraw {
                mesh: MeshSlot::Passing(s.kind),
                instance: ShapeInstance::new(m, s.opacity),
            });
        }

        if gpu.has_model() {
            let m = Mat4::from_translation(self.model.position())
                * Mat4::from_rotation_y(self.model.rotation_y())
                * Mat4::from_rotation_z(self.model.clip_sway())
                * Mat4::from_scale(Vec3::splat(self.model.scale()));
            draws.push(ShapeDraw {
                mesh: MeshSlot::Model,
                instance: ShapeInstance::new(m, 1.0),
            });
        }

        let rotation = GalaxyField::rotation_y(elapsed);
        let size = GalaxyField::point_size(self.particle_size, elapsed);
        if let Err(e) = gpu.render(self.galaxy.count(), rotation, size, &draws) {
            log::error!("render error: {:?}", e);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
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
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
