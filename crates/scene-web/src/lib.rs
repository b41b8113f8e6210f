#![cfg(target_arch = "wasm32")]

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod model;
mod mount;
mod render;

use instant::Instant;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use scene_core::{
    palette, AnchoredShapes, Camera, DeviceTier, FrameQuality, GalaxyField, GalaxyParams,
    ModelAnimator, PassingShapes, QualityController, TierProfile, PARTICLE_FLOOR,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

thread_local! {
    static PENDING_MOUNT: RefCell<Option<Rc<mount::MountGuard>>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scene-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::sync_canvas_backing_size(&canvas);

    // Heavy scene construction waits until the canvas is visible and the
    // browser is idle, so it never competes with the initial page paint.
    let canvas_mount = canvas.clone();
    let guard = mount::MountGuard::defer_until_ready(&canvas, move || {
        PENDING_MOUNT.with(|g| g.borrow_mut().take());
        spawn_local(build_scene(canvas_mount));
    });
    PENDING_MOUNT.with(|g| *g.borrow_mut() = Some(guard));
    Ok(())
}

/// Cancel a still-pending deferred mount. The hosting page calls this when
/// it removes the scene before construction was triggered; afterwards no
/// timer or observer from this module can fire.
#[wasm_bindgen]
pub fn dismount() {
    PENDING_MOUNT.with(|g| {
        if let Some(guard) = g.borrow_mut().take() {
            guard.cancel();
        }
    });
}

async fn build_scene(canvas: web::HtmlCanvasElement) {
    let tier = DeviceTier::from_reduced_layout(dom::reduced_layout());
    let profile = TierProfile::for_tier(tier);
    let theme = dom::theme_from_canvas(&canvas);
    let adaptive = dom::adaptive_perf_enabled(&canvas);
    log::info!(
        "[mount] tier {:?}: {} particles, pool {}, {} anchors",
        tier,
        profile.particle_ceiling,
        profile.shape_pool,
        profile.anchor_count
    );

    let mut rng = SmallRng::from_entropy();
    let galaxy = GalaxyField::generate(&GalaxyParams::for_profile(&profile), &theme, &mut rng);
    let stops = palette::vibrant_stops(&theme);
    let passing = PassingShapes::new(profile.shape_pool, profile.passing_base_speed);
    let anchored = AnchoredShapes::new(&profile);

    let loaded = model::fetch_model(constants::MODEL_URL).await;
    let model_anim = ModelAnimator::new(&profile, loaded.as_ref().and_then(|m| m.clip_duration));

    let audio = match audio::AudioReactor::new(constants::AUDIO_URL) {
        Ok(a) => Some(a),
        Err(e) => {
            log::warn!("audio unavailable: {:?}", e);
            None
        }
    };

    let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
    let camera = Camera::for_profile(&profile, aspect);

    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    let gpu = match render::GpuState::new(
        leaked_canvas,
        camera,
        &galaxy,
        &stops,
        loaded.as_ref().map(|m| &m.mesh),
    )
    .await
    {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    };

    let controller = QualityController::new(
        profile.particle_ceiling,
        PARTICLE_FLOOR.min(profile.particle_ceiling),
        profile.particle_ceiling,
    );

    let ctx = Rc::new(RefCell::new(frame::FrameContext {
        canvas: canvas.clone(),
        galaxy,
        passing,
        anchored,
        model: model_anim,
        quality: FrameQuality::with_defaults(),
        controller,
        audio: audio.clone(),
        gpu,
        rng,
        particle_size: profile.particle_size,
        adaptive,
        started_at: Instant::now(),
        last_instant: Instant::now(),
    }));

    if let Some(audio) = &audio {
        events::wire_gesture_start(audio.starter());
        events::wire_visibility_pause(audio.clone());
    }
    events::wire_resize(canvas);
    frame::start_loop(ctx);
    log::info!("[mount] scene running");
}
