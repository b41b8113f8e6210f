//! Gesture-gated audio playback with per-frame amplitude analysis.
//!
//! `start` is only useful from a user-gesture call stack (autoplay policy);
//! it is idempotent while a start is in flight or playback is running. Every
//! failure path leaves the amplitude at zero and the scene animating from
//! base values; nothing here escapes to the hosting page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::constants::{ANALYSER_FFT_SIZE, ANALYSER_SMOOTHING, AUDIO_VOLUME};

pub struct AudioReactor {
    element: web::HtmlAudioElement,
    ctx: RefCell<Option<web::AudioContext>>,
    analyser: RefCell<Option<web::AnalyserNode>>,
    // kept alive for the lifetime of the graph; dropping it would disconnect
    // the element from the analyser on some engines
    source: RefCell<Option<web::MediaElementAudioSourceNode>>,
    sample_buf: RefCell<Vec<f32>>,
    starting: Cell<bool>,
    amplitude: Cell<f32>,
}

impl AudioReactor {
    pub fn new(url: &str) -> Result<Rc<Self>, JsValue> {
        let element = web::HtmlAudioElement::new_with_src(url)?;
        element.set_cross_origin(Some("anonymous"));
        element.set_preload("auto");
        element.set_loop(true);
        element.set_volume(AUDIO_VOLUME);
        // iOS inline playback hint
        let _ = element.set_attribute("playsinline", "");

        {
            let src = url.to_string();
            let closure = Closure::wrap(Box::new(move || {
                log::error!("audio element error, src = {src}");
            }) as Box<dyn FnMut()>);
            let _ = element
                .add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(Rc::new(Self {
            element,
            ctx: RefCell::new(None),
            analyser: RefCell::new(None),
            source: RefCell::new(None),
            sample_buf: RefCell::new(Vec::new()),
            starting: Cell::new(false),
            amplitude: Cell::new(0.0),
        }))
    }

    /// The capability handed to the gesture layer.
    pub fn starter(self: &Rc<Self>) -> AudioStarter {
        AudioStarter {
            reactor: Rc::clone(self),
        }
    }

    // Build the analysis graph exactly once; later starts resume it.
    fn ensure_graph(&self) -> Result<(), JsValue> {
        if self.ctx.borrow().is_some() {
            return Ok(());
        }
        let ctx = web::AudioContext::new()?;
        let source = ctx.create_media_element_source(&self.element)?;
        let analyser = ctx.create_analyser()?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);
        analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
        source.connect_with_audio_node(&analyser)?;
        analyser.connect_with_audio_node(&ctx.destination())?;

        *self.sample_buf.borrow_mut() = vec![0.0; analyser.fft_size() as usize];
        *self.analyser.borrow_mut() = Some(analyser);
        *self.source.borrow_mut() = Some(source);
        *self.ctx.borrow_mut() = Some(ctx);
        Ok(())
    }

    /// Attempt to start playback and analysis. Returns false when already
    /// starting/running or when the platform refuses; never panics or throws.
    pub async fn start(&self) -> bool {
        if self.starting.get() {
            return false;
        }
        if self.element.current_time() > 0.0 && !self.element.paused() {
            return false;
        }
        self.starting.set(true);
        let ok = self.start_inner().await;
        self.starting.set(false);
        if ok {
            log::info!("[audio] playback and analysis running");
        }
        ok
    }

    async fn start_inner(&self) -> bool {
        if let Err(e) = self.ensure_graph() {
            log::warn!("audio graph unavailable: {:?}", e);
            return false;
        }
        let ctx = self.ctx.borrow().as_ref().cloned();
        if let Some(ctx) = ctx {
            if ctx.state() == web::AudioContextState::Suspended {
                if let Ok(p) = ctx.resume() {
                    let _ = JsFuture::from(p).await;
                }
            }
        }

        self.element.set_muted(false);
        self.element.set_current_time(0.0);
        if self.play().await {
            return true;
        }
        // Autoplay block fallback: a muted micro-kick satisfies some mobile
        // engines, after which an unmuted replay is allowed.
        self.element.set_muted(true);
        if !self.play().await {
            self.element.set_muted(false);
            return false;
        }
        let _ = self.element.pause();
        self.element.set_muted(false);
        self.element.set_current_time(0.0);
        self.play().await
    }

    async fn play(&self) -> bool {
        match self.element.play() {
            Ok(promise) => JsFuture::from(promise).await.is_ok(),
            Err(_) => false,
        }
    }

    /// Per-frame sample on the animation cadence: time-domain buffer -> RMS
    /// -> clamped amplitude. Zero whenever the graph is absent or paused.
    pub fn sample(&self) -> f32 {
        if self.element.paused() {
            self.amplitude.set(0.0);
            return 0.0;
        }
        let analyser = self.analyser.borrow();
        let Some(analyser) = analyser.as_ref() else {
            return 0.0;
        };
        let mut buf = self.sample_buf.borrow_mut();
        analyser.get_float_time_domain_data(&mut buf);
        let amp = scene_core::amplitude(&buf);
        self.amplitude.set(amp);
        amp
    }

    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.amplitude.get()
    }

    /// Resource courtesy on tab hide. Playback does not auto-resume; the
    /// next gesture goes through `start` again.
    pub fn pause(&self) {
        let _ = self.element.pause();
        self.amplitude.set(0.0);
    }
}

/// Cloneable start capability, passed to whatever layer owns the user
/// gesture so the call happens inside the gesture stack.
#[derive(Clone)]
pub struct AudioStarter {
    reactor: Rc<AudioReactor>,
}

impl AudioStarter {
    /// Fire-and-forget from an event handler; the outcome is logged and
    /// otherwise irrelevant to the caller.
    pub fn request_start(&self) {
        let reactor = self.reactor.clone();
        spawn_local(async move {
            if !reactor.start().await {
                log::debug!("[audio] start refused (already running or blocked)");
            }
        });
    }
}
