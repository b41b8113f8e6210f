use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::{AudioReactor, AudioStarter};
use crate::dom;

/// Arm a pointerdown listener that routes the gesture into the audio start
/// capability. The reactor itself is idempotent, so the listener can stay
/// armed; extra gestures are cheap no-ops once playback runs.
pub fn wire_gesture_start(starter: AudioStarter) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move || {
            starter.request_start();
        }) as Box<dyn FnMut()>);
        let _ = window
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Pause playback when the tab hides. Resume is deliberately not automatic:
/// the next user gesture goes through `start` again.
pub fn wire_visibility_pause(reactor: Rc<AudioReactor>) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        if doc.hidden() {
            reactor.pause();
        }
    }) as Box<dyn FnMut()>);
    let _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Keep the canvas backing store in sync with CSS size on window resize.
pub fn wire_resize(canvas: web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas);
        }) as Box<dyn FnMut()>);
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
