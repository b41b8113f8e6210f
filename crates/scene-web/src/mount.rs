//! Deferred scene construction.
//!
//! Building the scene competes with the page's initial paint, so heavy
//! construction waits until the canvas is actually visible and the browser
//! reports an idle period. Everything scheduled here must be torn down by
//! `cancel` if the host dismounts first: a pending observer or idle callback
//! firing after teardown would touch released resources.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::IDLE_MOUNT_FALLBACK_MS;

type ObserverClosure = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

pub struct MountGuard {
    observer: RefCell<Option<web::IntersectionObserver>>,
    observer_cb: RefCell<Option<ObserverClosure>>,
    idle_cb: RefCell<Option<Closure<dyn FnMut()>>>,
    idle_handle: Cell<Option<u32>>,
    timeout_handle: Cell<Option<i32>>,
    action: RefCell<Option<Box<dyn FnOnce()>>>,
    cancelled: Cell<bool>,
}

impl MountGuard {
    /// Run `action` once the canvas is visible and the browser goes idle.
    pub fn defer_until_ready(
        canvas: &web::HtmlCanvasElement,
        action: impl FnOnce() + 'static,
    ) -> Rc<Self> {
        let guard = Rc::new(Self {
            observer: RefCell::new(None),
            observer_cb: RefCell::new(None),
            idle_cb: RefCell::new(None),
            idle_handle: Cell::new(None),
            timeout_handle: Cell::new(None),
            action: RefCell::new(Some(Box::new(action))),
            cancelled: Cell::new(false),
        });

        let guard_obs = guard.clone();
        let cb: ObserverClosure = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _obs: web::IntersectionObserver| {
                let intersecting = entries
                    .get(0)
                    .dyn_into::<web::IntersectionObserverEntry>()
                    .map(|e| e.is_intersecting())
                    .unwrap_or(true);
                if intersecting {
                    Self::on_visible(&guard_obs);
                }
            },
        ) as Box<dyn FnMut(_, _)>);

        match web::IntersectionObserver::new(cb.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(canvas);
                *guard.observer.borrow_mut() = Some(observer);
                *guard.observer_cb.borrow_mut() = Some(cb);
            }
            Err(e) => {
                // No observer support: treat the canvas as visible now.
                log::warn!("IntersectionObserver unavailable: {:?}", e);
                drop(cb);
                Self::on_visible(&guard);
            }
        }
        guard
    }

    fn on_visible(guard: &Rc<Self>) {
        let this = guard.as_ref();
        if this.cancelled.get() {
            return;
        }
        this.drop_observer();

        let guard = guard.clone();
        let cb = Closure::wrap(Box::new(move || guard.fire()) as Box<dyn FnMut()>);
        let Some(window) = web::window() else {
            return;
        };
        match window.request_idle_callback(cb.as_ref().unchecked_ref()) {
            Ok(handle) => this.idle_handle.set(Some(handle)),
            Err(_) => {
                // Safari has no requestIdleCallback; a short timeout keeps
                // the construction off the visibility-change stack.
                match window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    cb.as_ref().unchecked_ref(),
                    IDLE_MOUNT_FALLBACK_MS,
                ) {
                    Ok(handle) => this.timeout_handle.set(Some(handle)),
                    Err(e) => log::error!("deferred mount scheduling failed: {:?}", e),
                }
            }
        }
        *this.idle_cb.borrow_mut() = Some(cb);
    }

    fn fire(&self) {
        if self.cancelled.get() {
            return;
        }
        self.idle_handle.set(None);
        self.timeout_handle.set(None);
        // the observer closure is no longer reachable once both triggers
        // have fired; releasing it here breaks the Rc cycle
        self.observer_cb.borrow_mut().take();
        if let Some(action) = self.action.borrow_mut().take() {
            action();
        }
    }

    /// Tear down every pending trigger. Safe to call more than once, and
    /// after the action has already fired.
    pub fn cancel(&self) {
        self.cancelled.set(true);
        self.drop_observer();
        if let Some(window) = web::window() {
            if let Some(handle) = self.idle_handle.take() {
                window.cancel_idle_callback(handle);
            }
            if let Some(handle) = self.timeout_handle.take() {
                window.clear_timeout_with_handle(handle);
            }
        }
        self.observer_cb.borrow_mut().take();
        self.idle_cb.borrow_mut().take();
        self.action.borrow_mut().take();
    }

    // Disconnect only; the closure itself may be the current call frame, so
    // it is released later by fire/cancel.
    fn drop_observer(&self) {
        if let Some(observer) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
    }
}
