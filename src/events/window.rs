use crate::dom;
use crate::frame::LoopHandle;
use crate::lifecycle::{loop_action, PageTransition};
use crate::viewport::Viewport;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keep the canvas backing store and the shared viewport in step with the
/// window. The frame loop applies the new viewport on its next tick.
pub fn wire_resize(canvas: &web::HtmlCanvasElement, viewport: Rc<RefCell<Viewport>>) {
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        let vp = dom::current_viewport();
        dom::sync_canvas_backing_size(&canvas_resize, &vp);
        *viewport.borrow_mut() = vp;
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Pause on `pagehide` into the back/forward cache and resume on the
/// matching `pageshow`. A real unload stops the loop.
pub fn wire_page_lifecycle(handle: LoopHandle) {
    let Some(window) = web::window() else {
        return;
    };
    for (name, transition) in [
        ("pagehide", PageTransition::Hide),
        ("pageshow", PageTransition::Show),
    ] {
        let handle = handle.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
            handle.apply(loop_action(transition, ev.persisted()));
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
