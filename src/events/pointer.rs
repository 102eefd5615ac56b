use crate::camera::{DragMode, OrbitControls};
use crate::interaction::InteractionState;
use crate::viewport::Viewport;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub interaction: Rc<RefCell<InteractionState>>,
    pub controls: Rc<RefCell<OrbitControls>>,
    pub viewport: Rc<RefCell<Viewport>>,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_contextmenu(&w);
}

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = client_pos(&ev);
        let vp = *w.viewport.borrow();

        w.interaction
            .borrow_mut()
            .pointer_moved(pos, Vec2::new(vp.width as f32, vp.height as f32));

        let mut controls = w.controls.borrow_mut();
        if controls.is_dragging() {
            controls.drag_to(pos, vp.height as f32);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_pointerdown(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let modifier = ev.shift_key() || ev.ctrl_key() || ev.meta_key();
        let mode = match ev.button() {
            0 if modifier => DragMode::Pan,
            0 => DragMode::Rotate,
            2 => DragMode::Pan,
            _ => return,
        };
        w.controls.borrow_mut().begin_drag(mode, client_pos(&ev));
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &PointerWiring) {
    let Some(wnd) = web::window() else {
        return;
    };
    for name in ["pointerup", "pointercancel"] {
        let w = w.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            w.controls.borrow_mut().end_drag();
            if w.canvas.has_pointer_capture(ev.pointer_id()) {
                _ = w.canvas.release_pointer_capture(ev.pointer_id());
            }
        }) as Box<dyn FnMut(_)>);
        _ = wnd.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn wire_wheel(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        w.controls.borrow_mut().wheel(ev.delta_y() as f32);
    }) as Box<dyn FnMut(_)>);
    // Non-passive so the page does not scroll while zooming
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = canvas_for_listener.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

fn wire_contextmenu(w: &PointerWiring) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}
