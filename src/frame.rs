use crate::camera::OrbitControls;
use crate::geometry::MeshData;
use crate::interaction::InteractionState;
use crate::lifecycle::LoopAction;
use crate::passes::RefractionController;
use crate::render;
use crate::scene::SceneContext;
use crate::viewport::Viewport;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Slot the font loader fills once; the frame loop takes it.
pub type PendingText = Rc<RefCell<Option<MeshData>>>;

pub struct FrameContext<'a> {
    pub scene: SceneContext,
    pub gpu: Option<render::GpuState<'a>>,
    pub refraction: RefractionController,

    pub interaction: Rc<RefCell<InteractionState>>,
    pub controls: Rc<RefCell<OrbitControls>>,
    pub viewport: Rc<RefCell<Viewport>>,
    pub pending_text: PendingText,

    pub started: Instant,
    pub last_viewport: Viewport,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let viewport = *self.viewport.borrow();
        if viewport != self.last_viewport {
            self.last_viewport = viewport;
            self.scene.resize(&viewport);
            if let Some(g) = &mut self.gpu {
                g.resize_if_needed(&viewport);
            }
        }

        if let Some(mesh) = self.pending_text.borrow_mut().take() {
            self.scene.set_text_mesh(mesh);
        }

        self.controls.borrow_mut().update(&mut self.scene.camera);
        let t = self.started.elapsed().as_secs_f32();
        self.scene.advance(t, &mut self.interaction.borrow_mut());

        if let Some(g) = &mut self.gpu {
            match g.render(&self.scene, &mut self.refraction) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[frame] surface lost, reconfiguring");
                    g.reconfigure();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }

    fn release(&mut self) {
        if let Some(g) = self.gpu.take() {
            g.release();
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: &SceneContext,
    viewport: &Viewport,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, scene, viewport).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running animation loop.
#[derive(Clone)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickClosure,
    frame_ctx: Rc<RefCell<FrameContext<'static>>>,
}

impl LoopHandle {
    /// Cancel the pending frame, drop the callback and free GPU targets.
    /// Calling it again is a no-op.
    pub fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
        self.frame_ctx.borrow_mut().release();
        log::info!("[frame] loop stopped");
    }

    /// Cancel the pending frame but keep the callback and GPU state.
    pub fn pause(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        log::info!("[frame] loop paused");
    }

    /// Restart a paused loop. A stopped loop has no callback and stays down.
    pub fn resume(&self) {
        if self.running.get() || self.tick.borrow().is_none() {
            return;
        }
        self.running.set(true);
        request_frame(&self.tick, &self.raf_id);
        log::info!("[frame] loop resumed");
    }

    pub fn apply(&self, action: LoopAction) {
        match action {
            LoopAction::Pause => self.pause(),
            LoopAction::Resume => self.resume(),
            LoopAction::Stop => self.stop(),
            LoopAction::Ignore => {}
        }
    }
}

fn request_frame(tick: &TickClosure, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        raf_id.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> LoopHandle {
    let handle = LoopHandle {
        running: Rc::new(Cell::new(true)),
        raf_id: Rc::new(Cell::new(None)),
        tick: Rc::new(RefCell::new(None)),
        frame_ctx,
    };
    let running = handle.running.clone();
    let raf_id = handle.raf_id.clone();
    let tick_weak = Rc::downgrade(&handle.tick);
    let frame_ctx_tick = handle.frame_ctx.clone();
    *handle.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_id.set(None);
        if !running.get() {
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        if let Some(tick) = tick_weak.upgrade() {
            request_frame(&tick, &raf_id);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&handle.tick, &handle.raf_id);
    handle
}
