#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod config;
mod constants;
// Host-side mirror of shaders/glass.wgsl, exercised by tests.
#[allow(dead_code)]
mod dispersion;
mod dom;
mod events;
mod font;
mod frame;
mod geometry;
mod interaction;
mod lifecycle;
mod loader;
mod passes;
mod render;
mod scene;
mod text;
mod uniforms;
mod viewport;

use camera::OrbitControls;
use config::SceneConfig;
use interaction::InteractionState;
use passes::RefractionController;
use scene::SceneContext;

fn read_config(defaults: SceneConfig, canvas: &web::HtmlCanvasElement) -> SceneConfig {
    defaults.with_overrides(
        dom::canvas_data_attr(canvas, "text"),
        dom::canvas_data_attr(canvas, "font-url"),
    )
}

/// Fetch the font in the background and leave the finished mesh for the
/// frame loop. Any failure leaves the scene without text.
fn spawn_font_load(config: SceneConfig, pending_text: frame::PendingText) {
    spawn_local(async move {
        let mut last_logged = -1i32;
        let result = loader::load_font(&config.font_url, |p| {
            if let Some(pct) = p.percent() {
                let bucket = (pct / 25.0) as i32;
                if bucket != last_logged {
                    last_logged = bucket;
                    log::info!("[font] {:.0}% loaded", pct);
                }
            } else {
                log::debug!("[font] {} bytes loaded", p.loaded);
            }
        })
        .await;
        if let Some(mesh) = text::text_from_font_load(result, &config.text, &config.text_params) {
            *pending_text.borrow_mut() = Some(mesh);
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("glass-refraction starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let defaults = SceneConfig::default();
    let canvas = dom::find_canvas(&document, &defaults.canvas_id)?;
    let config = read_config(defaults, &canvas);
    log::info!("scene text {:?}, font {}", config.text, config.font_url);

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    let initial = dom::current_viewport();
    dom::sync_canvas_backing_size(&canvas, &initial);
    let viewport = Rc::new(RefCell::new(initial));
    events::wire_resize(&canvas, viewport.clone());

    let scene = SceneContext::new(&initial);
    let gpu = frame::init_gpu(&canvas, &scene, &initial).await;
    if gpu.is_none() {
        log::warn!("running without a renderer");
    }

    let interaction = Rc::new(RefCell::new(InteractionState::default()));
    let controls = Rc::new(RefCell::new(OrbitControls::default()));
    events::wire_pointer_handlers(events::PointerWiring {
        canvas: canvas.clone(),
        interaction: interaction.clone(),
        controls: controls.clone(),
        viewport: viewport.clone(),
    });

    let pending_text: frame::PendingText = Rc::new(RefCell::new(None));
    spawn_font_load(config, pending_text.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        gpu,
        refraction: RefractionController::default(),
        interaction,
        controls,
        viewport,
        pending_text,
        started: Instant::now(),
        last_viewport: initial,
    }));
    // Start RAF loop
    let handle = frame::start_loop(frame_ctx);
    events::wire_page_lifecycle(handle);
    Ok(())
}
