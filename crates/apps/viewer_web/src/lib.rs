use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use foundation::time::Time;
use formats::{HistoricalEvent, cache_busted_url, ingest_history, parse_history};
use gpu::Renderer;
use runtime::event_bus::{Event, EventKind};
use scene::camera::client_to_ndc;
use scene::config::RadiantConfig;
use scene::interaction::Hover;
use scene::radiant::Radiant;

mod dom;
mod wgpu;
use wgpu::{WgpuContext, init_wgpu_from_canvas, render_frame};

#[derive(Debug)]
pub struct ViewerState {
    pub radiant: Radiant,
    pub canvas: web_sys::HtmlCanvasElement,
    pub wgpu: Option<WgpuContext>,
    /// Bumped on teardown so a fetch that outlives its viewer is dropped.
    pub generation: u64,
}

thread_local! {
    static STATE: RefCell<Option<ViewerState>> = const { RefCell::new(None) };
    static CONFIG: RefCell<RadiantConfig> = RefCell::new(RadiantConfig::default());
    static GENERATION: RefCell<u64> = const { RefCell::new(0) };
}

fn config_snapshot() -> RadiantConfig {
    CONFIG.with(|c| c.borrow().clone())
}

fn with_viewer<R>(f: impl FnOnce(&mut ViewerState) -> R) -> Option<R> {
    STATE.with(|state| state.borrow_mut().as_mut().map(f))
}

fn log_events(events: &[Event]) {
    for event in events {
        match event.kind {
            EventKind::Selected => dom::log(&format!("Event selected: {}", event.message)),
            EventKind::LoadFailed => {
                dom::error(&format!("Failed to load history: {}", event.message))
            }
            EventKind::Loaded => dom::log(&format!("Prime Radiant loaded {}", event.message)),
            _ => {}
        }
    }
}

fn render_scene() -> Result<(), JsValue> {
    with_viewer(|viewer| {
        let events = viewer.radiant.drain_events();
        log_events(&events);
        match &mut viewer.wgpu {
            Some(ctx) => render_frame(ctx, &Renderer::collect(&viewer.radiant)),
            None => Ok(()),
        }
    })
    .unwrap_or(Ok(()))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Builds the radiant on the container canvas, then starts the GPU and the
/// history fetch. Calling it again replaces the running instance.
#[wasm_bindgen]
pub fn init_prime_radiant() -> Result<(), JsValue> {
    teardown_prime_radiant();

    let config = config_snapshot();
    let canvas = match dom::canvas_by_id(&config.container_id) {
        Ok(c) => c,
        Err(err) => {
            dom::error(&format!("Prime Radiant init aborted: {err:?}"));
            return Err(err);
        }
    };

    let width = canvas.client_width().max(1) as u32;
    let height = canvas.client_height().max(1) as u32;
    canvas.set_width(width);
    canvas.set_height(height);

    let radiant = Radiant::new(config.clone(), width as f64, height as f64);
    let generation = GENERATION.with(|g| *g.borrow());
    STATE.with(|state| {
        *state.borrow_mut() = Some(ViewerState {
            radiant,
            canvas: canvas.clone(),
            wgpu: None,
            generation,
        });
    });

    spawn_local(async move {
        match init_wgpu_from_canvas(canvas).await {
            Ok(ctx) => {
                with_viewer(|viewer| {
                    if viewer.generation == generation {
                        viewer.wgpu = Some(ctx);
                    }
                });
            }
            Err(err) => dom::error(&format!("wgpu init error: {err:?}")),
        }
    });

    spawn_local(async move {
        let url = cache_busted_url(&config.data_url, js_sys::Date::now() as u64);
        let result = fetch_history(&url).await;
        with_viewer(|viewer| {
            if viewer.generation != generation {
                return;
            }
            let count = match result {
                Ok(events) => ingest_history(&mut viewer.radiant, &events),
                Err(reason) => {
                    viewer.radiant.load_failed(&reason);
                    0
                }
            };
            dom::set_text(&config.count_id, &count.to_string());
        });
    });

    Ok(())
}

/// One animation frame: spin, pulse, flash expiry, then draw.
#[wasm_bindgen]
pub fn advance_frame() -> Result<(), JsValue> {
    let now = Time::from_millis(dom::now_ms());
    with_viewer(|viewer| viewer.radiant.advance_frame(now));
    render_scene()
}

/// Pointer moved to client coordinates `(x, y)`.
#[wasm_bindgen]
pub fn cursor_move(x: f64, y: f64) -> Result<(), JsValue> {
    with_viewer(|viewer| {
        let config = viewer.radiant.config().clone();
        let rect = dom::client_rect(&viewer.canvas);
        let Some(ndc) = client_to_ndc(x, y, rect) else {
            return;
        };
        match viewer.radiant.pointer_move(ndc) {
            Hover::Marker { tooltip, .. } => {
                dom::show_tooltip(&config.tooltip_id, &tooltip, x, y, config.tooltip_offset_px)
            }
            Hover::Nothing => dom::hide_tooltip(&config.tooltip_id),
        }
    });
    Ok(())
}

/// Click at client coordinates `(x, y)`.
#[wasm_bindgen]
pub fn cursor_click(x: f64, y: f64) -> Result<(), JsValue> {
    let now = Time::from_millis(dom::now_ms());
    with_viewer(|viewer| {
        let rect = dom::client_rect(&viewer.canvas);
        if let Some(ndc) = client_to_ndc(x, y, rect) {
            viewer.radiant.click(ndc, now);
        }
    });
    render_scene()
}

#[wasm_bindgen]
pub fn set_rotation_enabled(enabled: bool) {
    CONFIG.with(|c| c.borrow_mut().rotation_enabled = enabled);
    with_viewer(|viewer| viewer.radiant.set_rotation_enabled(enabled));
}

#[wasm_bindgen]
pub fn get_event_count() -> u32 {
    with_viewer(|viewer| viewer.radiant.event_count() as u32).unwrap_or(0)
}

/// Current configuration as JSON.
#[wasm_bindgen]
pub fn get_config() -> String {
    config_snapshot().to_json_string()
}

/// Sets one numeric config key; applies immediately to a running radiant.
#[wasm_bindgen]
pub fn set_config_value(key: &str, value: f64) -> Result<(), JsValue> {
    let config = CONFIG.with(|c| {
        let mut c = c.borrow_mut();
        c.set_value(key, value)
            .map(|_| c.clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    })?;
    apply_config(config);
    Ok(())
}

#[wasm_bindgen]
pub fn reset_config() {
    let config = RadiantConfig::default();
    CONFIG.with(|c| *c.borrow_mut() = config.clone());
    apply_config(config);
}

/// Drops the running radiant. Pending fetches complete into nothing.
#[wasm_bindgen]
pub fn teardown_prime_radiant() {
    GENERATION.with(|g| *g.borrow_mut() += 1);
    let previous = STATE.with(|state| state.borrow_mut().take());
    if let Some(viewer) = previous {
        dom::hide_tooltip(&viewer.radiant.config().tooltip_id);
    }
}

fn apply_config(config: RadiantConfig) {
    with_viewer(|viewer| viewer.radiant.apply_config(config));
}

async fn fetch_history(url: &str) -> Result<Vec<HistoricalEvent>, String> {
    let resp = Request::get(url).send().await.map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(format!("HTTP {} for {url}", resp.status()));
    }
    let text = resp.text().await.map_err(|e| e.to_string())?;
    parse_history(&text).map_err(|e| e.to_string())
}
