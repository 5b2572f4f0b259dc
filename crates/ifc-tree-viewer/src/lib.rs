//! IFC Tree Viewer - web app entry point
//!
//! Builds the viewer from the page configuration, loads the configured model and
//! exposes `window.loadIfcModel(url)` for switching models later.

use ifc_tree_leptos::bridge::{self, js_error, js_message};
use ifc_tree_leptos::{spawn_load, ViewerApp};
use ifc_tree_model::{Result, ViewerError};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

/// Name of the reload hook registered on `window`
pub const LOAD_HOOK: &str = "loadIfcModel";

/// WASM entry point - builds the viewer and loads the configured model
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    bridge::init_logging();

    let config = bridge::read_config();
    bridge::set_debug(config.debug);
    log::info!("Starting IFC tree viewer");

    let app = match ViewerApp::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Viewer setup failed: {}", e);
            return;
        }
    };

    if let Err(e) = register_load_hook(Rc::clone(&app)) {
        log::warn!("Could not register window.{}: {}", LOAD_HOOK, e);
    }

    let url = app.config().model_url.clone();
    spawn_load(app, url);
}

/// Register `window.loadIfcModel(url)` so the page can switch models
fn register_load_hook(app: Rc<ViewerApp>) -> Result<()> {
    let closure = Closure::wrap(Box::new(move |value: JsValue| {
        match url_argument(&value) {
            Ok(url) => spawn_load(Rc::clone(&app), url),
            Err(e) => log::error!("{}: {}", LOAD_HOOK, e),
        }
    }) as Box<dyn Fn(JsValue)>);

    let window = web_sys::window().ok_or_else(|| ViewerError::engine("no window"))?;
    js_sys::Reflect::set(&window, &LOAD_HOOK.into(), closure.as_ref()).map_err(js_error)?;

    // Leak the closure so it lives as long as the page
    closure.forget();

    log::debug!("Registered window.{}", LOAD_HOOK);
    Ok(())
}

fn url_argument(value: &JsValue) -> Result<String> {
    value
        .as_string()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ViewerError::invalid_config("model", js_message(value)))
}
