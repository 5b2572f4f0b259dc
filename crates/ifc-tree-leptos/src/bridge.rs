//! Glue between Rust and the browser
//!
//! Console logging, configuration lookup (global object + URL query) and
//! conversion of JS exceptions into [`ViewerError`].

use ifc_tree_model::{ViewerConfig, ViewerError, QUERY_KEYS};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Global debug mode flag (set from config or URL parameter ?debug=1)
static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

/// Optional page-provided config object, e.g. `window.IFC_TREE_CONFIG = { model_url: ... }`
pub const CONFIG_GLOBAL: &str = "IFC_TREE_CONFIG";

/// Prefix on every console line
const LOG_PREFIX: &str = "[IFC-Tree]";

/// Check if debug mode is enabled
pub fn is_debug() -> bool {
    DEBUG_MODE.load(Ordering::Relaxed)
}

/// `log` backend writing to the browser console
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from(format!("{} {}", LOG_PREFIX, record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger at info level
///
/// Safe to call more than once; only the first call installs the logger.
pub fn init_logging() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Info);
}

/// Switch debug logging on or off
pub fn set_debug(enabled: bool) {
    DEBUG_MODE.store(enabled, Ordering::Relaxed);
    log::set_max_level(if enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    if enabled {
        log::info!("Debug mode enabled");
    }
}

/// Build the viewer config
///
/// Starts from the defaults or `window.IFC_TREE_CONFIG`, then applies URL query
/// parameters on top.
pub fn read_config() -> ViewerConfig {
    let mut config = global_config().unwrap_or_default();

    let Some(window) = web_sys::window() else {
        return config;
    };
    let Ok(search) = window.location().search() else {
        return config;
    };
    let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
        return config;
    };

    for key in QUERY_KEYS {
        if let Some(value) = params.get(key) {
            if let Err(e) = config.apply_param(key, &value) {
                log::warn!("Ignoring query parameter: {}", e);
            }
        }
    }
    config
}

fn global_config() -> Option<ViewerConfig> {
    let value = js_sys::Reflect::get(&js_sys::global(), &CONFIG_GLOBAL.into()).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    match serde_wasm_bindgen::from_value(value) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring window.{}: {}", CONFIG_GLOBAL, e);
            None
        }
    }
}

/// Human-readable message of a thrown JS value
pub fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Wrap a thrown JS value as an engine error
pub fn js_error(value: JsValue) -> ViewerError {
    ViewerError::engine(js_message(&value))
}
