// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer configuration
//!
//! Defaults reproduce the stock page (`#viewer-container`, `#tree-root`, the sample
//! model under `ifc_models/`). Individual values can be overridden from URL query
//! parameters, e.g. `?model=ifc_models/02.ifc&shadows=0&debug=1`.

use crate::{Result, ViewerError};
use serde::{Deserialize, Serialize};

/// Highlight material for prepick/pick
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighlightStyle {
    /// RGB color as 0xRRGGBB
    pub color: u32,
    pub opacity: f32,
}

impl HighlightStyle {
    pub const PREPICK: HighlightStyle = HighlightStyle {
        color: 0xb1fc03,
        opacity: 0.7,
    };

    pub const PICK: HighlightStyle = HighlightStyle {
        color: 0x3d7af5,
        opacity: 0.7,
    };
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Model loaded at startup
    pub model_url: String,
    /// Directory holding the engine's IFC parser wasm
    pub wasm_path: String,
    /// Element the 3D view is attached to
    pub container_id: String,
    /// List element the spatial tree is rendered into
    pub tree_root_id: String,
    /// Any CSS color understood by the graphics library
    pub background_color: String,
    pub prepick_highlight: HighlightStyle,
    pub pick_highlight: HighlightStyle,
    pub show_axes: bool,
    pub show_grid: bool,
    /// Render a drop shadow under the model after loading
    pub shadows: bool,
    /// Enable the renderer's post-processing pass
    pub post_production: bool,
    /// Verbose console logging
    pub debug: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_url: "ifc_models/01.ifc".to_string(),
            wasm_path: "wasm/".to_string(),
            container_id: "viewer-container".to_string(),
            tree_root_id: "tree-root".to_string(),
            background_color: "white".to_string(),
            prepick_highlight: HighlightStyle::PREPICK,
            pick_highlight: HighlightStyle::PICK,
            show_axes: true,
            show_grid: true,
            shadows: true,
            post_production: true,
            debug: false,
        }
    }
}

/// Query parameters understood by [`ViewerConfig::apply_param`]
pub const QUERY_KEYS: &[&str] = &[
    "model",
    "wasm",
    "debug",
    "shadows",
    "postproduction",
    "axes",
    "grid",
];

impl ViewerConfig {
    /// Apply one query parameter
    ///
    /// Unknown keys are ignored so the page can carry its own parameters.
    pub fn apply_param(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "model" if !value.is_empty() => self.model_url = value.to_string(),
            "model" => return Err(ViewerError::invalid_config(key, value)),
            "wasm" => self.wasm_path = value.to_string(),
            "debug" => self.debug = parse_flag(key, value)?,
            "shadows" => self.shadows = parse_flag(key, value)?,
            "postproduction" => self.post_production = parse_flag(key, value)?,
            "axes" => self.show_axes = parse_flag(key, value)?,
            "grid" => self.show_grid = parse_flag(key, value)?,
            _ => {}
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ViewerError::invalid_config(key, value)),
    }
}
