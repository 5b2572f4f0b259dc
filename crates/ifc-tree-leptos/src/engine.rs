//! Bindings to the JavaScript 3D viewer (web-ifc-viewer) and graphics library (three)
//!
//! Only the handful of calls the tree viewer needs are bound. Everything heavy
//! (IFC parsing, tessellation, scene, shadows, post-processing) stays in JS.

use crate::bridge::{js_error, js_message};
use ifc_tree_model::{
    ExpressId, HighlightStyle, ItemSelector, ModelIndex, Result, SpatialNode, ViewerConfig,
    ViewerError,
};
use js_sys::{Array, Object, Promise, Reflect};
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};

#[wasm_bindgen(module = "three")]
extern "C" {
    pub type Color;

    #[wasm_bindgen(constructor)]
    pub fn new(value: &str) -> Color;
}

#[wasm_bindgen(module = "three")]
extern "C" {
    pub type MeshBasicMaterial;

    #[wasm_bindgen(constructor)]
    pub fn new(parameters: &JsValue) -> MeshBasicMaterial;
}

#[wasm_bindgen(module = "web-ifc-viewer")]
extern "C" {
    #[wasm_bindgen(js_name = IfcViewerAPI)]
    pub type IfcViewerApi;

    #[wasm_bindgen(constructor, js_class = "IfcViewerAPI", catch)]
    pub fn new(options: &JsValue) -> std::result::Result<IfcViewerApi, JsValue>;

    #[wasm_bindgen(method, getter)]
    pub fn axes(this: &IfcViewerApi) -> Axes;

    #[wasm_bindgen(method, getter)]
    pub fn grid(this: &IfcViewerApi) -> Grid;

    #[wasm_bindgen(method, getter = IFC)]
    pub fn ifc(this: &IfcViewerApi) -> IfcManager;

    #[wasm_bindgen(method, getter = shadowDropper)]
    pub fn shadow_dropper(this: &IfcViewerApi) -> ShadowDropper;

    #[wasm_bindgen(method, getter)]
    pub fn context(this: &IfcViewerApi) -> IfcContext;

    pub type Axes;

    #[wasm_bindgen(method, js_name = setAxes)]
    pub fn set_axes(this: &Axes);

    pub type Grid;

    #[wasm_bindgen(method, js_name = setGrid)]
    pub fn set_grid(this: &Grid);

    pub type IfcContext;

    #[wasm_bindgen(method, getter)]
    pub fn renderer(this: &IfcContext) -> IfcRenderer;

    pub type IfcRenderer;

    #[wasm_bindgen(method, getter = postProduction)]
    pub fn post_production(this: &IfcRenderer) -> PostProduction;

    pub type PostProduction;

    #[wasm_bindgen(method, setter)]
    pub fn set_active(this: &PostProduction, active: bool);

    pub type ShadowDropper;

    #[wasm_bindgen(method, catch, js_name = renderShadow)]
    pub async fn render_shadow(
        this: &ShadowDropper,
        model_id: u32,
    ) -> std::result::Result<JsValue, JsValue>;

    pub type IfcManager;

    #[wasm_bindgen(method, js_name = setWasmPath)]
    pub fn set_wasm_path(this: &IfcManager, path: &str);

    #[wasm_bindgen(method, catch, js_name = loadIfcUrl)]
    pub async fn load_ifc_url(this: &IfcManager, url: &str)
        -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getSpatialStructure)]
    pub async fn get_spatial_structure(
        this: &IfcManager,
        model_id: u32,
    ) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = removeIfcModel)]
    pub fn remove_ifc_model(this: &IfcManager, model_id: u32) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, getter)]
    pub fn selector(this: &IfcManager) -> IfcSelector;

    #[derive(Clone)]
    pub type IfcSelector;

    #[wasm_bindgen(method, getter)]
    pub fn preselection(this: &IfcSelector) -> Selection;

    #[wasm_bindgen(method, getter)]
    pub fn selection(this: &IfcSelector) -> Selection;

    #[wasm_bindgen(method, js_name = prepickIfcItemsByID)]
    pub fn prepick_ifc_items_by_id(this: &IfcSelector, model_id: u32, ids: &Array) -> JsValue;

    #[wasm_bindgen(method, js_name = pickIfcItemsByID)]
    pub fn pick_ifc_items_by_id(this: &IfcSelector, model_id: u32, ids: &Array) -> JsValue;

    #[wasm_bindgen(method, js_name = prePickIfcItem)]
    pub fn pre_pick_ifc_item(this: &IfcSelector) -> JsValue;

    #[wasm_bindgen(method, js_name = pickIfcItem)]
    pub fn pick_ifc_item(this: &IfcSelector) -> JsValue;

    #[wasm_bindgen(method, js_name = unPrepickIfcItems)]
    pub fn un_prepick_ifc_items(this: &IfcSelector) -> JsValue;

    #[wasm_bindgen(method, js_name = unpickIfcItems)]
    pub fn unpick_ifc_items(this: &IfcSelector) -> JsValue;

    pub type Selection;

    #[wasm_bindgen(method, setter)]
    pub fn set_material(this: &Selection, material: &MeshBasicMaterial);
}

/// Parameters for `new MeshBasicMaterial(...)`
#[derive(Serialize)]
struct MaterialParams {
    color: u32,
    transparent: bool,
    opacity: f32,
}

fn highlight_material(style: &HighlightStyle) -> Result<MeshBasicMaterial> {
    let params = serde_wasm_bindgen::to_value(&MaterialParams {
        color: style.color,
        transparent: true,
        opacity: style.opacity,
    })
    .map_err(|e| ViewerError::engine(e.to_string()))?;
    Ok(MeshBasicMaterial::new(&params))
}

/// What the viewer needs from a 3D engine
///
/// [`Engine`] is the web-ifc-viewer implementation.
#[allow(async_fn_in_trait)]
pub trait SceneEngine {
    /// Selector used by the selection bridge
    fn selector(&self) -> Rc<dyn ItemSelector>;

    /// Load a model and return the index the engine assigned to it
    async fn load_model(&self, url: &str) -> Result<ModelIndex>;

    /// Drop a loaded model from the scene
    fn remove_model(&self, model: ModelIndex) -> Result<()>;

    async fn render_shadow(&self, model: ModelIndex) -> Result<()>;

    fn set_post_production(&self, active: bool);

    /// Fetch and decode the spatial structure of a loaded model
    async fn spatial_structure(&self, model: ModelIndex) -> Result<SpatialNode>;
}

/// Owned handle to the 3D viewer
pub struct Engine {
    viewer: IfcViewerApi,
}

impl Engine {
    /// Create the viewer inside `container` and apply the scene settings
    pub fn new(container: &web_sys::HtmlElement, config: &ViewerConfig) -> Result<Self> {
        let options = Object::new();
        Reflect::set(&options, &"container".into(), container).map_err(js_error)?;
        Reflect::set(
            &options,
            &"backgroundColor".into(),
            &Color::new(&config.background_color),
        )
        .map_err(js_error)?;

        let viewer = IfcViewerApi::new(&options).map_err(js_error)?;
        if config.show_axes {
            viewer.axes().set_axes();
        }
        if config.show_grid {
            viewer.grid().set_grid();
        }

        let ifc = viewer.ifc();
        ifc.set_wasm_path(&config.wasm_path);

        let selector = ifc.selector();
        selector
            .preselection()
            .set_material(&highlight_material(&config.prepick_highlight)?);
        selector
            .selection()
            .set_material(&highlight_material(&config.pick_highlight)?);

        Ok(Self { viewer })
    }
}

impl SceneEngine for Engine {
    fn selector(&self) -> Rc<dyn ItemSelector> {
        Rc::new(EngineSelector {
            selector: self.viewer.ifc().selector(),
        })
    }

    async fn load_model(&self, url: &str) -> Result<ModelIndex> {
        let loaded = self
            .viewer
            .ifc()
            .load_ifc_url(url)
            .await
            .map_err(|e| ViewerError::load_failed(url, js_message(&e)))?;
        model_index(url, &loaded)
    }

    fn remove_model(&self, model: ModelIndex) -> Result<()> {
        self.viewer.ifc().remove_ifc_model(model.0).map_err(js_error)
    }

    async fn render_shadow(&self, model: ModelIndex) -> Result<()> {
        self.viewer
            .shadow_dropper()
            .render_shadow(model.0)
            .await
            .map_err(js_error)?;
        Ok(())
    }

    fn set_post_production(&self, active: bool) {
        self.viewer
            .context()
            .renderer()
            .post_production()
            .set_active(active);
    }

    async fn spatial_structure(&self, model: ModelIndex) -> Result<SpatialNode> {
        let value = self
            .viewer
            .ifc()
            .get_spatial_structure(model.0)
            .await
            .map_err(js_error)?;
        if crate::bridge::is_debug() {
            web_sys::console::log_2(&"[IFC-Tree] Spatial structure".into(), &value);
        }
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| ViewerError::InvalidSpatialStructure(e.to_string()))
    }
}

/// Model index of the value `loadIfcUrl` resolved with
///
/// The engine reports its own load errors and resolves with `null`, so a missing
/// model is a failed load.
pub fn model_index(url: &str, loaded: &JsValue) -> Result<ModelIndex> {
    if loaded.is_null() || loaded.is_undefined() {
        return Err(ViewerError::load_failed(url, "engine returned no model"));
    }
    Reflect::get(loaded, &"modelID".into())
        .ok()
        .and_then(|id| id.as_f64())
        .filter(|id| *id >= 0.0 && id.fract() == 0.0)
        .map(|id| ModelIndex(id as u32))
        .ok_or_else(|| ViewerError::load_failed(url, "model has no modelID"))
}

/// [`ItemSelector`] backed by the viewer's `IFC.selector`
#[derive(Clone)]
pub struct EngineSelector {
    selector: IfcSelector,
}

fn id_array(ids: &[ExpressId]) -> Array {
    ids.iter().map(|id| JsValue::from(id.0)).collect()
}

/// Most selector calls are async on the JS side; surface rejections in the log
fn settle(result: JsValue, action: &'static str) {
    if let Ok(promise) = result.dyn_into::<Promise>() {
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("Selector {} failed: {}", action, js_error(e));
            }
        });
    }
}

impl ItemSelector for EngineSelector {
    fn prepick_by_ids(&self, model: ModelIndex, ids: &[ExpressId]) {
        settle(
            self.selector.prepick_ifc_items_by_id(model.0, &id_array(ids)),
            "prepick",
        );
    }

    fn pick_by_ids(&self, model: ModelIndex, ids: &[ExpressId]) {
        settle(
            self.selector.pick_ifc_items_by_id(model.0, &id_array(ids)),
            "pick",
        );
    }

    fn prepick_under_pointer(&self) {
        settle(self.selector.pre_pick_ifc_item(), "prepick");
    }

    fn pick_under_pointer(&self) {
        settle(self.selector.pick_ifc_item(), "pick");
    }

    fn clear_prepick(&self) {
        settle(self.selector.un_prepick_ifc_items(), "unprepick");
    }

    fn clear_pick(&self) {
        settle(self.selector.unpick_ifc_items(), "unpick");
    }
}
