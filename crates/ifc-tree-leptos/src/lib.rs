//! IFC Tree Leptos - Spatial tree panel and viewer wiring
//!
//! web-ifc-viewer draws the 3D scene; this crate renders the spatial hierarchy as a
//! collapsible tree with Leptos and keeps hover and selection in sync between the
//! tree and the viewport. The WASM entry point lives in `ifc-tree-viewer`.

pub mod app;
pub mod bridge;
pub mod components;
pub mod engine;

pub use app::{spawn_load, ViewerApp};
pub use components::{LoadStatus, SpatialTree, TreeMount};
pub use engine::{model_index, Engine, EngineSelector, SceneEngine};
