// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Tree Model - Spatial hierarchy types and selection plumbing for the tree viewer
//!
//! This crate holds everything in the viewer that does not need a browser: the spatial
//! structure returned by the IFC engine, the transform into a renderable tree, the
//! expansion state of that tree, and the bridge that turns pointer events into selector
//! commands. The WebAssembly crate only renders and wires these to the DOM.
//!
//! # Architecture
//!
//! - [`SpatialNode`] - Spatial structure as delivered by the engine
//! - [`TreeViewNode`] / [`build_tree`] - Renderable tree, built in one pass
//! - [`ExpansionState`] - Which branches are open
//! - [`ItemSelector`] / [`SelectionBridge`] - Engine selection capability and its wiring
//! - [`LoadGuard`] - Single pending model load at a time
//! - [`ViewerConfig`] - Startup configuration
//!
//! # Example
//!
//! ```ignore
//! use ifc_tree_model::{build_tree, SpatialNode};
//!
//! let project: SpatialNode = serde_json::from_str(json)?;
//! project.validate()?;
//! let tree = build_tree(&project);
//! assert_eq!(tree.node_count(), project.node_count());
//! ```

pub mod config;
pub mod error;
pub mod expansion;
pub mod load;
pub mod selection;
pub mod spatial;
pub mod tree;
pub mod types;

// Re-export all public types
pub use config::*;
pub use error::*;
pub use expansion::*;
pub use load::*;
pub use selection::*;
pub use spatial::*;
pub use tree::*;
pub use types::*;
