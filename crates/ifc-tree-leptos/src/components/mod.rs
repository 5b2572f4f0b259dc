//! UI Components for the IFC tree viewer

mod hierarchy_panel;
mod load_status;

pub use hierarchy_panel::{SpatialTree, TreeMount};
pub use load_status::{LoadStatus, StatusEntry, CLASS_ERROR, CLASS_STATUS};
