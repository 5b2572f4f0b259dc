//! Status entries shown in the tree container while no tree is available

use leptos::prelude::*;

/// Class on every status entry
pub const CLASS_STATUS: &str = "tree-status";
/// Extra class on failure entries
pub const CLASS_ERROR: &str = "tree-error";

/// What the tree container shows instead of a tree
#[derive(Clone, Debug, PartialEq)]
pub enum LoadStatus {
    /// Model at this URL is being loaded
    Loading(String),
    /// Load failed with this message
    Failed(String),
}

impl LoadStatus {
    pub fn message(&self) -> String {
        match self {
            LoadStatus::Loading(url) => format!("Loading {}…", url),
            LoadStatus::Failed(message) => format!("Could not load model: {}", message),
        }
    }

    fn class(&self) -> String {
        match self {
            LoadStatus::Loading(_) => CLASS_STATUS.to_string(),
            LoadStatus::Failed(_) => format!("{} {}", CLASS_STATUS, CLASS_ERROR),
        }
    }
}

#[component]
pub fn StatusEntry(status: LoadStatus) -> impl IntoView {
    view! { <li class=status.class()>{status.message()}</li> }
}
