// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for viewer operations

use crate::ExpressId;
use thiserror::Error;

/// Result type alias for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Errors that can occur while loading and presenting a model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewerError {
    /// A load was requested while another one is still pending
    #[error("A model load is already in progress: {0}")]
    LoadInProgress(String),

    /// The engine could not load the model
    #[error("Failed to load {url}: {message}")]
    LoadFailed { url: String, message: String },

    /// Spatial structure could not be read
    #[error("Invalid spatial structure: {0}")]
    InvalidSpatialStructure(String),

    /// Two nodes share an express ID
    #[error("Duplicate express ID {0} in spatial structure")]
    DuplicateExpressId(ExpressId),

    /// Required page element is missing
    #[error("Element #{0} not found in document")]
    MissingElement(String),

    /// Configuration value could not be parsed
    #[error("Invalid value {value:?} for config key {key:?}")]
    InvalidConfig { key: String, value: String },

    /// Error raised by the JavaScript engine
    #[error("Engine error: {0}")]
    Engine(String),
}

impl ViewerError {
    /// Create a new load failure
    pub fn load_failed(url: impl Into<String>, msg: impl Into<String>) -> Self {
        ViewerError::LoadFailed {
            url: url.into(),
            message: msg.into(),
        }
    }

    /// Create a new engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        ViewerError::Engine(msg.into())
    }

    /// Create a new config error
    pub fn invalid_config(key: impl Into<String>, value: impl Into<String>) -> Self {
        ViewerError::InvalidConfig {
            key: key.into(),
            value: value.into(),
        }
    }
}
