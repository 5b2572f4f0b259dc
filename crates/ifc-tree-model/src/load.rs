// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model load lifecycle

use crate::{ModelIndex, Result, ViewerError};

/// Where the viewer is in loading a model
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        url: String,
    },
    Loaded {
        url: String,
        model: ModelIndex,
    },
    Failed {
        url: String,
        message: String,
    },
}

/// Allows a single pending load at a time
///
/// A second request while one is in flight is rejected rather than queued.
#[derive(Debug, Default)]
pub struct LoadGuard {
    state: LoadState,
    previous: Option<ModelIndex>,
}

impl LoadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    /// Model shown right now, if any
    ///
    /// While a reload is pending this is still the previously loaded model.
    pub fn current_model(&self) -> Option<ModelIndex> {
        match self.state {
            LoadState::Loaded { model, .. } => Some(model),
            _ => self.previous,
        }
    }

    /// Start loading `url`
    pub fn begin(&mut self, url: &str) -> Result<()> {
        if let LoadState::Loading { url: pending } = &self.state {
            return Err(ViewerError::LoadInProgress(pending.clone()));
        }
        self.previous = self.current_model();
        self.state = LoadState::Loading {
            url: url.to_string(),
        };
        Ok(())
    }

    /// Finish the pending load
    pub fn complete(&mut self, model: ModelIndex) {
        let url = self.pending_url();
        self.previous = None;
        self.state = LoadState::Loaded { url, model };
    }

    /// Record a failed load
    pub fn fail(&mut self, message: impl Into<String>) {
        let url = self.pending_url();
        self.state = LoadState::Failed {
            url,
            message: message.into(),
        };
    }

    fn pending_url(&self) -> String {
        match &self.state {
            LoadState::Loading { url }
            | LoadState::Loaded { url, .. }
            | LoadState::Failed { url, .. } => url.clone(),
            LoadState::Idle => String::new(),
        }
    }
}
