// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identifier types shared by the tree and the selection bridge

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe express ID
///
/// Wraps the per-model IFC instance number (e.g., #123 becomes ExpressId(123)).
/// Unique within one model, so it is the only key the selector needs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ExpressId(pub u32);

impl fmt::Display for ExpressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ExpressId {
    fn from(id: u32) -> Self {
        ExpressId(id)
    }
}

impl From<ExpressId> for u32 {
    fn from(id: ExpressId) -> Self {
        id.0
    }
}

/// Index of a model loaded into the engine
///
/// The engine hands these out per load (`modelID`). The first model is always 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ModelIndex(pub u32);

impl ModelIndex {
    /// Index of the first model loaded into a fresh engine
    pub const FIRST: ModelIndex = ModelIndex(0);
}

impl fmt::Display for ModelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model {}", self.0)
    }
}

impl From<u32> for ModelIndex {
    fn from(index: u32) -> Self {
        ModelIndex(index)
    }
}
