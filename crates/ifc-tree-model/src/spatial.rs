// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial structure as delivered by the IFC engine

use crate::{ExpressId, Result, ViewerError};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Node in the spatial hierarchy tree
///
/// Mirrors the object returned by the engine's `getSpatialStructure`:
/// `{ type, expressID, children }`. The tree typically follows
/// Project → Site → Building → Storey → Elements. Extra fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialNode {
    /// IFC entity type name (e.g., "IFCWALL")
    #[serde(rename = "type")]
    pub ifc_type: String,
    /// Express ID, unique within the model
    #[serde(rename = "expressID")]
    pub express_id: ExpressId,
    /// Child nodes, in engine order
    #[serde(default)]
    pub children: Vec<SpatialNode>,
}

impl SpatialNode {
    /// Create a new spatial node without children
    pub fn new(ifc_type: impl Into<String>, express_id: impl Into<ExpressId>) -> Self {
        Self {
            ifc_type: ifc_type.into(),
            express_id: express_id.into(),
            children: Vec::new(),
        }
    }

    /// Add a child node (builder form)
    pub fn with_child(mut self, child: SpatialNode) -> Self {
        self.children.push(child);
        self
    }

    /// Display label used by the tree: `"<type> - <expressID>"`
    pub fn label(&self) -> String {
        format!("{} - {}", self.ifc_type, self.express_id)
    }

    /// True if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of levels in this subtree (a lone node has depth 1)
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|c| c.depth())
            .max()
            .unwrap_or(0)
    }

    /// Iterate all nodes (depth-first, pre-order)
    pub fn iter(&self) -> SpatialNodeIter<'_> {
        SpatialNodeIter { stack: vec![self] }
    }

    /// Check that every express ID in the subtree is unique
    ///
    /// Selection and expansion are both keyed by express ID, so a duplicate would
    /// make a tree row ambiguous.
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for node in self.iter() {
            if !seen.insert(node.express_id) {
                return Err(ViewerError::DuplicateExpressId(node.express_id));
            }
        }
        Ok(())
    }
}

/// Iterator over spatial nodes (depth-first)
pub struct SpatialNodeIter<'a> {
    stack: Vec<&'a SpatialNode>,
}

impl<'a> Iterator for SpatialNodeIter<'a> {
    type Item = &'a SpatialNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push in reverse so the first child comes out first
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}
