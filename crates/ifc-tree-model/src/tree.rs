// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tree view representation of the spatial structure
//!
//! [`build_tree`] turns a [`SpatialNode`] hierarchy into [`TreeViewNode`]s that a
//! renderer can walk without knowing anything about IFC. The DOM class names the
//! stylesheet depends on live here too, so the renderer and tests share one source.

use crate::{ExpressId, SpatialNode};

/// Class on a branch's nested child list
pub const CLASS_NESTED: &str = "nested";
/// Class added to a nested list while it is expanded
pub const CLASS_ACTIVE: &str = "active";
/// Class on a branch label (the toggle control)
pub const CLASS_CARET: &str = "caret";
/// Class added to a branch label while it is expanded
pub const CLASS_CARET_DOWN: &str = "caret-down";
/// Class on terminal items
pub const CLASS_LEAF: &str = "leaf-node";

/// Renderable tree node
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeViewNode {
    /// Toggle label plus a nested, initially collapsed list of children
    Branch {
        id: ExpressId,
        label: String,
        children: Vec<TreeViewNode>,
    },
    /// Terminal item, no toggle and no nested list
    Leaf { id: ExpressId, label: String },
}

impl TreeViewNode {
    pub fn id(&self) -> ExpressId {
        match self {
            TreeViewNode::Branch { id, .. } | TreeViewNode::Leaf { id, .. } => *id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TreeViewNode::Branch { label, .. } | TreeViewNode::Leaf { label, .. } => label,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeViewNode::Leaf { .. })
    }

    /// Children in render order (empty for leaves)
    pub fn children(&self) -> &[TreeViewNode] {
        match self {
            TreeViewNode::Branch { children, .. } => children,
            TreeViewNode::Leaf { .. } => &[],
        }
    }

    /// Total number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(TreeViewNode::node_count)
            .sum::<usize>()
    }

    /// Number of levels in this subtree (a lone node has depth 1)
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(TreeViewNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Build the tree view for a spatial structure
///
/// The root always becomes a branch, even without children, so the project entry
/// is togglable from the first render. Below the root a node is a branch iff it has
/// children. Child order is kept exactly as delivered.
pub fn build_tree(root: &SpatialNode) -> TreeViewNode {
    build_node(root, true)
}

fn build_node(node: &SpatialNode, is_root: bool) -> TreeViewNode {
    if node.is_leaf() && !is_root {
        return TreeViewNode::Leaf {
            id: node.express_id,
            label: node.label(),
        };
    }

    TreeViewNode::Branch {
        id: node.express_id,
        label: node.label(),
        children: node
            .children
            .iter()
            .map(|child| build_node(child, false))
            .collect(),
    }
}
