//! Hierarchy panel - spatial structure as a nested, collapsible list
//!
//! Renders straight into the page's tree root (`<ul id="tree-root">`):
//!
//! ```text
//! <li>
//!   <span class="caret">IFCPROJECT - 1</span>
//!   <ul class="nested">
//!     <li class="leaf-node">IFCSITE - 2</li>
//!   </ul>
//! </li>
//! ```
//!
//! Expanding adds `caret-down` to the label and `active` to its nested list.

use super::load_status::{LoadStatus, StatusEntry};
use ifc_tree_model::{
    build_tree, ExpansionState, ExpressId, SelectionBridge, SpatialNode, TreeViewNode,
    CLASS_ACTIVE, CLASS_CARET, CLASS_CARET_DOWN, CLASS_LEAF, CLASS_NESTED,
};
use leptos::mount::mount_to;
use leptos::prelude::*;
use std::any::Any;
use std::cell::RefCell;
use web_sys::HtmlElement;

/// Owns the content of the tree container
///
/// Exactly one thing is mounted at a time (a tree or a status entry); mounting
/// something new tears the old one down first.
pub struct TreeMount {
    container: HtmlElement,
    mounted: RefCell<Option<Box<dyn Any>>>,
}

impl TreeMount {
    pub fn new(container: HtmlElement) -> Self {
        Self {
            container,
            mounted: RefCell::new(None),
        }
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Remove every child of the container, unmounting any reactive view
    pub fn clear(&self) {
        // Dropping the unmount handle detaches the view and disposes its signals
        self.mounted.borrow_mut().take();
        while let Some(child) = self.container.first_child() {
            if self.container.remove_child(&child).is_err() {
                break;
            }
        }
    }

    /// Replace the container content with the tree for `root`
    pub fn render_tree(&self, root: &SpatialNode, bridge: SelectionBridge) {
        let tree = build_tree(root);
        log::debug!("Rendering spatial tree with {} nodes", tree.node_count());

        self.clear();
        let handle = mount_to(self.container.clone(), move || {
            view! { <SpatialTree tree=tree bridge=bridge /> }
        });
        *self.mounted.borrow_mut() = Some(Box::new(handle));
    }

    /// Replace the container content with a single status entry
    pub fn show_status(&self, status: LoadStatus) {
        self.clear();
        let handle = mount_to(self.container.clone(), move || {
            view! { <StatusEntry status=status /> }
        });
        *self.mounted.borrow_mut() = Some(Box::new(handle));
    }
}

/// Whole tree; expansion state lives as long as this view
#[component]
pub fn SpatialTree(tree: TreeViewNode, bridge: SelectionBridge) -> impl IntoView {
    let expansion = RwSignal::new(ExpansionState::new());

    view! { <TreeItem node=tree bridge=bridge expansion=expansion /> }
}

/// Recursive tree node component
#[component]
fn TreeItem(
    node: TreeViewNode,
    bridge: SelectionBridge,
    expansion: RwSignal<ExpansionState>,
) -> AnyView {
    match node {
        TreeViewNode::Leaf { id, label } => {
            view! { <TreeLeaf id=id label=label bridge=bridge /> }.into_any()
        }
        TreeViewNode::Branch {
            id,
            label,
            children,
        } => view! {
            <TreeBranch id=id label=label nodes=children bridge=bridge expansion=expansion />
        }
        .into_any(),
    }
}

#[component]
fn TreeBranch(
    id: ExpressId,
    label: String,
    nodes: Vec<TreeViewNode>,
    bridge: SelectionBridge,
    expansion: RwSignal<ExpansionState>,
) -> impl IntoView {
    let is_expanded = move || expansion.with(|e| e.is_expanded(id));

    let on_toggle = move |_| {
        expansion.update(|e| {
            e.toggle(id);
            log::debug!("Toggled {} ({} branches open)", id, e.expanded_count());
        });
    };

    view! {
        <li>
            <span
                class=move || {
                    if is_expanded() {
                        format!("{} {}", CLASS_CARET, CLASS_CARET_DOWN)
                    } else {
                        CLASS_CARET.to_string()
                    }
                }
                on:click=on_toggle
            >
                {label}
            </span>
            <ul class=move || {
                if is_expanded() {
                    format!("{} {}", CLASS_NESTED, CLASS_ACTIVE)
                } else {
                    CLASS_NESTED.to_string()
                }
            }>
                {nodes
                    .into_iter()
                    .map(|node| {
                        view! { <TreeItem node=node bridge=bridge.clone() expansion=expansion /> }
                    })
                    .collect_view()}
            </ul>
        </li>
    }
}

#[component]
fn TreeLeaf(id: ExpressId, label: String, bridge: SelectionBridge) -> impl IntoView {
    let hover = bridge.clone();

    view! {
        <li
            class=CLASS_LEAF
            on:mousemove=move |_| hover.on_leaf_hover(id)
            on:click=move |_| bridge.on_leaf_click(id)
        >
            {label}
        </li>
    }
}
