#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use ifc_tree_model::{ExpressId, ItemSelector, ModelIndex, SelectionBridge, SpatialNode};
use ifc_tree_leptos::{LoadStatus, TreeMount};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Element, HtmlElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Prepick(u32, Vec<u32>),
    Pick(u32, Vec<u32>),
    PrepickUnderPointer,
    PickUnderPointer,
    ClearPrepick,
    ClearPick,
}

#[derive(Default)]
struct RecordingSelector {
    calls: RefCell<Vec<Call>>,
}

fn raw(ids: &[ExpressId]) -> Vec<u32> {
    ids.iter().map(|id| id.0).collect()
}

impl ItemSelector for RecordingSelector {
    fn prepick_by_ids(&self, model: ModelIndex, ids: &[ExpressId]) {
        self.calls.borrow_mut().push(Call::Prepick(model.0, raw(ids)));
    }
    fn pick_by_ids(&self, model: ModelIndex, ids: &[ExpressId]) {
        self.calls.borrow_mut().push(Call::Pick(model.0, raw(ids)));
    }
    fn prepick_under_pointer(&self) {
        self.calls.borrow_mut().push(Call::PrepickUnderPointer);
    }
    fn pick_under_pointer(&self) {
        self.calls.borrow_mut().push(Call::PickUnderPointer);
    }
    fn clear_prepick(&self) {
        self.calls.borrow_mut().push(Call::ClearPrepick);
    }
    fn clear_pick(&self) {
        self.calls.borrow_mut().push(Call::ClearPick);
    }
}

struct Fixture {
    root: HtmlElement,
    mount: TreeMount,
    selector: Rc<RecordingSelector>,
    bridge: SelectionBridge,
}

impl Fixture {
    fn new() -> Self {
        let document = web_sys::window().unwrap().document().unwrap();
        let root: HtmlElement = document.create_element("ul").unwrap().unchecked_into();
        document.body().unwrap().append_child(&root).unwrap();

        let selector = Rc::new(RecordingSelector::default());
        let bridge = SelectionBridge::new(selector.clone(), ModelIndex(0));
        Self {
            mount: TreeMount::new(root.clone()),
            root,
            selector,
            bridge,
        }
    }

    fn render(&self, project: &SpatialNode) {
        self.mount.render_tree(project, self.bridge.clone());
    }

    fn find(&self, selector: &str) -> Element {
        self.root.query_selector(selector).unwrap().unwrap()
    }

    fn count(&self, selector: &str) -> u32 {
        self.root.query_selector_all(selector).unwrap().length()
    }

    /// Labels of branches and leaves in document order
    fn labels(&self) -> Vec<String> {
        let nodes = self.root.query_selector_all("span.caret, li.leaf-node").unwrap();
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|n| n.text_content())
            .collect()
    }

    fn calls(&self) -> Vec<Call> {
        self.selector.calls.borrow().clone()
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.mount.clear();
        self.root.remove();
    }
}

fn click(element: &Element) {
    element.unchecked_ref::<HtmlElement>().click();
}

fn hover(element: &Element) {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    let event = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
    element.dispatch_event(&event).unwrap();
}

/// Let pending reactive updates reach the DOM
async fn tick() {
    TimeoutFuture::new(0).await;
}

fn project_with_site() -> SpatialNode {
    SpatialNode::new("IfcProject", 1).with_child(SpatialNode::new("IfcSite", 2))
}

fn building() -> SpatialNode {
    SpatialNode::new("IFCPROJECT", 1).with_child(
        SpatialNode::new("IFCSITE", 2).with_child(
            SpatialNode::new("IFCBUILDING", 3)
                .with_child(
                    SpatialNode::new("IFCBUILDINGSTOREY", 4)
                        .with_child(SpatialNode::new("IFCWALL", 10))
                        .with_child(SpatialNode::new("IFCDOOR", 11)),
                )
                .with_child(
                    SpatialNode::new("IFCBUILDINGSTOREY", 5)
                        .with_child(SpatialNode::new("IFCSLAB", 12)),
                ),
        ),
    )
}

#[wasm_bindgen_test]
fn test_project_with_single_site() {
    let fixture = Fixture::new();
    fixture.render(&project_with_site());

    assert_eq!(fixture.root.child_element_count(), 1);
    let caret = fixture.find(":scope > li > span.caret");
    assert_eq!(caret.text_content().as_deref(), Some("IfcProject - 1"));
    assert_eq!(caret.class_name(), "caret");

    let nested = fixture.find(":scope > li > ul");
    assert_eq!(nested.class_name(), "nested");
    assert_eq!(nested.child_element_count(), 1);

    let leaf = fixture.find("ul.nested > li.leaf-node");
    assert_eq!(leaf.text_content().as_deref(), Some("IfcSite - 2"));
    assert_eq!(leaf.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn test_one_item_per_node_in_order() {
    let fixture = Fixture::new();
    let project = building();
    fixture.render(&project);

    assert_eq!(fixture.count("li") as usize, project.node_count());
    assert_eq!(
        fixture.labels(),
        vec![
            "IFCPROJECT - 1",
            "IFCSITE - 2",
            "IFCBUILDING - 3",
            "IFCBUILDINGSTOREY - 4",
            "IFCWALL - 10",
            "IFCDOOR - 11",
            "IFCBUILDINGSTOREY - 5",
            "IFCSLAB - 12",
        ]
    );
    // Leaves never carry a nested list
    assert_eq!(fixture.count("li.leaf-node ul"), 0);
    assert_eq!(fixture.count("li.leaf-node"), 3);
    assert_eq!(fixture.count("ul.nested"), 5);
}

#[wasm_bindgen_test]
fn test_childless_root_is_togglable() {
    let fixture = Fixture::new();
    fixture.render(&SpatialNode::new("IFCPROJECT", 1));

    assert_eq!(fixture.count("span.caret"), 1);
    assert_eq!(fixture.count("li.leaf-node"), 0);
    assert_eq!(fixture.find("ul.nested").child_element_count(), 0);
}

#[wasm_bindgen_test]
async fn test_toggle_only_affects_own_branch() {
    let fixture = Fixture::new();
    fixture.render(&building());

    let root_caret = fixture.find(":scope > li > span.caret");
    let root_nested = fixture.find(":scope > li > ul.nested");
    let site_nested = fixture.find(":scope > li > ul.nested > li > ul.nested");

    click(&root_caret);
    tick().await;
    assert_eq!(root_caret.class_name(), "caret caret-down");
    assert_eq!(root_nested.class_name(), "nested active");
    assert_eq!(site_nested.class_name(), "nested");

    click(&root_caret);
    tick().await;
    assert_eq!(root_caret.class_name(), "caret");
    assert_eq!(root_nested.class_name(), "nested");

    // Branch clicks never reach the selector
    assert!(fixture.calls().is_empty());
}

#[wasm_bindgen_test]
fn test_rebuild_leaves_no_residue() {
    let fixture = Fixture::new();
    fixture.render(&building());
    fixture.render(&project_with_site());

    assert_eq!(fixture.root.child_element_count(), 1);
    assert_eq!(fixture.count("li"), 2);
    assert_eq!(fixture.labels(), vec!["IfcProject - 1", "IfcSite - 2"]);
}

#[wasm_bindgen_test]
async fn test_rebuild_starts_collapsed() {
    let fixture = Fixture::new();
    fixture.render(&project_with_site());
    click(&fixture.find("span.caret"));
    tick().await;
    assert_eq!(fixture.find("ul").class_name(), "nested active");

    fixture.render(&project_with_site());
    assert_eq!(fixture.find("ul").class_name(), "nested");
}

#[wasm_bindgen_test]
fn test_leaf_hover_prepicks() {
    let fixture = Fixture::new();
    fixture.render(&project_with_site());

    hover(&fixture.find("li.leaf-node"));
    assert_eq!(fixture.calls(), vec![Call::Prepick(0, vec![2])]);

    hover(&fixture.find("li.leaf-node"));
    assert_eq!(fixture.calls().len(), 2);
}

#[wasm_bindgen_test]
fn test_leaf_click_picks_without_prepick() {
    let fixture = Fixture::new();
    fixture.render(&project_with_site());

    click(&fixture.find("li.leaf-node"));
    assert_eq!(fixture.calls(), vec![Call::Pick(0, vec![2])]);
}

#[wasm_bindgen_test]
fn test_leaf_uses_bound_model() {
    let fixture = Fixture::new();
    fixture
        .mount
        .render_tree(&project_with_site(), fixture.bridge.with_model(ModelIndex(3)));

    click(&fixture.find("li.leaf-node"));
    assert_eq!(fixture.calls(), vec![Call::Pick(3, vec![2])]);
}

#[wasm_bindgen_test]
async fn test_viewport_double_click_keeps_expansion() {
    let fixture = Fixture::new();
    fixture.render(&project_with_site());
    click(&fixture.find("span.caret"));
    tick().await;

    fixture.bridge.on_viewport_double_click();
    tick().await;

    assert_eq!(fixture.calls(), vec![Call::ClearPick]);
    assert_eq!(fixture.find("ul").class_name(), "nested active");
}

#[wasm_bindgen_test]
fn test_status_entry_is_replaced_by_tree() {
    let fixture = Fixture::new();
    fixture
        .mount
        .show_status(LoadStatus::Failed("404".to_string()));
    let entry = fixture.find("li.tree-status");
    assert_eq!(entry.class_name(), "tree-status tree-error");
    assert_eq!(entry.text_content().as_deref(), Some("Could not load model: 404"));

    fixture.render(&project_with_site());
    assert_eq!(fixture.count("li.tree-status"), 0);
    assert_eq!(fixture.count("li"), 2);
}
