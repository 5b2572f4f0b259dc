// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Selection bridge between pointer input and the engine's selector
//!
//! The tree and the 3D viewport are two independent event sources that feed one
//! selection state, and that state belongs to the engine. The bridge never stores
//! what is selected; it only translates events into selector commands.

use crate::{ExpressId, ModelIndex};
use log::debug;
use std::rc::Rc;

/// Item selection capability of the 3D engine
///
/// Implementations own the highlight state and its rendering.
pub trait ItemSelector {
    /// Hover-highlight items without confirming a selection
    fn prepick_by_ids(&self, model: ModelIndex, ids: &[ExpressId]);

    /// Confirm selection of items
    fn pick_by_ids(&self, model: ModelIndex, ids: &[ExpressId]);

    /// Hover-highlight whatever is under the pointer in the viewport
    fn prepick_under_pointer(&self);

    /// Select whatever is under the pointer in the viewport
    fn pick_under_pointer(&self);

    /// Remove the hover highlight
    fn clear_prepick(&self);

    /// Remove the confirmed selection
    fn clear_pick(&self);
}

/// Routes tree and viewport pointer events to an [`ItemSelector`]
///
/// Cloning is cheap; every clone talks to the same selector.
#[derive(Clone)]
pub struct SelectionBridge {
    selector: Rc<dyn ItemSelector>,
    model: ModelIndex,
}

impl SelectionBridge {
    pub fn new(selector: Rc<dyn ItemSelector>, model: ModelIndex) -> Self {
        Self { selector, model }
    }

    /// Same selector, bound to another model
    pub fn with_model(&self, model: ModelIndex) -> Self {
        Self {
            selector: Rc::clone(&self.selector),
            model,
        }
    }

    pub fn model(&self) -> ModelIndex {
        self.model
    }

    /// Pointer moved over a tree leaf
    pub fn on_leaf_hover(&self, id: ExpressId) {
        self.selector.prepick_by_ids(self.model, &[id]);
    }

    /// Tree leaf clicked
    pub fn on_leaf_click(&self, id: ExpressId) {
        debug!("Picking {} in {}", id, self.model);
        self.selector.pick_by_ids(self.model, &[id]);
    }

    /// Pointer left the tree
    pub fn on_tree_leave(&self) {
        self.selector.clear_prepick();
    }

    /// Pointer moved over the 3D viewport
    pub fn on_viewport_hover(&self) {
        self.selector.prepick_under_pointer();
    }

    /// Single click in the 3D viewport
    pub fn on_viewport_click(&self) {
        self.selector.pick_under_pointer();
    }

    /// Double click in the 3D viewport clears the selection
    pub fn on_viewport_double_click(&self) {
        debug!("Clearing selection");
        self.selector.clear_pick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Call {
        Prepick(ModelIndex, Vec<ExpressId>),
        Pick(ModelIndex, Vec<ExpressId>),
        PrepickUnderPointer,
        PickUnderPointer,
        ClearPrepick,
        ClearPick,
    }

    #[derive(Default)]
    pub struct RecordingSelector {
        pub calls: RefCell<Vec<Call>>,
    }

    impl ItemSelector for RecordingSelector {
        fn prepick_by_ids(&self, model: ModelIndex, ids: &[ExpressId]) {
            self.calls.borrow_mut().push(Call::Prepick(model, ids.to_vec()));
        }
        fn pick_by_ids(&self, model: ModelIndex, ids: &[ExpressId]) {
            self.calls.borrow_mut().push(Call::Pick(model, ids.to_vec()));
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

    fn bridge() -> (Rc<RecordingSelector>, SelectionBridge) {
        let selector = Rc::new(RecordingSelector::default());
        let bridge = SelectionBridge::new(selector.clone(), ModelIndex::FIRST);
        (selector, bridge)
    }

    #[test]
    fn test_leaf_hover_prepicks_once_per_event() {
        let (selector, bridge) = bridge();
        bridge.on_leaf_hover(ExpressId(2));
        assert_eq!(
            *selector.calls.borrow(),
            vec![Call::Prepick(ModelIndex(0), vec![ExpressId(2)])]
        );

        bridge.on_leaf_hover(ExpressId(2));
        assert_eq!(selector.calls.borrow().len(), 2);
    }

    #[test]
    fn test_leaf_click_picks_without_prepick() {
        let (selector, bridge) = bridge();
        bridge.on_leaf_click(ExpressId(2));
        assert_eq!(
            *selector.calls.borrow(),
            vec![Call::Pick(ModelIndex(0), vec![ExpressId(2)])]
        );
    }

    #[test]
    fn test_viewport_events() {
        let (selector, bridge) = bridge();
        bridge.on_viewport_hover();
        bridge.on_viewport_click();
        bridge.on_viewport_double_click();
        bridge.on_tree_leave();
        assert_eq!(
            *selector.calls.borrow(),
            vec![
                Call::PrepickUnderPointer,
                Call::PickUnderPointer,
                Call::ClearPick,
                Call::ClearPrepick,
            ]
        );
    }

    #[test]
    fn test_with_model_rebinds_index() {
        let (selector, bridge) = bridge();
        let second = bridge.with_model(ModelIndex(1));
        assert_eq!(bridge.model(), ModelIndex(0));
        assert_eq!(second.model(), ModelIndex(1));

        second.on_leaf_click(ExpressId(8));
        assert_eq!(
            *selector.calls.borrow(),
            vec![Call::Pick(ModelIndex(1), vec![ExpressId(8)])]
        );
    }
}
