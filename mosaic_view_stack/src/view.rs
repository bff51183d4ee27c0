// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay unit managed by the stack.

use alloc::rc::Rc;

use mosaic_dom::element::{ElementId, ParentLookup, closest};

/// One modal or overlay.
pub trait View {
    /// Root element of the overlay. The default hit-test boundary.
    fn element(&self) -> ElementId;

    /// Returns `true` if an interaction on `target` lands inside this view.
    ///
    /// The default walks `target` and its ancestors looking for
    /// [`View::element`]. Override it for overlays whose visual bounds are not
    /// a single subtree, such as a popup anchored to a separate toolbar button.
    fn hit_test(&self, target: ElementId, tree: &dyn ParentLookup) -> bool {
        let element = self.element();
        closest(tree, target, |e| e == element).is_some()
    }

    /// Release the view's resources and visual representation.
    fn close(&self);

    /// Element to focus once the view has closed.
    fn return_focus_to(&self) -> Option<ElementId> {
        None
    }
}

/// A shared handle to a view on the stack.
pub type ViewRef = Rc<dyn View>;

/// Returns `true` if both handles refer to the same view instance.
#[must_use]
pub fn same_view(a: &ViewRef, b: &ViewRef) -> bool {
    core::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
