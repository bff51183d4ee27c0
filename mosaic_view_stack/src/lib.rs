// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mosaic View Stack: which overlay is on top, and when overlays go away.
//!
//! ## Overview
//!
//! Overlays (menus, pickers, dialogs) implement [`View`](view::View) and are
//! pushed onto a [`ViewStack`](stack::ViewStack) when opened. The stack listens
//! on the editor bus and dismisses them:
//!
//! - `onEscape` closes the top overlay. With nothing open, the stack publishes
//!   `onTopLevelEscape` so the application can handle Escape itself.
//! - `onPointerDown` closes every overlay above the topmost one the pointer
//!   landed in. A click outside everything closes everything.
//!
//! A closed view may name an element to receive focus afterwards.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use mosaic_bus::EventBus;
//! use mosaic_dom::element::{ElementId, ElementTree};
//! use mosaic_dom::synthetic::SyntheticDocument;
//! use mosaic_view_stack::stack::ViewStack;
//! use mosaic_view_stack::view::View;
//!
//! struct Menu(ElementId);
//!
//! impl View for Menu {
//!     fn element(&self) -> ElementId {
//!         self.0
//!     }
//!
//!     fn close(&self) {}
//!
//!     fn return_focus_to(&self) -> Option<ElementId> {
//!         Some(ElementId(2))
//!     }
//! }
//!
//! let mut tree = ElementTree::new();
//! tree.insert(ElementId(10), ElementId(1));
//! tree.insert(ElementId(11), ElementId(10));
//!
//! let doc = Rc::new(SyntheticDocument::new(1));
//! let stack = ViewStack::new(Rc::new(EventBus::new()), Rc::new(tree), doc.clone());
//! stack.push(Rc::new(Menu(ElementId(10))));
//!
//! // A click inside the menu keeps it open.
//! assert_eq!(stack.run_hit_test(ElementId(11)), 0);
//!
//! // A click outside dismisses it, and focus stays put.
//! assert_eq!(stack.run_hit_test(ElementId(1)), 1);
//! assert!(stack.is_empty());
//! assert_eq!(doc.active_element(), None);
//!
//! // Escape-style dismissal hands focus back.
//! stack.push(Rc::new(Menu(ElementId(10))));
//! stack.pop();
//! assert_eq!(doc.active_element(), Some(ElementId(2)));
//! ```
//!
//! Outside-click dismissal does not move focus; only [`pop`](stack::ViewStack::pop)
//! and [`remove`](stack::ViewStack::remove) do.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod stack;
pub mod view;
