// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registration surface shared by documents and windows.

use alloc::rc::Rc;

use crate::element::ElementId;
use crate::event::{DomEvent, EventType, Phase};

/// A DOM event listener.
///
/// Listeners are compared by pointer identity, so keep the `Rc` you
/// registered around if you intend to remove it later.
pub type DomListener = Rc<dyn Fn(&DomEvent)>;

/// Returns `true` if both handles point at the same listener.
#[must_use]
pub fn same_listener(a: &DomListener, b: &DomListener) -> bool {
    core::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Identifies one document across attach/detach calls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u32);

/// Something listeners can be registered on.
///
/// Registration follows DOM identity rules: a `(type, listener, phase)`
/// triple is registered at most once, and removal must name the same phase it
/// was added with.
pub trait EventTarget {
    /// Register `listener` for `event_type` in `phase`.
    fn add_event_listener(&self, event_type: EventType, listener: &DomListener, phase: Phase);

    /// Remove a listener previously added with the same type and phase.
    fn remove_event_listener(&self, event_type: EventType, listener: &DomListener, phase: Phase);
}

/// A document together with its window.
pub trait Document: EventTarget {
    /// Stable identity of this document.
    fn document_id(&self) -> DocumentId;

    /// The window hosting this document, used for window-level events such as `error`.
    fn window(&self) -> &dyn EventTarget;
}

/// Moves keyboard focus.
pub trait FocusHost {
    /// Focus `element`.
    fn focus(&self, element: ElementId);
}
