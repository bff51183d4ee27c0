// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory document for headless embedders and tests.
//!
//! [`SyntheticDocument`] keeps a listener table per target and delivers
//! events the way a browser does for listeners on a single target:
//!
//! - Capturing listeners run before bubbling listeners.
//! - Within a phase, listeners run in registration order.
//! - The listener table is snapshotted before delivery, so listeners may add
//!   or remove registrations while an event is in flight.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use mosaic_dom::element::ElementId;
//! use mosaic_dom::event::{ClipboardEvent, DataTransfer, DomEvent, EventType, Phase};
//! use mosaic_dom::synthetic::SyntheticDocument;
//! use mosaic_dom::target::{DomListener, EventTarget};
//!
//! let doc = SyntheticDocument::new(1);
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let bubble: DomListener = {
//!     let seen = seen.clone();
//!     Rc::new(move |_: &DomEvent| seen.borrow_mut().push(Phase::Bubble))
//! };
//! let capture: DomListener = {
//!     let seen = seen.clone();
//!     Rc::new(move |_: &DomEvent| seen.borrow_mut().push(Phase::Capture))
//! };
//! doc.add_event_listener(EventType::Paste, &bubble, Phase::Bubble);
//! doc.add_event_listener(EventType::Paste, &capture, Phase::Capture);
//!
//! let ev = DomEvent::paste(ClipboardEvent {
//!     target: ElementId(1),
//!     data: DataTransfer::new(),
//! });
//! assert!(doc.dispatch(&ev));
//! assert_eq!(*seen.borrow(), [Phase::Capture, Phase::Bubble]);
//! ```

use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::element::ElementId;
use crate::event::{DomEvent, EventType, Phase};
use crate::target::{Document, DocumentId, DomListener, EventTarget, FocusHost, same_listener};

struct Registration {
    event_type: EventType,
    phase: Phase,
    listener: DomListener,
}

/// Listener table for one target.
#[derive(Default)]
pub struct SyntheticTarget {
    registrations: RefCell<Vec<Registration>>,
}

impl fmt::Debug for SyntheticTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntheticTarget")
            .field("registrations", &self.registrations.borrow().len())
            .finish()
    }
}

impl SyntheticTarget {
    /// An empty target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listeners registered for `event_type` in `phase`.
    #[must_use]
    pub fn listener_count(&self, event_type: EventType, phase: Phase) -> usize {
        self.registrations
            .borrow()
            .iter()
            .filter(|r| r.event_type == event_type && r.phase == phase)
            .count()
    }

    /// Total number of registrations on this target.
    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.registrations.borrow().len()
    }

    /// Deliver `event` to matching listeners, capture first, then bubble.
    ///
    /// Returns `false` if any listener prevented the default action.
    pub fn dispatch(&self, event: &DomEvent) -> bool {
        let event_type = event.event_type();
        let snapshot: Vec<(Phase, DomListener)> = self
            .registrations
            .borrow()
            .iter()
            .filter(|r| r.event_type == event_type)
            .map(|r| (r.phase, r.listener.clone()))
            .collect();

        for phase in [Phase::Capture, Phase::Bubble] {
            for (_, listener) in snapshot.iter().filter(|(p, _)| *p == phase) {
                listener(event);
            }
        }
        !event.default_prevented()
    }
}

impl EventTarget for SyntheticTarget {
    fn add_event_listener(&self, event_type: EventType, listener: &DomListener, phase: Phase) {
        let mut registrations = self.registrations.borrow_mut();
        let exists = registrations.iter().any(|r| {
            r.event_type == event_type && r.phase == phase && same_listener(&r.listener, listener)
        });
        if !exists {
            registrations.push(Registration {
                event_type,
                phase,
                listener: listener.clone(),
            });
        }
    }

    fn remove_event_listener(&self, event_type: EventType, listener: &DomListener, phase: Phase) {
        self.registrations.borrow_mut().retain(|r| {
            !(r.event_type == event_type && r.phase == phase && same_listener(&r.listener, listener))
        });
    }
}

/// A document/window pair with focus tracking.
#[derive(Debug)]
pub struct SyntheticDocument {
    id: DocumentId,
    document: SyntheticTarget,
    window: SyntheticTarget,
    active_element: Cell<Option<ElementId>>,
}

impl SyntheticDocument {
    /// A document with no listeners and nothing focused.
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self {
            id: DocumentId(id),
            document: SyntheticTarget::new(),
            window: SyntheticTarget::new(),
            active_element: Cell::new(None),
        }
    }

    /// Deliver `event` to the document's listeners.
    ///
    /// Returns `false` if any listener prevented the default action.
    pub fn dispatch(&self, event: &DomEvent) -> bool {
        self.document.dispatch(event)
    }

    /// Deliver `event` to the window's listeners.
    pub fn dispatch_window(&self, event: &DomEvent) -> bool {
        self.window.dispatch(event)
    }

    /// Document listeners registered for `event_type` in `phase`.
    #[must_use]
    pub fn listener_count(&self, event_type: EventType, phase: Phase) -> usize {
        self.document.listener_count(event_type, phase)
    }

    /// Window listeners registered for `event_type` in `phase`.
    #[must_use]
    pub fn window_listener_count(&self, event_type: EventType, phase: Phase) -> usize {
        self.window.listener_count(event_type, phase)
    }

    /// Total registrations across document and window.
    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.document.total_listeners() + self.window.total_listeners()
    }

    /// The element that last received focus.
    #[must_use]
    pub fn active_element(&self) -> Option<ElementId> {
        self.active_element.get()
    }
}

impl EventTarget for SyntheticDocument {
    fn add_event_listener(&self, event_type: EventType, listener: &DomListener, phase: Phase) {
        self.document.add_event_listener(event_type, listener, phase);
    }

    fn remove_event_listener(&self, event_type: EventType, listener: &DomListener, phase: Phase) {
        self.document
            .remove_event_listener(event_type, listener, phase);
    }
}

impl Document for SyntheticDocument {
    fn document_id(&self) -> DocumentId {
        self.id
    }

    fn window(&self) -> &dyn EventTarget {
        &self.window
    }
}

impl FocusHost for SyntheticDocument {
    fn focus(&self, element: ElementId) {
        self.active_element.set(Some(element));
    }
}
