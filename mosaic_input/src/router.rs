// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The global event router.
//!
//! [`GlobalEventRouter`] listens to raw events on every attached document and
//! republishes them on the bus under editor topics.
//!
//! ## Registrations
//!
//! | Event | Phase | Published | Default |
//! |-------|-------|-----------|---------|
//! | `keydown` | bubble | per [`KeyMap`] | suppressed on match, before publish |
//! | `mousemove` / `mousedown` / `mouseup` | capture | `onPointerMove` / `onPointerDown` / `onPointerUp` (raw) | untouched |
//! | `dragstart` | capture | `onDragStart` | untouched |
//! | `dragenter` | capture | `onDragEnter` | suppressed after publish |
//! | `dragover` | capture | `onDragOver` | suppressed before publish |
//! | `dragleave` | bubble | `onDragLeave`, then `onDragLeaveScreen` at screen `(0, 0)` | untouched |
//! | `drop` | capture | `onDragDrop` (raw) | suppressed after publish |
//! | `dragend` | capture | `onDragEnd` | untouched |
//! | `paste` | capture | `onPaste` (raw) | untouched |
//! | window `error` | bubble | `onError` (raw) | untouched |
//!
//! Capturing drag listeners see events before any widget-level handler below
//! the document, which keeps every element a live drop target.
//!
//! ## Identity
//!
//! Each listener is created once, when the router is built, and the same
//! `Rc` is handed to every document. Detaching removes exactly those
//! registrations, phase for phase.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use mosaic_bus::{EventBus, Topic, topics};
use mosaic_dom::event::{DomEvent, EventType, Phase};
use mosaic_dom::target::{Document, DocumentId, DomListener, EventTarget};
use smallvec::SmallVec;

use crate::keymap::KeyMap;

/// The bus the editor publishes raw-payload topics on.
pub type EditorBus = EventBus<DomEvent>;

/// Document-level registrations, in attach order.
const DOCUMENT_EVENTS: [(EventType, Phase); 11] = [
    (EventType::KeyDown, Phase::Bubble),
    (EventType::DragEnter, Phase::Capture),
    (EventType::DragStart, Phase::Capture),
    (EventType::DragOver, Phase::Capture),
    (EventType::DragLeave, Phase::Bubble),
    (EventType::Drop, Phase::Capture),
    (EventType::DragEnd, Phase::Capture),
    (EventType::Paste, Phase::Capture),
    (EventType::MouseMove, Phase::Capture),
    (EventType::MouseDown, Phase::Capture),
    (EventType::MouseUp, Phase::Capture),
];

/// Window-level registrations.
const WINDOW_EVENTS: [(EventType, Phase); 1] = [(EventType::Error, Phase::Bubble)];

/// Translates one raw event into bus traffic.
struct Translator {
    bus: Rc<EditorBus>,
    key_map: KeyMap,
}

impl Translator {
    fn translate(&self, event_type: EventType, event: &DomEvent) {
        match event_type {
            EventType::KeyDown => self.key_down(event),
            EventType::MouseMove => self.forward(topics::ON_POINTER_MOVE, event),
            EventType::MouseDown => self.forward(topics::ON_POINTER_DOWN, event),
            EventType::MouseUp => self.forward(topics::ON_POINTER_UP, event),
            EventType::DragStart => self.signal(topics::ON_DRAG_START),
            EventType::DragEnter => {
                self.signal(topics::ON_DRAG_ENTER);
                event.prevent_default();
            }
            EventType::DragOver => {
                // Must be suppressed on every dragover or the drop target goes dead.
                event.prevent_default();
                self.signal(topics::ON_DRAG_OVER);
            }
            EventType::DragLeave => self.drag_leave(event),
            EventType::Drop => {
                self.forward(topics::ON_DRAG_DROP, event);
                event.prevent_default();
            }
            EventType::DragEnd => self.signal(topics::ON_DRAG_END),
            EventType::Paste => self.forward(topics::ON_PASTE, event),
            EventType::Error => self.forward(topics::ON_ERROR, event),
        }
    }

    fn key_down(&self, event: &DomEvent) {
        let Some(key) = event.as_key() else {
            return;
        };
        for binding in self.key_map.matching(key) {
            mosaic_bus::trace!(topic = binding.topic.name(), "key chord");
            event.prevent_default();
            self.signal(binding.topic);
        }
    }

    fn drag_leave(&self, event: &DomEvent) {
        self.signal(topics::ON_DRAG_LEAVE);
        let left_viewport = event
            .as_drag()
            .is_some_and(|drag| drag.screen.x == 0.0 && drag.screen.y == 0.0);
        if left_viewport {
            self.signal(topics::ON_DRAG_LEAVE_SCREEN);
        }
    }

    fn signal(&self, topic: Topic) {
        self.bus.dispatch(topic, None);
    }

    fn forward(&self, topic: Topic, event: &DomEvent) {
        self.bus.dispatch(topic, Some(event));
    }
}

struct Binding {
    event_type: EventType,
    phase: Phase,
    listener: DomListener,
}

impl Binding {
    fn build(translator: &Rc<Translator>, (event_type, phase): (EventType, Phase)) -> Self {
        let translator = translator.clone();
        let listener: DomListener =
            Rc::new(move |event: &DomEvent| translator.translate(event_type, event));
        Self {
            event_type,
            phase,
            listener,
        }
    }

    fn add_to<T: EventTarget + ?Sized>(&self, target: &T) {
        target.add_event_listener(self.event_type, &self.listener, self.phase);
    }

    fn remove_from<T: EventTarget + ?Sized>(&self, target: &T) {
        target.remove_event_listener(self.event_type, &self.listener, self.phase);
    }
}

/// Routes raw input from attached documents onto an [`EditorBus`].
///
/// Attaching is idempotent per [`DocumentId`]. Dropping the router detaches
/// every document it is still attached to.
pub struct GlobalEventRouter {
    translator: Rc<Translator>,
    document_bindings: SmallVec<[Binding; 11]>,
    window_bindings: SmallVec<[Binding; 1]>,
    attached: HashMap<DocumentId, Rc<dyn Document>>,
}

impl fmt::Debug for GlobalEventRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut attached: Vec<_> = self.attached.keys().copied().collect();
        attached.sort_unstable();
        f.debug_struct("GlobalEventRouter")
            .field("key_map", &self.translator.key_map)
            .field("attached", &attached)
            .finish_non_exhaustive()
    }
}

impl GlobalEventRouter {
    /// A router publishing on `bus` with the default [`KeyMap`].
    #[must_use]
    pub fn new(bus: Rc<EditorBus>) -> Self {
        Self::with_key_map(bus, KeyMap::default())
    }

    /// A router publishing on `bus` with custom key bindings.
    #[must_use]
    pub fn with_key_map(bus: Rc<EditorBus>, key_map: KeyMap) -> Self {
        let translator = Rc::new(Translator { bus, key_map });
        let document_bindings = DOCUMENT_EVENTS
            .into_iter()
            .map(|spec| Binding::build(&translator, spec))
            .collect();
        let window_bindings = WINDOW_EVENTS
            .into_iter()
            .map(|spec| Binding::build(&translator, spec))
            .collect();
        Self {
            translator,
            document_bindings,
            window_bindings,
            attached: HashMap::new(),
        }
    }

    /// The bus this router publishes on.
    #[must_use]
    pub fn bus(&self) -> &Rc<EditorBus> {
        &self.translator.bus
    }

    /// The active key bindings.
    #[must_use]
    pub fn key_map(&self) -> &KeyMap {
        &self.translator.key_map
    }

    /// Start routing events from `doc` and its window.
    ///
    /// Returns `false`, and registers nothing, if `doc` is already attached.
    pub fn attach(&mut self, doc: Rc<dyn Document>) -> bool {
        let id = doc.document_id();
        if self.attached.contains_key(&id) {
            return false;
        }
        for binding in &self.document_bindings {
            binding.add_to(&*doc);
        }
        let window = doc.window();
        for binding in &self.window_bindings {
            binding.add_to(window);
        }
        mosaic_bus::trace!(document = id.0, "router attached");
        self.attached.insert(id, doc);
        true
    }

    /// Stop routing events from `doc`.
    ///
    /// Returns `false` if `doc` was not attached.
    pub fn detach(&mut self, doc: &dyn Document) -> bool {
        let id = doc.document_id();
        if self.attached.remove(&id).is_none() {
            return false;
        }
        self.unbind(doc);
        mosaic_bus::trace!(document = id.0, "router detached");
        true
    }

    /// Detach every attached document.
    pub fn detach_all(&mut self) {
        let attached: Vec<_> = self.attached.drain().map(|(_, doc)| doc).collect();
        for doc in attached {
            self.unbind(&*doc);
        }
    }

    /// Returns `true` if `doc` is attached.
    #[must_use]
    pub fn is_attached(&self, doc: &dyn Document) -> bool {
        self.attached.contains_key(&doc.document_id())
    }

    /// Number of attached documents.
    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    fn unbind(&self, doc: &dyn Document) {
        for binding in &self.document_bindings {
            binding.remove_from(doc);
        }
        let window = doc.window();
        for binding in &self.window_bindings {
            binding.remove_from(window);
        }
    }
}

impl Drop for GlobalEventRouter {
    fn drop(&mut self) {
        self.detach_all();
    }
}
