// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input events, one structural contract per event family.
//!
//! A [`DomEvent`] pairs an [`EventType`] with the data of its family and a
//! `default_prevented` flag that listeners can set through a shared reference.
//!
//! ```
//! use kurbo::Point;
//! use mosaic_dom::element::ElementId;
//! use mosaic_dom::event::{DomEvent, EventType, PointerEvent};
//!
//! let ev = DomEvent::pointer(
//!     EventType::MouseDown,
//!     PointerEvent::new(ElementId(7), Point::new(10.0, 20.0)),
//! );
//! assert_eq!(ev.event_type(), EventType::MouseDown);
//! assert_eq!(ev.target(), Some(ElementId(7)));
//!
//! ev.prevent_default();
//! assert!(ev.default_prevented());
//! ```

use alloc::string::String;
use core::cell::Cell;
use core::fmt;

use bitflags::bitflags;
use kurbo::Point;
use smallvec::SmallVec;

use crate::element::ElementId;

/// Raw event types the editor listens for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// `keydown`
    KeyDown,
    /// `mousedown`
    MouseDown,
    /// `mousemove`
    MouseMove,
    /// `mouseup`
    MouseUp,
    /// `dragstart`
    DragStart,
    /// `dragenter`
    DragEnter,
    /// `dragover`
    DragOver,
    /// `dragleave`
    DragLeave,
    /// `drop`
    Drop,
    /// `dragend`
    DragEnd,
    /// `paste`
    Paste,
    /// Window-level `error`.
    Error,
}

impl EventType {
    /// The DOM name of this event type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeyDown => "keydown",
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::DragStart => "dragstart",
            Self::DragEnter => "dragenter",
            Self::DragOver => "dragover",
            Self::DragLeave => "dragleave",
            Self::Drop => "drop",
            Self::DragEnd => "dragend",
            Self::Paste => "paste",
            Self::Error => "error",
        }
    }

    /// Returns `true` for the `mouse*` types.
    #[must_use]
    pub const fn is_pointer(self) -> bool {
        matches!(self, Self::MouseDown | Self::MouseMove | Self::MouseUp)
    }

    /// Returns `true` for the drag-and-drop lifecycle types.
    #[must_use]
    pub const fn is_drag(self) -> bool {
        matches!(
            self,
            Self::DragStart
                | Self::DragEnter
                | Self::DragOver
                | Self::DragLeave
                | Self::Drop
                | Self::DragEnd
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listener registration phase.
///
/// Capturing listeners on a target observe an event before bubbling ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Registered with `capture: true`.
    Capture,
    /// Registered with the default options.
    Bubble,
}

bitflags! {
    /// Modifier keys held while an event fired.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control.
        const CTRL = 1 << 0;
        /// Shift.
        const SHIFT = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command / Windows.
        const META = 1 << 3;
    }
}

/// A logical key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Character(char),
    /// The Escape key.
    Escape,
    /// Any other named key, by its DOM `key` value.
    Named(String),
}

impl Key {
    /// Compare two keys, folding ASCII case for characters.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Character(a), Self::Character(b)) => a.eq_ignore_ascii_case(b),
            _ => self == other,
        }
    }
}

/// `keydown` data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key pressed.
    pub key: Key,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// A key with no modifiers.
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// A key with the given modifiers.
    #[must_use]
    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// `mousedown` / `mousemove` / `mouseup` data.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Innermost element under the pointer.
    pub target: ElementId,
    /// Position in the document viewport.
    pub client: Point,
    /// Position on the screen.
    pub screen: Point,
    /// Pressed buttons, DOM `buttons` encoding.
    pub buttons: u16,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// A pointer event at `client`, with the screen position equal to it.
    #[must_use]
    pub fn new(target: ElementId, client: Point) -> Self {
        Self {
            target,
            client,
            screen: client,
            buttons: 0,
            modifiers: Modifiers::empty(),
        }
    }
}

/// Format → payload pairs carried by drag and clipboard events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: SmallVec<[(String, String); 2]>,
}

impl DataTransfer {
    /// An empty transfer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `data` for `format`, replacing any previous value.
    pub fn set_data(&mut self, format: impl Into<String>, data: impl Into<String>) {
        let format = format.into();
        let data = data.into();
        if let Some(entry) = self.entries.iter_mut().find(|(f, _)| *f == format) {
            entry.1 = data;
        } else {
            self.entries.push((format, data));
        }
    }

    /// Builder form of [`DataTransfer::set_data`].
    #[must_use]
    pub fn with_data(mut self, format: impl Into<String>, data: impl Into<String>) -> Self {
        self.set_data(format, data);
        self
    }

    /// The payload for `format`, if present.
    #[must_use]
    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, d)| d.as_str())
    }

    /// Formats in insertion order.
    pub fn types(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    /// Returns `true` if no data is carried.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Drag lifecycle data.
#[derive(Clone, Debug, PartialEq)]
pub struct DragEvent {
    /// Element the event fired on.
    pub target: ElementId,
    /// Position in the document viewport.
    pub client: Point,
    /// Position on the screen. Browsers report `(0, 0)` when the pointer left the viewport.
    pub screen: Point,
    /// Dragged data.
    pub data: DataTransfer,
}

impl DragEvent {
    /// A drag event at `client`, with the screen position equal to it and no data.
    #[must_use]
    pub fn new(target: ElementId, client: Point) -> Self {
        Self {
            target,
            client,
            screen: client,
            data: DataTransfer::new(),
        }
    }

    /// Override the screen position.
    #[must_use]
    pub fn at_screen(mut self, screen: Point) -> Self {
        self.screen = screen;
        self
    }

    /// Attach transfer data.
    #[must_use]
    pub fn with_data(mut self, data: DataTransfer) -> Self {
        self.data = data;
        self
    }
}

/// `paste` data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipboardEvent {
    /// Focused element receiving the paste.
    pub target: ElementId,
    /// Pasted data.
    pub data: DataTransfer,
}

/// Window `error` data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorEvent {
    /// Error message.
    pub message: String,
    /// Script the error came from.
    pub filename: String,
    /// 1-based line, 0 if unknown.
    pub line: u32,
    /// 1-based column, 0 if unknown.
    pub column: u32,
}

impl ErrorEvent {
    /// An error with a message and no location.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Family-specific event data.
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    /// Keyboard.
    Key(KeyboardEvent),
    /// Mouse.
    Pointer(PointerEvent),
    /// Drag and drop.
    Drag(DragEvent),
    /// Clipboard.
    Clipboard(ClipboardEvent),
    /// Uncaught error.
    Error(ErrorEvent),
}

/// One raw event as delivered to DOM listeners.
#[derive(Clone, Debug)]
pub struct DomEvent {
    event_type: EventType,
    data: EventData,
    default_prevented: Cell<bool>,
}

impl DomEvent {
    fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            data,
            default_prevented: Cell::new(false),
        }
    }

    /// A `keydown` event.
    #[must_use]
    pub fn key_down(event: KeyboardEvent) -> Self {
        Self::new(EventType::KeyDown, EventData::Key(event))
    }

    /// A `mouse*` event.
    ///
    /// Non-pointer types are coerced to `mousemove`.
    #[must_use]
    pub fn pointer(event_type: EventType, event: PointerEvent) -> Self {
        let event_type = if event_type.is_pointer() {
            event_type
        } else {
            EventType::MouseMove
        };
        Self::new(event_type, EventData::Pointer(event))
    }

    /// A drag lifecycle event.
    ///
    /// Non-drag types are coerced to `dragover`.
    #[must_use]
    pub fn drag(event_type: EventType, event: DragEvent) -> Self {
        let event_type = if event_type.is_drag() {
            event_type
        } else {
            EventType::DragOver
        };
        Self::new(event_type, EventData::Drag(event))
    }

    /// A `paste` event.
    #[must_use]
    pub fn paste(event: ClipboardEvent) -> Self {
        Self::new(EventType::Paste, EventData::Clipboard(event))
    }

    /// A window `error` event.
    #[must_use]
    pub fn error(event: ErrorEvent) -> Self {
        Self::new(EventType::Error, EventData::Error(event))
    }

    /// The event type.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// The family data.
    #[must_use]
    pub fn data(&self) -> &EventData {
        &self.data
    }

    /// Element the event fired on, for families that have one.
    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        match &self.data {
            EventData::Pointer(p) => Some(p.target),
            EventData::Drag(d) => Some(d.target),
            EventData::Clipboard(c) => Some(c.target),
            EventData::Key(_) | EventData::Error(_) => None,
        }
    }

    /// Keyboard data, if this is a keyboard event.
    #[must_use]
    pub fn as_key(&self) -> Option<&KeyboardEvent> {
        match &self.data {
            EventData::Key(k) => Some(k),
            _ => None,
        }
    }

    /// Pointer data, if this is a pointer event.
    #[must_use]
    pub fn as_pointer(&self) -> Option<&PointerEvent> {
        match &self.data {
            EventData::Pointer(p) => Some(p),
            _ => None,
        }
    }

    /// Drag data, if this is a drag event.
    #[must_use]
    pub fn as_drag(&self) -> Option<&DragEvent> {
        match &self.data {
            EventData::Drag(d) => Some(d),
            _ => None,
        }
    }

    /// Clipboard data, if this is a paste event.
    #[must_use]
    pub fn as_clipboard(&self) -> Option<&ClipboardEvent> {
        match &self.data {
            EventData::Clipboard(c) => Some(c),
            _ => None,
        }
    }

    /// Error data, if this is an error event.
    #[must_use]
    pub fn as_error(&self) -> Option<&ErrorEvent> {
        match &self.data {
            EventData::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Suppress the browser's default action for this event.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Returns `true` once any listener called [`DomEvent::prevent_default`].
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
