// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mosaic Input: normalize raw DOM input into semantic editor events.
//!
//! ## Overview
//!
//! [`GlobalEventRouter`](router::GlobalEventRouter) attaches to one or more
//! documents (for example the host page and an embedded preview frame) and
//! republishes what it sees on an [`EditorBus`](router::EditorBus):
//!
//! - Key chords from the [`KeyMap`](keymap::KeyMap) become topics such as
//!   `onSaveChanges`, with the browser default suppressed.
//! - Pointer, paste and error events are forwarded verbatim.
//! - Drag lifecycle events become `onDrag*` topics, with the default
//!   suppression that keeps drop targets live.
//!
//! [`UnhandledErrorReporter`](notice::UnhandledErrorReporter) is a small
//! consumer that turns `onError` into a generic user-facing notice.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use mosaic_bus::{listener, topics};
//! use mosaic_dom::event::{DomEvent, Key, KeyboardEvent, Modifiers};
//! use mosaic_dom::synthetic::SyntheticDocument;
//! use mosaic_input::router::{EditorBus, GlobalEventRouter};
//!
//! let bus = Rc::new(EditorBus::new());
//! let saves = Rc::new(Cell::new(0));
//! bus.add_listener(topics::ON_SAVE_CHANGES, {
//!     let saves = saves.clone();
//!     listener(move |_: Option<&DomEvent>| saves.set(saves.get() + 1))
//! });
//!
//! let doc = Rc::new(SyntheticDocument::new(1));
//! let mut router = GlobalEventRouter::new(bus);
//! router.attach(doc.clone());
//!
//! let ctrl_s = DomEvent::key_down(KeyboardEvent::with_modifiers(
//!     Key::Character('s'),
//!     Modifiers::CTRL,
//! ));
//! let default_allowed = doc.dispatch(&ctrl_s);
//! assert!(!default_allowed);
//! assert_eq!(saves.get(), 1);
//! ```
//!
//! ## Features
//!
//! - `std` / `libm`: forwarded to Kurbo through `mosaic_dom`.
//! - `tracing`: debug events for attach/detach and key chords.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod keymap;
pub mod notice;
pub mod router;
