// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mosaic DOM: the structural contract the editor's interaction core relies on.
//!
//! ## Overview
//!
//! The interaction core never talks to a browser directly. It needs a small
//! amount of structure from whatever hosts it:
//!
//! - [`element`]: opaque [`ElementId`](element::ElementId) handles and a
//!   [`ParentLookup`](element::ParentLookup) to walk ancestors (used for hit-testing).
//! - [`event`]: raw events, one data shape per family (keyboard, pointer, drag,
//!   clipboard, error), each carrying a `default_prevented` flag.
//! - [`target`]: listener registration with capture/bubble phases, documents and
//!   their windows, and focus.
//! - [`synthetic`]: an in-memory document that honors all of the above, for
//!   headless embedders and tests.
//!
//! A browser embedder implements [`Document`](target::Document) over its real
//! document and converts native events into [`DomEvent`](event::DomEvent) values
//! inside its native listeners.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod element;
pub mod event;
pub mod synthetic;
pub mod target;
