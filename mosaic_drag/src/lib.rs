// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mosaic Drag: the state one drag-and-drop gesture carries from start to drop.
//!
//! The input router publishes `onDragStart`, `onDragEnter`, `onDragOver`,
//! `onDragDrop` and `onDragEnd` on the editor bus. This crate holds what the
//! widget logic consuming those topics needs to remember in between:
//!
//! - [`session::DragSession`]: what is being dragged, where it came from, and
//!   the candidate target under the pointer. Target fields are volatile and
//!   only meaningful when read at drop time.
//! - [`tracker::DragTracker`]: at most one live session. A second drag cannot
//!   begin while one is live; a drop commits it, and a drag end without a drop
//!   abandons it.
//!
//! ## Example
//!
//! ```
//! use mosaic_dom::element::ElementId;
//! use mosaic_drag::session::DragSession;
//! use mosaic_drag::tracker::DragTracker;
//!
//! let mut drags: DragTracker<&str, u32> = DragTracker::new();
//!
//! // onDragStart
//! let session = DragSession::new("widget", "heading")
//!     .with_source_element(ElementId(4))
//!     .with_parent("section", Some(1));
//! drags.begin(session).unwrap();
//!
//! // onDragOver, twice, over different candidates
//! drags.retarget(ElementId(8), Some(2), 0).unwrap();
//! drags.retarget(ElementId(9), Some(3), 1).unwrap();
//!
//! // onDragDrop
//! let commit = drags.drop_commit().unwrap();
//! assert_eq!(commit.target_element, ElementId(9));
//! assert_eq!(commit.insert_index, 1);
//!
//! // onDragEnd follows the drop and finds nothing left to abandon.
//! assert!(drags.abandon().is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod error;
pub mod session;
pub mod tracker;

pub use error::DragError;
