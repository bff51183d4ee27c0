// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topic names.

use core::fmt;

/// A named bus topic.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Topic(&'static str);

impl Topic {
    /// A topic with the given name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The topic name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Topic({})", self.0)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Editor topics published and consumed by the interaction core.
///
/// Payload conventions are noted per topic; "raw" means the original input
/// event is forwarded unchanged.
pub mod topics {
    use super::Topic;

    /// Save shortcut. No payload.
    pub const ON_SAVE_CHANGES: Topic = Topic::new("onSaveChanges");
    /// Publish shortcut. No payload.
    pub const ON_PUBLISH: Topic = Topic::new("onPublish");
    /// Escape pressed. No payload.
    pub const ON_ESCAPE: Topic = Topic::new("onEscape");
    /// Escape pressed with no overlay left to close. No payload.
    pub const ON_TOP_LEVEL_ESCAPE: Topic = Topic::new("onTopLevelEscape");
    /// Raw pointer event.
    pub const ON_POINTER_MOVE: Topic = Topic::new("onPointerMove");
    /// Raw pointer event.
    pub const ON_POINTER_DOWN: Topic = Topic::new("onPointerDown");
    /// Raw pointer event.
    pub const ON_POINTER_UP: Topic = Topic::new("onPointerUp");
    /// Drag started. No payload.
    pub const ON_DRAG_START: Topic = Topic::new("onDragStart");
    /// Drag entered a candidate target. No payload.
    pub const ON_DRAG_ENTER: Topic = Topic::new("onDragEnter");
    /// Drag moving over a candidate target. No payload.
    pub const ON_DRAG_OVER: Topic = Topic::new("onDragOver");
    /// Drag left a candidate target. No payload.
    pub const ON_DRAG_LEAVE: Topic = Topic::new("onDragLeave");
    /// Drag left the viewport entirely. No payload.
    pub const ON_DRAG_LEAVE_SCREEN: Topic = Topic::new("onDragLeaveScreen");
    /// Raw drag event of the drop.
    pub const ON_DRAG_DROP: Topic = Topic::new("onDragDrop");
    /// Drag finished, dropped or not. No payload.
    pub const ON_DRAG_END: Topic = Topic::new("onDragEnd");
    /// Raw clipboard event.
    pub const ON_PASTE: Topic = Topic::new("onPaste");
    /// Raw error event.
    pub const ON_ERROR: Topic = Topic::new("onError");
}
