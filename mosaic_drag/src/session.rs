// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One drag-and-drop transaction.
//!
//! ## Lifecycle
//!
//! 1) On `onDragStart`, build a [`DragSession`] with [`DragSession::new`] and the
//!    `with_*` builders describing the dragged node and its parent.
//! 2) On every `onDragEnter`/`onDragOver`, call [`DragSession::retarget`] with
//!    the candidate under the pointer. Target fields are overwritten each time.
//! 3) On `onDragDrop`, call [`DragSession::commit`] to read the final target.
//!    On `onDragEnd` without a drop, discard the session.

use alloc::string::String;

use kurbo::{Point, Vec2};
use mosaic_dom::element::ElementId;

use crate::error::DragError;

/// Cross-cutting state for one drag gesture.
///
/// `M` is the widget model type and `B` the widget binding type of the
/// consuming editor.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<M, B> {
    /// Kind of thing being dragged, such as `"section"`, `"row"` or `"widget"`.
    pub kind: String,
    /// Element the drag started from.
    pub source_element: Option<ElementId>,
    /// Model of the dragged node.
    pub source_model: M,
    /// Binding of the dragged node.
    pub source_binding: Option<B>,
    /// Model of the dragged node's parent at drag start.
    pub parent_model: Option<M>,
    /// Binding of the dragged node's parent at drag start.
    pub parent_binding: Option<B>,
    /// Proposed position in the accepting parent. Volatile until drop.
    pub insert_index: Option<usize>,
    /// Accepting element. Volatile until drop.
    pub target_element: Option<ElementId>,
    /// Binding of the accepting element. Volatile until drop.
    pub target_binding: Option<B>,
    /// Pointer position when the drag started.
    pub start_pos: Option<Point>,
    /// Last pointer position seen by [`DragSession::track`].
    pub last_pos: Option<Point>,
}

impl<M, B> DragSession<M, B> {
    /// A session for dragging `source_model`, with everything else unset.
    pub fn new(kind: impl Into<String>, source_model: M) -> Self {
        Self {
            kind: kind.into(),
            source_element: None,
            source_model,
            source_binding: None,
            parent_model: None,
            parent_binding: None,
            insert_index: None,
            target_element: None,
            target_binding: None,
            start_pos: None,
            last_pos: None,
        }
    }

    /// Set the element the drag started from.
    #[must_use]
    pub fn with_source_element(mut self, element: ElementId) -> Self {
        self.source_element = Some(element);
        self
    }

    /// Set the binding of the dragged node.
    #[must_use]
    pub fn with_source_binding(mut self, binding: B) -> Self {
        self.source_binding = Some(binding);
        self
    }

    /// Set the dragged node's parent model and binding.
    #[must_use]
    pub fn with_parent(mut self, model: M, binding: Option<B>) -> Self {
        self.parent_model = Some(model);
        self.parent_binding = binding;
        self
    }

    /// Set the pointer position the drag started at.
    #[must_use]
    pub fn with_start(mut self, pos: Point) -> Self {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self
    }

    /// Record the candidate drop target currently under the pointer.
    pub fn retarget(&mut self, element: ElementId, binding: Option<B>, insert_index: usize) {
        self.target_element = Some(element);
        self.target_binding = binding;
        self.insert_index = Some(insert_index);
    }

    /// Forget the candidate drop target, e.g. after the pointer left it.
    pub fn clear_target(&mut self) {
        self.target_element = None;
        self.target_binding = None;
        self.insert_index = None;
    }

    /// Returns `true` if a target element and insert index are both recorded.
    #[must_use]
    pub fn has_target(&self) -> bool {
        self.target_element.is_some() && self.insert_index.is_some()
    }

    /// Record a pointer position, returning the delta since the last one.
    ///
    /// Returns `None` before a start position is known. The first call after
    /// a start with no last position only records.
    pub fn track(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// Offset of `current` from the start position.
    #[must_use]
    pub fn total_offset(&self, current: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current - start)
    }

    /// Finish the drag, producing what the consumer needs to commit a move.
    ///
    /// Fails with [`DragError::NoTarget`] if no target element or insert index
    /// was recorded; the session is consumed either way, as a drop always ends
    /// the gesture.
    pub fn commit(self) -> Result<DropCommit<M, B>, DragError> {
        let (Some(target_element), Some(insert_index)) = (self.target_element, self.insert_index)
        else {
            return Err(DragError::NoTarget);
        };
        Ok(DropCommit {
            kind: self.kind,
            source_element: self.source_element,
            source_model: self.source_model,
            source_binding: self.source_binding,
            parent_model: self.parent_model,
            parent_binding: self.parent_binding,
            target_element,
            target_binding: self.target_binding,
            insert_index,
        })
    }
}

/// The settled result of a drag that ended in a drop on a target.
#[derive(Clone, Debug, PartialEq)]
pub struct DropCommit<M, B> {
    /// Kind of thing that was dragged.
    pub kind: String,
    /// Element the drag started from.
    pub source_element: Option<ElementId>,
    /// Model of the dragged node.
    pub source_model: M,
    /// Binding of the dragged node.
    pub source_binding: Option<B>,
    /// Model of the original parent.
    pub parent_model: Option<M>,
    /// Binding of the original parent.
    pub parent_binding: Option<B>,
    /// Accepting element.
    pub target_element: ElementId,
    /// Binding of the accepting element.
    pub target_binding: Option<B>,
    /// Position in the accepting parent.
    pub insert_index: usize,
}
