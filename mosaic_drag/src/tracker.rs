// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Holds the single live [`DragSession`] between drag start and drop or end.

use kurbo::{Point, Vec2};
use mosaic_dom::element::ElementId;

use crate::error::DragError;
use crate::session::{DragSession, DropCommit};

/// Owner of at most one live drag session.
#[derive(Clone, Debug)]
pub struct DragTracker<M, B> {
    session: Option<DragSession<M, B>>,
}

impl<M, B> Default for DragTracker<M, B> {
    fn default() -> Self {
        Self { session: None }
    }
}

impl<M, B> DragTracker<M, B> {
    /// A tracker with no drag in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `session`.
    ///
    /// Fails with [`DragError::AlreadyDragging`] if a session is live; drags
    /// do not nest. The live session is kept and `session` is dropped.
    pub fn begin(&mut self, session: DragSession<M, B>) -> Result<(), DragError> {
        if self.session.is_some() {
            return Err(DragError::AlreadyDragging);
        }
        mosaic_bus::trace!(kind = session.kind.as_str(), "drag began");
        self.session = Some(session);
        Ok(())
    }

    /// The live session.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession<M, B>> {
        self.session.as_ref()
    }

    /// The live session, mutably.
    pub fn session_mut(&mut self) -> Option<&mut DragSession<M, B>> {
        self.session.as_mut()
    }

    /// Record the candidate target on the live session.
    pub fn retarget(
        &mut self,
        element: ElementId,
        binding: Option<B>,
        insert_index: usize,
    ) -> Result<(), DragError> {
        let session = self.session.as_mut().ok_or(DragError::NotDragging)?;
        session.retarget(element, binding, insert_index);
        Ok(())
    }

    /// Record a pointer position on the live session; see [`DragSession::track`].
    pub fn track(&mut self, pos: Point) -> Option<Vec2> {
        self.session.as_mut()?.track(pos)
    }

    /// End the gesture with a drop and commit the live session.
    ///
    /// The session is consumed even when the commit fails for lack of a
    /// target.
    pub fn drop_commit(&mut self) -> Result<DropCommit<M, B>, DragError> {
        let session = self.session.take().ok_or(DragError::NotDragging)?;
        let commit = session.commit();
        mosaic_bus::trace!(committed = commit.is_ok(), "drag dropped");
        commit
    }

    /// End the gesture without a drop, discarding the live session.
    pub fn abandon(&mut self) -> Option<DragSession<M, B>> {
        let session = self.session.take();
        if session.is_some() {
            mosaic_bus::trace!("drag abandoned");
        }
        session
    }

    /// Returns `true` while a session is live.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Tracker = DragTracker<&'static str, u32>;

    #[test]
    fn new_tracker_is_idle() {
        let mut t = Tracker::new();
        assert!(!t.is_dragging());
        assert!(t.session().is_none());
        assert_eq!(t.drop_commit(), Err(DragError::NotDragging));
        assert_eq!(t.abandon(), None);
        assert_eq!(t.retarget(ElementId(1), None, 0), Err(DragError::NotDragging));
        assert_eq!(t.track(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn nested_begin_is_rejected_and_keeps_first_session() {
        let mut t = Tracker::new();
        t.begin(DragSession::new("section", "first")).unwrap();
        assert_eq!(
            t.begin(DragSession::new("widget", "second")),
            Err(DragError::AlreadyDragging)
        );
        assert_eq!(t.session().map(|s| s.source_model), Some("first"));
    }

    #[test]
    fn drop_commit_consumes_the_session() {
        let mut t = Tracker::new();
        t.begin(DragSession::new("widget", "w")).unwrap();
        t.retarget(ElementId(5), Some(50), 1).unwrap();
        let commit = t.drop_commit().unwrap();
        assert_eq!(commit.target_element, ElementId(5));
        assert_eq!(commit.insert_index, 1);
        assert!(!t.is_dragging());

        // A new gesture can start afterwards.
        t.begin(DragSession::new("widget", "w")).unwrap();
    }

    #[test]
    fn drop_without_target_still_ends_the_gesture() {
        let mut t = Tracker::new();
        t.begin(DragSession::new("row", "r")).unwrap();
        assert_eq!(t.drop_commit(), Err(DragError::NoTarget));
        assert!(!t.is_dragging());
    }

    #[test]
    fn abandon_returns_the_uncommitted_session() {
        let mut t = Tracker::new();
        t.begin(DragSession::new("row", "r")).unwrap();
        t.retarget(ElementId(9), None, 4).unwrap();
        let s = t.abandon().unwrap();
        assert_eq!(s.insert_index, Some(4));
        assert!(!t.is_dragging());
    }

    #[test]
    fn session_mut_edits_the_live_session() {
        let mut t = Tracker::new();
        t.begin(DragSession::new("widget", "w").with_start(Point::ZERO))
            .unwrap();
        if let Some(s) = t.session_mut() {
            s.source_binding = Some(3);
        }
        assert_eq!(t.track(Point::new(2.0, 0.0)), Some(Vec2::new(2.0, 0.0)));
        assert_eq!(t.session().and_then(|s| s.source_binding), Some(3));
    }
}
