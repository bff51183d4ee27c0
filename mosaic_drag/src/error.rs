// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for drag session transitions.

use core::fmt;

/// Error returned by drag session transitions that do not apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragError {
    /// A drag began while another gesture's session was still live.
    AlreadyDragging,
    /// A session operation arrived with no drag in progress.
    NotDragging,
    /// The drop happened with no accepting target or insert position recorded.
    NoTarget,
}

impl fmt::Display for DragError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AlreadyDragging => "a drag session is already in progress",
            Self::NotDragging => "no drag session is in progress",
            Self::NoTarget => "drop has no target element or insert index",
        })
    }
}

impl core::error::Error for DragError {}
