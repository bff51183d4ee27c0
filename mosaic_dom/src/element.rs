// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element handles and ancestor lookup.
//!
//! ## Minimal example
//!
//! ```
//! use mosaic_dom::element::{ElementId, ElementTree, closest};
//!
//! let mut tree = ElementTree::new();
//! tree.insert(ElementId(2), ElementId(1));
//! tree.insert(ElementId(3), ElementId(2));
//!
//! // Walk from 3 upwards until we reach 1.
//! assert_eq!(closest(&tree, ElementId(3), |e| e == ElementId(1)), Some(ElementId(1)));
//! assert_eq!(closest(&tree, ElementId(3), |e| e == ElementId(9)), None);
//! ```

use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Opaque handle for a node in a document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Resolves the parent of an element, if any.
pub trait ParentLookup {
    /// Return the parent of `element`, or `None` for a root or unknown node.
    fn parent_of(&self, element: ElementId) -> Option<ElementId>;
}

impl<T: ParentLookup + ?Sized> ParentLookup for &T {
    fn parent_of(&self, element: ElementId) -> Option<ElementId> {
        (**self).parent_of(element)
    }
}

/// Walk `start` and then its ancestors, returning the first element matching `predicate`.
///
/// `start` itself is tested first. The walk stops at the first element
/// without a parent, or at the first element it has already visited if the
/// lookup loops. Each element is tested at most once.
pub fn closest<L, F>(lookup: &L, start: ElementId, mut predicate: F) -> Option<ElementId>
where
    L: ParentLookup + ?Sized,
    F: FnMut(ElementId) -> bool,
{
    let mut visited: SmallVec<[ElementId; 16]> = SmallVec::new();
    let mut current = Some(start);
    while let Some(element) = current {
        if visited.contains(&element) {
            break;
        }
        if predicate(element) {
            return Some(element);
        }
        visited.push(element);
        current = lookup.parent_of(element);
    }
    None
}

/// A child → parent table.
///
/// Only parent links are stored; that is all hit-testing and focus return need.
#[derive(Clone, Debug, Default)]
pub struct ElementTree {
    parents: HashMap<ElementId, ElementId>,
}

impl ElementTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parents: HashMap::new(),
        }
    }

    /// Attach `child` under `parent`, replacing any previous parent.
    pub fn insert(&mut self, child: ElementId, parent: ElementId) {
        self.parents.insert(child, parent);
    }

    /// Detach `child` from its parent, returning the old parent.
    pub fn remove(&mut self, child: ElementId) -> Option<ElementId> {
        self.parents.remove(&child)
    }

    /// Ancestors of `element`, nearest first, excluding `element` itself.
    #[must_use]
    pub fn ancestors(&self, element: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut current = self.parent_of(element);
        while let Some(parent) = current {
            // A malformed table could loop; stop once we come back around.
            if parent == element || out.contains(&parent) {
                break;
            }
            out.push(parent);
            current = self.parent_of(parent);
        }
        out
    }

    /// Returns `true` if `ancestor` is `element` or one of its ancestors.
    #[must_use]
    pub fn contains(&self, ancestor: ElementId, element: ElementId) -> bool {
        element == ancestor || self.ancestors(element).contains(&ancestor)
    }
}

impl ParentLookup for ElementTree {
    fn parent_of(&self, element: ElementId) -> Option<ElementId> {
        self.parents.get(&element).copied()
    }
}
