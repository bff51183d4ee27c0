// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay stack.
//!
//! ## Transitions
//!
//! - [`ViewStack::push`] opens a view on top. Duplicates are not rejected.
//! - [`ViewStack::pop`] closes the top view, or publishes `onTopLevelEscape`
//!   when there is nothing left to close.
//! - [`ViewStack::remove`] closes a view and everything stacked above it.
//! - [`ViewStack::run_hit_test`] closes every view above the topmost one the
//!   pointer landed in.
//! - [`ViewStack::clear`] closes everything without signaling or refocusing.
//!
//! ## Re-entrancy
//!
//! No borrow of the stack is held while a view's `close` or `hit_test` runs,
//! so views may call back into the stack from either. The hit-test pass walks
//! a snapshot; a view that a callback already removed is skipped rather than
//! closed twice. [`ViewStack::remove`] stops as soon as its target is gone,
//! so a callback that removes the same view never drags views below it down.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use mosaic_bus::{EventBus, Listener, Topic, listener, topics};
use mosaic_dom::element::{ElementId, ParentLookup};
use mosaic_dom::event::DomEvent;
use mosaic_dom::target::FocusHost;
use smallvec::SmallVec;

use crate::view::{ViewRef, same_view};

/// Ordered overlays, last pushed on top.
///
/// Built with [`ViewStack::new`], which subscribes the stack to
/// `onPointerDown` (runs the hit test against the pointer target) and
/// `onEscape` (pops). Dropping the stack unsubscribes.
pub struct ViewStack {
    views: RefCell<Vec<ViewRef>>,
    bus: Rc<EventBus<DomEvent>>,
    tree: Rc<dyn ParentLookup>,
    focus: Rc<dyn FocusHost>,
    subscriptions: SmallVec<[(Topic, Listener<DomEvent>); 2]>,
}

impl fmt::Debug for ViewStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elements: Vec<ElementId> = self.views.borrow().iter().map(|v| v.element()).collect();
        f.debug_struct("ViewStack")
            .field("views", &elements)
            .finish_non_exhaustive()
    }
}

impl ViewStack {
    /// An empty stack wired to `bus`.
    ///
    /// `tree` resolves ancestors for the default hit test; `focus` receives
    /// focus-return requests.
    pub fn new(
        bus: Rc<EventBus<DomEvent>>,
        tree: Rc<dyn ParentLookup>,
        focus: Rc<dyn FocusHost>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<Self>| {
            let on_pointer_down = {
                let weak = weak.clone();
                listener(move |event: Option<&DomEvent>| {
                    let Some(stack) = weak.upgrade() else {
                        return;
                    };
                    if let Some(target) = event.and_then(DomEvent::target) {
                        stack.run_hit_test(target);
                    }
                })
            };
            let on_escape = {
                let weak = weak.clone();
                listener(move |_: Option<&DomEvent>| {
                    if let Some(stack) = weak.upgrade() {
                        stack.pop();
                    }
                })
            };

            let mut subscriptions: SmallVec<[(Topic, Listener<DomEvent>); 2]> = SmallVec::new();
            subscriptions.push((topics::ON_POINTER_DOWN, on_pointer_down));
            subscriptions.push((topics::ON_ESCAPE, on_escape));
            for (topic, l) in &subscriptions {
                bus.add_listener(*topic, l.clone());
            }

            Self {
                views: RefCell::new(Vec::new()),
                bus,
                tree,
                focus,
                subscriptions,
            }
        })
    }

    /// Open `view` on top of the stack.
    pub fn push(&self, view: ViewRef) {
        mosaic_bus::trace!(element = view.element().0, "view pushed");
        self.views.borrow_mut().push(view);
    }

    /// Close the top view and return it.
    ///
    /// On an empty stack, publishes `onTopLevelEscape` and returns `None`.
    pub fn pop(&self) -> Option<ViewRef> {
        let top = self.views.borrow_mut().pop();
        let Some(view) = top else {
            mosaic_bus::trace!("escape past the last view");
            self.bus.dispatch(topics::ON_TOP_LEVEL_ESCAPE, None);
            return None;
        };
        mosaic_bus::trace!(element = view.element().0, "view popped");
        view.close();
        self.return_focus(&view);
        Some(view)
    }

    /// Close `view` along with every view stacked above it, top first.
    ///
    /// Returns `false`, closing nothing, if `view` is not on the stack. If the
    /// same instance was pushed more than once, only the topmost entry is
    /// removed.
    ///
    /// If a close callback takes `view` off the stack first, the walk stops
    /// there and focus is left to whichever call removed it.
    pub fn remove(&self, view: &ViewRef) -> bool {
        if !self.contains(view) {
            return false;
        }
        loop {
            let top = self.views.borrow_mut().pop();
            let Some(top) = top else {
                self.bus.dispatch(topics::ON_TOP_LEVEL_ESCAPE, None);
                return true;
            };
            top.close();
            if same_view(&top, view) {
                mosaic_bus::trace!(element = top.element().0, "view removed");
                self.return_focus(&top);
                return true;
            }
            if !self.contains(view) {
                mosaic_bus::trace!(element = view.element().0, "view removed by a close callback");
                return true;
            }
        }
    }

    /// Dismiss every view above the topmost one containing `target`.
    ///
    /// Views are tested top to bottom. The first hit stops the walk and leaves
    /// that view and everything beneath it open. With no hit, the whole stack
    /// is closed. Returns how many views were closed.
    pub fn run_hit_test(&self, target: ElementId) -> usize {
        let snapshot = self.snapshot();
        let mut closed = 0;
        for view in snapshot.iter().rev() {
            if view.hit_test(target, &*self.tree) {
                break;
            }
            if self.take(view) {
                mosaic_bus::trace!(element = view.element().0, "view dismissed by outside click");
                view.close();
                closed += 1;
            }
        }
        closed
    }

    /// Close every view, bottom first, and empty the stack.
    ///
    /// Unlike [`ViewStack::pop`], this never publishes `onTopLevelEscape` and
    /// never moves focus.
    pub fn clear(&self) {
        let views = core::mem::take(&mut *self.views.borrow_mut());
        for view in &views {
            view.close();
        }
    }

    /// Views from bottom to top.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ViewRef> {
        self.views.borrow().clone()
    }

    /// The top view.
    #[must_use]
    pub fn top(&self) -> Option<ViewRef> {
        self.views.borrow().last().cloned()
    }

    /// Number of entries, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.borrow().len()
    }

    /// Returns `true` if no view is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.borrow().is_empty()
    }

    /// Returns `true` if `view` is on the stack.
    #[must_use]
    pub fn contains(&self, view: &ViewRef) -> bool {
        self.views.borrow().iter().any(|v| same_view(v, view))
    }

    /// Remove the topmost entry for `view`, if still present.
    fn take(&self, view: &ViewRef) -> bool {
        let mut views = self.views.borrow_mut();
        match views.iter().rposition(|v| same_view(v, view)) {
            Some(index) => {
                views.remove(index);
                true
            }
            None => false,
        }
    }

    fn return_focus(&self, view: &ViewRef) {
        if let Some(element) = view.return_focus_to() {
            self.focus.focus(element);
        }
    }
}

impl Drop for ViewStack {
    fn drop(&mut self) {
        for (topic, l) in &self.subscriptions {
            self.bus.remove_listener(*topic, l);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::View;
    use alloc::boxed::Box;
    use alloc::vec;
    use core::cell::Cell;
    use mosaic_dom::element::{ElementTree, closest};

    type Log = Rc<RefCell<Vec<&'static str>>>;

    struct TestView {
        name: &'static str,
        element: ElementId,
        forced_hit: Option<bool>,
        return_focus: Option<ElementId>,
        closes: Cell<u32>,
        log: Log,
        on_close: RefCell<Option<Box<dyn Fn()>>>,
    }

    impl View for TestView {
        fn element(&self) -> ElementId {
            self.element
        }

        fn hit_test(&self, target: ElementId, tree: &dyn ParentLookup) -> bool {
            self.forced_hit
                .unwrap_or_else(|| closest(tree, target, |e| e == self.element).is_some())
        }

        fn close(&self) {
            self.closes.set(self.closes.get() + 1);
            self.log.borrow_mut().push(self.name);
            if let Some(f) = self.on_close.borrow().as_ref() {
                f();
            }
        }

        fn return_focus_to(&self) -> Option<ElementId> {
            self.return_focus
        }
    }

    #[derive(Default)]
    struct Focus(RefCell<Vec<ElementId>>);

    impl Focus {
        fn last(&self) -> Option<ElementId> {
            self.0.borrow().last().copied()
        }
    }

    impl FocusHost for Focus {
        fn focus(&self, element: ElementId) {
            self.0.borrow_mut().push(element);
        }
    }

    struct Fixture {
        bus: Rc<EventBus<DomEvent>>,
        focus: Rc<Focus>,
        stack: Rc<ViewStack>,
        log: Log,
        top_level_escapes: Rc<Cell<u32>>,
    }

    /// Elements: each view `n` owns element `n * 10`, and `n * 10 + 1` is its child.
    fn fixture() -> Fixture {
        let mut tree = ElementTree::new();
        for n in 1..=5 {
            tree.insert(ElementId(n * 10), ElementId(1));
            tree.insert(ElementId(n * 10 + 1), ElementId(n * 10));
        }
        let bus = Rc::new(EventBus::new());
        let focus = Rc::new(Focus::default());
        let stack = ViewStack::new(bus.clone(), Rc::new(tree), focus.clone());
        let top_level_escapes = Rc::new(Cell::new(0));
        bus.add_listener(topics::ON_TOP_LEVEL_ESCAPE, {
            let count = top_level_escapes.clone();
            listener(move |_: Option<&DomEvent>| count.set(count.get() + 1))
        });
        Fixture {
            bus,
            focus,
            stack,
            log: Rc::default(),
            top_level_escapes,
        }
    }

    impl Fixture {
        fn make(&self, name: &'static str, n: u64) -> TestView {
            TestView {
                name,
                element: ElementId(n * 10),
                forced_hit: None,
                return_focus: None,
                closes: Cell::new(0),
                log: self.log.clone(),
                on_close: RefCell::new(None),
            }
        }

        fn view(&self, name: &'static str, n: u64) -> Rc<TestView> {
            Rc::new(self.make(name, n))
        }

        fn push(&self, view: &Rc<TestView>) {
            self.stack.push(view.clone());
        }

        fn elements(&self) -> Vec<ElementId> {
            self.stack.snapshot().iter().map(|v| v.element()).collect()
        }
    }

    fn as_ref(view: &Rc<TestView>) -> ViewRef {
        view.clone()
    }

    #[test]
    fn top_down_order_is_reverse_push_order() {
        let f = fixture();
        let views = [f.view("a", 1), f.view("b", 2), f.view("c", 3)];
        for v in &views {
            f.push(v);
        }
        let top_down: Vec<ElementId> = f
            .stack
            .snapshot()
            .iter()
            .rev()
            .map(|v| v.element())
            .collect();
        assert_eq!(top_down, vec![ElementId(30), ElementId(20), ElementId(10)]);
        assert_eq!(f.stack.top().map(|v| v.element()), Some(ElementId(30)));
    }

    #[test]
    fn pop_closes_only_the_top_view() {
        let f = fixture();
        let (a, b) = (f.view("a", 1), f.view("b", 2));
        f.push(&a);
        f.push(&b);

        let popped = f.stack.pop();
        assert!(popped.is_some_and(|p| same_view(&p, &as_ref(&b))));
        assert_eq!(b.closes.get(), 1);
        assert_eq!(a.closes.get(), 0);
        assert_eq!(f.elements(), vec![ElementId(10)]);
        assert_eq!(f.top_level_escapes.get(), 0);
    }

    #[test]
    fn pop_on_empty_signals_top_level_escape() {
        let f = fixture();
        assert!(f.stack.pop().is_none());
        assert_eq!(f.top_level_escapes.get(), 1);
        assert!(f.log.borrow().is_empty());
    }

    #[test]
    fn pop_returns_focus_after_close() {
        let f = fixture();
        let focus = f.focus.clone();
        let a = Rc::new(TestView {
            return_focus: Some(ElementId(99)),
            ..f.make("a", 1)
        });
        // Focus must still be unset while close runs.
        *a.on_close.borrow_mut() = Some(Box::new(move || assert_eq!(focus.last(), None)));
        f.push(&a);

        f.stack.pop();
        assert_eq!(f.focus.last(), Some(ElementId(99)));
    }

    #[test]
    fn remove_closes_everything_above_inclusive() {
        let f = fixture();
        let views = [
            f.view("a", 1),
            f.view("b", 2),
            f.view("c", 3),
            f.view("d", 4),
        ];
        for v in &views {
            f.push(v);
        }

        assert!(f.stack.remove(&as_ref(&views[1])));
        assert_eq!(*f.log.borrow(), vec!["d", "c", "b"]);
        assert_eq!(f.elements(), vec![ElementId(10)]);
        assert_eq!(views[0].closes.get(), 0);
    }

    #[test]
    fn remove_bottom_drains_top_first() {
        let f = fixture();
        let views = [f.view("a", 1), f.view("b", 2), f.view("c", 3)];
        for v in &views {
            f.push(v);
        }
        assert!(f.stack.remove(&as_ref(&views[0])));
        assert_eq!(*f.log.borrow(), vec!["c", "b", "a"]);
        assert!(f.stack.is_empty());
        assert_eq!(f.top_level_escapes.get(), 0);
    }

    #[test]
    fn remove_absent_view_is_a_no_op() {
        let f = fixture();
        let (a, stranger) = (f.view("a", 1), f.view("x", 5));
        f.push(&a);
        assert!(!f.stack.remove(&as_ref(&stranger)));
        assert!(f.log.borrow().is_empty());
        assert_eq!(f.stack.len(), 1);
    }

    #[test]
    fn remove_returns_focus_for_the_removed_view_only() {
        let f = fixture();
        let a = Rc::new(TestView {
            return_focus: Some(ElementId(7)),
            ..f.make("a", 1)
        });
        let b = Rc::new(TestView {
            return_focus: Some(ElementId(8)),
            ..f.make("b", 2)
        });
        f.push(&a);
        f.push(&b);

        f.stack.remove(&as_ref(&a));
        assert_eq!(*f.focus.0.borrow(), vec![ElementId(7)]);
    }

    #[test]
    fn hit_test_keeps_the_hit_view_and_below() {
        let f = fixture();
        let views = [f.view("a", 1), f.view("b", 2), f.view("c", 3)];
        for v in &views {
            f.push(v);
        }
        // Child of b's element.
        assert_eq!(f.stack.run_hit_test(ElementId(21)), 1);
        assert_eq!(*f.log.borrow(), vec!["c"]);
        assert_eq!(f.elements(), vec![ElementId(10), ElementId(20)]);
    }

    #[test]
    fn hit_on_top_view_closes_nothing() {
        let f = fixture();
        let (a, b) = (f.view("a", 1), f.view("b", 2));
        f.push(&a);
        f.push(&b);
        assert_eq!(f.stack.run_hit_test(ElementId(20)), 0);
        assert_eq!(f.stack.len(), 2);
    }

    #[test]
    fn miss_drains_the_stack_top_first() {
        let f = fixture();
        let views = [f.view("a", 1), f.view("b", 2), f.view("c", 3)];
        for v in &views {
            f.push(v);
        }
        assert_eq!(f.stack.run_hit_test(ElementId(1)), 3);
        assert_eq!(*f.log.borrow(), vec!["c", "b", "a"]);
        assert!(views.iter().all(|v| v.closes.get() == 1));
        assert!(f.stack.is_empty());
        // Outside-click dismissal is not an escape.
        assert_eq!(f.top_level_escapes.get(), 0);
    }

    #[test]
    fn custom_hit_test_overrides_ancestor_walk() {
        let f = fixture();
        let a = f.view("a", 1);
        let b = Rc::new(TestView {
            forced_hit: Some(false),
            ..f.make("b", 2)
        });
        f.push(&a);
        f.push(&b);

        // Inside b's element, but b refuses every hit; a owns 11.
        f.stack.run_hit_test(ElementId(11));
        assert_eq!(*f.log.borrow(), vec!["b"]);
        assert_eq!(f.elements(), vec![ElementId(10)]);
    }

    #[test]
    fn close_callback_removing_another_view_is_not_closed_twice() {
        let f = fixture();
        let views = [f.view("a", 1), f.view("b", 2), f.view("c", 3)];
        for v in &views {
            f.push(v);
        }
        let stack = Rc::downgrade(&f.stack);
        let b = as_ref(&views[1]);
        *views[2].on_close.borrow_mut() = Some(Box::new(move || {
            if let Some(stack) = stack.upgrade() {
                stack.remove(&b);
            }
        }));

        f.stack.run_hit_test(ElementId(1));
        assert_eq!(*f.log.borrow(), vec!["c", "b", "a"]);
        assert!(views.iter().all(|v| v.closes.get() == 1));
        assert!(f.stack.is_empty());
    }

    #[test]
    fn remove_from_close_callback_leaves_views_below_target() {
        let f = fixture();
        let (x, a, b, c) = (f.view("x", 1), f.view("a", 2), f.view("b", 3), f.view("c", 4));
        for v in [&x, &a, &b, &c] {
            f.push(v);
        }
        let stack = Rc::downgrade(&f.stack);
        let target = as_ref(&a);
        *c.on_close.borrow_mut() = Some(Box::new(move || {
            if let Some(stack) = stack.upgrade() {
                stack.remove(&target);
            }
        }));

        assert!(f.stack.remove(&as_ref(&a)));
        assert_eq!(*f.log.borrow(), vec!["c", "b", "a"]);
        assert_eq!(f.elements(), vec![ElementId(10)]);
        assert_eq!(x.closes.get(), 0);
        assert_eq!(f.top_level_escapes.get(), 0);
    }

    #[test]
    fn pop_from_close_callback_during_remove_ends_the_walk() {
        let f = fixture();
        let x = f.view("x", 1);
        let a = Rc::new(TestView {
            return_focus: Some(ElementId(7)),
            ..f.make("a", 2)
        });
        let b = f.view("b", 3);
        for v in [&x, &a, &b] {
            f.push(v);
        }
        let stack = Rc::downgrade(&f.stack);
        *b.on_close.borrow_mut() = Some(Box::new(move || {
            if let Some(stack) = stack.upgrade() {
                stack.pop();
            }
        }));

        assert!(f.stack.remove(&as_ref(&a)));
        assert_eq!(*f.log.borrow(), vec!["b", "a"]);
        assert_eq!(a.closes.get(), 1);
        assert_eq!(x.closes.get(), 0);
        assert_eq!(f.elements(), vec![ElementId(10)]);
        // Focus came back once, from the pop that removed `a`.
        assert_eq!(*f.focus.0.borrow(), vec![ElementId(7)]);
        assert_eq!(f.top_level_escapes.get(), 0);
    }

    #[test]
    fn duplicate_push_needs_one_pop_per_entry() {
        let f = fixture();
        let a = f.view("a", 1);
        f.push(&a);
        f.push(&a);
        assert_eq!(f.stack.len(), 2);

        assert!(f.stack.remove(&as_ref(&a)));
        assert_eq!(f.stack.len(), 1);
        assert!(f.stack.contains(&as_ref(&a)));

        f.stack.pop();
        assert!(f.stack.is_empty());
        assert_eq!(a.closes.get(), 2);
    }

    #[test]
    fn clear_closes_all_without_signal_or_focus() {
        let f = fixture();
        let a = Rc::new(TestView {
            return_focus: Some(ElementId(7)),
            ..f.make("a", 1)
        });
        let b = f.view("b", 2);
        f.push(&a);
        f.push(&b);

        f.stack.clear();
        assert!(f.stack.is_empty());
        assert_eq!(*f.log.borrow(), vec!["a", "b"]);
        assert_eq!(f.focus.last(), None);
        assert_eq!(f.top_level_escapes.get(), 0);

        // Popping after a clear reaches the application.
        f.stack.pop();
        assert_eq!(f.top_level_escapes.get(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_the_stack() {
        let f = fixture();
        let a = f.view("a", 1);
        f.push(&a);
        let snap = f.stack.snapshot();
        f.stack.clear();
        assert_eq!(snap.len(), 1);
        assert!(f.stack.snapshot().is_empty());
    }

    #[test]
    fn bus_escape_pops_and_pointer_down_hit_tests() {
        use kurbo::Point;
        use mosaic_dom::event::{EventType, PointerEvent};

        let f = fixture();
        let (a, b) = (f.view("a", 1), f.view("b", 2));
        f.push(&a);
        f.push(&b);

        let down = DomEvent::pointer(
            EventType::MouseDown,
            PointerEvent::new(ElementId(11), Point::ZERO),
        );
        f.bus.dispatch(topics::ON_POINTER_DOWN, Some(&down));
        assert_eq!(*f.log.borrow(), vec!["b"]);

        f.bus.dispatch(topics::ON_ESCAPE, None);
        f.bus.dispatch(topics::ON_ESCAPE, None);
        assert_eq!(*f.log.borrow(), vec!["b", "a"]);
        assert_eq!(f.top_level_escapes.get(), 1);
    }

    #[test]
    fn dropping_the_stack_unsubscribes() {
        let f = fixture();
        assert_eq!(f.bus.listener_count(topics::ON_ESCAPE), 1);
        assert_eq!(f.bus.listener_count(topics::ON_POINTER_DOWN), 1);
        let Fixture { bus, stack, .. } = f;
        drop(stack);
        assert_eq!(bus.listener_count(topics::ON_ESCAPE), 0);
        assert_eq!(bus.listener_count(topics::ON_POINTER_DOWN), 0);
    }
}
