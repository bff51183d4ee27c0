// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event bus.
//!
//! Delivery rules:
//!
//! - Dispatch is synchronous; every listener has returned when
//!   [`EventBus::dispatch`] returns.
//! - Listeners on a topic run in registration order.
//! - The listener list is snapshotted before delivery. Listeners added during
//!   a dispatch see the next dispatch; listeners removed during a dispatch
//!   still see the current one.
//! - Listeners may dispatch re-entrantly.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::topic::Topic;

/// A bus listener. Removal matches on pointer identity.
pub type Listener<P> = Rc<dyn Fn(Option<&P>)>;

/// Wrap a closure as a [`Listener`].
pub fn listener<P, F>(f: F) -> Listener<P>
where
    F: Fn(Option<&P>) + 'static,
{
    Rc::new(f)
}

fn same<P>(a: &Listener<P>, b: &Listener<P>) -> bool {
    core::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

type Listeners<P> = SmallVec<[Listener<P>; 4]>;

/// Named-topic publish/subscribe with payloads of type `P`.
pub struct EventBus<P> {
    topics: RefCell<HashMap<Topic, Listeners<P>>>,
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self {
            topics: RefCell::new(HashMap::new()),
        }
    }
}

impl<P> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let topics = self.topics.borrow();
        f.debug_map()
            .entries(topics.iter().map(|(t, l)| (t.name(), l.len())))
            .finish()
    }
}

impl<P> EventBus<P> {
    /// An empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `listener` to `topic`.
    ///
    /// The same listener may be added more than once; it then runs once per registration.
    pub fn add_listener(&self, topic: Topic, listener: Listener<P>) {
        self.topics
            .borrow_mut()
            .entry(topic)
            .or_default()
            .push(listener);
    }

    /// Unsubscribe the first registration of `listener` on `topic`.
    ///
    /// Returns `false` if it was not subscribed.
    pub fn remove_listener(&self, topic: Topic, listener: &Listener<P>) -> bool {
        let mut topics = self.topics.borrow_mut();
        let Some(listeners) = topics.get_mut(&topic) else {
            return false;
        };
        let Some(index) = listeners.iter().position(|l| same(l, listener)) else {
            return false;
        };
        listeners.remove(index);
        if listeners.is_empty() {
            topics.remove(&topic);
        }
        true
    }

    /// Publish `payload` on `topic`.
    pub fn dispatch(&self, topic: Topic, payload: Option<&P>) {
        let snapshot: Listeners<P> = match self.topics.borrow().get(&topic) {
            Some(listeners) => listeners.clone(),
            None => SmallVec::new(),
        };
        crate::trace!(
            topic = topic.name(),
            listeners = snapshot.len(),
            "bus dispatch"
        );
        for listener in &snapshot {
            listener(payload);
        }
    }

    /// Number of registrations on `topic`.
    #[must_use]
    pub fn listener_count(&self, topic: Topic) -> usize {
        self.topics.borrow().get(&topic).map_or(0, SmallVec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::topics;
    use alloc::vec;
    use alloc::vec::Vec;

    type Log = Rc<RefCell<Vec<(&'static str, Option<u32>)>>>;

    fn recorder(log: &Log, name: &'static str) -> Listener<u32> {
        let log = log.clone();
        listener(move |p: Option<&u32>| log.borrow_mut().push((name, p.copied())))
    }

    #[test]
    fn delivers_in_registration_order() {
        let bus = EventBus::new();
        let log: Log = Rc::default();
        bus.add_listener(topics::ON_ESCAPE, recorder(&log, "a"));
        bus.add_listener(topics::ON_ESCAPE, recorder(&log, "b"));
        bus.add_listener(topics::ON_PUBLISH, recorder(&log, "other"));

        bus.dispatch(topics::ON_ESCAPE, Some(&7));
        assert_eq!(*log.borrow(), vec![("a", Some(7)), ("b", Some(7))]);
    }

    #[test]
    fn dispatch_without_listeners_is_silent() {
        let bus: EventBus<u32> = EventBus::new();
        bus.dispatch(topics::ON_SAVE_CHANGES, None);
        assert_eq!(bus.listener_count(topics::ON_SAVE_CHANGES), 0);
    }

    #[test]
    fn remove_matches_identity_and_first_registration() {
        let bus = EventBus::new();
        let log: Log = Rc::default();
        let a = recorder(&log, "a");
        let look_alike = recorder(&log, "a");
        bus.add_listener(topics::ON_ESCAPE, a.clone());
        bus.add_listener(topics::ON_ESCAPE, a.clone());

        assert!(!bus.remove_listener(topics::ON_ESCAPE, &look_alike));
        assert!(!bus.remove_listener(topics::ON_PUBLISH, &a));
        assert!(bus.remove_listener(topics::ON_ESCAPE, &a));
        assert_eq!(bus.listener_count(topics::ON_ESCAPE), 1);

        bus.dispatch(topics::ON_ESCAPE, None);
        assert_eq!(*log.borrow(), vec![("a", None)]);
    }

    #[test]
    fn removal_during_dispatch_takes_effect_next_time() {
        let bus: Rc<EventBus<u32>> = Rc::new(EventBus::new());
        let log: Log = Rc::default();
        let second = recorder(&log, "second");
        let first = {
            let bus = bus.clone();
            let second = second.clone();
            let log = log.clone();
            listener(move |_: Option<&u32>| {
                log.borrow_mut().push(("first", None));
                bus.remove_listener(topics::ON_ESCAPE, &second);
            })
        };
        bus.add_listener(topics::ON_ESCAPE, first);
        bus.add_listener(topics::ON_ESCAPE, second);

        bus.dispatch(topics::ON_ESCAPE, None);
        bus.dispatch(topics::ON_ESCAPE, None);
        assert_eq!(
            *log.borrow(),
            vec![("first", None), ("second", None), ("first", None)]
        );
    }

    #[test]
    fn reentrant_dispatch_runs_inline() {
        let bus: Rc<EventBus<u32>> = Rc::new(EventBus::new());
        let log: Log = Rc::default();
        let forward = {
            let bus = bus.clone();
            let log = log.clone();
            listener(move |_: Option<&u32>| {
                log.borrow_mut().push(("escape", None));
                bus.dispatch(topics::ON_TOP_LEVEL_ESCAPE, None);
            })
        };
        bus.add_listener(topics::ON_ESCAPE, forward);
        bus.add_listener(topics::ON_TOP_LEVEL_ESCAPE, recorder(&log, "top"));
        bus.add_listener(topics::ON_ESCAPE, recorder(&log, "after"));

        bus.dispatch(topics::ON_ESCAPE, None);
        assert_eq!(
            *log.borrow(),
            vec![("escape", None), ("top", None), ("after", None)]
        );
    }
}
