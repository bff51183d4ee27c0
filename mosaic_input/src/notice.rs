// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turns forwarded `onError` events into a generic user-facing notice.
//!
//! The error's content is never inspected; every uncaught error produces the
//! same notice.

use alloc::rc::Rc;
use core::fmt;

use mosaic_bus::{Listener, listener, topics};
use mosaic_dom::event::DomEvent;

use crate::router::EditorBus;

/// Title of the generic failure notice.
pub const ERROR_TITLE: &str = "Oops, something went wrong.";

/// Body of the generic failure notice.
pub const ERROR_DETAILS: &str =
    "We are unable to complete your operation this time. Please try again later.";

/// Shows notices to the user.
pub trait Notifier {
    /// Show an error notice.
    fn notify_error(&self, title: &str, details: &str);
}

/// Subscribes to `onError` for as long as it lives.
pub struct UnhandledErrorReporter {
    bus: Rc<EditorBus>,
    listener: Listener<DomEvent>,
}

impl fmt::Debug for UnhandledErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnhandledErrorReporter")
            .finish_non_exhaustive()
    }
}

impl UnhandledErrorReporter {
    /// Start reporting uncaught errors published on `bus` to `notifier`.
    #[must_use]
    pub fn new(bus: Rc<EditorBus>, notifier: Rc<dyn Notifier>) -> Self {
        let listener = listener(move |_event: Option<&DomEvent>| {
            mosaic_bus::trace!(
                message = _event.and_then(DomEvent::as_error).map(|e| e.message.as_str()),
                "unhandled error"
            );
            notifier.notify_error(ERROR_TITLE, ERROR_DETAILS);
        });
        bus.add_listener(topics::ON_ERROR, listener.clone());
        Self { bus, listener }
    }
}

impl Drop for UnhandledErrorReporter {
    fn drop(&mut self) {
        self.bus.remove_listener(topics::ON_ERROR, &self.listener);
    }
}
