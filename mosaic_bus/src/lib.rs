// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mosaic Bus: synchronous, single-threaded, named-topic publish/subscribe.
//!
//! Editor features talk to each other through named topics rather than
//! direct references. The bus is deliberately plain: no queueing, no
//! priorities, no async. Listeners run in registration order on the caller's
//! stack.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use mosaic_bus::{EventBus, listener, topics};
//!
//! let bus: EventBus<()> = EventBus::new();
//! let saves = Rc::new(Cell::new(0));
//!
//! let on_save = {
//!     let saves = saves.clone();
//!     listener(move |_: Option<&()>| saves.set(saves.get() + 1))
//! };
//! bus.add_listener(topics::ON_SAVE_CHANGES, on_save.clone());
//! bus.dispatch(topics::ON_SAVE_CHANGES, None);
//! assert_eq!(saves.get(), 1);
//!
//! assert!(bus.remove_listener(topics::ON_SAVE_CHANGES, &on_save));
//! bus.dispatch(topics::ON_SAVE_CHANGES, None);
//! assert_eq!(saves.get(), 1);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` debug events for dispatches. Crates built on the
//!   bus forward this feature and log through [`trace!`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod bus;
pub mod topic;

pub use bus::{EventBus, Listener, listener};
pub use topic::{Topic, topics};

#[cfg(feature = "tracing")]
#[doc(hidden)]
pub use tracing as __tracing;

/// Emit a `tracing` debug event when the `tracing` feature is enabled.
///
/// Accepts the same arguments as `tracing::debug!`. Expands to nothing
/// otherwise.
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::__tracing::debug!($($arg)*)
    };
}

/// Emit a `tracing` debug event when the `tracing` feature is enabled.
///
/// Accepts the same arguments as `tracing::debug!`. Expands to nothing
/// otherwise.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}
