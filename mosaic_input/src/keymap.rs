// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard chords that translate into bus topics.
//!
//! A [`Chord`] matches a key press when the key is the same (characters
//! compare ASCII case-insensitively) and every modifier the chord requires is
//! held. Extra held modifiers do not prevent a match, so `Ctrl+Shift+S` still
//! saves.
//!
//! ```
//! use mosaic_bus::topics;
//! use mosaic_dom::event::{Key, KeyboardEvent, Modifiers};
//! use mosaic_input::keymap::KeyMap;
//!
//! let map = KeyMap::default();
//! let ctrl_s = KeyboardEvent::with_modifiers(Key::Character('s'), Modifiers::CTRL);
//! let hits: Vec<_> = map.matching(&ctrl_s).map(|b| b.topic).collect();
//! assert_eq!(hits, [topics::ON_SAVE_CHANGES]);
//!
//! let plain_s = KeyboardEvent::new(Key::Character('s'));
//! assert_eq!(map.matching(&plain_s).count(), 0);
//! ```

use alloc::vec::Vec;

use mosaic_bus::{Topic, topics};
use mosaic_dom::event::{Key, KeyboardEvent, Modifiers};

/// A key plus the modifiers that must be held.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Chord {
    /// The key.
    pub key: Key,
    /// Required modifiers.
    pub modifiers: Modifiers,
}

impl Chord {
    /// A chord requiring `modifiers` with `key`.
    #[must_use]
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// `key` with no modifier requirement.
    #[must_use]
    pub fn bare(key: Key) -> Self {
        Self::new(key, Modifiers::empty())
    }

    /// `Ctrl` + a character.
    #[must_use]
    pub fn ctrl(c: char) -> Self {
        Self::new(Key::Character(c), Modifiers::CTRL)
    }

    /// Returns `true` if `event` triggers this chord.
    #[must_use]
    pub fn matches(&self, event: &KeyboardEvent) -> bool {
        self.key.matches(&event.key) && event.modifiers.contains(self.modifiers)
    }
}

/// One chord → topic mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBinding {
    /// Triggering chord.
    pub chord: Chord,
    /// Topic published when the chord matches.
    pub topic: Topic,
}

/// Ordered chord bindings.
///
/// Every binding that matches a key press publishes, in map order, and the
/// browser default for that key press is suppressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    bindings: Vec<KeyBinding>,
}

impl Default for KeyMap {
    /// `Ctrl+S` saves, `Ctrl+P` publishes, `Escape` escapes.
    fn default() -> Self {
        Self::empty()
            .with(Chord::ctrl('s'), topics::ON_SAVE_CHANGES)
            .with(Chord::ctrl('p'), topics::ON_PUBLISH)
            .with(Chord::bare(Key::Escape), topics::ON_ESCAPE)
    }
}

impl KeyMap {
    /// A map with no bindings; every key passes through.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Append a binding.
    pub fn bind(&mut self, chord: Chord, topic: Topic) {
        self.bindings.push(KeyBinding { chord, topic });
    }

    /// Builder form of [`KeyMap::bind`].
    #[must_use]
    pub fn with(mut self, chord: Chord, topic: Topic) -> Self {
        self.bind(chord, topic);
        self
    }

    /// Drop every binding that publishes `topic`. Returns how many were removed.
    pub fn unbind_topic(&mut self, topic: Topic) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.topic != topic);
        before - self.bindings.len()
    }

    /// All bindings in order.
    #[must_use]
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Bindings triggered by `event`, in map order.
    pub fn matching<'a>(
        &'a self,
        event: &'a KeyboardEvent,
    ) -> impl Iterator<Item = &'a KeyBinding> + 'a {
        self.bindings.iter().filter(|b| b.chord.matches(event))
    }
}
