//! One-shot persistence.
//!
//! A [`ShotStore`] is the external key-value capability ("has shot `id` been
//! shown?"). [`ShotStateStore`] binds one overlay to an optional shot id: it
//! reads the flag once when the id is configured and writes it at most once.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Read/write contract for persisted one-shot flags.
///
/// Implementations own their own storage; the overlay never caches beyond
/// a single instance.
pub trait ShotStore {
    /// Whether `id` has been recorded as shown.
    fn has_shot(&self, id: i64) -> bool;
    /// Record `id` as shown.
    fn store_shot(&self, id: i64);
}

impl<T: ShotStore + ?Sized> ShotStore for Rc<T> {
    fn has_shot(&self, id: i64) -> bool {
        (**self).has_shot(id)
    }

    fn store_shot(&self, id: i64) {
        (**self).store_shot(id);
    }
}

/// In-memory store, shareable between overlays through `Rc`.
#[derive(Debug, Default)]
pub struct MemoryShotStore {
    shots: RefCell<HashSet<i64>>,
}

impl MemoryShotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shots.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shots.borrow().is_empty()
    }
}

impl ShotStore for MemoryShotStore {
    fn has_shot(&self, id: i64) -> bool {
        self.shots.borrow().contains(&id)
    }

    fn store_shot(&self, id: i64) {
        self.shots.borrow_mut().insert(id);
    }
}

/// Per-overlay view of the one-shot flag.
pub struct ShotStateStore {
    store: Box<dyn ShotStore>,
    shot_id: Option<i64>,
    shown: bool,
}

impl ShotStateStore {
    #[must_use]
    pub fn new(store: Box<dyn ShotStore>) -> Self {
        Self {
            store,
            shot_id: None,
            shown: false,
        }
    }

    /// Make this overlay single-shot under `id` and read its persisted flag.
    pub fn set_single_shot(&mut self, id: i64) {
        self.shot_id = Some(id);
        self.shown = self.store.has_shot(id);
    }

    #[must_use]
    pub fn is_single_shot(&self) -> bool {
        self.shot_id.is_some()
    }

    #[must_use]
    pub fn shot_id(&self) -> Option<i64> {
        self.shot_id
    }

    /// True once the configured id has been shown, here or in an earlier instance.
    #[must_use]
    pub fn has_shot(&self) -> bool {
        self.shot_id.is_some() && self.shown
    }

    /// Persist the flag. Returns `true` only on the write that actually happened.
    pub fn store_shot(&mut self) -> bool {
        match self.shot_id {
            Some(id) if !self.shown => {
                self.store.store_shot(id);
                self.shown = true;
                true
            }
            _ => false,
        }
    }
}

impl fmt::Debug for ShotStateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShotStateStore")
            .field("shot_id", &self.shot_id)
            .field("shown", &self.shown)
            .finish_non_exhaustive()
    }
}
