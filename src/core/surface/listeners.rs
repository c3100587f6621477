//=========================================================================
// Listener Table
//=========================================================================
//
// Per-surface listener storage shared by every host backend.
//
// Dispatch snapshots the matching listeners and releases the lock
// before calling them, so a listener may attach or detach listeners on
// the same surface without deadlocking.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

//=== Internal Dependencies ===============================================

use super::interface::{Listener, ListenerId};
use crate::core::touch::{RawTouch, TouchPhase};

//=== ListenerTable =======================================================

struct Entry {
    id: ListenerId,
    phase: TouchPhase,
    listener: Listener,
}

/// Ordered listener list keyed by lifecycle signal.
pub struct ListenerTable {
    next_id: AtomicU64,
    entries: Mutex<Vec<Entry>>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Appends a listener; listeners run in attachment order.
    pub fn add(&self, phase: TouchPhase, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push(Entry { id, phase, listener });
        id
    }

    pub fn remove(&self, phase: TouchPhase, id: ListenerId) -> bool {
        let mut entries = self.lock();
        match entries.iter().position(|e| e.id == id && e.phase == phase) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invokes every listener attached to `raw.phase`. Returns how many ran.
    pub fn dispatch(&self, raw: &RawTouch) -> usize {
        let matching: Vec<Listener> = self
            .lock()
            .iter()
            .filter(|e| e.phase == raw.phase)
            .map(|e| e.listener.clone())
            .collect();

        for listener in &matching {
            listener(raw);
        }
        matching.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ListenerTable {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
