//=========================================================================
// Touch Queue
//
// Append-only store of normalized touch events, emptied by swap on drain.
//
// Lifecycle:
// ```text
//   Absent ──ensure()──► Empty ◄──take()── NonEmpty
//                          │                  ▲
//                          └──push()──────────┘
// ```
//
// Notes:
// The queue starts *absent* rather than empty so callers can tell a
// bridge that never bound a surface apart from one that simply has
// nothing buffered. `ensure()` never resets existing contents.
//=========================================================================

//=== Internal Modules ====================================================
use super::event::TouchEvent;

//=== TouchQueue ==========================================================

/// FIFO buffer of touch events between two drains.
#[derive(Debug)]
pub struct TouchQueue {
    events: Option<Vec<TouchEvent>>,
    capacity: usize,
}

impl TouchQueue {
    //--- Construction -----------------------------------------------------
    //
    // Creates an absent queue. `capacity` is the preallocation used each
    // time the backing storage is (re)created.
    //
    pub fn new(capacity: usize) -> Self {
        Self { events: None, capacity }
    }

    //--- Initialization ---------------------------------------------------
    //
    // Creates empty storage if absent. Idempotent.
    //
    pub fn ensure(&mut self) {
        if self.events.is_none() {
            self.events = Some(Vec::with_capacity(self.capacity));
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.events.is_some()
    }

    //--- Append -----------------------------------------------------------
    //
    // Appends in arrival order. Creates storage on demand so a listener
    // never loses an event, even if it outlives an explicit reset.
    //
    pub fn push(&mut self, event: TouchEvent) {
        self.events
            .get_or_insert_with(|| Vec::with_capacity(self.capacity))
            .push(event);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Swaps the contents for fresh storage and returns what was there.
    // Returns `None` while the queue is absent; an absent queue stays
    // absent.
    //
    pub fn take(&mut self) -> Option<Vec<TouchEvent>> {
        let capacity = self.capacity;
        self.events
            .as_mut()
            .map(|events| std::mem::replace(events, Vec::with_capacity(capacity)))
    }

    //--- Utilities --------------------------------------------------------
    pub fn len(&self) -> usize {
        self.events.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::touch::event::{BoundingRect, Contact, TouchPhase};

    fn event(id: u64) -> TouchEvent {
        TouchEvent::from_contact(
            TouchPhase::Start,
            &Contact::new(id, 0.0, 0.0),
            &BoundingRect::from_size(100.0, 100.0),
        )
    }

    #[test]
    fn new_queue_is_absent() {
        let mut queue = TouchQueue::new(8);
        assert!(!queue.is_initialized());
        assert!(queue.is_empty());
        assert!(queue.take().is_none());
        assert!(!queue.is_initialized(), "take() must not create storage");
    }

    #[test]
    fn ensure_does_not_reset_contents() {
        let mut queue = TouchQueue::new(8);
        queue.ensure();
        queue.push(event(1));
        queue.ensure();
        queue.ensure();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn take_preserves_insertion_order() {
        let mut queue = TouchQueue::new(8);
        queue.ensure();
        for id in 0..5 {
            queue.push(event(id));
        }

        let drained = queue.take().unwrap();
        let ids: Vec<u64> = drained.iter().map(|e| e.id).collect();
        assert_eq!(ids, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn take_leaves_empty_initialized_queue() {
        let mut queue = TouchQueue::new(8);
        queue.ensure();
        queue.push(event(1));

        queue.take();

        assert!(queue.is_initialized());
        assert!(queue.is_empty());
        assert_eq!(queue.take(), Some(Vec::new()));
    }

    #[test]
    fn push_creates_storage_when_absent() {
        let mut queue = TouchQueue::new(0);
        queue.push(event(9));
        assert!(queue.is_initialized());
        assert_eq!(queue.len(), 1);
    }

    //--- Memory Retention -------------------------------------------------
    //
    // Replacement storage is preallocated to the configured capacity.
    //
    #[test]
    fn take_reallocates_configured_capacity() {
        let mut queue = TouchQueue::new(32);
        queue.ensure();
        for id in 0..100 {
            queue.push(event(id));
        }

        queue.take();

        let capacity = queue.events.as_ref().map(Vec::capacity).unwrap();
        assert!(capacity >= 32);
    }
}
