//=========================================================================
// Touch Data Model
//=========================================================================
//
// Normalized touch events, the queue that buffers them between drains,
// and the JSON codec that carries drained batches to consumers.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod codec;
pub mod event;
pub mod queue;

//=== Public API ==========================================================

pub use codec::{decode_batch, encode_batch, BridgeError, EMPTY_BATCH};
pub use event::{BoundingRect, Contact, RawTouch, TouchEvent, TouchPhase};
pub use queue::TouchQueue;
