//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between a platform event loop and the consumer that polls
// the input bridge.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `frame_poller`: Consumer-side frame pacing and draining
//
//=========================================================================

//=== Module Declarations =================================================

pub mod frame_poller;
pub mod interface;

//=== Public API ==========================================================

pub use frame_poller::{FramePoller, TickControl};
pub use interface::{PlatformError, PlatformEvent};
