//=========================================================================
// Surface Layer
//=========================================================================
//
// Host-side abstraction the bridge binds against.
//
// Components:
// - `interface`: `Document` / `Surface` traits and the `Listener` type
// - `listeners`: listener storage shared by host backends
// - `headless`: in-memory document for tests and windowless hosts
//
//=========================================================================

//=== Module Declarations =================================================

pub mod headless;
pub mod interface;
pub mod listeners;

//=== Public API ==========================================================

pub use headless::{HeadlessDocument, HeadlessElement};
pub use interface::{Document, Listener, ListenerId, Surface};
pub use listeners::ListenerTable;
