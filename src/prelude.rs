//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_touch_bridge::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Bridge
pub use crate::bridge::{BridgeConfig, InputBridge, InputBridgeBuilder, RebindPolicy};

// Hosts
pub use crate::core::surface::{Document, HeadlessDocument, HeadlessElement, Surface};
pub use crate::host::{Host, HostBuilder};
pub use crate::platform::WinitDocument;

// Touch data
pub use crate::core::touch::{decode_batch, BridgeError, Contact, TouchEvent, TouchPhase};
