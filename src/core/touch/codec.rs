//=========================================================================
// Touch Wire Codec
//=========================================================================
//
// JSON transport form of drained batches.
//
// Shape:
//   [{"id": <int>, "phase": "touchstart"|..., "position": [x, y]}, ...]
//
// The encoder runs on the drain side; the decoder is for consumers that
// receive the string on the far side of a language or thread boundary.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::TouchEvent;

//=== Constants ===========================================================

/// Serialized form of an empty batch.
pub const EMPTY_BATCH: &str = "[]";

//=== BridgeError =========================================================

/// Wire encoding and decoding errors.
#[derive(Debug)]
pub enum BridgeError {
    /// A drained batch could not be serialized.
    Encode(serde_json::Error),

    /// A payload did not match the batch shape.
    Decode(serde_json::Error),
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "Touch batch encoding failed: {}", e),
            Self::Decode(e) => write!(f, "Touch batch decoding failed: {}", e),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(e) | Self::Decode(e) => Some(e),
        }
    }
}

//=== Encode / Decode =====================================================

/// Serializes a batch, preserving element order.
pub fn encode_batch(events: &[TouchEvent]) -> Result<String, BridgeError> {
    if events.is_empty() {
        return Ok(EMPTY_BATCH.to_owned());
    }
    serde_json::to_string(events).map_err(BridgeError::Encode)
}

/// Parses a batch produced by [`encode_batch`].
pub fn decode_batch(payload: &str) -> Result<Vec<TouchEvent>, BridgeError> {
    serde_json::from_str(payload).map_err(BridgeError::Decode)
}

//=========================================================================
// Tests
//=========================================================================
