//=========================================================================
// Core
//
// Host-neutral building blocks of the touch bridge.
//
// Responsibilities:
// - `touch`: normalized events, the drain queue, the wire codec
// - `surface`: traits hosts implement, plus the headless host
// - `platform_bridge`: frame pacing contract between a platform event
//   loop and the thread that drains the bridge
//
// Nothing here depends on a window system except the error type of
// `platform_bridge`, which wraps winit's event loop errors.
//
//=========================================================================

pub mod platform_bridge;
pub mod surface;
pub mod touch;
