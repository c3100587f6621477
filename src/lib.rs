//=========================================================================
// Aetheric Touch Bridge — Library Root
//
// Bridges touch input from a host UI surface into a polling queue for
// runtimes that cannot subscribe to native UI events themselves.
//
// Responsibilities:
// - Bind touch listeners to named surfaces (`InputBridge::bind`)
// - Normalize and buffer touches until drained (`InputBridge::drain`)
// - Provide host backends: headless document and winit windows
// - Offer a ready-made windowed runtime (`HostBuilder`)
//
// Typical usage:
// ```no_run
// use aetheric_touch_bridge::HostBuilder;
//
// fn main() {
//     HostBuilder::new().build().run(|batch| println!("{}", batch)).unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the host-neutral pieces: touch data model, surface
// traits, the headless host and the platform/consumer contract.
//
// `bridge` is the Binder/Drainer itself.
//
pub mod bridge;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` wraps winit and is only reachable through the re-exports
// below. `host` wires platform and consumer threads together.
//
mod host;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use bridge::{InputBridge, InputBridgeBuilder};
pub use host::{Host, HostBuilder};
pub use platform::{WindowSurface, WinitDocument};
