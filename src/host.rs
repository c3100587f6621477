//=========================================================================
// Touch Host
//
// Ready-made runtime that owns a window, binds the bridge to it and
// hands one drained batch per frame to a consumer callback.
//
// Architecture:
// ```text
//     HostBuilder  ──build()──>  Host  ──run(consumer)──>  [Runtime]
//         │                       │
//         ├─ with_title()         ├─ spawns consumer thread (FramePoller)
//         ├─ with_inner_size()    └─ runs platform on calling thread
//         ├─ with_surface()          blocks until window closes
//         └─ with_channel_capacity()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::bridge::InputBridge;
use crate::core::platform_bridge::{FramePoller, PlatformError, TickControl};
use crate::platform::{Platform, WindowSettings};

//=== HostBuilder =========================================================

/// Builder for configuring and constructing a [`Host`].
///
/// # Default Values
///
/// - **Title**: "Aetheric Touch"
/// - **Inner size**: 800×600 logical pixels
/// - **Surfaces**: `"#canvas"` (used when none is added)
/// - **Channel capacity**: 128 frame signals
///
/// # Examples
///
/// ```no_run
/// use aetheric_touch_bridge::HostBuilder;
///
/// HostBuilder::new()
///     .with_title("Sandbox")
///     .with_surface("#canvas")
///     .build()
///     .run(|batch| println!("{}", batch))
///     .unwrap();
/// ```
pub struct HostBuilder {
    title: String,
    width: u32,
    height: u32,
    surfaces: Vec<String>,
    channel_capacity: usize,
    bridge: Option<Arc<InputBridge>>,
}

impl HostBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Aetheric Touch".to_owned(),
            width: 800,
            height: 600,
            surfaces: Vec::new(),
            channel_capacity: 128,
            bridge: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the window's inner size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_inner_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.width = width;
        self.height = height;
        self
    }

    /// Adds a selector the window is registered and bound under.
    pub fn with_surface(mut self, selector: impl Into<String>) -> Self {
        self.surfaces.push(selector.into());
        self
    }

    /// Sets the channel capacity for platform → consumer frame signals.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Uses an existing bridge instead of a default one.
    pub fn with_bridge(mut self, bridge: Arc<InputBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    /// Builds the host.
    pub fn build(self) -> Host {
        let surfaces = if self.surfaces.is_empty() {
            vec!["#canvas".to_owned()]
        } else {
            self.surfaces
        };

        info!(target: "host", "Building host (surfaces: {:?}, channel: {})", surfaces, self.channel_capacity);

        Host {
            settings: WindowSettings {
                title: self.title,
                width: self.width,
                height: self.height,
                surfaces,
            },
            channel_capacity: self.channel_capacity,
            bridge: self.bridge.unwrap_or_else(|| Arc::new(InputBridge::new())),
        }
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Host ================================================================

/// Window-backed touch runtime. Create via [`HostBuilder`].
pub struct Host {
    settings: WindowSettings,
    channel_capacity: usize,
    bridge: Arc<InputBridge>,
}

impl Host {
    /// The bridge the window is bound to.
    pub fn bridge(&self) -> &Arc<InputBridge> {
        &self.bridge
    }

    /// Selectors the window will be bound under.
    pub fn surfaces(&self) -> &[String] {
        &self.settings.surfaces
    }

    /// Runs the window on the calling thread and `consumer` on a worker
    /// thread, once per frame with the drained JSON batch (`"[]"` when
    /// no touch arrived). A last batch is delivered after the window
    /// closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop fails or the consumer
    /// panics.
    pub fn run<F>(self, mut consumer: F) -> Result<(), PlatformError>
    where
        F: FnMut(String) + Send + 'static,
    {
        let (sender, receiver) = bounded(self.channel_capacity);

        let bridge = Arc::clone(&self.bridge);
        let worker = thread::Builder::new()
            .name("touch-consumer".into())
            .spawn(move || {
                let mut poller = FramePoller::new(receiver);
                loop {
                    let control = poller.collect_frame(&bridge);
                    if let Some(batch) = poller.take_batch() {
                        consumer(batch);
                    }
                    if control == TickControl::Exit {
                        info!(target: "host", "Consumer stopped after {} frames", poller.frames());
                        break;
                    }
                }
            })
            .map_err(PlatformError::ConsumerSpawn)?;

        let platform_result = Platform::new(self.settings, self.bridge, sender).run();

        let worker_result = worker.join().map_err(|_| {
            error!(target: "host", "Consumer thread panicked");
            PlatformError::ConsumerPanicked
        });
        platform_result.and(worker_result)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_canvas() {
        let host = HostBuilder::new().build();
        assert_eq!(host.surfaces(), ["#canvas"]);
        assert_eq!(host.channel_capacity, 128);
        assert_eq!(host.settings.width, 800);
        assert_eq!(host.settings.height, 600);
    }

    #[test]
    fn explicit_surfaces_replace_default() {
        let host = HostBuilder::new().with_surface("#game").with_surface("#hud").build();
        assert_eq!(host.surfaces(), ["#game", "#hud"]);
    }

    #[test]
    fn shared_bridge_is_kept() {
        let bridge = Arc::new(InputBridge::new());
        let host = HostBuilder::new().with_bridge(bridge.clone()).build();
        assert!(Arc::ptr_eq(host.bridge(), &bridge));
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn zero_channel_capacity_panics() {
        let _ = HostBuilder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn zero_window_size_panics() {
        let _ = HostBuilder::new().with_inner_size(0, 600);
    }
}
