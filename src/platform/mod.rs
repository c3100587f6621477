//=========================================================================
// Platform Subsystem
//
// Hosts the touch bridge on a native window via Winit.
//
// Architecture:
// ```text
//  Main Thread:                     Consumer Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop        │    │  FramePoller         │
//  │   ↓                      │    │   ↓                  │
//  │  WinitDocument           │    │  bridge.drain()      │
//  │   ├─ Resized → root box  │    │   ↓                  │
//  │   └─ Touch → listeners ──┼──► │  consumer(batch)     │
//  │       (InputBridge queue)│    │                      │
//  │   ↓                      │    └──────────────────────┘
//  │  RedrawRequested         │               ↑
//  │   ↓                      │               │
//  │  Channel ────────────────┼───────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: one `FrameReady` per frame;
//   the consumer drains whatever touches arrived since the last one
// - **Non-blocking signal**: a full channel means a frame signal is
//   already pending, so the new one is dropped rather than stalling
//   the UI thread
// - **Bind after window creation**: selectors only resolve once their
//   window exists, so binding happens in `resumed()`
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS
//
//=========================================================================

//=== Submodules ==========================================================

mod document;
mod event_mapper;

pub use document::{WindowSurface, WinitDocument};

//=== External Crates =====================================================

use std::sync::Arc;

use crossbeam_channel::{Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::bridge::InputBridge;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};

//=== WindowSettings ======================================================

/// Window parameters used when the window is created.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub surfaces: Vec<String>,
}

//=== Platform ============================================================

/// Window owner and touch router.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(...)`
/// 2. **Execution**: `platform.run()` starts the event loop
/// 3. **Resume**: window created, registered, surfaces bound
/// 4. **Shutdown**: close requested → `WindowClosed` sent → loop exits
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    settings: WindowSettings,
    document: Arc<WinitDocument>,
    bridge: Arc<InputBridge>,

    /// Frame pacing channel to the consumer thread.
    event_sender: Sender<PlatformEvent>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(
        settings: WindowSettings,
        bridge: Arc<InputBridge>,
        event_sender: Sender<PlatformEvent>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            settings,
            document: Arc::new(WinitDocument::new()),
            bridge,
            event_sender,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop on the calling thread until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// terminates abnormally.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Registers the window under every configured selector, then binds
    /// the bridge to each of them.
    fn attach_surfaces(&self, window_id: WindowId, window: &Window) {
        for selector in &self.settings.surfaces {
            self.document.register_window(selector, window_id, window.inner_size());
            if !self.bridge.bind(self.document.as_ref(), selector) {
                warn!(target: "platform", "Surface {:?} could not be bound", selector);
            }
        }
    }

    /// Signals a frame boundary to the consumer thread.
    fn signal_frame(&self) {
        match self.event_sender.try_send(PlatformEvent::FrameReady) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                trace!(target: "platform", "Consumer behind, frame signal coalesced");
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(
                    target: "platform",
                    "Channel disconnected, {} touches left undrained",
                    self.bridge.pending()
                );
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first resume and binds the touch surfaces.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.attach_surfaces(window.id(), &window);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                self.signal_frame();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                let ran = self.document.handle_window_event(window_id, &event);
                if ran > 0 {
                    trace!(target: "platform::touch", "{} listeners ran", ran);
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{bounded, unbounded};

    fn settings() -> WindowSettings {
        WindowSettings {
            title: "test".into(),
            width: 320,
            height: 240,
            surfaces: vec!["#canvas".into()],
        }
    }

    #[test]
    fn platform_creation() {
        let (tx, _rx) = unbounded();
        let platform = Platform::new(settings(), Arc::new(InputBridge::new()), tx);
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn signal_frame_sends_frame_ready() {
        let (tx, rx) = unbounded();
        let platform = Platform::new(settings(), Arc::new(InputBridge::new()), tx);

        platform.signal_frame();

        assert_eq!(rx.try_recv(), Ok(PlatformEvent::FrameReady));
    }

    #[test]
    fn full_channel_coalesces_frames() {
        let (tx, rx) = bounded(1);
        let platform = Platform::new(settings(), Arc::new(InputBridge::new()), tx);

        platform.signal_frame();
        platform.signal_frame();

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err(), "Second signal should be dropped");
    }

    #[test]
    fn signal_frame_handles_disconnected_channel() {
        let (tx, rx) = unbounded();
        let platform = Platform::new(settings(), Arc::new(InputBridge::new()), tx);
        drop(rx);

        // Should not panic, just log warning
        platform.signal_frame();
    }
}
