//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-consumer interface types (events and errors).
//
// Touch data itself never crosses the channel: it travels through the
// shared `InputBridge`. The channel only carries frame pacing and
// shutdown.
//
//=========================================================================

//=== PlatformEvent =======================================================

/// Events sent from the platform thread to the consumer thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// A frame was presented; the consumer should drain the bridge.
    FrameReady,

    /// Window close requested. No more frames will follow.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),

    /// The consumer thread could not be started.
    ConsumerSpawn(std::io::Error),

    /// The consumer thread panicked.
    ConsumerPanicked,
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::ConsumerSpawn(e) => write!(f, "Consumer thread spawn failed: {}", e),
            Self::ConsumerPanicked => write!(f, "Consumer thread panicked"),
        }
    }
}

impl std::error::Error for PlatformError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_event_is_debug() {
        let debug_str = format!("{:?}", PlatformEvent::WindowClosed);
        assert!(debug_str.contains("WindowClosed"));
    }

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }

    #[test]
    fn consumer_panic_display() {
        assert_eq!(PlatformError::ConsumerPanicked.to_string(), "Consumer thread panicked");
    }
}
