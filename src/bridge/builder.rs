//=========================================================================
// Bridge Configuration
//=========================================================================
//
// Builder and settings for [`InputBridge`].
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::InputBridge;

//=== RebindPolicy ========================================================

/// What happens to the listener of a selector that is bound again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebindPolicy {
    /// Detach the previous listener before attaching the new one.
    /// Each contact is queued once no matter how often a selector is bound.
    #[default]
    Replace,

    /// Leave the previous listener attached and only overwrite the
    /// registry entry. Every rebind adds one more copy of each event.
    Accumulate,
}

//=== BridgeConfig ========================================================

/// Settings captured by [`InputBridgeBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub queue_capacity: usize,
    pub rebind: RebindPolicy,
    pub tag_surfaces: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            rebind: RebindPolicy::Replace,
            tag_surfaces: false,
        }
    }
}

//=== InputBridgeBuilder ==================================================

/// Builder for configuring and constructing an [`InputBridge`].
///
/// # Default Values
///
/// - **Queue capacity**: 64 events preallocated per drain cycle
/// - **Rebind policy**: [`RebindPolicy::Replace`]
/// - **Surface tags**: off (wire output has no `surface` key)
///
/// # Examples
///
/// ```
/// use aetheric_touch_bridge::bridge::{InputBridgeBuilder, RebindPolicy};
///
/// let bridge = InputBridgeBuilder::new()
///     .with_queue_capacity(256)
///     .with_rebind_policy(RebindPolicy::Accumulate)
///     .with_surface_tags(true)
///     .build();
///
/// assert_eq!(bridge.drain(), "[]");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputBridgeBuilder {
    config: BridgeConfig,
}

impl InputBridgeBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many events the queue preallocates after each drain.
    ///
    /// Default: 64
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Queue capacity must be positive");
        self.config.queue_capacity = capacity;
        self
    }

    /// Sets the rebind policy.
    ///
    /// Default: [`RebindPolicy::Replace`]
    pub fn with_rebind_policy(mut self, policy: RebindPolicy) -> Self {
        self.config.rebind = policy;
        self
    }

    /// Tags every queued event with the selector it was captured through.
    ///
    /// Off by default so the wire output matches consumers that only
    /// know `id`, `phase` and `position`.
    pub fn with_surface_tags(mut self, enabled: bool) -> Self {
        self.config.tag_surfaces = enabled;
        self
    }

    /// Builds the bridge. Queue and registry stay absent until the first
    /// successful bind.
    pub fn build(self) -> InputBridge {
        info!(
            target: "bridge",
            "Building input bridge (capacity: {}, rebind: {:?}, tags: {})",
            self.config.queue_capacity,
            self.config.rebind,
            self.config.tag_surfaces
        );
        InputBridge::with_config(self.config)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.rebind, RebindPolicy::Replace);
        assert!(!config.tag_surfaces);
    }

    #[test]
    fn builder_applies_settings() {
        let bridge = InputBridgeBuilder::new()
            .with_queue_capacity(8)
            .with_rebind_policy(RebindPolicy::Accumulate)
            .with_surface_tags(true)
            .build();

        let config = bridge.config();
        assert_eq!(config.queue_capacity, 8);
        assert_eq!(config.rebind, RebindPolicy::Accumulate);
        assert!(config.tag_surfaces);
    }

    #[test]
    #[should_panic(expected = "Queue capacity must be positive")]
    fn zero_capacity_panics() {
        let _ = InputBridgeBuilder::new().with_queue_capacity(0);
    }
}
