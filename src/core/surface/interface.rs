//=========================================================================
// Surface Interface
//=========================================================================
//
// Host-to-bridge contract: how a UI layer exposes named surfaces and
// lets the bridge subscribe to their touch lifecycle signals.
//
// Any UI backend (DOM, winit window, headless document) implements these
// two traits; the bridge never sees backend types.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

//=== Internal Dependencies ===============================================

use crate::core::touch::{RawTouch, TouchPhase};

//=== Listener ============================================================

/// Callback invoked synchronously for every raw occurrence of the
/// signal it was attached to.
pub type Listener = Arc<dyn Fn(&RawTouch) + Send + Sync>;

/// Handle of one attached listener, unique within its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

//=== Surface =============================================================

/// A UI element that can receive touch input.
pub trait Surface: Send + Sync {
    /// Attaches `listener` to one lifecycle signal.
    fn add_listener(&self, phase: TouchPhase, listener: Listener) -> ListenerId;

    /// Detaches a previously attached listener. Returns `false` if the
    /// id is unknown for that signal.
    fn remove_listener(&self, phase: TouchPhase, id: ListenerId) -> bool;

    /// Number of listeners currently attached across all signals.
    fn listener_count(&self) -> usize;
}

//=== Document ============================================================

/// Host document able to resolve selectors to surfaces.
pub trait Document: Send + Sync {
    /// Resolves `selector` to at most one surface.
    fn query_selector(&self, selector: &str) -> Option<Arc<dyn Surface>>;
}
