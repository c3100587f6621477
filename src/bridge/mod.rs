//=========================================================================
// Input Bridge
//
// Binds touch listeners to host surfaces and buffers the normalized
// events until a polling consumer drains them.
//
// Architecture:
// ```text
//   Host dispatch turn                 Consumer tick
//   ┌─────────────────────┐           ┌──────────────────────┐
//   │ Surface listeners   │           │ bridge.drain()       │
//   │  └─ normalizer ─────┼─► queue ◄─┼── swap for empty     │
//   │     (per contact)   │  (Mutex)  │   └─ JSON string     │
//   └─────────────────────┘           └──────────────────────┘
// ```
//
// Guarantees:
// - Events drain in arrival order, each exactly once
// - A drain before any successful bind yields "[]"
// - Binding an unknown selector changes nothing and returns `false`
//
// Thread Safety:
// The queue and registry are each behind a `Mutex`, so listeners may
// fire on a platform thread while a consumer thread drains. Poisoned
// locks are recovered; neither bind nor drain ever panics.
//=========================================================================

//=== Submodules ==========================================================

mod builder;

pub use builder::{BridgeConfig, InputBridgeBuilder, RebindPolicy};

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::surface::{Document, Listener, ListenerId, Surface};
use crate::core::touch::{encode_batch, BridgeError, RawTouch, TouchEvent, TouchPhase, TouchQueue, EMPTY_BATCH};

//=== Binding =============================================================

/// Registry entry: the handler bound under one selector and where it
/// is attached.
struct Binding {
    surface: Arc<dyn Surface>,
    handler: Listener,
    attached: Vec<(TouchPhase, ListenerId)>,
}

impl Binding {
    fn detach(&self) -> usize {
        self.attached
            .iter()
            .filter(|(phase, id)| self.surface.remove_listener(*phase, *id))
            .count()
    }
}

type Registry = HashMap<String, Binding>;

//=== InputBridge =========================================================

/// Touch capture bridge: Binder ([`bind`](Self::bind)) plus Drainer
/// ([`drain`](Self::drain)).
///
/// Construct once per process with [`InputBridgeBuilder`] (or
/// [`InputBridge::new`] for defaults) and share it by reference or
/// `Arc` with whatever binds surfaces and whatever polls.
///
/// # Examples
///
/// ```
/// use aetheric_touch_bridge::bridge::InputBridge;
/// use aetheric_touch_bridge::core::surface::{HeadlessDocument, HeadlessElement};
/// use aetheric_touch_bridge::core::touch::{Contact, TouchPhase};
///
/// let document = HeadlessDocument::new(800.0, 600.0);
/// let canvas = document.insert(HeadlessElement::new("canvas").with_id("canvas"));
///
/// let bridge = InputBridge::new();
/// assert!(bridge.bind(&document, "#canvas"));
///
/// document.dispatch(&canvas, TouchPhase::Start, &[Contact::new(0, 100.0, 50.0)]);
///
/// assert_eq!(bridge.drain(), r#"[{"id":0,"phase":"touchstart","position":[700.0,50.0]}]"#);
/// assert_eq!(bridge.drain(), "[]");
/// ```
pub struct InputBridge {
    config: BridgeConfig,
    queue: Arc<Mutex<TouchQueue>>,
    registry: Mutex<Option<Registry>>,
}

impl InputBridge {
    //--- Construction -----------------------------------------------------

    /// Creates a bridge with default settings.
    pub fn new() -> Self {
        InputBridgeBuilder::new().build()
    }

    pub(crate) fn with_config(config: BridgeConfig) -> Self {
        Self {
            queue: Arc::new(Mutex::new(TouchQueue::new(config.queue_capacity))),
            registry: Mutex::new(None),
            config,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    //--- Binder -----------------------------------------------------------

    /// Attaches the normalizing listener to the surface `selector`
    /// resolves to, for all four touch lifecycle signals.
    ///
    /// Returns `false` (and logs a warning) when nothing matches; in that
    /// case no listener is attached and no state changes. Returns `true`
    /// once the listener is attached and recorded under `selector`.
    ///
    /// Rebinding a selector follows the configured [`RebindPolicy`].
    pub fn bind<D: Document + ?Sized>(&self, document: &D, selector: &str) -> bool {
        let Some(surface) = document.query_selector(selector) else {
            warn!(target: "bridge::bind", "No surface matches selector {:?}, nothing bound", selector);
            return false;
        };

        self.lock_queue().ensure();

        let mut guard = self.lock_registry();
        let registry = guard.get_or_insert_with(HashMap::new);

        if let Some(previous) = registry.get(selector) {
            match self.config.rebind {
                RebindPolicy::Replace => {
                    let detached = previous.detach();
                    debug!(target: "bridge::bind", "Rebinding {:?}: detached {} listeners", selector, detached);
                }
                RebindPolicy::Accumulate => {
                    debug!(target: "bridge::bind", "Rebinding {:?}: previous listeners stay attached", selector);
                }
            }
        }

        let handler = self.normalizer(selector);
        let attached = TouchPhase::ALL
            .iter()
            .map(|&phase| (phase, surface.add_listener(phase, handler.clone())))
            .collect();

        registry.insert(selector.to_owned(), Binding { surface, handler, attached });
        debug!(target: "bridge::bind", "Bound touch listeners to {:?}", selector);
        true
    }

    /// Builds the per-selector listener that turns one raw occurrence
    /// into one queued event per changed contact.
    fn normalizer(&self, selector: &str) -> Listener {
        let queue = Arc::clone(&self.queue);
        let tag = self.config.tag_surfaces.then(|| selector.to_owned());

        Arc::new(move |raw: &RawTouch| {
            let mut queue = queue.lock().unwrap_or_else(PoisonError::into_inner);
            for contact in &raw.changed_touches {
                trace!(
                    target: "bridge",
                    "{} id={} page=({}, {})",
                    raw.phase,
                    contact.identifier,
                    contact.page_x,
                    contact.page_y
                );
                let mut event = TouchEvent::from_contact(raw.phase, contact, &raw.root_bounds);
                event.surface = tag.clone();
                queue.push(event);
            }
        })
    }

    //--- Drainer ----------------------------------------------------------

    /// Removes every queued event and returns them as a JSON array.
    ///
    /// Returns `"[]"` when nothing is queued, including before any bind.
    /// Never fails: an encoding error is logged and yields `"[]"`.
    pub fn drain(&self) -> String {
        self.try_drain().unwrap_or_else(|e| {
            error!(target: "bridge::drain", "{}; dropping batch", e);
            EMPTY_BATCH.to_owned()
        })
    }

    /// Like [`drain`](Self::drain) but reports encoding failures.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Encode`] if the batch cannot be serialized.
    /// The events are removed from the queue either way.
    pub fn try_drain(&self) -> Result<String, BridgeError> {
        let events = self.drain_events();
        trace!(target: "bridge::drain", "Draining {} events", events.len());
        encode_batch(&events)
    }

    /// Removes every queued event and returns them in arrival order.
    pub fn drain_events(&self) -> Vec<TouchEvent> {
        self.lock_queue().take().unwrap_or_default()
    }

    //--- Query API --------------------------------------------------------

    /// Number of events waiting for the next drain.
    pub fn pending(&self) -> usize {
        self.lock_queue().len()
    }

    /// True once a bind has succeeded.
    pub fn queue_initialized(&self) -> bool {
        self.lock_queue().is_initialized()
    }

    /// True if a handler is registered under `selector`.
    pub fn is_bound(&self, selector: &str) -> bool {
        self.lock_registry()
            .as_ref()
            .is_some_and(|registry| registry.contains_key(selector))
    }

    /// Selectors with a registered handler, sorted.
    pub fn bound_surfaces(&self) -> Vec<String> {
        let mut selectors: Vec<String> = self
            .lock_registry()
            .as_ref()
            .map(|registry| registry.keys().cloned().collect())
            .unwrap_or_default();
        selectors.sort();
        selectors
    }

    /// Handler currently registered under `selector`.
    pub fn handler(&self, selector: &str) -> Option<Listener> {
        self.lock_registry()
            .as_ref()
            .and_then(|registry| registry.get(selector))
            .map(|binding| binding.handler.clone())
    }

    //--- Internal Helpers -------------------------------------------------

    fn lock_queue(&self) -> MutexGuard<'_, TouchQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_registry(&self) -> MutexGuard<'_, Option<Registry>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InputBridge {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
