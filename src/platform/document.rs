//=========================================================================
// Winit Document
//
// Presents native windows as selectable touch surfaces.
//
// Responsibilities:
// - Map selectors (e.g. "#canvas") to window ids
// - Track the root window's size as the document bounding box
// - Route `WindowEvent::Touch` to the listeners of the touched window
//
// Notes:
// The first registered window becomes the root. Several selectors may
// name the same window; they resolve to one shared surface, the way two
// CSS selectors can match one element.
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

//=== External Crates =====================================================
use log::{debug, trace};
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::window::WindowId;

//=== Internal Modules ====================================================
use super::event_mapper;
use crate::core::surface::{Document, Listener, ListenerId, ListenerTable, Surface};
use crate::core::touch::{BoundingRect, Contact, RawTouch, TouchPhase};

//=== WindowSurface =======================================================

/// Touch surface backed by one native window.
pub struct WindowSurface {
    window_id: WindowId,
    listeners: ListenerTable,
}

impl WindowSurface {
    pub fn window_id(&self) -> WindowId {
        self.window_id
    }
}

impl Surface for WindowSurface {
    fn add_listener(&self, phase: TouchPhase, listener: Listener) -> ListenerId {
        self.listeners.add(phase, listener)
    }

    fn remove_listener(&self, phase: TouchPhase, id: ListenerId) -> bool {
        self.listeners.remove(phase, id)
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

//=== WinitDocument =======================================================

#[derive(Default)]
struct Root {
    window: Option<WindowId>,
    bounds: BoundingRect,
}

/// Document whose elements are winit windows.
#[derive(Default)]
pub struct WinitDocument {
    selectors: RwLock<HashMap<String, WindowId>>,
    surfaces: RwLock<HashMap<WindowId, Arc<WindowSurface>>>,
    root: RwLock<Root>,
}

impl WinitDocument {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    /// Makes `window_id` resolvable as `selector`. The first window ever
    /// registered becomes the root and its `size` the bounding box.
    pub fn register_window(&self, selector: &str, window_id: WindowId, size: PhysicalSize<u32>) {
        self.surfaces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(window_id)
            .or_insert_with(|| {
                Arc::new(WindowSurface {
                    window_id,
                    listeners: ListenerTable::new(),
                })
            });

        self.selectors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(selector.to_owned(), window_id);

        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        if root.window.is_none() {
            root.window = Some(window_id);
            root.bounds = event_mapper::bounds(size);
        }

        debug!(target: "platform", "Registered window {:?} as {:?}", window_id, selector);
    }

    //--- Event Routing ----------------------------------------------------

    /// Feeds one window event. Returns how many listeners ran.
    ///
    /// `Resized` on the root window updates the bounding box; `Touch`
    /// is dispatched to the window's surface. Other events are ignored.
    pub fn handle_window_event(&self, window_id: WindowId, event: &WindowEvent) -> usize {
        match event {
            WindowEvent::Resized(size) => {
                self.resize(window_id, *size);
                0
            }
            WindowEvent::Touch(touch) => self.dispatch_touch(
                window_id,
                touch.phase.into(),
                event_mapper::contact(touch.id, touch.location),
            ),
            _ => 0,
        }
    }

    /// Updates the bounding box if `window_id` is the root window.
    pub fn resize(&self, window_id: WindowId, size: PhysicalSize<u32>) {
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        if root.window == Some(window_id) {
            root.bounds = event_mapper::bounds(size);
            trace!(target: "platform", "Root resized to {}x{}", size.width, size.height);
        }
    }

    /// Delivers one contact to the listeners of `window_id`.
    pub fn dispatch_touch(&self, window_id: WindowId, phase: TouchPhase, contact: Contact) -> usize {
        let Some(surface) = self.surface(window_id) else {
            trace!(target: "platform::touch", "Touch on unregistered window {:?}", window_id);
            return 0;
        };
        let raw = RawTouch::new(phase, vec![contact], self.root_bounds());
        surface.listeners.dispatch(&raw)
    }

    //--- Query API --------------------------------------------------------

    pub fn root_bounds(&self) -> BoundingRect {
        self.root.read().unwrap_or_else(PoisonError::into_inner).bounds
    }

    fn surface(&self, window_id: WindowId) -> Option<Arc<WindowSurface>> {
        self.surfaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&window_id)
            .cloned()
    }
}

impl Document for WinitDocument {
    fn query_selector(&self, selector: &str) -> Option<Arc<dyn Surface>> {
        let window_id = *self
            .selectors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(selector)?;
        self.surface(window_id).map(|s| s as Arc<dyn Surface>)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::InputBridge;

    fn window(raw: u64) -> WindowId {
        WindowId::from(raw)
    }

    fn document() -> WinitDocument {
        let document = WinitDocument::new();
        document.register_window("#canvas", window(1), PhysicalSize::new(800, 600));
        document
    }

    #[test]
    fn first_window_is_root() {
        let document = document();
        document.register_window("#overlay", window(2), PhysicalSize::new(10, 10));
        assert_eq!(document.root_bounds(), BoundingRect::from_size(800.0, 600.0));
    }

    #[test]
    fn resolves_registered_selectors_only() {
        let document = document();
        assert!(document.query_selector("#canvas").is_some());
        assert!(document.query_selector("#other").is_none());
    }

    #[test]
    fn aliases_share_one_surface() {
        let document = document();
        document.register_window("canvas", window(1), PhysicalSize::new(800, 600));

        let a = document.query_selector("#canvas").unwrap();
        document.query_selector("canvas").unwrap().add_listener(TouchPhase::Start, Arc::new(|_raw: &RawTouch| {}));

        assert_eq!(a.listener_count(), 1);
    }

    #[test]
    fn resize_of_root_updates_bounds() {
        let document = document();
        document.resize(window(1), PhysicalSize::new(1024, 768));
        assert_eq!(document.root_bounds().width, 1024.0);
    }

    #[test]
    fn resize_of_other_window_is_ignored() {
        let document = document();
        document.register_window("#overlay", window(2), PhysicalSize::new(10, 10));
        document.resize(window(2), PhysicalSize::new(50, 50));
        assert_eq!(document.root_bounds().width, 800.0);
    }

    #[test]
    fn resized_event_routes_to_resize() {
        let document = document();
        document.handle_window_event(window(1), &WindowEvent::Resized(PhysicalSize::new(400, 300)));
        assert_eq!(document.root_bounds(), BoundingRect::from_size(400.0, 300.0));
    }

    #[test]
    fn touch_on_unregistered_window_is_dropped() {
        let document = document();
        assert_eq!(document.dispatch_touch(window(9), TouchPhase::Start, Contact::new(0, 0.0, 0.0)), 0);
    }

    #[test]
    fn bridge_captures_window_touches() {
        let document = document();
        let bridge = InputBridge::new();
        assert!(bridge.bind(&document, "#canvas"));

        document.dispatch_touch(window(1), TouchPhase::Start, Contact::new(11, 300.0, 20.0));
        document.resize(window(1), PhysicalSize::new(1000, 600));
        document.dispatch_touch(window(1), TouchPhase::Move, Contact::new(11, 300.0, 25.0));

        let events = bridge.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].position, [500.0, 20.0]);
        assert_eq!(events[1].position, [700.0, 25.0]);
        assert_eq!(events[1].phase, TouchPhase::Move);
    }

    #[test]
    fn bind_before_registration_fails() {
        let document = WinitDocument::new();
        let bridge = InputBridge::new();
        assert!(!bridge.bind(&document, "#canvas"));
        assert!(!bridge.queue_initialized());
    }
}
