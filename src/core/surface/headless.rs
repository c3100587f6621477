//=========================================================================
// Headless Document
//=========================================================================
//
// In-memory host with selector resolution and simulated dispatch.
//
// Stands in for a real UI layer wherever there is no window system:
// unit tests, replaying recorded input, server-side simulation.
//
// Selectors:
//   `#id`     element whose id matches
//   `.class`  first element carrying the class
//   `tag`     first element with the tag name
//
// Resolution returns the first match in insertion order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, PoisonError, RwLock};

//=== Internal Dependencies ===============================================

use super::interface::{Document, Listener, ListenerId, Surface};
use super::listeners::ListenerTable;
use crate::core::touch::{BoundingRect, Contact, RawTouch, TouchPhase};

//=== HeadlessElement =====================================================

/// Element of a [`HeadlessDocument`].
pub struct HeadlessElement {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    listeners: ListenerTable,
}

impl HeadlessElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            listeners: ListenerTable::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            self.id.as_deref() == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.classes.iter().any(|c| c == class)
        } else {
            !selector.is_empty() && self.tag.eq_ignore_ascii_case(selector)
        }
    }
}

impl Surface for HeadlessElement {
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

//=== HeadlessDocument ====================================================

/// In-memory document: a flat list of elements and a root bounding box.
pub struct HeadlessDocument {
    elements: RwLock<Vec<Arc<HeadlessElement>>>,
    root_bounds: RwLock<BoundingRect>,
}

impl HeadlessDocument {
    /// Creates an empty document whose root spans `width`×`height`.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: RwLock::new(Vec::new()),
            root_bounds: RwLock::new(BoundingRect::from_size(width, height)),
        }
    }

    /// Inserts an element and returns a handle for dispatching to it.
    pub fn insert(&self, element: HeadlessElement) -> Arc<HeadlessElement> {
        let element = Arc::new(element);
        self.elements
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(element.clone());
        element
    }

    /// Resizes the root element (e.g. viewport rotation).
    pub fn set_root_bounds(&self, bounds: BoundingRect) {
        *self.root_bounds.write().unwrap_or_else(PoisonError::into_inner) = bounds;
    }

    pub fn root_bounds(&self) -> BoundingRect {
        *self.root_bounds.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Delivers one raw occurrence to `element`, sampling the current root
    /// bounds. Returns the number of listeners that ran.
    pub fn dispatch(&self, element: &HeadlessElement, phase: TouchPhase, contacts: &[Contact]) -> usize {
        let raw = RawTouch::new(phase, contacts.to_vec(), self.root_bounds());
        element.listeners.dispatch(&raw)
    }

    fn find(&self, selector: &str) -> Option<Arc<HeadlessElement>> {
        self.elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|e| e.matches(selector))
            .cloned()
    }
}

impl Document for HeadlessDocument {
    fn query_selector(&self, selector: &str) -> Option<Arc<dyn Surface>> {
        self.find(selector.trim()).map(|e| e as Arc<dyn Surface>)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
