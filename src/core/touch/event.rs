//=========================================================================
// Touch Event Types
//
// Defines the normalized representation of touch input as it travels
// through the bridge, plus the raw shape hosts hand to listeners.
//
// Event Flow:
// ```text
// Host surface (DOM element, winit window, headless element)
//         ↓
//    RawTouch { phase, changed_touches, root_bounds }
//         ↓
//    Normalizing listener (bridge)
//         ↓
//    TouchEvent { id, phase, position }   ──► queue ──► drain()
// ```
//
// Wire compatibility:
// `TouchPhase` serializes to the literal host signal names
// (`touchstart`, `touchend`, `touchcancel`, `touchmove`), and
// `TouchEvent` keeps its field order `id`, `phase`, `position`.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== TouchPhase ==========================================================

/// Lifecycle stage of a single contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchPhase {
    /// Contact started touching the surface.
    #[serde(rename = "touchstart")]
    Start,

    /// Contact lifted off the surface.
    #[serde(rename = "touchend")]
    End,

    /// Contact was interrupted by the host (palm rejection, focus loss...).
    #[serde(rename = "touchcancel")]
    Cancel,

    /// Contact moved while touching the surface.
    #[serde(rename = "touchmove")]
    Move,
}

impl TouchPhase {
    /// All four lifecycle signals in attachment order.
    pub const ALL: [TouchPhase; 4] = [
        TouchPhase::Start,
        TouchPhase::End,
        TouchPhase::Cancel,
        TouchPhase::Move,
    ];

    /// Host signal name, identical to the wire tag.
    pub fn signal_name(self) -> &'static str {
        match self {
            TouchPhase::Start => "touchstart",
            TouchPhase::End => "touchend",
            TouchPhase::Cancel => "touchcancel",
            TouchPhase::Move => "touchmove",
        }
    }
}

impl std::fmt::Display for TouchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.signal_name())
    }
}

//=== BoundingRect ========================================================

/// On-screen rectangle of the document root, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingRect {
    /// Rectangle anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self { x: 0.0, y: 0.0, width, height }
    }
}

//=== Contact =============================================================

/// One changed touch point inside a raw occurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Native identifier, stable for the lifetime of the contact.
    pub identifier: u64,

    /// Horizontal page position in pixels.
    pub page_x: f64,

    /// Vertical page position in pixels.
    pub page_y: f64,
}

impl Contact {
    pub fn new(identifier: u64, page_x: f64, page_y: f64) -> Self {
        Self { identifier, page_x, page_y }
    }
}

//=== RawTouch ============================================================

/// A raw input occurrence as delivered by a host to surface listeners.
///
/// `root_bounds` is sampled by the host at dispatch time, so listeners
/// always see the root bounding box as it is when the signal fires.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTouch {
    pub phase: TouchPhase,
    pub changed_touches: Vec<Contact>,
    pub root_bounds: BoundingRect,
}

impl RawTouch {
    pub fn new(phase: TouchPhase, changed_touches: Vec<Contact>, root_bounds: BoundingRect) -> Self {
        Self { phase, changed_touches, root_bounds }
    }
}

//=== TouchEvent ==========================================================

/// Normalized queue entry handed to the consumer on drain.
///
/// `position` is relative to the root bounding box with a mirrored
/// x-axis: `[root.width - page_x, page_y]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub id: u64,
    pub phase: TouchPhase,
    pub position: [f64; 2],

    /// Selector the event was captured through, when surface tagging
    /// is enabled. Omitted from the wire otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
}

impl TouchEvent {
    /// Normalizes one contact of a raw occurrence.
    pub fn from_contact(phase: TouchPhase, contact: &Contact, root: &BoundingRect) -> Self {
        Self {
            id: contact.identifier,
            phase,
            position: [root.width - contact.page_x, contact.page_y],
            surface: None,
        }
    }

    /// Attaches an origin tag.
    pub fn with_surface(mut self, surface: impl Into<String>) -> Self {
        self.surface = Some(surface.into());
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_names_match_host_events() {
        let names: Vec<&str> = TouchPhase::ALL.iter().map(|p| p.signal_name()).collect();
        assert_eq!(names, ["touchstart", "touchend", "touchcancel", "touchmove"]);
    }

    #[test]
    fn display_uses_signal_name() {
        assert_eq!(TouchPhase::Cancel.to_string(), "touchcancel");
    }

    #[test]
    fn position_mirrors_x_against_root_width() {
        let root = BoundingRect::from_size(400.0, 300.0);
        let contact = Contact::new(3, 150.0, 80.0);

        let event = TouchEvent::from_contact(TouchPhase::Move, &contact, &root);

        assert_eq!(event.id, 3);
        assert_eq!(event.phase, TouchPhase::Move);
        assert_eq!(event.position, [250.0, 80.0]);
        assert!(event.surface.is_none());
    }

    #[test]
    fn position_ignores_root_offset_and_height() {
        let root = BoundingRect { x: 20.0, y: 40.0, width: 100.0, height: 5.0 };
        let event = TouchEvent::from_contact(TouchPhase::Start, &Contact::new(0, 10.0, 500.0), &root);
        assert_eq!(event.position, [90.0, 500.0]);
    }

    #[test]
    fn contact_outside_root_goes_negative() {
        let root = BoundingRect::from_size(100.0, 100.0);
        let event = TouchEvent::from_contact(TouchPhase::End, &Contact::new(1, 130.0, 0.0), &root);
        assert_eq!(event.position[0], -30.0);
    }

    #[test]
    fn phase_serializes_to_wire_tag() {
        let json = serde_json::to_string(&TouchPhase::Start).unwrap();
        assert_eq!(json, "\"touchstart\"");
    }

    #[test]
    fn untagged_event_has_no_surface_key() {
        let event = TouchEvent::from_contact(
            TouchPhase::Start,
            &Contact::new(7, 1.5, 2.5),
            &BoundingRect::from_size(10.0, 10.0),
        );
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"id":7,"phase":"touchstart","position":[8.5,2.5]}"#);
    }

    #[test]
    fn tagged_event_carries_surface() {
        let event = TouchEvent::from_contact(
            TouchPhase::Move,
            &Contact::new(1, 0.0, 0.0),
            &BoundingRect::from_size(10.0, 10.0),
        )
        .with_surface("#canvas");

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["surface"], "#canvas");
    }
}
