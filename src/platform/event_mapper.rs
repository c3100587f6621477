//=========================================================================
// Platform Event Mapper
//
// Converts Winit touch data to the bridge's host-neutral types.
//
// Winit delivers one `WindowEvent::Touch` per changed contact, so every
// raw occurrence built here carries exactly one contact. Touch
// locations are physical pixels relative to the window's top-left
// corner, which is the page origin for a window surface.
//
//=========================================================================

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::TouchPhase as WinitTouchPhase;

use crate::core::touch::{BoundingRect, Contact, TouchPhase};

//=== Phase Conversion ====================================================

impl From<WinitTouchPhase> for TouchPhase {
    fn from(phase: WinitTouchPhase) -> Self {
        match phase {
            WinitTouchPhase::Started => TouchPhase::Start,
            WinitTouchPhase::Moved => TouchPhase::Move,
            WinitTouchPhase::Ended => TouchPhase::End,
            WinitTouchPhase::Cancelled => TouchPhase::Cancel,
        }
    }
}

//=== Contact Conversion ==================================================

pub(crate) fn contact(id: u64, location: PhysicalPosition<f64>) -> Contact {
    Contact::new(id, location.x, location.y)
}

//=== Bounds Conversion ===================================================

pub(crate) fn bounds(size: PhysicalSize<u32>) -> BoundingRect {
    BoundingRect::from_size(f64::from(size.width), f64::from(size.height))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_map_one_to_one() {
        assert_eq!(TouchPhase::from(WinitTouchPhase::Started), TouchPhase::Start);
        assert_eq!(TouchPhase::from(WinitTouchPhase::Moved), TouchPhase::Move);
        assert_eq!(TouchPhase::from(WinitTouchPhase::Ended), TouchPhase::End);
        assert_eq!(TouchPhase::from(WinitTouchPhase::Cancelled), TouchPhase::Cancel);
    }

    #[test]
    fn contact_keeps_physical_location() {
        let c = contact(42, PhysicalPosition::new(12.5, 99.0));
        assert_eq!(c, Contact::new(42, 12.5, 99.0));
    }

    #[test]
    fn bounds_anchor_at_origin() {
        let rect = bounds(PhysicalSize::new(1280, 720));
        assert_eq!(rect, BoundingRect::from_size(1280.0, 720.0));
    }
}
