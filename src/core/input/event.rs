//=========================================================================
// Pointer Event Types
//
// Platform-neutral representation of touch and mouse input.
//
// The host translates whatever its windowing layer reports into these
// events and pushes them through the application's input sender. All
// positions are in actual (device) coordinates with a top-left origin.
//
//=========================================================================

//=== PointerSlot =========================================================

/// Index of a simultaneous pointer (finger or mouse).
///
/// Slot 0 is the primary pointer; a mouse always reports on slot 0.
pub type PointerSlot = usize;

/// Number of simultaneous pointers tracked.
pub const MAX_POINTERS: usize = 20;

//=== PointerEvent ========================================================

/// A single pointer state change as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer made contact (finger down / button pressed).
    Down { slot: PointerSlot, x: f32, y: f32 },

    /// Pointer lifted.
    Up { slot: PointerSlot, x: f32, y: f32 },

    /// Pointer moved, touching or hovering.
    Moved { slot: PointerSlot, x: f32, y: f32 },
}

impl PointerEvent {
    /// Returns the slot the event belongs to.
    pub fn slot(&self) -> PointerSlot {
        match *self {
            Self::Down { slot, .. } | Self::Up { slot, .. } | Self::Moved { slot, .. } => slot,
        }
    }

    /// Returns the reported position.
    pub fn position(&self) -> (f32, f32) {
        match *self {
            Self::Down { x, y, .. } | Self::Up { x, y, .. } | Self::Moved { x, y, .. } => (x, y),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
