//=========================================================================
// Input Sampler
//=========================================================================
//
// Reports pointer input in virtual coordinates.
//
// Architecture:
//   PointerDevice (actual, top-left origin)
//     └─► InputSampler ──Screen──► virtual (bottom-left origin)
//
// Positions go through the Screen mapping; deltas are reported in raw
// device units with only the Y sign flipped to match the virtual axis.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::IVec2;

//=== Internal Dependencies ===============================================

use super::event::PointerSlot;
use super::PointerDevice;
use crate::core::screen::Screen;

//=== InputSampler ========================================================

/// Borrowing view that re-samples a device through a [`Screen`].
///
/// Nothing is cached: every query reads the device again.
///
/// ```rust
/// use cadence::core::input::{InputSampler, PointerEvent, TouchTracker};
/// use cadence::core::screen::Screen;
///
/// let screen = Screen::new(800, 600, 400, 300);
/// let mut touches = TouchTracker::new();
/// touches.process_events(&[PointerEvent::Down { slot: 0, x: 200.0, y: 100.0 }]);
///
/// let input = InputSampler::new(&screen, &touches);
/// assert_eq!(input.pointer_x(), 100);
/// assert_eq!(input.pointer_y(), 250); // (600 - 100) / 2, Y flipped
/// ```
pub struct InputSampler<'a, D: PointerDevice + ?Sized> {
    screen: &'a Screen,
    device: &'a D,
}

impl<'a, D: PointerDevice + ?Sized> InputSampler<'a, D> {
    pub fn new(screen: &'a Screen, device: &'a D) -> Self {
        Self { screen, device }
    }

    /// The mapping this sampler reports through.
    pub fn screen(&self) -> &Screen {
        self.screen
    }

    //--- Positions --------------------------------------------------------

    /// Virtual X of `slot`.
    pub fn x(&self, slot: PointerSlot) -> i32 {
        self.screen.to_virtual_x(self.device.x(slot))
    }

    /// Virtual Y of `slot`, measured up from the bottom edge.
    pub fn y(&self, slot: PointerSlot) -> i32 {
        let flipped = self.screen.actual_height() as f32 - self.device.y(slot);
        self.screen.to_virtual_y(flipped)
    }

    pub fn position(&self, slot: PointerSlot) -> IVec2 {
        IVec2::new(self.x(slot), self.y(slot))
    }

    /// Virtual X of the primary pointer.
    pub fn pointer_x(&self) -> i32 {
        self.x(0)
    }

    /// Virtual Y of the primary pointer.
    pub fn pointer_y(&self) -> i32 {
        self.y(0)
    }

    //--- Deltas -----------------------------------------------------------

    /// Raw horizontal movement of `slot`, in device units.
    pub fn delta_x(&self, slot: PointerSlot) -> f32 {
        self.device.delta_x(slot)
    }

    /// Raw vertical movement of `slot`, in device units, positive upward.
    pub fn delta_y(&self, slot: PointerSlot) -> f32 {
        -self.device.delta_y(slot)
    }

    //--- Touch State ------------------------------------------------------

    pub fn is_touched(&self, slot: PointerSlot) -> bool {
        self.device.is_touched(slot)
    }

    pub fn is_any_touched(&self) -> bool {
        self.device.is_any_touched()
    }

    pub fn just_touched(&self) -> bool {
        self.device.just_touched()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    //--- Test Helpers -----------------------------------------------------

    /// Device reporting fixed values and counting reads.
    #[derive(Default)]
    struct FakeDevice {
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        touched: bool,
        reads: Cell<u32>,
    }

    impl PointerDevice for FakeDevice {
        fn x(&self, _slot: PointerSlot) -> f32 {
            self.reads.set(self.reads.get() + 1);
            self.x
        }

        fn y(&self, _slot: PointerSlot) -> f32 {
            self.reads.set(self.reads.get() + 1);
            self.y
        }

        fn delta_x(&self, _slot: PointerSlot) -> f32 {
            self.dx
        }

        fn delta_y(&self, _slot: PointerSlot) -> f32 {
            self.dy
        }

        fn is_touched(&self, slot: PointerSlot) -> bool {
            self.touched && slot == 0
        }

        fn is_any_touched(&self) -> bool {
            self.touched
        }

        fn just_touched(&self) -> bool {
            self.touched
        }
    }

    //=====================================================================
    // Position Tests
    //=====================================================================

    #[test]
    fn x_is_scaled_into_virtual_space() {
        let screen = Screen::new(1000, 500, 100, 50);
        let device = FakeDevice { x: 505.0, ..Default::default() };
        let input = InputSampler::new(&screen, &device);

        assert_eq!(input.x(0), 50);
    }

    #[test]
    fn y_is_flipped_then_scaled() {
        let screen = Screen::new(1000, 500, 100, 50);
        let device = FakeDevice { y: 100.0, ..Default::default() };
        let input = InputSampler::new(&screen, &device);

        // (500 - 100) * 50 / 500
        assert_eq!(input.y(0), 40);
        assert_eq!(input.position(0), IVec2::new(0, 40));
    }

    #[test]
    fn top_edge_maps_to_virtual_height() {
        let screen = Screen::new(640, 480, 320, 240);
        let device = FakeDevice::default();
        let input = InputSampler::new(&screen, &device);

        assert_eq!(input.pointer_y(), 240);
    }

    #[test]
    fn every_query_reads_the_device() {
        let screen = Screen::new(10, 10, 10, 10);
        let device = FakeDevice::default();
        let input = InputSampler::new(&screen, &device);

        input.pointer_x();
        input.pointer_x();
        input.pointer_y();

        assert_eq!(device.reads.get(), 3);
    }

    //=====================================================================
    // Delta Tests
    //=====================================================================

    #[test]
    fn deltas_stay_in_device_units() {
        let screen = Screen::new(1000, 1000, 10, 10);
        let device = FakeDevice { dx: 40.0, dy: 25.0, ..Default::default() };
        let input = InputSampler::new(&screen, &device);

        assert_eq!(input.delta_x(0), 40.0);
        assert_eq!(input.delta_y(0), -25.0);
    }

    //=====================================================================
    // Touch State Tests
    //=====================================================================

    #[test]
    fn touch_queries_delegate() {
        let screen = Screen::new(10, 10, 10, 10);
        let device = FakeDevice { touched: true, ..Default::default() };
        let input = InputSampler::new(&screen, &device);

        assert!(input.is_touched(0));
        assert!(!input.is_touched(1));
        assert!(input.is_any_touched());
        assert!(input.just_touched());
    }
}
