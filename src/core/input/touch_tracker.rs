//=========================================================================
// Touch Tracker
//=========================================================================
//
// Per-slot pointer state with per-frame delta tracking.
//
// Architecture:
//   PointerEvent → process_events() → slots[] (touched, position) → query
//
// Frame lifecycle: begin_frame() → process_events() → finalize_frame() → query
//
// A frame may span several batches of events: process_events() and
// finalize_frame() can repeat until a reader calls consume_frame(), so
// touches and movement are never lost between reads.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::event::{PointerEvent, PointerSlot, MAX_POINTERS};
use super::PointerDevice;

//=== SlotState ===========================================================

#[derive(Debug, Clone, Copy, Default)]
struct SlotState {
    //--- Persistent State (survives frame boundary) ----------------------
    touched: bool,
    position: (f32, f32),

    //--- Frame Deltas (reset each frame via begin_frame()) --------------
    pressed_this_frame: bool,
    last_position: (f32, f32),
    delta: (f32, f32),
}

//=== TouchTracker ========================================================

/// Tracks which pointer slots are down, where they are, and how far they
/// moved during the last frame.
///
/// This is the [`PointerDevice`] the application feeds from its input
/// channel; hosts with their own device can implement the trait directly.
pub struct TouchTracker {
    slots: [SlotState; MAX_POINTERS],
    just_touched: bool,
}

impl TouchTracker {
    /// Creates a tracker with every slot up at the origin.
    pub fn new() -> Self {
        Self {
            slots: [SlotState::default(); MAX_POINTERS],
            just_touched: false,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific flags and remembers positions for deltas.
    pub fn begin_frame(&mut self) {
        self.just_touched = false;
        for slot in &mut self.slots {
            slot.pressed_this_frame = false;
            slot.last_position = slot.position;
        }
    }

    /// Applies pointer events in arrival order.
    pub fn process_events(&mut self, events: &[PointerEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Computes per-slot movement since `begin_frame()`.
    pub fn finalize_frame(&mut self) {
        for slot in &mut self.slots {
            slot.delta = (
                slot.position.0 - slot.last_position.0,
                slot.position.1 - slot.last_position.1,
            );
        }
    }

    /// Marks the frame as read: clears touch flags and zeroes deltas so
    /// the next reader only sees what happens after this call.
    pub fn consume_frame(&mut self) {
        self.begin_frame();
        self.finalize_frame();
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &PointerEvent) {
        let Some(state) = self.slots.get_mut(event.slot()) else {
            warn!(
                "Ignoring pointer event for slot {} (only {} slots tracked)",
                event.slot(),
                MAX_POINTERS
            );
            return;
        };

        match *event {
            PointerEvent::Down { x, y, .. } => {
                // A down on a slot that is already down is not a new touch
                if !state.touched {
                    state.pressed_this_frame = true;
                    self.just_touched = true;
                }
                state.touched = true;
                state.position = (x, y);
            }

            PointerEvent::Up { x, y, .. } => {
                state.touched = false;
                state.position = (x, y);
            }

            PointerEvent::Moved { x, y, .. } => {
                state.position = (x, y);
            }
        }
    }

    fn slot(&self, slot: PointerSlot) -> Option<&SlotState> {
        self.slots.get(slot)
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` if `slot` went down during the last frame.
    pub fn is_pressed(&self, slot: PointerSlot) -> bool {
        self.slot(slot).is_some_and(|s| s.pressed_this_frame)
    }

    /// Returns the raw position of `slot` (device pixels, top-left origin).
    pub fn position(&self, slot: PointerSlot) -> (f32, f32) {
        self.slot(slot).map_or((0.0, 0.0), |s| s.position)
    }

    /// Returns the raw movement of `slot` during the last frame.
    pub fn delta(&self, slot: PointerSlot) -> (f32, f32) {
        self.slot(slot).map_or((0.0, 0.0), |s| s.delta)
    }

    /// Returns an iterator over the slots currently down.
    pub fn touched_slots(&self) -> impl Iterator<Item = PointerSlot> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.touched)
            .map(|(i, _)| i)
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerDevice for TouchTracker {
    fn x(&self, slot: PointerSlot) -> f32 {
        self.position(slot).0
    }

    fn y(&self, slot: PointerSlot) -> f32 {
        self.position(slot).1
    }

    fn delta_x(&self, slot: PointerSlot) -> f32 {
        self.delta(slot).0
    }

    fn delta_y(&self, slot: PointerSlot) -> f32 {
        self.delta(slot).1
    }

    fn is_touched(&self, slot: PointerSlot) -> bool {
        self.slot(slot).is_some_and(|s| s.touched)
    }

    fn is_any_touched(&self) -> bool {
        self.slots.iter().any(|s| s.touched)
    }

    fn just_touched(&self) -> bool {
        self.just_touched
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn down(slot: PointerSlot, x: f32, y: f32) -> PointerEvent {
        PointerEvent::Down { slot, x, y }
    }

    fn up(slot: PointerSlot, x: f32, y: f32) -> PointerEvent {
        PointerEvent::Up { slot, x, y }
    }

    fn moved(slot: PointerSlot, x: f32, y: f32) -> PointerEvent {
        PointerEvent::Moved { slot, x, y }
    }

    fn frame(tracker: &mut TouchTracker, events: &[PointerEvent]) {
        tracker.begin_frame();
        tracker.process_events(events);
        tracker.finalize_frame();
    }

    //=====================================================================
    // Touch State Tests
    //=====================================================================

    #[test]
    fn just_touched_only_on_transition_frame() {
        let mut tracker = TouchTracker::new();

        // Frame 1: finger down
        frame(&mut tracker, &[down(0, 10.0, 20.0)]);
        assert!(tracker.just_touched());
        assert!(tracker.is_pressed(0));
        assert!(tracker.is_touched(0));

        // Frame 2: still held
        frame(&mut tracker, &[]);
        assert!(!tracker.just_touched());
        assert!(!tracker.is_pressed(0));
        assert!(tracker.is_touched(0));

        // Frame 3: lifted
        frame(&mut tracker, &[up(0, 10.0, 20.0)]);
        assert!(!tracker.is_touched(0));
        assert!(!tracker.is_any_touched());
    }

    #[test]
    fn repeated_down_is_not_a_new_touch() {
        let mut tracker = TouchTracker::new();
        frame(&mut tracker, &[down(0, 0.0, 0.0)]);
        frame(&mut tracker, &[down(0, 5.0, 5.0)]);

        assert!(!tracker.just_touched());
        assert_eq!(tracker.position(0), (5.0, 5.0));
    }

    #[test]
    fn slots_are_independent() {
        let mut tracker = TouchTracker::new();
        frame(&mut tracker, &[down(0, 1.0, 1.0), down(3, 9.0, 9.0)]);
        frame(&mut tracker, &[up(0, 1.0, 1.0)]);

        assert!(!tracker.is_touched(0));
        assert!(tracker.is_touched(3));
        assert!(tracker.is_any_touched());
        assert_eq!(tracker.touched_slots().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut tracker = TouchTracker::new();
        frame(&mut tracker, &[down(MAX_POINTERS, 1.0, 1.0)]);

        assert!(!tracker.is_any_touched());
        assert!(!tracker.just_touched());
        assert!(!tracker.is_touched(MAX_POINTERS));
        assert_eq!(tracker.position(MAX_POINTERS), (0.0, 0.0));
    }

    //=====================================================================
    // Movement Tests
    //=====================================================================

    #[test]
    fn delta_is_movement_within_frame() {
        let mut tracker = TouchTracker::new();
        frame(&mut tracker, &[down(0, 100.0, 100.0)]);
        frame(&mut tracker, &[moved(0, 110.0, 95.0), moved(0, 130.0, 90.0)]);

        assert_eq!(tracker.delta(0), (30.0, -10.0));
        assert_eq!(tracker.delta_x(0), 30.0);
        assert_eq!(tracker.delta_y(0), -10.0);
    }

    #[test]
    fn frame_accumulates_until_consumed() {
        let mut tracker = TouchTracker::new();
        tracker.process_events(&[moved(0, 10.0, 10.0)]);
        tracker.consume_frame();

        // Two batches arrive before anyone reads
        tracker.process_events(&[down(0, 10.0, 10.0)]);
        tracker.finalize_frame();
        tracker.process_events(&[moved(0, 25.0, 4.0)]);
        tracker.finalize_frame();

        assert!(tracker.just_touched());
        assert!(tracker.is_pressed(0));
        assert_eq!(tracker.delta(0), (15.0, -6.0));

        tracker.consume_frame();
        assert!(!tracker.just_touched());
        assert!(!tracker.is_pressed(0));
        assert!(tracker.is_touched(0));
        assert_eq!(tracker.delta(0), (0.0, 0.0));
        assert_eq!(tracker.position(0), (25.0, 4.0));
    }

    #[test]
    fn delta_resets_when_still() {
        let mut tracker = TouchTracker::new();
        frame(&mut tracker, &[moved(0, 50.0, 50.0)]);
        frame(&mut tracker, &[]);

        assert_eq!(tracker.delta(0), (0.0, 0.0));
        assert_eq!(tracker.position(0), (50.0, 50.0));
    }
}
