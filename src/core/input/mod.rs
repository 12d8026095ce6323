//=========================================================================
// Input System
//=========================================================================
//
// Pointer input from the host device to virtual coordinates.
//
// Architecture:
//   host → InputFeed (channel) → TouchTracker (PointerDevice)
//                                      ↓
//                          InputSampler (via Screen) → states
//
//=========================================================================

//=== Module Declarations =================================================

mod event;
mod input_feed;
mod input_sampler;
mod touch_tracker;

//=== Public API ==========================================================

pub use event::{PointerEvent, PointerSlot, MAX_POINTERS};
pub use input_feed::InputFeed;
pub use input_sampler::InputSampler;
pub use touch_tracker::TouchTracker;

//=== PointerDevice Trait =================================================

/// Live pointer device in actual coordinates (top-left origin).
///
/// Queries have no side effects. Slots the device does not know about
/// report an untouched pointer at the origin.
pub trait PointerDevice {
    /// Raw X of `slot`.
    fn x(&self, slot: PointerSlot) -> f32;

    /// Raw Y of `slot`, measured down from the top edge.
    fn y(&self, slot: PointerSlot) -> f32;

    /// Raw horizontal movement of `slot` since the previous frame.
    fn delta_x(&self, slot: PointerSlot) -> f32;

    /// Raw vertical movement of `slot` since the previous frame.
    fn delta_y(&self, slot: PointerSlot) -> f32;

    /// Whether `slot` is currently down.
    fn is_touched(&self, slot: PointerSlot) -> bool;

    /// Whether any slot is currently down.
    fn is_any_touched(&self) -> bool;

    /// Whether a new touch began during the last frame.
    fn just_touched(&self) -> bool;
}
