//=========================================================================
// State Context
//=========================================================================
//
// The application handle passed to state callbacks.
//
// Contains what a state reads and writes while it runs:
// - screen: current actual/virtual mapping
// - touches: pointer device state for this frame
// - transitions: queue for requesting state changes
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{StateKey, TransitionQueue};
use crate::core::input::{InputSampler, TouchTracker};
use crate::core::screen::Screen;

//=== StateContext ========================================================

/// Shared data a state sees during `enter_state`, `update_application`
/// and `exit_state`.
pub struct StateContext<K: StateKey> {
    screen: Screen,
    touches: TouchTracker,
    time_step: u64,

    /// Requested state changes, applied after the current step.
    pub transitions: TransitionQueue<K>,
}

impl<K: StateKey> StateContext<K> {
    /// Creates a context with no touches and an empty transition queue.
    pub fn new(screen: Screen, time_step: u64) -> Self {
        Self {
            screen,
            touches: TouchTracker::new(),
            time_step,
            transitions: TransitionQueue::new(),
        }
    }

    /// Current coordinate mapping.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Raw pointer state in device coordinates.
    pub fn touches(&self) -> &TouchTracker {
        &self.touches
    }

    /// Pointer input in virtual coordinates.
    pub fn input(&self) -> InputSampler<'_, TouchTracker> {
        InputSampler::new(&self.screen, &self.touches)
    }

    /// Milliseconds simulated by each `update_application` call.
    pub fn time_step(&self) -> u64 {
        self.time_step
    }

    /// Queues a switch to `key` once the current step finishes.
    pub fn request_state(&mut self, key: K) {
        self.transitions.push(key);
    }

    //--- Crate Internals --------------------------------------------------

    pub(crate) fn touches_mut(&mut self) -> &mut TouchTracker {
        &mut self.touches
    }

    pub(crate) fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
