//=========================================================================
// Input Feed
//=========================================================================
//
// Host-to-runtime pointer event channel with bounded draining.
//
// Architecture:
//   host ──Sender<PointerEvent>──► InputFeed::drain_into() ──► TouchTracker
//
// Draining is bounded per frame so a flooding host cannot stall a tick;
// leftover events stay queued for the next frame. Drained events build
// on the tracker's open frame, which only a reader's consume_frame()
// closes.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::event::PointerEvent;
use super::touch_tracker::TouchTracker;

//=== InputFeed ===========================================================

/// Receiving end of the application's pointer channel.
pub struct InputFeed {
    sender: Sender<PointerEvent>,
    receiver: Receiver<PointerEvent>,
    frame_events: Vec<PointerEvent>,
}

impl InputFeed {
    /// Upper bound on events applied in one frame.
    pub const MAX_EVENTS_PER_FRAME: usize = 256;

    /// Creates a feed whose channel holds at most `capacity` events.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Input capacity must be positive");

        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            frame_events: Vec::with_capacity(capacity.min(Self::MAX_EVENTS_PER_FRAME)),
        }
    }

    /// Returns a sender the host uses to deliver pointer events.
    pub fn sender(&self) -> Sender<PointerEvent> {
        self.sender.clone()
    }

    /// Applies the events queued since the last call to the tracker's
    /// open frame.
    ///
    /// Returns the number of events applied.
    pub fn drain_into(&mut self, tracker: &mut TouchTracker) -> usize {
        self.frame_events.clear();

        while self.frame_events.len() < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => self.frame_events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if self.frame_events.len() >= Self::MAX_EVENTS_PER_FRAME {
            warn!(
                "Input backlog: applied {} pointer events this frame, {} still queued",
                self.frame_events.len(),
                self.receiver.len()
            );
        }

        tracker.process_events(&self.frame_events);
        tracker.finalize_frame();

        self.frame_events.len()
    }

    /// Returns the number of events waiting in the channel.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::PointerDevice;

    #[test]
    fn drain_handles_empty_queue() {
        let mut feed = InputFeed::new(8);
        let mut tracker = TouchTracker::new();

        assert_eq!(feed.drain_into(&mut tracker), 0);
        assert!(!tracker.is_any_touched());
    }

    #[test]
    fn drain_applies_events_in_order() {
        let mut feed = InputFeed::new(8);
        let mut tracker = TouchTracker::new();
        let tx = feed.sender();

        tx.send(PointerEvent::Down { slot: 0, x: 1.0, y: 1.0 }).unwrap();
        tx.send(PointerEvent::Moved { slot: 0, x: 4.0, y: 6.0 }).unwrap();

        assert_eq!(feed.drain_into(&mut tracker), 2);
        assert!(tracker.just_touched());
        assert_eq!(tracker.position(0), (4.0, 6.0));
        assert_eq!(feed.pending(), 0);
    }

    #[test]
    fn drain_keeps_touch_until_consumed() {
        let mut feed = InputFeed::new(8);
        let mut tracker = TouchTracker::new();

        feed.sender().send(PointerEvent::Down { slot: 0, x: 1.0, y: 1.0 }).unwrap();
        feed.drain_into(&mut tracker);
        feed.drain_into(&mut tracker);
        assert!(tracker.just_touched());

        tracker.consume_frame();
        feed.drain_into(&mut tracker);
        assert!(!tracker.just_touched());
        assert!(tracker.is_touched(0));
    }

    #[test]
    fn movement_across_drains_adds_up() {
        let mut feed = InputFeed::new(8);
        let mut tracker = TouchTracker::new();
        let tx = feed.sender();

        tx.send(PointerEvent::Down { slot: 0, x: 0.0, y: 0.0 }).unwrap();
        feed.drain_into(&mut tracker);
        tracker.consume_frame();

        tx.send(PointerEvent::Moved { slot: 0, x: 5.0, y: 0.0 }).unwrap();
        feed.drain_into(&mut tracker);
        tx.send(PointerEvent::Moved { slot: 0, x: 12.0, y: 3.0 }).unwrap();
        feed.drain_into(&mut tracker);

        assert_eq!(tracker.delta(0), (12.0, 3.0));
    }

    #[test]
    fn drain_is_bounded_per_frame() {
        let capacity = InputFeed::MAX_EVENTS_PER_FRAME + 10;
        let mut feed = InputFeed::new(capacity);
        let mut tracker = TouchTracker::new();
        let tx = feed.sender();

        for i in 0..capacity {
            tx.send(PointerEvent::Moved { slot: 0, x: i as f32, y: 0.0 }).unwrap();
        }

        assert_eq!(feed.drain_into(&mut tracker), InputFeed::MAX_EVENTS_PER_FRAME);
        assert_eq!(feed.pending(), 10);
        assert_eq!(feed.drain_into(&mut tracker), 10);
    }

    #[test]
    #[should_panic(expected = "Input capacity must be positive")]
    fn zero_capacity_panics() {
        InputFeed::new(0);
    }
}
