//=========================================================================
// Clock
//=========================================================================
//
// Monotonic millisecond time source shared by every runtime component.
//
// Components never read the wall clock directly; they receive a `Clock`
// at construction. Production code uses `SystemClock`, tests and hosts
// that own their own timeline use `ManualClock`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

//=== Clock Trait =========================================================

/// Capability providing the current monotonic time in milliseconds.
///
/// Readings must never decrease between two calls on the same clock.
/// The absolute origin is unspecified; only differences are meaningful.
pub trait Clock {
    /// Returns the current time in milliseconds.
    fn now_millis(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

//=== SystemClock =========================================================

/// Clock backed by [`Instant`], counting from its own construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose zero is "now".
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

//=== ManualClock =========================================================

/// Externally driven clock.
///
/// Clones share the same underlying reading, so a test can hand one clone
/// to a component and keep another to move time forward:
///
/// ```rust
/// use cadence::core::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let observer = clock.clone();
///
/// clock.advance(55);
/// assert_eq!(observer.now_millis(), 55);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a clock reading `millis`.
    pub fn starting_at(millis: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(millis)),
        }
    }

    /// Moves the clock forward by `millis`.
    pub fn advance(&self, millis: u64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    /// Jumps to an absolute reading.
    ///
    /// # Panics
    ///
    /// Panics if `millis` is earlier than the current reading.
    pub fn set(&self, millis: u64) {
        let previous = self.millis.load(Ordering::SeqCst);
        assert!(
            millis >= previous,
            "ManualClock cannot move backwards ({} -> {})",
            previous,
            millis
        );
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
