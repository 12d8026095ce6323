//=========================================================================
// Transition Queue
//=========================================================================
//
// State changes requested from inside a state callback.
//
// A state cannot switch the machine that is currently calling it, so it
// queues the target key here. The machine applies the queue in FIFO
// order right after the simulation step that filled it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::StateKey;

//=== Transition Queue ====================================================

/// FIFO of requested target states.
#[derive(Debug)]
pub struct TransitionQueue<K: StateKey> {
    queue: Vec<K>,
}

impl<K: StateKey> TransitionQueue<K> {
    /// Creates a new empty transition queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Requests a switch to `key` at the end of the current step.
    pub fn push(&mut self, key: K) {
        self.queue.push(key);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all requests, leaving the queue empty.
    pub fn take(&mut self) -> Vec<K> {
        std::mem::take(&mut self.queue)
    }
}

impl<K: StateKey> Default for TransitionQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
