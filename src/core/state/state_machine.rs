//=========================================================================
// State Machine
//=========================================================================
//
// Holds the registered application states and the one that is current.
//
// States live in a HashMap by key, so a state keeps its data between
// activations. Before `create()` the machine only records which state
// is current; enter/exit callbacks start firing once it is created.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::{ApplicationState, StateContext, StateKey};

//=== StateError ==========================================================

/// Misuse of a [`StateMachine`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("state {state} is not registered")]
    Unregistered { state: String },
}

//=== State Machine =======================================================

/// Routes updates and renders to exactly one current state.
///
/// # Transition Ordering
///
/// On a created machine, switching from `A` to `B` runs `A.exit_state()`
/// to completion before `B.enter_state()` begins, and both happen inside
/// the `set_state` call. No state is updated or rendered between the two.
pub struct StateMachine<K: StateKey, R: ?Sized> {
    states: HashMap<K, Box<dyn ApplicationState<K, R>>>,
    current: Option<K>,
    created: bool,
}

impl<K: StateKey, R: ?Sized> StateMachine<K, R> {
    //--- Construction -----------------------------------------------------

    /// Creates an uninitialized machine with no states.
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            current: None,
            created: false,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a state under `key`.
    ///
    /// Registering a key twice replaces the earlier state. Replacing the
    /// current state of a created machine exits the old instance and
    /// enters the new one before this returns.
    pub fn register_state<T>(&mut self, key: K, state: T, ctx: &mut StateContext<K>)
    where
        T: ApplicationState<K, R> + 'static,
    {
        self.register_boxed(key, Box::new(state), ctx);
    }

    /// Registers an already boxed state under `key`.
    pub fn register_boxed(
        &mut self,
        key: K,
        state: Box<dyn ApplicationState<K, R>>,
        ctx: &mut StateContext<K>,
    ) {
        let Some(mut previous) = self.states.insert(key, state) else {
            debug!("Registered state {:?}", key);
            return;
        };

        warn!("State {:?} was already registered and has been replaced", key);

        if self.created && self.current == Some(key) {
            debug!("Replacing current state {:?}", key);
            previous.exit_state(ctx);
            self.enter(key, ctx);
        }
    }

    pub fn is_registered(&self, key: K) -> bool {
        self.states.contains_key(&key)
    }

    //--- Lifecycle --------------------------------------------------------

    /// Marks the machine created and enters the current state, if any.
    ///
    /// Only the first call has an effect.
    pub fn create(&mut self, ctx: &mut StateContext<K>) {
        if self.created {
            warn!("State machine is already created");
            return;
        }

        self.created = true;
        info!("State machine created with initial state {:?}", self.current);

        if let Some(key) = self.current {
            self.enter(key, ctx);
        }
    }

    /// Makes `key` the current state.
    ///
    /// On a created machine the previous state exits and `key` enters
    /// before this returns. Before creation only the binding changes.
    /// Setting the state that is already current only logs a warning.
    pub fn set_state(&mut self, key: K, ctx: &mut StateContext<K>) -> Result<(), StateError> {
        if !self.states.contains_key(&key) {
            return Err(StateError::Unregistered {
                state: format!("{:?}", key),
            });
        }

        if self.current == Some(key) {
            warn!("Setting the application to the state it is already in ({:?})", key);
            return Ok(());
        }

        let previous = self.current.replace(key);

        if !self.created {
            debug!("Bound state {:?} (enter deferred until creation)", key);
            return Ok(());
        }

        debug!("Switching state {:?} -> {:?}", previous, key);

        if let Some(previous) = previous {
            if let Some(state) = self.states.get_mut(&previous) {
                state.exit_state(ctx);
            }
        }
        self.enter(key, ctx);

        Ok(())
    }

    /// Applies the transitions queued in `ctx`, in request order.
    ///
    /// Requests made by the states entered here stay queued for the next
    /// call. An unregistered request is skipped and the rest still apply;
    /// the first such failure is returned. Otherwise returns the number
    /// of requests applied.
    pub fn apply_transitions(&mut self, ctx: &mut StateContext<K>) -> Result<usize, StateError> {
        let requests = ctx.transitions.take();
        let mut failure = None;

        for &key in &requests {
            if let Err(e) = self.set_state(key, ctx) {
                warn!("Skipping queued transition: {}", e);
                failure.get_or_insert(e);
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(requests.len()),
        }
    }

    //--- Routing ----------------------------------------------------------

    /// Forwards one simulation step to the current state.
    pub fn update(&mut self, ctx: &mut StateContext<K>) {
        if let Some(state) = self.current_mut() {
            state.update_application(ctx);
        }
    }

    /// Forwards one render to the current state.
    pub fn render(&mut self, target: &mut R) {
        if let Some(state) = self.current_mut() {
            state.render_to(target);
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn current_state(&self) -> Option<K> {
        self.current
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    //--- Internal Helpers -------------------------------------------------

    fn current_mut(&mut self) -> Option<&mut Box<dyn ApplicationState<K, R>>> {
        let key = self.current?;
        self.states.get_mut(&key)
    }

    fn enter(&mut self, key: K, ctx: &mut StateContext<K>) {
        if let Some(state) = self.states.get_mut(&key) {
            state.enter_state(ctx);
        }
    }
}

impl<K: StateKey, R: ?Sized> Default for StateMachine<K, R> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
