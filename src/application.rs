//=========================================================================
// Application
//
// Host-facing entry point tying the runtime pieces together.
//
// Architecture:
// ```text
//     ApplicationBuilder  ──build()──>  Application  ──create()──>  [Running]
//         │                               │
//         ├─ with_time_step()             ├─ tick(target)   once per host frame
//         ├─ with_actual_size()           ├─ set_state()    switch modes
//         └─ with_initial_state()         └─ resize()       new device size
//
//   tick(): drain input → TimeStepScheduler
//             ├─ per step: StateMachine::update() → consume input → apply_transitions()
//             └─ once:     StateMachine::render()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::clock::{Clock, SystemClock};
use crate::core::input::{InputFeed, PointerEvent};
use crate::core::screen::Screen;
use crate::core::state::{ApplicationState, StateContext, StateError, StateKey, StateMachine};
use crate::core::time_step::{FrameDriver, TickReport, TimeStepScheduler};

//=== ApplicationError ====================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    #[error("application ticked before create()")]
    NotCreated,

    #[error(transparent)]
    State(#[from] StateError),
}

//=== ApplicationBuilder ==================================================

/// Builder for configuring and constructing an [`Application`].
///
/// # Default Values
///
/// - **Time step**: 20 ms (50 simulation steps per second)
/// - **Actual size**: same as the virtual size
/// - **Catch-up cap**: none
/// - **Input capacity**: 128 pointer events
///
/// # Examples
///
/// ```rust
/// use cadence::core::clock::ManualClock;
/// use cadence::core::state::{ApplicationState, StateContext, StateKey};
/// use cadence::ApplicationBuilder;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Mode { Play }
/// impl StateKey for Mode {}
///
/// #[derive(Default)]
/// struct Play { steps: u32 }
///
/// impl ApplicationState<Mode, Vec<u32>> for Play {
///     fn update_application(&mut self, _ctx: &mut StateContext<Mode>) {
///         self.steps += 1;
///     }
///
///     fn render_to(&mut self, target: &mut Vec<u32>) {
///         target.push(self.steps);
///     }
/// }
///
/// let clock = ManualClock::new();
/// let mut app = ApplicationBuilder::new(480, 320)
///     .with_actual_size(960, 640)
///     .with_time_step(20)
///     .with_initial_state(Mode::Play, Play::default())
///     .build_with_clock(clock.clone());
///
/// app.create();
/// clock.advance(55);
///
/// let mut frames = Vec::new();
/// let report = app.tick(&mut frames).unwrap();
///
/// assert_eq!(report.steps, 2);
/// assert_eq!(frames, vec![2]);
/// ```
pub struct ApplicationBuilder<K: StateKey, R: ?Sized> {
    virtual_size: (i32, i32),
    actual_size: Option<(i32, i32)>,
    time_step: u64,
    max_steps_per_tick: Option<u32>,
    input_capacity: usize,
    states: Vec<(K, Box<dyn ApplicationState<K, R>>)>,
    initial_state: Option<K>,
}

impl<K: StateKey, R: ?Sized> ApplicationBuilder<K, R> {
    /// Creates a builder for the given virtual resolution.
    pub fn new(virtual_width: i32, virtual_height: i32) -> Self {
        Self {
            virtual_size: (virtual_width, virtual_height),
            actual_size: None,
            time_step: 20,
            max_steps_per_tick: None,
            input_capacity: 128,
            states: Vec::new(),
            initial_state: None,
        }
    }

    /// Sets the device resolution the application starts with.
    ///
    /// Default: the virtual resolution.
    pub fn with_actual_size(mut self, width: i32, height: i32) -> Self {
        self.actual_size = Some((width, height));
        self
    }

    /// Sets the simulated milliseconds per update step.
    ///
    /// Default: 20
    ///
    /// # Panics
    ///
    /// Panics if `millis == 0`.
    pub fn with_time_step(mut self, millis: u64) -> Self {
        assert!(millis > 0, "Time step must be positive, got {}", millis);
        self.time_step = millis;
        self
    }

    /// Caps the update steps a single tick may run after a stall.
    ///
    /// Default: uncapped
    ///
    /// # Panics
    ///
    /// Panics if `max_steps == 0`.
    pub fn with_max_steps_per_tick(mut self, max_steps: u32) -> Self {
        assert!(max_steps > 0, "Max steps per tick must be positive");
        self.max_steps_per_tick = Some(max_steps);
        self
    }

    /// Sets how many pointer events may wait between two ticks.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_input_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Input capacity must be positive");
        self.input_capacity = capacity;
        self
    }

    /// Registers a state without making it current.
    pub fn with_state<T>(mut self, key: K, state: T) -> Self
    where
        T: ApplicationState<K, R> + 'static,
    {
        let state: Box<dyn ApplicationState<K, R>> = Box::new(state);
        self.states.push((key, state));
        self
    }

    /// Registers a state and makes it the one entered on `create()`.
    pub fn with_initial_state<T>(mut self, key: K, state: T) -> Self
    where
        T: ApplicationState<K, R> + 'static,
    {
        let state: Box<dyn ApplicationState<K, R>> = Box::new(state);
        self.states.push((key, state));
        self.initial_state = Some(key);
        self
    }

    /// Builds the application on the system clock.
    pub fn build(self) -> Application<K, R, SystemClock> {
        self.build_with_clock(SystemClock::new())
    }

    /// Builds the application on `clock`.
    ///
    /// # Panics
    ///
    /// Panics if the virtual or actual resolution is not positive.
    pub fn build_with_clock<C: Clock>(self, clock: C) -> Application<K, R, C> {
        let (virtual_width, virtual_height) = self.virtual_size;
        let (actual_width, actual_height) = self.actual_size.unwrap_or(self.virtual_size);
        let screen = Screen::new(actual_width, actual_height, virtual_width, virtual_height);

        info!(
            "Building application (virtual: {}x{}, actual: {}x{}, step: {}ms)",
            virtual_width, virtual_height, actual_width, actual_height, self.time_step
        );

        let mut scheduler = TimeStepScheduler::new(clock, self.time_step);
        if let Some(max_steps) = self.max_steps_per_tick {
            scheduler = scheduler.with_max_steps_per_tick(max_steps);
        }

        let mut context = StateContext::new(screen, self.time_step);
        let mut states = StateMachine::new();
        for (key, state) in self.states {
            states.register_boxed(key, state, &mut context);
        }

        if let Some(initial) = self.initial_state {
            // Registered just above, and the machine is not created yet.
            if let Err(e) = states.set_state(initial, &mut context) {
                error!("Initial state could not be bound: {}", e);
            }
        }

        Application {
            scheduler,
            states,
            context,
            feed: InputFeed::new(self.input_capacity),
        }
    }
}

//=== Application =========================================================

/// Fixed-timestep application runtime.
///
/// The host calls [`tick`](Self::tick) once per rendered frame. Each tick
/// runs as many fixed update steps on the current state as the elapsed
/// time calls for, then renders it once.
///
/// # Lifecycle
///
/// 1. Build via [`ApplicationBuilder`]; register states
/// 2. [`create`](Self::create): the initial state enters, timing starts
/// 3. [`tick`](Self::tick) every host frame
/// 4. Stop calling `tick` to stop the application
pub struct Application<K: StateKey, R: ?Sized, C: Clock> {
    scheduler: TimeStepScheduler<C>,
    states: StateMachine<K, R>,
    context: StateContext<K>,
    feed: InputFeed,
}

impl<K: StateKey, R: ?Sized, C: Clock> Application<K, R, C> {
    //--- States -----------------------------------------------------------

    /// Registers a state under `key`.
    ///
    /// Replacing the running state exits the old instance and enters the
    /// new one immediately.
    pub fn register_state<T>(&mut self, key: K, state: T)
    where
        T: ApplicationState<K, R> + 'static,
    {
        self.states.register_state(key, state, &mut self.context);
    }

    /// Exits the current state and enters `key`.
    ///
    /// Before [`create`](Self::create) this only records `key` as the
    /// state to enter on creation.
    pub fn set_state(&mut self, key: K) -> Result<(), ApplicationError> {
        self.states.set_state(key, &mut self.context)?;
        Ok(())
    }

    pub fn current_state(&self) -> Option<K> {
        self.states.current_state()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Starts the application: timing begins now and the current state
    /// enters.
    pub fn create(&mut self) {
        if !self.states.is_created() {
            self.scheduler.reset();
            info!("Application created");
        }

        self.states.create(&mut self.context);
    }

    pub fn is_created(&self) -> bool {
        self.states.is_created()
    }

    /// Runs one host frame: applies queued input, catches the simulation
    /// up, then renders once to `target`.
    ///
    /// If a state requests an unregistered state, the remaining steps of
    /// the frame still run and the first such error is returned.
    pub fn tick(&mut self, target: &mut R) -> Result<TickReport, ApplicationError> {
        if !self.states.is_created() {
            return Err(ApplicationError::NotCreated);
        }

        self.feed.drain_into(self.context.touches_mut());

        let mut driver = StepDriver {
            states: &mut self.states,
            context: &mut self.context,
            failure: None,
        };
        let report = self.scheduler.tick(&mut driver, target);

        match driver.failure {
            Some(e) => Err(e.into()),
            None => Ok(report),
        }
    }

    /// Skips the time that passed while the host was suspended.
    ///
    /// Without this, the first tick after a long pause simulates the
    /// whole pause.
    pub fn resume(&mut self) {
        self.scheduler.reset();
        info!("Application resumed; suspended time discarded");
    }

    /// Switches to a new device resolution, keeping the virtual one.
    ///
    /// # Panics
    ///
    /// Panics if either extent is not positive.
    pub fn resize(&mut self, actual_width: i32, actual_height: i32) {
        let screen = self.context.screen().resized(actual_width, actual_height);
        info!("Resized to {}x{}", actual_width, actual_height);
        self.context.set_screen(screen);
    }

    //--- Accessors --------------------------------------------------------

    /// Returns a sender the host uses to deliver pointer events.
    pub fn input_sender(&self) -> Sender<PointerEvent> {
        self.feed.sender()
    }

    pub fn screen(&self) -> &Screen {
        self.context.screen()
    }

    pub fn context(&self) -> &StateContext<K> {
        &self.context
    }

    pub fn scheduler(&self) -> &TimeStepScheduler<C> {
        &self.scheduler
    }

    pub fn time_step(&self) -> u64 {
        self.scheduler.time_step()
    }
}

//=== StepDriver ==========================================================

// Drives the state machine from the scheduler for the length of a tick.
struct StepDriver<'a, K: StateKey, R: ?Sized> {
    states: &'a mut StateMachine<K, R>,
    context: &'a mut StateContext<K>,
    failure: Option<StateError>,
}

impl<K: StateKey, R: ?Sized> FrameDriver<R> for StepDriver<'_, K, R> {
    fn simulate_step(&mut self) {
        self.states.update(self.context);

        // Touches and movement are reported to one step only.
        self.context.touches_mut().consume_frame();

        if let Err(e) = self.states.apply_transitions(self.context) {
            error!("State transition failed: {}", e);
            self.failure.get_or_insert(e);
        }
    }

    fn render_frame(&mut self, target: &mut R) {
        self.states.render(target);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
