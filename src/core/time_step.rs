//=========================================================================
// Time Step Scheduler
//=========================================================================
//
// Fixed-timestep accumulator driven by the host's render cadence.
//
// Architecture:
// ```text
//   host frame ──tick()──► lag += now - last_tick
//                           while lag >= step: simulate_step(), lag -= step
//                           render_frame()          (exactly once)
// ```
//
// The simulation always advances in whole steps of `time_step`, so the
// number of steps depends only on the total elapsed time, never on how
// the host spaces its ticks. Rendering happens once per tick regardless
// of how many steps ran.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::clock::Clock;

//=== FrameDriver Trait ===================================================

/// The two callbacks a scheduler drives.
///
/// Both must be synchronous; neither may block on outside work.
pub trait FrameDriver<R: ?Sized> {
    /// Advances the simulation by exactly one time step.
    fn simulate_step(&mut self);

    /// Draws the current simulation state to `target`.
    fn render_frame(&mut self, target: &mut R);
}

//=== FnDriver ============================================================

/// [`FrameDriver`] built from a pair of closures.
///
/// ```rust
/// use cadence::core::clock::ManualClock;
/// use cadence::core::time_step::{FnDriver, TimeStepScheduler};
///
/// let clock = ManualClock::new();
/// let mut scheduler = TimeStepScheduler::new(clock.clone(), 20);
///
/// let mut steps = 0;
/// let mut frames: Vec<u32> = Vec::new();
/// let mut driver = FnDriver::new(|| steps += 1, |out: &mut Vec<u32>| out.push(0));
///
/// clock.advance(55);
/// scheduler.tick(&mut driver, &mut frames);
/// drop(driver);
///
/// assert_eq!(steps, 2);
/// assert_eq!(frames.len(), 1);
/// assert_eq!(scheduler.lag(), 15);
/// ```
pub struct FnDriver<S, F> {
    simulate: S,
    render: F,
}

impl<S, F> FnDriver<S, F> {
    pub fn new(simulate: S, render: F) -> Self {
        Self { simulate, render }
    }
}

impl<R: ?Sized, S, F> FrameDriver<R> for FnDriver<S, F>
where
    S: FnMut(),
    F: FnMut(&mut R),
{
    fn simulate_step(&mut self) {
        (self.simulate)()
    }

    fn render_frame(&mut self, target: &mut R) {
        (self.render)(target)
    }
}

//=== TickReport ==========================================================

/// Outcome of a single [`TimeStepScheduler::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Simulation steps run during the tick.
    pub steps: u32,

    /// Milliseconds discarded by the catch-up cap (0 when uncapped).
    pub dropped_millis: u64,
}

//=== TimeStepScheduler ===================================================

/// Converts irregular host ticks into fixed-size simulation steps.
///
/// # Invariants
///
/// - `time_step > 0`, fixed for the scheduler's lifetime
/// - after every `tick()`: `0 <= lag < time_step`
///
/// # Catch-Up Cap
///
/// Uncapped by default: a long stall is simulated step by step. With
/// [`with_max_steps_per_tick`](Self::with_max_steps_per_tick), a tick runs
/// at most that many steps; the whole steps beyond the cap are dropped
/// and only the sub-step remainder is carried into the next tick.
pub struct TimeStepScheduler<C: Clock> {
    clock: C,
    time_step: u64,
    lag: u64,
    last_tick_time: u64,
    max_steps_per_tick: Option<u32>,
    total_steps: u64,
}

impl<C: Clock> TimeStepScheduler<C> {
    //--- Construction -----------------------------------------------------

    /// Creates a scheduler that simulates `time_step` milliseconds per
    /// step, starting its lag accounting now.
    ///
    /// # Panics
    ///
    /// Panics if `time_step == 0`.
    pub fn new(clock: C, time_step: u64) -> Self {
        assert!(time_step > 0, "Time step must be positive, got {}", time_step);

        let last_tick_time = clock.now_millis();
        debug!("Time step scheduler created (step: {}ms)", time_step);

        Self {
            clock,
            time_step,
            lag: 0,
            last_tick_time,
            max_steps_per_tick: None,
            total_steps: 0,
        }
    }

    /// Caps the number of steps a single tick may run.
    ///
    /// # Panics
    ///
    /// Panics if `max_steps == 0`.
    pub fn with_max_steps_per_tick(mut self, max_steps: u32) -> Self {
        assert!(max_steps > 0, "Max steps per tick must be positive");
        self.max_steps_per_tick = Some(max_steps);
        self
    }

    /// Discards accumulated lag and restarts accounting from now.
    ///
    /// Time that passed before this call is never simulated.
    pub fn reset(&mut self) {
        self.lag = 0;
        self.last_tick_time = self.clock.now_millis();
        debug!("Time step scheduler reset at {}ms", self.last_tick_time);
    }

    //--- Tick -------------------------------------------------------------

    /// Catches the simulation up to the clock, then renders once.
    ///
    /// # Panics
    ///
    /// Panics if the clock reports a time earlier than the previous tick.
    pub fn tick<R, D>(&mut self, driver: &mut D, target: &mut R) -> TickReport
    where
        R: ?Sized,
        D: FrameDriver<R> + ?Sized,
    {
        let now = self.clock.now_millis();
        assert!(
            now >= self.last_tick_time,
            "Clock moved backwards ({}ms -> {}ms)",
            self.last_tick_time,
            now
        );

        self.lag += now - self.last_tick_time;
        self.last_tick_time = now;

        let dropped_millis = self.apply_catch_up_cap();

        let mut steps = 0;
        while self.lag >= self.time_step {
            driver.simulate_step();
            self.lag -= self.time_step;
            steps += 1;
        }
        self.total_steps += u64::from(steps);

        debug_assert!(self.lag < self.time_step);

        driver.render_frame(target);

        TickReport { steps, dropped_millis }
    }

    //--- Accessors --------------------------------------------------------

    /// Milliseconds simulated per step.
    pub fn time_step(&self) -> u64 {
        self.time_step
    }

    /// Elapsed milliseconds not yet consumed by a step.
    pub fn lag(&self) -> u64 {
        self.lag
    }

    /// Fraction of a step carried in `lag`, in `[0, 1)`.
    ///
    /// Renderers use this to interpolate between the last two
    /// simulation states.
    pub fn alpha(&self) -> f64 {
        self.lag as f64 / self.time_step as f64
    }

    /// Steps run since construction.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn max_steps_per_tick(&self) -> Option<u32> {
        self.max_steps_per_tick
    }

    //--- Internal Helpers -------------------------------------------------

    fn apply_catch_up_cap(&mut self) -> u64 {
        let Some(max_steps) = self.max_steps_per_tick else {
            return 0;
        };

        let budget = u64::from(max_steps) * self.time_step;
        if self.lag < budget + self.time_step {
            return 0;
        }

        let remainder = self.lag % self.time_step;
        let dropped = self.lag - budget - remainder;
        self.lag = budget + remainder;

        warn!(
            "Simulation fell behind: dropped {}ms ({} steps) beyond the {}-step cap",
            dropped,
            dropped / self.time_step,
            max_steps
        );

        dropped
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
