//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use cadence::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Application facade
pub use crate::application::{Application, ApplicationBuilder, ApplicationError};

// Time
pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::time_step::{FnDriver, FrameDriver, TickReport, TimeStepScheduler};

// States
pub use crate::core::state::{ApplicationState, StateContext, StateKey};

// Screen and input
pub use crate::core::input::{InputSampler, PointerDevice, PointerEvent};
pub use crate::core::screen::Screen;

// Animation
pub use crate::core::animation::{AnimationClock, Atlas, SpriteRect};
pub use crate::core::interpolation::{Bezier, Interpolation, Interpolator, Linear};
