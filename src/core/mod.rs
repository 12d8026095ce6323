//=========================================================================
// Core Runtime Systems
//
// Building blocks of the application runtime.
//
// Responsibilities:
// - Provide an injectable time source (`clock`)
// - Pace simulation at a fixed rate, decoupled from rendering (`time_step`)
// - Route updates and renders to one current state (`state`)
// - Map between device pixels and the virtual resolution (`screen`)
// - Sample pointer input in virtual coordinates (`input`)
// - Derive sprite frames and curve values from elapsed time
//   (`animation`, `interpolation`)
//
// Notes:
// Every time-dependent piece reads the current time through a `Clock`,
// so tests drive them with a `ManualClock` instead of sleeping.
//
//=========================================================================

pub mod animation;
pub mod clock;
pub mod input;
pub mod interpolation;
pub mod screen;
pub mod state;
pub mod time_step;
