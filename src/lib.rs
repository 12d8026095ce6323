//=========================================================================
// Cadence Library Root
//
// This crate defines the public API surface of the Cadence runtime.
//
// Responsibilities:
// - Expose the application facade (`Application`, `ApplicationBuilder`)
// - Expose the runtime pieces (scheduler, states, screen mapping, input,
//   animation) for hosts that wire them up themselves
//
// Typical usage:
// ```ignore
// let mut app = ApplicationBuilder::new(480, 320)
//     .with_initial_state(Mode::Title, TitleState::default())
//     .build();
//
// app.create();
// loop {
//     app.tick(&mut canvas)?;
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the runtime building blocks (clock, scheduler, states,
// screen, input, animation). Most hosts only need the `Application`
// facade below.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `application` wires the building blocks into the fixed-timestep
// runtime driven by the host once per frame.
//
mod application;

//--- Public Exports ------------------------------------------------------

pub use application::{Application, ApplicationBuilder, ApplicationError};
