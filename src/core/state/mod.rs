//=========================================================================
// Application State System
//=========================================================================
//
// Mutually exclusive application states with ordered enter/exit.
//
// Architecture:
//   StateMachine
//     ├─ states: HashMap<K, Box<dyn ApplicationState>>
//     └─ current: Option<K>
//
// Flow:
//   update() → current.update_application() → apply_transitions()
//   render() → current.render_to()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Module Declarations =================================================

mod context;
mod state_machine;
mod transition_queue;

//=== Public API ==========================================================

pub use context::StateContext;
pub use state_machine::{StateError, StateMachine};
pub use transition_queue::TransitionQueue;

//=== State Key Trait =====================================================

/// Marker trait for state identifiers.
///
/// Typically implemented by an application-defined enum.
pub trait StateKey: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== ApplicationState Trait ==============================================

/// One mode of the application (menu, gameplay, pause screen, ...).
///
/// `R` is the render target the host passes to every frame.
///
/// # Minimal Implementation
///
/// Only `update_application()` and `render_to()` are required:
///
/// ```rust
/// use cadence::core::state::{ApplicationState, StateContext, StateKey};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Mode { Title, Play }
/// impl StateKey for Mode {}
///
/// struct Title;
///
/// impl ApplicationState<Mode, Vec<String>> for Title {
///     fn update_application(&mut self, ctx: &mut StateContext<Mode>) {
///         if ctx.input().just_touched() {
///             ctx.request_state(Mode::Play);
///         }
///     }
///
///     fn render_to(&mut self, target: &mut Vec<String>) {
///         target.push("title".into());
///     }
/// }
/// ```
pub trait ApplicationState<K: StateKey, R: ?Sized> {
    /// Called when the state becomes current.
    ///
    /// Default implementation does nothing.
    fn enter_state(&mut self, _ctx: &mut StateContext<K>) {}

    /// Called when the state stops being current.
    ///
    /// Default implementation does nothing.
    fn exit_state(&mut self, _ctx: &mut StateContext<K>) {}

    /// Advances the application by one fixed time step.
    fn update_application(&mut self, ctx: &mut StateContext<K>);

    /// Draws the state to the host's render target.
    fn render_to(&mut self, target: &mut R);
}
