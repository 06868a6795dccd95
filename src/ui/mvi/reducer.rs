//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::UiState;

/// Reducer transforms state based on intents.
///
/// Reducers hold the transitions that need nothing but the current state
/// and the intent. View-model handlers call into them and publish the
/// result; anything touching a collaborator stays in the handler.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(state: Self::State, intent: &Self::Intent) -> Self::State;
}
