//! Reducer trait for MVI architecture.

use super::state::UiState;

/// Reducer transforms state based on an input.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Input) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The input this reducer handles (a fetch outcome, a user intent).
    type Input;

    /// Process an input and return the new state.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(state: &Self::State, input: Self::Input) -> Self::State;
}
