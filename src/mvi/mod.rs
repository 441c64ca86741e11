//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides the base traits every screen builds on to get
//! unidirectional data flow.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ ActionHandler ──→ UseCase stream ──→ Reducer ──→ State ──→ View
//!    ↑                                  │                                │
//!    │                                  └──→ Event (one-shot) ──→ View   │
//!    └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot of everything a screen renders
//! - **Action**: User intents dispatched to the engine
//! - **Event**: One-shot notifications that never become part of state
//! - **Reducer**: Pure function that computes the next state

mod action;
mod event;
mod reducer;
mod state;

pub use action::Action;
pub use event::Event;
pub use reducer::Reducer;
pub use state::UiState;
