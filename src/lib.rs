//! Unidirectional state management for movie-browsing screens.
//!
//! Each screen is a [`ViewModel`](engine::ViewModel): actions go in, use
//! cases stream results back through the [`collector`], reducers fold them
//! into an immutable state held by a [`StateStore`](store::StateStore),
//! and one-shot notifications leave through an
//! [`EventChannel`](events::EventChannel).

pub mod collector;
pub mod config;
pub mod domain;
pub mod engine;
pub mod events;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod pagination;
pub mod scope;
pub mod screen;
pub mod store;
