//! Base trait for actions (user intents) in MVI architecture.

/// Marker trait for action objects.
///
/// Actions represent:
/// - User intents (scroll reached the end, pull to refresh)
/// - Screen lifecycle requests (fetch a detail page)
///
/// Each action is consumed exactly once by the engine's mailbox.
pub trait Action: std::fmt::Debug + Send + 'static {}
