//! Base trait for one-shot events in MVI architecture.

/// Marker trait for event objects.
///
/// Events are side-effect notifications (toasts, snackbars). They are not
/// part of state and are delivered at most once, never replayed.
pub trait Event: std::fmt::Debug + Send + 'static {}
