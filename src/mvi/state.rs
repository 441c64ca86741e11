//! Screen state marker.

/// Snapshot of everything a screen renders.
///
/// A state value is never mutated once published: the store replaces it
/// whole. `PartialEq` lets the store skip publishing a reducer result equal
/// to the current snapshot, and `Sync` lets observers on other tasks read
/// the shared latest value.
pub trait UiState: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static {}
