//! Per-screen state machines built on the view-model engine.

pub mod detail;
pub mod home;

/// Status of the latest fetch on a screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    /// The latest fetch failed; the view offers a retry.
    Failed,
}

impl LoadState {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}
