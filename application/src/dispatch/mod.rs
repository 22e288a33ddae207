//! Provider dispatch: concurrent fan-out with per-provider retry state

pub mod coordinator;
pub mod retry;

pub use coordinator::{DispatchCoordinator, ProviderHandle};
pub use retry::{RetryDecision, RetryState};
