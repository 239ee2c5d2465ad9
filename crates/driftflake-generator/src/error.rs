use thiserror::Error;

/// Errors surfaced by the generator handle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    /// The state machine rejected the request (configuration or
    /// timestamp-range problems).
    #[error(transparent)]
    Flake(#[from] driftflake_core::Error),
    /// The worker task is gone: [`stop`] was called, or the task
    /// aborted. A new generator must be started.
    ///
    /// [`stop`]: crate::GeneratorHandle::stop
    #[error("generator has been stopped")]
    Stopped,
    /// No reply arrived within the handle's timeout. The request may
    /// be retried; it re-enters the same serialized queue.
    #[error("timed out waiting for a reply from the generator worker")]
    ReplyTimeout,
}
