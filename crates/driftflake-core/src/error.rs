use jiff::Timestamp;
use thiserror::Error;

/// Errors returned by generator configuration and ID minting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid worker id {worker_id}; expected 0..={max_worker_id}")]
    InvalidWorkerId { worker_id: u8, max_worker_id: u8 },
    #[error("invalid process id {process_id}; expected 0..={max_process_id}")]
    InvalidProcessId { process_id: u8, max_process_id: u8 },
    #[error("epoch is ahead of current clock time: epoch={epoch}, now={now}")]
    EpochAhead { epoch: Timestamp, now: Timestamp },
    #[error("starting point is before the epoch: starting_at={starting_at}, epoch={epoch}")]
    StartBeforeEpoch {
        starting_at: Timestamp,
        epoch: Timestamp,
    },
    #[error("elapsed time no longer fits the 42-bit timestamp field")]
    TimestampOverflow,
}
