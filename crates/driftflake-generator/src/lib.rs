//! Serialized access to a Driftflake generator.
//!
//! A dedicated tokio task owns the generator state machine and answers
//! mint requests one at a time over a channel. Any number of callers
//! may hold clones of the [`GeneratorHandle`]; the single-writer queue
//! is what keeps concurrently minted ids unique.

pub mod error;
mod handle;
mod request;
mod worker;

pub use error::GeneratorError;
pub use handle::{GeneratorHandle, DEFAULT_REPLY_TIMEOUT};
