//! Snowflake-style distributed ID generation.
//!
//! This crate holds the 64-bit ID layout and the generator state
//! machine. Serialized access for concurrent callers lives in
//! `driftflake-generator`.

mod clock;
mod driftflake;
pub mod error;
mod flake_id;
mod settings;

pub use clock::{Clock, SystemClock};
pub use driftflake::Driftflake;
pub use error::Error;
pub use flake_id::{FlakeId, MAX_PROCESS_ID, MAX_SEQUENCE, MAX_WORKER_ID};
pub use settings::{DriftflakeSettings, DEFAULT_EPOCH_MS};
