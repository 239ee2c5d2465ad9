use jiff::{SignedDuration, Timestamp};
use modular_bitfield::prelude::*;
use std::cmp::Ordering;
use std::fmt;

/// Largest worker id that fits the 5-bit field.
pub const MAX_WORKER_ID: u8 = 31;
/// Largest process id that fits the 5-bit field.
pub const MAX_PROCESS_ID: u8 = 31;
/// Largest per-millisecond sequence value (12 bits).
pub const MAX_SEQUENCE: u16 = 4095;

#[bitfield]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlakeId {
    /// 12 bits for the sequence number (resets every millisecond).
    ///
    /// The sequence only disambiguates ids minted within one
    /// millisecond slot, so it is not part of the public decode
    /// surface.
    pub(crate) sequence: B12,
    /// 5 bits for the process id (up to 32 processes per machine).
    pub process_id: B5,
    /// 5 bits for the worker id (up to 32 machines).
    pub worker_id: B5,
    /// 42 bits for the timestamp (milliseconds since a custom epoch).
    pub timestamp: B42,
}

impl FlakeId {
    /// Returns the absolute instant this id was minted at, given the
    /// epoch the generator was configured with.
    pub fn timestamp_at(&self, epoch: Timestamp) -> Timestamp {
        epoch + SignedDuration::from_millis(self.timestamp() as i64)
    }
}

impl From<FlakeId> for u64 {
    fn from(id: FlakeId) -> u64 {
        u64::from_le_bytes(id.into_bytes())
    }
}

impl From<u64> for FlakeId {
    fn from(raw: u64) -> FlakeId {
        FlakeId::from_bytes(raw.to_le_bytes())
    }
}

impl PartialOrd for FlakeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FlakeId {
    fn cmp(&self, other: &Self) -> Ordering {
        // The timestamp occupies the most significant bits, so the raw
        // integer sorts ids by mint order.
        u64::from(*self).cmp(&u64::from(*other))
    }
}

impl fmt::Debug for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlakeId")
            .field("timestamp", &self.timestamp())
            .field("worker_id", &self.worker_id())
            .field("process_id", &self.process_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl fmt::Display for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u64::from(*self))
    }
}
