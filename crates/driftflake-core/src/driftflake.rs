use crate::{
    clock::{Clock, SystemClock},
    error::Error,
    DriftflakeSettings, FlakeId, MAX_PROCESS_ID, MAX_SEQUENCE, MAX_WORKER_ID,
};
use jiff::Timestamp;

const MAX_RELATIVE_MS: i64 = (1_i64 << 42) - 1;

/// Snowflake generator state machine.
///
/// Holds the frozen configuration plus the live counters: the relative
/// millisecond slot of the most recent mint and the sequence number
/// within that slot. Minting takes `&mut self`; concurrent access goes
/// through the single-owner worker in `driftflake-generator`, which is
/// what makes the uniqueness invariant hold under caller concurrency.
#[derive(Debug)]
pub struct Driftflake<C: Clock> {
    epoch: Timestamp,
    worker_id: u8,
    process_id: u8,
    clock: C,
    /// Milliseconds since `epoch` of the slot ids are being minted in.
    /// Never decreases once the generator is live.
    last_ts: i64,
    /// Sequence within `last_ts`; `None` until the first id is minted.
    sequence: Option<u16>,
}

impl Driftflake<SystemClock> {
    /// Validates the settings and returns a generator backed by the
    /// real system clock.
    pub fn new(settings: DriftflakeSettings) -> Result<Self, Error> {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> Driftflake<C> {
    fn with_clock(settings: DriftflakeSettings, clock: C) -> Result<Self, Error> {
        if settings.worker_id > MAX_WORKER_ID {
            return Err(Error::InvalidWorkerId {
                worker_id: settings.worker_id,
                max_worker_id: MAX_WORKER_ID,
            });
        }
        if settings.process_id > MAX_PROCESS_ID {
            return Err(Error::InvalidProcessId {
                process_id: settings.process_id,
                max_process_id: MAX_PROCESS_ID,
            });
        }

        let now = clock.now();
        if settings.epoch > now {
            return Err(Error::EpochAhead {
                epoch: settings.epoch,
                now,
            });
        }

        let starting_at = settings.starting_at.unwrap_or(now);
        if starting_at < settings.epoch {
            return Err(Error::StartBeforeEpoch {
                starting_at,
                epoch: settings.epoch,
            });
        }

        Ok(Self {
            epoch: settings.epoch,
            worker_id: settings.worker_id,
            process_id: settings.process_id,
            clock,
            last_ts: starting_at.as_millisecond() - settings.epoch.as_millisecond(),
            sequence: None,
        })
    }

    /// Mints the next id from the wall clock.
    ///
    /// At most 4096 ids fit in one millisecond slot; when a slot is
    /// exhausted this blocks until the clock enters the next one, which
    /// bounds throughput instead of overflowing into the process-id
    /// field. A clock that stepped backward is waited out the same way,
    /// so `last_ts` never decreases and ids stay time-ordered.
    pub fn next_id(&mut self) -> Result<FlakeId, Error> {
        let mut now_rel = self.relative_now();

        if now_rel < self.last_ts {
            // Clock regressed, or the settings seeded a future
            // starting point. Reusing an older slot could repeat an
            // already-issued (timestamp, sequence) pair.
            self.wait_for_slot(self.last_ts);
            now_rel = self.last_ts;
        }

        if now_rel == self.last_ts {
            match self.sequence {
                None => self.sequence = Some(0),
                Some(seq) if seq < MAX_SEQUENCE => self.sequence = Some(seq + 1),
                Some(_) => {
                    // Slot exhausted: 4096 ids already carry this
                    // timestamp. Wait for the next millisecond.
                    self.wait_for_slot(self.last_ts + 1);
                    self.last_ts = self.relative_now();
                    self.sequence = Some(0);
                }
            }
        } else {
            self.last_ts = now_rel;
            self.sequence = Some(0);
        }

        self.mint()
    }

    /// Mints the next id without consulting the clock.
    ///
    /// All 4096 sequence values of the current slot are consumed before
    /// the logical clock advances by one millisecond, independent of
    /// real elapsed time. Combined with `starting_at` this gives fully
    /// deterministic output.
    pub fn next_id_lazy(&mut self) -> Result<FlakeId, Error> {
        match self.sequence {
            None => self.sequence = Some(0),
            Some(seq) if seq < MAX_SEQUENCE => self.sequence = Some(seq + 1),
            Some(_) => {
                self.last_ts += 1;
                self.sequence = Some(0);
            }
        }

        self.mint()
    }

    /// Mints `count` ids from the wall clock, in generation order.
    pub fn next_ids(&mut self, count: usize) -> Result<Vec<FlakeId>, Error> {
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            ids.push(self.next_id()?);
        }
        Ok(ids)
    }

    /// Mints `count` ids lazily, in generation order.
    pub fn next_ids_lazy(&mut self, count: usize) -> Result<Vec<FlakeId>, Error> {
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            ids.push(self.next_id_lazy()?);
        }
        Ok(ids)
    }

    fn relative_now(&self) -> i64 {
        self.clock.now().as_millisecond() - self.epoch.as_millisecond()
    }

    fn wait_for_slot(&self, slot: i64) {
        let target = Timestamp::from_millisecond(self.epoch.as_millisecond() + slot)
            .expect("slot instant is a valid timestamp");
        self.clock.wait_until(target);
    }

    fn mint(&self) -> Result<FlakeId, Error> {
        if self.last_ts > MAX_RELATIVE_MS {
            return Err(Error::TimestampOverflow);
        }

        Ok(FlakeId::new()
            .with_timestamp(self.last_ts as u64)
            .with_worker_id(self.worker_id)
            .with_process_id(self.process_id)
            .with_sequence(self.sequence.unwrap_or(0)))
    }
}
