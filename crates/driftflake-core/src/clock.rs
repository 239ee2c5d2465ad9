use jiff::Timestamp;
use std::time::Duration;

/// Time source the generator reads from.
///
/// The generator only needs millisecond precision; implementations may
/// truncate anything finer.
pub trait Clock: Send + Sync {
    /// Returns the current time of the clock.
    fn now(&self) -> Timestamp;
    /// Block and wait until the clock reaches the target time.
    fn wait_until(&self, target: Timestamp);
}

/// The real wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn wait_until(&self, target: Timestamp) {
        // Re-check after every sleep so a spurious early wakeup never
        // returns before the target instant.
        loop {
            let now = Timestamp::now();
            if now >= target {
                return;
            }
            // The gap is at most a few milliseconds in practice (one
            // exhausted sequence slot). A minimum of 1 ms avoids
            // busy-spinning on sub-millisecond remainders.
            let remaining_ms = (target.as_millisecond() - now.as_millisecond()).max(1) as u64;
            std::thread::sleep(Duration::from_millis(remaining_ms));
        }
    }
}

#[cfg(test)]
pub(crate) mod test_clock {
    use crate::clock::Clock;
    use jiff::{SignedDuration, Timestamp};
    use std::sync::{Arc, Mutex};

    /// A manually driven clock. `wait_until` jumps forward instead of
    /// blocking, so the wait paths of the generator run instantly and
    /// deterministically in tests.
    #[derive(Clone, Debug)]
    pub(crate) struct TestClock {
        inner: Arc<Mutex<Timestamp>>,
    }

    impl TestClock {
        pub(crate) fn new(now: Timestamp) -> Self {
            Self {
                inner: Arc::new(Mutex::new(now)),
            }
        }

        /// Shifts the clock by the given amount; negative durations
        /// move it backward (used to simulate an NTP step).
        pub(crate) fn shift(&self, by: SignedDuration) {
            let mut now = self
                .inner
                .lock()
                .expect("test clock lock should not be poisoned");
            *now = *now + by;
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> Timestamp {
            *self
                .inner
                .lock()
                .expect("test clock lock should not be poisoned")
        }

        fn wait_until(&self, target: Timestamp) {
            let mut now = self
                .inner
                .lock()
                .expect("test clock lock should not be poisoned");
            if target > *now {
                *now = target;
            }
        }
    }

    #[test]
    fn wait_until_advances_the_clock() {
        let base = Timestamp::from_millisecond(0).unwrap();
        let clock = TestClock::new(base);
        assert_eq!(clock.now(), base);

        let target = Timestamp::from_millisecond(1_000).unwrap();
        clock.wait_until(target);
        assert_eq!(clock.now(), target);

        // Waiting for a past instant must not move the clock backward.
        clock.wait_until(base);
        assert_eq!(clock.now(), target);
    }

    #[test]
    fn shift_moves_the_clock_both_ways() {
        let clock = TestClock::new(Timestamp::from_millisecond(500).unwrap());
        clock.shift(SignedDuration::from_millis(100));
        assert_eq!(clock.now(), Timestamp::from_millisecond(600).unwrap());
        clock.shift(SignedDuration::from_millis(-200));
        assert_eq!(clock.now(), Timestamp::from_millisecond(400).unwrap());
    }
}
