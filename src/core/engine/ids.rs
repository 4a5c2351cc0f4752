use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicI64, Ordering},
};

use anyhow::Context;
use time::{Duration, OffsetDateTime};

pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<OffsetDateTime>>,
}

impl ManualClock {
    pub fn new(start: OffsetDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Hands out record ids derived from the clock in milliseconds.
///
/// Ids are strictly increasing for a generator and its clones, so two records
/// created within the same millisecond still get distinct ids.
#[derive(Debug, Clone)]
pub struct IdGenerator<C> {
    clock: C,
    last: Arc<AtomicI64>,
}

impl<C: Clock> IdGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last: Arc::new(AtomicI64::new(0)),
        }
    }

    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    /// Next id, guaranteed to be greater than `floor` and than any id handed out before.
    ///
    /// Fails once no such id fits in an `i64`.
    pub fn next_id(&self, floor: i64) -> anyhow::Result<i64> {
        let stamp = unix_millis(self.clock.now());
        let above_floor = floor
            .checked_add(1)
            .with_context(|| format!("No id left above stored id {floor}"))?;
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let after_last = last
                .checked_add(1)
                .with_context(|| format!("No id left above issued id {last}"))?;
            let candidate = stamp.max(after_last).max(above_floor);
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return Ok(candidate),
                Err(actual) => last = actual,
            }
        }
    }
}

fn unix_millis(at: OffsetDateTime) -> i64 {
    i64::try_from(at.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn same_tick_ids_are_distinct() -> anyhow::Result<()> {
        let ids = IdGenerator::new(ManualClock::new(datetime!(2025-06-01 12:00 UTC)));
        let first = ids.next_id(0)?;
        let second = ids.next_id(0)?;
        assert_eq!(first, 1_748_779_200_000);
        assert_eq!(second, first + 1);
        Ok(())
    }

    #[test]
    fn ids_follow_the_clock() -> anyhow::Result<()> {
        let clock = ManualClock::new(datetime!(2025-06-01 12:00 UTC));
        let ids = IdGenerator::new(clock.clone());
        let first = ids.next_id(0)?;
        clock.advance(Duration::seconds(1));
        assert_eq!(ids.next_id(0)?, first + 1000);
        Ok(())
    }

    #[test]
    fn ids_stay_above_floor() -> anyhow::Result<()> {
        let ids = IdGenerator::new(ManualClock::new(datetime!(1970-01-01 00:00 UTC)));
        assert_eq!(ids.next_id(41)?, 42);
        assert_eq!(ids.next_id(0)?, 43);
        Ok(())
    }

    #[test]
    fn exhausted_id_space_is_an_error() -> anyhow::Result<()> {
        let ids = IdGenerator::new(ManualClock::new(datetime!(2025-06-01 12:00 UTC)));
        assert!(ids.next_id(i64::MAX).is_err());

        assert_eq!(ids.next_id(i64::MAX - 1)?, i64::MAX);
        assert!(ids.next_id(0).is_err(), "Must not repeat the last id");
        Ok(())
    }
}
