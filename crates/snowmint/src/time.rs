use std::{
    sync::Arc,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use crate::{Error, Result};

/// Custom epoch: Wednesday, January 1, 2025 00:00:00 UTC
pub const CUSTOM_EPOCH: Duration = Duration::from_millis(1_735_689_600_000);

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// A source of whole milliseconds elapsed since some epoch.
///
/// [`Node`] reads this on every generation. Production code uses
/// [`MonotonicClock`]; tests plug in scripted clocks.
///
/// The value should never decrease. If it does, the node does not correct
/// for it (see [`Node::generate`]).
///
/// # Example
///
/// ```
/// use snowmint::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1234);
/// ```
///
/// [`Node`]: crate::Node
/// [`Node::generate`]: crate::Node::generate
pub trait TimeSource {
    /// Returns the current time in milliseconds since the configured epoch.
    fn current_millis(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

/// A time source that never moves backward.
///
/// The distance between the epoch and the wall clock is captured once at
/// construction. Every read adds the time elapsed on a monotonic [`Instant`],
/// so NTP steps or manual clock changes after construction do not affect the
/// returned values.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    epoch: SystemTime,
    start: Instant,
    offset: Duration,
}

impl MonotonicClock {
    /// Builds a clock whose zero point is `epoch`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EpochAhead`] if `epoch` is later than the current
    /// system time.
    pub fn with_epoch(epoch: SystemTime) -> Result<Self> {
        let start = Instant::now();
        let offset = SystemTime::now()
            .duration_since(epoch)
            .map_err(|e| Error::EpochAhead {
                ahead_by: e.duration(),
            })?;
        Ok(Self {
            epoch,
            start,
            offset,
        })
    }

    /// Builds a clock whose zero point is `epoch` after the Unix epoch, e.g.
    /// [`TWITTER_EPOCH`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::EpochAhead`] if the epoch is later than the current
    /// system time.
    pub fn with_unix_offset(epoch: Duration) -> Result<Self> {
        let epoch = UNIX_EPOCH
            .checked_add(epoch)
            .ok_or(Error::EpochAhead { ahead_by: epoch })?;
        Self::with_epoch(epoch)
    }

    /// The zero point of this clock.
    pub fn epoch(&self) -> SystemTime {
        self.epoch
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> i64 {
        let elapsed = self.offset.saturating_add(self.start.elapsed());
        i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
    }
}
