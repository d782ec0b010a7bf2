use core::cmp::Ordering;
#[cfg(feature = "tracing")]
use core::sync::atomic::{self, AtomicBool};
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    BitLayout, Error, IdGenStatus, MonotonicClock, Result, Snowflake, SnowflakeParts, TimeSource,
};

/// Mutable generation state, always updated as a pair.
#[derive(Debug)]
struct GeneratorState {
    /// Millisecond of the last issued ID, `-1` before the first one.
    last_timestamp: i64,
    sequence: u64,
}

impl GeneratorState {
    const fn new() -> Self {
        Self {
            last_timestamp: -1,
            sequence: 0,
        }
    }
}

/// A Snowflake ID issuer for one node.
///
/// A node owns a fixed node ID, a fixed [`BitLayout`] and a time source, plus
/// the `(last_timestamp, sequence)` pair that makes its output unique. The
/// pair lives behind a single [`parking_lot::Mutex`], so a `Node` can be
/// shared across threads (e.g. in an `Arc`) and [`Node::generate`] called
/// from all of them.
///
/// Uniqueness across nodes relies on every live node having a distinct node
/// ID; the node does not check this.
///
/// # Example
///
/// ```
/// use std::time::{Duration, SystemTime};
/// use snowmint::Node;
///
/// let epoch = SystemTime::now() - Duration::from_secs(3600);
/// let node = Node::new(7, epoch, 42, 5, 16).unwrap();
///
/// let a = node.generate();
/// let b = node.generate();
/// assert!(a < b);
/// assert_eq!(node.decompose(b).node_id, 7);
/// ```
#[derive(Debug)]
pub struct Node<T: TimeSource = MonotonicClock> {
    node_id: u64,
    layout: BitLayout,
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<GeneratorState>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<GeneratorState>,
    time: T,
    /// Set once the timestamp overflow warning has been emitted.
    #[cfg(feature = "tracing")]
    overflow_reported: AtomicBool,
}

impl Node<MonotonicClock> {
    /// Creates a node driven by a [`MonotonicClock`] anchored at `epoch`.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`Error::BitWidthOverflow`] if the widths do not sum to 63.
    /// - [`Error::NodeOverflow`] if `node_id` does not fit in `node_bits`.
    /// - [`Error::EpochAhead`] if `epoch` is in the future.
    pub fn new(
        node_id: u64,
        epoch: SystemTime,
        timestamp_bits: u8,
        node_bits: u8,
        sequence_bits: u8,
    ) -> Result<Self> {
        let layout = BitLayout::new(timestamp_bits, node_bits, sequence_bits)?;
        check_node_id(node_id, layout)?;
        let clock = MonotonicClock::with_epoch(epoch)?;
        Ok(Self::from_parts(node_id, layout, clock))
    }

    /// The epoch timestamps are measured from.
    pub fn epoch(&self) -> SystemTime {
        self.time.epoch()
    }

    /// Wall-clock time at which `id` was issued, assuming it came from a node
    /// with this epoch and layout.
    ///
    /// Returns `None` if the result is not representable as a [`SystemTime`].
    pub fn timestamp_of(&self, id: Snowflake) -> Option<SystemTime> {
        let millis = self.layout.decompose(id).timestamp;
        self.epoch().checked_add(Duration::from_millis(millis))
    }
}

impl<T: TimeSource> Node<T> {
    /// Creates a node driven by an arbitrary [`TimeSource`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeOverflow`] if `node_id` does not fit in the
    /// layout's node field.
    pub fn with_time_source(node_id: u64, layout: BitLayout, time: T) -> Result<Self> {
        check_node_id(node_id, layout)?;
        Ok(Self::from_parts(node_id, layout, time))
    }

    fn from_parts(node_id: u64, layout: BitLayout, time: T) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            node_id,
            timestamp_bits = layout.timestamp_bits(),
            node_bits = layout.node_bits(),
            sequence_bits = layout.sequence_bits(),
            "snowflake node ready"
        );
        Self {
            node_id,
            layout,
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(Mutex::new(GeneratorState::new())),
            #[cfg(not(feature = "cache-padded"))]
            state: Mutex::new(GeneratorState::new()),
            time,
            #[cfg(feature = "tracing")]
            overflow_reported: AtomicBool::new(false),
        }
    }

    pub fn node_id(&self) -> u64 {
        self.node_id
    }

    pub fn layout(&self) -> BitLayout {
        self.layout
    }

    pub fn time_source(&self) -> &T {
        &self.time
    }

    /// Splits an ID using this node's layout.
    pub fn decompose(&self, id: Snowflake) -> SnowflakeParts {
        self.layout.decompose(id)
    }

    /// Issues the next ID. Never fails.
    ///
    /// Within one millisecond the sequence counts up from zero. Once it has
    /// used all `2^sequence_bits` values, the call spins on the clock, still
    /// holding the node's lock, until the millisecond changes. Other callers
    /// queue behind it, so the wait is bounded by about one millisecond.
    ///
    /// A clock reading that differs from the last one, including one that is
    /// *earlier*, starts a fresh millisecond with sequence zero. A clock that
    /// moves backward can therefore produce an ID smaller than one already
    /// issued, or repeat one. [`MonotonicClock`] never moves backward.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), fields(node_id = self.node_id)))]
    pub fn generate(&self) -> Snowflake {
        let mut state = self.state.lock();
        let now = self.time.current_millis();
        match self.advance(&mut state, now) {
            IdGenStatus::Ready { id } => id,
            IdGenStatus::Pending { .. } => {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    timestamp = state.last_timestamp,
                    "sequence exhausted, waiting for next millisecond"
                );
                let now = self.spin_past(state.last_timestamp);
                self.rollover(&mut state, now)
            }
        }
    }

    /// Attempts to issue the next ID without waiting.
    ///
    /// Performs the same transition as [`Self::generate`], except that an
    /// exhausted sequence returns [`IdGenStatus::Pending`] and leaves the
    /// state untouched.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), fields(node_id = self.node_id)))]
    pub fn poll_generate(&self) -> IdGenStatus {
        let mut state = self.state.lock();
        let now = self.time.current_millis();
        self.advance(&mut state, now)
    }

    fn advance(&self, state: &mut GeneratorState, now: i64) -> IdGenStatus {
        match now.cmp(&state.last_timestamp) {
            Ordering::Equal => {
                if state.sequence < self.layout.max_sequence() {
                    state.sequence += 1;
                    IdGenStatus::Ready {
                        id: self.compose(now, state.sequence),
                    }
                } else {
                    IdGenStatus::Pending { yield_for: 1 }
                }
            }
            Ordering::Greater => IdGenStatus::Ready {
                id: self.rollover(state, now),
            },
            Ordering::Less => IdGenStatus::Ready {
                id: self.cold_clock_behind(state, now),
            },
        }
    }

    /// Starts a new millisecond at `now`.
    fn rollover(&self, state: &mut GeneratorState, now: i64) -> Snowflake {
        state.last_timestamp = now;
        state.sequence = 0;
        self.compose(now, 0)
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(&self, state: &mut GeneratorState, now: i64) -> Snowflake {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            node_id = self.node_id,
            now,
            last_timestamp = state.last_timestamp,
            "clock moved backward, resetting sequence"
        );
        self.rollover(state, now)
    }

    /// Re-reads the clock without sleeping until it leaves `last`.
    fn spin_past(&self, last: i64) -> i64 {
        loop {
            let now = self.time.current_millis();
            if now != last {
                return now;
            }
            core::hint::spin_loop();
        }
    }

    fn compose(&self, now: i64, sequence: u64) -> Snowflake {
        let timestamp = u64::try_from(now).unwrap_or(0);
        if timestamp > self.layout.max_timestamp() {
            self.cold_timestamp_overflow(timestamp);
        }
        self.layout.compose(timestamp, self.node_id, sequence)
    }

    #[cold]
    #[inline(never)]
    fn cold_timestamp_overflow(&self, timestamp: u64) {
        // Reported once per node; every later ID overflows too.
        #[cfg(feature = "tracing")]
        if !self.overflow_reported.swap(true, atomic::Ordering::Relaxed) {
            tracing::warn!(
                node_id = self.node_id,
                timestamp,
                max_timestamp = self.layout.max_timestamp(),
                "timestamp no longer fits the layout, wrapping"
            );
        }
        #[cfg(not(feature = "tracing"))]
        let _ = timestamp;
    }
}

fn check_node_id(node_id: u64, layout: BitLayout) -> Result<()> {
    let max_node_id = layout.max_node_id();
    if node_id > max_node_id {
        return Err(Error::NodeOverflow {
            node_id,
            node_bits: layout.node_bits(),
            max_node_id,
        });
    }
    Ok(())
}
