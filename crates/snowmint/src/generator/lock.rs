use core::cmp::Ordering;
use core::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    ArtifactId, Error, IdGenerator, MintStatus, Result, TimeSource,
    generator::interface::check_component,
};

/// A lock-based artifact ID generator for multi-threaded use.
///
/// The generator state lives in an [`Arc<Mutex<_>>`], so clones share one
/// sequence space and the struct can be handed to concurrent callers. The
/// clock read and the read-modify-write of `(last_timestamp, sequence)` both
/// happen under the mutex, which is acquired per attempt and never held
/// across a wait.
///
/// ## Recommended when
/// - Fair access across threads matters
/// - Throughput beyond a few million IDs/s per instance is not required
///
/// ## See also
/// - [`AtomicIdGenerator`], a lock-free alternative
///
/// [`AtomicIdGenerator`]: crate::AtomicIdGenerator
pub struct LockIdGenerator<T>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: Arc<crossbeam_utils::CachePadded<Mutex<ArtifactId>>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Arc<Mutex<ArtifactId>>,
    time: T,
}

impl<T> LockIdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`LockIdGenerator`] for the given machine components.
    ///
    /// The initial timestamp and sequence are zero; the first mint rolls the
    /// state forward to the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `datacenter_id` or `worker_id` is
    /// outside `[0, 31]`.
    ///
    /// # Example
    /// ```
    /// use snowmint::{DEFAULT_EPOCH, IdGenerator, LockIdGenerator, MonotonicClock};
    ///
    /// let generator = LockIdGenerator::new(3, 7, MonotonicClock::with_epoch(DEFAULT_EPOCH))?;
    /// let id = generator.next_id()?;
    /// assert_eq!(id.datacenter_id(), 3);
    /// assert_eq!(id.worker_id(), 7);
    /// # Ok::<(), snowmint::Error>(())
    /// ```
    pub fn new(datacenter_id: u64, worker_id: u64, time: T) -> Result<Self> {
        Self::from_components(0, datacenter_id, worker_id, 0, time)
    }

    /// Creates a generator from explicit component values.
    ///
    /// Useful for restoring state or pinning the starting point in tests.
    /// Prefer [`Self::new`] otherwise: seeding `(timestamp, sequence)` below
    /// values that were already issued by a previous incarnation risks
    /// duplicate IDs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `datacenter_id` or `worker_id` is
    /// outside `[0, 31]`.
    pub fn from_components(
        timestamp: u64,
        datacenter_id: u64,
        worker_id: u64,
        sequence: u64,
        time: T,
    ) -> Result<Self> {
        check_component("datacenter id", datacenter_id, ArtifactId::max_datacenter_id())?;
        check_component("worker id", worker_id, ArtifactId::max_worker_id())?;

        let id = ArtifactId::from_parts(timestamp, datacenter_id, worker_id, sequence);
        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(Mutex::new(id))),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(Mutex::new(id)),
            time,
        })
    }

    /// Attempts to mint the next ID without blocking.
    ///
    /// Returns [`MintStatus::Pending`] with `yield_for: 1` when the sequence
    /// for the current millisecond is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockRegression`] if the time source reports an
    /// earlier timestamp than the last issued one (zero tolerance).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<MintStatus> {
        let mut id = self.state.lock();

        // The clock is read under the lock so reads serialize with installs.
        // A pre-lock read could be stale by the time the lock is acquired and
        // would misreport a racing mint as a regression.
        let now = self.time.current_millis();
        let current_ts = id.timestamp();
        match now.cmp(&current_ts) {
            Ordering::Equal => {
                if id.has_sequence_room() {
                    *id = id.increment_sequence();
                    Ok(MintStatus::Ready { id: *id })
                } else {
                    Ok(MintStatus::Pending { yield_for: 1 })
                }
            }
            Ordering::Greater => {
                *id = id.rollover_to_timestamp(now);
                Ok(MintStatus::Ready { id: *id })
            }
            Ordering::Less => Err(Self::cold_clock_behind(now, current_ts)),
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: u64, last: u64) -> Error {
        Error::ClockRegression { now, last }
    }
}

impl<T> fmt::Debug for LockIdGenerator<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockIdGenerator")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl<T> Clone for LockIdGenerator<T>
where
    T: TimeSource + Clone,
{
    /// Clones share the same generator state and sequence space.
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            time: self.time.clone(),
        }
    }
}

impl<T> IdGenerator<T> for LockIdGenerator<T>
where
    T: TimeSource,
{
    fn new(datacenter_id: u64, worker_id: u64, time: T) -> Result<Self> {
        Self::new(datacenter_id, worker_id, time)
    }

    fn try_poll_id(&self) -> Result<MintStatus> {
        self.try_poll_id()
    }
}
