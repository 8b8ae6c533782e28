use core::cmp;
use core::fmt;

use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    ArtifactId, Error, IdGenerator, MintStatus, Result, TimeSource,
    generator::interface::check_component,
};

/// A lock-free artifact ID generator for multi-threaded use.
///
/// The whole `(last_timestamp, sequence)` state is the raw 64-bit value of
/// the most recently issued ID, held in a single [`AtomicU64`]. Each mint
/// computes the successor ID and installs it with one compare-exchange, so
/// the pair is always updated as one atomic unit. A lost race surfaces as
/// [`MintStatus::Pending`] with `yield_for: 0` and is retried immediately.
///
/// ## Recommended when
/// - Throughput matters more than fair access across threads
///
/// ## See also
/// - [`LockIdGenerator`], a mutex-based alternative
///
/// [`LockIdGenerator`]: crate::LockIdGenerator
pub struct AtomicIdGenerator<T>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU64,
    time: T,
}

impl<T> AtomicIdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`AtomicIdGenerator`] for the given machine components.
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
    /// use snowmint::{AtomicIdGenerator, DEFAULT_EPOCH, IdGenerator, MonotonicClock};
    ///
    /// let generator = AtomicIdGenerator::new(0, 1, MonotonicClock::with_epoch(DEFAULT_EPOCH))?;
    /// let id = generator.next_id()?;
    /// assert_eq!(id.worker_id(), 1);
    /// # Ok::<(), snowmint::Error>(())
    /// ```
    pub fn new(datacenter_id: u64, worker_id: u64, time: T) -> Result<Self> {
        Self::from_components(0, datacenter_id, worker_id, 0, time)
    }

    /// Creates a generator from explicit component values.
    ///
    /// Prefer [`Self::new`] outside of state restoration and tests; see
    /// [`LockIdGenerator::from_components`] for the duplicate-ID caveat.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `datacenter_id` or `worker_id` is
    /// outside `[0, 31]`.
    ///
    /// [`LockIdGenerator::from_components`]: crate::LockIdGenerator::from_components
    pub fn from_components(
        timestamp: u64,
        datacenter_id: u64,
        worker_id: u64,
        sequence: u64,
        time: T,
    ) -> Result<Self> {
        check_component("datacenter id", datacenter_id, ArtifactId::max_datacenter_id())?;
        check_component("worker id", worker_id, ArtifactId::max_worker_id())?;

        let initial = ArtifactId::from_parts(timestamp, datacenter_id, worker_id, sequence);
        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicU64::new(initial.to_raw())),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicU64::new(initial.to_raw()),
            time,
        })
    }

    /// Attempts to mint the next ID without blocking.
    ///
    /// Returns [`MintStatus::Pending`] with `yield_for: 1` when the sequence
    /// for the current millisecond is exhausted, or `yield_for: 0` when
    /// another thread raced ahead (won the compare-exchange, or installed a
    /// newer timestamp between this thread's clock read and state load).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockRegression`] if the time source reports an
    /// earlier timestamp than the last issued one (zero tolerance).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<MintStatus> {
        let now = self.time.current_millis();

        let current_raw = self.state.load(Ordering::Relaxed);
        let current_id = ArtifactId::from_raw(current_raw);
        let current_ts = current_id.timestamp();

        let next_id = match now.cmp(&current_ts) {
            cmp::Ordering::Equal => {
                if current_id.has_sequence_room() {
                    current_id.increment_sequence()
                } else {
                    return Ok(MintStatus::Pending { yield_for: 1 });
                }
            }
            cmp::Ordering::Greater => current_id.rollover_to_timestamp(now),
            cmp::Ordering::Less => {
                // `now` may be stale: another thread can read a newer clock
                // value and install it between our clock read and the state
                // load. Installed timestamps all come from this time source,
                // so only a fresh read that is still behind the state is a
                // real regression.
                let fresh = self.time.current_millis();
                if fresh < current_ts {
                    return Err(Self::cold_clock_behind(fresh, current_ts));
                }
                return Ok(MintStatus::Pending { yield_for: 0 });
            }
        };

        if self
            .state
            .compare_exchange(
                current_raw,
                next_id.to_raw(),
                Ordering::Relaxed,
                Ordering::Relaxed,
            )
            .is_ok()
        {
            Ok(MintStatus::Ready { id: next_id })
        } else {
            // Another thread won the race. Yield 0 to retry immediately.
            Ok(MintStatus::Pending { yield_for: 0 })
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: u64, last: u64) -> Error {
        Error::ClockRegression { now, last }
    }
}

impl<T> fmt::Debug for AtomicIdGenerator<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicIdGenerator")
            .field("state", &ArtifactId::from_raw(self.state.load(Ordering::Relaxed)))
            .finish_non_exhaustive()
    }
}

impl<T> IdGenerator<T> for AtomicIdGenerator<T>
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
