use crate::{ArtifactId, Error, MintStatus, Result, TimeSource};

/// A minimal interface for minting artifact IDs.
///
/// Implementations share one state model: the most recently issued
/// [`ArtifactId`] doubles as the `(last_timestamp, sequence)` pair, with the
/// datacenter and worker bits constant for the generator's lifetime. One
/// generator instance is constructed per process (or logical shard) and
/// passed to whatever component needs IDs; there are no ambient singletons.
pub trait IdGenerator<T>: Sized
where
    T: TimeSource,
{
    /// Creates a generator for the given `(datacenter_id, worker_id)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if either component is outside
    /// `[0, 31]`. Nothing is initialized on failure.
    fn new(datacenter_id: u64, worker_id: u64, time: T) -> Result<Self>;

    /// Attempts to mint the next ID without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockRegression`] if the time source reports a
    /// timestamp earlier than the last issued one. The tolerance is zero;
    /// callers should treat this as a transient fault and retry after the
    /// clock recovers.
    fn try_poll_id(&self) -> Result<MintStatus>;

    /// Mints the next ID, waiting out sequence exhaustion.
    ///
    /// At most 4096 IDs can be issued per millisecond per instance (~4.096M
    /// IDs/s). When the sequence for the current millisecond is exhausted,
    /// this method yields until the clock advances — a bounded wait of under
    /// ~1ms. No lock is held while waiting: every retry is a fresh
    /// [`try_poll_id`] call, so waiters never starve other callers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockRegression`] as described on [`try_poll_id`].
    ///
    /// [`try_poll_id`]: IdGenerator::try_poll_id
    fn next_id(&self) -> Result<ArtifactId> {
        loop {
            match self.try_poll_id()? {
                MintStatus::Ready { id } => return Ok(id),
                MintStatus::Pending { yield_for: 0 } => core::hint::spin_loop(),
                MintStatus::Pending { .. } => std::thread::yield_now(),
            }
        }
    }
}

/// Validates one machine component at construction time.
pub(crate) fn check_component(field: &'static str, value: u64, max: u64) -> Result<()> {
    if value > max {
        return Err(Error::Configuration { field, value, max });
    }
    Ok(())
}
