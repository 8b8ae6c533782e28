use core::time::Duration;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Default epoch: Friday, January 1, 2021 00:00:00 UTC
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_609_459_200_000);

/// A source of millisecond timestamps relative to a configured epoch.
///
/// This abstraction lets generators run against the system clock in
/// production and against deterministic mock clocks in tests (fixed values,
/// forward jumps, regressions).
///
/// The epoch must stay constant for the lifetime of a deployment: changing it
/// after IDs have been issued breaks monotonicity across restarts.
///
/// # Example
///
/// ```
/// use snowmint::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the configured epoch.
    fn current_millis(&self) -> u64;
}

/// A time source that reads the system wall clock on every call.
///
/// Because each call consults [`SystemTime`], external adjustments (NTP step
/// corrections, manual clock changes) are visible to the generator, which
/// reports a backward step as [`Error::ClockRegression`] instead of reusing a
/// stale timestamp.
///
/// If the wall clock reads earlier than the epoch, the reported time clamps
/// to zero.
///
/// [`Error::ClockRegression`]: crate::Error::ClockRegression
#[derive(Clone, Debug)]
pub struct WallClock {
    epoch_ms: u64,
}

impl Default for WallClock {
    /// Constructs a wall clock aligned to [`DEFAULT_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(DEFAULT_EPOCH)
    }
}

impl WallClock {
    /// Constructs a wall clock using a custom epoch as the origin (t = 0),
    /// specified as a [`Duration`] since 1970-01-01 UTC.
    pub const fn with_epoch(epoch: Duration) -> Self {
        Self {
            epoch_ms: epoch.as_millis() as u64,
        }
    }
}

impl TimeSource for WallClock {
    /// Returns the number of milliseconds between the configured epoch and
    /// the current wall-clock time.
    ///
    /// # Panics
    ///
    /// Panics if the system clock reads earlier than the Unix epoch.
    fn current_millis(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System clock before UNIX_EPOCH");
        (now.as_millis() as u64).saturating_sub(self.epoch_ms)
    }
}

/// A monotonic time source that returns elapsed time since construction,
/// offset from a user-defined epoch.
///
/// The wall clock is read once at construction to anchor the offset; from
/// then on the clock advances with [`Instant`], so NTP adjustments and
/// daylight-savings changes cannot move it backward. This makes it the
/// recommended clock for a single long-lived generator: the clock-regression
/// error path becomes unreachable while the process is up.
///
/// The trade-off is that a wall-clock step is not tracked either, so two
/// processes restarted around a large backward step could observe overlapping
/// timestamps. Deployments that need to detect that case should use
/// [`WallClock`].
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    start: Instant,
    epoch_offset: u64, // in milliseconds
}

impl Default for MonotonicClock {
    /// Constructs a monotonic clock aligned to [`DEFAULT_EPOCH`].
    ///
    /// Panics if system time is earlier than the default epoch.
    fn default() -> Self {
        Self::with_epoch(DEFAULT_EPOCH)
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock using a custom epoch as the origin
    /// (t = 0), specified as a [`Duration`] since 1970-01-01 UTC.
    ///
    /// # Panics
    ///
    /// Panics if the current system time is earlier than the given epoch.
    pub fn with_epoch(epoch: Duration) -> Self {
        let start = Instant::now();
        let system_now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System clock before UNIX_EPOCH");
        let offset = system_now
            .checked_sub(epoch)
            .expect("System clock before custom epoch")
            .as_millis() as u64;

        Self {
            start,
            epoch_offset: offset,
        }
    }
}

impl TimeSource for MonotonicClock {
    /// Returns the number of milliseconds since the configured epoch, based
    /// on the elapsed monotonic time since construction.
    fn current_millis(&self) -> u64 {
        self.epoch_offset + self.start.elapsed().as_millis() as u64
    }
}
