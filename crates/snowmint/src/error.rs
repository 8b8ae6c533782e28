pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `snowmint` can emit.
///
/// Configuration problems are only reported at construction time and a
/// generator is never partially initialized. [`Error::ClockRegression`] is the
/// single runtime failure: it signals a transient infrastructure fault (e.g.
/// an NTP step correction), and callers may retry once the clock has caught
/// back up to the generator's last issued timestamp.
#[derive(Clone, Copy, thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A generator component was configured outside its valid range.
    #[error("{field} {value} is out of range [0, {max}]")]
    Configuration {
        /// Which component was rejected (e.g. `"datacenter id"`).
        field: &'static str,
        /// The rejected value.
        value: u64,
        /// The largest accepted value for this component.
        max: u64,
    },

    /// The time source reported a timestamp earlier than the one used for the
    /// most recently issued ID.
    ///
    /// Reusing a past timestamp risks minting a duplicate ID, so generation
    /// fails instead. Tolerance is zero: any backward step is rejected.
    #[error("clock moved backward: now {now}ms is earlier than last issued {last}ms")]
    ClockRegression {
        /// The timestamp reported by the time source, in ms since the epoch.
        now: u64,
        /// The timestamp of the most recently issued ID.
        last: u64,
    },
}
