use crate::ArtifactId;

/// Represents the outcome of a single non-blocking mint attempt.
///
/// - [`MintStatus::Ready`] carries a freshly minted ID.
/// - [`MintStatus::Pending`] means the generator is throttled for the current
///   millisecond (sequence exhausted) or lost a CAS race, and the caller
///   should retry after `yield_for` milliseconds.
///
/// [`IdGenerator::next_id`] folds `Pending` into a bounded wait internally;
/// `try_poll_id` exposes it for non-blocking callers and deterministic tests.
///
/// [`IdGenerator::next_id`]: crate::IdGenerator::next_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The minted ID.
        id: ArtifactId,
    },
    /// No ID could be produced on this attempt.
    Pending {
        /// Milliseconds to wait before retrying. Zero means another thread
        /// won a CAS race and an immediate retry is fine.
        yield_for: u64,
    },
}
