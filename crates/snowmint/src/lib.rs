//! Snowflake-style 64-bit ID minting.
//!
//! `snowmint` produces unique, time-ordered integer identifiers without any
//! runtime coordination: uniqueness across processes comes solely from
//! assigning each generator instance a distinct `(datacenter_id, worker_id)`
//! pair at deployment time.
//!
//! Every ID packs four fields into a single `u64` (MSB to LSB):
//!
//! ```text
//!  Bit Index:  63           63 62            22 21       17 16     12 11             0
//!              +--------------+----------------+-----------+---------+---------------+
//!  Field:      | reserved (1) | timestamp (41) | dc ID (5) | wID (5) | sequence (12) |
//!              +--------------+----------------+-----------+---------+---------------+
//!              |<------------ MSB ----------- 64 bits ------------ LSB ------------->|
//! ```
//!
//! The timestamp is measured in milliseconds since a fixed epoch, so a single
//! deployment has roughly 69 years of range. The reserved top bit stays zero,
//! which means every ID also fits a non-negative `i64`.
//!
//! Two generators are provided, both safe for concurrent callers:
//!
//! - [`LockIdGenerator`] guards its state with a [`parking_lot::Mutex`].
//! - [`AtomicIdGenerator`] packs its whole state into one `AtomicU64` and
//!   retries on a lost CAS.
//!
//! The wall clock is abstracted behind [`TimeSource`], so tests can drive
//! generation with a deterministic clock. A clock observed running backward
//! is a hard error ([`Error::ClockRegression`]), never a silently reused
//! timestamp.
//!
//! # Example
//!
//! ```
//! use snowmint::{DEFAULT_EPOCH, IdGenerator, LockIdGenerator, MonotonicClock};
//!
//! let generator = LockIdGenerator::new(1, 1, MonotonicClock::with_epoch(DEFAULT_EPOCH))?;
//!
//! let id = generator.next_id()?;
//! assert_eq!(id.datacenter_id(), 1);
//! assert_eq!(id.worker_id(), 1);
//! # Ok::<(), snowmint::Error>(())
//! ```

mod error;
mod generator;
mod id;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::time::*;
