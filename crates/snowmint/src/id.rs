use core::fmt;

/// A 64-bit artifact identifier.
///
/// - 1 bit reserved (always zero, so the ID fits a non-negative `i64`)
/// - 41 bits timestamp (ms since the configured epoch, e.g. [`DEFAULT_EPOCH`])
/// - 5 bits datacenter ID
/// - 5 bits worker ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21       17 16     12 11             0
///              +--------------+----------------+-----------+---------+---------------+
///  Field:      | reserved (1) | timestamp (41) | dc ID (5) | wID (5) | sequence (12) |
///              +--------------+----------------+-----------+---------+---------------+
///              |<------------ MSB ----------- 64 bits ------------ LSB ------------->|
/// ```
///
/// IDs order exactly like their raw `u64` representation, so for one
/// generator instance later IDs always compare greater than earlier ones.
///
/// [`DEFAULT_EPOCH`]: crate::DEFAULT_EPOCH
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactId {
    id: u64,
}

impl ArtifactId {
    /// Bitmask for extracting the 41-bit timestamp field. Occupies bits 22
    /// through 62.
    pub const TIMESTAMP_MASK: u64 = (1 << 41) - 1;

    /// Bitmask for extracting the 5-bit datacenter ID field. Occupies bits 17
    /// through 21.
    pub const DATACENTER_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 5-bit worker ID field. Occupies bits 12
    /// through 16.
    pub const WORKER_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << 12) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: u64 = 22;

    /// Number of bits to shift the datacenter ID to its correct position
    /// (bit 17).
    pub const DATACENTER_ID_SHIFT: u64 = 17;

    /// Number of bits to shift the worker ID to its correct position (bit 12).
    pub const WORKER_ID_SHIFT: u64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u64 = 0;

    /// Packs the four components into an ID.
    ///
    /// Each component is masked to its field width before shifting, so
    /// oversized inputs wrap rather than corrupt neighboring fields. Range
    /// validation belongs to the generator constructors.
    ///
    /// # Example
    /// ```
    /// use snowmint::ArtifactId;
    ///
    /// let id = ArtifactId::from_parts(100, 1, 2, 3);
    /// assert_eq!(id.timestamp(), 100);
    /// assert_eq!(id.datacenter_id(), 1);
    /// assert_eq!(id.worker_id(), 2);
    /// assert_eq!(id.sequence(), 3);
    /// ```
    pub const fn from_parts(
        timestamp: u64,
        datacenter_id: u64,
        worker_id: u64,
        sequence: u64,
    ) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let datacenter_id = (datacenter_id & Self::DATACENTER_ID_MASK) << Self::DATACENTER_ID_SHIFT;
        let worker_id = (worker_id & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | datacenter_id | worker_id | sequence,
        }
    }

    /// Extracts the timestamp from the packed ID.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the datacenter ID from the packed ID.
    pub const fn datacenter_id(&self) -> u64 {
        (self.id >> Self::DATACENTER_ID_SHIFT) & Self::DATACENTER_ID_MASK
    }

    /// Extracts the worker ID from the packed ID.
    pub const fn worker_id(&self) -> u64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns the maximum possible value for the timestamp field.
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    /// Returns the maximum possible value for the datacenter ID field.
    pub const fn max_datacenter_id() -> u64 {
        Self::DATACENTER_ID_MASK
    }

    /// Returns the maximum possible value for the worker ID field.
    pub const fn max_worker_id() -> u64 {
        Self::WORKER_ID_MASK
    }

    /// Returns the maximum possible value for the sequence field.
    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    /// Converts this ID into its raw `u64` representation.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Converts a raw `u64` into an ID.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns true if the current sequence value can be incremented without
    /// overflowing its 12-bit field.
    pub const fn has_sequence_room(&self) -> bool {
        self.sequence() < Self::max_sequence()
    }

    /// Returns a new ID with the sequence incremented and all other fields
    /// unchanged.
    pub const fn increment_sequence(&self) -> Self {
        Self::from_parts(
            self.timestamp(),
            self.datacenter_id(),
            self.worker_id(),
            self.sequence() + 1,
        )
    }

    /// Returns a new ID for a newer timestamp with the sequence reset to zero.
    pub const fn rollover_to_timestamp(&self, timestamp: u64) -> Self {
        Self::from_parts(timestamp, self.datacenter_id(), self.worker_id(), 0)
    }

    /// Returns the ID as a zero-padded 20-digit decimal string.
    ///
    /// Callers that persist IDs as text (the common case for this layout) can
    /// rely on the padded form sorting lexicographically in issue order.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactId")
            .field("timestamp", &self.timestamp())
            .field("datacenter_id", &self.datacenter_id())
            .field("worker_id", &self.worker_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_machine_combinations_roundtrip() {
        for datacenter_id in 0..=ArtifactId::max_datacenter_id() {
            for worker_id in 0..=ArtifactId::max_worker_id() {
                let id = ArtifactId::from_parts(123_456, datacenter_id, worker_id, 42);
                assert_eq!(id.timestamp(), 123_456);
                assert_eq!(id.datacenter_id(), datacenter_id);
                assert_eq!(id.worker_id(), worker_id);
                assert_eq!(id.sequence(), 42);
            }
        }
    }

    #[test]
    fn packing_matches_documented_layout() {
        let id = ArtifactId::from_parts(100, 1, 1, 2);
        assert_eq!(id.to_raw(), (100 << 22) | (1 << 17) | (1 << 12) | 2);
    }

    #[test]
    fn reserved_bit_stays_zero_at_field_maximums() {
        let id = ArtifactId::from_parts(
            ArtifactId::max_timestamp(),
            ArtifactId::max_datacenter_id(),
            ArtifactId::max_worker_id(),
            ArtifactId::max_sequence(),
        );
        assert_eq!(id.to_raw() >> 63, 0);
        assert!(i64::try_from(id.to_raw()).is_ok());
    }

    #[test]
    fn oversized_components_are_masked() {
        let id = ArtifactId::from_parts(0, 32, 33, 4096);
        assert_eq!(id.datacenter_id(), 0);
        assert_eq!(id.worker_id(), 1);
        assert_eq!(id.sequence(), 0);
    }

    #[test]
    fn ordering_follows_raw_value() {
        let a = ArtifactId::from_parts(100, 1, 1, 0);
        let b = ArtifactId::from_parts(100, 1, 1, 1);
        let c = ArtifactId::from_parts(101, 1, 1, 0);
        assert!(a < b && b < c);
        assert!(a.to_raw() < b.to_raw() && b.to_raw() < c.to_raw());
    }

    #[test]
    fn sequence_room_and_increment() {
        let id = ArtifactId::from_parts(7, 3, 4, ArtifactId::max_sequence() - 1);
        assert!(id.has_sequence_room());
        let next = id.increment_sequence();
        assert_eq!(next.sequence(), ArtifactId::max_sequence());
        assert!(!next.has_sequence_room());
    }

    #[test]
    fn rollover_resets_sequence_and_keeps_machine_bits() {
        let id = ArtifactId::from_parts(7, 3, 4, 99);
        let rolled = id.rollover_to_timestamp(8);
        assert_eq!(rolled.timestamp(), 8);
        assert_eq!(rolled.datacenter_id(), 3);
        assert_eq!(rolled.worker_id(), 4);
        assert_eq!(rolled.sequence(), 0);
    }

    #[test]
    fn padded_string_is_twenty_digits() {
        let id = ArtifactId::from_raw(42);
        assert_eq!(id.to_padded_string(), "00000000000000000042");
        assert_eq!(id.to_padded_string().len(), 20);

        let max = ArtifactId::from_raw(u64::MAX >> 1);
        assert_eq!(max.to_padded_string().len(), 20);
    }

    #[test]
    fn display_is_plain_decimal() {
        let id = ArtifactId::from_raw(1_234_567);
        assert_eq!(id.to_string(), "1234567");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let id = ArtifactId::from_parts(100, 1, 1, 2);
        let json = serde_json::to_string(&id).expect("serialize");
        let back: ArtifactId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
