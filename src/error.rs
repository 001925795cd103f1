//! Error types for region construction and runtime invariant violations.

use thiserror::Error;

/// Errors that can occur while validating or initialising a shared region.
///
/// All variants here are construction-time configuration errors (§7 of the
/// spec): fatal, not recoverable by retrying the same call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegionError {
    /// `capacity_bytes` is not a power of two, or falls outside
    /// `[MIN_CAPACITY, MAX_CAPACITY]`.
    #[error("invalid ring capacity {capacity} (must be a power of two in [{min}, {max}])")]
    InvalidCapacity {
        capacity: u32,
        min: u32,
        max: u32,
    },

    /// The caller-supplied region is smaller than `HEADER_BYTES + capacity_bytes`.
    #[error("region too small: need at least {required} bytes, got {actual}")]
    RegionTooSmall { required: usize, actual: usize },

    /// The header's `magic` field does not match [`crate::layout::MAGIC`].
    #[error("bad magic: expected {expected:#010x}, found {found:#010x}")]
    BadMagic { expected: u32, found: u32 },

    /// The header's `version` field does not match [`crate::layout::VERSION`].
    #[error("unsupported version: expected {expected}, found {found}")]
    UnsupportedVersion { expected: u32, found: u32 },

    /// The header's `capacity_bytes` field does not match the caller's expectation.
    #[error("capacity mismatch: region has {found}, caller expects {expected}")]
    CapacityMismatch { expected: u32, found: u32 },
}

/// Named runtime invariants that [`crate::ring::SpscRing`] checks on every
/// `try_write`/`try_read`. Surfacing *which* invariant failed (rather than a
/// single opaque "corrupt" bit) is what separates this from the admission and
/// buffer-sizing outcomes, which are ordinary, expected results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CorruptionKind {
    /// `head_bytes - tail_bytes` observed outside `[0, capacity_bytes]`.
    #[error("used byte count {used} out of range [0, {capacity}]")]
    UsedOutOfRange { used: i64, capacity: u32 },

    /// A committed record reported `length == 0`.
    #[error("record at offset {offset} has invalid length 0")]
    ZeroLength { offset: u64 },

    /// A record's total size exceeds the remaining bytes before the end of
    /// the ring, without a wrap marker to account for it.
    #[error("record at offset {offset} (total {total}) crosses ring end ({remaining} bytes remain) without a wrap marker")]
    RecordCrossesEnd {
        offset: u64,
        total: usize,
        remaining: u64,
    },
}
