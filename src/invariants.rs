//! Debug-only runtime assertions for the invariants documented in §3.2 and
//! §8.1 of the specification.
//!
//! These are `debug_assert!`-based: zero cost in release builds. They exist
//! to catch protocol bugs during development, not to replace the runtime
//! corruption checks in [`crate::ring::SpscRing`], which run unconditionally
//! and return a typed [`crate::error::CorruptionKind`] instead of panicking
//! silently in release builds.

/// INV-SEQ-01: `0 <= head - tail <= capacity` must hold after every update.
macro_rules! debug_assert_bounded_used {
    ($used:expr, $capacity:expr) => {
        debug_assert!(
            $used >= 0 && $used <= i64::from($capacity),
            "INV-SEQ-01 violated: used {} out of range [0, {}]",
            $used,
            $capacity
        )
    };
}

/// INV-SEQ-02: counters only increase.
macro_rules! debug_assert_monotonic {
    ($name:literal, $old:expr, $new:expr) => {
        debug_assert!(
            $new >= $old,
            "INV-SEQ-02 violated: {} decreased from {} to {}",
            $name,
            $old,
            $new
        )
    };
}

/// INV-REC-01: a committed record never crosses the end of the ring.
macro_rules! debug_assert_record_fits {
    ($total:expr, $rem:expr) => {
        debug_assert!(
            $total <= $rem,
            "INV-REC-01 violated: record of {} bytes does not fit in {} remaining",
            $total,
            $rem
        )
    };
}

pub(crate) use debug_assert_bounded_used;
pub(crate) use debug_assert_monotonic;
pub(crate) use debug_assert_record_fits;
