//! The SPSC ring protocol: `try_write` and `try_read` over the byte ring.
//!
//! This is where the admission check, offset computation, wrap-marker
//! insertion, two-phase commit, and ordered publication described in §4.3
//! live. Everything above the `length` field's two release-stores and the
//! two `head_bytes`/`tail_bytes` acquire-loads is plain memory traffic —
//! those four operations are the entire cross-thread contract.

use std::sync::atomic::{AtomicI32, Ordering};

use crate::error::CorruptionKind;
use crate::invariants::{debug_assert_bounded_used, debug_assert_monotonic, debug_assert_record_fits};
use crate::layout::{self, record, RECORD_HEADER_BYTES, WRAP_MARKER};
use crate::region::Region;

/// Metadata and payload length of a record returned by [`SpscRing::try_read`].
///
/// The payload itself is copied into the caller-supplied `dest` buffer; this
/// struct carries everything else the producer attached to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRecord {
    /// Caller-defined message type tag.
    pub msg_type: i32,
    /// Caller-supplied 64-bit timestamp.
    pub timestamp: i64,
    /// Caller-supplied sequence number.
    pub sequence: i32,
    /// Payload length in bytes, and the number of bytes written into `dest`.
    pub length: usize,
}

/// A lock-free SPSC byte ring bound to a validated [`Region`].
///
/// At most one thread may call [`Self::try_write`] and at most one thread
/// may call [`Self::try_read`] over the lifetime of the ring; this is a
/// caller contract (§5), not something the type system or the ring itself
/// enforces.
pub struct SpscRing {
    region: Region,
}

impl SpscRing {
    /// Wraps a validated region with the SPSC ring protocol.
    #[must_use]
    pub fn new(region: Region) -> Self {
        Self { region }
    }

    /// Returns the ring capacity in bytes.
    #[inline]
    #[must_use]
    pub fn capacity_bytes(&self) -> u32 {
        self.region.capacity_bytes()
    }

    /// Current count of bytes ever published by the producer.
    #[inline]
    #[must_use]
    pub fn head_bytes(&self) -> u64 {
        self.region.header().head_bytes(Ordering::Acquire)
    }

    /// Current count of bytes ever consumed by the consumer.
    #[inline]
    #[must_use]
    pub fn tail_bytes(&self) -> u64 {
        self.region.header().tail_bytes(Ordering::Acquire)
    }

    /// Current count of admission failures (drop-newest policy).
    #[inline]
    #[must_use]
    pub fn dropped_writes(&self) -> u64 {
        self.region.header().dropped_writes(Ordering::Relaxed)
    }

    /// Attempts to append one framed record.
    ///
    /// Returns `false` (and increments [`Self::dropped_writes`]) if the ring
    /// doesn't currently have room — the drop-newest admission policy; the
    /// already-queued records are left untouched. This is the only
    /// non-fatal, caller-retryable outcome.
    ///
    /// # Panics
    ///
    /// Panics if `payload` is empty, if the framed record would exceed half
    /// the ring capacity, or if a runtime invariant check observes the
    /// region to be corrupt. These are programming errors or unrecoverable
    /// region states, not conditions a caller can usefully retry (§7).
    pub fn try_write(&self, payload: &[u8], msg_type: i32, timestamp: i64, sequence: i32) -> bool {
        assert!(!payload.is_empty(), "nlnk-ring: payload must not be empty");

        let capacity = self.capacity_bytes();
        let total = layout::align_up_8(RECORD_HEADER_BYTES + payload.len());
        assert!(
            total <= capacity as usize / 2,
            "nlnk-ring: record of {total} bytes exceeds half capacity ({} bytes)",
            capacity / 2
        );

        let header = self.region.header();

        // Plain load: the producer is the sole writer of head_bytes.
        let mut head = header.head_bytes(Ordering::Relaxed);
        let tail = header.tail_bytes(Ordering::Acquire);
        let used = head as i64 - tail as i64;
        if used < 0 || used > i64::from(capacity) {
            fail_corrupt(CorruptionKind::UsedOutOfRange { used, capacity });
        }
        debug_assert_bounded_used!(used, capacity);

        if i64::from(capacity) - used < total as i64 {
            header.dropped_writes.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let mut off = layout::offset(capacity, head);
        let mut rem = u64::from(capacity) - off;

        if rem < RECORD_HEADER_BYTES as u64 {
            // Header doesn't fit before the end of the ring: pad and wrap,
            // no marker needed since no header can live in the padding.
            let new_head = head + rem;
            debug_assert_monotonic!("head_bytes", head, new_head);
            header.head_bytes.store(new_head, Ordering::Release);
            head = new_head;
            off = 0;
            rem = u64::from(capacity);
        }

        if rem < total as u64 {
            // Record doesn't fit: publish a wrap marker consuming the slack,
            // then retry at offset 0.
            // SAFETY: `off` is within the ring and rem >= RECORD_HEADER_BYTES,
            // checked above (the header-pad branch guarantees this when it
            // runs; otherwise rem was already >= RECORD_HEADER_BYTES).
            let rec_ptr = unsafe { self.region.ring_base().add(off as usize) };
            unsafe { write_record_fields(rec_ptr, 0, 0, 0) };
            store_length(rec_ptr, WRAP_MARKER, Ordering::Release);

            let new_head = head + rem;
            debug_assert_monotonic!("head_bytes", head, new_head);
            header.head_bytes.store(new_head, Ordering::Release);
            head = new_head;
            off = 0;
            rem = u64::from(capacity);

            // Re-check admission: the wrap consumed ring space, and the
            // consumer may have advanced tail_bytes concurrently.
            let tail2 = header.tail_bytes(Ordering::Acquire);
            let used2 = head as i64 - tail2 as i64;
            if i64::from(capacity) - used2 < total as i64 {
                header.dropped_writes.fetch_add(1, Ordering::Relaxed);
                return false;
            }
        }

        debug_assert_record_fits!(total as u64, rem);

        // SAFETY: off is within the ring and at least `total` bytes remain
        // before the end, established above.
        let rec_ptr = unsafe { self.region.ring_base().add(off as usize) };

        // Two-phase commit: plain field writes, then reserve with a
        // negative length, copy the payload, then commit with a positive
        // length. The two release-stores (here and on head_bytes below) are
        // the entire producer -> consumer handoff (§4.3.1).
        unsafe { write_record_fields(rec_ptr, msg_type, timestamp, sequence) };
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        store_length(rec_ptr, -(payload.len() as i32), Ordering::Release);
        unsafe {
            std::ptr::copy_nonoverlapping(payload.as_ptr(), rec_ptr.add(RECORD_HEADER_BYTES), payload.len());
        }
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        store_length(rec_ptr, payload.len() as i32, Ordering::Release);

        let new_head = head + total as u64;
        debug_assert_monotonic!("head_bytes", head, new_head);
        header.head_bytes.store(new_head, Ordering::Release);

        true
    }

    /// Attempts to read the next framed record into `dest`.
    ///
    /// Returns `None` if the ring is currently empty, if the next record is
    /// not yet committed, or if `dest` is too small to hold the payload — in
    /// the last case `tail_bytes` is left unchanged and the record remains
    /// available for a retry with a larger buffer. `None` also covers the
    /// header-padding and wrap-marker skip advancements, which mutate
    /// `tail_bytes` but carry no data for the caller.
    ///
    /// # Panics
    ///
    /// Panics if a runtime invariant check observes the region to be
    /// corrupt: a committed record with `length == 0`, or a record whose
    /// total size crosses the end of the ring without a wrap marker.
    pub fn try_read(&self, dest: &mut [u8]) -> Option<ReadRecord> {
        let header = self.region.header();
        let capacity = self.capacity_bytes();

        // Plain load: the consumer is the sole writer of tail_bytes.
        let tail = header.tail_bytes(Ordering::Relaxed);
        let head = header.head_bytes(Ordering::Acquire);
        if tail == head {
            return None;
        }

        let off = layout::offset(capacity, tail);
        let rem = u64::from(capacity) - off;

        if rem < RECORD_HEADER_BYTES as u64 {
            header.tail_bytes.store(tail + rem, Ordering::Release);
            return None;
        }

        // SAFETY: off is within the ring and at least RECORD_HEADER_BYTES
        // bytes remain before the end, checked above.
        let rec_ptr = unsafe { self.region.ring_base().add(off as usize) };
        let length = load_length(rec_ptr, Ordering::Acquire);

        if length == WRAP_MARKER {
            header.tail_bytes.store(tail + rem, Ordering::Release);
            return None;
        }
        if length < 0 {
            // Producer has reserved but not yet committed this record.
            return None;
        }
        if length == 0 {
            fail_corrupt(CorruptionKind::ZeroLength { offset: tail });
        }

        #[allow(clippy::cast_sign_loss)]
        let total = layout::align_up_8(RECORD_HEADER_BYTES + length as usize);
        if total as u64 > rem {
            fail_corrupt(CorruptionKind::RecordCrossesEnd {
                offset: tail,
                total,
                remaining: rem,
            });
        }

        #[allow(clippy::cast_sign_loss)]
        if length as usize > dest.len() {
            return None;
        }

        // SAFETY: record fields were published via the two release-stores
        // of try_write; the acquire-load of `length` above synchronises
        // with them, so these plain reads observe fully-written data.
        let msg_type = unsafe { rec_ptr.add(record::TYPE).cast::<i32>().read() };
        let timestamp = unsafe { rec_ptr.add(record::TIMESTAMP).cast::<i64>().read() };
        let sequence = unsafe { rec_ptr.add(record::SEQUENCE).cast::<i32>().read() };

        #[allow(clippy::cast_sign_loss)]
        let payload_len = length as usize;
        unsafe {
            std::ptr::copy_nonoverlapping(
                rec_ptr.add(RECORD_HEADER_BYTES),
                dest.as_mut_ptr(),
                payload_len,
            );
        }

        let new_tail = tail + total as u64;
        debug_assert_monotonic!("tail_bytes", tail, new_tail);
        header.tail_bytes.store(new_tail, Ordering::Release);

        Some(ReadRecord {
            msg_type,
            timestamp,
            sequence,
            length: payload_len,
        })
    }
}

#[inline]
fn fail_corrupt(kind: CorruptionKind) -> ! {
    panic!("nlnk-ring: corrupt region: {kind}");
}

/// Writes the non-length record header fields with plain stores.
///
/// # Safety
///
/// `record_ptr` must point to a valid, writable, 8-byte-aligned record slot
/// within the ring, with at least `RECORD_HEADER_BYTES` bytes available.
unsafe fn write_record_fields(record_ptr: *mut u8, msg_type: i32, timestamp: i64, sequence: i32) {
    unsafe {
        record_ptr.add(record::TYPE).cast::<i32>().write(msg_type);
        record_ptr.add(record::TIMESTAMP).cast::<i64>().write(timestamp);
        record_ptr.add(record::SEQUENCE).cast::<i32>().write(sequence);
        record_ptr.add(record::RESERVED).cast::<i32>().write(0);
    }
}

/// Views a record's `length` field as an atomic for ordered access.
///
/// # Safety
///
/// `record_ptr` must be 4-byte aligned and point into memory valid for the
/// lifetime of the ring; `AtomicI32` has the same layout as `i32`, so this
/// reinterpretation is sound as long as all accesses to this field go
/// through this helper (which they do — see `store_length`/`load_length`).
#[inline]
unsafe fn length_atomic<'a>(record_ptr: *mut u8) -> &'a AtomicI32 {
    unsafe { &*record_ptr.add(record::LENGTH).cast::<AtomicI32>() }
}

#[inline]
fn store_length(record_ptr: *mut u8, value: i32, order: Ordering) {
    // SAFETY: see `length_atomic`.
    unsafe { length_atomic(record_ptr) }.store(value, order);
}

#[inline]
fn load_length(record_ptr: *mut u8, order: Ordering) -> i32 {
    // SAFETY: see `length_atomic`.
    unsafe { length_atomic(record_ptr) }.load(order)
}
