//! A single-producer/single-consumer variable-size byte ring, stored in a
//! caller-supplied shared-memory region, for low-latency framed-message
//! streaming between processes.
//!
//! # Layout
//!
//! A region is a fixed [`layout::HEADER_BYTES`]-byte header (three
//! cache-line-separated monotonic counters: `head_bytes`, `tail_bytes`,
//! `dropped_writes`) followed immediately by `capacity_bytes` of ring bytes.
//! [`Region::new`] binds to caller-owned memory of any origin — an mmap'd
//! file, an anonymous shared mapping, a plain heap buffer in tests — and
//! validates or initialises the header. [`SpscRing`] then layers the
//! producer/consumer protocol on top: variable-size records framed by a
//! 24-byte header, two-phase commit for safe concurrent publication, and a
//! drop-newest admission policy when the ring is full.
//!
//! # What this crate doesn't do
//!
//! It does not allocate or map memory itself, does not block or sleep
//! (callers poll and back off on their own terms — see [`Backoff`]), and
//! does not log. A region's layout must not change across a version bump
//! without also bumping [`layout::VERSION`].

mod backoff;
mod config;
mod error;
mod invariants;
mod layout;
mod region;
mod ring;

pub use backoff::Backoff;
pub use config::RingConfig;
pub use error::{CorruptionKind, RegionError};
pub use layout::{CACHE_LINE, HEADER_BYTES, MAGIC, MAX_CAPACITY, MIN_CAPACITY, RECORD_HEADER_BYTES, VERSION};
pub use region::{Region, RegionHeader};
pub use ring::{ReadRecord, SpscRing};
