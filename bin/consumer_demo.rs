//! Opens the shared region written to by `producer_demo`, drains whatever
//! records are available using a simple spin/yield backoff, and reports the
//! final drop count read from the header.
//!
//! Run `producer_demo` first; this binary does not wait for a producer that
//! hasn't started yet, it just drains what's there and stops once a handful
//! of consecutive empty reads suggest the producer is done.

#[path = "support.rs"]
mod support;

use nlnk_ring::{Backoff, Region, RingConfig, SpscRing};

const EMPTY_READS_BEFORE_STOP: u32 = 64;

fn main() -> std::io::Result<()> {
    let config = RingConfig::LOW_LATENCY;
    let path = support::default_path();
    let total_bytes = nlnk_ring::HEADER_BYTES + config.capacity_bytes as usize;

    let mut mmap = support::open_mapping(&path, total_bytes)?;
    let region = unsafe {
        Region::new(mmap.as_mut_ptr(), total_bytes, config.capacity_bytes, config.initialise)
    }
    .expect("consumer_demo: region validation failed");
    let ring = SpscRing::new(region);

    let mut dest = vec![0u8; config.capacity_bytes as usize];
    let mut backoff = Backoff::new();
    let mut received = 0u64;
    let mut empty_reads = 0u32;

    while empty_reads < EMPTY_READS_BEFORE_STOP {
        match ring.try_read(&mut dest) {
            Some(record) => {
                received += 1;
                empty_reads = 0;
                backoff.reset();
                if received % 2_000 == 0 {
                    println!(
                        "consumer_demo: received {received} (last type={} seq={} len={})",
                        record.msg_type, record.sequence, record.length
                    );
                }
            }
            None => {
                empty_reads += 1;
                backoff.snooze();
            }
        }
    }

    println!("consumer_demo: total received {received}");
    println!("consumer_demo: dropped_writes={}", ring.dropped_writes());

    Ok(())
}
