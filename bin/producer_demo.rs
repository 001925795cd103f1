//! Writes a fixed run of framed records into a file-backed shared region and
//! reports how many were admitted versus dropped.
//!
//! No CLI flags, no rate pacing: real argument parsing and pacing belong to
//! a production harness, not this demo (see §1's scope boundary).

#[path = "support.rs"]
mod support;

use nlnk_ring::{Region, RingConfig, SpscRing};

const RECORD_COUNT: u32 = 10_000;
const PAYLOAD_LEN: usize = 64;

fn main() -> std::io::Result<()> {
    let config = RingConfig::LOW_LATENCY.with_initialise(true);
    let path = support::default_path();
    let total_bytes = nlnk_ring::HEADER_BYTES + config.capacity_bytes as usize;

    let mut mmap = support::open_mapping(&path, total_bytes)?;
    let region = unsafe {
        Region::new(mmap.as_mut_ptr(), total_bytes, config.capacity_bytes, config.initialise)
    }
    .expect("producer_demo: region validation failed");
    let ring = SpscRing::new(region);

    let payload = vec![0xABu8; PAYLOAD_LEN];
    let mut admitted = 0u32;
    let mut dropped = 0u32;

    for sequence in 0..RECORD_COUNT {
        let timestamp = i64::from(sequence) * 1000;
        if ring.try_write(&payload, 1, timestamp, sequence as i32) {
            admitted += 1;
        } else {
            dropped += 1;
        }
    }

    println!("producer_demo: mapped {} at {:?}", total_bytes, path);
    println!("producer_demo: admitted {admitted}, dropped {dropped}");
    println!(
        "producer_demo: head_bytes={} dropped_writes={}",
        ring.head_bytes(),
        ring.dropped_writes()
    );

    Ok(())
}
