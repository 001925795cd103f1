//! Exercises `Region`/`SpscRing` over a real file-backed `mmap`, rather than
//! a heap buffer, mirroring how `producer_demo`/`consumer_demo` actually use
//! the crate and how IronSBE's `SharedRingBuffer` tests its own mapping.

use memmap2::MmapOptions;
use tempfile::tempfile;

use nlnk_ring::{Region, RingConfig, SpscRing};

#[test]
fn round_trip_over_a_file_backed_mapping() {
    let config = RingConfig::LOW_LATENCY.with_initialise(true);
    let total_bytes = nlnk_ring::HEADER_BYTES + config.capacity_bytes as usize;

    let file = tempfile().expect("create backing file");
    file.set_len(total_bytes as u64).expect("size backing file");

    let mut mmap = unsafe { MmapOptions::new().map_mut(&file) }.expect("map file");
    let region = unsafe {
        Region::new(mmap.as_mut_ptr(), total_bytes, config.capacity_bytes, config.initialise)
    }
    .expect("region validation");
    let ring = SpscRing::new(region);

    assert!(ring.try_write(&[0xDE, 0xAD, 0xBE, 0xEF], 3, 12345, 0));

    let mut dest = [0u8; 16];
    let rec = ring.try_read(&mut dest).expect("record available");
    assert_eq!(rec.msg_type, 3);
    assert_eq!(rec.timestamp, 12345);
    assert_eq!(rec.sequence, 0);
    assert_eq!(&dest[..4], &[0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn second_attach_to_the_same_mapping_sees_published_state() {
    let config = RingConfig::LOW_LATENCY.with_initialise(true);
    let total_bytes = nlnk_ring::HEADER_BYTES + config.capacity_bytes as usize;

    let file = tempfile().expect("create backing file");
    file.set_len(total_bytes as u64).expect("size backing file");

    let mut producer_mmap = unsafe { MmapOptions::new().map_mut(&file) }.expect("map file");
    let producer_region = unsafe {
        Region::new(
            producer_mmap.as_mut_ptr(),
            total_bytes,
            config.capacity_bytes,
            true,
        )
    }
    .expect("producer region validation");
    let producer_ring = SpscRing::new(producer_region);
    assert!(producer_ring.try_write(b"hello", 1, 1, 1));

    // A second, independent mapping of the same file attaches without
    // re-initialising and observes the record the first mapping published.
    let mut consumer_mmap = unsafe { MmapOptions::new().map_mut(&file) }.expect("map file again");
    let consumer_region = unsafe {
        Region::new(
            consumer_mmap.as_mut_ptr(),
            total_bytes,
            config.capacity_bytes,
            false,
        )
    }
    .expect("consumer region validation");
    let consumer_ring = SpscRing::new(consumer_region);

    let mut dest = [0u8; 16];
    let rec = consumer_ring.try_read(&mut dest).expect("record visible across mappings");
    assert_eq!(&dest[..5], b"hello");
    assert_eq!(rec.sequence, 1);
}
