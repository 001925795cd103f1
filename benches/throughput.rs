use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nlnk_ring::{HEADER_BYTES, Region, SpscRing};

const MSG_COUNT: u64 = 1_000_000;

fn heap_ring(capacity_bytes: u32) -> (SpscRing, Box<[u8]>) {
    let total = HEADER_BYTES + capacity_bytes as usize;
    let mut buf = vec![0u8; total].into_boxed_slice();
    let region = unsafe { Region::new(buf.as_mut_ptr(), total, capacity_bytes, true) }.unwrap();
    (SpscRing::new(region), buf)
}

fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip");
    group.throughput(Throughput::Elements(MSG_COUNT));

    for payload_len in [16usize, 64, 256] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("payload_{payload_len}")),
            &payload_len,
            |b, &len| {
                let (ring, _buf) = heap_ring(1 << 20);
                let payload = vec![0xABu8; len];
                let mut dest = vec![0u8; len];
                let mut sequence = 0i32;

                b.iter(|| {
                    for _ in 0..MSG_COUNT {
                        while !ring.try_write(&payload, 1, 0, sequence) {
                            black_box(ring.try_read(&mut dest));
                        }
                        sequence = sequence.wrapping_add(1);
                        while ring.try_read(&mut dest).is_none() {
                            std::hint::spin_loop();
                        }
                        black_box(&dest);
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_drain_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain_burst");
    let payload = vec![0xABu8; 64];
    let burst = 256u64;
    group.throughput(Throughput::Elements(burst));

    group.bench_function("fill_then_drain", |b| {
        let (ring, _buf) = heap_ring(1 << 16);
        let mut dest = vec![0u8; 64];

        b.iter(|| {
            let mut written = 0u64;
            while written < burst && ring.try_write(&payload, 0, 0, written as i32) {
                written += 1;
            }
            let mut read = 0u64;
            while read < written {
                if ring.try_read(&mut dest).is_some() {
                    read += 1;
                }
            }
            black_box(&dest);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_round_trip, bench_drain_burst);
criterion_main!(benches);
