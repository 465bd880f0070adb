// Probe-length stress: hashers that cluster keys into few home slots.
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use probe_map::ProbeMap;
use std::hash::{BuildHasher, Hasher};
use std::time::Duration;

// Keeps only the low `BITS` bits of the key, so at most 2^BITS distinct homes.
#[derive(Clone, Copy, Default)]
struct ClusterBuildHasher<const BITS: u32>;

struct ClusterHasher<const BITS: u32>(u64);

impl<const BITS: u32> BuildHasher for ClusterBuildHasher<BITS> {
    type Hasher = ClusterHasher<BITS>;
    fn build_hasher(&self) -> Self::Hasher {
        ClusterHasher(0)
    }
}

impl<const BITS: u32> Hasher for ClusterHasher<BITS> {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(b);
        }
    }
    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
    fn finish(&self) -> u64 {
        self.0 & ((1u64 << BITS) - 1)
    }
}

fn bench_clustered<const BITS: u32>(c: &mut Criterion, name: &str) {
    c.bench_function(name, |b| {
        b.iter_batched(
            || ProbeMap::with_capacity_and_hasher(8, ClusterBuildHasher::<BITS>),
            |mut m: ProbeMap<u64, u64, ClusterBuildHasher<BITS>>| {
                for k in 0..2_000u64 {
                    m.put(k, k).unwrap();
                }
                for k in (0..2_000u64).step_by(2) {
                    m.remove(&k).unwrap();
                }
                for k in (1..2_000u64).step_by(2) {
                    black_box(m.get(&k).unwrap());
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_clusters(c: &mut Criterion) {
    bench_clustered::<4>(c, "collision::16_homes_2k");
    bench_clustered::<8>(c, "collision::256_homes_2k");
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_clusters
}
criterion_main!(benches);
