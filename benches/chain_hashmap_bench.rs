use chain_hashmap::ChainedHashMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_place(c: &mut Criterion) {
    c.bench_function("chained_map_place_10k", |b| {
        b.iter_batched(
            ChainedHashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.place(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chained_map_get_hit", |b| {
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        let m: ChainedHashMap<String, u64> = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, k)| (k, i as u64))
            .collect();
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k.as_str()));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chained_map_get_miss", |b| {
        let m: ChainedHashMap<String, u64> = lcg(11)
            .take(10_000)
            .enumerate()
            .map(|(i, x)| (key(x), i as u64))
            .collect();
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in map
            let k = key(miss.next().unwrap());
            black_box(m.get(k.as_str()));
        })
    });
}

fn bench_place_remove_churn(c: &mut Criterion) {
    c.bench_function("chained_map_place_remove", |b| {
        let mut m: ChainedHashMap<u64, u64> = ChainedHashMap::new();
        let mut xs = lcg(3);
        b.iter(|| {
            let x = xs.next().unwrap() % 4096;
            if !m.remove(&x) {
                m.place(x, x);
            }
            black_box(m.len());
        })
    });
}

fn bench_iterate(c: &mut Criterion) {
    c.bench_function("chained_map_iter_10k", |b| {
        let m: ChainedHashMap<u64, u64> = lcg(5).take(10_000).map(|x| (x, x)).collect();
        b.iter(|| black_box(m.values().fold(0u64, |acc, v| acc.wrapping_add(*v))))
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_place, bench_get_hit, bench_get_miss, bench_place_remove_churn, bench_iterate
}
criterion_main!(benches);
