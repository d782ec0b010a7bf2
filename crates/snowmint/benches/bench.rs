use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use snowmint::{BitLayout, IdGenStatus, Node, Snowflake, TimeSource};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::{Duration, Instant, SystemTime},
};

struct FixedMockTime {
    millis: i64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> i64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

fn past_epoch() -> SystemTime {
    SystemTime::now() - Duration::from_secs(10 * 3600)
}

/// Hot path: a fixed clock and a sequence wide enough that every poll is
/// `Ready`.
fn bench_poll_fixed_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("poll/fixed_clock");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let node =
                    Node::with_time_source(0, BitLayout::TWITTER, FixedMockTime { millis: 1 })
                        .unwrap();
                for _ in 0..TOTAL_IDS {
                    match node.poll_generate() {
                        IdGenStatus::Ready { id } => {
                            black_box(id);
                        }
                        IdGenStatus::Pending { .. } => unreachable!(),
                    }
                }
            }
            start.elapsed()
        });
    });

    group.finish();
}

/// Real clock; includes the spin on sequence exhaustion.
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate/monotonic");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    for (name, layout) in [("twitter", (41, 10, 12)), ("wide_sequence", (42, 1, 20))] {
        let (ts, node_bits, seq) = layout;
        let node = Node::new(0, past_epoch(), ts, node_bits, seq).unwrap();
        group.bench_function(format!("{name}/elems/{TOTAL_IDS}"), |b| {
            b.iter(|| {
                for _ in 0..TOTAL_IDS {
                    black_box(node.generate());
                }
            });
        });
    }

    group.finish();
}

/// Contended: every thread shares one node.
fn bench_generate_threaded(c: &mut Criterion) {
    let threads = num_cpus::get().clamp(2, 8);
    let mut group = c.benchmark_group("generate/threaded");
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    group.bench_function(format!("threads/{threads}/elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let node = Arc::new(Node::new(0, past_epoch(), 41, 10, 12).unwrap());
            let barrier = Arc::new(Barrier::new(threads + 1));
            let mut elapsed = Duration::ZERO;

            for _ in 0..iters {
                // The scope joins every worker before handing back the start
                // instant, so the elapsed time covers all of them.
                let start = scope(|s| {
                    for _ in 0..threads {
                        let node = Arc::clone(&node);
                        let barrier = Arc::clone(&barrier);
                        s.spawn(move || {
                            barrier.wait();
                            for _ in 0..TOTAL_IDS {
                                black_box(node.generate());
                            }
                        });
                    }
                    barrier.wait();
                    Instant::now()
                });
                elapsed += start.elapsed();
            }

            elapsed
        });
    });

    group.finish();
}

fn bench_encodings(c: &mut Criterion) {
    let id = Snowflake::from_raw(i64::MAX);
    let base64 = id.to_base64();
    let json = id.to_json();
    let decimal = id.to_string();

    let mut group = c.benchmark_group("encoding");
    group.bench_function("to_base64", |b| b.iter(|| black_box(id).to_base64()));
    group.bench_function("from_base64", |b| {
        b.iter(|| Snowflake::from_base64(black_box(&base64)))
    });
    group.bench_function("to_json", |b| b.iter(|| black_box(id).to_json()));
    group.bench_function("from_json", |b| {
        b.iter(|| Snowflake::from_json(black_box(&json)))
    });
    group.bench_function("parse_decimal", |b| {
        b.iter(|| Snowflake::parse_decimal(black_box(&decimal)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_poll_fixed_clock,
    bench_generate,
    bench_generate_threaded,
    bench_encodings
);
criterion_main!(benches);
