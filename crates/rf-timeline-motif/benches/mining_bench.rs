//! Benchmarks for motif matching and triplet mining.
//!
//! Run with: cargo bench --package rf-timeline-motif

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rf_timeline_core::{Attributes, Event, EventSource};
use rf_timeline_motif::{Motif, MotifMatcher, TripletMiner};

const LABELS: [&str; 4] = [
    "wifi_beacon_5g_20",
    "ultra_18_21khz",
    "wifi_beacon_6g_20",
    "wifi_beacon_2g4_20",
];

/// A timeline with roughly `density` events per second.
fn generate_timeline(n: usize, density: f64) -> Vec<Event> {
    (0..n)
        .map(|i| {
            let label = LABELS[(i * 7 + i / 3) % LABELS.len()];
            let source = if label.starts_with("ultra") {
                EventSource::Acoustic
            } else {
                EventSource::Wireless
            };
            Event::new(i as f64 / density, source, label, Attributes::new()).unwrap()
        })
        .collect()
}

fn bench_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("motif_matcher");
    let matcher =
        MotifMatcher::new(Motif::parse("wifi5_20,ultra19,wifi6_20").unwrap(), 2.0).unwrap();

    for &n in &[1_000usize, 10_000] {
        let events = generate_timeline(n, 10.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("find", n), &events, |b, events| {
            b.iter(|| matcher.find(black_box(events)))
        });
    }
    group.finish();
}

fn bench_miner(c: &mut Criterion) {
    let mut group = c.benchmark_group("triplet_miner");
    let miner = TripletMiner::new(3.0, 10).unwrap();

    for &density in &[2.0f64, 10.0] {
        let events = generate_timeline(2_000, density);
        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("mine_density", density as u64),
            &events,
            |b, events| b.iter(|| miner.mine(black_box(events))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_matcher, bench_miner);
criterion_main!(benches);
