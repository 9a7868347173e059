//! Detection Benchmarks
//!
//! Benchmarks for the analyzers and the bitrate timeline on long inputs.
//!
//! Run with: `cargo bench --bench detection_ops`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use media_parser::prelude::*;

fn packets(count: usize) -> Vec<PacketObservation> {
    (0..count)
        .map(|i| {
            let pts = i as f64 / 50.0;
            let size = if i % 50 == 0 { 60_000 } else { 4_000 + (i % 7) as u64 * 300 };
            PacketObservation::new(pts, pts, size, 0)
        })
        .collect()
}

fn frames(count: usize) -> Vec<FrameObservation> {
    (0..count)
        .map(|i| {
            let pts = i as f64 / 25.0;
            FrameObservation::video(pts, pts - 0.08, i % 50 == 0)
        })
        .collect()
}

fn bench_packet_analyzers(c: &mut Criterion) {
    let mut group = c.benchmark_group("packet_analyzers");

    for count in [1_000, 10_000, 100_000] {
        let input = packets(count);
        group.bench_with_input(BenchmarkId::new("bitrate", count), &input, |bench, p| {
            bench.iter(|| black_box(analyze_bitrate(black_box(p))));
        });
        group.bench_with_input(BenchmarkId::new("packet_loss", count), &input, |bench, p| {
            bench.iter(|| black_box(analyze_packet_loss(black_box(p))));
        });
        group.bench_with_input(BenchmarkId::new("timeline", count), &input, |bench, p| {
            bench.iter(|| {
                black_box(generate_bitrate_timeline(
                    black_box(p),
                    DEFAULT_TIMELINE_WINDOW_SECS,
                ))
            });
        });
    }

    group.finish();
}

fn bench_frame_analyzers(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_analyzers");

    for count in [1_000, 10_000, 100_000] {
        let input = frames(count);
        group.bench_with_input(BenchmarkId::new("keyframe", count), &input, |bench, f| {
            bench.iter(|| black_box(analyze_keyframes(black_box(f))));
        });
        group.bench_with_input(BenchmarkId::new("timestamp", count), &input, |bench, f| {
            bench.iter(|| black_box(analyze_timestamps(black_box(f))));
        });
    }

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let packets = packets(10_000);
    let frames = frames(5_000);
    let target = CompatibilityTarget::new("h264", "High", 51, "matroska");

    c.bench_function("engine_run_all", |bench| {
        bench.iter(|| {
            let mut engine = DetectionEngine::new();
            engine.run_all(
                &DetectionInput::new()
                    .with_packets(&packets)
                    .with_frames(&frames)
                    .with_compatibility(&target),
            );
            black_box(engine.into_findings())
        });
    });
}

criterion_group!(benches, bench_packet_analyzers, bench_frame_analyzers, bench_engine);
criterion_main!(benches);
