//! Benchmark for pipeline rebuild performance.
//!
//! TARGET: full rebuild of a 100-segment pathway in well under a millisecond
//!
//! Run with: cargo bench --package causeway_procedural --bench rebuild_benchmark

use causeway_procedural::{
    BuilderConfig, CollisionSurface, GroundProjector, MeshAsset, MeshAssetId, MeshHandle,
    MeshSegment, MeshSink, NavigationAreaExporter, ProjectorConfig, QueryMobility, RayHit,
    SegmentedMeshBuilder, Spline,
};
use causeway_shared::Vec3;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

/// Analytic terrain, cheap enough that the pipeline dominates the numbers.
struct WaveGround;

impl CollisionSurface for WaveGround {
    fn nearest_hit(&self, from: Vec3, to: Vec3, _: QueryMobility) -> Option<RayHit> {
        let ground = 8.0 * (from.x / 90.0).sin() + 5.0 * (from.y / 70.0).cos();
        (to.z <= ground && ground <= from.z).then_some(RayHit {
            point: Vec3::new(from.x, from.y, ground),
        })
    }
}

/// Sink that does nothing but issue handles.
struct NullSink(u64);

impl MeshSink for NullSink {
    fn instantiate(
        &mut self,
        _: &MeshAsset,
        _: &MeshSegment,
        _: &str,
        _: Option<&str>,
    ) -> MeshHandle {
        self.0 += 1;
        MeshHandle::new(self.0)
    }
    fn detach(&mut self, _: MeshHandle) {}
    fn destroy(&mut self, _: MeshHandle) {}
}

/// Gently meandering 10 km curve, 100 m control spacing.
fn long_spline() -> Spline {
    let points = (0..100)
        .map(|i| {
            let x = i as f32 * 100.0;
            Vec3::new(x, 300.0 * (x / 1500.0).sin(), 30.0)
        })
        .collect();
    Spline::from_points(points)
}

fn benchmark_position_queries(c: &mut Criterion) {
    let spline = long_spline();
    let length = spline.length();

    c.bench_function("spline_position_at", |b| {
        let mut d = 0.0f32;
        b.iter(|| {
            d = (d + 17.3) % length;
            black_box(spline.position_at(black_box(d)))
        });
    });
}

fn benchmark_ground_projection(c: &mut Criterion) {
    let spline = long_spline();
    let mut projector = GroundProjector::new(&ProjectorConfig::default());

    let mut group = c.benchmark_group("ground_projection");
    group.throughput(Throughput::Elements(
        (spline.length() / 100.0) as u64 + 1,
    ));
    group.bench_function("rebuild_10km_curve", |b| {
        b.iter(|| {
            projector.rebuild(Some(black_box(&spline)), &WaveGround);
            black_box(projector.points().len())
        });
    });
    group.finish();
}

fn benchmark_full_rebuild(c: &mut Criterion) {
    let spline = long_spline();
    let config = BuilderConfig::default();
    let mut sink = NullSink(0);
    let mut builder = SegmentedMeshBuilder::new(&config);
    builder.set_mesh(Some(MeshAsset {
        id: MeshAssetId(1),
        half_extents: Vec3::new(30.0, 50.0, 15.0),
    }));
    let mut nav = NavigationAreaExporter::new(&config);

    c.bench_function("full_rebuild_segments_and_nav", |b| {
        b.iter(|| {
            builder.rebuild(Some(black_box(&spline)), &mut sink);
            nav.rebuild(&spline, builder.segments(), 100.0);
            black_box(nav.area_count())
        });
    });
}

criterion_group!(
    benches,
    benchmark_position_queries,
    benchmark_ground_projection,
    benchmark_full_rebuild
);
criterion_main!(benches);
