use contour_offset::contour::Contour;
use criterion::{criterion_group, criterion_main, Bencher, BenchmarkId, Criterion};

/// Closed star-like contour with alternating arc and line segments.
fn spiky_contour(vertex_count: usize) -> Contour<f64> {
    let mut contour = Contour::with_capacity(vertex_count, true);
    let outer_radius = 100.0;
    let inner_radius = 80.0;
    for i in 0..vertex_count {
        let angle = (i as f64) * std::f64::consts::TAU / (vertex_count as f64);
        let radius = if i % 2 == 0 {
            outer_radius
        } else {
            inner_radius
        };
        let bulge = if i % 2 == 0 { 0.2 } else { 0.0 };
        contour.add(radius * angle.cos(), radius * angle.sin(), bulge);
    }
    contour
}

fn bench_parallel_offset(b: &mut Bencher, contour: &Contour<f64>, offset: f64) {
    b.iter(|| {
        contour.parallel_offset(offset);
    })
}

fn parallel_offset_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_offset");
    for &vertex_count in &[25, 100, 1000] {
        let contour = spiky_contour(vertex_count);
        group.bench_with_input(
            BenchmarkId::new("spiky_inset", vertex_count),
            &vertex_count,
            |b, _| bench_parallel_offset(b, &contour, -2.0),
        );
        group.bench_with_input(
            BenchmarkId::new("spiky_outset", vertex_count),
            &vertex_count,
            |b, _| bench_parallel_offset(b, &contour, 2.0),
        );
    }
    group.finish();
}

criterion_group!(parallel_offset, parallel_offset_group);
criterion_main!(parallel_offset);
