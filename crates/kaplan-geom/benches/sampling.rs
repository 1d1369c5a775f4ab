use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kaplan_geom::{Blade, Shaft, ShapingFn};

fn bench_sampling(c: &mut Criterion) {
    let shaft = Shaft::new(3.0, 3.0).unwrap();
    let blade = Blade::new(0.0, 1.0, 3.0).unwrap();
    let shaped = blade.clone().with_shaping(ShapingFn::cubic());

    c.bench_function("shaft_100x100", |b| b.iter(|| black_box(&shaft).sample()));
    c.bench_function("blade_200x200", |b| {
        b.iter(|| black_box(&blade).sample(black_box(&shaft)))
    });
    c.bench_function("blade_200x200_cubic", |b| {
        b.iter(|| black_box(&shaped).sample(black_box(&shaft)))
    });
}

criterion_group!(benches, bench_sampling);
criterion_main!(benches);
