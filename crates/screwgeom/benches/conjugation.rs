use criterion::{black_box, criterion_group, criterion_main, Criterion};
use screwgeom::algebraic_ops::*;
use screwgeom::ops::*;
use screwgeom::re3::*;

const BATCH: usize = 1_000;

fn test_motor() -> Motor {
    Rotor::new(std::f32::consts::FRAC_PI_2, 0.3, -3., 1.) * Translator::new(12., -2., 0.4, 1.)
}

fn points() -> Vec<Point> {
    (0..BATCH)
        .map(|i| {
            let f = i as f32;
            Point::new(f, 0.5 * f, -f)
        })
        .collect()
}

fn bench_points(c: &mut Criterion) {
    let m = test_motor();
    let mut batch = points();

    c.bench_function("motor points one at a time × 1000", |bencher| {
        bencher.iter(|| {
            for p in batch.iter_mut() {
                *p = black_box(m).conjugate(*p);
            }
            black_box(&batch);
        })
    });

    c.bench_function("motor points in place × 1000", |bencher| {
        bencher.iter(|| {
            black_box(m).conjugate_in_place(&mut batch);
            black_box(&batch);
        })
    });

    let input = points();
    c.bench_function("motor points into × 1000", |bencher| {
        bencher.iter(|| {
            black_box(m).conjugate_into(&input, &mut batch);
            black_box(&batch);
        })
    });

    let r = test_motor().rotor();
    c.bench_function("rotor points in place × 1000", |bencher| {
        bencher.iter(|| {
            black_box(r).conjugate_in_place(&mut batch);
            black_box(&batch);
        })
    });
}

fn bench_lines(c: &mut Criterion) {
    let m = test_motor();
    let mut batch: Vec<Line> = (0..BATCH)
        .map(|i| Line::new(i as f32, 0., 1., 0., 1., 0.))
        .collect();

    c.bench_function("motor lines in place × 1000", |bencher| {
        bencher.iter(|| {
            black_box(m).conjugate_in_place(&mut batch);
            black_box(&batch);
        })
    });
}

fn bench_exp_log(c: &mut Criterion) {
    let m = test_motor();

    c.bench_function("motor log", |bencher| bencher.iter(|| black_box(m).log()));

    let l = m.log();
    c.bench_function("line exp", |bencher| bencher.iter(|| black_box(l).exp()));

    c.bench_function("motor sqrt", |bencher| {
        bencher.iter(|| black_box(m).sqrt())
    });

    c.bench_function("motor normalize", |bencher| {
        bencher.iter(|| black_box(m).normalized())
    });
}

criterion_group!(benches, bench_points, bench_lines, bench_exp_log);
criterion_main!(benches);
