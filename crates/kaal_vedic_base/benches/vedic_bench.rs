use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kaal_time::JulianDay;
use kaal_vedic_base::{
    Vaar, divide_horas, karana_from_elongation, nakshatra_from_longitude, tithi_from_elongation,
    yoga_from_sum,
};

fn classify_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("vedic_classify");
    group.bench_function("tithi_from_elongation", |b| {
        b.iter(|| tithi_from_elongation(black_box(176.9)))
    });
    group.bench_function("karana_from_elongation", |b| {
        b.iter(|| karana_from_elongation(black_box(176.9)))
    });
    group.bench_function("nakshatra_from_longitude", |b| {
        b.iter(|| nakshatra_from_longitude(black_box(161.3)))
    });
    group.bench_function("yoga_from_sum", |b| b.iter(|| yoga_from_sum(black_box(142.0))));
    group.finish();
}

fn hora_bench(c: &mut Criterion) {
    let sunrise = JulianDay(2_460_394.534);
    let sunset = JulianDay(2_460_395.041);
    let next_sunrise = JulianDay(2_460_395.533);
    c.bench_function("divide_horas", |b| {
        b.iter(|| {
            divide_horas(
                black_box(sunrise),
                black_box(sunset),
                black_box(next_sunrise),
                Vaar::Somvaar,
            )
            .expect("ordered bounds")
        })
    });
}

criterion_group!(benches, classify_bench, hora_bench);
criterion_main!(benches);
