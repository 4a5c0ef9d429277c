use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pws_history::{extract_daily_summaries, extract_observations, StationId};

const OBSERVATIONS: &str = include_str!("../tests/fixtures/observations_daily.html");
const SUMMARIES: &str = include_str!("../tests/fixtures/daily_summary.html");

fn bench_extract(c: &mut Criterion) {
    let station = StationId::new("KCAJAMES3").unwrap();
    let date = NaiveDate::from_ymd_opt(2021, 7, 28).unwrap();

    c.bench_function("extract_observations", |b| {
        b.iter(|| extract_observations(black_box(OBSERVATIONS), &station, date))
    });
    c.bench_function("extract_daily_summaries", |b| {
        b.iter(|| extract_daily_summaries(black_box(SUMMARIES), &station, date))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
