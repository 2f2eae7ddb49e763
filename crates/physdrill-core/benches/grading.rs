use criterion::{black_box, criterion_group, criterion_main, Criterion};

use physdrill_core::grading::{grade_input, normalize_text, Tolerance};
use physdrill_core::model::{Difficulty, ExpectedAnswer, Problem, Topic};

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");
    let tolerance = Tolerance::default();

    let numeric = Problem::new(
        Topic::Projectile,
        "angled",
        Difficulty::Hard,
        "bench",
        vec![
            ExpectedAnswer::numeric(120.0, "meters"),
            ExpectedAnswer::numeric(36.8699, "degrees"),
        ],
    );
    group.bench_function("numeric_pair", |b| {
        b.iter(|| grade_input(black_box(&numeric), black_box(&["120 m", "37"]), &tolerance))
    });

    let text = Problem::new(
        Topic::Compounds,
        "polyatomic",
        Difficulty::Hard,
        "bench",
        vec![ExpectedAnswer::Text {
            value: "Iron(III) sulfate".into(),
            label: "Name".into(),
        }],
    );
    group.bench_function("compound_name", |b| {
        b.iter(|| grade_input(black_box(&text), black_box(&["iron(iii)  sulfate"]), &tolerance))
    });

    group.bench_function("normalize_text", |b| {
        b.iter(|| normalize_text(black_box("Dinitrogen Tetroxide - anhydrous")))
    });

    group.finish();
}

criterion_group!(benches, bench_grade);
criterion_main!(benches);
