use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use prism_core::{weighted_draw, Catalog, PrizeTier};

fn bench_weighted_draw(c: &mut Criterion) {
    let catalog = Catalog::build_reference().expect("reference catalog builds");
    let tiers: Vec<&PrizeTier> = catalog.tiers().iter().collect();
    let mut rng = SmallRng::seed_from_u64(0xBE7);

    c.bench_function("weighted_draw_full_catalog", |b| {
        b.iter(|| weighted_draw(black_box(&tiers), 0.0, &mut rng))
    });

    c.bench_function("weighted_draw_boosted", |b| {
        b.iter(|| weighted_draw(black_box(&tiers), 0.2, &mut rng))
    });
}

criterion_group!(benches, bench_weighted_draw);
criterion_main!(benches);
