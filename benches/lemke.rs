use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use nashsolver::{
    BimatrixGame, all_equilibria,
    lcp::{EquilibriumSearch, SearchConfig},
    lemke_howson,
};
use ndarray::Array;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use num_rational::BigRational;
use rand::{SeedableRng, rngs::StdRng};

fn random_game(rng: &mut StdRng, n: usize) -> BimatrixGame {
    let a = Array::random_using((n, n), Uniform::new(0., 10.), rng);
    let b = Array::random_using((n, n), Uniform::new(0., 10.), rng);
    BimatrixGame::new(a, b).expect("Error creating game.")
}

fn bench_lemke_howson(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("lemke_howson_f64", |b| {
        b.iter_batched(
            || random_game(&mut rng, 10),
            |game| lemke_howson::<f64>(&game),
            BatchSize::SmallInput,
        )
    });
    c.bench_function("lemke_howson_exact", |b| {
        b.iter_batched(
            || random_game(&mut rng, 10),
            |game| lemke_howson::<BigRational>(&game),
            BatchSize::SmallInput,
        )
    });
}

fn bench_all_equilibria(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let search = EquilibriumSearch::new(SearchConfig::default());
    c.bench_function("all_equilibria_f64", |b| {
        b.iter_batched(
            || random_game(&mut rng, 5),
            |game| all_equilibria::<f64>(&game, &search),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_lemke_howson, bench_all_equilibria);
criterion_main!(benches);
