use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lib::nn::{Activation, Ensemble, FeedForward, Network, Options, Recurrent};
use ndarray::{Array1, Array2};
use std::num::NonZeroUsize;

const FRAMES: usize = 256;
const FEATURES: usize = 16;
const MEMBERS: usize = 8;

fn network() -> Network {
    let weights = Array2::from_shape_fn((FEATURES, FEATURES), |(i, j)| {
        ((i * FEATURES + j) as f32).sin() / FEATURES as f32
    });

    let recurrence = Array2::from_shape_fn((FEATURES, FEATURES), |(i, j)| {
        ((i + j) as f32).cos() / FEATURES as f32
    });

    let output = Array2::from_shape_fn((FEATURES, 1), |(i, _)| (i as f32).sin());

    Network::new(vec![
        Recurrent::new(
            weights,
            Array1::zeros(FEATURES),
            recurrence,
            Activation::Tanh,
        )
        .into(),
        FeedForward::new(output, Array1::zeros(1), Activation::Sigmoid).into(),
    ])
}

fn input() -> Array2<f32> {
    Array2::from_shape_fn((FRAMES, FEATURES), |(i, j)| ((i + j) as f32).sin())
}

fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("ensemble");
    group.throughput(Throughput::Elements(FRAMES as u64));

    for threads in [1usize, 4] {
        let options = Options {
            threads: NonZeroUsize::new(threads).unwrap(),
        };

        let members = Vec::from_iter((0..MEMBERS).map(|_| network()));
        let mut ensemble = Ensemble::new(members).with_options(options);
        let input = input();

        group.bench_function(threads.to_string(), |b| {
            b.iter(|| ensemble.process(input.clone(), true).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
