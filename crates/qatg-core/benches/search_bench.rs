//! Benchmarks for the activation search
//!
//! Run with: cargo bench -p qatg-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qatg_core::{
    ActivationFinder, ActivationKind, BiasFault, GridHillClimber, OverRotationFault, RotationAxis,
    SearchConfig,
};
use qatg_ir::{StandardGate, Statevector};
use qatg_synth::{BasisGates, BasisSynthesizer};

/// Benchmark the optimizer alone on a smooth separable score
fn bench_optimizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimizer");

    for grid_slices in &[5usize, 11, 21] {
        let climber = GridHillClimber::new(SearchConfig {
            grid_slices: *grid_slices,
            max_rounds: 200,
            step: 0.01,
        });
        group.bench_with_input(
            BenchmarkId::new("single_block", grid_slices),
            grid_slices,
            |b, _| {
                b.iter(|| {
                    climber.maximize_infallible(black_box(&[3]), |p| {
                        p[0].cos() + (p[1] - 0.5).sin() - p[2].powi(2)
                    })
                });
            },
        );
    }

    group.finish();
}

/// Benchmark finding one template element
fn bench_activation(c: &mut Criterion) {
    let mut group = c.benchmark_group("activation");
    let search = GridHillClimber::new(SearchConfig {
        grid_slices: 11,
        max_rounds: 100,
        step: 0.01,
    });

    group.bench_function("single_ibm", |b| {
        let synth = BasisSynthesizer::new(BasisGates::ibm()).unwrap();
        let finder = ActivationFinder::new(&synth, search);
        let fault = BiasFault::new("rz-bias", StandardGate::Rz(0.7), vec![0.05]).unwrap();
        let zero = Statevector::zero(1).unwrap();
        b.iter(|| {
            finder
                .find(&fault, ActivationKind::Single, black_box(&zero), black_box(&zero))
                .unwrap()
        });
    });

    group.bench_function("two_zyz", |b| {
        let synth = BasisSynthesizer::new(BasisGates::zyz()).unwrap();
        let finder = ActivationFinder::new(&synth, search);
        let fault =
            OverRotationFault::new("cx-drift", StandardGate::CX, RotationAxis::X, 0.1, 1).unwrap();
        let zero = Statevector::zero(2).unwrap();
        b.iter(|| {
            finder
                .find(&fault, ActivationKind::Two, black_box(&zero), black_box(&zero))
                .unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_optimizer, bench_activation);
criterion_main!(benches);
