use criterion::{black_box, criterion_group, criterion_main, Criterion as Bench};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sapling::criterion::{entropy, gini, squared_error};
use sapling::splitter::{split_thresholds, ThresholdRule};
use sapling::{Criterion, DecisionTreeBase, Matrix};
use std::time::Duration;

fn synthetic(rows: usize, cols: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(0);
    let v: Vec<f64> = (0..rows * cols).map(|_| (rng.gen::<f64>() * 50.0).round()).collect();
    let y_class: Vec<f64> = (0..rows)
        .map(|i| if v[i] + v[rows + i] > 50.0 { 1.0 } else { 0.0 })
        .collect();
    let y_reg: Vec<f64> = (0..rows).map(|i| v[i] * 0.5 - v[rows + i] + rng.gen::<f64>()).collect();
    (v, y_class, y_reg)
}

pub fn tree_benchmarks(c: &mut Bench) {
    let rows = 500;
    let cols = 4;
    let (v, y_class, y_reg) = synthetic(rows, cols);
    let data = Matrix::new(&v, rows, cols);

    c.bench_function("gini", |b| b.iter(|| gini(black_box(&y_class))));
    c.bench_function("entropy", |b| b.iter(|| entropy(black_box(&y_class))));
    c.bench_function("squared_error", |b| b.iter(|| squared_error(black_box(&y_reg))));
    c.bench_function("split_thresholds", |b| {
        b.iter(|| split_thresholds(black_box(data.get_col(0)), ThresholdRule::Midpoint))
    });

    let mut tree_train = c.benchmark_group("train_tree");
    tree_train.sample_size(10);
    tree_train.measurement_time(Duration::from_secs(20));
    tree_train.bench_function("train_classifier_depth_6", |b| {
        b.iter(|| {
            let mut model = DecisionTreeBase::classifier().set_max_depth(Some(6));
            model.fit(black_box(&data), black_box(&y_class)).unwrap();
        })
    });
    tree_train.bench_function("train_regressor_depth_6", |b| {
        b.iter(|| {
            let mut model = DecisionTreeBase::regressor()
                .set_criterion(Criterion::SquaredError)
                .set_max_depth(Some(6));
            model.fit(black_box(&data), black_box(&y_reg)).unwrap();
        })
    });
    tree_train.finish();

    let mut model = DecisionTreeBase::classifier().set_max_depth(Some(6));
    model.fit(&data, &y_class).unwrap();
    let parallel = model.clone().set_parallel(true);
    c.bench_function("predict_single_threaded", |b| b.iter(|| model.predict(black_box(&data)).unwrap()));
    c.bench_function("predict_parallel", |b| b.iter(|| parallel.predict(black_box(&data)).unwrap()));
}

criterion_group!(benches, tree_benchmarks);
criterion_main!(benches);
