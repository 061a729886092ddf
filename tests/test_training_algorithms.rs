/*
 * @Description  : 优化器族集成测试：工厂默认值，以及配合BatchesCollection的小型训练循环
 */
use approx::assert_abs_diff_eq;
use train_core::data::{BatchesCollection, Dataset};
use train_core::optimizer::{
    Optimizer, ParamId, TraitTrainingAlgorithm, TrainingAlgorithmInfo, TrainingAlgorithmType,
    TrainingAlgorithms,
};
use train_core::tensor::Tensor;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// y = 3x - 1 上的256个样本，x ∈ [-1, 1)
fn line_dataset() -> Dataset {
    let x = Tensor::new_random(-1., 1., &[256, 1]);
    let y = x.map(|v| 3. * v - 1.);
    Dataset::new(x, y).unwrap()
}

/// 均方误差对 (w, b) 的梯度
fn mse_gradients(w: &Tensor, b: &Tensor, x: &Tensor, y: &Tensor) -> (Tensor, Tensor) {
    let (w, b) = (w.to_vec()[0], b.to_vec()[0]);
    let n = x.rows() as f32;
    let (mut grad_w, mut grad_b) = (0., 0.);
    for (xi, yi) in x.to_vec().into_iter().zip(y.to_vec()) {
        let error = w * xi + b - yi;
        grad_w += 2. * error * xi / n;
        grad_b += 2. * error / n;
    }
    (Tensor::new(&[grad_w], &[1]), Tensor::new(&[grad_b], &[1]))
}

fn train(info: TrainingAlgorithmInfo, epochs: usize) -> (f32, f32) {
    let mut batches = BatchesCollection::from_dataset(&line_dataset(), 32).unwrap();
    let mut optimizer = Optimizer::new(info);
    let mut w = Tensor::zeros(&[1]);
    let mut b = Tensor::zeros(&[1]);

    for _ in 0..epochs {
        for batch in &batches {
            let (grad_w, grad_b) = mse_gradients(&w, &b, batch.x(), batch.y());
            optimizer
                .step(&mut [(ParamId(0), &mut w, &grad_w), (ParamId(1), &mut b, &grad_b)])
                .unwrap();
        }
        batches.cross_shuffle();
    }
    assert_eq!(optimizer.timestep(), epochs * batches.count());
    (w.to_vec()[0], b.to_vec()[0])
}

#[test]
fn test_factory_defaults() {
    let sgd = TrainingAlgorithms::stochastic_gradient_descent(0.1, 0.);
    assert_eq!(sgd.algorithm_type(), TrainingAlgorithmType::StochasticGradientDescent);
    assert_eq!(sgd.learning_rate(), Some(0.1));

    assert_eq!(
        TrainingAlgorithms::momentum(0.1, 0., 0.).algorithm_type(),
        TrainingAlgorithmType::StochasticGradientDescent
    );
    assert_eq!(
        TrainingAlgorithms::adadelta(0.95, 1e-8, 0.).learning_rate(),
        None
    );
    assert_eq!(
        TrainingAlgorithms::adamax(0.002, 0.9, 0.999).learning_rate(),
        Some(0.002)
    );
}

#[test]
fn test_sgd_fits_line() {
    init_logger();
    let (w, b) = train(TrainingAlgorithms::stochastic_gradient_descent(0.1, 0.), 50);
    assert_abs_diff_eq!(w, 3., epsilon = 1e-2);
    assert_abs_diff_eq!(b, -1., epsilon = 1e-2);
}

#[test]
fn test_momentum_fits_line() {
    init_logger();
    let (w, b) = train(TrainingAlgorithms::momentum(0.05, 0., 0.9), 50);
    assert_abs_diff_eq!(w, 3., epsilon = 1e-2);
    assert_abs_diff_eq!(b, -1., epsilon = 1e-2);
}

#[test]
fn test_adam_fits_line() {
    init_logger();
    let (w, b) = train(TrainingAlgorithms::adam(0.05, 0.9, 0.999, 1e-8), 100);
    assert_abs_diff_eq!(w, 3., epsilon = 5e-2);
    assert_abs_diff_eq!(b, -1., epsilon = 5e-2);
}

#[test]
fn test_adamax_fits_line() {
    init_logger();
    let (w, b) = train(TrainingAlgorithms::adamax(0.05, 0.9, 0.999), 100);
    assert_abs_diff_eq!(w, 3., epsilon = 5e-2);
    assert_abs_diff_eq!(b, -1., epsilon = 5e-2);
}

#[test]
fn test_adadelta_reduces_loss() {
    init_logger();
    // Adadelta起步很慢，这里只验证它朝着正确方向前进
    let (w, b) = train(TrainingAlgorithms::adadelta(0.95, 1e-6, 0.), 100);
    assert!(w > 0.5, "w = {w}");
    assert!(b < -0.2, "b = {b}");
}

#[test]
fn test_configuration_from_json() {
    let info = TrainingAlgorithmInfo::from_json(r#"{ "type": "AdaMax" }"#).unwrap();
    assert_eq!(info, TrainingAlgorithms::adamax(0.002, 0.9, 0.999));
    let json = info.to_json().unwrap();
    assert_eq!(TrainingAlgorithmInfo::from_json(&json).unwrap(), info);
}
