use approx::{assert_abs_diff_eq, assert_relative_eq};

use crate::assert_err;
use crate::optimizer::{
    OptimizerError, OptimizerState, TraitTrainingAlgorithm, TrainingAlgorithmType,
    TrainingAlgorithms,
};
use crate::tensor::Tensor;

/// 先用合法输入推进一步，得到非零的状态
fn advanced_adam_state() -> (Tensor, OptimizerState) {
    let info = TrainingAlgorithms::adam(0.001, 0.9, 0.999, 1e-8);
    let weight = Tensor::new(&[1., 2.], &[2]);
    let mut state = info.init_state(&[2]).unwrap();
    info.compute_delta(&weight, &Tensor::new(&[1., 1.], &[2]), Some(&mut state), 1)
        .unwrap();
    (weight, state)
}

#[test]
fn test_gradient_shape_mismatch_leaves_state_untouched() {
    let info = TrainingAlgorithms::adam(0.001, 0.9, 0.999, 1e-8);
    let (weight, mut state) = advanced_adam_state();
    let before = state.clone();

    assert_err!(
        info.compute_delta(&weight, &Tensor::new(&[1., 1., 1.], &[3]), Some(&mut state), 2),
        OptimizerError::ShapeMismatch([2], [3], "梯度形状与权重形状不一致")
    );
    assert_eq!(state, before);
    match &state {
        OptimizerState::Adam { m, .. } => {
            assert_abs_diff_eq!(m, &Tensor::new(&[0.1, 0.1], &[2]), epsilon = 1e-6)
        }
        other => panic!("预期Adam状态，实际得到{other:?}"),
    }
}

#[test]
fn test_state_shape_mismatch_leaves_state_untouched() {
    let infos = [
        TrainingAlgorithms::momentum(0.1, 0., 0.9),
        TrainingAlgorithms::adadelta(0.95, 1e-8, 0.),
        TrainingAlgorithms::adam(0.001, 0.9, 0.999, 1e-8),
        TrainingAlgorithms::adamax(0.002, 0.9, 0.999),
    ];
    let weight = Tensor::zeros(&[3]);
    let gradient = Tensor::new(&[1., 2., 3.], &[3]);
    for info in infos {
        let mut state = info.init_state(&[2]).unwrap();
        let before = state.clone();
        assert_err!(
            info.compute_delta(&weight, &gradient, Some(&mut state), 1),
            OptimizerError::ShapeMismatch([2], [3], "权重形状与已有的优化器状态不一致")
        );
        assert_eq!(state, before);
    }
}

#[test]
fn test_zero_timestep_is_rejected() {
    let infos = [
        TrainingAlgorithms::stochastic_gradient_descent(0.1, 0.),
        TrainingAlgorithms::momentum(0.1, 0., 0.9),
        TrainingAlgorithms::adadelta(0.95, 1e-8, 0.),
        TrainingAlgorithms::adam(0.001, 0.9, 0.999, 1e-8),
        TrainingAlgorithms::adamax(0.002, 0.9, 0.999),
    ];
    let weight = Tensor::new(&[1., 2.], &[2]);
    let gradient = Tensor::new(&[0.5, -0.5], &[2]);
    for info in infos {
        let mut state = info.init_state(&[2]);
        let before = state.clone();
        assert_err!(
            info.compute_delta(&weight, &gradient, state.as_mut(), 0),
            OptimizerError::InvalidArgument("时间步从1开始计数，不能为0")
        );
        assert_eq!(state, before);
    }
}

#[test]
fn test_missing_or_foreign_state() {
    let weight = Tensor::zeros(&[2]);
    let gradient = Tensor::new(&[1., 1.], &[2]);

    let adam = TrainingAlgorithms::adam(0.001, 0.9, 0.999, 1e-8);
    assert_err!(
        adam.compute_delta(&weight, &gradient, None, 1),
        OptimizerError::StateMismatch {
            algorithm: TrainingAlgorithmType::Adam,
            ..
        }
    );

    let mut foreign = TrainingAlgorithms::adadelta(0.95, 1e-8, 0.)
        .init_state(&[2])
        .unwrap();
    let before = foreign.clone();
    assert_err!(
        adam.compute_delta(&weight, &gradient, Some(&mut foreign), 1),
        OptimizerError::StateMismatch { message, .. } if message.contains("Adadelta")
    );
    assert_eq!(foreign, before);
}

#[test]
fn test_unit_beta_is_rejected_before_mutation() {
    let weight = Tensor::zeros(&[2]);
    let gradient = Tensor::new(&[1., -1.], &[2]);
    for info in [
        TrainingAlgorithms::adam(0.001, 1., 0.999, 1e-8),
        TrainingAlgorithms::adam(0.001, 0.9, 1., 1e-8),
        TrainingAlgorithms::adamax(0.002, 1., 0.999),
    ] {
        let mut state = info.init_state(&[2]).unwrap();
        let before = state.clone();
        assert_err!(
            info.compute_delta(&weight, &gradient, Some(&mut state), 3),
            OptimizerError::InvalidArgument(msg) if msg.contains("偏差修正的分母为0")
        );
        assert_eq!(state, before);
    }
}

#[test]
fn test_timestep_beyond_i32_range() {
    // 偏差修正项已经饱和为1：Δw = -η·(0.1g) / √(0.001g²)
    let info = TrainingAlgorithms::adam(0.001, 0.9, 0.999, 1e-8);
    let weight = Tensor::zeros(&[1]);
    let gradient = Tensor::new(&[2.], &[1]);
    let mut state = info.init_state(&[1]).unwrap();
    let timestep = i32::MAX as usize + 10;

    let delta = info
        .compute_delta(&weight, &gradient, Some(&mut state), timestep)
        .unwrap();
    let expected = -0.001 * 0.1 / 0.001f32.sqrt();
    assert_relative_eq!(delta.to_vec()[0], expected, max_relative = 1e-3);
}
