/*
 * @Description  : 随机梯度下降（SGD）及带动量的SGD
 */

use serde::{Deserialize, Serialize};

use super::info::{check_inputs, state_mismatch, with_l2};
use super::{OptimizerError, OptimizerState, TraitTrainingAlgorithm, TrainingAlgorithmType};
use crate::tensor::Tensor;

/// SGD：Δw = -η·(g + λw)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StochasticGradientDescentInfo {
    /// 学习率
    pub eta: f32,
    /// L2正则化系数
    pub lambda: f32,
}

impl Default for StochasticGradientDescentInfo {
    fn default() -> Self {
        Self {
            eta: 0.1,
            lambda: 0.,
        }
    }
}

impl TraitTrainingAlgorithm for StochasticGradientDescentInfo {
    fn algorithm_type(&self) -> TrainingAlgorithmType {
        TrainingAlgorithmType::StochasticGradientDescent
    }

    fn learning_rate(&self) -> Option<f32> {
        Some(self.eta)
    }

    fn init_state(&self, _shape: &[usize]) -> Option<OptimizerState> {
        None
    }

    fn compute_delta(
        &self,
        weight: &Tensor,
        gradient: &Tensor,
        state: Option<&mut OptimizerState>,
        timestep: usize,
    ) -> Result<Tensor, OptimizerError> {
        check_inputs(weight, gradient, state.as_deref(), timestep)?;
        Ok(sgd_delta(self.eta, self.lambda, weight, gradient))
    }
}

/// 带动量的SGD：v = μv - η·(g + λw)；Δw = v
///
/// μ ≤ 0 时退化为SGD：不创建任何状态，结果与[`StochasticGradientDescentInfo`]逐位相同
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumInfo {
    pub eta: f32,
    pub lambda: f32,
    /// 动量系数μ
    pub momentum: f32,
}

impl Default for MomentumInfo {
    fn default() -> Self {
        Self {
            eta: 0.1,
            lambda: 0.,
            momentum: 0.1,
        }
    }
}

impl MomentumInfo {
    fn is_plain_sgd(&self) -> bool {
        self.momentum <= 0.
    }
}

impl TraitTrainingAlgorithm for MomentumInfo {
    fn algorithm_type(&self) -> TrainingAlgorithmType {
        TrainingAlgorithmType::Momentum
    }

    fn learning_rate(&self) -> Option<f32> {
        Some(self.eta)
    }

    fn init_state(&self, shape: &[usize]) -> Option<OptimizerState> {
        if self.is_plain_sgd() {
            return None;
        }
        Some(OptimizerState::Momentum {
            velocity: Tensor::zeros(shape),
        })
    }

    fn compute_delta(
        &self,
        weight: &Tensor,
        gradient: &Tensor,
        state: Option<&mut OptimizerState>,
        timestep: usize,
    ) -> Result<Tensor, OptimizerError> {
        check_inputs(weight, gradient, state.as_deref(), timestep)?;
        if self.is_plain_sgd() {
            return Ok(sgd_delta(self.eta, self.lambda, weight, gradient));
        }
        let velocity = match state {
            Some(OptimizerState::Momentum { velocity }) => velocity,
            other => return Err(state_mismatch(self.algorithm_type(), other.as_deref())),
        };

        let gradient = with_l2(weight, gradient, self.lambda);
        *velocity *= self.momentum;
        *velocity -= self.eta * &gradient;
        Ok(velocity.clone())
    }
}

fn sgd_delta(eta: f32, lambda: f32, weight: &Tensor, gradient: &Tensor) -> Tensor {
    with_l2(weight, gradient, lambda) * -eta
}
