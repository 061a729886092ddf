/*
 * @Description  : Adam与AdaMax，两者共用优化器实例上的时间步t做偏差修正
 */

use serde::{Deserialize, Serialize};

use super::info::{check_inputs, state_mismatch};
use super::{OptimizerError, OptimizerState, TraitTrainingAlgorithm, TrainingAlgorithmType};
use crate::tensor::Tensor;

/// AdaMax分母的下限，防止u为0时除零
const ADAMAX_EPSILON: f32 = 1e-8;

/// Adam: Adaptive Moment Estimation
/// - m = β1·m + (1 - β1)·g
/// - v = β2·v + (1 - β2)·g²
/// - Δw = -η·m̂ / (√v̂ + ε)，其中 m̂ = m / (1 - β1^t)，v̂ = v / (1 - β2^t)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdamInfo {
    pub eta: f32,
    /// 一阶矩衰减
    pub beta1: f32,
    /// 二阶矩衰减
    pub beta2: f32,
    /// 数值稳定项
    pub epsilon: f32,
}

impl Default for AdamInfo {
    fn default() -> Self {
        Self {
            eta: 0.001,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
        }
    }
}

impl TraitTrainingAlgorithm for AdamInfo {
    fn algorithm_type(&self) -> TrainingAlgorithmType {
        TrainingAlgorithmType::Adam
    }

    fn learning_rate(&self) -> Option<f32> {
        Some(self.eta)
    }

    fn init_state(&self, shape: &[usize]) -> Option<OptimizerState> {
        Some(OptimizerState::Adam {
            m: Tensor::zeros(shape),
            v: Tensor::zeros(shape),
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
        let (m, v) = match state {
            Some(OptimizerState::Adam { m, v }) => (m, v),
            other => return Err(state_mismatch(self.algorithm_type(), other.as_deref())),
        };
        let correction1 = bias_correction("beta1", self.beta1, timestep)?;
        let correction2 = bias_correction("beta2", self.beta2, timestep)?;

        *m *= self.beta1;
        *m += (1. - self.beta1) * gradient;
        *v *= self.beta2;
        *v += (1. - self.beta2) * (gradient * gradient);

        let m_hat = &*m / correction1;
        let v_hat = &*v / correction2;

        Ok(m_hat / (v_hat.sqrt() + self.epsilon) * -self.eta)
    }
}

/// 偏差修正的分母 1 - β^t。t超出`i32`范围时按`i32::MAX`计算（此时β^t早已为0）；
/// β = 1 时分母恒为0，返回错误
fn bias_correction(name: &str, beta: f32, timestep: usize) -> Result<f32, OptimizerError> {
    let correction = 1. - beta.powi(i32::try_from(timestep).unwrap_or(i32::MAX));
    if correction == 0. {
        return Err(OptimizerError::InvalidArgument(format!(
            "{name}为{beta}时偏差修正的分母为0"
        )));
    }
    Ok(correction)
}

/// AdaMax：Adam基于无穷范数的变体
/// - m = β1·m + (1 - β1)·g
/// - u = max(β2·u, |g|)
/// - Δw = -η·m̂ / u，其中 m̂ = m / (1 - β1^t)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaMaxInfo {
    pub eta: f32,
    pub beta1: f32,
    pub beta2: f32,
}

impl Default for AdaMaxInfo {
    fn default() -> Self {
        Self {
            eta: 0.002,
            beta1: 0.9,
            beta2: 0.999,
        }
    }
}

impl TraitTrainingAlgorithm for AdaMaxInfo {
    fn algorithm_type(&self) -> TrainingAlgorithmType {
        TrainingAlgorithmType::AdaMax
    }

    fn learning_rate(&self) -> Option<f32> {
        Some(self.eta)
    }

    fn init_state(&self, shape: &[usize]) -> Option<OptimizerState> {
        Some(OptimizerState::AdaMax {
            m: Tensor::zeros(shape),
            u: Tensor::zeros(shape),
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
        let (m, u) = match state {
            Some(OptimizerState::AdaMax { m, u }) => (m, u),
            other => return Err(state_mismatch(self.algorithm_type(), other.as_deref())),
        };
        let correction1 = bias_correction("beta1", self.beta1, timestep)?;

        *m *= self.beta1;
        *m += (1. - self.beta1) * gradient;
        *u = (&*u * self.beta2).maximum(&gradient.abs());

        let m_hat = &*m / correction1;
        Ok(m_hat / (&*u + ADAMAX_EPSILON) * -self.eta)
    }
}
