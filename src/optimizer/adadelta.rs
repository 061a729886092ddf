/*
 * @Description  : Adadelta：以更新量自身的滑动均方根作为“学习率”，因此没有η，
 *                 且对梯度的整体缩放不敏感
 */

use serde::{Deserialize, Serialize};

use super::info::{check_inputs, state_mismatch, with_l2};
use super::{OptimizerError, OptimizerState, TraitTrainingAlgorithm, TrainingAlgorithmType};
use crate::tensor::Tensor;

/// - E[g²] = ρE[g²] + (1-ρ)g²
/// - Δ = -√(E[Δ²] + ε) / √(E[g²] + ε) · g
/// - E[Δ²] = ρE[Δ²] + (1-ρ)Δ²
///
/// 其中 g 已包含L2项 `l2·w`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdadeltaInfo {
    /// 衰减率ρ
    pub rho: f32,
    pub epsilon: f32,
    /// L2正则化系数
    pub l2: f32,
}

impl Default for AdadeltaInfo {
    fn default() -> Self {
        Self {
            rho: 0.95,
            epsilon: 1e-8,
            l2: 0.,
        }
    }
}

impl TraitTrainingAlgorithm for AdadeltaInfo {
    fn algorithm_type(&self) -> TrainingAlgorithmType {
        TrainingAlgorithmType::Adadelta
    }

    fn learning_rate(&self) -> Option<f32> {
        None
    }

    fn init_state(&self, shape: &[usize]) -> Option<OptimizerState> {
        Some(OptimizerState::Adadelta {
            grad_sq_avg: Tensor::zeros(shape),
            delta_sq_avg: Tensor::zeros(shape),
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
        let (grad_sq_avg, delta_sq_avg) = match state {
            Some(OptimizerState::Adadelta {
                grad_sq_avg,
                delta_sq_avg,
            }) => (grad_sq_avg, delta_sq_avg),
            other => return Err(state_mismatch(self.algorithm_type(), other.as_deref())),
        };
        let (rho, epsilon) = (self.rho, self.epsilon);
        let gradient = with_l2(weight, gradient, self.l2);

        *grad_sq_avg *= rho;
        *grad_sq_avg += (1. - rho) * (&gradient * &gradient);

        let rms_delta = (&*delta_sq_avg + epsilon).sqrt();
        let rms_gradient = (&*grad_sq_avg + epsilon).sqrt();
        let delta = -(rms_delta / rms_gradient * &gradient);

        *delta_sq_avg *= rho;
        *delta_sq_avg += (1. - rho) * (&delta * &delta);
        Ok(delta)
    }
}
