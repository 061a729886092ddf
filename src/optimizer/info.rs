/*
 * @Description  : 训练算法的描述（种类 + 超参数）及其工厂
 */

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use super::{
    AdaMaxInfo, AdadeltaInfo, AdamInfo, MomentumInfo, OptimizerError, OptimizerState,
    StochasticGradientDescentInfo,
};
use crate::tensor::Tensor;

/// 训练算法的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingAlgorithmType {
    StochasticGradientDescent,
    Momentum,
    Adadelta,
    Adam,
    AdaMax,
}

/// 某一次训练所用的算法及其超参数，同一次训练中所有参数张量共享同一个实例。
///
/// 序列化为带`type`标签的JSON，缺失的超参数取默认值：
/// ```json
/// { "type": "Adam", "eta": 0.01 }
/// ```
#[enum_dispatch]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TrainingAlgorithmInfo {
    StochasticGradientDescent(StochasticGradientDescentInfo),
    Momentum(MomentumInfo),
    Adadelta(AdadeltaInfo),
    Adam(AdamInfo),
    AdaMax(AdaMaxInfo),
}

#[enum_dispatch(TrainingAlgorithmInfo)]
pub trait TraitTrainingAlgorithm {
    fn algorithm_type(&self) -> TrainingAlgorithmType;

    /// 学习率η；Adadelta没有学习率
    fn learning_rate(&self) -> Option<f32>;

    /// 为形状为`shape`的参数创建全零的初始状态；无状态的算法返回`None`
    fn init_state(&self, shape: &[usize]) -> Option<OptimizerState>;

    /// 计算一次更新量Δw，同时原地推进`state`。
    ///
    /// `timestep`为本次更新所在的（从1开始的）时间步，只有Adam族会用到。
    ///
    /// # 错误
    /// 以下情况在修改`state`之前返回错误，`state`保持不变：
    /// - `gradient`与`weight`形状不一致，或`state`与`weight`形状不一致：[`OptimizerError::ShapeMismatch`]
    /// - `timestep`为0：[`OptimizerError::InvalidArgument`]
    /// - `state`缺失或属于其他算法：[`OptimizerError::StateMismatch`]
    fn compute_delta(
        &self,
        weight: &Tensor,
        gradient: &Tensor,
        state: Option<&mut OptimizerState>,
        timestep: usize,
    ) -> Result<Tensor, OptimizerError>;
}

impl TrainingAlgorithmInfo {
    pub fn to_json(&self) -> Result<String, OptimizerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, OptimizerError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// 按默认超参数构建各算法描述的工厂。
/// 需要默认值时可直接使用各`*Info::default()`
pub struct TrainingAlgorithms;

impl TrainingAlgorithms {
    /// 随机梯度下降（默认：η=0.1，λ=0）
    pub fn stochastic_gradient_descent(eta: f32, lambda: f32) -> TrainingAlgorithmInfo {
        StochasticGradientDescentInfo { eta, lambda }.into()
    }

    /// 带动量的随机梯度下降（默认：η=0.1，λ=0，μ=0.1）。
    /// `momentum <= 0`时等价于SGD，直接返回SGD的描述
    pub fn momentum(eta: f32, lambda: f32, momentum: f32) -> TrainingAlgorithmInfo {
        if momentum > 0. {
            MomentumInfo {
                eta,
                lambda,
                momentum,
            }
            .into()
        } else {
            Self::stochastic_gradient_descent(eta, lambda)
        }
    }

    /// Adadelta（默认：ρ=0.95，ε=1e-8，l2=0）
    pub fn adadelta(rho: f32, epsilon: f32, l2: f32) -> TrainingAlgorithmInfo {
        AdadeltaInfo { rho, epsilon, l2 }.into()
    }

    /// Adam（默认：η=0.001，β1=0.9，β2=0.999，ε=1e-8）
    pub fn adam(eta: f32, beta1: f32, beta2: f32, epsilon: f32) -> TrainingAlgorithmInfo {
        AdamInfo {
            eta,
            beta1,
            beta2,
            epsilon,
        }
        .into()
    }

    /// AdaMax（默认：η=0.002，β1=0.9，β2=0.999）
    pub fn adamax(eta: f32, beta1: f32, beta2: f32) -> TrainingAlgorithmInfo {
        AdaMaxInfo { eta, beta1, beta2 }.into()
    }
}

/// 无L2项时直接复制梯度，否则返回 g + λw
pub(super) fn with_l2(weight: &Tensor, gradient: &Tensor, lambda: f32) -> Tensor {
    if lambda == 0. {
        gradient.clone()
    } else {
        gradient + lambda * weight
    }
}

/// 单次更新的输入校验，须在任何状态修改之前调用
pub(super) fn check_inputs(
    weight: &Tensor,
    gradient: &Tensor,
    state: Option<&OptimizerState>,
    timestep: usize,
) -> Result<(), OptimizerError> {
    if timestep == 0 {
        return Err(OptimizerError::InvalidArgument(
            "时间步从1开始计数，不能为0".to_string(),
        ));
    }
    if !weight.is_same_shape(gradient) {
        return Err(OptimizerError::ShapeMismatch {
            expected: weight.shape().to_vec(),
            got: gradient.shape().to_vec(),
            message: "梯度形状与权重形状不一致".to_string(),
        });
    }
    match state {
        Some(state) if state.shape() != weight.shape() => Err(OptimizerError::ShapeMismatch {
            expected: state.shape().to_vec(),
            got: weight.shape().to_vec(),
            message: "权重形状与已有的优化器状态不一致".to_string(),
        }),
        _ => Ok(()),
    }
}

/// 有状态算法收到了错误的状态（缺失或种类不符）
pub(super) fn state_mismatch(
    algorithm: TrainingAlgorithmType,
    state: Option<&OptimizerState>,
) -> OptimizerError {
    OptimizerError::StateMismatch {
        algorithm,
        message: match state {
            Some(state) => format!("得到的是{:?}的状态", state.algorithm_type()),
            None => "缺少状态".to_string(),
        },
    }
}
