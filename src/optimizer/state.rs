/*
 * @Description  : 优化器的逐参数状态
 */

use serde::{Deserialize, Serialize};

use super::TrainingAlgorithmType;
use crate::tensor::Tensor;

/// 参数句柄：调用方为每个参数张量分配的不透明标识，优化器用它来索引该参数的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParamId(pub u64);

/// 单个参数的累积状态。所有张量的形状都与该参数相同，首次更新时以全零创建
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizerState {
    /// 速度（上一次的更新量）
    Momentum { velocity: Tensor },
    /// 梯度平方的滑动平均 E[g²] 与更新量平方的滑动平均 E[Δ²]
    Adadelta {
        grad_sq_avg: Tensor,
        delta_sq_avg: Tensor,
    },
    /// 一阶矩 m 与二阶矩 v
    Adam { m: Tensor, v: Tensor },
    /// 一阶矩 m 与无穷范数 u
    AdaMax { m: Tensor, u: Tensor },
}

impl OptimizerState {
    /// 对应的算法种类
    pub fn algorithm_type(&self) -> TrainingAlgorithmType {
        match self {
            Self::Momentum { .. } => TrainingAlgorithmType::Momentum,
            Self::Adadelta { .. } => TrainingAlgorithmType::Adadelta,
            Self::Adam { .. } => TrainingAlgorithmType::Adam,
            Self::AdaMax { .. } => TrainingAlgorithmType::AdaMax,
        }
    }

    /// 状态张量（即所属参数）的形状
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Momentum { velocity } => velocity.shape(),
            Self::Adadelta { grad_sq_avg, .. } => grad_sq_avg.shape(),
            Self::Adam { m, .. } | Self::AdaMax { m, .. } => m.shape(),
        }
    }
}
