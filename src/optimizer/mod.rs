/*
 * @Description  : 梯度优化器族
 *
 * 由两部分组成：
 * - `TrainingAlgorithmInfo`：算法种类 + 超参数，不可变，可序列化为JSON；
 *   通过`TrainingAlgorithms`工厂按默认超参数构建；
 * - `Optimizer`：持有某个算法的实例状态，即按`ParamId`惰性创建的逐参数累积量，
 *   以及Adam族共用的时间步`t`。
 *
 * 各算法的更新公式（g为梯度，w为权重，Δw为返回的更新量，w' = w + Δw）：
 * - SGD：Δw = -η·(g + λw)
 * - Momentum：v = μv - η·(g + λw)；Δw = v（μ ≤ 0 时退化为SGD）
 * - Adadelta：E[g²]、E[Δ²]的指数滑动平均，无学习率
 * - Adam：带偏差修正的一阶/二阶矩估计
 * - AdaMax：以无穷范数代替Adam的二阶矩
 */

mod adadelta;
mod adam;
mod core;
mod error;
mod info;
mod sgd;
mod state;

#[cfg(test)]
mod tests;

pub use adadelta::AdadeltaInfo;
pub use adam::{AdaMaxInfo, AdamInfo};
pub use self::core::Optimizer;
pub use error::OptimizerError;
pub use info::{TraitTrainingAlgorithm, TrainingAlgorithmInfo, TrainingAlgorithmType, TrainingAlgorithms};
pub use sgd::{MomentumInfo, StochasticGradientDescentInfo};
pub use state::{OptimizerState, ParamId};
