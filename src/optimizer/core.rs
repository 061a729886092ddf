/*
 * @Description  : Optimizer - 训练算法的实例状态
 *
 * 核心特性：
 * - 逐参数状态按`ParamId`惰性创建，互不共享
 * - 时间步t是实例字段，每次更新（一次`deltas`/`step`/`update`调用）只加一
 * - 一次更新中的所有形状检查都先于任何状态修改，出错时状态（包括t）保持不变
 */

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use super::{
    OptimizerError, OptimizerState, ParamId, TraitTrainingAlgorithm, TrainingAlgorithmInfo,
};
use crate::tensor::Tensor;

/// # 使用示例
/// ```ignore
/// let mut optimizer = Optimizer::new(TrainingAlgorithms::adam(0.001, 0.9, 0.999, 1e-8));
///
/// for batch in &batches {
///     let (grad_w, grad_b) = network.backward(batch.x(), batch.y())?;
///     optimizer.step(&mut [
///         (ParamId(0), &mut weights, &grad_w),
///         (ParamId(1), &mut biases, &grad_b),
///     ])?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Optimizer {
    info: TrainingAlgorithmInfo,
    states: HashMap<ParamId, OptimizerState>,
    /// 时间步
    t: usize,
}

impl Optimizer {
    pub fn new(info: TrainingAlgorithmInfo) -> Self {
        Self {
            info,
            states: HashMap::new(),
            t: 0,
        }
    }

    pub fn info(&self) -> &TrainingAlgorithmInfo {
        &self.info
    }

    pub fn learning_rate(&self) -> Option<f32> {
        self.info.learning_rate()
    }

    /// 已完成的更新次数
    pub const fn timestep(&self) -> usize {
        self.t
    }

    /// 获取指定参数的状态，用于调试和可视化优化过程
    pub fn state(&self, id: ParamId) -> Option<&OptimizerState> {
        self.states.get(&id)
    }

    /// 清空所有参数的状态并把时间步归零
    pub fn reset(&mut self) {
        self.states.clear();
        self.t = 0;
    }

    /// 丢弃单个参数的状态（例如该参数被重新初始化了），返回被丢弃的状态
    pub fn forget(&mut self, id: ParamId) -> Option<OptimizerState> {
        self.states.remove(&id)
    }

    /// 对一组`(参数句柄, 权重, 梯度)`做一次更新，按顺序返回各参数的更新量Δw（不修改权重）
    ///
    /// # 错误
    /// - 同一句柄出现多次：[`OptimizerError::InvalidArgument`]
    /// - 梯度与权重形状不一致，或与该参数已有状态的形状不一致：[`OptimizerError::ShapeMismatch`]
    pub fn deltas(
        &mut self,
        params: &[(ParamId, &Tensor, &Tensor)],
    ) -> Result<Vec<Tensor>, OptimizerError> {
        self.check_params(params)?;

        self.t += 1;
        trace!(
            "{:?}第{}次更新，共{}个参数",
            self.info.algorithm_type(),
            self.t,
            params.len()
        );

        let mut deltas = Vec::with_capacity(params.len());
        for &(id, weight, gradient) in params {
            let state = if self.states.contains_key(&id) {
                self.states.get_mut(&id)
            } else if let Some(initial) = self.info.init_state(weight.shape()) {
                debug!("为参数{id:?}创建形状为{:?}的优化器状态", weight.shape());
                Some(self.states.entry(id).or_insert(initial))
            } else {
                None
            };
            deltas.push(self.info.compute_delta(weight, gradient, state, self.t)?);
        }
        Ok(deltas)
    }

    /// 对一组参数做一次更新，并把Δw原地加到各权重上
    pub fn step(
        &mut self,
        params: &mut [(ParamId, &mut Tensor, &Tensor)],
    ) -> Result<(), OptimizerError> {
        let views = params
            .iter()
            .map(|(id, weight, gradient)| (*id, &**weight, *gradient))
            .collect::<Vec<_>>();
        let deltas = self.deltas(&views)?;

        for ((_, weight, _), delta) in params.iter_mut().zip(deltas) {
            **weight += &delta;
        }
        Ok(())
    }

    /// 只有一个参数时的[`Self::step`]
    pub fn update(
        &mut self,
        id: ParamId,
        weight: &mut Tensor,
        gradient: &Tensor,
    ) -> Result<(), OptimizerError> {
        self.step(&mut [(id, weight, gradient)])
    }

    fn check_params(&self, params: &[(ParamId, &Tensor, &Tensor)]) -> Result<(), OptimizerError> {
        let mut seen = HashSet::with_capacity(params.len());
        for &(id, weight, gradient) in params {
            if !seen.insert(id) {
                return Err(OptimizerError::InvalidArgument(format!(
                    "参数{id:?}在同一次更新中出现了多次"
                )));
            }
            if !weight.is_same_shape(gradient) {
                return Err(OptimizerError::ShapeMismatch {
                    expected: weight.shape().to_vec(),
                    got: gradient.shape().to_vec(),
                    message: format!("参数{id:?}的梯度形状与权重形状不一致"),
                });
            }
            match self.states.get(&id) {
                Some(state) if state.shape() != weight.shape() => {
                    return Err(OptimizerError::ShapeMismatch {
                        expected: state.shape().to_vec(),
                        got: weight.shape().to_vec(),
                        message: format!("参数{id:?}的形状与其已有的优化器状态不一致"),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}
