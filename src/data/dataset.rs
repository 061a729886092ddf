/*
 * @Description  : Dataset - 行对齐的特征矩阵与标签矩阵
 *
 * 每一行代表一个样本：特征矩阵第 i 行与标签矩阵第 i 行构成一个不可拆分的样本对。
 */

use super::DataError;
use crate::tensor::Tensor;

/// Dataset - 持有特征和标签的数据集
///
/// # 示例
/// ```ignore
/// let dataset = Dataset::new(features, labels)?;
/// println!("样本数: {}", dataset.len());
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Tensor,
    labels: Tensor,
}

impl Dataset {
    /// 创建新的 Dataset
    ///
    /// # 参数
    /// - `features`: 特征矩阵，形状为 `[样本数, 特征数]`
    /// - `labels`: 标签矩阵，形状为 `[样本数, 输出数]`（样本数必须与 features 一致）
    ///
    /// # 错误
    /// 任一张量不是矩阵，或两者行数不一致时返回 [`DataError::InvalidArgument`]
    pub fn new(features: Tensor, labels: Tensor) -> Result<Self, DataError> {
        check_pair(&features, &labels)?;
        Ok(Self { features, labels })
    }

    /// 获取样本数量
    pub fn len(&self) -> usize {
        self.features.rows()
    }

    /// 检查数据集是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 获取特征矩阵引用
    pub fn features(&self) -> &Tensor {
        &self.features
    }

    /// 获取标签矩阵引用
    pub fn labels(&self) -> &Tensor {
        &self.labels
    }

    /// 按行顺序逐个拷贝出`(特征行, 标签行)`样本对
    pub fn samples(&self) -> impl Iterator<Item = (Vec<f32>, Vec<f32>)> + '_ {
        (0..self.len()).map(|i| {
            (
                self.features.row(i).iter().copied().collect(),
                self.labels.row(i).iter().copied().collect(),
            )
        })
    }
}

/// 校验特征/标签是否构成合法的数据集：两者都是矩阵，且行数一致
pub(super) fn check_pair(features: &Tensor, labels: &Tensor) -> Result<(), DataError> {
    for (name, tensor) in [("特征", features), ("标签", labels)] {
        if tensor.dimension() != 2 {
            return Err(DataError::InvalidArgument(format!(
                "{name}必须是矩阵（阶数为2的张量），实际形状为{:?}",
                tensor.shape()
            )));
        }
    }
    if features.rows() != labels.rows() {
        return Err(DataError::InvalidArgument(format!(
            "特征和标签的样本数必须一致，得到 {} vs {}",
            features.rows(),
            labels.rows()
        )));
    }
    Ok(())
}
