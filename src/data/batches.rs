/*
 * @Description  : BatchesCollection - 把数据集切分为有序的minibatch序列
 *
 * 提供：
 * - 按固定大小切分（最后一个batch可能不足）
 * - 由矩阵对或由逐个样本对两种方式构建，内容相同时结果一致
 * - 原地交叉洗牌（cross-shuffle）：样本在所有batch之间随机重新分布，
 *   每个batch的行数保持不变，样本既不丢失也不重复
 */

use std::ops::Index;

use log::{debug, warn};
use rand::Rng;

use super::dataset::check_pair;
use super::{DataError, Dataset};
use crate::tensor::Tensor;

/// 一个minibatch：特征子矩阵`x`与标签子矩阵`y`，两者行数一致
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    x: Tensor,
    y: Tensor,
}

impl Batch {
    /// 特征子矩阵，形状为 `[行数, 特征数]`
    pub fn x(&self) -> &Tensor {
        &self.x
    }

    /// 标签子矩阵，形状为 `[行数, 输出数]`
    pub fn y(&self) -> &Tensor {
        &self.y
    }

    /// 本batch中的样本数
    pub fn len(&self) -> usize {
        self.x.rows()
    }

    /// 本batch是否不含任何样本
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 判断两个batch的特征与标签是否完全一致
    pub fn content_equals(&self, other: &Self) -> bool {
        self.x.content_equals(&other.x) && self.y.content_equals(&other.y)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        self.x.swap_rows(a, b);
        self.y.swap_rows(a, b);
    }

    fn swap_rows_with(&mut self, row: usize, other: &mut Self, other_row: usize) {
        self.x.swap_rows_between(row, &mut other.x, other_row);
        self.y.swap_rows_between(row, &mut other.y, other_row);
    }
}

/// 按顺序排列的所有batch
///
/// # 示例
/// ```ignore
/// let mut batches = BatchesCollection::from_dataset(&dataset, 100)?;
/// for batch in &batches {
///     network.forward(batch.x())?;
/// }
/// batches.cross_shuffle();
/// ```
#[derive(Debug, Clone)]
pub struct BatchesCollection {
    batches: Vec<Batch>,
    /// 样本总数
    samples_count: usize,
    /// 构建时指定的batch大小（除最后一个外，每个batch的行数都等于它）
    batch_size: usize,
}

impl BatchesCollection {
    /// 由数据集构建
    pub fn from_dataset(dataset: &Dataset, batch_size: usize) -> Result<Self, DataError> {
        Self::from_tensors(dataset.features(), dataset.labels(), batch_size)
    }

    /// 由行对齐的特征矩阵`x`与标签矩阵`y`构建。
    /// 共产生`ceil(N / batch_size)`个batch，行顺序与数据集一致（构建时不打乱）。
    ///
    /// # 错误
    /// `batch_size`为0，或`x`与`y`不是行数一致的矩阵时返回 [`DataError::InvalidArgument`]
    pub fn from_tensors(x: &Tensor, y: &Tensor, batch_size: usize) -> Result<Self, DataError> {
        check_batch_size(batch_size)?;
        check_pair(x, y)?;

        let samples_count = x.rows();
        let batches = (0..samples_count)
            .step_by(batch_size)
            .map(|start| {
                let end = (start + batch_size).min(samples_count);
                Batch {
                    x: x.slice_rows(start, end),
                    y: y.slice_rows(start, end),
                }
            })
            .collect();
        Ok(Self::new(batches, samples_count, batch_size))
    }

    /// 由按顺序排列的`(特征行, 标签行)`样本对构建。
    /// 与 [`Self::from_tensors`] 给定相同内容时，得到的batch逐一内容相同。
    ///
    /// # 错误
    /// - `batch_size`为0时返回 [`DataError::InvalidArgument`]
    /// - 某个样本的特征/标签长度与首个样本不一致时返回 [`DataError::ShapeMismatch`]
    pub fn from_samples<I, X, Y>(samples: I, batch_size: usize) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (X, Y)>,
        X: AsRef<[f32]>,
        Y: AsRef<[f32]>,
    {
        check_batch_size(batch_size)?;

        let mut widths: Option<(usize, usize)> = None;
        let mut batches = Vec::new();
        let (mut xs, mut ys) = (Vec::new(), Vec::new());
        let mut rows = 0;
        let mut samples_count = 0;
        for (x, y) in samples {
            let (x, y) = (x.as_ref(), y.as_ref());
            let (x_cols, y_cols) = *widths.get_or_insert((x.len(), y.len()));
            if x.len() != x_cols || y.len() != y_cols {
                return Err(DataError::ShapeMismatch {
                    expected: vec![x_cols, y_cols],
                    got: vec![x.len(), y.len()],
                    message: format!("第{samples_count}个样本的特征/标签长度与首个样本不一致"),
                });
            }
            xs.extend_from_slice(x);
            ys.extend_from_slice(y);
            rows += 1;
            samples_count += 1;

            if rows == batch_size {
                batches.push(Batch {
                    x: Tensor::from_vec(std::mem::take(&mut xs), &[rows, x_cols]),
                    y: Tensor::from_vec(std::mem::take(&mut ys), &[rows, y_cols]),
                });
                rows = 0;
            }
        }
        if let Some((x_cols, y_cols)) = widths.filter(|_| rows > 0) {
            batches.push(Batch {
                x: Tensor::from_vec(xs, &[rows, x_cols]),
                y: Tensor::from_vec(ys, &[rows, y_cols]),
            });
        }
        Ok(Self::new(batches, samples_count, batch_size))
    }

    fn new(batches: Vec<Batch>, samples_count: usize, batch_size: usize) -> Self {
        if batch_size > samples_count && samples_count > 0 {
            warn!("batch大小（{batch_size}）大于样本总数（{samples_count}），只会得到1个batch");
        }
        debug!(
            "数据集划分完成：{samples_count}个样本，batch大小{batch_size}，共{}个batch",
            batches.len()
        );
        Self {
            batches,
            samples_count,
            batch_size,
        }
    }

    /// batch的数量
    pub fn count(&self) -> usize {
        self.batches.len()
    }

    /// 是否一个batch都没有（即数据集为空）
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// 样本总数
    pub fn samples_count(&self) -> usize {
        self.samples_count
    }

    /// 构建时指定的batch大小
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// 按顺序排列的所有batch
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// 按顺序遍历所有batch
    pub fn iter(&self) -> std::slice::Iter<'_, Batch> {
        self.batches.iter()
    }

    /// 使用线程本地的随机源做一次交叉洗牌，见 [`Self::cross_shuffle_with_rng`]
    pub fn cross_shuffle(&mut self) -> &mut Self {
        self.cross_shuffle_with_rng(&mut rand::thread_rng())
    }

    /// 交叉洗牌：把所有batch视为一个长度为N的扁平索引空间，对其做一次均匀随机置换
    /// （Fisher–Yates），并把结果原地写回各batch现有的行位置。
    ///
    /// batch数量与每个batch的行数均保持不变，只有“哪个样本占据哪一行”会改变；
    /// 特征行与其标签行始终一起移动。
    pub fn cross_shuffle_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        for i in (1..self.samples_count).rev() {
            let j = rng.gen_range(0..=i);
            self.swap_samples(i, j);
        }
        debug!("已对{}个batch中的{}个样本完成交叉洗牌", self.count(), self.samples_count);
        self
    }

    /// 扁平索引 -> (batch序号, batch内行号)
    fn locate(&self, index: usize) -> (usize, usize) {
        (index / self.batch_size, index % self.batch_size)
    }

    fn swap_samples(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (batch_a, row_a) = self.locate(a);
        let (batch_b, row_b) = self.locate(b);
        if batch_a == batch_b {
            self.batches[batch_a].swap_rows(row_a, row_b);
            return;
        }

        let ((low, low_row), (high, high_row)) = if batch_a < batch_b {
            ((batch_a, row_a), (batch_b, row_b))
        } else {
            ((batch_b, row_b), (batch_a, row_a))
        };
        let (head, tail) = self.batches.split_at_mut(high);
        head[low].swap_rows_with(low_row, &mut tail[0], high_row);
    }
}

impl Index<usize> for BatchesCollection {
    type Output = Batch;

    fn index(&self, index: usize) -> &Batch {
        &self.batches[index]
    }
}

impl<'a> IntoIterator for &'a BatchesCollection {
    type Item = &'a Batch;
    type IntoIter = std::slice::Iter<'a, Batch>;

    fn into_iter(self) -> Self::IntoIter {
        self.batches.iter()
    }
}

fn check_batch_size(batch_size: usize) -> Result<(), DataError> {
    if batch_size == 0 {
        return Err(DataError::InvalidArgument(
            "batch大小必须大于0".to_string(),
        ));
    }
    Ok(())
}
