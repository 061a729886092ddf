/*
 * @Description  : 矩阵（阶数为2的张量）的按行操作。
 *                 数据集中每一行就是一个样本，batch的切分与交叉洗牌都以“行”为最小单位，
 *                 所以这里的交换均为原地（in-place）进行，不会重新分配内存。
 */

use std::hash::{DefaultHasher, Hash, Hasher};

use super::Tensor;
use crate::errors::{Operator, TensorError};
use ndarray::{ArrayViewD, Axis, Slice, Zip};

impl Tensor {
    /// 矩阵的行数
    pub fn rows(&self) -> usize {
        self.assert_matrix();
        self.shape()[0]
    }

    /// 第`index`行的视图
    pub fn row(&self, index: usize) -> ArrayViewD<'_, f32> {
        self.assert_row_index(index);
        self.data.index_axis(Axis(0), index)
    }

    /// 拷贝出`[start, end)`区间内的行，组成一个新的矩阵
    pub fn slice_rows(&self, start: usize, end: usize) -> Self {
        self.assert_matrix();
        assert!(
            start <= end && end <= self.shape()[0],
            "{}",
            TensorError::RowOutOfBounds {
                index: end,
                rows: self.shape()[0],
            }
        );
        Self {
            data: self
                .data
                .slice_axis(Axis(0), Slice::from(start..end))
                .to_owned(),
        }
    }

    /// 原地交换本矩阵内的两行
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.assert_row_index(a);
        self.assert_row_index(b);
        if a == b {
            return;
        }
        for col in 0..self.shape()[1] {
            self.data.swap([a, col].as_slice(), [b, col].as_slice());
        }
    }

    /// 原地交换本矩阵第`row`行与另一个矩阵第`other_row`行，两者列数必须一致
    pub fn swap_rows_between(&mut self, row: usize, other: &mut Self, other_row: usize) {
        self.assert_row_index(row);
        other.assert_row_index(other_row);
        assert!(
            self.shape()[1] == other.shape()[1],
            "{}",
            TensorError::OperatorError {
                operator: Operator::SwapRows,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        let mut mine = self.data.index_axis_mut(Axis(0), row);
        let mut theirs = other.data.index_axis_mut(Axis(0), other_row);
        Zip::from(&mut mine)
            .and(&mut theirs)
            .for_each(|a, b| std::mem::swap(a, b));
    }

    /// 由第`index`行的内容计算出的指纹（非加密哈希）。
    /// 内容相同的行指纹必然相同，与行所在的位置无关
    pub fn row_uid(&self, index: usize) -> u64 {
        let mut hasher = DefaultHasher::new();
        for value in self.row(index).iter() {
            value.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }

    /// 判断两个张量的形状与内容是否完全一致
    pub fn content_equals(&self, other: &Self) -> bool {
        self.is_same_shape(other) && self.data == other.data
    }
}

// 私有方法
impl Tensor {
    fn assert_matrix(&self) {
        assert!(
            self.dimension() == 2,
            "{}",
            TensorError::NotAMatrix(self.shape().to_vec())
        );
    }

    fn assert_row_index(&self, index: usize) {
        self.assert_matrix();
        let rows = self.shape()[0];
        assert!(
            index < rows,
            "{}",
            TensorError::RowOutOfBounds { index, rows }
        );
    }
}
