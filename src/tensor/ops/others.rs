use crate::errors::Operator;
use crate::tensor::Tensor;
use approx::AbsDiffEq;
use std::ops::Neg;

impl Neg for Tensor {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.data.mapv_inplace(|x| -x);
        self
    }
}

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        Tensor {
            data: self.data.mapv(|x| -x),
        }
    }
}

impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

/// 用于带容差的比较，如：`assert_abs_diff_eq!(a, b, epsilon = 1e-6)`
impl AbsDiffEq for Tensor {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.is_same_shape(other)
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl Tensor {
    /// 逐元素开平方
    pub fn sqrt(&self) -> Self {
        self.map(f32::sqrt)
    }

    /// 逐元素取绝对值
    pub fn abs(&self) -> Self {
        self.map(f32::abs)
    }

    /// 逐元素取两个张量中的较大值（形状须一致或其中一个为标量）
    pub fn maximum(&self, other: &Self) -> Self {
        self.elementwise(other, Operator::Maximum, f32::max)
    }

    /// 对每个元素应用`f`，返回新的张量
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            data: self.data.mapv(f),
        }
    }
}
