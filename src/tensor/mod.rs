/*
 * @Description  : 张量。数据集矩阵、batch子矩阵、参数、梯度以及优化器的累积状态都以它为载体
 */

use ndarray::{Array, IxDyn};
use rand::distributions::{Distribution, Uniform};

use crate::errors::{Operator, TensorError};

mod ops {
    pub mod add;
    pub mod assign;
    pub mod div;
    pub mod mul;
    pub mod others;
    pub mod sub;
}

mod property;
mod rows;

#[cfg(test)]
mod tests;

/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：只要通Tensor初始化的都是张量（即使标量也是张量）；
/// 而通常意义上的数字（类型为usize、i32、f64等）就只是纯数（number），在这里不被认为是张量。
#[derive(Debug, Clone)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 创建一个张量，若为标量，`shape`可以是[]、[1]、[1,1]、[1,1,1]...
    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]；
    /// 注：`data`的长度必须和`shape`中所有元素的乘积相等，否则会panic。
    pub fn new(data: &[f32], shape: &[usize]) -> Self {
        Self::from_vec(data.to_vec(), shape)
    }

    /// 同`new`，但直接接管`data`的所有权，避免一次拷贝
    pub fn from_vec(data: Vec<f32>, shape: &[usize]) -> Self {
        let expected = shape.iter().product::<usize>();
        assert!(
            data.len() == expected,
            "{}",
            TensorError::DataShapeMismatch {
                data_len: data.len(),
                shape: shape.to_vec(),
                expected,
            }
        );
        let data = Array::from_shape_vec(IxDyn(shape), data)
            .unwrap_or_else(|e| panic!("无法按形状{shape:?}构建张量：{e}"));
        Self { data }
    }

    /// 创建一个所有元素均为0的张量
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// 创建一个随机张量，其值在[min, max]的闭区间
    pub fn new_random(min: f32, max: f32, shape: &[usize]) -> Self {
        let mut rng = rand::thread_rng();
        let uniform = Uniform::from(min..=max);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| uniform.sample(&mut rng))
            .collect::<Vec<_>>();
        Self::from_vec(data, shape)
    }
}

// 私有方法
impl Tensor {
    /// 两个张量逐元素运算：要么形状严格一致，要么其中一个为标量（广播到另一个的每个元素上）。
    /// 其余情况会panic
    fn elementwise(&self, other: &Self, operator: Operator, f: impl Fn(f32, f32) -> f32) -> Self {
        let data = if self.is_same_shape(other) {
            let mut data = self.data.clone();
            data.zip_mut_with(&other.data, |a, &b| *a = f(*a, b));
            data
        } else if let Some(number) = other.number() {
            self.data.mapv(|a| f(a, number))
        } else if let Some(number) = self.number() {
            other.data.mapv(|b| f(number, b))
        } else {
            panic!(
                "{}",
                TensorError::OperatorError {
                    operator,
                    tensor1_shape: self.shape().to_vec(),
                    tensor2_shape: other.shape().to_vec(),
                }
            )
        };
        Self { data }
    }

    /// 原地逐元素运算，`other`须与自身形状一致或为标量
    fn elementwise_assign(&mut self, other: &Self, operator: Operator, f: impl Fn(&mut f32, f32)) {
        if self.is_same_shape(other) {
            self.data.zip_mut_with(&other.data, |a, &b| f(a, b));
        } else if let Some(number) = other.number() {
            self.data.map_inplace(|a| f(a, number));
        } else {
            panic!(
                "{}",
                TensorError::OperatorError {
                    operator,
                    tensor1_shape: self.shape().to_vec(),
                    tensor2_shape: other.shape().to_vec(),
                }
            )
        }
    }
}
