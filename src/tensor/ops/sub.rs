/*
 * @Description  : 张量的减法，实现了两个张量“逐元素”相减（或张量与纯数）的运算，并返回一个新的张量。
 *                 该运算支持以下情况：
 *                 1. 其中一个操作数为纯数而另一个为张量：则返回的张量形状与该张量相同；
 *                 2. 两个操作数均为张量：形状须严格一致，或其中一个为标量，否则panic。
 */

use crate::errors::Operator;
use crate::tensor::Tensor;
use std::ops::Sub;

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓f32 -（不）带引用的张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl Sub<Tensor> for f32 {
    type Output = Tensor;

    fn sub(self, tensor: Tensor) -> Tensor {
        Tensor {
            data: tensor.data.mapv(|x| self - x),
        }
    }
}
impl Sub<&Tensor> for f32 {
    type Output = Tensor;

    fn sub(self, tensor: &Tensor) -> Tensor {
        Tensor {
            data: tensor.data.mapv(|x| self - x),
        }
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑f32 -（不）带引用的张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 - f32↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl Sub<f32> for Tensor {
    type Output = Self;

    fn sub(mut self, scalar: f32) -> Self {
        self.data.mapv_inplace(|x| x - scalar);
        self
    }
}
impl Sub<f32> for &Tensor {
    type Output = Tensor;

    fn sub(self, scalar: f32) -> Tensor {
        Tensor {
            data: self.data.mapv(|x| x - scalar),
        }
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 - f32↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 -（不）带引用的张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl Sub for Tensor {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        sub_within_tensors(&self, &other)
    }
}

impl Sub<&Tensor> for Tensor {
    type Output = Self;

    fn sub(self, other: &Tensor) -> Self {
        sub_within_tensors(&self, other)
    }
}

impl Sub<Tensor> for &Tensor {
    type Output = Tensor;

    fn sub(self, other: Tensor) -> Tensor {
        sub_within_tensors(self, &other)
    }
}

impl Sub<&Tensor> for &Tensor {
    type Output = Tensor;

    fn sub(self, other: &Tensor) -> Tensor {
        sub_within_tensors(self, other)
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 -（不）带引用的张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

fn sub_within_tensors(tensor_1: &Tensor, tensor_2: &Tensor) -> Tensor {
    tensor_1.elementwise(tensor_2, Operator::Sub, |a, b| a - b)
}
