/*
 * @Description  : 张量的原地运算（+=、-=、*=）。
 *                 优化器的累积状态在整个训练过程中反复更新，这里直接改写底层数据，不产生新的张量
 */

use crate::errors::Operator;
use crate::tensor::Tensor;
use std::ops::{AddAssign, MulAssign, SubAssign};

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓+=↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl AddAssign for Tensor {
    fn add_assign(&mut self, other: Self) {
        self.elementwise_assign(&other, Operator::AddAssign, |a, b| *a += b);
    }
}

impl AddAssign<&Tensor> for Tensor {
    fn add_assign(&mut self, other: &Tensor) {
        self.elementwise_assign(other, Operator::AddAssign, |a, b| *a += b);
    }
}

impl AddAssign<f32> for Tensor {
    fn add_assign(&mut self, scalar: f32) {
        self.data += scalar;
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑+=↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓-=↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl SubAssign for Tensor {
    fn sub_assign(&mut self, other: Self) {
        self.elementwise_assign(&other, Operator::SubAssign, |a, b| *a -= b);
    }
}

impl SubAssign<&Tensor> for Tensor {
    fn sub_assign(&mut self, other: &Tensor) {
        self.elementwise_assign(other, Operator::SubAssign, |a, b| *a -= b);
    }
}

impl SubAssign<f32> for Tensor {
    fn sub_assign(&mut self, scalar: f32) {
        self.data -= scalar;
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑-=↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*=↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl MulAssign for Tensor {
    fn mul_assign(&mut self, other: Self) {
        self.elementwise_assign(&other, Operator::MulAssign, |a, b| *a *= b);
    }
}

impl MulAssign<&Tensor> for Tensor {
    fn mul_assign(&mut self, other: &Tensor) {
        self.elementwise_assign(other, Operator::MulAssign, |a, b| *a *= b);
    }
}

impl MulAssign<f32> for Tensor {
    fn mul_assign(&mut self, scalar: f32) {
        self.data *= scalar;
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*=↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
