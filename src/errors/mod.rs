use thiserror::Error;
mod ops;
pub use self::ops::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    // 张量二元运算
    #[error(
        "形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
    // 数据与形状不匹配
    #[error("数据长度{data_len}与形状{shape:?}所需的元素个数{expected}不一致")]
    DataShapeMismatch {
        data_len: usize,
        shape: Vec<usize>,
        expected: usize,
    },
    // 行操作
    #[error("该操作仅适用于矩阵（阶数为2的张量），实际形状为{0:?}")]
    NotAMatrix(Vec<usize>),
    #[error("行索引越界：{index} >= {rows}")]
    RowOutOfBounds { index: usize, rows: usize },

    #[error("除数为零")]
    DivByZero,
}
