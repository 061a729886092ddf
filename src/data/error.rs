//! 数据划分相关错误类型定义

use thiserror::Error;

/// 数据划分相关错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    /// 参数无效（如 batch 大小为 0、特征与标签的样本数不一致）
    #[error("参数无效: {0}")]
    InvalidArgument(String),

    /// 形状不匹配
    #[error("形状不匹配: 期望 {expected:?}, 实际 {got:?}, {message}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
}
