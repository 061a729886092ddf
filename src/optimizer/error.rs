use thiserror::Error;

use super::TrainingAlgorithmType;

#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("参数无效: {0}")]
    InvalidArgument(String),
    #[error("形状不匹配：预期 {expected:?}，实际 {got:?}。{message}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    #[error("{algorithm:?}算法收到了不匹配的状态：{message}")]
    StateMismatch {
        algorithm: TrainingAlgorithmType,
        message: String,
    },
    #[error("优化器配置解析失败: {0}")]
    Config(#[from] serde_json::Error),
}
