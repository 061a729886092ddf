//! 数据划分模块
//!
//! 把带标签的数据集切分为若干固定大小的minibatch，并支持在epoch之间做原地“交叉洗牌”。
//!
//! # 主要组件
//!
//! - [`Dataset`]: 行对齐的特征矩阵 + 标签矩阵
//! - [`Batch`]: 一个minibatch（特征子矩阵 + 标签子矩阵）
//! - [`BatchesCollection`]: 按顺序排列的所有batch，支持交叉洗牌
//! - [`DataError`]: 数据划分错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use train_core::data::{BatchesCollection, Dataset};
//!
//! let dataset = Dataset::new(train_x, train_y)?;
//! let mut batches = BatchesCollection::from_dataset(&dataset, 100)?;
//!
//! for epoch in 0..epochs {
//!     for batch in batches.iter() {
//!         // 前向/反向传播得到梯度，再交给优化器
//!     }
//!     batches.cross_shuffle();
//! }
//! ```

mod batches;
mod dataset;
pub mod error;

#[cfg(test)]
mod tests;

// Re-exports
pub use batches::{Batch, BatchesCollection};
pub use dataset::Dataset;
pub use error::DataError;
