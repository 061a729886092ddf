//! # Train Core
//!
//! `train_core`是监督学习训练器的数值核心，只负责两件事：
//! 1. [`data`]：把带标签的数据集切分为若干minibatch，并在每个epoch之间做“交叉洗牌”
//!    （cross-shuffle），保证样本既不丢失也不重复；
//! 2. [`optimizer`]：SGD、Momentum、Adadelta、Adam、AdaMax这一族梯度更新规则，
//!    把原始梯度转换为（带正则化的）参数增量，并在整个训练过程中维护每个参数的累积状态。
//!
//! 网络拓扑、前向/反向传播、数据文件解析以及训练循环本身均不在本库范围内。
//!

pub mod data;
pub mod errors;
pub mod optimizer;
pub mod tensor;
pub mod utils;
