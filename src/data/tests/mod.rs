
use crate::tensor::Tensor;

/// 每行样本的身份指纹：特征行指纹 XOR 标签行指纹，排序后便于按多重集合比较
fn sorted_uids_of_matrices(x: &Tensor, y: &Tensor) -> Vec<u64> {
    let mut uids = (0..x.rows())
        .map(|i| x.row_uid(i) ^ y.row_uid(i))
        .collect::<Vec<_>>();
    uids.sort_unstable();
    uids
}
