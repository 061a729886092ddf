/*
 * @Description  : BatchesCollection集成测试：大规模数据集的划分、交叉洗牌后的样本身份，
 *                 以及两种构建方式的等价性
 */
use rand::SeedableRng;
use rand::rngs::StdRng;
use train_core::data::{BatchesCollection, Dataset};
use train_core::tensor::Tensor;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_dataset(samples: usize, features: usize, outputs: usize) -> Dataset {
    Dataset::new(
        Tensor::new_random(-1., 1., &[samples, features]),
        Tensor::new_random(0., 1., &[samples, outputs]),
    )
    .unwrap()
}

/// 所有样本（特征行 XOR 标签行）指纹的有序多重集合
fn sample_uids<'a>(pairs: impl IntoIterator<Item = (&'a Tensor, &'a Tensor)>) -> Vec<u64> {
    let mut uids = pairs
        .into_iter()
        .flat_map(|(x, y)| (0..x.rows()).map(move |i| x.row_uid(i) ^ y.row_uid(i)))
        .collect::<Vec<_>>();
    uids.sort_unstable();
    uids
}

fn batch_uids(batches: &BatchesCollection) -> Vec<u64> {
    sample_uids(batches.iter().map(|b| (b.x(), b.y())))
}

#[test]
fn test_batch_division_exact() {
    init_logger();
    let dataset = random_dataset(20000, 784, 10);
    let expected = sample_uids([(dataset.features(), dataset.labels())]);

    let mut batches = BatchesCollection::from_dataset(&dataset, 1000).unwrap();
    assert_eq!(batches.count(), 20);
    assert!(batches.iter().all(|b| b.len() == 1000));
    assert_eq!(batch_uids(&batches), expected);

    batches.cross_shuffle();
    assert_eq!(batches.count(), 20);
    assert!(batches.iter().all(|b| b.len() == 1000));
    assert_eq!(batch_uids(&batches), expected);
}

#[test]
fn test_batch_division_with_remainder() {
    init_logger();
    let dataset = random_dataset(20000, 784, 10);
    let expected = sample_uids([(dataset.features(), dataset.labels())]);

    let mut batches = BatchesCollection::from_dataset(&dataset, 1547).unwrap();
    assert_eq!(batches.count(), 13);
    assert!(batches.iter().take(12).all(|b| b.len() == 1547));
    assert_eq!(batches[12].len(), 1436);
    assert_eq!(batch_uids(&batches), expected);

    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..3 {
        batches.cross_shuffle_with_rng(&mut rng);
        assert_eq!(batches[12].len(), 1436);
        assert_eq!(batch_uids(&batches), expected);
    }
}

#[test]
fn test_batch_initialization() {
    init_logger();
    let dataset = random_dataset(250, 600, 10);

    let by_matrix = BatchesCollection::from_dataset(&dataset, 100).unwrap();
    let by_samples = BatchesCollection::from_samples(dataset.samples(), 100).unwrap();

    let sizes = by_matrix.iter().map(|b| b.len()).collect::<Vec<_>>();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(by_samples.count(), 3);
    for (b1, b2) in by_matrix.iter().zip(&by_samples) {
        assert_eq!(b1.x().shape(), &[b1.len(), 600]);
        assert_eq!(b1.y().shape(), &[b1.len(), 10]);
        assert!(b1.content_equals(b2));
    }
}
