use crate::assert_panic;
use crate::errors::TensorError;
use crate::tensor::Tensor;

#[test]
fn test_new_and_properties() {
    // 标量
    let tensor = Tensor::new(&[1.], &[]);
    assert_eq!(tensor.shape(), &[] as &[usize]);
    assert_eq!(tensor.dimension(), 0);
    assert!(tensor.is_scalar());
    assert_eq!(tensor.number(), Some(1.));

    let tensor = Tensor::new(&[2.], &[1, 1]);
    assert!(tensor.is_scalar());
    assert_eq!(tensor.number(), Some(2.));

    // 矩阵
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    assert_eq!(tensor.shape(), &[2, 3]);
    assert_eq!(tensor.dimension(), 2);
    assert!(!tensor.is_scalar());
    assert_eq!(tensor.number(), None);
    assert_eq!(tensor.to_vec(), vec![1., 2., 3., 4., 5., 6.]);
}

#[test]
fn test_new_with_mismatched_data() {
    assert_panic!(
        Tensor::new(&[1., 2.], &[1, 1, 1]),
        TensorError::DataShapeMismatch {
            data_len: 2,
            shape: vec![1, 1, 1],
            expected: 1,
        }
    );
}

#[test]
fn test_zeros() {
    let tensor = Tensor::zeros(&[3, 2]);
    assert_eq!(tensor.shape(), &[3, 2]);
    assert!(tensor.to_vec().iter().all(|&x| x == 0.));
}

#[test]
fn test_new_random_within_range() {
    let tensor = Tensor::new_random(-2., 3., &[10, 10]);
    assert_eq!(tensor.shape(), &[10, 10]);
    assert!(tensor.to_vec().iter().all(|&x| (-2. ..=3.).contains(&x)));
}
