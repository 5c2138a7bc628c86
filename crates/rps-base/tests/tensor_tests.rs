use rps_base::{element_count, Tensor, TensorError};

#[test]
fn test_new_accepts_matching_shape() {
    let tensor = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(tensor.shape, vec![2, 3]);
    assert_eq!(tensor.ndim(), 2);
    assert_eq!(tensor.len(), 6);
}

#[test]
fn test_new_rejects_short_buffer() {
    let result = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0]);
    assert_eq!(
        result.unwrap_err(),
        TensorError::ShapeMismatch { expected: 6, got: 3 }
    );
}

#[test]
fn test_new_rejects_overflowing_shape() {
    let result = Tensor::<f32>::new(vec![usize::MAX, 2], vec![]);
    assert!(matches!(result, Err(TensorError::ShapeOverflow)));
}

#[test]
fn test_element_count_scalar_shape() {
    assert_eq!(element_count(&[]).unwrap(), 1);
    assert_eq!(element_count(&[1, 224, 224, 3]).unwrap(), 150_528);
}

#[test]
fn test_tensor_filled() {
    let tensor = Tensor::filled(vec![2, 2], 0.5f32).unwrap();
    assert_eq!(tensor.data, vec![0.5; 4]);
}

#[test]
fn test_tensor_is_empty() {
    assert!(Tensor::<f32>::new(vec![0], vec![]).unwrap().is_empty());
    assert!(!Tensor::new(vec![1], vec![1.0]).unwrap().is_empty());
}

#[test]
fn test_unsqueeze_adds_batch_dimension() {
    let tensor = Tensor::new(vec![2, 2, 3], vec![0u8; 12]).unwrap().unsqueeze();
    assert_eq!(tensor.shape, vec![1, 2, 2, 3]);
    assert_eq!(tensor.len(), 12);
}

#[test]
fn test_map_f32_keeps_shape() {
    let tensor = Tensor::new(vec![1, 1, 3], vec![0u8, 127, 255]).unwrap();
    let mapped = tensor.map_f32(|v| v / 255.0);
    assert_eq!(mapped.shape, vec![1, 1, 3]);
    assert_eq!(mapped.data[0], 0.0);
    assert_eq!(mapped.data[2], 1.0);
}

#[test]
fn test_tensor_debug_truncates_data() {
    let tensor = Tensor::new(vec![100], (0..100).collect::<Vec<i32>>()).unwrap();
    let debug_str = format!("{:?}", tensor);
    assert!(debug_str.contains("shape: [100]"));
    assert!(debug_str.contains("len: 100"));
    assert!(!debug_str.contains("99"));
}
