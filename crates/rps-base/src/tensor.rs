use std::fmt;

#[derive(Debug, PartialEq)]
pub enum TensorError {
    ShapeOverflow,
    ShapeMismatch { expected: usize, got: usize },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::ShapeOverflow => write!(f, "shape dimensions overflow when multiplied"),
            TensorError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected} elements, got {got}")
            }
        }
    }
}

impl std::error::Error for TensorError {}

/// Number of elements described by `shape`.
///
/// An empty shape describes a scalar (one element).
pub fn element_count(shape: &[usize]) -> Result<usize, TensorError> {
    shape.iter().try_fold(1usize, |acc, &dim| {
        acc.checked_mul(dim).ok_or(TensorError::ShapeOverflow)
    })
}

/// Dense row-major buffer with an explicit shape.
///
/// Image tensors in this workspace use HWC layout, batched ones NHWC.
/// The buffer is owned: dropping the tensor releases it.
#[derive(Clone, PartialEq)]
pub struct Tensor<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

// Model inputs hold ~150k values, so only a short prefix is printed.
const DEBUG_PREVIEW: usize = 8;

impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview = &self.data[..self.data.len().min(DEBUG_PREVIEW)];
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("len", &self.data.len())
            .field("data", &preview)
            .finish()
    }
}

impl<T> Tensor<T> {
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, TensorError> {
        let expected = element_count(&shape)?;
        if expected != data.len() {
            return Err(TensorError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Prepend a batch dimension of size 1, e.g. `[H, W, C]` -> `[1, H, W, C]`.
    pub fn unsqueeze(mut self) -> Self {
        self.shape.insert(0, 1);
        self
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> Tensor<T> {
    pub fn filled(shape: Vec<usize>, value: T) -> Result<Self, TensorError> {
        let count = element_count(&shape)?;
        Ok(Self {
            shape,
            data: vec![value; count],
        })
    }
}

impl<T> Tensor<T>
where
    T: Copy + Into<f32>,
{
    /// Map every element through `f` into a new `f32` tensor of the same shape.
    pub fn map_f32(&self, f: impl Fn(f32) -> f32) -> Tensor<f32> {
        Tensor {
            shape: self.shape.clone(),
            data: self.data.iter().map(|&v| f(v.into())).collect(),
        }
    }
}
