use crate::Device;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    BackendError(String),
    ModelLoad(String),
    InvalidInput {
        name: String,
        expected_names: Vec<String>,
    },
    UnsupportedDtype(String),
    UnsupportedDevice(Device),
    ShapeMismatch {
        expected: String,
        got: String,
    },
    NotLoaded,
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::BackendError(msg) => write!(f, "backend error: {msg}"),
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(
                f,
                "invalid input '{name}', model expects one of: {}",
                expected_names.join(", ")
            ),
            InferError::UnsupportedDtype(msg) => write!(f, "unsupported dtype: {msg}"),
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::NotLoaded => write!(f, "model not loaded yet"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<rps_base::TensorError> for InferError {
    fn from(err: rps_base::TensorError) -> Self {
        InferError::BackendError(format!("tensor error: {err}"))
    }
}
