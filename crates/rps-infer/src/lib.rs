//! Gesture classifier adapter.
//!
//! A [`Backend`] turns a [`ModelSource`] into a [`Session`]; a [`ModelHandle`]
//! wraps that session and exposes the one call the game needs:
//! [`ModelHandle::predict`], image tensor in, [`Prediction`] out. The model is
//! loaded at most once per process through a shared [`ModelCell`].

pub mod backend;
pub mod backends;
pub mod device;
pub mod error;
pub mod labels;
pub mod model;
pub mod modelsource;
pub mod prediction;
pub mod session;

pub use backend::Backend;
pub use device::Device;
pub use error::InferError;
pub use labels::{Gesture, LabelTable};
pub use model::{ModelCell, ModelHandle};
pub use modelsource::ModelSource;
pub use prediction::Prediction;
pub use session::Session;

#[cfg(feature = "onnx")]
pub use backends::OnnxBackend;
