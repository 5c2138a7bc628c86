use crate::{Backend, Device, InferError, ModelSource, Session};
use ndarray::{ArrayViewD, IxDyn};
use ort::{inputs, session::Session as OrtSession, value::TensorRef};
use rps_base::Tensor;
use std::collections::HashMap;
use std::sync::OnceLock;

static ORT_INIT: OnceLock<()> = OnceLock::new();

fn ensure_ort_init() {
    ORT_INIT.get_or_init(|| {
        let _ = ort::init().with_name("rps").commit();
    });
}

/// ONNX Runtime backend.
pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        ensure_ort_init();
        Self { device }
    }
}

impl Default for OnnxBackend {
    fn default() -> Self {
        Self::new(Device::Cpu)
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        let mut builder = OrtSession::builder().map_err(|e| {
            InferError::BackendError(format!("failed to create session builder: {e}"))
        })?;

        builder = match &self.device {
            Device::Cpu => {
                log::debug!("onnx: CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::CUDAExecutionProvider;
                log::debug!("onnx: CUDA execution provider (device_id={device_id})");
                builder
                    .with_execution_providers([CUDAExecutionProvider::default()
                        .with_device_id(*device_id)
                        .build()])
                    .map_err(|_| InferError::UnsupportedDevice(self.device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(self.device.clone()));
            }
        };

        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(&path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load {}: {e}", path.display()))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(&bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {e}"))
            })?,
        };

        let input_names = session
            .inputs()
            .iter()
            .map(|input| input.name().to_string())
            .collect();
        let output_names = session
            .outputs()
            .iter()
            .map(|output| output.name().to_string())
            .collect();

        Ok(Box::new(OnnxSession {
            session,
            input_names,
            output_names,
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, &Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        // classifier models take exactly one image input
        let [(name, tensor)] = inputs else {
            return Err(InferError::BackendError(format!(
                "expected 1 input, got {}",
                inputs.len()
            )));
        };
        if !self.input_names.iter().any(|n| n == name) {
            return Err(InferError::InvalidInput {
                name: name.to_string(),
                expected_names: self.input_names.clone(),
            });
        }

        let view = tensor_view(tensor)?;
        let input = TensorRef::from_array_view(view)
            .map_err(|e| InferError::BackendError(format!("failed to create tensor ref: {e}")))?;
        let outputs = self
            .session
            .run(inputs![*name => input])
            .map_err(|e| InferError::BackendError(format!("inference failed: {e}")))?;

        let mut result = HashMap::new();
        for output_name in &self.output_names {
            let array = outputs[output_name.as_str()]
                .try_extract_array::<f32>()
                .map_err(|e| {
                    InferError::UnsupportedDtype(format!("output '{output_name}' is not f32: {e}"))
                })?;
            let tensor = Tensor::new(array.shape().to_vec(), array.iter().copied().collect())?;
            result.insert(output_name.clone(), tensor);
        }
        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

/// Borrow `tensor` as an ndarray view; the caller keeps owning the buffer.
fn tensor_view(tensor: &Tensor<f32>) -> Result<ArrayViewD<'_, f32>, InferError> {
    ArrayViewD::from_shape(IxDyn(&tensor.shape), &tensor.data).map_err(|e| {
        InferError::ShapeMismatch {
            expected: format!("{:?}", tensor.shape),
            got: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_view_borrows_input_buffer() {
        let tensor = Tensor::filled(vec![1, 224, 224, 3], 0.5f32).unwrap();
        let view = tensor_view(&tensor).unwrap();
        assert_eq!(view.shape(), &[1, 224, 224, 3]);
        assert_eq!(view.as_ptr(), tensor.data.as_ptr());
    }

    #[test]
    fn test_tensor_view_rejects_inconsistent_shape() {
        let tensor = Tensor {
            shape: vec![1, 3],
            data: vec![0.0f32; 2],
        };
        assert!(matches!(
            tensor_view(&tensor),
            Err(InferError::ShapeMismatch { .. })
        ));
    }
}
