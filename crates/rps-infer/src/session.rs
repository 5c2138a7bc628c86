use crate::InferError;
use rps_base::Tensor;
use std::collections::HashMap;

/// A loaded model.
///
/// Inputs are borrowed: the caller keeps ownership of its tensors and decides
/// when they are released. Outputs are returned owned.
pub trait Session: Send {
    fn run(
        &mut self,
        inputs: &[(&str, &Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
