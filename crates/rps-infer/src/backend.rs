use crate::{InferError, ModelSource, Session};

/// Inference runtime able to load a model into a runnable [`Session`].
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;
    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError>;
}
