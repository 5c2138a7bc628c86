use crate::{Backend, InferError, ModelSource, Prediction, Session};
use rps_base::Tensor;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// Shared handle to a loaded classifier.
///
/// Cloning is cheap; all clones run the same session, one call at a time.
#[derive(Clone)]
pub struct ModelHandle {
    session: Arc<Mutex<Box<dyn Session>>>,
    input_name: String,
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("input_name", &self.input_name)
            .finish()
    }
}

impl ModelHandle {
    /// Wrap a session, feeding its first declared input.
    ///
    /// # Errors
    ///
    /// Returns `InferError::ModelLoad` if the model declares no inputs or no outputs.
    pub fn new(session: Box<dyn Session>) -> Result<Self, InferError> {
        let input_name = session
            .input_names()
            .first()
            .cloned()
            .ok_or_else(|| InferError::ModelLoad("model has no inputs".to_string()))?;
        if session.output_names().is_empty() {
            return Err(InferError::ModelLoad("model has no outputs".to_string()));
        }
        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
        })
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Classify one preprocessed image.
    ///
    /// `input` stays owned by the caller. The scores of the first model output
    /// are copied out and every output buffer is dropped before returning.
    pub fn predict(&self, input: &Tensor<f32>) -> Result<Prediction, InferError> {
        let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        let mut outputs = session.run(&[(self.input_name.as_str(), input)])?;

        let output_name = session
            .output_names()
            .first()
            .cloned()
            .ok_or_else(|| InferError::BackendError("model produced no outputs".to_string()))?;
        let scores = outputs
            .remove(&output_name)
            .ok_or_else(|| InferError::BackendError(format!("missing output '{output_name}'")))?
            .into_data();
        drop(outputs);

        Ok(Prediction::new(scores))
    }
}

/// Process-wide slot for the classifier, filled at most once.
///
/// Readers never wait: [`ModelCell::get`] returns `None` until loading has
/// finished. Concurrent [`ModelCell::load`] calls share one load.
#[derive(Clone, Default)]
pub struct ModelCell {
    inner: Arc<OnceCell<ModelHandle>>,
}

impl ModelCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<ModelHandle> {
        self.inner.get().cloned()
    }

    /// Like [`ModelCell::get`], as an error when loading has not finished.
    pub fn handle(&self) -> Result<ModelHandle, InferError> {
        self.get().ok_or(InferError::NotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.initialized()
    }

    /// Load the model with `loader` on the blocking pool, unless already loaded.
    ///
    /// A failed load leaves the cell empty so a later call may retry.
    pub async fn load<F>(&self, loader: F) -> Result<ModelHandle, InferError>
    where
        F: FnOnce() -> Result<Box<dyn Session>, InferError> + Send + 'static,
    {
        self.inner
            .get_or_try_init(|| async move {
                let session = tokio::task::spawn_blocking(loader)
                    .await
                    .map_err(|e| InferError::ModelLoad(e.to_string()))??;
                let handle = ModelHandle::new(session)?;
                log::info!("classifier loaded (input '{}')", handle.input_name());
                Ok::<_, InferError>(handle)
            })
            .await
            .cloned()
    }

    /// Load `source` through `backend`, unless already loaded.
    pub async fn load_from(
        &self,
        backend: Arc<dyn Backend>,
        source: ModelSource,
    ) -> Result<ModelHandle, InferError> {
        log::info!("loading classifier with {} backend", backend.name());
        self.load(move || backend.load_model(source)).await
    }
}
