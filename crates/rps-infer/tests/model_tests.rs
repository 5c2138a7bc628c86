use rps_base::Tensor;
use rps_infer::{Backend, InferError, ModelCell, ModelHandle, ModelSource, Session};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct MockSession {
    scores: Vec<f32>,
    inputs: Vec<String>,
    outputs: Vec<String>,
    seen_shapes: Arc<std::sync::Mutex<Vec<Vec<usize>>>>,
}

impl MockSession {
    fn new(scores: Vec<f32>) -> Self {
        Self {
            scores,
            inputs: vec!["input_1".to_string()],
            outputs: vec!["scores".to_string()],
            seen_shapes: Arc::default(),
        }
    }
}

impl Session for MockSession {
    fn run(
        &mut self,
        inputs: &[(&str, &Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        let (name, tensor) = inputs[0];
        if name != self.inputs[0] {
            return Err(InferError::InvalidInput {
                name: name.to_string(),
                expected_names: self.inputs.clone(),
            });
        }
        self.seen_shapes.lock().unwrap().push(tensor.shape.clone());
        let mut outputs = HashMap::new();
        outputs.insert(
            "scores".to_string(),
            Tensor::new(vec![1, self.scores.len()], self.scores.clone())?,
        );
        Ok(outputs)
    }

    fn input_names(&self) -> &[String] {
        &self.inputs
    }

    fn output_names(&self) -> &[String] {
        &self.outputs
    }
}

fn input() -> Tensor<f32> {
    Tensor::filled(vec![1, 224, 224, 3], 0.0).unwrap()
}

#[test]
fn test_predict_returns_scores() {
    let handle = ModelHandle::new(Box::new(MockSession::new(vec![0.1, 0.2, 0.7]))).unwrap();
    assert_eq!(handle.input_name(), "input_1");

    let tensor = input();
    let prediction = handle.predict(&tensor).unwrap();
    assert_eq!(prediction.scores(), &[0.1, 0.2, 0.7]);
    assert_eq!(prediction.argmax(), Some(2));

    // the caller still owns the input
    assert_eq!(tensor.shape, vec![1, 224, 224, 3]);
}

#[test]
fn test_predict_passes_input_through() {
    let session = MockSession::new(vec![1.0, 0.0, 0.0]);
    let seen = Arc::clone(&session.seen_shapes);
    let handle = ModelHandle::new(Box::new(session)).unwrap();

    handle.predict(&input()).unwrap();
    handle.clone().predict(&input()).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], vec![1, 224, 224, 3]);
}

#[test]
fn test_handle_rejects_model_without_inputs() {
    let mut session = MockSession::new(vec![1.0]);
    session.inputs.clear();
    let err = ModelHandle::new(Box::new(session)).unwrap_err();
    assert!(matches!(err, InferError::ModelLoad(_)));
}

#[test]
fn test_handle_rejects_model_without_outputs() {
    let mut session = MockSession::new(vec![1.0]);
    session.outputs.clear();
    let err = ModelHandle::new(Box::new(session)).unwrap_err();
    assert!(matches!(err, InferError::ModelLoad(_)));
}

#[tokio::test]
async fn test_cell_empty_before_load() {
    let cell = ModelCell::new();
    assert!(cell.get().is_none());
    assert!(matches!(cell.handle(), Err(InferError::NotLoaded)));
    assert!(!cell.is_loaded());
}

#[tokio::test]
async fn test_cell_loads_once() {
    let cell = ModelCell::new();
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let calls = Arc::clone(&calls);
        cell.load(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(MockSession::new(vec![0.0, 1.0, 0.0])) as Box<dyn Session>)
        })
        .await
        .unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(cell.is_loaded());
    let prediction = cell.get().unwrap().predict(&input()).unwrap();
    assert_eq!(prediction.argmax(), Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_loads_share_one_load() {
    let cell = ModelCell::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let mut tasks = Vec::new();
    for _ in 0..4 {
        let cell = cell.clone();
        let calls = Arc::clone(&calls);
        tasks.push(tokio::spawn(async move {
            cell.load(move || {
                calls.fetch_add(1, Ordering::SeqCst);
                std::thread::sleep(std::time::Duration::from_millis(20));
                Ok(Box::new(MockSession::new(vec![1.0])) as Box<dyn Session>)
            })
            .await
            .map(|_| ())
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_load_leaves_cell_empty() {
    let cell = ModelCell::new();
    let err = cell
        .load(|| Err(InferError::ModelLoad("no such file".to_string())))
        .await
        .unwrap_err();
    assert!(matches!(err, InferError::ModelLoad(_)));
    assert!(cell.get().is_none());

    cell.load(|| Ok(Box::new(MockSession::new(vec![1.0])) as Box<dyn Session>))
        .await
        .unwrap();
    assert!(cell.is_loaded());
}

struct MockBackend;

impl Backend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        match model {
            ModelSource::Memory(bytes) => {
                let scores = bytes.iter().map(|&b| b as f32).collect();
                Ok(Box::new(MockSession::new(scores)))
            }
            ModelSource::File(path) => Err(InferError::ModelLoad(format!(
                "{} not found",
                path.display()
            ))),
        }
    }
}

#[tokio::test]
async fn test_load_from_backend() {
    let cell = ModelCell::new();
    let backend: Arc<dyn Backend> = Arc::new(MockBackend);

    let err = cell
        .load_from(Arc::clone(&backend), ModelSource::File("missing.onnx".into()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("missing.onnx"));

    let handle = cell
        .load_from(backend, ModelSource::Memory(vec![3, 9, 1]))
        .await
        .unwrap();
    assert_eq!(handle.predict(&input()).unwrap().argmax(), Some(1));
}
