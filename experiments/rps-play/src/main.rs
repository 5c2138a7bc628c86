mod command;

use anyhow::{Context, Result};
use command::{Command, HELP, status_line};
use rps_camera::{Camera, DirectoryCamera};
use rps_game::{Game, GameConfig, GestureDetector, RandomPlayer};
use rps_infer::{InferError, LabelTable, ModelCell};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;

const MODEL_PATH_VAR: &str = "RPS_MODEL_PATH";
const FRAMES_DIR_VAR: &str = "RPS_FRAMES_DIR";
const LOG_DIR_VAR: &str = "RPS_LOG_DIR";
const DEFAULT_MODEL_PATH: &str = "models/gesture.onnx";

fn main() -> Result<()> {
    match std::env::var_os(LOG_DIR_VAR) {
        Some(dir) => rps_base::init_file_logger(PathBuf::from(&dir))
            .with_context(|| format!("cannot log to {}", PathBuf::from(&dir).display()))?,
        None => rps_base::init_stdout_logger(),
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    LocalSet::new().block_on(&runtime, run())
}

async fn run() -> Result<()> {
    let model = ModelCell::new();
    let model_path = std::env::var(MODEL_PATH_VAR).unwrap_or_else(|_| DEFAULT_MODEL_PATH.into());
    let loading = model.clone();
    tokio::task::spawn_local(async move {
        if let Err(e) = load_model(&loading, PathBuf::from(model_path)).await {
            log::error!("could not load classifier: {e}");
        }
    });

    let config = GameConfig::default();
    match std::env::var_os(FRAMES_DIR_VAR) {
        Some(dir) => {
            let camera = DirectoryCamera::open(PathBuf::from(dir))?;
            play(camera, model, config).await
        }
        None => open_device_and_play(model, config).await,
    }
}

#[cfg(feature = "v4l2")]
async fn open_device_and_play(model: ModelCell, config: GameConfig) -> Result<()> {
    let camera = rps_camera::V4l2Camera::new(rps_camera::CameraConfig::default())?;
    play(camera, model, config).await
}

#[cfg(not(feature = "v4l2"))]
async fn open_device_and_play(_model: ModelCell, _config: GameConfig) -> Result<()> {
    anyhow::bail!("no camera: set {FRAMES_DIR_VAR} or build with the `v4l2` feature")
}

#[cfg(feature = "onnx")]
async fn load_model(model: &ModelCell, path: PathBuf) -> Result<(), InferError> {
    use rps_infer::{Backend, Device, ModelSource, OnnxBackend};
    use std::sync::Arc;

    let backend: Arc<dyn Backend> = Arc::new(OnnxBackend::new(Device::Cpu));
    model.load_from(backend, ModelSource::File(path)).await?;
    Ok(())
}

#[cfg(not(feature = "onnx"))]
async fn load_model(_model: &ModelCell, path: PathBuf) -> Result<(), InferError> {
    Err(InferError::ModelLoad(format!(
        "cannot load {}: built without the `onnx` feature",
        path.display()
    )))
}

async fn play<C: Camera + 'static>(camera: C, model: ModelCell, config: GameConfig) -> Result<()> {
    let detector = GestureDetector::from_config(camera, model, LabelTable::default(), &config);
    let mut game = Game::new(detector, RandomPlayer::new(), config);
    let mut rounds = game.rounds();
    let gesture = game.gesture();
    let preview = game.preview();

    println!("Rock Paper Scissors");
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Some(Command::Start) => game.start(),
                    Some(Command::Dismiss) => {
                        if let Err(e) = game.dismiss() {
                            println!("{e}");
                        }
                    }
                    Some(Command::Status) => {
                        println!("{}", status_line(&game.round(), &gesture));
                        if let Some(frame) = preview.borrow().as_ref() {
                            println!(
                                "last frame: {}x{}",
                                frame.width.unwrap_or_default(),
                                frame.height.unwrap_or_default()
                            );
                        }
                    }
                    Some(Command::Quit) => break,
                    None => println!("{HELP}"),
                }
            }
            changed = rounds.changed() => {
                changed?;
                let round = rounds.borrow_and_update().clone();
                println!("{}", status_line(&round, &gesture));
            }
        }
    }

    game.shutdown();
    println!("Exiting...");
    Ok(())
}
