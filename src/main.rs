use clap::Parser;
use hotdog::classification::controller::ClassificationController;
use hotdog::classification::core::ClassificationState;
use hotdog::classification::render::Render;
use hotdog::config::Config;
use hotdog::image_classifier::impl_random::ImageClassifierRandom;
use hotdog::image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use hotdog::image_classifier::interface::ImageClassifier;
use hotdog::image_classifier::models::model_config::ModelConfig;
use hotdog::image_decoder::impl_image::ImageDecoderImage;
use hotdog::library::logger::impl_console::LoggerConsole;
use hotdog::library::logger::interface::Logger;
use hotdog::screen::impl_console::ScreenConsole;
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "hotdog", version, about = "Tells you whether a photo is a hotdog")]
struct Cli {
    /// Images to classify, one after another
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// ONNX image classification model. Without it observations are random.
    #[arg(long, requires = "labels")]
    model: Option<String>,

    /// Labels file for --model, one class per line
    #[arg(long)]
    labels: Option<String>,

    /// Square input size expected by --model
    #[arg(long, default_value_t = 224)]
    input_size: u32,

    /// Give up on a classification after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let mut config = Config::default();
    config.classify_timeout = cli.timeout_ms.map(Duration::from_millis);

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = match (&cli.model, &cli.labels)
    {
        (Some(model), Some(labels)) => Arc::new(ImageClassifierTractOnnx::new(
            ModelConfig::new(model, labels, cli.input_size),
            logger.clone(),
        )?),
        _ => Arc::new(ImageClassifierRandom::new(logger.clone())),
    };

    let image_decoder = Arc::new(ImageDecoderImage::new(logger.clone()));

    let controller =
        ClassificationController::new(config, logger.clone(), image_decoder, image_classifier);

    let render = Render::new(Arc::new(Mutex::new(ScreenConsole::new())));
    render.render(&controller.current_state())?;

    let (state_sender, state_receiver) = channel();
    let render_logger = logger.clone();
    controller.subscribe(move |state| {
        if let Err(e) = render.render(state) {
            let _ = render_logger.error(&format!("render failed: {}", e));
        }
        let _ = state_sender.send(state.clone());
    });

    for path in cli.images {
        let image = match std::fs::read(&path) {
            Ok(image) => image,
            Err(e) => {
                let _ = logger.error(&format!("skipping {}: {}", path.display(), e));
                continue;
            }
        };

        let request_id = controller.submit(image);
        let _ = logger.info(&format!("submitted {} as {}", path.display(), request_id));

        loop {
            match state_receiver.recv()? {
                ClassificationState::Result(_) | ClassificationState::Failed(_) => break,
                ClassificationState::Idle | ClassificationState::Processing => continue,
            }
        }
    }

    Ok(())
}
