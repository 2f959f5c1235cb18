use crate::image_classifier::interface::{ImageClassifier, Observation};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::image::letterbox_image_to_tensor;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

/// ImageNet-style classifier: one `[1, classes]` output, one label per class.
pub struct ImageClassifierTractOnnx {
    model: TypedRunnableModel<TypedModel>,
    config: ModelConfig,
    labels: Vec<String>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    pub fn new(
        config: ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let logger = logger.with_namespace("image_classifier").with_namespace("tract");

        let labels = read_labels(&std::fs::read_to_string(&config.labels_path)?);
        if labels.is_empty() {
            return Err(format!("no labels found in {}", config.labels_path).into());
        }

        let (height, width) = config.input_shape;
        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())?
            .into_optimized()?
            .into_runnable()?;

        let _ = logger.info(&format!(
            "Loaded {} with {} labels",
            config.onnx_model_path,
            labels.len()
        ));

        Ok(Self {
            model,
            config,
            labels,
            logger,
        })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Observation>, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = self.config.input_shape;
        let input = letterbox_image_to_tensor(image, width, height);

        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs.first().ok_or("model produced no outputs")?;
        let scores: Vec<f32> = output.to_array_view::<f32>()?.iter().copied().collect();

        let mut ranked: Vec<(usize, f32)> = to_probabilities(&scores)
            .into_iter()
            .enumerate()
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let observations: Vec<Observation> = ranked
            .into_iter()
            .filter_map(|(class_idx, confidence)| {
                self.labels
                    .get(class_idx)
                    .map(|label| Observation::new(label.clone(), confidence))
            })
            .take(self.config.top_k)
            .collect();

        let _ = self.logger.info(&format!("Top observations: {:?}", observations));

        Ok(observations)
    }
}

fn read_labels(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Models differ in whether they end with a softmax. Scores that already look
/// like a distribution are kept as is.
fn to_probabilities(scores: &[f32]) -> Vec<f32> {
    let sum: f32 = scores.iter().sum();
    let is_distribution =
        scores.iter().all(|s| (0.0..=1.0).contains(s)) && (sum - 1.0).abs() < 0.01;
    if is_distribution {
        return scores.to_vec();
    }

    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
