use crate::image_classifier::interface::{ImageClassifier, Observation};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

const LABELS: [&str; 16] = [
    "hotdog", "bun", "plate", "sausage", "pizza", "burger", "taco", "sandwich", "bagel",
    "pretzel", "ketchup", "mustard", "fries", "salad", "cup", "table",
];

/// Made-up observations for running without a model.
pub struct ImageClassifierRandom {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierRandom {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("random"),
        }
    }
}

impl ImageClassifier for ImageClassifierRandom {
    fn classify(
        &self,
        _image: &DynamicImage,
    ) -> Result<Vec<Observation>, Box<dyn std::error::Error + Send + Sync>> {
        let _ = self.logger.info("Classifying image with random classifier...");

        let mut rng = rand::rng();

        let count_dist = Uniform::new_inclusive(1, 5)?;
        let index_dist = Uniform::new(0, LABELS.len())?;
        let confidence_dist = Uniform::new_inclusive(0.0f32, 1.0f32)?;

        let mut observations: Vec<Observation> = (0..count_dist.sample(&mut rng))
            .map(|_| {
                Observation::new(
                    LABELS[index_dist.sample(&mut rng)],
                    confidence_dist.sample(&mut rng),
                )
            })
            .collect();

        observations.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::ImageClassifierRandom;
    use crate::image_classifier::interface::ImageClassifier;
    use crate::library::logger::impl_fake::LoggerFake;
    use image::DynamicImage;
    use std::sync::Arc;

    #[test]
    fn test_observations_are_ranked_and_bounded() {
        let classifier = ImageClassifierRandom::new(Arc::new(LoggerFake::new()));
        let image = DynamicImage::new_rgb8(4, 4);

        for _ in 0..50 {
            let observations = classifier.classify(&image).unwrap();

            assert!((1..=5).contains(&observations.len()));
            assert!(observations
                .iter()
                .all(|o| !o.label.is_empty() && (0.0..=1.0).contains(&o.confidence)));
            assert!(observations
                .windows(2)
                .all(|pair| pair[0].confidence >= pair[1].confidence));
        }
    }
}
