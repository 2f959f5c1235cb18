use image::DynamicImage;

/// One candidate label reported by a classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub label: String,
    /// In `[0.0, 1.0]`.
    pub confidence: f32,
}

impl Observation {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Blocking classification capability. Implementations rank observations by
/// their own notion of relevance; callers must not rely on that ordering.
pub trait ImageClassifier: Send + Sync {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Observation>, Box<dyn std::error::Error + Send + Sync>>;
}
