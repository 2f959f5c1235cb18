use crate::config::Config;
use crate::error::ClassificationError;
use crate::image_classifier::interface::Observation;

#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub is_hotdog: bool,
    /// Confidence of the deciding observation, passed through unchanged.
    pub confidence: f32,
    pub primary_label: String,
    pub suggestions: Vec<String>,
}

impl Verdict {
    pub fn headline(&self) -> &'static str {
        if self.is_hotdog {
            "HOTDOG"
        } else {
            "NOT HOTDOG"
        }
    }

    pub fn summary(&self) -> String {
        let percent = (self.confidence * 100.0) as i64;
        if self.is_hotdog {
            format!("Confidence: {}% sure it's a hotdog", percent)
        } else {
            format!(
                "Looks more like {} ({}%)",
                self.primary_label.to_lowercase(),
                percent
            )
        }
    }
}

/// Decides hotdog or not from a classifier's observations.
///
/// The first observation whose label mentions a hotdog decides, provided its
/// confidence clears `config.hotdog.min_confidence`; it does not need to be the
/// top ranked one. Otherwise the first observation in input order that is not
/// hotdog-labeled explains the verdict, falling back to the very first one.
/// Suggestions always mirror the first `config.suggestion_count` observations.
pub fn derive(
    config: &Config,
    observations: &[Observation],
) -> Result<Verdict, ClassificationError> {
    let top = observations.first().ok_or(ClassificationError::EmptyResult)?;

    let hotdog = observations
        .iter()
        .find(|o| config.hotdog.matches_label(&o.label))
        .filter(|o| o.confidence > config.hotdog.min_confidence);

    let (is_hotdog, confidence, primary_label) = match hotdog {
        Some(observation) => (
            true,
            observation.confidence,
            config.hotdog.display_label.clone(),
        ),
        None => {
            let fallback = observations
                .iter()
                .find(|o| !config.hotdog.matches_label(&o.label))
                .unwrap_or(top);
            (false, fallback.confidence, fallback.label.clone())
        }
    };

    let suggestions = observations
        .iter()
        .take(config.suggestion_count)
        .map(to_suggestion)
        .collect();

    Ok(Verdict {
        is_hotdog,
        confidence,
        primary_label,
        suggestions,
    })
}

fn to_suggestion(observation: &Observation) -> String {
    format!(
        "{} {}%",
        observation.label,
        (observation.confidence * 100.0).round() as i64
    )
}
