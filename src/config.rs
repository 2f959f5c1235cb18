use chrono::{Offset, Utc};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClassificationConfig {
    pub labels: Vec<String>,
    pub min_confidence: f32,
    pub display_label: String,
}

impl ClassificationConfig {
    pub fn matches_label(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.labels
            .iter()
            .any(|candidate| label.contains(&candidate.to_lowercase()))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: chrono::FixedOffset,
    pub hotdog: ClassificationConfig,
    pub suggestion_count: usize,
    /// `None` leaves a hung classifier in `Processing` forever.
    pub classify_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: Utc.fix(),
            hotdog: ClassificationConfig {
                labels: vec!["hot dog".to_string(), "hotdog".to_string()],
                min_confidence: 0.2,
                display_label: "Hotdog".to_string(),
            },
            suggestion_count: 3,
            classify_timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn test_matches_label_is_case_insensitive() {
        let config = Config::default();

        assert!(config.hotdog.matches_label("Hot Dog"));
        assert!(config.hotdog.matches_label("hotdog, hot dog, red hot"));
        assert!(config.hotdog.matches_label("CHILI HOTDOG"));
        assert!(!config.hotdog.matches_label("hot-dog"));
        assert!(!config.hotdog.matches_label("dog"));
    }
}
