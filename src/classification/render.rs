use crate::classification::core::ClassificationState;
use crate::screen::interface::Screen;
use std::sync::{Arc, Mutex, PoisonError};

pub fn to_lines(state: &ClassificationState) -> Vec<String> {
    match state {
        ClassificationState::Idle => {
            vec!["Point your camera at a snack to see if it's a hotdog.".to_string()]
        }
        ClassificationState::Processing => vec!["Classifying...".to_string()],
        ClassificationState::Result(verdict) => {
            let mut lines = vec![verdict.headline().to_string(), verdict.summary()];
            if !verdict.suggestions.is_empty() {
                lines.push(format!("Also spotted: {}", verdict.suggestions.join(" • ")));
            }
            lines
        }
        ClassificationState::Failed(message) => vec![message.clone()],
    }
}

#[derive(Clone)]
pub struct Render {
    screen: Arc<Mutex<dyn Screen + Send + Sync>>,
}

impl Render {
    pub fn new(screen: Arc<Mutex<dyn Screen + Send + Sync>>) -> Self {
        Self { screen }
    }

    pub fn render(
        &self,
        state: &ClassificationState,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut screen = self.screen.lock().unwrap_or_else(PoisonError::into_inner);

        screen.clear()?;
        for (index, line) in to_lines(state).iter().enumerate() {
            screen.write_line(index, line)?;
        }
        screen.present()?;

        Ok(())
    }
}
