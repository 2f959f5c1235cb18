use crate::screen::interface::Screen;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Records every presented frame.
#[derive(Clone, Default)]
pub struct ScreenFake {
    lines: Vec<String>,
    frames: Arc<Mutex<Vec<Vec<String>>>>,
}

impl ScreenFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Vec<String>> {
        match self.frames.lock() {
            Ok(frames) => frames.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Screen for ScreenFake {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.lines.clear();
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        if line != self.lines.len() {
            return Err(format!("expected line {}, got {}", self.lines.len(), line).into());
        }
        self.lines.push(text.to_string());
        Ok(())
    }

    fn present(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.frames
            .lock()
            .map_err(|e| e.to_string())?
            .push(self.lines.clone());
        Ok(())
    }
}
