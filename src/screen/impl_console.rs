use crate::screen::interface::Screen;
use std::error::Error;

pub struct ScreenConsole {
    lines: Vec<String>,
}

impl ScreenConsole {
    pub fn new() -> Self {
        Self { lines: vec![] }
    }
}

impl Default for ScreenConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for ScreenConsole {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.lines.clear();
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.lines.len() <= line {
            self.lines.resize(line + 1, String::new());
        }
        self.lines[line] = text.to_string();
        Ok(())
    }

    fn present(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let width = self
            .lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        println!("┌{}┐", "─".repeat(width + 2));
        for line in &self.lines {
            println!("│ {:<width$} │", line, width = width);
        }
        println!("└{}┘", "─".repeat(width + 2));
        Ok(())
    }
}
