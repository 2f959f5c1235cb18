use std::error::Error;

/// A line oriented output surface for classification results.
pub trait Screen: Send + Sync {
    /// Clear all lines
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Write text to a specific line (0-based index)
    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Show what has been written since the last `clear`
    fn present(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;
}
