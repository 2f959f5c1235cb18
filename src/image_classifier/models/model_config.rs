#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: String,
    /// Newline separated, one label per output class.
    pub labels_path: String,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub top_k: usize,
}

impl ModelConfig {
    pub fn new(onnx_model_path: &str, labels_path: &str, input_size: u32) -> Self {
        Self {
            onnx_model_path: onnx_model_path.to_string(),
            labels_path: labels_path.to_string(),
            input_shape: (input_size, input_size),
            top_k: 5,
        }
    }
}
