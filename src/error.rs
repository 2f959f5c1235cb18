use thiserror::Error;

/// User-facing failure categories. The `Display` text is what ends up in
/// `ClassificationState::Failed`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("Couldn't read the image data.")]
    DecodeFailure,

    #[error("Didn't catch anything. Try a clearer photo.")]
    EmptyResult,

    #[error("Processing failed. Please try again.")]
    InferenceFailure,
}

#[cfg(test)]
mod tests {
    use super::ClassificationError;

    #[test]
    fn test_messages_are_distinct() {
        let messages = [
            ClassificationError::DecodeFailure.to_string(),
            ClassificationError::EmptyResult.to_string(),
            ClassificationError::InferenceFailure.to_string(),
        ];

        assert_eq!(messages[0], "Couldn't read the image data.");
        assert_eq!(messages[1], "Didn't catch anything. Try a clearer photo.");
        assert_eq!(messages[2], "Processing failed. Please try again.");
    }
}
