use image::DynamicImage;

/// Turns encoded image bytes (JPEG, PNG, ...) into pixels a classifier can consume.
pub trait ImageDecoder: Send + Sync {
    fn decode(
        &self,
        image: &[u8],
    ) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>>;
}
