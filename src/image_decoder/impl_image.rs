use crate::image_decoder::interface::ImageDecoder;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;

pub struct ImageDecoderImage {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageDecoderImage {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_decoder"),
        }
    }
}

impl ImageDecoder for ImageDecoderImage {
    fn decode(
        &self,
        image: &[u8],
    ) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        let _ = self
            .logger
            .info(&format!("Decoding {} bytes...", image.len()));

        let decoded = image::load_from_memory(image)?;

        let _ = self.logger.info(&format!(
            "Decoded {}x{} image",
            decoded.width(),
            decoded.height()
        ));

        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::ImageDecoderImage;
    use crate::image_decoder::interface::ImageDecoder;
    use crate::library::logger::impl_fake::LoggerFake;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;
    use std::sync::Arc;

    #[test]
    fn test_decode_png() {
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::new_rgb8(6, 4)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();

        let decoder = ImageDecoderImage::new(Arc::new(LoggerFake::new()));
        let image = decoder.decode(bytes.get_ref()).unwrap();

        assert_eq!((image.width(), image.height()), (6, 4));
    }

    #[test]
    fn test_decode_garbage() {
        let decoder = ImageDecoderImage::new(Arc::new(LoggerFake::new()));

        assert!(decoder.decode(&[]).is_err());
        assert!(decoder.decode(b"definitely not an image").is_err());
    }
}
