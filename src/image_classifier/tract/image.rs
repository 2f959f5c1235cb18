use image::{imageops, DynamicImage, RgbImage};
use tract_onnx::prelude::*;

/// Scales `image` to fit inside `width`x`height` keeping its aspect ratio and
/// centers it on a black canvas.
pub fn letterbox_image(image: &DynamicImage, width: u32, height: u32) -> RgbImage {
    if image.width() == image.height() && width == height {
        return image
            .resize_exact(width, height, imageops::FilterType::Triangle)
            .to_rgb8();
    }

    let (w, h) = (image.width() as f32, image.height() as f32);
    let scale = (width as f32 / w).min(height as f32 / h);
    let new_w = ((w * scale) as u32).clamp(1, width);
    let new_h = ((h * scale) as u32).clamp(1, height);

    let scaled = image
        .resize_exact(new_w, new_h, imageops::FilterType::Triangle)
        .to_rgb8();

    let mut canvas = RgbImage::new(width, height);
    let x_offset = (width - new_w) / 2;
    let y_offset = (height - new_h) / 2;
    imageops::overlay(&mut canvas, &scaled, x_offset as i64, y_offset as i64);

    canvas
}

/// NCHW tensor with channels normalized to `[0, 1]`.
pub fn image_to_tensor(image: &RgbImage) -> Tensor {
    let (width, height) = (image.width() as usize, image.height() as usize);

    tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        image.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
    })
    .into_tensor()
}

pub fn letterbox_image_to_tensor(image: &DynamicImage, width: u32, height: u32) -> Tensor {
    image_to_tensor(&letterbox_image(image, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, Rgb};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        let mut img = ImageBuffer::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = Rgb(color);
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_image_to_tensor_square() {
        let tensor = letterbox_image_to_tensor(&solid(100, 100, [255, 0, 0]), 32, 32);
        assert_eq!(tensor.shape(), &[1, 3, 32, 32]);

        let slice = tensor.as_slice::<f32>().unwrap();

        assert!((slice[0] - 1.0).abs() < 0.001);
        assert_eq!(slice[32 * 32], 0.0);
        assert_eq!(slice[2 * 32 * 32], 0.0);
    }

    #[test]
    fn test_image_to_tensor_rectangle() {
        let tensor = letterbox_image_to_tensor(&solid(200, 100, [255, 0, 0]), 32, 32);
        assert_eq!(tensor.shape(), &[1, 3, 32, 32]);

        let slice = tensor.as_slice::<f32>().unwrap();

        // 200x100 scales to 32x16, centered vertically with 8 rows of padding.
        let center = 16 * 32 + 16;
        assert!((slice[center] - 1.0).abs() < 0.001);
        assert_eq!(slice[0], 0.0);
        assert_eq!(slice[31 * 32], 0.0);
    }

    #[test]
    fn test_image_to_tensor_normalization() {
        let tensor = letterbox_image_to_tensor(&solid(10, 10, [128, 128, 128]), 10, 10);
        let slice = tensor.as_slice::<f32>().unwrap();

        let expected = 128.0 / 255.0;
        assert!(slice.iter().all(|value| (value - expected).abs() < 0.0001));
    }
}
