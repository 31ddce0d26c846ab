use crate::error::OcrError;
use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

/// Shrink an encoded image so its longer side is at most `max_side`,
/// re-encoding it in the format it arrived in
pub fn apply(bytes: &[u8], max_side: u32) -> Result<Vec<u8>, OcrError> {
    let format = image::guess_format(bytes)
        .map_err(|e| OcrError::ImageDecode(format!("unrecognized image format: {}", e)))?;

    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| OcrError::ImageDecode(e.to_string()))?;

    encode(fit_within(image, max_side), format)
}

/// Scale down preserving aspect ratio; images already within bounds are
/// returned untouched (never upscaled)
pub fn fit_within(image: DynamicImage, max_side: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    if width <= max_side && height <= max_side {
        return image;
    }

    image.resize(max_side, max_side, FilterType::Lanczos3)
}

fn encode(image: DynamicImage, format: ImageFormat) -> Result<Vec<u8>, OcrError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, format)
        .map_err(|e| OcrError::ImageEncode(format!("{:?}: {}", format, e)))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, format)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_resize_limits_longer_side() {
        let bytes = encoded(3000, 1500, ImageFormat::Png);
        let result = apply(&bytes, 1000).unwrap();

        let img = image::load_from_memory(&result).unwrap();
        assert_eq!(img.dimensions(), (1000, 500));
        assert_eq!(image::guess_format(&result).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_resize_limits_portrait_image() {
        let bytes = encoded(600, 2400, ImageFormat::Png);
        let result = apply(&bytes, 1000).unwrap();

        let img = image::load_from_memory(&result).unwrap();
        assert_eq!(img.dimensions(), (250, 1000));
    }

    #[test]
    fn test_resize_keeps_jpeg_format() {
        let bytes = encoded(2000, 1000, ImageFormat::Jpeg);
        let result = apply(&bytes, 1000).unwrap();

        assert_eq!(image::guess_format(&result).unwrap(), ImageFormat::Jpeg);
        let img = image::load_from_memory(&result).unwrap();
        assert!(img.width().max(img.height()) <= 1000);
    }

    #[test]
    fn test_resize_never_upscales() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(200, 100));
        let result = fit_within(img, 1000);
        assert_eq!(result.dimensions(), (200, 100));
    }

    #[test]
    fn test_undecodable_bytes_are_an_error() {
        let result = apply(b"definitely not an image", 1000);
        assert!(matches!(result, Err(OcrError::ImageDecode(_))));
    }

    #[test]
    fn test_truncated_image_is_an_error() {
        let bytes = encoded(300, 300, ImageFormat::Png);
        let result = apply(&bytes[..bytes.len() / 2], 1000);
        assert!(matches!(result, Err(OcrError::ImageDecode(_))));
    }
}
