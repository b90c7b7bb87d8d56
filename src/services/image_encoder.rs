use anyhow::{Context, Result};
use std::io::Cursor;

use crate::models::EncodedImage;

pub const PNG_MIME: &str = "image/png";

/// Decode an uploaded image (any format the `image` crate understands) and
/// re-encode it as PNG so the pixels reach the model untouched.
pub fn encode_png(bytes: &[u8]) -> Result<EncodedImage> {
    let img = image::load_from_memory(bytes).context("could not decode uploaded image")?;

    let mut png_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_bytes), image::ImageOutputFormat::Png)
        .context("could not encode image as PNG")?;

    log::debug!(
        "🖼️ Re-encoded {}x{} image: {} bytes in, {} bytes PNG out",
        img.width(),
        img.height(),
        bytes.len(),
        png_bytes.len()
    );

    Ok(EncodedImage {
        mime_type: PNG_MIME.to_string(),
        data: png_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn sample_image() -> DynamicImage {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        img.put_pixel(2, 0, Rgba([0, 0, 255, 255]));
        img.put_pixel(0, 1, Rgba([12, 34, 56, 128]));
        img.put_pixel(1, 1, Rgba([200, 100, 50, 0]));
        img.put_pixel(2, 1, Rgba([1, 2, 3, 4]));
        DynamicImage::ImageRgba8(img)
    }

    fn encode_as(img: &DynamicImage, format: image::ImageOutputFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_png_round_trip_preserves_pixels() {
        let original = sample_image();
        let input = encode_as(&original, image::ImageOutputFormat::Png);

        let encoded = encode_png(&input).unwrap();
        let decoded = image::load_from_memory(&encoded.data).unwrap();

        assert_eq!(encoded.mime_type, "image/png");
        assert_eq!(decoded.to_rgba8(), original.to_rgba8());
    }

    #[test]
    fn test_other_formats_become_png() {
        let original = DynamicImage::ImageRgb8(sample_image().to_rgb8());
        let bmp = encode_as(&original, image::ImageOutputFormat::Bmp);

        let encoded = encode_png(&bmp).unwrap();

        assert_eq!(
            image::guess_format(&encoded.data).unwrap(),
            image::ImageFormat::Png
        );
        let decoded = image::load_from_memory(&encoded.data).unwrap();
        assert_eq!(decoded.to_rgb8(), original.to_rgb8());
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let err = encode_png(b"definitely not an image").unwrap_err();

        assert!(format!("{:#}", err).contains("could not decode uploaded image"));
    }
}
