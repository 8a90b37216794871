//! Conversion boundary.
//!
//! The page hands raw input bytes and a target format to a [`Converter`]
//! and gets encoded bytes back, or a [`ConvertError`]. In the browser the
//! converter is an external module; [`ImageConverter`] is the in-process
//! implementation used by `localmorph convert`.

use crate::core::SupportedFormat;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use thiserror::Error;

/// Failure reported by a converter.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to detect input format: {0}")]
    Detect(#[source] image::ImageError),

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode {format}: {source}")]
    Encode {
        format: SupportedFormat,
        #[source]
        source: image::ImageError,
    },

    #[allow(dead_code)]
    #[error("converter failed to initialize: {0}")]
    Init(String),
}

/// Bytes-in, bytes-out image conversion.
pub trait Converter: Send + Sync {
    fn convert(&self, input: &[u8], target: SupportedFormat) -> Result<Vec<u8>, ConvertError>;
}

/// Converter backed by the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageConverter;

impl ImageConverter {
    pub const fn new() -> Self {
        Self
    }
}

impl Converter for ImageConverter {
    fn convert(&self, input: &[u8], target: SupportedFormat) -> Result<Vec<u8>, ConvertError> {
        let detected = image::guess_format(input).map_err(ConvertError::Detect)?;
        let img = image::load_from_memory_with_format(input, detected)
            .map_err(ConvertError::Decode)?;

        let output_format = image_format(target);
        let img = fit_color_type(img, output_format);

        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, output_format)
            .map_err(|source| ConvertError::Encode {
                format: target,
                source,
            })?;

        Ok(buffer.into_inner())
    }
}

/// Encoder for a format token (`jpg` and `jpeg` share one).
pub const fn image_format(format: SupportedFormat) -> ImageFormat {
    match format {
        SupportedFormat::Png => ImageFormat::Png,
        SupportedFormat::Jpeg | SupportedFormat::Jpg => ImageFormat::Jpeg,
        SupportedFormat::Gif => ImageFormat::Gif,
        SupportedFormat::Webp => ImageFormat::WebP,
        SupportedFormat::Bmp => ImageFormat::Bmp,
        SupportedFormat::Ico => ImageFormat::Ico,
        SupportedFormat::Tiff => ImageFormat::Tiff,
        SupportedFormat::Tga => ImageFormat::Tga,
        SupportedFormat::Ff => ImageFormat::Farbfeld,
    }
}

/// Convert pixels into a color type the target encoder accepts.
///
/// JPEG has no alpha channel, farbfeld is always 16-bit RGBA, PNG takes
/// anything; the remaining encoders take 8-bit RGBA.
fn fit_color_type(img: DynamicImage, format: ImageFormat) -> DynamicImage {
    match format {
        ImageFormat::Png => img,
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        ImageFormat::Farbfeld => DynamicImage::ImageRgba16(img.to_rgba16()),
        _ => DynamicImage::ImageRgba8(img.to_rgba8()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    /// A small PNG with some transparency.
    pub(crate) fn sample_png() -> Vec<u8> {
        let img = RgbaImage::from_fn(8, 8, |x, y| {
            Rgba([(x * 30) as u8, (y * 30) as u8, 128, if x < 4 { 255 } else { 90 }])
        });
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    fn convert_and_detect(target: SupportedFormat) -> ImageFormat {
        let output = ImageConverter::new().convert(&sample_png(), target).unwrap();
        image::guess_format(&output).unwrap()
    }

    #[test]
    fn test_png_to_jpg_drops_alpha() {
        assert_eq!(convert_and_detect(SupportedFormat::Jpg), ImageFormat::Jpeg);
        assert_eq!(convert_and_detect(SupportedFormat::Jpeg), ImageFormat::Jpeg);
    }

    #[test]
    fn test_png_to_bmp_and_gif() {
        assert_eq!(convert_and_detect(SupportedFormat::Bmp), ImageFormat::Bmp);
        assert_eq!(convert_and_detect(SupportedFormat::Gif), ImageFormat::Gif);
    }

    #[test]
    fn test_png_to_farbfeld() {
        assert_eq!(convert_and_detect(SupportedFormat::Ff), ImageFormat::Farbfeld);
    }

    #[test]
    fn test_png_to_tga_decodes_back() {
        let output = ImageConverter::new()
            .convert(&sample_png(), SupportedFormat::Tga)
            .unwrap();
        let img = image::load_from_memory_with_format(&output, ImageFormat::Tga).unwrap();
        assert_eq!((img.width(), img.height()), (8, 8));
    }

    #[test]
    fn test_rejects_non_image_input() {
        let err = ImageConverter::new()
            .convert(b"This is not an image!", SupportedFormat::Png)
            .unwrap_err();
        assert!(matches!(err, ConvertError::Detect(_)));
    }

    #[test]
    fn test_truncated_png_fails_to_decode() {
        let png = sample_png();
        let err = ImageConverter::new()
            .convert(&png[..32], SupportedFormat::Bmp)
            .unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }
}
