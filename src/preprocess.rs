//! Image binarization applied before OCR.
//!
//! Grayscale, then an inverted binary threshold: pixels brighter than the
//! threshold become black (0), everything else white (255).

use image::{DynamicImage, GrayImage, Luma};

use crate::error::Result;

pub fn binarize(image: &DynamicImage, threshold: u8) -> GrayImage {
    let mut gray = image.to_luma8();
    for Luma([value]) in gray.pixels_mut() {
        *value = if *value > threshold { 0 } else { 255 };
    }
    gray
}

/// Decode an encoded image (any format `image` can read) and binarize it.
pub fn decode_and_binarize(bytes: &[u8], threshold: u8) -> Result<DynamicImage> {
    let image = image::load_from_memory(bytes)?;
    Ok(DynamicImage::ImageLuma8(binarize(&image, threshold)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn two_tone() -> DynamicImage {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([250, 250, 250]));
        img.put_pixel(1, 0, Rgb([20, 20, 20]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_binarize_inverts() {
        let out = binarize(&two_tone(), 150);
        assert_eq!(out.get_pixel(0, 0).0, [0]);
        assert_eq!(out.get_pixel(1, 0).0, [255]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(1, 1, Luma([150])));
        assert_eq!(binarize(&img, 150).get_pixel(0, 0).0, [255]);
    }

    #[test]
    fn test_decode_png() {
        let mut bytes = Vec::new();
        two_tone()
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        let decoded = decode_and_binarize(&bytes, 150).unwrap();
        assert_eq!(decoded.to_luma8().get_pixel(1, 0).0, [255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_and_binarize(b"not an image", 150).is_err());
    }
}
