//! Greyscale conversion of rendered table images.
//!
//! Rendered tables are effectively monochrome, so the mean of the R, G and B
//! channels is a faithful single scalar per pixel. The source image is never
//! mutated; the matrix is a derived structure.

use image::{DynamicImage, GenericImageView};
use tabgrid_core::{IntensityMatrix, Result, TabgridError};

/// Convert a raster image into an [`IntensityMatrix`] of identical
/// dimensions.
///
/// Each output value is the arithmetic mean of the pixel's R, G and B
/// channels; alpha is excluded.
///
/// # Errors
///
/// Returns [`TabgridError::InvalidImage`] if the image has zero width or
/// height.
pub fn intensity_matrix(image: &DynamicImage) -> Result<IntensityMatrix> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(TabgridError::InvalidImage(format!(
            "cannot convert zero-sized image: {width}x{height}"
        )));
    }

    let rgba = image.to_rgba8();
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for pixel in rgba.pixels() {
        let [r, g, b, _a] = pixel.0;
        // Sum fits in u16: 3 * 255 = 765.
        let mean = (u16::from(r) + u16::from(g) + u16::from(b)) / 3;
        #[allow(clippy::cast_possible_truncation)] // mean <= 255 by construction
        data.push(mean as u8);
    }

    IntensityMatrix::new(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn uniform_image(width: u32, height: u32, value: u8) -> DynamicImage {
        let mut img = RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = Rgb([value, value, value]);
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_all_black_image_is_uniform_zero() {
        let matrix = intensity_matrix(&uniform_image(16, 9, 0)).unwrap();
        for y in 0..9 {
            for x in 0..16 {
                assert_eq!(matrix.get(x, y), 0);
            }
        }
    }

    #[test]
    fn test_all_white_image_is_uniform_255() {
        let matrix = intensity_matrix(&uniform_image(7, 5, 255)).unwrap();
        for y in 0..5 {
            for x in 0..7 {
                assert_eq!(matrix.get(x, y), 255);
            }
        }
    }

    #[test]
    fn test_dimensions_match_source() {
        let matrix = intensity_matrix(&uniform_image(33, 21, 128)).unwrap();
        assert_eq!(matrix.width(), 33);
        assert_eq!(matrix.height(), 21);
    }

    #[test]
    fn test_channel_mean() {
        let mut img = RgbImage::new(1, 1);
        img.put_pixel(0, 0, Rgb([10, 20, 30]));
        let matrix = intensity_matrix(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(matrix.get(0, 0), 20);
    }

    #[test]
    fn test_alpha_is_excluded() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, Rgba([60, 60, 60, 0]));
        let matrix = intensity_matrix(&DynamicImage::ImageRgba8(img)).unwrap();
        assert_eq!(matrix.get(0, 0), 60);
    }

    #[test]
    fn test_zero_sized_image_is_rejected() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(matches!(
            intensity_matrix(&img),
            Err(TabgridError::InvalidImage(_))
        ));
    }
}
