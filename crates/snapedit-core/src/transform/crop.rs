//! Rectangular region extraction.
//!
//! [`crop_region`] follows the usual bitmap sub-region contract: the region
//! must be non-empty and lie entirely inside the source, otherwise the call
//! fails instead of clamping. [`crop_top_left`] builds the percentage crop
//! on top of it.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left corner
//! - Region sizes are in whole pixels

use thiserror::Error;
use tracing::debug;

use crate::decode::{RasterImage, BYTES_PER_PIXEL};

/// Reasons a requested crop region cannot be extracted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    /// The crop percentage is not in (0, 100].
    #[error("crop percentage {0} is outside (0, 100]")]
    PercentOutOfRange(f64),

    /// The region has a zero-length side.
    #[error("region {width}x{height} is empty")]
    Empty { width: u32, height: u32 },

    /// The region reaches past the right or bottom edge of the image.
    #[error(
        "region {width}x{height} at ({x}, {y}) exceeds image bounds {image_width}x{image_height}"
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
}

/// Extract a `width` x `height` region whose top-left corner is at (x, y).
///
/// # Errors
///
/// `RegionError::Empty` when either side is zero, `RegionError::OutOfBounds`
/// when `x + width` or `y + height` exceeds the image.
pub fn crop_region(
    image: &RasterImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<RasterImage, RegionError> {
    if width == 0 || height == 0 {
        return Err(RegionError::Empty { width, height });
    }

    let fits_x = x.checked_add(width).is_some_and(|r| r <= image.width);
    let fits_y = y.checked_add(height).is_some_and(|b| b <= image.height);
    if !fits_x || !fits_y {
        return Err(RegionError::OutOfBounds {
            x,
            y,
            width,
            height,
            image_width: image.width,
            image_height: image.height,
        });
    }

    if x == 0 && y == 0 && width == image.width && height == image.height {
        return Ok(image.clone());
    }

    let src_stride = image.width as usize * BYTES_PER_PIXEL;
    let row_len = width as usize * BYTES_PER_PIXEL;
    let mut output = Vec::with_capacity(row_len * height as usize);

    // Copy row by row
    for row in y as usize..(y + height) as usize {
        let start = row * src_stride + x as usize * BYTES_PER_PIXEL;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Ok(RasterImage::new(width, height, output))
}

/// Keep the top-left `percent`% of the image along each axis.
///
/// The new size is `floor(width * percent / 100)` by
/// `floor(height * percent / 100)`, anchored at the origin (not centred).
///
/// # Errors
///
/// Percentages outside (0, 100] fail with `RegionError::PercentOutOfRange`
/// and percentages too small to cover one pixel fail with
/// `RegionError::Empty`. Nothing is clamped.
pub fn crop_top_left(image: &RasterImage, percent: f64) -> Result<RasterImage, RegionError> {
    if !(percent > 0.0 && percent <= 100.0) {
        return Err(RegionError::PercentOutOfRange(percent));
    }

    let new_width = (image.width as f64 * percent / 100.0).floor();
    let new_height = (image.height as f64 * percent / 100.0).floor();

    if !(new_width >= 1.0 && new_height >= 1.0) {
        return Err(RegionError::Empty {
            width: new_width as u32,
            height: new_height as u32,
        });
    }

    let result = crop_region(image, 0, 0, new_width as u32, new_height as u32)?;
    debug!(
        percent,
        from_width = image.width,
        from_height = image.height,
        to_width = result.width,
        to_height = result.height,
        "cropped image"
    );
    Ok(result)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> RasterImage {
        let pixels = (0..width * height)
            .flat_map(|i| {
                let v = (i % 251) as u8;
                [v, v.wrapping_mul(3), v.wrapping_add(7), 255]
            })
            .collect();
        RasterImage::new(width, height, pixels)
    }

    proptest! {
        /// Property: valid percentages give floored sizes and top-left pixels.
        #[test]
        fn prop_crop_matches_top_left_region(
            (width, height) in (1u32..=60, 1u32..=60),
            percent in 0.01f64..=100.0,
        ) {
            let img = create_test_image(width, height);
            let expected_w = (width as f64 * percent / 100.0).floor() as u32;
            let expected_h = (height as f64 * percent / 100.0).floor() as u32;

            match crop_top_left(&img, percent) {
                Ok(result) => {
                    prop_assert_eq!(result.dimensions(), (expected_w, expected_h));
                    for y in 0..expected_h {
                        for x in 0..expected_w {
                            prop_assert_eq!(result.pixel(x, y), img.pixel(x, y));
                        }
                    }
                }
                Err(RegionError::Empty { .. }) => {
                    prop_assert!(expected_w == 0 || expected_h == 0);
                }
                Err(e) => prop_assert!(false, "unexpected error {:?}", e),
            }
        }

        /// Property: a failed crop never yields a partial image.
        #[test]
        fn prop_out_of_range_percent_fails(
            (width, height) in (1u32..=60, 1u32..=60),
            percent in prop_oneof![-500.0f64..=0.0, 100.001f64..=1000.0],
        ) {
            let img = create_test_image(width, height);
            prop_assert!(crop_top_left(&img, percent).is_err());
        }

        /// Property: the pixel buffer always matches the reported dimensions.
        #[test]
        fn prop_region_buffer_matches_dimensions(
            (width, height) in (1u32..=40, 1u32..=40),
            (x, y, w, h) in (0u32..40, 0u32..40, 1u32..=40, 1u32..=40),
        ) {
            let img = create_test_image(width, height);
            if let Ok(result) = crop_region(&img, x, y, w, h) {
                prop_assert_eq!(result.pixels.len(), (w * h * 4) as usize);
                prop_assert_eq!(result.pixel(0, 0), img.pixel(x, y));
            }
        }
    }
}
