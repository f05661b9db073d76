//! Arbitrary-angle image rotation with an expanded canvas.
//!
//! Angles are in degrees and positive values turn the picture clockwise as
//! seen on screen (image space has y pointing down). Exact quarter turns are
//! handled as lossless pixel permutations; every other angle uses inverse
//! mapping: for each output pixel we find the source position it came from
//! and sample it with the selected filter.
//!
//! For rotation by angle θ about the image centres, the inverse transform is:
//! ```text
//! src_x =  (dst_x - dst_cx) * cos θ + (dst_y - dst_cy) * sin θ + src_cx
//! src_y = -(dst_x - dst_cx) * sin θ + (dst_y - dst_cy) * cos θ + src_cy
//! ```
//! Output pixels that map outside the source are fully transparent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::{RasterImage, BYTES_PER_PIXEL};

/// Tolerance, in degrees, for treating an angle as an exact quarter turn.
const QUARTER_TURN_EPSILON: f64 = 0.001;

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest neighbour: fastest, keeps hard pixel edges.
    Nearest,
    /// Bilinear interpolation: smooth result, the usual choice for photos.
    #[default]
    Bilinear,
}

/// Number of clockwise quarter turns (0-3) if the angle is a multiple of 90°.
fn quarter_turns(angle_degrees: f64) -> Option<u8> {
    let normalized = angle_degrees.rem_euclid(360.0);
    let nearest = (normalized / 90.0).round();
    if (normalized - nearest * 90.0).abs() < QUARTER_TURN_EPSILON {
        Some((nearest as u8) % 4)
    } else {
        None
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// Returns the smallest axis-aligned box that contains a `width` x `height`
/// rectangle rotated by `angle_degrees` about its centre:
///
/// ```text
/// new_w = |w * cos θ| + |h * sin θ|
/// new_h = |w * sin θ| + |h * cos θ|
/// ```
///
/// Results are rounded to whole pixels and never zero.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image about its centre.
///
/// The output canvas is expanded to fit the entire rotated image (no
/// clipping). Negative angles and angles beyond a full turn are accepted.
pub fn apply_rotation(
    image: &RasterImage,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> RasterImage {
    let rotated = match quarter_turns(angle_degrees) {
        Some(turns) => rotate_quarter_turns(image, turns),
        None => rotate_resampled(image, angle_degrees, filter),
    };
    debug!(
        angle = angle_degrees,
        from_width = image.width,
        from_height = image.height,
        to_width = rotated.width,
        to_height = rotated.height,
        "rotated image"
    );
    rotated
}

/// Lossless clockwise rotation by a whole number of quarter turns.
fn rotate_quarter_turns(image: &RasterImage, turns: u8) -> RasterImage {
    let (w, h) = (image.width as usize, image.height as usize);
    if turns == 0 {
        return image.clone();
    }

    let (dst_w, dst_h) = if turns == 2 { (w, h) } else { (h, w) };
    let mut output = vec![0u8; image.pixels.len()];

    for (src_idx, px) in image.pixels.chunks_exact(BYTES_PER_PIXEL).enumerate() {
        let (x, y) = (src_idx % w, src_idx / w);
        let (dx, dy) = match turns {
            1 => (h - 1 - y, x),
            2 => (w - 1 - x, h - 1 - y),
            _ => (y, w - 1 - x),
        };
        let dst_idx = (dy * dst_w + dx) * BYTES_PER_PIXEL;
        output[dst_idx..dst_idx + BYTES_PER_PIXEL].copy_from_slice(px);
    }

    RasterImage::new(dst_w as u32, dst_h as u32, output)
}

fn rotate_resampled(
    image: &RasterImage,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> RasterImage {
    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let (sin, cos) = angle_rad.sin_cos();

    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * BYTES_PER_PIXEL];

    for (dst_idx, out) in output.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
        let dst_x = (dst_idx % dst_w as usize) as f64;
        let dst_y = (dst_idx / dst_w as usize) as f64;

        // Work with pixel centres so the mapping is symmetric
        let dx = dst_x + 0.5 - dst_cx;
        let dy = dst_y + 0.5 - dst_cy;

        let src_x = dx * cos + dy * sin + src_cx;
        let src_y = -dx * sin + dy * cos + src_cy;

        let pixel = match filter {
            InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y),
            InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
        };
        out.copy_from_slice(&pixel);
    }

    RasterImage::new(dst_w, dst_h, output)
}

#[inline]
fn inside(image: &RasterImage, x: f64, y: f64) -> bool {
    x >= 0.0 && y >= 0.0 && x < image.width as f64 && y < image.height as f64
}

#[inline]
fn pixel_at(image: &RasterImage, px: usize, py: usize) -> [f64; 4] {
    let idx = (py * image.width as usize + px) * BYTES_PER_PIXEL;
    let p = &image.pixels[idx..idx + BYTES_PER_PIXEL];
    [p[0] as f64, p[1] as f64, p[2] as f64, p[3] as f64]
}

/// Sample the source pixel whose area contains (x, y).
fn sample_nearest(image: &RasterImage, x: f64, y: f64) -> [u8; 4] {
    if !inside(image, x, y) {
        return TRANSPARENT;
    }
    let p = pixel_at(image, x as usize, y as usize);
    [p[0] as u8, p[1] as u8, p[2] as u8, p[3] as u8]
}

/// Sample with bilinear interpolation between the four nearest pixel centres.
///
/// Positions inside the source but closer than half a pixel to its border
/// are clamped to the edge pixels.
fn sample_bilinear(image: &RasterImage, x: f64, y: f64) -> [u8; 4] {
    if !inside(image, x, y) {
        return TRANSPARENT;
    }

    let max_x = image.width as i64 - 1;
    let max_y = image.height as i64 - 1;

    // Shift into pixel-centre coordinates
    let fx = x - 0.5;
    let fy = y - 0.5;
    let x0f = fx.floor();
    let y0f = fy.floor();
    let tx = fx - x0f;
    let ty = fy - y0f;

    let x0 = (x0f as i64).clamp(0, max_x) as usize;
    let x1 = (x0f as i64 + 1).clamp(0, max_x) as usize;
    let y0 = (y0f as i64).clamp(0, max_y) as usize;
    let y1 = (y0f as i64 + 1).clamp(0, max_y) as usize;

    let p00 = pixel_at(image, x0, y0);
    let p10 = pixel_at(image, x1, y0);
    let p01 = pixel_at(image, x0, y1);
    let p11 = pixel_at(image, x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] * (1.0 - tx) * (1.0 - ty)
            + p10[i] * tx * (1.0 - ty)
            + p01[i] * (1.0 - tx) * ty
            + p11[i] * tx * ty;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }
    result
}
