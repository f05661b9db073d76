//! Image transformation operations: rotation and cropping.
//!
//! Every transform takes the working image by reference and returns a new
//! image; the edit session swaps the result in only when the transform
//! succeeded.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Crop regions are in whole pixels, origin is the top-left corner

mod crop;
mod rotation;

pub use crop::{crop_region, crop_top_left, RegionError};
pub use rotation::{apply_rotation, compute_rotated_bounds, InterpolationFilter};
