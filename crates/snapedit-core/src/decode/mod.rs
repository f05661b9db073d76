//! Image decoding for SnapEdit.
//!
//! This module turns encoded image files into the [`RasterImage`] held by an
//! edit session:
//! - Format sniffing and decoding via the `image` crate
//! - EXIF orientation correction for camera photos
//!
//! All operations are synchronous and run on the calling thread.

mod source;
mod types;

pub use source::{decode_bytes, decode_file, get_orientation};
pub use types::{DecodeError, DecodeOptions, RasterImage, BYTES_PER_PIXEL};
