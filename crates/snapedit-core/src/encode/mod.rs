//! Image encoding for SnapEdit.
//!
//! The image sink persists the working image as JPEG. Quality defaults to
//! the maximum (100) so that saving does not visibly degrade an edit.

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError, DEFAULT_JPEG_QUALITY};
