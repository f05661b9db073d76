//! SnapEdit Core - image edit session library
//!
//! This crate holds everything a SnapEdit host needs apart from the platform
//! glue: decoding picked images, the edit session with its rotate/crop/zoom
//! operations, JPEG encoding for save and share, and the controller that
//! turns user actions into session calls and notices.

pub mod decode;
pub mod encode;
pub mod error;
pub mod host;
pub mod session;
pub mod transform;

pub use decode::{decode_bytes, decode_file, DecodeError, DecodeOptions, RasterImage};
pub use encode::{encode_jpeg, EncodeError};
pub use error::{EditError, PersistError};
pub use host::{
    Action, DisplaySurface, EditorController, ImageSink, ImageSource, Notice, Outcome, SavedImage,
};
pub use session::{
    EditSession, InputField, PresentationScale, SessionOptions, SessionState, TransformRequest,
    ZoomSteps,
};
pub use transform::{
    apply_rotation, compute_rotated_bounds, crop_region, crop_top_left, InterpolationFilter,
    RegionError,
};
