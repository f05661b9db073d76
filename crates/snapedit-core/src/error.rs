//! Error taxonomy for edit actions.
//!
//! The `Display` text of an [`EditError`] is the short notice shown to the
//! user when an action is rejected.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::session::InputField;
use crate::transform::RegionError;

/// Why an image sink could not persist or export an image.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The image could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Writing the encoded image failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a user action on the edit session was rejected.
///
/// Every variant is recoverable: the working image and presentation scale
/// are left exactly as they were before the action.
#[derive(Debug, Error)]
pub enum EditError {
    /// The action needs a working image and none has been selected yet.
    #[error("Select an image first")]
    NoImageSelected,

    /// The text field for the action was left empty.
    #[error("Enter {0}")]
    EmptyInput(InputField),

    /// The text field does not hold a finite number.
    #[error("Invalid {0}")]
    InvalidNumber(InputField),

    /// The crop would produce an empty or out-of-bounds region.
    #[error("Invalid crop region: {0}")]
    InvalidRegion(#[from] RegionError),

    /// Saving or sharing the image failed.
    #[error("Could not write image: {0}")]
    Persistence(#[from] PersistError),

    /// The selected image could not be loaded.
    #[error("Could not open image: {0}")]
    Source(#[from] DecodeError),
}
