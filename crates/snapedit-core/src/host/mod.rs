//! Interfaces to the host platform and the action dispatcher built on them.
//!
//! The edit session only ever sees decoded images. Everything around it
//! (picking a file, drawing on screen, writing results somewhere) is
//! supplied by the host through the traits below and driven by an
//! [`EditorController`].

mod controller;

pub use controller::{Action, EditorController, Notice, Outcome};

use std::path::PathBuf;

use crate::decode::{DecodeError, RasterImage};
use crate::error::PersistError;

/// Supplies the initial image for a user selection.
pub trait ImageSource {
    /// Load and decode the image the user picked.
    fn load(&mut self, selection: &str) -> Result<RasterImage, DecodeError>;
}

/// Renders the working image and transient notices.
pub trait DisplaySurface {
    /// Show `image` as the current picture.
    fn show(&mut self, image: &RasterImage);

    /// Apply a presentation scale uniformly to both axes.
    fn set_scale(&mut self, scale: f32);

    /// Show a short transient message.
    fn notify(&mut self, notice: &Notice);
}

/// Persists or exports finished images.
pub trait ImageSink {
    /// Store `image` durably (the gallery).
    fn save(&mut self, image: &RasterImage) -> Result<SavedImage, PersistError>;

    /// Hand `image` to another application.
    fn share(&mut self, image: &RasterImage) -> Result<SavedImage, PersistError>;
}

/// Where a sink put an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub location: PathBuf,
    pub bytes_written: usize,
}
