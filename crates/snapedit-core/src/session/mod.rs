//! The image edit session: one working image and the transforms applied to it.
//!
//! # States
//!
//! A session starts **Empty**. [`EditSession::select`] is the only way to
//! reach **Loaded**, and nothing leads back. Every other operation either
//! replaces the working image (Loaded → Loaded) or fails with
//! [`EditError::NoImageSelected`] while Empty.
//!
//! A transform is computed from the current image first and swapped in with a
//! single assignment only once it succeeded, so a rejected action never leaves
//! a partially edited image behind.

mod request;
mod scale;

pub use request::{InputField, TransformRequest};
pub use scale::{PresentationScale, ZoomSteps, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};

use tracing::debug;

use crate::decode::RasterImage;
use crate::error::EditError;
use crate::transform::{apply_rotation, crop_top_left, InterpolationFilter};

/// Whether the session holds a working image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Loaded,
}

/// Tunables for an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionOptions {
    /// Resampling filter used for non-quarter-turn rotations.
    pub filter: InterpolationFilter,
    /// Factors used by [`EditSession::zoom_in`] and [`EditSession::zoom_out`].
    pub zoom: ZoomSteps,
}

/// Holds the working image and applies user-requested transforms to it.
#[derive(Debug, Default)]
pub struct EditSession {
    working: Option<RasterImage>,
    scale: PresentationScale,
    options: SessionOptions,
}

impl EditSession {
    /// Create an empty session with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with the given options.
    pub fn with_options(options: SessionOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn state(&self) -> SessionState {
        if self.working.is_some() {
            SessionState::Loaded
        } else {
            SessionState::Empty
        }
    }

    /// The working image, if one has been selected.
    pub fn current(&self) -> Option<&RasterImage> {
        self.working.as_ref()
    }

    pub fn scale(&self) -> PresentationScale {
        self.scale
    }

    /// Make `image` the working image.
    ///
    /// The presentation scale is kept as it is.
    pub fn select(&mut self, image: RasterImage) -> &RasterImage {
        debug!(width = image.width, height = image.height, "image selected");
        self.working.insert(image)
    }

    /// Multiply the presentation scale by `factor`.
    ///
    /// Pixels are never touched; the caller applies the returned scale to
    /// its display.
    pub fn zoom_by(&mut self, factor: f32) -> Result<PresentationScale, EditError> {
        self.require_image()?;
        self.scale = self.scale.scaled_by(factor);
        debug!(factor, scale = self.scale.value(), "zoomed");
        Ok(self.scale)
    }

    pub fn zoom_in(&mut self) -> Result<PresentationScale, EditError> {
        self.zoom_by(self.options.zoom.zoom_in)
    }

    pub fn zoom_out(&mut self) -> Result<PresentationScale, EditError> {
        self.zoom_by(self.options.zoom.zoom_out)
    }

    /// Parse `text` as an angle in degrees and rotate the working image.
    pub fn rotate(&mut self, text: &str) -> Result<&RasterImage, EditError> {
        self.require_image()?;
        let request = TransformRequest::rotate(text)?;
        self.apply(request)
    }

    /// Parse `text` as a percentage and crop the working image to its
    /// top-left region.
    pub fn crop(&mut self, text: &str) -> Result<&RasterImage, EditError> {
        self.require_image()?;
        let request = TransformRequest::crop(text)?;
        self.apply(request)
    }

    /// Apply an already parsed transform, replacing the working image.
    pub fn apply(&mut self, request: TransformRequest) -> Result<&RasterImage, EditError> {
        let image = self.require_image()?;
        let transformed = match request {
            TransformRequest::Rotate { degrees } => {
                apply_rotation(image, degrees, self.options.filter)
            }
            TransformRequest::Crop { percent } => crop_top_left(image, percent)?,
        };
        Ok(self.working.insert(transformed))
    }

    /// A copy of the working image for saving or sharing.
    pub fn export_current(&self) -> Result<RasterImage, EditError> {
        self.require_image().cloned()
    }

    fn require_image(&self) -> Result<&RasterImage, EditError> {
        self.working.as_ref().ok_or(EditError::NoImageSelected)
    }
}
