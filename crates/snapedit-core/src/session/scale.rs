//! Presentation scale: the display-only zoom factor.

/// Factor applied by a zoom-in action.
pub const ZOOM_IN_FACTOR: f32 = 1.2;

/// Factor applied by a zoom-out action.
pub const ZOOM_OUT_FACTOR: f32 = 0.8;

/// Cumulative zoom multiplier applied to the display surface.
///
/// It never touches the stored pixels and is independent of the working
/// image's dimensions.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PresentationScale(f32);

impl Default for PresentationScale {
    fn default() -> Self {
        Self(1.0)
    }
}

impl PresentationScale {
    /// The current multiplier.
    pub fn value(self) -> f32 {
        self.0
    }

    /// The scale after one more zoom step by `factor`.
    pub fn scaled_by(self, factor: f32) -> Self {
        Self(self.0 * factor)
    }
}

/// The pair of factors used by zoom-in and zoom-out actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSteps {
    pub zoom_in: f32,
    pub zoom_out: f32,
}

impl Default for ZoomSteps {
    fn default() -> Self {
        Self {
            zoom_in: ZOOM_IN_FACTOR,
            zoom_out: ZOOM_OUT_FACTOR,
        }
    }
}
