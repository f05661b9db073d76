//! Parsing of user-typed transform parameters.

use std::fmt;

use crate::error::EditError;

/// The text field a transform parameter was typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// Degrees to rotate by.
    RotationAngle,
    /// Percentage of each side to keep when cropping.
    CropPercentage,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::RotationAngle => f.write_str("rotation angle"),
            InputField::CropPercentage => f.write_str("crop percentage"),
        }
    }
}

/// A single transform requested by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformRequest {
    /// Rotate clockwise by `degrees` about the image centre.
    Rotate { degrees: f64 },
    /// Keep the top-left `percent`% of each side.
    Crop { percent: f64 },
}

impl TransformRequest {
    /// Parse the rotation angle field.
    pub fn rotate(text: &str) -> Result<Self, EditError> {
        let degrees = parse_number(text, InputField::RotationAngle)?;
        Ok(TransformRequest::Rotate { degrees })
    }

    /// Parse the crop percentage field.
    pub fn crop(text: &str) -> Result<Self, EditError> {
        let percent = parse_number(text, InputField::CropPercentage)?;
        Ok(TransformRequest::Crop { percent })
    }

}

/// Parse a float from a text field. Only emptiness and numeric syntax are
/// checked; ranges are the transform's business.
///
/// Only a field with no characters at all counts as empty. Surrounding
/// whitespace is ignored when parsing, so a blank field is an invalid number.
fn parse_number(text: &str, field: InputField) -> Result<f64, EditError> {
    if text.is_empty() {
        return Err(EditError::EmptyInput(field));
    }
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(EditError::InvalidNumber(field))
}
