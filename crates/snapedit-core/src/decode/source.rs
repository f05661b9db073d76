//! Decoding of encoded image files with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::metadata::Orientation;
use image::ImageReader;
use tracing::debug;

use super::{DecodeError, DecodeOptions, RasterImage};

/// Decode an encoded image (JPEG, PNG, WebP, BMP, GIF) from bytes.
///
/// The format is sniffed from the content, not from any file name. When
/// `options.apply_orientation` is set, the EXIF orientation tag (if any) is
/// applied so the returned pixels are upright.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a known format,
/// and `DecodeError::CorruptedFile` if decoding fails part-way.
pub fn decode_bytes(bytes: &[u8], options: DecodeOptions) -> Result<RasterImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let mut img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if options.apply_orientation {
        let orientation = get_orientation(bytes);
        if orientation != Orientation::NoTransforms {
            debug!(?orientation, "applying EXIF orientation");
            img.apply_orientation(orientation);
        }
    }

    let raster = RasterImage::from_rgba_image(img.into_rgba8());
    debug!(width = raster.width, height = raster.height, "decoded image");
    Ok(raster)
}

/// Read and decode an image file.
pub fn decode_file(path: impl AsRef<Path>, options: DecodeOptions) -> Result<RasterImage, DecodeError> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_bytes(&bytes, options)
}

/// Extract the EXIF orientation from encoded image bytes.
///
/// Returns `Orientation::NoTransforms` if there is no EXIF data or the tag
/// is missing or out of range.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::NoTransforms;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .and_then(|value| u8::try_from(value).ok())
        .and_then(Orientation::from_exif)
        .unwrap_or(Orientation::NoTransforms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn two_by_one() -> RgbaImage {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        img
    }

    #[test]
    fn test_decode_png() {
        let bytes = png_bytes(&two_by_one());
        let img = decode_bytes(&bytes, DecodeOptions::default()).unwrap();

        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(img.pixel(1, 0), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_decode_jpeg_from_encoder() {
        let src = RasterImage::filled(8, 4, [128, 128, 128, 255]);
        let bytes = crate::encode::encode_jpeg(&src, 100).unwrap();

        let img = decode_bytes(&bytes, DecodeOptions::default()).unwrap();
        assert_eq!(img.dimensions(), (8, 4));
        // JPEG has no alpha channel, decoded pixels are opaque
        assert_eq!(img.pixel(0, 0).unwrap()[3], 255);
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_bytes(&[0x00, 0x01, 0x02, 0x03], DecodeOptions::default());
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_bytes(&[], DecodeOptions::default()).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(&two_by_one());
        let result = decode_bytes(&bytes[..bytes.len() / 2], DecodeOptions::default());
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode_file("/definitely/not/here.png", DecodeOptions::default());
        assert!(matches!(result, Err(DecodeError::Io(_))));
    }

    #[test]
    fn test_orientation_without_exif() {
        let bytes = png_bytes(&two_by_one());
        assert_eq!(get_orientation(&bytes), Orientation::NoTransforms);
        assert_eq!(get_orientation(&[0x00, 0x01]), Orientation::NoTransforms);
    }

    /// A JPEG carrying an EXIF APP1 segment with the given orientation tag.
    fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
        let src = RasterImage::filled(width, height, [200, 60, 20, 255]);
        let jpeg = crate::encode::encode_jpeg(&src, 90).unwrap();

        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"MM\x00\x2A");
        tiff.extend_from_slice(&8u32.to_be_bytes()); // first IFD offset
        tiff.extend_from_slice(&1u16.to_be_bytes()); // entry count
        tiff.extend_from_slice(&0x0112u16.to_be_bytes()); // Orientation
        tiff.extend_from_slice(&3u16.to_be_bytes()); // SHORT
        tiff.extend_from_slice(&1u32.to_be_bytes());
        tiff.extend_from_slice(&orientation.to_be_bytes());
        tiff.extend_from_slice(&[0, 0]);
        tiff.extend_from_slice(&0u32.to_be_bytes()); // no next IFD

        let mut app1 = vec![0xFF, 0xE1];
        let length = (2 + 6 + tiff.len()) as u16;
        app1.extend_from_slice(&length.to_be_bytes());
        app1.extend_from_slice(b"Exif\x00\x00");
        app1.extend_from_slice(&tiff);

        // Segment goes right after SOI
        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&app1);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_exif_orientation_is_read() {
        let bytes = jpeg_with_orientation(4, 2, 6);
        assert_eq!(get_orientation(&bytes), Orientation::Rotate90);
    }

    #[test]
    fn test_exif_rotation_applied_on_decode() {
        let bytes = jpeg_with_orientation(4, 2, 6);

        let img = decode_bytes(&bytes, DecodeOptions::default()).unwrap();
        assert_eq!(img.dimensions(), (2, 4));

        let raw = decode_bytes(
            &bytes,
            DecodeOptions {
                apply_orientation: false,
            },
        )
        .unwrap();
        assert_eq!(raw.dimensions(), (4, 2));
    }

    #[test]
    fn test_exif_normal_orientation_keeps_size() {
        let bytes = jpeg_with_orientation(4, 2, 1);
        assert_eq!(get_orientation(&bytes), Orientation::NoTransforms);
        let img = decode_bytes(&bytes, DecodeOptions::default()).unwrap();
        assert_eq!(img.dimensions(), (4, 2));
    }

    #[test]
    fn test_orientation_ignored_when_disabled() {
        let bytes = png_bytes(&two_by_one());
        let options = DecodeOptions {
            apply_orientation: false,
        };
        assert_eq!(decode_bytes(&bytes, options).unwrap().dimensions(), (2, 1));
    }
}
