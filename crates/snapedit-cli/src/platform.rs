//! Terminal and filesystem implementations of the host collaborators.
//!
//! - [`FileSource`] decodes the file named by a selection
//! - [`TerminalDisplay`] describes the working image and prints notices
//! - [`DirectorySink`] writes JPEGs into a gallery folder or a share outbox

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use snapedit_core::{
    decode_file, encode_jpeg, DecodeError, DecodeOptions, DisplaySurface, ImageSink, ImageSource,
    Notice, PersistError, RasterImage, SavedImage,
};
use tracing::{debug, warn};

/// Loads images from the local filesystem.
pub struct FileSource {
    options: DecodeOptions,
}

impl FileSource {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }
}

impl ImageSource for FileSource {
    fn load(&mut self, selection: &str) -> Result<RasterImage, DecodeError> {
        debug!(path = selection, "loading image");
        decode_file(selection, self.options)
    }
}

/// A text "screen": reports what would be shown and prints notices.
pub struct TerminalDisplay<W> {
    out: W,
    shown: Option<(u32, u32)>,
    scale: f32,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: None,
            scale: 1.0,
        }
    }

    /// Dimensions of the image last shown.
    pub fn shown(&self) -> Option<(u32, u32)> {
        self.shown
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Print a line that is not tied to a collaborator call.
    pub fn println(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!(error = %e, "failed to write to terminal");
        }
    }

    /// Print an input prompt without a line break.
    pub fn prompt(&mut self) {
        let result = write!(self.out, "> ").and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!(error = %e, "failed to write to terminal");
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySurface for TerminalDisplay<W> {
    fn show(&mut self, image: &RasterImage) {
        self.shown = Some(image.dimensions());
        self.println(&format!(
            "showing {}x{} image at {:.2}x",
            image.width, image.height, self.scale
        ));
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.println(&format!("zoom {scale:.2}x"));
    }

    fn notify(&mut self, notice: &Notice) {
        self.println(&format!("» {notice}"));
    }
}

/// Writes JPEG files into a gallery directory (save) and a share outbox
/// (share), numbering them so that nothing is overwritten.
pub struct DirectorySink {
    gallery_dir: PathBuf,
    share_dir: PathBuf,
    quality: u8,
}

impl DirectorySink {
    pub fn new(gallery_dir: PathBuf, share_dir: PathBuf, quality: u8) -> Self {
        Self {
            gallery_dir,
            share_dir,
            quality,
        }
    }

    fn write_numbered(
        &self,
        dir: &Path,
        prefix: &str,
        image: &RasterImage,
    ) -> Result<SavedImage, PersistError> {
        let bytes = encode_jpeg(image, self.quality)?;
        fs::create_dir_all(dir)?;

        let mut n = 1u32;
        loop {
            let location = dir.join(format!("{prefix}_{n}.jpg"));
            match OpenOptions::new().write(true).create_new(true).open(&location) {
                Ok(file) => {
                    write_or_discard(file, &location, &bytes)?;
                    return Ok(SavedImage {
                        location,
                        bytes_written: bytes.len(),
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Write `bytes` to the freshly created file at `location`. On failure the
/// partial file is removed so a failed save leaves nothing behind.
fn write_or_discard(mut out: impl Write, location: &Path, bytes: &[u8]) -> io::Result<()> {
    let result = out.write_all(bytes).and_then(|_| out.flush());
    if let Err(e) = result {
        drop(out);
        if let Err(remove_err) = fs::remove_file(location) {
            warn!(path = %location.display(), error = %remove_err, "failed to remove partial image");
        }
        return Err(e);
    }
    Ok(())
}

impl ImageSink for DirectorySink {
    fn save(&mut self, image: &RasterImage) -> Result<SavedImage, PersistError> {
        self.write_numbered(&self.gallery_dir, "edited", image)
    }

    fn share(&mut self, image: &RasterImage) -> Result<SavedImage, PersistError> {
        self.write_numbered(&self.share_dir, "share", image)
    }
}
