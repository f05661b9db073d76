//! Dispatch of user actions to the edit session.
//!
//! Each action runs to completion before the next is handled. A rejected
//! action produces exactly one notice and changes nothing; successful saves
//! and shares also confirm with a notice.

use std::fmt;

use tracing::{debug, info};

use super::{DisplaySurface, ImageSink, ImageSource};
use crate::error::EditError;
use crate::session::EditSession;

/// One discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open the image identified by the selection (a path for file sources).
    Pick(String),
    ZoomIn,
    ZoomOut,
    /// Rotate by the angle typed by the user.
    Rotate(String),
    /// Crop to the percentage typed by the user.
    Crop(String),
    Save,
    Share,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Pick(_) => "pick",
            Action::ZoomIn => "zoom-in",
            Action::ZoomOut => "zoom-out",
            Action::Rotate(_) => "rotate",
            Action::Crop(_) => "crop",
            Action::Save => "save",
            Action::Share => "share",
        }
    }
}

/// A short user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(String);

impl Notice {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    /// The notice shown when `action` was rejected with `err`.
    fn for_rejection(action: &Action, err: &EditError) -> Self {
        match (action, err) {
            (Action::Share, EditError::NoImageSelected) => Self::new("No image selected"),
            (Action::Save, EditError::Persistence(_)) => Self::new("Error saving image"),
            (Action::Share, EditError::Persistence(_)) => Self::new("Error sharing image"),
            _ => Self::new(err.to_string()),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of handling one action.
#[derive(Debug)]
pub enum Outcome {
    Applied,
    Rejected(EditError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Owns an edit session and the host collaborators, and routes actions
/// between them.
pub struct EditorController<S, D, K> {
    session: EditSession,
    source: S,
    display: D,
    sink: K,
}

impl<S, D, K> EditorController<S, D, K>
where
    S: ImageSource,
    D: DisplaySurface,
    K: ImageSink,
{
    pub fn new(session: EditSession, source: S, display: D, sink: K) -> Self {
        Self {
            session,
            source,
            display,
            sink,
        }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Tear down the controller, returning the display surface.
    pub fn into_display(self) -> D {
        self.display
    }

    /// Handle one user action.
    pub fn handle(&mut self, action: Action) -> Outcome {
        match self.dispatch(&action) {
            Ok(()) => Outcome::Applied,
            Err(err) => {
                debug!(action = action.name(), error = %err, "action rejected");
                self.display.notify(&Notice::for_rejection(&action, &err));
                Outcome::Rejected(err)
            }
        }
    }

    fn dispatch(&mut self, action: &Action) -> Result<(), EditError> {
        match action {
            Action::Pick(selection) => {
                let image = self.source.load(selection)?;
                let image = self.session.select(image);
                self.display.show(image);
            }
            Action::ZoomIn => {
                let scale = self.session.zoom_in()?;
                self.display.set_scale(scale.value());
            }
            Action::ZoomOut => {
                let scale = self.session.zoom_out()?;
                self.display.set_scale(scale.value());
            }
            Action::Rotate(text) => {
                let image = self.session.rotate(text)?;
                self.display.show(image);
            }
            Action::Crop(text) => {
                let image = self.session.crop(text)?;
                self.display.show(image);
            }
            Action::Save => {
                let image = self.session.export_current()?;
                let saved = self.sink.save(&image)?;
                info!(location = %saved.location.display(), bytes = saved.bytes_written, "image saved");
                self.display.notify(&Notice::new("Image saved to gallery"));
            }
            Action::Share => {
                let image = self.session.export_current()?;
                let shared = self.sink.share(&image)?;
                info!(location = %shared.location.display(), "image shared");
                self.display.notify(&Notice::new("Image shared"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{DecodeError, RasterImage};
    use crate::error::PersistError;
    use crate::host::SavedImage;
    use crate::session::SessionState;
    use std::path::PathBuf;

    #[derive(Default)]
    struct FakeSource;

    impl ImageSource for FakeSource {
        fn load(&mut self, selection: &str) -> Result<RasterImage, DecodeError> {
            match selection {
                "tall" => Ok(RasterImage::filled(100, 200, [10, 20, 30, 255])),
                "small" => Ok(RasterImage::filled(4, 4, [1, 1, 1, 255])),
                _ => Err(DecodeError::InvalidFormat),
            }
        }
    }

    #[derive(Default)]
    struct FakeDisplay {
        shown: Vec<(u32, u32)>,
        scales: Vec<f32>,
        notices: Vec<String>,
    }

    impl DisplaySurface for FakeDisplay {
        fn show(&mut self, image: &RasterImage) {
            self.shown.push(image.dimensions());
        }

        fn set_scale(&mut self, scale: f32) {
            self.scales.push(scale);
        }

        fn notify(&mut self, notice: &Notice) {
            self.notices.push(notice.text().to_string());
        }
    }

    #[derive(Default)]
    struct FakeSink {
        fail: bool,
        saved: Vec<RasterImage>,
        shared: Vec<RasterImage>,
    }

    impl FakeSink {
        fn write(&self, image: &RasterImage) -> Result<SavedImage, PersistError> {
            if self.fail {
                return Err(std::io::Error::other("disk full").into());
            }
            Ok(SavedImage {
                location: PathBuf::from("/gallery/edited.jpg"),
                bytes_written: image.pixels.len(),
            })
        }
    }

    impl ImageSink for FakeSink {
        fn save(&mut self, image: &RasterImage) -> Result<SavedImage, PersistError> {
            let saved = self.write(image)?;
            self.saved.push(image.clone());
            Ok(saved)
        }

        fn share(&mut self, image: &RasterImage) -> Result<SavedImage, PersistError> {
            let shared = self.write(image)?;
            self.shared.push(image.clone());
            Ok(shared)
        }
    }

    type TestController = EditorController<FakeSource, FakeDisplay, FakeSink>;

    fn controller() -> TestController {
        EditorController::new(
            EditSession::new(),
            FakeSource,
            FakeDisplay::default(),
            FakeSink::default(),
        )
    }

    #[test]
    fn test_every_action_rejected_while_empty() {
        let actions = [
            Action::ZoomIn,
            Action::ZoomOut,
            Action::Rotate("45".into()),
            Action::Crop("50".into()),
            Action::Save,
            Action::Share,
        ];
        for action in actions {
            let mut ctl = controller();
            let outcome = ctl.handle(action.clone());

            assert!(
                matches!(outcome, Outcome::Rejected(EditError::NoImageSelected)),
                "{} should be rejected",
                action.name()
            );
            assert_eq!(ctl.session().state(), SessionState::Empty);
            assert_eq!(ctl.display().notices.len(), 1, "{}", action.name());
            assert!(ctl.display().shown.is_empty());
        }
    }

    #[test]
    fn test_empty_state_notice_texts() {
        let mut ctl = controller();
        ctl.handle(Action::Rotate("45".into()));
        ctl.handle(Action::Share);
        assert_eq!(
            ctl.display().notices,
            vec!["Select an image first", "No image selected"]
        );
    }

    #[test]
    fn test_pick_shows_image() {
        let mut ctl = controller();
        assert!(ctl.handle(Action::Pick("tall".into())).is_applied());
        assert_eq!(ctl.session().state(), SessionState::Loaded);
        assert_eq!(ctl.display().shown, vec![(100, 200)]);
        assert!(ctl.display().notices.is_empty());
    }

    #[test]
    fn test_failed_pick_keeps_session() {
        let mut ctl = controller();
        ctl.handle(Action::Pick("small".into()));

        let outcome = ctl.handle(Action::Pick("broken".into()));
        assert!(matches!(outcome, Outcome::Rejected(EditError::Source(_))));
        assert_eq!(ctl.session().current().unwrap().dimensions(), (4, 4));
        assert_eq!(
            ctl.display().notices,
            vec!["Could not open image: Invalid or unsupported image format"]
        );
    }

    #[test]
    fn test_zoom_updates_display_scale() {
        let mut ctl = controller();
        ctl.handle(Action::Pick("small".into()));
        ctl.handle(Action::ZoomIn);
        ctl.handle(Action::ZoomOut);

        let scales = &ctl.display().scales;
        assert_eq!(scales.len(), 2);
        assert!((scales[0] - 1.2).abs() < 1e-6);
        assert!((scales[1] - 0.96).abs() < 1e-6);
        // Zooming never re-renders the image itself
        assert_eq!(ctl.display().shown.len(), 1);
    }

    #[test]
    fn test_edit_scenario() {
        let mut ctl = controller();
        ctl.handle(Action::Pick("tall".into()));
        assert!(ctl.handle(Action::Crop("50".into())).is_applied());
        assert!(ctl.handle(Action::Rotate("90".into())).is_applied());

        assert_eq!(ctl.display().shown, vec![(100, 200), (50, 100), (100, 50)]);
    }

    #[test]
    fn test_bad_input_notices() {
        let mut ctl = controller();
        ctl.handle(Action::Pick("small".into()));

        ctl.handle(Action::Rotate(String::new()));
        ctl.handle(Action::Rotate("abc".into()));
        ctl.handle(Action::Crop(String::new()));
        ctl.handle(Action::Crop("abc".into()));

        assert_eq!(
            ctl.display().notices,
            vec![
                "Enter rotation angle",
                "Invalid rotation angle",
                "Enter crop percentage",
                "Invalid crop percentage",
            ]
        );
        assert_eq!(ctl.session().current().unwrap().dimensions(), (4, 4));
    }

    #[test]
    fn test_save_and_share() {
        let mut ctl = controller();
        ctl.handle(Action::Pick("small".into()));
        assert!(ctl.handle(Action::Save).is_applied());
        assert!(ctl.handle(Action::Share).is_applied());

        assert_eq!(ctl.sink().saved.len(), 1);
        assert_eq!(ctl.sink().shared.len(), 1);
        assert_eq!(
            ctl.display().notices,
            vec!["Image saved to gallery", "Image shared"]
        );
    }

    #[test]
    fn test_persistence_failure_notices() {
        let mut ctl = EditorController::new(
            EditSession::new(),
            FakeSource,
            FakeDisplay::default(),
            FakeSink {
                fail: true,
                ..FakeSink::default()
            },
        );
        ctl.handle(Action::Pick("small".into()));

        assert!(matches!(
            ctl.handle(Action::Save),
            Outcome::Rejected(EditError::Persistence(_))
        ));
        assert!(matches!(
            ctl.handle(Action::Share),
            Outcome::Rejected(EditError::Persistence(_))
        ));
        assert_eq!(
            ctl.display().notices,
            vec!["Error saving image", "Error sharing image"]
        );
        assert_eq!(ctl.session().state(), SessionState::Loaded);
    }
}
