//! User settings loaded from a `settings.toml` file.
//!
//! Lookup order: the file given with `--config`, then
//! `<config dir>/SnapEdit/settings.toml`, then built-in defaults. Missing
//! keys fall back to their defaults; out-of-range values are sanitised
//! rather than rejected.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snapedit_core::encode::DEFAULT_JPEG_QUALITY;
use snapedit_core::session::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use snapedit_core::{DecodeOptions, InterpolationFilter, SessionOptions, ZoomSteps};
use thiserror::Error;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "SnapEdit";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where saved images go. Defaults to `<pictures>/SnapEdit`.
    pub gallery_dir: Option<PathBuf>,
    /// Where shared images are handed off. Defaults to `<cache>/SnapEdit/share`.
    pub share_dir: Option<PathBuf>,
    pub jpeg_quality: u8,
    pub zoom_in_step: f32,
    pub zoom_out_step: f32,
    pub interpolation: InterpolationFilter,
    pub apply_exif_orientation: bool,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gallery_dir: None,
            share_dir: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            zoom_in_step: ZOOM_IN_FACTOR,
            zoom_out_step: ZOOM_OUT_FACTOR,
            interpolation: InterpolationFilter::default(),
            apply_exif_orientation: true,
            log_level: None,
        }
    }
}

impl Config {
    /// Clamp quality and replace unusable zoom steps with the defaults.
    pub fn sanitized(mut self) -> Self {
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        if !(self.zoom_in_step.is_finite() && self.zoom_in_step > 0.0) {
            self.zoom_in_step = ZOOM_IN_FACTOR;
        }
        if !(self.zoom_out_step.is_finite() && self.zoom_out_step > 0.0) {
            self.zoom_out_step = ZOOM_OUT_FACTOR;
        }
        self
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            filter: self.interpolation,
            zoom: ZoomSteps {
                zoom_in: self.zoom_in_step,
                zoom_out: self.zoom_out_step,
            },
        }
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            apply_orientation: self.apply_exif_orientation,
        }
    }

    pub fn gallery_dir(&self) -> PathBuf {
        self.gallery_dir.clone().unwrap_or_else(|| {
            dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_NAME)
        })
    }

    pub fn share_dir(&self) -> PathBuf {
        self.share_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_NAME)
                .join("share")
        })
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|path| path.join(APP_NAME).join(CONFIG_FILE))
}

/// Load settings from `explicit` if given, otherwise from the default
/// location if that file exists, otherwise the defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => load_from_path(&path),
        _ => Ok(Config::default()),
    }
}

pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config.sanitized())
}
