//! `snapedit`: open a picture, zoom, rotate, crop, then save or share it.
//!
//! Commands are read from `--exec` flags when given, otherwise from stdin.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use snapedit_core::{Action, EditSession, EditorController};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod platform;
mod shell;

use config::Config;
use platform::{DirectorySink, FileSource, TerminalDisplay};
use shell::{Flow, Shell};

/// Simple photo editor driven by typed commands.
#[derive(Parser, Debug)]
#[command(name = "snapedit", version, about)]
struct Cli {
    /// Image to open on start.
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,

    /// Settings file (default: <config dir>/SnapEdit/settings.toml).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory that `save` writes into.
    #[arg(long, value_name = "DIR")]
    gallery_dir: Option<PathBuf>,

    /// Directory that `share` writes into.
    #[arg(long, value_name = "DIR")]
    share_dir: Option<PathBuf>,

    /// JPEG quality for saved and shared images (1-100).
    #[arg(short, long, value_name = "1-100")]
    quality: Option<u8>,

    /// Run this command instead of reading stdin. Repeatable.
    #[arg(short = 'e', long = "exec", value_name = "COMMAND")]
    exec: Vec<String>,
}

impl Cli {
    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(dir) = &self.gallery_dir {
            config.gallery_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.share_dir {
            config.share_dir = Some(dir.clone());
        }
        if let Some(quality) = self.quality {
            config.jpeg_quality = quality;
        }
        config.sanitized()
    }
}

/// The pick action for the positional image argument. Selections are text,
/// so a path that is not valid UTF-8 cannot be opened faithfully.
fn open_action(path: &Path) -> Result<Action, String> {
    path.to_str()
        .map(|selection| Action::Pick(selection.to_string()))
        .ok_or_else(|| format!("image path {} is not valid UTF-8", path.display()))
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.log_level.as_deref().unwrap_or("warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load(cli.config.as_deref()) {
        Ok(config) => cli.apply_overrides(config),
        Err(e) => {
            eprintln!("snapedit: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);
    debug!(?config, "settings loaded");

    let controller = EditorController::new(
        EditSession::with_options(config.session_options()),
        FileSource::new(config.decode_options()),
        TerminalDisplay::new(io::stdout()),
        DirectorySink::new(config.gallery_dir(), config.share_dir(), config.jpeg_quality),
    );
    let mut shell = Shell::new(controller);

    if let Some(image) = &cli.image {
        match open_action(image) {
            Ok(action) => {
                shell.handle(action);
            }
            Err(message) => {
                eprintln!("snapedit: {message}");
                return ExitCode::FAILURE;
            }
        }
    }

    if !cli.exec.is_empty() {
        for line in &cli.exec {
            if shell.execute(line) == Flow::Quit {
                break;
            }
        }
        return ExitCode::SUCCESS;
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    match shell.run(stdin.lock(), interactive) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to read commands");
            eprintln!("snapedit: {e}");
            ExitCode::FAILURE
        }
    }
}
