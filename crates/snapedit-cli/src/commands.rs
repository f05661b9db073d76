//! The line-oriented command language of the terminal host.
//!
//! ```text
//! open <path>        pick an image (alias: pick)
//! zoom-in | zoom-out
//! rotate <angle>     degrees, clockwise
//! crop <percent>     keep the top-left part
//! save | share
//! status | help | quit
//! ```
//!
//! Arguments of `rotate` and `crop` are passed through untouched, even when
//! missing, so the edit session reports empty or malformed input itself.

use snapedit_core::Action;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  open <path>      load an image (alias: pick)
  zoom-in          enlarge the view
  zoom-out         shrink the view
  rotate <angle>   rotate clockwise by degrees
  crop <percent>   keep the top-left percent of each side
  save             save to the gallery
  share            export to the share folder
  status           show the current image and zoom
  help             show this help
  quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit(Action),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' takes no argument")]
    UnexpectedArgument(&'static str),
}

/// Parse one input line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "open" | "pick" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("open"));
            }
            Command::Edit(Action::Pick(rest.to_string()))
        }
        "rotate" => Command::Edit(Action::Rotate(rest.to_string())),
        "crop" => Command::Edit(Action::Crop(rest.to_string())),
        "zoom-in" => no_argument("zoom-in", rest, Command::Edit(Action::ZoomIn))?,
        "zoom-out" => no_argument("zoom-out", rest, Command::Edit(Action::ZoomOut))?,
        "save" => no_argument("save", rest, Command::Edit(Action::Save))?,
        "share" => no_argument("share", rest, Command::Edit(Action::Share))?,
        "status" => no_argument("status", rest, Command::Status)?,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn no_argument(name: &'static str, rest: &str, command: Command) -> Result<Command, CommandError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::UnexpectedArgument(name))
    }
}
