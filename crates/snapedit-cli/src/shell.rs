//! The command loop: reads lines, dispatches them, prints the results.

use std::io::{self, BufRead, Write};

use snapedit_core::{Action, EditorController, ImageSink, ImageSource, Outcome, SessionState};
use tracing::debug;

use crate::commands::{parse_command, Command, HELP};
use crate::platform::TerminalDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<S, K, W> {
    controller: EditorController<S, TerminalDisplay<W>, K>,
}

impl<S, K, W> Shell<S, K, W>
where
    S: ImageSource,
    K: ImageSink,
    W: Write,
{
    pub fn new(controller: EditorController<S, TerminalDisplay<W>, K>) -> Self {
        Self { controller }
    }

    #[cfg(test)]
    pub fn into_display(self) -> TerminalDisplay<W> {
        self.controller.into_display()
    }

    pub fn handle(&mut self, action: Action) -> Outcome {
        self.controller.handle(action)
    }

    /// Execute one command line.
    pub fn execute(&mut self, line: &str) -> Flow {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(e) => {
                self.print(&format!("error: {e}"));
                return Flow::Continue;
            }
        };

        match command {
            Command::Edit(action) => {
                let outcome = self.handle(action);
                debug!(applied = outcome.is_applied(), "command handled");
            }
            Command::Status => {
                let text = self.status();
                self.print(&text);
            }
            Command::Help => self.print(HELP),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Run commands from `input` until it ends or `quit` is read.
    pub fn run<R: BufRead>(&mut self, input: R, interactive: bool) -> io::Result<()> {
        if interactive {
            self.controller.display_mut().prompt();
        }
        for line in input.lines() {
            if self.execute(&line?) == Flow::Quit {
                break;
            }
            if interactive {
                self.controller.display_mut().prompt();
            }
        }
        Ok(())
    }

    fn status(&self) -> String {
        if self.controller.session().state() == SessionState::Empty {
            return "no image selected".to_string();
        }
        let display = self.controller.display();
        match display.shown() {
            Some((width, height)) => {
                format!("image {width}x{height}, zoom {:.2}x", display.scale())
            }
            None => "no image selected".to_string(),
        }
    }

    fn print(&mut self, text: &str) {
        self.controller.display_mut().println(text);
    }
}
