//! Terminal run loop.
//!
//! A small, synchronous Elm-style runner: set up the terminal, render the
//! model, feed it key messages until it asks to stop, and restore the
//! terminal no matter how the loop ends.

use std::io::{self, Write};

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};
use thiserror::Error;

use crate::keys::{self, KeyMsg};

/// Errors from terminal setup, rendering, or event polling.
#[derive(Error, Debug)]
pub enum ProgramError {
    /// Terminal I/O failed.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized [`Result`] type for program operations.
pub type Result<T> = std::result::Result<T, ProgramError>;

/// Whether the event loop keeps going after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep processing events.
    Continue,
    /// Tear down and return the final model.
    Quit,
}

/// The model contract for the run loop.
pub trait Model {
    /// Process one key message.
    fn update(&mut self, msg: &KeyMsg) -> Flow;

    /// Render the model as a string for display.
    ///
    /// This should be a pure function with no side effects.
    fn view(&self) -> String;
}

/// Program options.
#[derive(Debug, Clone, Copy)]
pub struct ProgramOptions {
    /// Use the alternate screen buffer.
    pub alt_screen: bool,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self { alt_screen: true }
    }
}

/// The program runner: terminal lifecycle plus the update/render cycle.
pub struct Program<M: Model> {
    model: M,
    options: ProgramOptions,
}

impl<M: Model> Program<M> {
    /// Create a new program with the given model.
    pub fn new(model: M) -> Self {
        Self {
            model,
            options: ProgramOptions::default(),
        }
    }

    /// Run in the main terminal buffer instead of the alternate screen.
    #[must_use]
    pub const fn without_alt_screen(mut self) -> Self {
        self.options.alt_screen = false;
        self
    }

    /// Run the event loop to completion and return the final model.
    pub fn run(mut self) -> Result<M> {
        let mut out = io::stdout();

        enable_raw_mode()?;
        if self.options.alt_screen {
            execute!(out, EnterAlternateScreen)?;
        }
        execute!(out, cursor::Hide)?;

        let result = self.event_loop(&mut out);

        // Teardown runs even when the loop failed, so the terminal is
        // never left raw.
        let _ = execute!(out, cursor::Show);
        if self.options.alt_screen {
            let _ = execute!(out, LeaveAlternateScreen);
        }
        let _ = disable_raw_mode();

        result?;
        Ok(self.model)
    }

    fn event_loop(&mut self, out: &mut impl Write) -> Result<()> {
        render(out, &self.model.view())?;

        loop {
            if let Event::Key(key) = event::read()? {
                let Some(msg) = keys::translate(&key) else {
                    continue;
                };
                if self.model.update(&msg) == Flow::Quit {
                    return Ok(());
                }
                render(out, &self.model.view())?;
            }
        }
    }
}

/// Full-frame redraw: clear, home the cursor, and reprint the view.
///
/// Raw mode does not translate `\n`, so each line is written with an
/// explicit carriage return.
fn render(out: &mut impl Write, view: &str) -> Result<()> {
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    for line in view.lines() {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\r\n")?;
    }
    out.flush()?;
    Ok(())
}
