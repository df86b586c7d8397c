//! Command-line interface for `dynaform-tui`.
//!
//! Defines the CLI contract using clap derive macros.
//!
//! # Examples
//!
//! ```bash
//! # Run with the default form type
//! dynaform-tui
//!
//! # Start on the payment form, logging to a file
//! dynaform-tui --form-type payment --log-file /tmp/dynaform.log -vv
//!
//! # Run headless self-check (for CI)
//! dynaform-tui --self-check
//! ```

use std::path::PathBuf;

use clap::Parser;
use dynaform::FormType;

/// Dynamic form generator for the terminal.
///
/// Renders a form whose fields are decided by the selected form type,
/// validates input as you type, and keeps an editable list of submitted
/// records for the session.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dynaform-tui",
    author,
    version,
    about = "Dynamic form generator for the terminal"
)]
pub struct Cli {
    /// Form type to start on
    ///
    /// One of: user-info, address, payment
    #[arg(long, short = 'f', default_value = "user-info", env = "DYNAFORM_FORM_TYPE")]
    pub form_type: FormType,

    /// Disable alternate screen mode
    ///
    /// Runs in the main terminal buffer; useful for debugging
    #[arg(long, env = "DYNAFORM_NO_ALT_SCREEN")]
    pub no_alt_screen: bool,

    /// Force color output off
    ///
    /// Also honored when the `NO_COLOR` environment variable is set
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Write structured logs to this file
    ///
    /// Logs are never written to the live terminal
    #[arg(long, env = "DYNAFORM_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Run headless self-check and exit
    ///
    /// Renders all form types without a TTY and prints a catalog summary,
    /// useful for CI validation
    #[arg(long)]
    pub self_check: bool,
}

impl Cli {
    /// Log filter directive derived from the verbosity count.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
