#![forbid(unsafe_code)]

//! # Dynaform TUI
//!
//! Terminal front end for the `dynaform` engine: a form whose field set is
//! decided at runtime, with per-field validation, completion tracking, and
//! an editable list of submitted records.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p dynaform-tui -- --form-type payment
//! ```

use std::fs::File;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dynaform_tui::app::{self, App};
use dynaform_tui::cli::Cli;
use dynaform_tui::program::Program;
use dynaform_tui::theme::Theme;

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    if cli.self_check {
        println!("{}", app::self_check_report());
        return Ok(());
    }

    let theme = Theme::new(!cli.no_color);
    let app = App::new(cli.form_type, theme);

    let mut program = Program::new(app);
    if cli.no_alt_screen {
        program = program.without_alt_screen();
    }
    program.run().context("failed to run terminal program")?;

    Ok(())
}
