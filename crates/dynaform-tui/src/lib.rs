#![forbid(unsafe_code)]

//! # Dynaform TUI
//!
//! Terminal front end for the [`dynaform`] engine.
//!
//! The active form type picks the field set at runtime; fields validate as
//! you type, a progress line tracks required-field completion, and
//! submitted records collect in an editable list below the form.
//!
//! This module exposes the application internals so the binary and the
//! integration tests can share code.
//!
//! ## Public Modules
//!
//! - [`app`] - Application state, update logic, and view rendering
//! - [`cli`] - Command-line contract
//! - [`keys`] - Key messages and crossterm translation
//! - [`program`] - Terminal run loop
//! - [`theme`] - Semantic color tokens

pub mod app;
pub mod cli;
pub mod keys;
pub mod program;
pub mod theme;
