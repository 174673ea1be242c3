//! Wiring between the pure core and the outside world
//!
//! - [`runtime`] owns the message and command queues
//! - [`app_runner`] drives the dashboard event loop
//! - [`commands`] implements the one-shot subcommands

pub mod app_runner;
pub mod commands;
pub mod runtime;
