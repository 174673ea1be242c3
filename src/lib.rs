//! # Future Letters - terminal client
//!
//! A terminal client for letters written to your future self, built with Rust
//! and Ratatui. The dashboard lists your letters (pending first, soonest
//! first), shows how long each pending letter still has to wait, and deletes
//! letters that have not been delivered yet.
//!
//! ## Architecture Overview
//!
//! This crate is organized around the Elm architecture pattern:
//!
//! - **Model** (`core::state`): application state
//! - **Message** (`core::msg`): events that can change the state
//! - **Update** (`core::update`): pure functions that transform state
//! - **Command** (`core::cmd`): side effects (HTTP calls, credential storage, logging)
//! - **View** (`presentation`): stateless rendering of the current state
//!
//! Rendering goes through a pure render model: [`domain::presenter::present`]
//! maps letters and the current time to a [`domain::presenter::LetterListView`].
//!
//! ## Example Usage
//!
//! ```rust
//! use futureletters::{core::msg::{letters::LettersMsg, Msg}, update, AppState, Cmd};
//!
//! let state = AppState::new(true);
//! let (state, commands) = update(Msg::Letters(LettersMsg::Load), state);
//!
//! assert_eq!(commands, vec![Cmd::FetchLetters]);
//! assert!(state.route.is_dashboard());
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Elm architecture: state, messages, update, commands
//! - [`domain`] - letters, the presenter and the session context
//! - [`infrastructure`] - HTTP API, configuration, CLI, terminal
//! - [`integration`] - runtime, event loop and one-shot subcommands
//! - [`presentation`] - ratatui components

#![allow(dead_code)]

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod presentation;
pub mod test_helpers;
pub mod utils;

// Re-exports for convenience
pub use crate::core::cmd::Cmd;
pub use crate::core::msg::Msg;
pub use crate::core::raw_msg::RawMsg;
pub use crate::core::state::AppState;
pub use crate::core::translator::translate_raw_to_domain;
pub use crate::core::update::update;

/// Result type used throughout the library
pub type Result<T, E = color_eyre::eyre::Report> = std::result::Result<T, E>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
