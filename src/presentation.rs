//! Presentation layer
//!
//! Stateless ratatui components. Each one reads [`AppState`](crate::core::state::AppState)
//! and draws into a frame; none of them mutate state.

pub mod components;
pub mod text;
