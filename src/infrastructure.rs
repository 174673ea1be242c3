//! Infrastructure layer
//!
//! This module handles external integrations and services:
//! - TUI foundation
//! - CLI argument processing
//! - Configuration loading
//! - The letters HTTP API and the background service driving it
//! - Credential persistence

pub mod api;
pub mod api_service;
pub mod cli;
pub mod config;
pub mod credential_store;
pub mod tui;
