//! Domain layer
//!
//! Pure types and logic with no terminal or network access:
//! - Letter records and identifiers
//! - The letter list presenter (ordering and derived display fields)
//! - The session context that owns the bearer credential

pub mod letter;
pub mod presenter;
pub mod session;
