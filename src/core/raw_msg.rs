use chrono::{DateTime, FixedOffset};
use crossterm::event::KeyEvent;

use crate::infrastructure::api_service::ApiEvent;

/// Raw messages from external sources (input, network, system)
/// These represent unprocessed external events that need to be translated to domain events
#[derive(Debug, Clone, PartialEq)]
pub enum RawMsg {
    // System events
    Tick(DateTime<FixedOffset>),
    Render,
    Resize(u16, u16),
    Quit,

    // User input (raw keyboard events)
    Key(KeyEvent),

    // Outcomes of letters API calls
    Api(ApiEvent),

    // System status
    Error(String),
}

impl RawMsg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        matches!(self, RawMsg::Tick(_) | RawMsg::Render)
    }
}
