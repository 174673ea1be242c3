use chrono::{DateTime, FixedOffset};

/// Messages specific to SystemState
#[derive(Debug, Clone, PartialEq)]
pub enum SystemMsg {
    // System control
    Quit,
    Resize(u16, u16),

    /// Wall-clock time in the viewer's offset, used for "days remaining"
    Tick(DateTime<FixedOffset>),

    // Status management
    ClearStatusMessage,
    ShowError(String),
}

impl SystemMsg {
    /// Determine if this is a frequent message during debugging
    pub fn is_frequent(&self) -> bool {
        matches!(self, SystemMsg::Tick(_))
    }
}
