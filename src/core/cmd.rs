use strum::IntoStaticStr;

use crate::domain::letter::LetterId;

/// Elm-like command definitions
/// Represents side effects (network calls, credential storage, logging).
/// Cmd captures application intent; `ApiOperation` captures how the API service
/// executes it, so the update logic never sees infrastructure types.
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum Cmd {
    // Letters API
    FetchLetters,
    DeleteLetter { id: LetterId },

    /// Forget the bearer credential (memory and storage)
    InvalidateSession,

    // Logging related
    LogError { message: String },
    LogInfo { message: String },

    // Batch command (execute multiple commands together)
    Batch(Vec<Cmd>),

    // Do nothing (for testing)
    None,
}

impl Cmd {
    /// Combine multiple commands into one
    pub fn batch(commands: Vec<Cmd>) -> Cmd {
        let mut iter = commands.into_iter();
        match (iter.next(), iter.next()) {
            (None, _) => Cmd::None,
            (Some(only), None) => only,
            (Some(first), Some(second)) => {
                let mut all = vec![first, second];
                all.extend(iter);
                Cmd::Batch(all)
            }
        }
    }

    /// Whether the command requires asynchronous processing
    pub fn is_async(&self) -> bool {
        match self {
            Cmd::FetchLetters | Cmd::DeleteLetter { .. } => true,
            Cmd::InvalidateSession | Cmd::LogError { .. } | Cmd::LogInfo { .. } | Cmd::None => {
                false
            }
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::is_async),
        }
    }

    /// Get command priority (smaller numbers = higher priority)
    pub fn priority(&self) -> u8 {
        match self {
            // Dropping a rejected credential comes before anything else
            Cmd::InvalidateSession => 0,

            // User actions
            Cmd::DeleteLetter { .. } => 1,

            Cmd::FetchLetters => 2,

            Cmd::LogError { .. } | Cmd::LogInfo { .. } => 4,

            // Batch takes highest priority of contained commands
            Cmd::Batch(cmds) => cmds.iter().map(Cmd::priority).min().unwrap_or(255),

            Cmd::None => 255,
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}
