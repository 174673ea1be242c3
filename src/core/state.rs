pub mod letters;
pub mod system;
pub mod ui;

pub use letters::{LettersState, ViewPhase};
pub use system::{StatusKind, StatusMessage, SystemState};
pub use ui::{Modal, UiState};

/// Which screen is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    /// Sign-in notice; `expired` is set when the server rejected the credential
    Login { expired: bool },
}

impl Route {
    pub fn is_dashboard(&self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

/// Unified application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub route: Route,
    pub letters: LettersState,
    pub ui: UiState,
    pub system: SystemState,
}

impl AppState {
    /// Initial state for a client that does (or does not) hold a credential
    pub fn new(authenticated: bool) -> Self {
        let route = if authenticated {
            Route::Dashboard
        } else {
            Route::Login { expired: false }
        };
        Self {
            route,
            ..Default::default()
        }
    }
}
