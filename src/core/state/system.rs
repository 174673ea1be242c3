use chrono::{DateTime, FixedOffset, Local};

use crate::core::{cmd::Cmd, msg::system::SystemMsg};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Last message shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// System-related state
#[derive(Debug, Clone)]
pub struct SystemState {
    pub should_quit: bool,
    pub status_message: Option<StatusMessage>,
    /// Clock used by the presenter, refreshed on every tick
    pub now: DateTime<FixedOffset>,
}

impl Default for SystemState {
    fn default() -> Self {
        Self {
            should_quit: false,
            status_message: None,
            now: Local::now().fixed_offset(),
        }
    }
}

impl SystemState {
    pub fn show_info(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Info,
        });
    }

    pub fn show_error(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
        });
    }

    /// System-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: SystemMsg) -> Vec<Cmd> {
        match msg {
            SystemMsg::Quit => {
                self.should_quit = true;
                vec![]
            }

            // ratatui re-lays out on the next draw
            SystemMsg::Resize(..) => vec![],

            SystemMsg::Tick(now) => {
                self.now = now;
                vec![]
            }

            SystemMsg::ClearStatusMessage => {
                self.status_message = None;
                vec![]
            }

            SystemMsg::ShowError(error) => {
                let cmds = vec![Cmd::LogError {
                    message: error.clone(),
                }];
                self.show_error(error);
                cmds
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_system_state_quit_isolated() {
        let mut system = SystemState::default();
        assert!(!system.should_quit);

        let cmds = system.update(SystemMsg::Quit);

        assert!(system.should_quit);
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_tick_updates_clock() {
        let mut system = SystemState::default();
        let now: DateTime<FixedOffset> = "2030-05-05T08:00:00+02:00".parse().unwrap();

        system.update(SystemMsg::Tick(now));

        assert_eq!(system.now, now);
    }

    #[test]
    fn test_status_message_lifecycle() {
        let mut system = SystemState::default();

        system.show_info("Letter deleted.");
        assert_eq!(
            system.status_message,
            Some(StatusMessage {
                text: "Letter deleted.".to_string(),
                kind: StatusKind::Info
            })
        );

        system.update(SystemMsg::ClearStatusMessage);
        assert_eq!(system.status_message, None);
    }

    #[test]
    fn test_show_error_logs() {
        let mut system = SystemState::default();

        let cmds = system.update(SystemMsg::ShowError("boom".to_string()));

        assert_eq!(
            cmds,
            vec![Cmd::LogError {
                message: "boom".to_string()
            }]
        );
        assert_eq!(
            system.status_message.map(|m| m.kind),
            Some(StatusKind::Error)
        );
    }
}
