//! Status bar component
//!
//! Shows the last status message, coloured by its kind.

use ratatui::{prelude::*, widgets::*};

use crate::{
    core::state::{AppState, StatusKind},
    infrastructure::config::Styles,
};

#[derive(Debug, Clone, Default)]
pub struct StatusBarComponent {
    styles: Styles,
}

impl StatusBarComponent {
    pub fn new(styles: Styles) -> Self {
        Self { styles }
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let Some(message) = &state.system.status_message else {
            return;
        };
        let style = match message.kind {
            StatusKind::Info => Style::default(),
            StatusKind::Error => Style::default().fg(self.styles.error).bold(),
        };
        frame.render_widget(Paragraph::new(message.text.as_str()).style(style), area);
    }
}
