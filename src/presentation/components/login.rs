use ratatui::{prelude::*, widgets::*};

use crate::{infrastructure::config::Styles, presentation::components::centered_rect};

pub const EXPIRED_NOTICE: &str = "Your session has expired. Please sign in again.";
pub const SIGN_IN_NOTICE: &str = "You are not signed in.";

/// Sign-in notice shown instead of the dashboard
///
/// Signing in happens in the browser; the token it hands out is stored with
/// `futureletters login --token <TOKEN>`.
#[derive(Debug, Clone, Default)]
pub struct LoginComponent {
    styles: Styles,
}

impl LoginComponent {
    pub fn new(styles: Styles) -> Self {
        Self { styles }
    }

    pub fn view(&self, expired: bool, frame: &mut Frame, area: Rect) {
        let (headline, color) = if expired {
            (EXPIRED_NOTICE, self.styles.error)
        } else {
            (SIGN_IN_NOTICE, self.styles.pending)
        };

        let text = vec![
            Line::from(headline).fg(color).bold(),
            Line::default(),
            Line::from("Sign in on the web, then run:"),
            Line::from(format!("  {} login --token <TOKEN>", env!("CARGO_PKG_NAME")))
                .fg(self.styles.selected),
        ];
        let rect = centered_rect(70, 8, area);
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false })
                .block(Block::bordered().title(" Sign in ")),
            rect,
        );
    }
}
