//! Component collection and layout
//!
//! Components are stateless renderers that receive state as parameters.

use ratatui::{prelude::*, widgets::*};

use crate::{
    core::state::{AppState, Modal, Route},
    infrastructure::config::Styles,
};

pub mod dialogs;
pub mod letter_list;
pub mod login;
pub mod status_bar;

pub use dialogs::{ConfirmDeleteComponent, LetterDetailComponent};
pub use letter_list::LetterListComponent;
pub use login::LoginComponent;
pub use status_bar::StatusBarComponent;

const DASHBOARD_HELP: &str =
    "j/k move  g/G first/last  Enter open  d delete  r reload  q quit";

/// Collection of all components
#[derive(Debug, Clone, Default)]
pub struct Components {
    pub letter_list: LetterListComponent,
    pub confirm_delete: ConfirmDeleteComponent,
    pub letter_detail: LetterDetailComponent,
    pub login: LoginComponent,
    pub status_bar: StatusBarComponent,
}

impl Components {
    pub fn new(styles: Styles) -> Self {
        Self {
            letter_list: LetterListComponent::new(styles),
            confirm_delete: ConfirmDeleteComponent::new(styles),
            letter_detail: LetterDetailComponent::new(styles),
            login: LoginComponent::new(styles),
            status_bar: StatusBarComponent::new(styles),
        }
    }

    /// Render all components
    ///
    /// This is the main rendering entry point that delegates to individual components.
    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let area = frame.area();

        // Create layout: [title, main area, status line, help line]
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Future Letters", Style::default().bold()),
            Span::styled(
                format!("  v{}", crate::VERSION),
                Style::default().fg(self.status_bar.styles().muted),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), layout[0]);

        match state.route {
            Route::Login { expired } => self.login.view(expired, frame, layout[1]),
            Route::Dashboard => {
                self.letter_list.view(state, frame, layout[1]);
                match &state.ui.modal {
                    Modal::None => {}
                    Modal::ConfirmDelete { title, .. } => {
                        self.confirm_delete.view(title, frame, layout[1])
                    }
                    Modal::Detail { id } => {
                        if let Some(letter) = state.letters.find(id) {
                            self.letter_detail
                                .view(letter, state.system.now, frame, layout[1]);
                        }
                    }
                }
            }
        }

        self.status_bar.view(state, frame, layout[2]);

        let help = match (&state.route, &state.ui.modal) {
            (Route::Login { .. }, _) => "q quit",
            (Route::Dashboard, Modal::ConfirmDelete { .. }) => "y confirm  n cancel",
            (Route::Dashboard, Modal::Detail { .. }) => "Esc close  d delete",
            (Route::Dashboard, Modal::None) => DASHBOARD_HELP,
        };
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(self.status_bar.styles().muted)),
            layout[3],
        );
    }
}

/// Rectangle of `percent_x` by `height` rows centred in `area`
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, rect, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x.min(100)) / 2),
        Constraint::Percentage(percent_x.min(100)),
        Constraint::Fill(1),
    ])
    .areas(row);
    rect
}
