//! Overlays drawn on top of the letter list

use chrono::{DateTime, FixedOffset};
use ratatui::{prelude::*, widgets::*};

use crate::{
    domain::{
        letter::Letter,
        presenter::{present_letter, LetterStatus},
    },
    infrastructure::config::Styles,
    presentation::{components::centered_rect, text::single_line},
};

/// Asks before a letter is deleted
#[derive(Debug, Clone, Default)]
pub struct ConfirmDeleteComponent {
    styles: Styles,
}

impl ConfirmDeleteComponent {
    pub fn new(styles: Styles) -> Self {
        Self { styles }
    }

    pub fn view(&self, title: &str, frame: &mut Frame, area: Rect) {
        let rect = centered_rect(60, 7, area);
        let text = vec![
            Line::from(format!("Delete \"{}\"?", single_line(title))).bold(),
            Line::from("This cannot be undone.").fg(self.styles.muted),
            Line::default(),
            Line::from(vec![
                Span::styled("y", Style::default().fg(self.styles.error).bold()),
                Span::raw(" delete   "),
                Span::styled("n", Style::default().bold()),
                Span::raw(" keep"),
            ]),
        ];
        let dialog = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title(" Confirm ")
                    .border_style(Style::default().fg(self.styles.error)),
            );

        frame.render_widget(Clear, rect);
        frame.render_widget(dialog, rect);
    }
}

/// Full content of one letter
#[derive(Debug, Clone, Default)]
pub struct LetterDetailComponent {
    styles: Styles,
}

impl LetterDetailComponent {
    pub fn new(styles: Styles) -> Self {
        Self { styles }
    }

    pub fn view(&self, letter: &Letter, now: DateTime<FixedOffset>, frame: &mut Frame, area: Rect) {
        let item = present_letter(letter, now);
        let rect = centered_rect(80, area.height.saturating_sub(2), area);

        let status_color = match item.status {
            LetterStatus::Pending => self.styles.pending,
            LetterStatus::Delivered => self.styles.delivered,
        };
        let mut meta = vec![
            Span::styled(format!("[{}]", item.status), Style::default().fg(status_color)),
            Span::raw(format!("  Delivery: {}", item.formatted_date)),
        ];
        if let Some(remaining) = item.time_remaining {
            meta.push(Span::styled(
                format!("  ({remaining})"),
                Style::default().fg(self.styles.muted),
            ));
        }

        let mut text = vec![Line::from(meta), Line::default()];
        text.extend(letter.content.lines().map(|line| Line::from(single_line(line))));

        let detail = Paragraph::new(text).wrap(Wrap { trim: false }).block(
            Block::bordered()
                .title(format!(" {} ", single_line(&item.title)))
                .padding(Padding::horizontal(1)),
        );

        frame.render_widget(Clear, rect);
        frame.render_widget(detail, rect);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::test_helpers::{buffer_lines, fixed_now, pending_letter};

    #[test]
    fn test_confirm_dialog_names_letter() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).expect("terminal");
        let dialog = ConfirmDeleteComponent::new(Styles::default());

        terminal
            .draw(|frame| dialog.view("To my future self", frame, frame.area()))
            .expect("draw");

        let lines = buffer_lines(terminal.backend().buffer());
        assert!(lines.iter().any(|l| l.contains("Delete \"To my future self\"?")));
    }

    #[test]
    fn test_detail_shows_content_and_countdown() {
        let mut terminal = Terminal::new(TestBackend::new(70, 14)).expect("terminal");
        let detail = LetterDetailComponent::new(Styles::default());
        let letter = pending_letter(1, 1);

        terminal
            .draw(|frame| detail.view(&letter, fixed_now(), frame, frame.area()))
            .expect("draw");

        let lines = buffer_lines(terminal.backend().buffer());
        assert!(lines.iter().any(|l| l.contains("Letter 1")));
        assert!(lines.iter().any(|l| l.contains("Dear future me #1")));
        assert!(lines.iter().any(|l| l.contains("Delivers tomorrow!")));
    }
}
