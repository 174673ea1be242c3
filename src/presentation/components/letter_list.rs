//! Letter list component
//!
//! Draws the dashboard body for the current view phase: a loading notice, an
//! error notice, the empty-state placeholder, or the ordered letter list.

use ratatui::{prelude::*, widgets::*};

use crate::{
    core::state::{AppState, ViewPhase},
    domain::presenter::{present, LetterItemView, LetterListView, LetterStatus},
    infrastructure::config::Styles,
    presentation::text::{single_line, truncate_to_width},
};

pub const LOADING_TEXT: &str = "Loading your letters...";
pub const ERROR_TEXT: &str = "Your letters could not be loaded. Press r to try again.";

#[derive(Debug, Clone, Default)]
pub struct LetterListComponent {
    styles: Styles,
}

impl LetterListComponent {
    pub fn new(styles: Styles) -> Self {
        Self { styles }
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Your letters ")
            .padding(Padding::horizontal(1));

        match state.letters.phase() {
            ViewPhase::Idle | ViewPhase::Loading => {
                self.notice(LOADING_TEXT, self.styles.muted, block, frame, area)
            }
            ViewPhase::Errored => self.notice(ERROR_TEXT, self.styles.error, block, frame, area),
            ViewPhase::Rendered | ViewPhase::EmptyRendered => {
                match present(state.letters.letters(), state.system.now) {
                    LetterListView::Empty { message } => {
                        self.notice(message, self.styles.muted, block, frame, area)
                    }
                    LetterListView::Items(items) => {
                        // borders, padding, highlight symbol and the status badge
                        let title_width = usize::from(area.width.saturating_sub(20));
                        let list_items: Vec<ListItem> = items
                            .iter()
                            .map(|item| {
                                self.item(item, title_width, state.letters.is_deleting(&item.id))
                            })
                            .collect();
                        let list = List::new(list_items)
                            .block(block)
                            .highlight_symbol("> ")
                            .highlight_style(
                                Style::default().fg(self.styles.selected).bold(),
                            );
                        let mut list_state =
                            ListState::default().with_selected(state.letters.selected_index());
                        frame.render_stateful_widget(list, area, &mut list_state);
                    }
                }
            }
        }
    }

    fn notice(&self, text: &str, color: Color, block: Block, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
    }

    /// Two lines: title with status badge, then delivery date and countdown
    fn item(&self, item: &LetterItemView, title_width: usize, deleting: bool) -> ListItem<'static> {
        let status_color = match item.status {
            LetterStatus::Pending => self.styles.pending,
            LetterStatus::Delivered => self.styles.delivered,
        };

        let mut title = vec![
            Span::raw(truncate_to_width(&single_line(&item.title), title_width)).bold(),
            Span::raw("  "),
            Span::styled(format!("[{}]", item.status), Style::default().fg(status_color)),
        ];
        if deleting {
            title.push(Span::styled(
                "  deleting...",
                Style::default().fg(self.styles.muted).italic(),
            ));
        }

        let mut details = vec![Span::styled(
            format!("Delivery: {}", item.formatted_date),
            Style::default().fg(self.styles.muted),
        )];
        if let Some(remaining) = &item.time_remaining {
            details.push(Span::styled(
                format!("  ({remaining})"),
                Style::default().fg(status_color),
            ));
        }

        ListItem::new(vec![Line::from(title), Line::from(details)])
    }
}
