//! Letter list presenter
//!
//! Maps a fetched letter collection and the current time to a render model.
//! Nothing in here touches the terminal or the network; the components in
//! `presentation` draw whatever [`present`] returns.

use chrono::{DateTime, FixedOffset, Utc};
use strum::Display;

use crate::domain::letter::{Letter, LetterId};

/// Shown instead of a list when the user has no letters
pub const EMPTY_PLACEHOLDER: &str = "You haven't written any letters yet.";

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LetterStatus {
    Pending,
    Delivered,
}

impl LetterStatus {
    pub fn of(letter: &Letter) -> Self {
        if letter.is_delivered {
            LetterStatus::Delivered
        } else {
            LetterStatus::Pending
        }
    }
}

/// Display fields derived for a single letter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterItemView {
    pub id: LetterId,
    pub title: String,
    pub formatted_date: String,
    pub status: LetterStatus,
    /// Only set for pending letters
    pub time_remaining: Option<String>,
}

impl LetterItemView {
    /// Only pending letters offer a delete action
    pub fn is_deletable(&self) -> bool {
        self.status == LetterStatus::Pending
    }
}

/// Render model for the dashboard list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LetterListView {
    Empty { message: &'static str },
    Items(Vec<LetterItemView>),
}

impl LetterListView {
    pub fn items(&self) -> &[LetterItemView] {
        match self {
            LetterListView::Empty { .. } => &[],
            LetterListView::Items(items) => items,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, LetterListView::Empty { .. })
    }
}

/// Pending before delivered, then ascending delivery date. The sort is stable,
/// so letters sharing both keys keep their fetch order.
pub fn sort_letters(letters: &mut [Letter]) {
    letters.sort_by_key(order_key);
}

/// Delivered flag first (`false < true`), then delivery time
fn order_key(letter: &Letter) -> (bool, DateTime<Utc>) {
    (letter.is_delivered, letter.delivery_date)
}

/// Build the render model for `letters` as seen at `now`.
///
/// `now` carries the viewer's UTC offset, which is also used to format dates.
pub fn present(letters: &[Letter], now: DateTime<FixedOffset>) -> LetterListView {
    if letters.is_empty() {
        return LetterListView::Empty {
            message: EMPTY_PLACEHOLDER,
        };
    }

    let mut ordered: Vec<&Letter> = letters.iter().collect();
    ordered.sort_by_key(|letter| order_key(letter));

    LetterListView::Items(
        ordered
            .into_iter()
            .map(|letter| present_letter(letter, now))
            .collect(),
    )
}

pub fn present_letter(letter: &Letter, now: DateTime<FixedOffset>) -> LetterItemView {
    let status = LetterStatus::of(letter);
    let time_remaining = match status {
        LetterStatus::Pending => Some(time_remaining_label(days_remaining(
            letter.delivery_date,
            now.with_timezone(&Utc),
        ))),
        LetterStatus::Delivered => None,
    };

    LetterItemView {
        id: letter.id.clone(),
        title: letter.title.clone(),
        formatted_date: format_long_date(letter.delivery_date, now.offset()),
        status,
        time_remaining,
    }
}

/// Long human form, e.g. "January 5, 2026"
pub fn format_long_date(date: DateTime<Utc>, offset: &FixedOffset) -> String {
    date.with_timezone(offset).format("%B %-d, %Y").to_string()
}

/// Whole days between `delivery` and `now`, rounded up
pub fn days_remaining(delivery: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (delivery - now).num_milliseconds().saturating_abs();
    millis / DAY_MILLIS + i64::from(millis % DAY_MILLIS != 0)
}

pub fn time_remaining_label(days: i64) -> String {
    if days == 1 {
        "Delivers tomorrow!".to_string()
    } else {
        format!("{days} days remaining")
    }
}
