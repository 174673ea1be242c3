use std::collections::HashSet;

use crate::{
    core::{cmd::Cmd, msg::letters::LettersMsg},
    domain::{
        letter::{Letter, LetterId},
        presenter::sort_letters,
    },
};

/// Lifecycle of one view load
///
/// `Idle → Loading → {Rendered | EmptyRendered | Errored}`, and
/// `Rendered → EmptyRendered` once the last letter is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPhase {
    #[default]
    Idle,
    Loading,
    Rendered,
    EmptyRendered,
    Errored,
}

/// Letters from the last successful fetch, kept in presentation order
#[derive(Debug, Clone, Default)]
pub struct LettersState {
    phase: ViewPhase,
    letters: Vec<Letter>,
    selected_index: Option<usize>,
    deleting: HashSet<LetterId>,
    /// Confirmed deletions while a fetch is in flight; that fetch may predate them
    deleted_during_load: HashSet<LetterId>,
}

impl LettersState {
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_letter(&self) -> Option<&Letter> {
        self.selected_index.and_then(|i| self.letters.get(i))
    }

    pub fn find(&self, id: &LetterId) -> Option<&Letter> {
        self.letters.iter().find(|letter| &letter.id == id)
    }

    /// A delete request for `id` is in flight
    pub fn is_deleting(&self, id: &LetterId) -> bool {
        self.deleting.contains(id)
    }

    /// Issue a delete for a pending letter. Delivered, unknown or already
    /// deleting letters yield no command.
    pub fn begin_delete(&mut self, id: LetterId) -> Vec<Cmd> {
        let deletable = self
            .find(&id)
            .is_some_and(|letter| letter.is_pending() && !self.deleting.contains(&id));
        if !deletable {
            return vec![];
        }
        self.deleting.insert(id.clone());
        vec![Cmd::DeleteLetter { id }]
    }

    /// Letters-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: LettersMsg) -> Vec<Cmd> {
        match msg {
            LettersMsg::Load => {
                if self.phase == ViewPhase::Loading {
                    return vec![];
                }
                // in-flight deletes outlive the reload
                *self = Self {
                    phase: ViewPhase::Loading,
                    deleting: std::mem::take(&mut self.deleting),
                    ..Default::default()
                };
                vec![Cmd::FetchLetters]
            }

            LettersMsg::Loaded(mut letters) => {
                if self.phase != ViewPhase::Loading {
                    log::debug!("Ignoring letters fetched outside a view load");
                    return vec![];
                }
                let deleted = std::mem::take(&mut self.deleted_during_load);
                letters.retain(|letter| !deleted.contains(&letter.id));
                sort_letters(&mut letters);
                self.phase = if letters.is_empty() {
                    ViewPhase::EmptyRendered
                } else {
                    ViewPhase::Rendered
                };
                self.selected_index = if letters.is_empty() { None } else { Some(0) };
                self.letters = letters;
                vec![]
            }

            LettersMsg::LoadFailed(_) => {
                if self.phase != ViewPhase::Loading {
                    return vec![];
                }
                self.phase = ViewPhase::Errored;
                self.letters.clear();
                self.selected_index = None;
                self.deleted_during_load.clear();
                vec![]
            }

            LettersMsg::SelectNext => {
                let max_index = self.letters.len().saturating_sub(1);
                self.selected_index = match self.selected_index {
                    _ if self.letters.is_empty() => None,
                    Some(current) => Some((current + 1).min(max_index)),
                    None => Some(0),
                };
                vec![]
            }

            LettersMsg::SelectPrevious => {
                self.selected_index = match self.selected_index {
                    _ if self.letters.is_empty() => None,
                    Some(current) => Some(current.saturating_sub(1)),
                    None => Some(0),
                };
                vec![]
            }

            LettersMsg::SelectFirst => {
                self.selected_index = (!self.letters.is_empty()).then_some(0);
                vec![]
            }

            LettersMsg::SelectLast => {
                self.selected_index = self.letters.len().checked_sub(1);
                vec![]
            }

            LettersMsg::Deleted(id) => {
                self.deleting.remove(&id);
                if self.phase == ViewPhase::Loading {
                    self.deleted_during_load.insert(id.clone());
                }
                if let Some(position) = self.letters.iter().position(|l| l.id == id) {
                    self.letters.remove(position);
                    self.selected_index = match self.selected_index {
                        _ if self.letters.is_empty() => None,
                        Some(current) if current > position => Some(current - 1),
                        Some(current) => Some(current.min(self.letters.len() - 1)),
                        None => None,
                    };
                    if self.letters.is_empty() && self.phase == ViewPhase::Rendered {
                        self.phase = ViewPhase::EmptyRendered;
                    }
                }
                vec![]
            }

            LettersMsg::DeleteFailed { id, .. } => {
                self.deleting.remove(&id);
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::infrastructure::api::ApiError;

    fn base() -> DateTime<Utc> {
        "2026-01-01T12:00:00Z".parse().unwrap()
    }

    fn letter(id: i64, days: i64, is_delivered: bool) -> Letter {
        Letter {
            id: LetterId::from(id),
            title: format!("Letter {id}"),
            content: String::new(),
            delivery_date: base() + TimeDelta::days(days),
            is_delivered,
            created_at: None,
        }
    }

    fn loaded(letters: Vec<Letter>) -> LettersState {
        let mut state = LettersState::default();
        state.update(LettersMsg::Load);
        state.update(LettersMsg::Loaded(letters));
        state
    }

    fn ids(state: &LettersState) -> Vec<&str> {
        state.letters().iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_load_issues_fetch_once() {
        let mut state = LettersState::default();

        assert_eq!(state.update(LettersMsg::Load), vec![Cmd::FetchLetters]);
        assert_eq!(state.phase(), ViewPhase::Loading);

        // a second load while one is in flight is ignored
        assert!(state.update(LettersMsg::Load).is_empty());
    }

    #[test]
    fn test_loaded_sorts_and_selects_first() {
        let state = loaded(vec![
            letter(1, -5, true),
            letter(2, 10, false),
            letter(3, 2, false),
        ]);

        assert_eq!(state.phase(), ViewPhase::Rendered);
        assert_eq!(ids(&state), vec!["3", "2", "1"]);
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn test_loaded_empty_is_empty_rendered() {
        let state = loaded(vec![]);

        assert_eq!(state.phase(), ViewPhase::EmptyRendered);
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn test_load_failed_leaves_view_empty() {
        let mut state = loaded(vec![letter(1, 3, false)]);
        state.update(LettersMsg::Load);
        state.update(LettersMsg::LoadFailed(ApiError::RequestFailed {
            status: Some(500),
            detail: None,
        }));

        assert_eq!(state.phase(), ViewPhase::Errored);
        assert!(state.is_empty());
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut state = loaded(vec![letter(1, 1, false), letter(2, 2, false)]);

        state.update(LettersMsg::SelectNext);
        state.update(LettersMsg::SelectNext);
        assert_eq!(state.selected_index(), Some(1));

        state.update(LettersMsg::SelectPrevious);
        state.update(LettersMsg::SelectPrevious);
        assert_eq!(state.selected_index(), Some(0));

        state.update(LettersMsg::SelectLast);
        assert_eq!(state.selected_index(), Some(1));
        state.update(LettersMsg::SelectFirst);
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn test_selection_on_empty_list() {
        let mut state = loaded(vec![]);

        state.update(LettersMsg::SelectNext);
        state.update(LettersMsg::SelectLast);

        assert_eq!(state.selected_index(), None);
        assert!(state.selected_letter().is_none());
    }

    #[test]
    fn test_begin_delete_only_for_pending() {
        let mut state = loaded(vec![letter(1, 3, false), letter(2, -3, true)]);

        assert!(state.begin_delete(LetterId::from(2)).is_empty());
        assert!(state.begin_delete(LetterId::from(99)).is_empty());
        assert_eq!(
            state.begin_delete(LetterId::from(1)),
            vec![Cmd::DeleteLetter {
                id: LetterId::from(1)
            }]
        );
        assert!(state.is_deleting(&LetterId::from(1)));

        // no duplicate request while the first is in flight
        assert!(state.begin_delete(LetterId::from(1)).is_empty());
    }

    #[test]
    fn test_deleted_removes_exactly_that_letter() {
        let mut state = loaded(vec![
            letter(1, 1, false),
            letter(2, 2, false),
            letter(3, 3, false),
        ]);
        state.update(LettersMsg::SelectLast);
        state.begin_delete(LetterId::from(2));

        state.update(LettersMsg::Deleted(LetterId::from(2)));

        assert_eq!(ids(&state), vec!["1", "3"]);
        assert_eq!(state.selected_index(), Some(1));
        assert!(!state.is_deleting(&LetterId::from(2)));
        assert_eq!(state.phase(), ViewPhase::Rendered);
    }

    #[test]
    fn test_deleting_last_letter_reveals_empty_state() {
        let mut state = loaded(vec![letter(1, 1, false)]);
        state.begin_delete(LetterId::from(1));

        state.update(LettersMsg::Deleted(LetterId::from(1)));

        assert!(state.is_empty());
        assert_eq!(state.phase(), ViewPhase::EmptyRendered);
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn test_delete_failed_keeps_letter() {
        let mut state = loaded(vec![letter(1, 1, false)]);
        state.begin_delete(LetterId::from(1));

        state.update(LettersMsg::DeleteFailed {
            id: LetterId::from(1),
            error: ApiError::RequestFailed {
                status: Some(500),
                detail: None,
            },
        });

        assert_eq!(ids(&state), vec!["1"]);
        assert!(!state.is_deleting(&LetterId::from(1)));
        assert_eq!(state.phase(), ViewPhase::Rendered);
    }

    #[test]
    fn test_reload_keeps_delete_in_flight() {
        let mut state = loaded(vec![letter(1, 1, false), letter(2, 2, false)]);
        state.begin_delete(LetterId::from(1));

        state.update(LettersMsg::Load);
        state.update(LettersMsg::Loaded(vec![
            letter(1, 1, false),
            letter(2, 2, false),
        ]));

        assert!(state.is_deleting(&LetterId::from(1)));
        assert!(state.begin_delete(LetterId::from(1)).is_empty());
    }

    #[test]
    fn test_stale_fetch_does_not_restore_deleted_letter() {
        let mut state = loaded(vec![letter(1, 1, false), letter(2, 2, false)]);
        state.begin_delete(LetterId::from(1));

        state.update(LettersMsg::Load);
        state.update(LettersMsg::Deleted(LetterId::from(1)));
        // served before the server applied the delete
        state.update(LettersMsg::Loaded(vec![
            letter(1, 1, false),
            letter(2, 2, false),
        ]));

        assert_eq!(ids(&state), vec!["2"]);
        assert!(!state.is_deleting(&LetterId::from(1)));

        // the filter only applies to the fetch that was in flight
        state.update(LettersMsg::Load);
        state.update(LettersMsg::Loaded(vec![letter(1, 1, false)]));
        assert_eq!(ids(&state), vec!["1"]);
    }

    #[test]
    fn test_results_outside_a_load_are_ignored() {
        let mut state = LettersState::default();

        state.update(LettersMsg::Loaded(vec![letter(1, 1, false)]));
        assert_eq!(state.phase(), ViewPhase::Idle);
        assert!(state.is_empty());

        let mut state = loaded(vec![letter(1, 1, false)]);
        state.update(LettersMsg::Loaded(vec![letter(2, 2, false)]));
        state.update(LettersMsg::LoadFailed(ApiError::RequestFailed {
            status: Some(500),
            detail: None,
        }));
        assert_eq!(state.phase(), ViewPhase::Rendered);
        assert_eq!(ids(&state), vec!["1"]);
    }
}
