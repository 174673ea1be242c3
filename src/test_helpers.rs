//! Builders and fakes shared by unit and integration tests

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    core::{
        cmd::Cmd,
        msg::{letters::LettersMsg, system::SystemMsg, Msg},
        raw_msg::RawMsg,
        state::AppState,
        translator::translate_raw_to_domain,
        update::update,
    },
    domain::letter::{Letter, LetterId, NewLetter},
    infrastructure::{
        api::{ApiError, LetterApi},
        api_service::ApiEvent,
    },
};

/// The clock every builder in here is relative to: 2026-01-01 12:00 UTC
pub fn fixed_now() -> DateTime<FixedOffset> {
    DateTime::from_timestamp(1_767_268_800, 0)
        .unwrap_or_default()
        .fixed_offset()
}

fn letter(id: i64, days_from_now: i64, is_delivered: bool) -> Letter {
    Letter {
        id: LetterId::from(id),
        title: format!("Letter {id}"),
        content: format!("Dear future me #{id}"),
        delivery_date: fixed_now().with_timezone(&Utc) + TimeDelta::days(days_from_now),
        is_delivered,
        created_at: None,
    }
}

/// Undelivered letter due `days_from_now` days after [`fixed_now`]
pub fn pending_letter(id: i64, days_from_now: i64) -> Letter {
    letter(id, days_from_now, false)
}

/// Delivered letter; pass a negative offset for a past delivery
pub fn delivered_letter(id: i64, days_from_now: i64) -> Letter {
    letter(id, days_from_now, true)
}

/// Dashboard state after a successful load of `letters`, clocked at [`fixed_now`]
pub fn loaded_state(letters: Vec<Letter>) -> AppState {
    let mut state = AppState::new(true);
    state.system.now = fixed_now();
    let (state, _) = update(Msg::Letters(LettersMsg::Load), state);
    let (state, _) = update(Msg::Letters(LettersMsg::Loaded(letters)), state);
    state
}

/// Rendered buffer as plain text, one string per row
pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

#[derive(Debug, Default)]
struct FakeState {
    letters: Vec<Letter>,
    list_error: Option<ApiError>,
    delete_error: Option<ApiError>,
    create_error: Option<ApiError>,
    tokens_seen: Vec<String>,
    deleted: Vec<LetterId>,
    created: Vec<NewLetter>,
}

/// In-memory [`LetterApi`] with scriptable failures that records every call
#[derive(Debug, Default)]
pub struct FakeLetterApi {
    state: Mutex<FakeState>,
}

impl FakeLetterApi {
    pub fn with_letters(letters: Vec<Letter>) -> Self {
        let api = Self::default();
        api.lock().letters = letters;
        api
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fail_lists_with(&self, error: ApiError) {
        self.lock().list_error = Some(error);
    }

    pub fn fail_deletes_with(&self, error: ApiError) {
        self.lock().delete_error = Some(error);
    }

    pub fn fail_creates_with(&self, error: ApiError) {
        self.lock().create_error = Some(error);
    }

    pub fn tokens_seen(&self) -> Vec<String> {
        self.lock().tokens_seen.clone()
    }

    pub fn deleted(&self) -> Vec<LetterId> {
        self.lock().deleted.clone()
    }

    pub fn created(&self) -> Vec<NewLetter> {
        self.lock().created.clone()
    }

    pub fn letters(&self) -> Vec<Letter> {
        self.lock().letters.clone()
    }
}

#[async_trait]
impl LetterApi for FakeLetterApi {
    async fn list_letters(&self, token: &SecretString) -> Result<Vec<Letter>, ApiError> {
        let mut state = self.lock();
        state.tokens_seen.push(token.expose_secret().to_string());
        match &state.list_error {
            Some(error) => Err(error.clone()),
            None => Ok(state.letters.clone()),
        }
    }

    async fn delete_letter(&self, token: &SecretString, id: &LetterId) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.tokens_seen.push(token.expose_secret().to_string());
        if let Some(error) = &state.delete_error {
            return Err(error.clone());
        }
        let before = state.letters.len();
        state.letters.retain(|letter| &letter.id != id);
        if state.letters.len() == before {
            return Err(ApiError::RequestFailed {
                status: Some(404),
                detail: Some("Letter not found.".to_string()),
            });
        }
        state.deleted.push(id.clone());
        Ok(())
    }

    async fn create_letter(
        &self,
        token: &SecretString,
        letter: &NewLetter,
    ) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.tokens_seen.push(token.expose_secret().to_string());
        if let Some(error) = &state.create_error {
            return Err(error.clone());
        }
        state.created.push(letter.clone());
        Ok(())
    }
}

/// Drives the pure translate/update loop the way the runtime does, without any I/O.
/// Provides a fluent API for common test patterns and reduces boilerplate
pub struct DashboardTestHelper {
    state: AppState,
    commands: Vec<Cmd>,
}

impl DashboardTestHelper {
    /// Dashboard with `letters` already loaded
    pub fn with_letters(letters: Vec<Letter>) -> Self {
        Self {
            state: loaded_state(letters),
            commands: vec![],
        }
    }

    /// Dashboard that has just asked for its letters
    pub fn loading() -> Self {
        let mut state = AppState::new(true);
        state.system.now = fixed_now();
        let mut helper = Self {
            state,
            commands: vec![],
        };
        helper.send_message(Msg::Letters(LettersMsg::Load));
        helper
    }

    pub fn send_raw(&mut self, raw: RawMsg) -> &mut Self {
        for msg in translate_raw_to_domain(raw, &self.state) {
            self.send_message(msg);
        }
        self
    }

    pub fn send_message(&mut self, msg: Msg) -> &mut Self {
        let (state, commands) = update(msg, std::mem::take(&mut self.state));
        self.state = state;
        self.commands.extend(commands);
        self
    }

    pub fn press_char(&mut self, ch: char) -> &mut Self {
        self.press_key(KeyCode::Char(ch))
    }

    pub fn press_key(&mut self, code: KeyCode) -> &mut Self {
        self.send_raw(RawMsg::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    pub fn api_event(&mut self, event: ApiEvent) -> &mut Self {
        self.send_raw(RawMsg::Api(event))
    }

    pub fn tick(&mut self, now: DateTime<FixedOffset>) -> &mut Self {
        self.send_message(Msg::System(SystemMsg::Tick(now)))
    }

    /// Commands emitted so far, oldest first; clears the record
    pub fn take_commands(&mut self) -> Vec<Cmd> {
        std::mem::take(&mut self.commands)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn assert_titles(&self, expected: &[&str]) {
        let titles: Vec<&str> = self
            .state
            .letters
            .letters()
            .iter()
            .map(|letter| letter.title.as_str())
            .collect();
        assert_eq!(titles, expected, "letter titles");
    }

    pub fn assert_status_message(&self, expected: &str) {
        let actual = self
            .state
            .system
            .status_message
            .as_ref()
            .map(|m| m.text.as_str());
        assert_eq!(actual, Some(expected), "status message");
    }
}
