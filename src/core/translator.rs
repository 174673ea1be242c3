use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    core::{
        msg::{letters::LettersMsg, system::SystemMsg, ui::UiMsg, Msg},
        raw_msg::RawMsg,
        state::{AppState, Modal, Route},
    },
    infrastructure::api_service::ApiEvent,
};

/// Translates raw external events into domain messages
/// This function is pure and contains no side effects
pub fn translate_raw_to_domain(raw: RawMsg, state: &AppState) -> Vec<Msg> {
    match raw {
        // System events - direct mapping
        RawMsg::Quit => vec![Msg::System(SystemMsg::Quit)],
        RawMsg::Resize(width, height) => vec![Msg::System(SystemMsg::Resize(width, height))],
        RawMsg::Tick(now) => vec![Msg::System(SystemMsg::Tick(now))],

        // User input - translate based on context and key bindings
        RawMsg::Key(key) => translate_key_event(key, state),

        // Letters API outcomes
        RawMsg::Api(event) => vec![translate_api_event(event)],

        RawMsg::Error(error) => vec![Msg::System(SystemMsg::ShowError(error))],

        // Render only triggers a redraw
        RawMsg::Render => vec![],
    }
}

fn translate_api_event(event: ApiEvent) -> Msg {
    match event {
        ApiEvent::LettersFetched(letters) => Msg::Letters(LettersMsg::Loaded(letters)),
        ApiEvent::FetchFailed(error) => Msg::Letters(LettersMsg::LoadFailed(error)),
        ApiEvent::LetterDeleted(id) => Msg::Letters(LettersMsg::Deleted(id)),
        ApiEvent::DeleteFailed { id, error } => {
            Msg::Letters(LettersMsg::DeleteFailed { id, error })
        }
    }
}

/// Translates keyboard input to domain events based on current application state
fn translate_key_event(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return vec![];
    }

    // Handle global key bindings first
    if let KeyEvent {
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
        ..
    } = key
    {
        return vec![Msg::System(SystemMsg::Quit)];
    }

    // Context-sensitive key bindings
    match (&state.route, &state.ui.modal) {
        (Route::Login { .. }, _) => translate_login_keys(key),
        (Route::Dashboard, Modal::ConfirmDelete { .. }) => translate_confirm_keys(key),
        (Route::Dashboard, Modal::Detail { .. }) => translate_detail_keys(key),
        (Route::Dashboard, Modal::None) => translate_dashboard_keys(key),
    }
}

fn translate_login_keys(key: KeyEvent) -> Vec<Msg> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![Msg::System(SystemMsg::Quit)],
        _ => vec![],
    }
}

fn translate_confirm_keys(key: KeyEvent) -> Vec<Msg> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            vec![Msg::Ui(UiMsg::ConfirmDelete)]
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            vec![Msg::Ui(UiMsg::CancelDelete)]
        }
        _ => vec![],
    }
}

fn translate_detail_keys(key: KeyEvent) -> Vec<Msg> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => vec![Msg::Ui(UiMsg::CloseDetail)],
        // deleting from the detail view goes through the same confirmation
        KeyCode::Char('d') => vec![
            Msg::Ui(UiMsg::CloseDetail),
            Msg::Ui(UiMsg::AskDeleteSelected),
        ],
        _ => vec![],
    }
}

/// Key bindings when in normal navigation mode
fn translate_dashboard_keys(key: KeyEvent) -> Vec<Msg> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => vec![Msg::Letters(LettersMsg::SelectNext)],
        KeyCode::Char('k') | KeyCode::Up => vec![Msg::Letters(LettersMsg::SelectPrevious)],
        KeyCode::Char('g') | KeyCode::Home => vec![Msg::Letters(LettersMsg::SelectFirst)],
        KeyCode::Char('G') | KeyCode::End => vec![Msg::Letters(LettersMsg::SelectLast)],
        KeyCode::Enter => vec![Msg::Ui(UiMsg::OpenDetail)],
        KeyCode::Char('d') | KeyCode::Delete => vec![Msg::Ui(UiMsg::AskDeleteSelected)],
        KeyCode::Char('r') => vec![
            Msg::System(SystemMsg::ClearStatusMessage),
            Msg::Letters(LettersMsg::Load),
        ],
        KeyCode::Char('q') => vec![Msg::System(SystemMsg::Quit)],
        _ => vec![], // No matching keybinding found
    }
}
